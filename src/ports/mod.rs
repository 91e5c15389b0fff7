/// Ports module defining interfaces for hexagonal architecture
///
/// This module contains both inbound ports (driving ports - scan input and the
/// trend tracking use case) and outbound ports (driven ports - infrastructure).
pub mod inbound;
pub mod outbound;
