//! Domain layer: scan snapshots, retention policy and the pure trend services.
pub mod domain;
pub mod policies;
pub mod services;
