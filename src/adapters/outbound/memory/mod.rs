/// In-memory history adapters
mod project_registry;
mod scan_record_store;

pub use project_registry::InMemoryProjectRegistry;
pub use scan_record_store::ScanRecordStore;
