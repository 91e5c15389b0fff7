/// Mock implementations for testing
mod mock_history_persistence;
mod mock_scan_result_reader;

pub use mock_history_persistence::MockHistoryPersistence;
pub use mock_scan_result_reader::MockScanResultReader;
