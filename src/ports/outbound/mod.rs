/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces the trend core uses to retain history,
/// read the time, load scan results, persist state and present reports.
pub mod clock;
pub mod formatter;
pub mod history_persistence;
pub mod output_presenter;
pub mod scan_history_repository;
pub mod scan_result_reader;

pub use clock::Clock;
pub use formatter::ReportFormatter;
pub use history_persistence::HistoryPersistence;
pub use output_presenter::OutputPresenter;
pub use scan_history_repository::ScanHistoryRepository;
pub use scan_result_reader::ScanResultReader;
