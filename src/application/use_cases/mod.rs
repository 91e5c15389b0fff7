/// Use cases module containing application business logic orchestration
mod track_trend;

pub use track_trend::TrackTrendUseCase;
