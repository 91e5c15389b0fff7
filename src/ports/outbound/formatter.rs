use crate::application::dto::TrendResponse;
use crate::shared::Result;

/// ReportFormatter port for rendering trend responses
///
/// This port abstracts the rendering of one or more trend responses
/// (JSON, Markdown, etc.).
pub trait ReportFormatter {
    /// Renders the responses, in the order given, as one document
    ///
    /// # Arguments
    /// * `responses` - One response per recorded or queried project
    ///
    /// # Errors
    /// Returns an error if formatting or serialization fails
    fn format(&self, responses: &[TrendResponse]) -> Result<String>;
}
