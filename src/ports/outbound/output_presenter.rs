use crate::shared::Result;

/// OutputPresenter port for presenting the final trend report
///
/// This port abstracts the output destination (stdout, file, etc.)
/// where the rendered report is written.
pub trait OutputPresenter {
    /// Presents the rendered report content to the output destination
    ///
    /// # Arguments
    /// * `content` - The rendered report content to present
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - The destination is a symbolic link
    fn present(&self, content: &str) -> Result<()>;
}
