use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from stdin or the terminal.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or event-loop errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Nothing arrived on stdin. The one fatal precondition, raised before
    /// any interactive state exists.
    #[error("expected a list of paths on stdin (e.g. `find . | treepick`)")]
    NoInput,
}
