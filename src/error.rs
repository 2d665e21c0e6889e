pub use crate::types::SslToolError;

pub type Result<T> = std::result::Result<T, SslToolError>;

/// Attaches the output path to any displayable error, turning it into an
/// `OutputWriteError`.
pub trait OutputContext<T> {
    fn with_path<P>(self, path: P) -> Result<T>
    where
        P: AsRef<std::path::Path>;
}

impl<T, E> OutputContext<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn with_path<P>(self, path: P) -> Result<T>
    where
        P: AsRef<std::path::Path>,
    {
        self.map_err(|e| SslToolError::OutputWriteError {
            path: path.as_ref().display().to_string(),
            message: e.to_string(),
        })
    }
}
