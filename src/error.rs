//! Global error handling for ctxdump
//!
//! Only failures that abort the whole run end up here. Unreadable
//! directories and files are rendered inline by the tree builder and the
//! content renderer and never surface as errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for ctxdump operations
#[derive(Error, Debug)]
pub enum CtxError {
    /// The ignore-rules file exists but could not be read
    #[error("Failed to read ignore file {}: {source}", path.display())]
    IgnoreFile { path: PathBuf, source: io::Error },

    /// The output file could not be created or written
    #[error("Failed to write output file {}: {source}", path.display())]
    Output { path: PathBuf, source: io::Error },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),
}

/// Specialized Result type for ctxdump operations
pub type Result<T> = std::result::Result<T, CtxError>;

/// Creates a CtxError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::CtxError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

// Allow `?` on library results inside io::Result-returning tests and helpers
impl From<CtxError> for io::Error {
    fn from(err: CtxError) -> Self {
        let kind = match &err {
            CtxError::IgnoreFile { source, .. } | CtxError::Output { source, .. } => source.kind(),
            CtxError::PathNotFound(_) => io::ErrorKind::NotFound,
            CtxError::Config(_) => io::ErrorKind::Other,
        };
        io::Error::new(kind, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_positive(n: i32) -> Result<i32> {
        crate::ensure!(n > 0, Config, "expected a positive value, got {}", n);
        Ok(n)
    }

    #[test]
    fn test_ensure_macro() {
        assert_eq!(check_positive(3).unwrap(), 3);

        let err = check_positive(-1).unwrap_err();
        assert!(matches!(err, CtxError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: expected a positive value, got -1"
        );
    }

    #[test]
    fn test_output_error_names_path() {
        let err = CtxError::Output {
            path: PathBuf::from("out/prompt_context.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert!(message.contains("out/prompt_context.txt"));
        assert!(message.contains("denied"));

        let converted: io::Error = err.into();
        assert_eq!(converted.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_ignore_file_error_names_path() {
        let err = CtxError::IgnoreFile {
            path: PathBuf::from(".ctxignore"),
            source: io::Error::new(io::ErrorKind::InvalidData, "bad"),
        };
        assert!(err.to_string().starts_with("Failed to read ignore file .ctxignore"));
    }
}
