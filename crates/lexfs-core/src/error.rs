//! Error types for lexfs.

use thiserror::Error;

/// Main error type for engine operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem I/O failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Watcher backend or registration failure
    #[error("watch error: {0}")]
    Watch(String),

    /// Operation not valid in the current lifecycle state
    #[error("invalid engine state: {0}")]
    State(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for lexfs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_error_display() {
        let err = Error::Watch("inotify limit reached".to_string());
        assert_eq!(err.to_string(), "watch error: inotify limit reached");
    }

    #[test]
    fn test_state_error_display() {
        let err = Error::State("start requires a new engine".to_string());
        assert_eq!(
            err.to_string(),
            "invalid engine state: start requires a new engine"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = Error::Config("invalid root".to_string());
        assert_eq!(err.to_string(), "config error: invalid root");
    }

    #[test]
    fn test_other_error_display() {
        let err = Error::Other("unexpected condition".to_string());
        assert_eq!(err.to_string(), "unexpected condition");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn ok_fn() -> Result<i32> {
            Ok(42)
        }

        fn err_fn() -> Result<i32> {
            Err(Error::Other("test failure".to_string()))
        }

        assert!(ok_fn().is_ok());
        assert!(err_fn().is_err());
    }
}
