use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DebugError {
    #[error("failed to write to {}: {source}", .path.display())]
    LogWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("end called without an open timer")]
    NoOpenTimer,
}

pub type Result<T> = std::result::Result<T, DebugError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_messages() {
        let err = DebugError::LogWrite {
            path: PathBuf::from("/nope/debug.log"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "failed to write to /nope/debug.log: missing");
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(
            DebugError::NoOpenTimer.to_string(),
            "end called without an open timer"
        );
    }
}
