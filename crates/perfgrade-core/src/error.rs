use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum PerfgradeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] globset::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Serialize for PerfgradeError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display() {
        let err = PerfgradeError::Validation("threshold must be finite".to_string());
        assert_eq!(err.to_string(), "Validation error: threshold must be finite");
    }

    #[test]
    fn internal_error_display() {
        let err = PerfgradeError::Internal("unexpected state".to_string());
        assert_eq!(err.to_string(), "Internal error: unexpected state");
    }

    #[test]
    fn io_error_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: PerfgradeError = io_err.into();
        let msg = err.to_string();
        assert!(msg.contains("IO error"));
        assert!(msg.contains("read-only"));
    }

    #[test]
    fn serde_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ truncated").unwrap_err();
        let err: PerfgradeError = json_err.into();
        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn pattern_error_from_globset() {
        let glob_err = globset::Glob::new("rds_[cpu.json").unwrap_err();
        let err: PerfgradeError = glob_err.into();
        assert!(err.to_string().starts_with("Pattern error"));
    }

    #[test]
    fn serialize_produces_string() {
        let err = PerfgradeError::Validation("bad threshold".to_string());
        let json = serde_json::to_string(&err).expect("serialize should succeed");
        assert_eq!(json, "\"Validation error: bad threshold\"");
    }

    #[test]
    fn error_is_debug() {
        let err = PerfgradeError::Internal("test".to_string());
        let debug = format!("{:?}", err);
        assert!(debug.contains("Internal"));
    }
}
