use thiserror::Error;

#[derive(Debug, Error)]
pub enum GiftGenixError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("session error: {0}")]
    Session(String),
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl From<serde_json::Error> for GiftGenixError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub use crate::Result;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_category() {
        let err = GiftGenixError::Config("x".to_string());
        assert!(format!("{err}").contains("configuration error"));

        let err = GiftGenixError::Session("not logged in".to_string());
        assert_eq!(err.to_string(), "session error: not logged in");
    }

    #[test]
    fn json_errors_map_to_serialization() {
        let err: GiftGenixError = serde_json::from_str::<serde_json::Value>("{bad}")
            .unwrap_err()
            .into();
        assert!(matches!(err, GiftGenixError::Serialization(_)));
    }
}
