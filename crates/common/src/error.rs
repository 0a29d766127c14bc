/// DineRoute error types
#[derive(Debug, thiserror::Error)]
pub enum DineRouteError {
    /// Dataset file missing or unreadable
    #[error("Data source error: {0}")]
    DataSource(String),

    /// Dataset file is not a JSON array of objects
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// Embedding backend unreachable or rejected the input
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Query-time backend failure
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// Persisted store could not be created, opened or appended to
    #[error("Vector store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DineRouteError {
    /// Create data source error
    pub fn data_source<S: Into<String>>(msg: S) -> Self {
        Self::DataSource(msg.into())
    }

    /// Create data format error
    pub fn data_format<S: Into<String>>(msg: S) -> Self {
        Self::DataFormat(msg.into())
    }

    /// Create embedding error
    pub fn embedding<S: Into<String>>(msg: S) -> Self {
        Self::Embedding(msg.into())
    }

    /// Create retrieval error
    pub fn retrieval<S: Into<String>>(msg: S) -> Self {
        Self::Retrieval(msg.into())
    }

    /// Create store error
    pub fn store<S: Into<String>>(msg: S) -> Self {
        Self::Store(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl DineRouteError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::DataSource(_) => 500,
            Self::DataFormat(_) => 500,
            Self::Embedding(_) => 503,
            Self::Retrieval(_) => 503,
            Self::Store(_) => 500,
            Self::Config(_) => 500,
            Self::Io(_) => 500,
            Self::Json(_) => 400,
            Self::Other(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_failure_kind() {
        let err = DineRouteError::data_format("top-level value is not an array");
        assert_eq!(
            err.to_string(),
            "Data format error: top-level value is not an array"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(DineRouteError::invalid_input("empty").status_code(), 400);
        assert_eq!(DineRouteError::embedding("down").status_code(), 503);
        assert_eq!(DineRouteError::data_source("missing").status_code(), 500);
    }
}
