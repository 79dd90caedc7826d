use thiserror::Error;

/// All the ways things can go wrong in PostScout outside a single fetch
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A failed post search
///
/// The UI treats every variant the same ("fetch failed"); the split only
/// feeds the log and the status line. Kept `Clone + PartialEq` so it can
/// sit inside the list state snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Fetch failed: network error: {0}")]
    Network(String),

    #[error("Fetch failed: server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Fetch failed: rate limited by the search API")]
    RateLimited,

    #[error("Fetch failed: malformed response: {0}")]
    Decode(String),
}

impl From<postscout_api::DummyJsonError> for FetchError {
    fn from(err: postscout_api::DummyJsonError) -> Self {
        use postscout_api::DummyJsonError;

        match err {
            DummyJsonError::RequestFailed { status, message } => {
                FetchError::Status { status, message }
            }
            DummyJsonError::RateLimitExceeded => FetchError::RateLimited,
            DummyJsonError::NetworkError(e) if e.is_decode() => FetchError::Decode(e.to_string()),
            DummyJsonError::NetworkError(e) => FetchError::Network(e.to_string()),
            DummyJsonError::ParseError(e) => FetchError::Decode(e.to_string()),
        }
    }
}
