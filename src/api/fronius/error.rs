use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a single Solar API call.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS, timeout, or HTTP status failure.
    #[error("transport failure: {0}")]
    Transport(BoxError),

    /// The body is not JSON, or not of the expected shape.
    #[error("malformed response: {0}")]
    Decode(serde_json::Error),

    /// The device answered, but its status envelope reports a failure.
    #[error(r#"device status {code} ("{reason}")"#)]
    DeviceStatus { code: i64, reason: String },

    #[error("unsupported API version `{reported}`, expected `{expected}`")]
    VersionMismatch { reported: String, expected: &'static str },
}

impl FetchError {
    pub fn transport(error: impl Into<BoxError>) -> Self {
        Self::Transport(error.into())
    }
}
