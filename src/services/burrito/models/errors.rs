/// Errors returned by [`BurritoClient`](crate::BurritoClient) and its configuration.
#[derive(Debug)]
pub enum BurritoError {
    /// Base URL or API key could not be resolved, or is not usable.
    Config(String),
    /// The request could not be issued or its body could not be read.
    Transport(String),
    /// The service answered with a non-success status.
    Api { status: u16, body: String },
    /// Request encoding or response decoding failed.
    Serialization(String),
}

impl BurritoError {
    /// HTTP status of an [`BurritoError::Api`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            BurritoError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for BurritoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BurritoError::Config(s) => write!(f, "Config Error: {s}"),
            BurritoError::Transport(s) => write!(f, "Transport Error: {s}"),
            BurritoError::Api { status, body } => write!(f, "API Error: {status} - {body}"),
            BurritoError::Serialization(s) => write!(f, "Serialization Error: {s}"),
        }
    }
}

impl std::error::Error for BurritoError {}

impl From<reqwest::Error> for BurritoError {
    fn from(err: reqwest::Error) -> Self {
        BurritoError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for BurritoError {
    fn from(err: serde_json::Error) -> Self {
        BurritoError::Serialization(err.to_string())
    }
}

pub type Result<T, E = BurritoError> = std::result::Result<T, E>;
