//! Error types for the `TravelMaker` service

use thiserror::Error;

/// Errors raised by the configuration layer, the parser tables and the
/// upstream clients
#[derive(Error, Debug)]
pub enum TravelError {
    /// Invalid or missing configuration, including a rejected API key
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream unreachable or answering with an error status
    #[error("API error: {message}")]
    Api { message: String },

    /// Upstream answered, but the payload was unusable
    #[error("Parse error: {message}")]
    Parse { message: String },
}

impl TravelError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}
