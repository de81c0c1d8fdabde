//! Tournament error types.

use thiserror::Error;

use crate::db::StoreError;

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    /// No document store is configured
    #[error("Database not configured")]
    StoreUnavailable,

    /// A supplied identifier is not a valid store identifier
    #[error("{0}")]
    InvalidIdentifier(&'static str),

    /// A referenced document does not exist
    #[error("{0}")]
    NotFound(&'static str),

    /// A request argument is outside the accepted range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Store backend error
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TournamentError {
    /// Get a client-safe error message
    ///
    /// Store errors are sanitized so driver details never reach the client.
    pub fn client_message(&self) -> String {
        match self {
            TournamentError::Store(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<mongodb::bson::ser::Error> for TournamentError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        TournamentError::Store(err.into())
    }
}

impl From<mongodb::bson::de::Error> for TournamentError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        TournamentError::Store(err.into())
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;
