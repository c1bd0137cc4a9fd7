use thiserror::Error;

/// Failure categories for a contract call, so callers can tell a dead
/// endpoint from a transaction the chain refused.
#[derive(Debug, Error)]
pub enum Error {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("rpc error (code {code}): {message}")]
    Rpc { code: i64, message: String },

    #[error("malformed rpc response: {0}")]
    Protocol(String),

    #[error("invalid address '{0}'")]
    InvalidAddress(String),

    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("transaction {id} not confirmed after {attempts} attempts")]
    ConfirmationTimeout { id: String, attempts: u32 },

    #[error("transaction {id} was rejected on chain")]
    Rejected { id: String },
}

pub type Result<T> = std::result::Result<T, Error>;
