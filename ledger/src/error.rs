use crate::types::{ContentAddress, Round};
use crypto::CryptoError;
use store::StoreError;
use thiserror::Error;

pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] Box<bincode::ErrorKind>),

    #[error("Malformed submission: {0}")]
    MalformedSubmission(#[from] serde_json::Error),

    #[error(transparent)]
    CryptoError(#[from] CryptoError),

    #[error("Submission info of round {0} is unavailable")]
    RoundUnavailable(Round),

    #[error("Blob {0} is unavailable")]
    BlobUnavailable(ContentAddress),

    #[error("Blob {0} does not match its address")]
    BlobCorrupted(ContentAddress),
}
