use ledger::ParticipantKey;
use thiserror::Error;

#[macro_export]
macro_rules! bail {
    ($e:expr) => {
        return Err($e);
    };
}

#[macro_export(local_inner_macros)]
macro_rules! ensure {
    ($cond:expr, $e:expr) => {
        if !($cond) {
            bail!($e);
        }
    };
}

pub type ElectionResult<T> = Result<T, ElectionError>;

#[derive(Error, Debug)]
pub enum ElectionError {
    #[error("Cannot compare keys of different lengths: {left} and {right}")]
    KeyLengthMismatch {
        left: ParticipantKey,
        right: ParticipantKey,
    },

    #[error("The current round is unknown")]
    UnknownRound,
}
