use std::collections::TryReserveError;
use std::error;
use std::fmt;
use std::result;

/// Errors that a treap operation can report instead of aborting.
#[derive(Debug)]
pub enum Error {
    /// The arena backing the treap could not grow to hold another node.
    AllocationFailed(TryReserveError),
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Error {
        Error::AllocationFailed(err)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::AllocationFailed(error) => Some(error),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::AllocationFailed(error) => write!(f, "node allocation failed: {}", error),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
