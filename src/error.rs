/// Enum intended to represent all the different error types that there could be
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0} not found")]
    NotFound(String),
    #[error("corrupt object: {0}")]
    CorruptObject(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("nothing to commit")]
    NothingToCommit,
    #[error("i/o operation error: {0}")]
    Io(#[from] std::io::Error),
    #[error("utf-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("error working with time")]
    SystemTime(#[from] std::time::SystemTimeError),
}

impl Error {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptObject(reason.into())
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    /// Whether this error means a file or object was simply absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

/// Abstraction of the result type where the error is always an Error from this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
