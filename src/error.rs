use crate::context::Flags;

pub type Result<T> = core::result::Result<T, Error>;

/// The host exception family an [`Error`] belongs to. Trapped errors are
/// refinements of one of these, e.g. `DivisionByZero` is still a
/// zero-division error for a caller that only checks the family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorFamily {
    Type,
    Value,
    ZeroDivision,
    Overflow,
    Arithmetic,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Type(String),
    #[error("{0}")]
    Value(String),
    #[error("{0}")]
    ZeroDivision(String),
    #[error("{0}")]
    Overflow(String),

    // Raised only when the matching trap is enabled in the active context.
    #[error("'{0}' underflow")]
    UnderflowResult(&'static str),
    #[error("'{0}' overflow")]
    OverflowResult(&'static str),
    #[error("'{0}' inexact result")]
    InexactResult(&'static str),
    #[error("'{0}' invalid operation")]
    InvalidOperation(&'static str),
    #[error("'{0}' range error")]
    Range(&'static str),
    #[error("'{0}' division by zero")]
    DivisionByZero(&'static str),
}

impl Error {
    pub(crate) fn type_err(msg: impl Into<String>) -> Self {
        Error::Type(msg.into())
    }

    pub(crate) fn value(msg: impl Into<String>) -> Self {
        Error::Value(msg.into())
    }

    pub(crate) fn zero_division(msg: impl Into<String>) -> Self {
        Error::ZeroDivision(msg.into())
    }

    pub(crate) fn overflow(msg: impl Into<String>) -> Self {
        Error::Overflow(msg.into())
    }

    /// Maps a single trap bit to the error it raises.
    pub(crate) fn trapped(flag: Flags, op: &'static str) -> Self {
        if flag == Flags::UNDERFLOW {
            Error::UnderflowResult(op)
        } else if flag == Flags::OVERFLOW {
            Error::OverflowResult(op)
        } else if flag == Flags::INEXACT {
            Error::InexactResult(op)
        } else if flag == Flags::INVALID {
            Error::InvalidOperation(op)
        } else if flag == Flags::ERANGE {
            Error::Range(op)
        } else {
            Error::DivisionByZero(op)
        }
    }

    pub fn family(&self) -> ErrorFamily {
        match self {
            Error::Type(_) => ErrorFamily::Type,
            Error::Value(_) | Error::InvalidOperation(_) | Error::Range(_) => ErrorFamily::Value,
            Error::ZeroDivision(_) | Error::DivisionByZero(_) => ErrorFamily::ZeroDivision,
            Error::Overflow(_) => ErrorFamily::Overflow,
            Error::UnderflowResult(_) | Error::OverflowResult(_) | Error::InexactResult(_) => {
                ErrorFamily::Arithmetic
            }
        }
    }

    /// True for errors that exist only because a context trap was enabled.
    pub fn is_trap(&self) -> bool {
        self.flag().is_some()
    }

    /// The sticky flag whose trap produced this error, if any.
    pub fn flag(&self) -> Option<Flags> {
        match self {
            Error::UnderflowResult(_) => Some(Flags::UNDERFLOW),
            Error::OverflowResult(_) => Some(Flags::OVERFLOW),
            Error::InexactResult(_) => Some(Flags::INEXACT),
            Error::InvalidOperation(_) => Some(Flags::INVALID),
            Error::Range(_) => Some(Flags::ERANGE),
            Error::DivisionByZero(_) => Some(Flags::DIVZERO),
            _ => None,
        }
    }
}
