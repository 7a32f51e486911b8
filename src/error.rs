use thiserror::Error;

/// Error type for the calcore crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The expression is not well formed
    #[error("ParseError: {0}")]
    ParseError(String),
    /// A function argument or divisor is outside its mathematical domain
    #[error("DomainError: {0}")]
    DomainError(String),
    /// A computation overflowed or produced `NaN`
    #[error("NumericError: {0}")]
    NumericError(String),
}

/// Coarse classification of an [`Error`], used to pick the user-facing
/// sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input could not be parsed
    Parse,
    /// The input parsed, but computing its value failed
    Evaluation,
}

impl Error {
    /// Get the kind of this error.
    ///
    /// ```
    /// # use calcore::{Error, ErrorKind};
    /// assert_eq!(Error::ParseError("empty expression".into()).kind(), ErrorKind::Parse);
    /// assert_eq!(Error::DomainError("division by zero".into()).kind(), ErrorKind::Evaluation);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Self::ParseError(_) => ErrorKind::Parse,
            Self::DomainError(_) | Self::NumericError(_) => ErrorKind::Evaluation,
        }
    }

    /// The bare message, without the variant prefix used by `Display`.
    #[must_use]
    pub fn message(&self) -> &str {
        match *self {
            Self::ParseError(ref message)
            | Self::DomainError(ref message)
            | Self::NumericError(ref message) => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};

    #[test]
    fn display() {
        let err = Error::DomainError("sqrt is undefined for -4".into());
        assert_eq!(err.to_string(), "DomainError: sqrt is undefined for -4");
        assert_eq!(err.message(), "sqrt is undefined for -4");
        assert_eq!(
            Error::NumericError("result is not finite".into()).kind(),
            ErrorKind::Evaluation
        );
    }
}
