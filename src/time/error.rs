use std::fmt;

/// An error that occurred while interpreting a duration or timestamp field.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The value does not follow the expected textual format.
    Syntax(String),
    /// The value is well-formed but cannot be represented.
    OutOfRange(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Syntax(ref err) => err.fmt(f),
            Error::OutOfRange(ref err) => err.fmt(f),
        }
    }
}
