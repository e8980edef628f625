use crate::time;
use quick_xml::DeError;
use std::fmt;
use std::io;
use std::str::Utf8Error;

/// A fatal per-file failure. Any one of these aborts the whole batch.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The file-like source could not be opened or read.
    Read { file: String, source: io::Error },
    /// The buffered content is not decodable text.
    Encoding { file: String, source: Utf8Error },
    /// Neither accepted document shape matched the content.
    Shape {
        file: String,
        as_collection: DecodeError,
        as_single: DecodeError,
    },
    /// A suite in the file carried a malformed duration or timestamp.
    Suite {
        file: String,
        source: time::error::Error,
    },
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Read { ref source, .. } => Some(source),
            Error::Encoding { ref source, .. } => Some(source),
            Error::Shape {
                ref as_collection, ..
            } => Some(as_collection),
            Error::Suite { ref source, .. } => Some(source),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Read {
                ref file,
                ref source,
            } => write!(f, "unable to read junit file '{}': {}", file, source),
            Error::Encoding {
                ref file,
                ref source,
            } => write!(f, "junit file '{}' is not valid UTF-8: {}", file, source),
            Error::Shape {
                ref file,
                ref as_collection,
                ref as_single,
            } => write!(
                f,
                "unable to decode junit file '{}' as a suite collection ({}) or as a single suite ({})",
                file, as_collection, as_single
            ),
            Error::Suite {
                ref file,
                ref source,
            } => write!(
                f,
                "unable to parse test suite in junit file '{}': {}",
                file, source
            ),
        }
    }
}

/// Why one decode attempt against a specific document shape failed.
#[derive(Debug)]
#[non_exhaustive]
pub enum DecodeError {
    /// The reader failed before any root element was found.
    Scan(quick_xml::Error),
    /// The document ended without a root element.
    MissingRoot,
    /// The root element does not open the expected document shape.
    Root {
        expected: &'static str,
        found: String,
    },
    /// The root matched but the document did not deserialize.
    Deserialize(DeError),
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            DecodeError::Scan(ref source) => Some(source),
            DecodeError::Deserialize(ref source) => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DecodeError::Scan(ref err) => err.fmt(f),
            DecodeError::MissingRoot => write!(f, "no root element found"),
            DecodeError::Root {
                expected,
                ref found,
            } => write!(
                f,
                "expected root element '<{}>', found '<{}>'",
                expected, found
            ),
            DecodeError::Deserialize(ref err) => err.fmt(f),
        }
    }
}
