//! Error types

use crate::binary::read::ReadEof;
use crate::tag::Tag;
use crate::validation::ValidationStatus;
use std::fmt;

/// Errors that originate when parsing binary data
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ParseError {
    /// The data ended before a read completed.
    BadEof,
    BadValue,
    /// A version or format number this crate does not understand.
    BadVersion,
    BadOffset,
    BadIndex,
    /// The file does not start with an sfnt version or collection tag this crate reads.
    UnsupportedFormat(Tag),
    /// A lower-level failure tied to the structure that was being read.
    ///
    /// `status` holds the validation flags recorded for that structure before the read was
    /// abandoned.
    Structure {
        structure: Structure,
        status: ValidationStatus,
        cause: Box<ParseError>,
    },
}

/// The structure being read when a `ParseError::Structure` was raised.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Structure {
    TableRecord,
    OffsetTable,
    TtcHeader,
    Table(Tag),
    /// A font resource, with its index if it is part of a collection.
    Font(Option<u32>),
    File,
}

impl ParseError {
    pub(crate) fn structure(
        structure: Structure,
        status: ValidationStatus,
        cause: ParseError,
    ) -> ParseError {
        ParseError::Structure {
            structure,
            status,
            cause: Box::new(cause),
        }
    }

    /// The innermost error, following the chain of `Structure` wrappers.
    pub fn root_cause(&self) -> &ParseError {
        match self {
            ParseError::Structure { cause, .. } => cause.root_cause(),
            err => err,
        }
    }

    /// The validation status recorded by the outermost structure, if any.
    pub fn status(&self) -> Option<ValidationStatus> {
        match self {
            ParseError::Structure { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error was ultimately caused by running out of data.
    pub fn is_truncated(&self) -> bool {
        *self.root_cause() == ParseError::BadEof
    }

    /// Whether this error was ultimately caused by an unknown version.
    pub fn is_unknown_version(&self) -> bool {
        *self.root_cause() == ParseError::BadVersion
    }
}

impl From<ReadEof> for ParseError {
    fn from(_error: ReadEof) -> Self {
        ParseError::BadEof
    }
}

impl From<std::num::TryFromIntError> for ParseError {
    fn from(_error: std::num::TryFromIntError) -> Self {
        ParseError::BadValue
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::BadEof => write!(f, "end of data reached unexpectedly"),
            ParseError::BadValue => write!(f, "invalid value"),
            ParseError::BadVersion => write!(f, "unexpected data version"),
            ParseError::BadOffset => write!(f, "invalid data offset"),
            ParseError::BadIndex => write!(f, "invalid data index"),
            ParseError::UnsupportedFormat(tag) => {
                write!(f, "unsupported font format '{}'", tag)
            }
            ParseError::Structure {
                structure, cause, ..
            } => write!(f, "{}: {}", structure, cause),
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Structure::TableRecord => write!(f, "table record"),
            Structure::OffsetTable => write!(f, "table directory"),
            Structure::TtcHeader => write!(f, "collection header"),
            Structure::Table(tag) => write!(f, "'{}' table", tag),
            Structure::Font(None) => write!(f, "font"),
            Structure::Font(Some(index)) => write!(f, "font {}", index),
            Structure::File => write!(f, "font file"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Structure { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}
