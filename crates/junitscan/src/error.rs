//! Error types for junitscan

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Position in the report source
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Span representing a range in the report source
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub const fn at(pos: Pos) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub const fn empty() -> Self {
        Self::at(Pos::new(0, 0, 0))
    }
}

/// Categorization of XML parse failures
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    UnexpectedEof,
    InvalidName,
    InvalidUtf8,
    InvalidEntity { entity: String },
    UnterminatedMarkup,
    UnterminatedAttribute,
    MismatchedTag { open: String, close: String },
    DuplicateAttribute { name: String },
    Expected { expected: String },
    TrailingContent,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "unexpected end of input"),
            Self::InvalidName => write!(f, "invalid element or attribute name"),
            Self::InvalidUtf8 => write!(f, "input is not valid utf-8"),
            Self::InvalidEntity { entity } => write!(f, "invalid entity: &{entity};"),
            Self::UnterminatedMarkup => write!(f, "unterminated markup"),
            Self::UnterminatedAttribute => write!(f, "unterminated attribute value"),
            Self::MismatchedTag { open, close } => {
                write!(f, "mismatched closing tag: expected </{open}>, found </{close}>")
            }
            Self::DuplicateAttribute { name } => write!(f, "duplicate attribute: {name}"),
            Self::Expected { expected } => write!(f, "expected {expected}"),
            Self::TrailingContent => write!(f, "content after document root"),
        }
    }
}

/// Parse error with source position
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    kind: ErrorKind,
    span: Span,
}

impl ParseError {
    pub const fn new(kind: ErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub const fn at(kind: ErrorKind, pos: Pos) -> Self {
        Self::new(kind, Span::at(pos))
    }

    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub const fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error at {}: {}", self.span.start, self.kind)
    }
}

/// Result type alias for parsing
pub type Result<T> = std::result::Result<T, ParseError>;

/// Failure to acquire a report.
///
/// Exactly one class of failure exists at the load boundary; the variants tag
/// whether the file could not be read or could not be parsed. Neither is
/// recoverable: callers convert this to a non-zero exit.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read report {path}: {source}")]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed report {path}: {source}")]
    MalformedDocument {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}
