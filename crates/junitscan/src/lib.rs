//! junitscan - JUnit-style XML test report scanner
//!
//! Parses a test runner's XML report into an element tree and surfaces the
//! `failure` elements it contains.
//!
//! # Quick Start
//!
//! ```
//! use junitscan::Report;
//! # fn main() -> Result<(), junitscan::ParseError> {
//! let report = Report::from_str(
//!     "<testsuite><testcase name=\"adds\"><failure>boom</failure></testcase></testsuite>",
//! )?;
//! let texts: Vec<_> = report.failures().filter_map(|f| f.text()).collect();
//! assert_eq!(texts, vec!["boom"]);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{ErrorKind, LoadError, ParseError, Pos, Result, Span};

pub mod cursor;
pub use cursor::Cursor;

pub mod model;
pub use model::{Content, Descendants, Document, Element};

pub mod parser;
pub use parser::Parser;

pub mod report;
pub use report::{FailedTest, Report, DEFAULT_REPORT_PATH};

/// Parse a report document from a string
pub fn from_str(s: &str) -> Result<Document> {
    let mut parser = Parser::new(s.as_bytes());
    parser.parse()
}

/// Parse a report document from bytes
pub fn from_bytes(bytes: &[u8]) -> Result<Document> {
    let mut parser = Parser::new(bytes);
    parser.parse()
}
