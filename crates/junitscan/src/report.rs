//! Report scanning: load a JUnit-style report and surface its failures.
//!
//! The observable output contract is fixed: one root-representation line
//! before the scan, then for every `failure` element in document order the
//! root representation again followed by the failure's text (an empty line
//! when the element carries no text). The per-match repetition of the root
//! line is part of the contract and must not be collapsed to a single print.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::error::{LoadError, Result};
use crate::model::{Document, Element};
use crate::parser::Parser;

/// Report filename expected in the working directory when no path is given.
pub const DEFAULT_REPORT_PATH: &str = "mocha-junit-report.xml";

/// A parsed test report
#[derive(Clone, Debug)]
pub struct Report {
    doc: Document,
}

/// A `testcase` that directly contains a `failure` child
#[derive(Clone, Copy, Debug)]
pub struct FailedTest<'a> {
    pub name: Option<&'a str>,
    pub failure: &'a Element,
}

impl Report {
    /// Read and parse a report file.
    ///
    /// There is no retry and no recovery: an unreadable file or malformed
    /// document comes back as a tagged [`LoadError`] for the caller to turn
    /// into a non-zero exit.
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, LoadError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| LoadError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes).map_err(|source| LoadError::MalformedDocument {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a report from an in-memory string.
    pub fn from_str(input: &str) -> Result<Self> {
        Self::from_bytes(input.as_bytes())
    }

    /// Parse a report from raw bytes.
    pub fn from_bytes(input: &[u8]) -> Result<Self> {
        let doc = Parser::new(input).parse()?;
        Ok(Self { doc })
    }

    /// Root element of the parsed document.
    pub const fn root(&self) -> &Element {
        self.doc.root()
    }

    /// Every element tagged exactly `failure`, in document order.
    pub fn failures(&self) -> impl Iterator<Item = &Element> {
        self.root().find_all("failure")
    }

    /// Testcases that directly contain a `failure` child, in document order.
    pub fn failed_tests(&self) -> impl Iterator<Item = FailedTest<'_>> {
        self.root()
            .find_all("testcase")
            .filter_map(|case| {
                case.child("failure").map(|failure| FailedTest {
                    name: case.attr("name"),
                    failure,
                })
            })
    }

    /// Write the failure scan to `out` in the fixed contract order.
    pub fn render_failures<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let root = self.root();
        writeln!(out, "{root}")?;
        for failure in self.failures() {
            writeln!(out, "{root}")?;
            writeln!(out, "{}", failure.text().unwrap_or_default())?;
        }
        Ok(())
    }

    /// Write one `name` line and one failure-text line per failed testcase.
    pub fn render_failed_tests<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for test in self.failed_tests() {
            writeln!(out, "{}", test.name.unwrap_or_default())?;
            writeln!(out, "{}", test.failure.text().unwrap_or_default())?;
        }
        Ok(())
    }
}
