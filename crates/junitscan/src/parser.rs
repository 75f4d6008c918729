//! Recursive-descent parser for JUnit-style XML reports.
//!
//! The whole input is in memory before parsing starts; there is no streaming
//! mode. Character data is kept verbatim (including whitespace-only runs), so
//! [`Element::text`](crate::Element::text) sees exactly the bytes between the
//! start tag and the first child, the way test runners wrote them. CDATA
//! sections are captured as text since runners commonly wrap stack traces in
//! them.

use indexmap::IndexMap;

use crate::cursor::Cursor;
use crate::error::{ErrorKind, ParseError, Result};
use crate::model::{Content, Document, Element};

const MAX_ENTITY_LEN: usize = 8;

/// Report parser
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
        }
    }

    /// Parse a complete document: prolog, one root element, trailing misc.
    pub fn parse(&mut self) -> Result<Document> {
        self.skip_misc()?;
        if self.cursor.is_eof() {
            return Err(self.error(ErrorKind::UnexpectedEof));
        }
        let root = self.parse_element()?;
        self.skip_misc()?;

        if !self.cursor.is_eof() {
            return Err(self.error(ErrorKind::TrailingContent));
        }

        Ok(Document { root })
    }

    /// Skip whitespace, comments, processing instructions and DOCTYPE.
    /// Valid both before the root element and after it.
    fn skip_misc(&mut self) -> Result<()> {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.starts_with(b"<!--") {
                self.skip_comment()?;
            } else if self.cursor.starts_with(b"<?") {
                self.skip_processing_instruction()?;
            } else if self.cursor.starts_with(b"<!") {
                self.skip_doctype()?;
            } else {
                return Ok(());
            }
        }
    }

    fn parse_element(&mut self) -> Result<Element> {
        self.expect(b'<')?;
        let name = self.parse_name()?;
        let attributes = self.parse_attributes()?;

        if self.cursor.consume(b'/') {
            self.expect(b'>')?;
            return Ok(Element {
                name,
                attributes,
                children: Vec::new(),
            });
        }

        self.expect(b'>')?;
        let children = self.parse_content(&name)?;

        Ok(Element {
            name,
            attributes,
            children,
        })
    }

    /// Parse element content up to and including the matching closing tag.
    fn parse_content(&mut self, open: &str) -> Result<Vec<Content>> {
        let mut children = Vec::new();

        loop {
            if self.cursor.is_eof() {
                return Err(self.error(ErrorKind::UnexpectedEof));
            }

            if self.cursor.starts_with(b"</") {
                self.cursor.advance_by(2);
                let close = self.parse_name()?;
                self.cursor.skip_whitespace();
                self.expect(b'>')?;
                if close != open {
                    return Err(self.error(ErrorKind::MismatchedTag {
                        open: open.to_string(),
                        close,
                    }));
                }
                return Ok(children);
            }

            if self.cursor.starts_with(b"<!--") {
                self.skip_comment()?;
            } else if self.cursor.starts_with(b"<![CDATA[") {
                let text = self.parse_cdata()?;
                push_text(&mut children, text);
            } else if self.cursor.starts_with(b"<?") {
                self.skip_processing_instruction()?;
            } else if self.cursor.current() == Some(b'<') {
                let child = self.parse_element()?;
                children.push(Content::Element(child));
            } else {
                let text = self.parse_char_data()?;
                push_text(&mut children, text);
            }
        }
    }

    /// Character data up to the next `<`, with entity decoding.
    fn parse_char_data(&mut self) -> Result<String> {
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == b'<' {
                break;
            }
            self.cursor.advance();
        }
        let raw = self.to_str(self.cursor.slice_from(start))?;
        self.decode_entities(raw)
    }

    /// CDATA body, captured verbatim (no entity decoding applies inside).
    fn parse_cdata(&mut self) -> Result<String> {
        self.cursor.advance_by(b"<![CDATA[".len());
        let start = self.cursor.pos();
        while !self.cursor.is_eof() {
            if self.cursor.starts_with(b"]]>") {
                let raw = self.to_str(self.cursor.slice_from(start))?;
                self.cursor.advance_by(3);
                return Ok(raw.to_string());
            }
            self.cursor.advance();
        }
        Err(self.error(ErrorKind::UnterminatedMarkup))
    }

    fn parse_attributes(&mut self) -> Result<IndexMap<String, String>> {
        let mut attrs = IndexMap::new();

        loop {
            self.cursor.skip_whitespace();
            match self.cursor.current() {
                Some(b'/') | Some(b'>') => return Ok(attrs),
                Some(_) => {}
                None => return Err(self.error(ErrorKind::UnexpectedEof)),
            }

            let name = self.parse_name()?;
            self.cursor.skip_whitespace();
            self.expect(b'=')?;
            self.cursor.skip_whitespace();
            let value = self.parse_attribute_value()?;

            if attrs.contains_key(&name) {
                return Err(self.error(ErrorKind::DuplicateAttribute { name }));
            }
            attrs.insert(name, value);
        }
    }

    fn parse_attribute_value(&mut self) -> Result<String> {
        let quote = match self.cursor.current() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => {
                return Err(self.error(ErrorKind::Expected {
                    expected: "quoted attribute value".to_string(),
                }))
            }
        };
        self.cursor.advance();

        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == quote {
                let raw = self.to_str(self.cursor.slice_from(start))?;
                let value = self.decode_entities(raw)?;
                self.cursor.advance();
                return Ok(value);
            }
            self.cursor.advance();
        }

        Err(self.error(ErrorKind::UnterminatedAttribute))
    }

    fn parse_name(&mut self) -> Result<String> {
        let start = self.cursor.pos();

        match self.cursor.current() {
            Some(b) if is_name_start(b) => self.cursor.advance(),
            _ => return Err(self.error(ErrorKind::InvalidName)),
        }
        while let Some(b) = self.cursor.current() {
            if !is_name_char(b) {
                break;
            }
            self.cursor.advance();
        }

        Ok(self.to_str(self.cursor.slice_from(start))?.to_string())
    }

    fn skip_comment(&mut self) -> Result<()> {
        self.cursor.advance_by(4);
        self.skip_until(b"-->")
    }

    fn skip_processing_instruction(&mut self) -> Result<()> {
        self.cursor.advance_by(2);
        self.skip_until(b"?>")
    }

    /// DOCTYPE, possibly with an internal subset in brackets.
    fn skip_doctype(&mut self) -> Result<()> {
        self.cursor.advance_by(2);
        let mut in_subset = false;
        while let Some(b) = self.cursor.current() {
            match b {
                b'[' => in_subset = true,
                b']' => in_subset = false,
                b'>' if !in_subset => {
                    self.cursor.advance();
                    return Ok(());
                }
                _ => {}
            }
            self.cursor.advance();
        }
        Err(self.error(ErrorKind::UnterminatedMarkup))
    }

    fn skip_until(&mut self, pattern: &[u8]) -> Result<()> {
        while !self.cursor.is_eof() {
            if self.cursor.starts_with(pattern) {
                self.cursor.advance_by(pattern.len());
                return Ok(());
            }
            self.cursor.advance();
        }
        Err(self.error(ErrorKind::UnterminatedMarkup))
    }

    fn expect(&mut self, expected: u8) -> Result<()> {
        if self.cursor.consume(expected) {
            Ok(())
        } else {
            Err(self.error(ErrorKind::Expected {
                expected: format!("'{}'", char::from(expected)),
            }))
        }
    }

    fn decode_entities(&self, input: &str) -> Result<String> {
        if !input.contains('&') {
            return Ok(input.to_string());
        }

        let mut result = String::with_capacity(input.len());
        let mut chars = input.chars();
        while let Some(ch) = chars.next() {
            if ch != '&' {
                result.push(ch);
                continue;
            }

            let mut entity = String::new();
            let mut terminated = false;
            for next in chars.by_ref() {
                if next == ';' {
                    terminated = true;
                    break;
                }
                if entity.len() >= MAX_ENTITY_LEN {
                    break;
                }
                entity.push(next);
            }
            if !terminated {
                return Err(self.error(ErrorKind::InvalidEntity { entity }));
            }

            let decoded = match entity.as_str() {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => decode_numeric_entity(&entity),
            };
            match decoded {
                Some(ch) => result.push(ch),
                None => return Err(self.error(ErrorKind::InvalidEntity { entity })),
            }
        }

        Ok(result)
    }

    fn to_str(&self, bytes: &'a [u8]) -> Result<&'a str> {
        std::str::from_utf8(bytes).map_err(|_| self.error(ErrorKind::InvalidUtf8))
    }

    fn error(&self, kind: ErrorKind) -> ParseError {
        ParseError::at(kind, self.cursor.position())
    }
}

/// Append text, merging with a trailing text node so an element's leading
/// character data is always a single node.
fn push_text(children: &mut Vec<Content>, text: String) {
    if text.is_empty() {
        return;
    }
    if let Some(Content::Text(existing)) = children.last_mut() {
        existing.push_str(&text);
    } else {
        children.push(Content::Text(text));
    }
}

fn is_name_start(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':')
}

fn is_name_char(b: u8) -> bool {
    is_name_start(b) || matches!(b, b'0'..=b'9' | b'-' | b'.')
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}
