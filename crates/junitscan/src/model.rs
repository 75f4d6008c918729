//! Element tree produced by parsing a report

use std::fmt;

use indexmap::IndexMap;

/// Parsed report document
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub root: Element,
}

impl Document {
    pub const fn root(&self) -> &Element {
        &self.root
    }
}

/// A single element: tag name, attributes, ordered children
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Content>,
}

/// Content node inside an element
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    Element(Element),
    Text(String),
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Character data before the first child element.
    ///
    /// `None` when the element is empty or starts with a child element.
    /// Adjacent text and CDATA runs are merged during parsing, so this is at
    /// most one node.
    pub fn text(&self) -> Option<&str> {
        match self.children.first() {
            Some(Content::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Child elements, in order (text nodes skipped)
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Content::Element(el) => Some(el),
            Content::Text(_) => None,
        })
    }

    /// First direct child element with the given tag name
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.child_elements().find(|el| el.name == tag)
    }

    /// All elements of the subtree in document order, starting with `self`
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Descendants (including `self`) whose tag name equals `tag` exactly.
    ///
    /// Matching is case-sensitive; attribute-based markers are not considered.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.descendants().filter(move |el| el.name == tag)
    }
}

/// The stable human-readable representation: `<Element 'tag'>`.
///
/// Deliberately carries no address or other per-run identity so that two runs
/// over the same input print byte-identical output.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Element '{}'>", self.name)
    }
}

/// Depth-first pre-order walk over a subtree
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let el = self.stack.pop()?;
        // Reverse push keeps children in document order when popped.
        for child in el.children.iter().rev() {
            if let Content::Element(child) = child {
                self.stack.push(child);
            }
        }
        Some(el)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        let mut root = Element::new("testsuite");
        let mut case_a = Element::new("testcase");
        case_a.attributes.insert("name".into(), "a".into());
        let mut failure = Element::new("failure");
        failure.children.push(Content::Text("boom".into()));
        case_a.children.push(Content::Element(failure));
        root.children.push(Content::Element(case_a));
        let mut case_b = Element::new("testcase");
        case_b.attributes.insert("name".into(), "b".into());
        root.children.push(Content::Element(case_b));
        root
    }

    #[test]
    fn test_display_is_stable() {
        let root = sample();
        assert_eq!(root.to_string(), "<Element 'testsuite'>");
        assert_eq!(root.to_string(), root.to_string());
    }

    #[test]
    fn test_descendants_document_order() {
        let root = sample();
        let names: Vec<&str> = root.descendants().map(|el| el.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["testsuite", "testcase", "failure", "testcase"]
        );
    }

    #[test]
    fn test_find_all_exact_match_only() {
        let mut root = sample();
        // Close in spelling but not equal: must not match.
        root.children
            .push(Content::Element(Element::new("Failure")));
        root.children
            .push(Content::Element(Element::new("failures")));
        let found: Vec<&Element> = root.find_all("failure").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text(), Some("boom"));
    }

    #[test]
    fn test_text_none_when_child_first() {
        let root = sample();
        assert_eq!(root.text(), None);
    }

    #[test]
    fn test_attr_and_child() {
        let root = sample();
        let case = root.child("testcase").unwrap();
        assert_eq!(case.attr("name"), Some("a"));
        assert_eq!(case.attr("missing"), None);
        assert!(case.child("failure").is_some());
    }
}
