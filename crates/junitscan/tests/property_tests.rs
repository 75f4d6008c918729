//! Property-based tests for the report parser and scanner.
//!
//! Two properties matter for a fail-fast scanner:
//! 1. Arbitrary input never panics: it parses or it returns an error.
//! 2. Failure texts survive the scan unchanged and in document order.

use proptest::prelude::*;

use junitscan::{Element, Report};

/// Build a report with one testcase per text, each carrying a failure.
fn report_with_failures(texts: &[String]) -> String {
    let mut xml = String::from("<testsuite name=\"generated\">");
    for (i, text) in texts.iter().enumerate() {
        xml.push_str(&format!(
            "<testcase name=\"case-{i}\"><failure>{text}</failure></testcase>"
        ));
    }
    xml.push_str("</testsuite>");
    xml
}

proptest! {
    #[test]
    fn parser_never_panics(input in proptest::collection::vec(any::<u8>(), 0..512)) {
        let _ = junitscan::from_bytes(&input);
    }

    #[test]
    fn parser_never_panics_on_angle_bracket_soup(input in "[<>/a-z \"=!?-]{0,64}") {
        let _ = junitscan::from_str(&input);
    }

    #[test]
    fn failure_texts_survive_in_order(
        texts in proptest::collection::vec("[a-zA-Z0-9 .:]{1,40}", 0..8)
    ) {
        let xml = report_with_failures(&texts);
        let report = Report::from_str(&xml).expect("generated report is well-formed");

        let scanned: Vec<&str> = report
            .failures()
            .filter_map(Element::text)
            .collect();
        prop_assert_eq!(scanned, texts.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn rendered_line_count_matches_failure_count(
        texts in proptest::collection::vec("[a-zA-Z0-9 ]{1,20}", 0..8)
    ) {
        let xml = report_with_failures(&texts);
        let report = Report::from_str(&xml).expect("generated report is well-formed");

        let mut out = Vec::new();
        report.render_failures(&mut out).expect("writing to a Vec cannot fail");
        let line_count = out.iter().filter(|&&b| b == b'\n').count();
        // One root line, then a (root, text) pair per failure.
        prop_assert_eq!(line_count, 1 + 2 * texts.len());
    }
}
