//! Property-based tests for dates, strings and the file structure.

mod common;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use common::{parse_xref, tail};
use proptest::prelude::*;
use snowpdf::{encode_text_string, format_pdf_date, parse_pdf_date, Color, Document, PdfConfig};

/// Whole-second instants between 1900 and 2100.
fn timestamp_strategy() -> impl Strategy<Value = i64> {
    let start = Utc.with_ymd_and_hms(1900, 1, 1, 0, 0, 0).unwrap().timestamp();
    let end = Utc.with_ymd_and_hms(2100, 12, 31, 23, 59, 59).unwrap().timestamp();
    start..=end
}

/// UTC offsets with minute precision, up to ±23:59.
fn offset_strategy() -> impl Strategy<Value = FixedOffset> {
    (-1439i32..=1439).prop_map(|minutes| FixedOffset::east_opt(minutes * 60).unwrap())
}

fn literal_safe_ascii() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        (0x20u8..=0x7E)
            .prop_filter("no delimiters", |b| !matches!(b, b'(' | b')' | b'\\'))
            .prop_map(char::from),
        0..80,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn kids_lines(pdf: &[u8]) -> Vec<String> {
    let tail = tail(pdf);
    let start = tail.find("/Kids\n[").unwrap() + "/Kids\n".len();
    let end = start + tail[start..].find(']').unwrap() + 1;
    tail[start..end].lines().map(str::to_string).collect()
}

fn document_with_pages(pages: usize) -> Vec<u8> {
    let mut doc = Document::with_config(PdfConfig::default().with_compress(false));
    doc.set_title("Property").unwrap();
    for _ in 0..pages {
        doc.add_page(Color::red()).unwrap();
    }
    doc.to_bytes().unwrap()
}

fn assert_kids_layout(pdf: &[u8], pages: usize) {
    let lines = kids_lines(pdf);
    for line in &lines[..lines.len() - 1] {
        // a line only breaks once it is past 70 characters, and it broke
        // right after the reference that took it there
        let (before, _) = line.rsplit_once(' ').unwrap();
        let before = before.rsplit_once(' ').unwrap().0.rsplit_once(' ').unwrap().0;
        assert!(line.len() > 70, "short line {line:?}");
        assert!(before.len() <= 70, "late break {line:?}");
    }

    let joined = lines.join(" ");
    let refs: Vec<u32> = joined
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(" 0 R")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().unwrap())
        .collect();
    // resources take object 2, then each page follows its contents
    let expected: Vec<u32> = (0..pages as u32).map(|i| 2 * i + 4).collect();
    assert_eq!(refs, expected);
}

proptest! {
    #[test]
    fn prop_date_round_trip(timestamp in timestamp_strategy(), offset in offset_strategy()) {
        let date: DateTime<FixedOffset> = Utc
            .timestamp_opt(timestamp, 0)
            .unwrap()
            .with_timezone(&offset);
        let formatted = format_pdf_date(&date);
        prop_assert_eq!(formatted.len(), 23);

        let parsed = parse_pdf_date(&formatted).unwrap();
        prop_assert_eq!(parsed, date);
        prop_assert_eq!(parsed.offset(), date.offset());
    }

    #[test]
    fn prop_plain_ascii_is_literal(text in literal_safe_ascii()) {
        prop_assert_eq!(encode_text_string(&text), format!("({text})"));
    }

    #[test]
    fn prop_non_ascii_is_utf16_hex(prefix in "[a-z]{0,10}", text in "\\PC{0,30}", ch in "[^\\x00-\\x7F]") {
        let text = format!("{prefix}{ch}{text}");
        let encoded = encode_text_string(&text);
        prop_assert!(encoded.starts_with("<FEFF"));
        prop_assert!(encoded.ends_with('>'));
        let inner = &encoded[1..encoded.len() - 1];
        prop_assert_eq!(inner.len(), 4 + 4 * text.encode_utf16().count());
        prop_assert!(inner.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn prop_xref_matches_objects(pages in 1usize..40) {
        let pdf = document_with_pages(pages);
        let xref = parse_xref(&pdf);

        // page tree, resources, two objects per page, catalog, info
        prop_assert_eq!(xref.offsets.len(), 2 * pages + 4);
        prop_assert_eq!(xref.size, 2 * pages + 5);
        for (index, offset) in xref.offsets.iter().enumerate() {
            let header = format!("{} 0 obj\n", index + 1);
            prop_assert!(pdf[*offset..].starts_with(header.as_bytes()));
        }
        let count = format!("/Count {}/", pages);
        prop_assert!(tail(&pdf).contains(&count));
    }

    #[test]
    fn prop_kids_array_layout(pages in 1usize..120) {
        let pdf = document_with_pages(pages);
        assert_kids_layout(&pdf, pages);
    }
}

#[test]
fn test_kids_array_layout_for_many_pages() {
    let pdf = document_with_pages(200);
    let lines = kids_lines(&pdf);
    assert!(lines.len() > 10);
    assert!(lines[0].starts_with("[4 0 R 6 0 R"));
    assert!(lines.last().unwrap().ends_with("402 0 R]"));
    assert_kids_layout(&pdf, 200);
}
