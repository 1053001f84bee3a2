//! Helpers for inspecting generated PDF bytes.

#![allow(dead_code)]

use std::io::{self, Write};

/// Position of the first occurrence of `needle` in `haystack`.
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Position of the last occurrence of `needle` in `haystack`.
pub fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .rposition(|window| window == needle)
}

pub fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack
        .windows(needle.len())
        .filter(|window| *window == needle)
        .count()
}

/// The tail of the file after the binary marker and the last stream, which
/// is always plain ASCII: page tree, catalog, info, xref and trailer.
pub fn tail(pdf: &[u8]) -> String {
    let marker = find(pdf, b"%\xC5\xDD\xC4\xB6\n").map_or(0, |p| p + 6);
    let start = rfind(pdf, b"endstream\n").map_or(marker, |p| p + b"endstream\n".len());
    String::from_utf8(pdf[start..].to_vec()).expect("ASCII tail")
}

/// Cross-reference table of a generated file.
#[derive(Debug)]
pub struct Xref {
    pub position: usize,
    pub size: usize,
    /// In-use entries, object 1 first.
    pub offsets: Vec<usize>,
}

pub fn parse_xref(pdf: &[u8]) -> Xref {
    let tail = tail(pdf);
    let mut lines = tail[tail.rfind("startxref\n").unwrap()..].lines();
    lines.next();
    let position: usize = lines.next().unwrap().parse().unwrap();

    let table = std::str::from_utf8(&pdf[position..]).expect("ASCII xref");
    let mut lines = table.lines();
    assert_eq!(lines.next(), Some("xref"));
    let header = lines.next().unwrap();
    let size: usize = header.strip_prefix("0 ").unwrap().parse().unwrap();
    assert_eq!(lines.next(), Some("0000000000 65535 f "));

    let offsets = lines
        .by_ref()
        .take(size - 1)
        .map(|line| {
            assert_eq!(line.len(), 19, "xref entry {line:?}");
            assert!(line.ends_with(" 00000 n "), "xref entry {line:?}");
            line[..10].parse().unwrap()
        })
        .collect();
    assert_eq!(lines.next(), Some("trailer"));

    Xref {
        position,
        size,
        offsets,
    }
}

/// First half of the trailer's `/ID` pair, asserting both halves match.
pub fn trailer_id(pdf: &[u8]) -> String {
    let tail = tail(pdf);
    let start = tail.find("/ID[<").unwrap() + 5;
    let ids = &tail[start..];
    let end = ids.find('>').unwrap();
    let first = &ids[..end];
    assert_eq!(&ids[end..end + 2], "><");
    assert_eq!(&ids[end + 2..end + 2 + first.len()], first);
    first.to_string()
}

/// A sink that accepts `remaining` bytes and then fails.
pub struct FailingSink {
    pub remaining: usize,
    pub written: Vec<u8>,
}

impl FailingSink {
    pub fn new(remaining: usize) -> Self {
        Self {
            remaining,
            written: Vec::new(),
        }
    }
}

impl Write for FailingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        let n = buf.len().min(self.remaining);
        self.remaining -= n;
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
