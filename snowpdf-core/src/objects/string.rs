use std::fmt::Write;

/// Encodes `text` as a PDF string object.
///
/// Pure ASCII text becomes a literal string in parentheses, with the usual
/// backslash escapes and octal escapes for remaining control characters.
/// If any character lies outside ASCII the whole string is emitted as a
/// UTF-16BE hex string with a byte-order mark instead (`<FEFF...>`).
pub fn encode_text_string(text: &str) -> String {
    if !text.is_ascii() {
        return encode_utf16_hex(text);
    }

    let mut out = String::with_capacity(text.len() + 2);
    out.push('(');
    for ch in text.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            c if (c as u32) < 32 || c as u32 == 127 => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push(')');
    out
}

fn encode_utf16_hex(text: &str) -> String {
    let mut out = String::from("<FEFF");
    for unit in text.encode_utf16() {
        let _ = write!(out, "{unit:04X}");
    }
    out.push('>');
    out
}
