//! PDF date strings (`D:YYYYMMDDHHmmSSOHH'mm'`).

use crate::error::{PdfError, Result};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Offset, TimeZone};

/// Fill-in for truncated dates: January 1st, midnight, UTC.
const DATE_TEMPLATE: &str = "00000101000000+00'00'";

/// Format a date-time as a PDF date string, e.g. `D:20180808120000+09'00'`.
///
/// The format holds four-digit years (0 to 9999) and offsets in whole
/// minutes. Outside that range the output does not parse back; use
/// [`check_representable`] first when the date comes from outside.
pub fn format_pdf_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    let offset = date.offset().fix().local_minus_utc();
    let sign = if offset < 0 { '-' } else { '+' };
    let minutes = offset.abs() / 60;
    format!(
        "D:{}{}{:02}'{:02}'",
        date.naive_local().format("%Y%m%d%H%M%S"),
        sign,
        minutes / 60,
        minutes % 60
    )
}

/// Fails with [`PdfError::InvalidDate`] unless `date` survives a round trip
/// through [`format_pdf_date`] and [`parse_pdf_date`].
pub fn check_representable<Tz: TimeZone>(date: &DateTime<Tz>) -> Result<()> {
    let offset = date.offset().fix().local_minus_utc();
    let year = date.naive_local().year();
    if !(0..=9999).contains(&year) || offset % 60 != 0 {
        return Err(PdfError::InvalidDate(format!(
            "{} (offset {offset}s)",
            date.naive_local()
        )));
    }
    Ok(())
}

/// Format a date-time that carries no offset: `D:20180808120000`.
pub fn format_pdf_date_naive(date: &NaiveDateTime) -> String {
    format!("D:{}", date.format("%Y%m%d%H%M%S"))
}

/// Parse a PDF date string.
///
/// The `D:` prefix is optional. Precision may be truncated anywhere from the
/// year down to the full offset; missing parts default to January 1st,
/// midnight, UTC. A bare `Z` after the seconds means UTC.
pub fn parse_pdf_date(s: &str) -> Result<DateTime<FixedOffset>> {
    let invalid = || PdfError::InvalidDate(s.to_string());
    let body = s.strip_prefix("D:").unwrap_or(s);
    if !body.is_ascii() {
        return Err(invalid());
    }

    let padded = match body.len() {
        15 if body.ends_with('Z') => format!("{}+00'00'", &body[..14]),
        4 | 6 | 8 | 10 | 12 | 14 | 18 | 21 => {
            format!("{}{}", body, &DATE_TEMPLATE[body.len()..])
        }
        _ => return Err(invalid()),
    };

    let bytes = padded.as_bytes();
    if bytes[17] != b'\'' || bytes[20] != b'\'' {
        return Err(invalid());
    }

    let digits = &padded[..14];
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let naive = NaiveDateTime::parse_from_str(digits, "%Y%m%d%H%M%S").map_err(|_| invalid())?;

    let sign = match bytes[14] {
        b'+' => 1,
        b'-' => -1,
        _ => return Err(invalid()),
    };
    let hours: i32 = padded[15..17].parse().map_err(|_| invalid())?;
    let minutes: i32 = padded[18..20].parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    let offset =
        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)?;

    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(invalid)
}
