pub mod errors;
pub mod html;

use chrono::NaiveDate;

// Forum renders dates like "Jul 21, 2024"; older pages use "07/21/2024".
const FORUM_DATE_FORMATS: &[&str] = &["%b %d, %Y", "%m/%d/%Y"];
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Collapses every run of whitespace into a single space and trims the ends.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Converts a US-style forum date to `YYYY-MM-DD`, or `None` if it doesn't parse.
pub fn to_iso_date(text: &str) -> Option<String> {
    let text = text.trim();
    FORUM_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .map(|date| date.format(ISO_DATE_FORMAT).to_string())
}

/// Splits on every line boundary, `\r\n` counting once. Unlike
/// [`str::lines`], a bare `\r` and the Unicode separators end a line too.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text
        .split("\r\n")
        .flat_map(|chunk| chunk.split(is_line_break))
        .collect();
    // A trailing break doesn't open an empty last line.
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Parses a trimmed integer field.
pub fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}
