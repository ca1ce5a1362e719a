//! Sheet metadata: the "Date Prepared" timestamp from the page text and the
//! document title from the Info dictionary.
//!
//! Both are best-effort. A sheet without a parseable date or a title is
//! still a valid sheet; failures are logged at debug level and yield `None`.

use chrono::NaiveDateTime;
use lopdf::{Document, Object};
use once_cell::sync::Lazy;
use regex::Regex;

/// Timestamp format used by the sheet, e.g. `Mar 05 2024 10:12:33 AM`.
const PREPARED_FORMAT: &str = "%b %d %Y %I:%M:%S %p";

static PREPARED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)date prepared:\s*(.+)").unwrap());

/// Extract the "Date Prepared" timestamp from the first page's text layer.
pub fn prepared_date(doc: &Document) -> Option<NaiveDateTime> {
    let text = match doc.extract_text(&[1]) {
        Ok(text) => text,
        Err(e) => {
            log::debug!("no text layer for prepared date: {}", e);
            return None;
        }
    };

    text.lines().find_map(parse_prepared_line)
}

/// Parse one text line as a `Date Prepared:` entry.
fn parse_prepared_line(line: &str) -> Option<NaiveDateTime> {
    let caps = PREPARED_RE.captures(line)?;
    let raw = caps[1].trim();
    match NaiveDateTime::parse_from_str(raw, PREPARED_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            log::debug!("unparseable prepared date {:?}: {}", raw, e);
            None
        }
    }
}

/// Get document title from Info dictionary
pub fn document_title(doc: &Document) -> Option<String> {
    let info_ref = doc.trailer.get(b"Info").ok()?.as_reference().ok()?;
    let info = doc.get_dictionary(info_ref).ok()?;
    let title_obj = info.get(b"Title").ok()?;

    match title_obj {
        Object::String(bytes, _) => {
            // Handle UTF-16BE encoding (BOM: 0xFE 0xFF)
            if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
                let utf16: Vec<u16> = bytes[2..]
                    .chunks_exact(2)
                    .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
                    .collect();
                Some(String::from_utf16_lossy(&utf16))
            } else {
                Some(String::from_utf8_lossy(bytes).to_string())
            }
        }
        _ => None,
    }
}
