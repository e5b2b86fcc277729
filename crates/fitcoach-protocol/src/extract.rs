//! Free-text field extraction for log entries.
//!
//! Each field has its own pattern anchored to a keyword or unit, so digits
//! belonging to one field never leak into another.

use crate::structured::StructuredData;
use regex::Regex;
use std::sync::LazyLock;

static DOMS_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"(?i)doms[:\s]*([0-9]+)"));
static WEIGHT_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"(?i)([\d.]*\d[\d.]*)\s*kg"));
static WAIST_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"(?i)waist[:\s]*([\d.]*\d[\d.]*)"));
static SLEEP_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"(?i)([\d.]*\d[\d.]*)\s*h?\s*sleep|sleep[:\s]*([\d.]*\d[\d.]*)"));
static BODY_FAT_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"(?i)([\d.]*\d[\d.]*)%?\s*(?:body\s*)?fat|bf[:\s]*([\d.]*\d[\d.]*)"));

/// Compile one of the literal patterns above; a pattern that fails to
/// compile simply never matches.
///
/// Numeric captures must contain a digit, so a stray full stop in front of
/// a keyword cannot shadow a later number.
fn compile(pattern: &str) -> Option<Regex> {
    Regex::new(pattern).ok()
}

/// Parse recognized fields out of free text.
///
/// Returns `None` when no field matched, never an empty record.
pub fn extract_structured(content: &str) -> Option<StructuredData> {
    let structured = StructuredData {
        doms: extract_doms(content),
        weight: first_decimal(&WEIGHT_PATTERN, content),
        waist: first_decimal(&WAIST_PATTERN, content),
        sleep: first_decimal(&SLEEP_PATTERN, content),
        body_fat: first_decimal(&BODY_FAT_PATTERN, content),
        ..StructuredData::default()
    };
    if structured == StructuredData::default() {
        None
    } else {
        Some(structured)
    }
}

/// Scan for a DOMS score alone.
///
/// Scores too large for a `u32` saturate at `u32::MAX`.
pub fn extract_doms(content: &str) -> Option<u32> {
    let digits = DOMS_PATTERN
        .as_ref()?
        .captures(content)?
        .get(1)?
        .as_str();
    Some(digits.parse().unwrap_or(u32::MAX))
}

/// Take the leftmost match and parse whichever alternative captured.
fn first_decimal(pattern: &Option<Regex>, content: &str) -> Option<f64> {
    let caps = pattern.as_ref()?.captures(content)?;
    let raw = caps.iter().skip(1).flatten().next()?.as_str();
    parse_leading_decimal(raw)
}

/// Parse the longest `digits[.digits]` prefix, so `1.2.3` reads as `1.2`.
fn parse_leading_decimal(raw: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    for (idx, ch) in raw.char_indices() {
        match ch {
            '0'..='9' => end = idx + 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end = idx + 1;
            }
            _ => break,
        }
    }
    let prefix = raw[..end].trim_end_matches('.');
    if !prefix.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}
