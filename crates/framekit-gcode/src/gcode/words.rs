//! Word scanning
//!
//! Splits one program line into letter/number words. Anything that is not a
//! single uppercase letter followed by a decimal number is ignored, so
//! dialect-specific syntax passes through without stopping the scan.

use regex::Regex;
use std::sync::OnceLock;

/// Words picked out of a single line
///
/// Only the letters that matter for planar framing are kept. A letter that
/// appears twice keeps its last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedWords {
    /// G words in the order they appeared
    pub g_codes: Vec<f64>,
    /// X target
    pub x: Option<f64>,
    /// Y target
    pub y: Option<f64>,
    /// Arc center X offset
    pub i: Option<f64>,
    /// Arc center Y offset
    pub j: Option<f64>,
    /// Words whose number did not parse to a finite value
    pub dropped: usize,
}

impl ParsedWords {
    /// True when the line names an X or Y target
    pub fn has_target(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }

    /// Both arc offsets, if the line carries them
    pub fn arc_offsets(&self) -> Option<(f64, f64)> {
        self.i.zip(self.j)
    }
}

/// Remove the `;` comment and surrounding whitespace
pub fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(idx) => line[..idx].trim(),
        None => line.trim(),
    }
}

const WORD_PATTERN: &str = r"([A-Z])([+-]?\d*\.?\d+)";

fn word_regex() -> &'static Regex {
    static WORD_REGEX: OnceLock<Regex> = OnceLock::new();
    WORD_REGEX.get_or_init(|| Regex::new(WORD_PATTERN).expect("invalid regex pattern"))
}

/// Scan one line into words.
///
/// Returns `None` for lines that are blank once the comment is removed.
pub fn scan_line(line: &str) -> Option<ParsedWords> {
    let code = strip_comment(line).to_uppercase();
    if code.is_empty() {
        return None;
    }

    let mut words = ParsedWords::default();
    for caps in word_regex().captures_iter(&code) {
        let letter = caps[1].chars().next().unwrap_or_default();
        let value = match caps[2].parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                words.dropped += 1;
                continue;
            }
        };

        match letter {
            'G' => words.g_codes.push(value),
            'X' => words.x = Some(value),
            'Y' => words.y = Some(value),
            'I' => words.i = Some(value),
            'J' => words.j = Some(value),
            _ => {}
        }
    }

    Some(words)
}

/// Integer G-code number, or `None` for fractional codes like `G91.1`
pub fn modal_code(value: f64) -> Option<u32> {
    if value.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&value) {
        Some(value as u32)
    } else {
        None
    }
}
