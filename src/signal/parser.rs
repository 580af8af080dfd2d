//! Response Parsing
//!
//! Best-effort extraction of structured fields from the model's free text.
//! The text format is only requested by the prompt, never guaranteed, so
//! every function here has a default instead of an error path.

use crate::gemini::Citation;
use crate::signal::types::{Confidence, GroundingSource, Verdict, DEFAULT_SOURCE_TITLE};
use regex::Regex;
use std::sync::OnceLock;

/// Maximum number of trending topics kept
pub const MAX_TRENDING: usize = 5;

fn verdict_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)VERDICT:\s*(True|False|Misleading|Unconfirmed|Developing)")
            .expect("verdict pattern is valid")
    })
}

fn confidence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)CONFIDENCE:\s*([0-9]+)").expect("confidence pattern is valid")
    })
}

fn marker_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"VERDICT:.*\n|CONFIDENCE:.*\n").expect("marker pattern is valid")
    })
}

/// First `VERDICT: <keyword>` in the text, or `Unconfirmed`
pub fn parse_verdict(text: &str) -> Verdict {
    verdict_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| Verdict::from_keyword(m.as_str()))
        .unwrap_or_default()
}

/// First `CONFIDENCE: <digits>` in the text, or 50
///
/// Values above 100 are clamped; digit runs too long for an integer fall
/// back to the neutral score.
pub fn parse_confidence(text: &str) -> Confidence {
    confidence_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .map(Confidence::saturating)
        .unwrap_or(Confidence::NEUTRAL)
}

/// Map citations to sources, dropping those without a usable uri
pub fn extract_sources(citations: &[Citation]) -> Vec<GroundingSource> {
    citations
        .iter()
        .filter_map(|citation| {
            let uri = citation.uri.as_deref().map(str::trim).unwrap_or_default();
            if uri.is_empty() {
                return None;
            }
            let title = citation
                .title
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or(DEFAULT_SOURCE_TITLE);
            Some(GroundingSource::new(uri, title))
        })
        .collect()
}

/// Parse a bulleted list of trending topics
///
/// Strips one leading `-`, `*` or `•` marker per line, keeps lines longer
/// than 5 and shorter than 100 characters, first five in order.
pub fn parse_trending(text: &str) -> Vec<String> {
    text.lines()
        .map(strip_bullet)
        .filter(|line| {
            let len = line.chars().count();
            len > 5 && len < 100
        })
        .take(MAX_TRENDING)
        .map(str::to_string)
        .collect()
}

fn strip_bullet(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix(['-', '*', '•']).unwrap_or(line).trim()
}

/// Remove `VERDICT:` and `CONFIDENCE:` lines for display
pub fn strip_marker_lines(analysis: &str) -> String {
    marker_line_pattern().replace_all(analysis, "").into_owned()
}
