//! Core data types for LiveSignal
//!
//! - `Verdict`: assessed truth status of a claim
//! - `Confidence`: integer score clamped to 0-100
//! - `GroundingSource`: a cited `{uri, title}` pair
//! - `VerificationResult`: one completed verification
//! - `WatchTopic` and `WatchStatus`: watchlist entries
//! - `View`: the four dashboard views

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Category assigned when the caller gives none
pub const DEFAULT_CATEGORY: &str = "General";

/// Title used for citations the service left untitled
pub const DEFAULT_SOURCE_TITLE: &str = "Source";

/// Assessed truth status of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Verdict {
    True,
    False,
    Misleading,
    #[default]
    Unconfirmed,
    Developing,
}

impl Verdict {
    /// All verdicts, in prompt order
    pub const ALL: [Verdict; 5] = [
        Verdict::True,
        Verdict::False,
        Verdict::Misleading,
        Verdict::Unconfirmed,
        Verdict::Developing,
    ];

    /// Canonical keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::True => "True",
            Verdict::False => "False",
            Verdict::Misleading => "Misleading",
            Verdict::Unconfirmed => "Unconfirmed",
            Verdict::Developing => "Developing",
        }
    }

    /// Match a keyword case-insensitively
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(keyword.trim()))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_keyword(s).ok_or_else(|| format!("Unknown verdict: {}", s))
    }
}

/// Confidence score, always within 0-100
///
/// Deserializing a value above 100 fails rather than clamping, so a stored
/// result can never carry an out-of-range score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Confidence(u8);

impl Confidence {
    /// Upper bound
    pub const MAX: u8 = 100;

    /// Score used when the model gave none
    pub const NEUTRAL: Confidence = Confidence(50);

    /// Create a confidence score, clamping anything above 100
    pub fn saturating(value: u64) -> Self {
        Self(value.min(Self::MAX as u64) as u8)
    }

    /// The score as an integer
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl TryFrom<u8> for Confidence {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > Self::MAX {
            Err(format!("confidence {} is outside 0-100", value))
        } else {
            Ok(Self(value))
        }
    }
}

impl From<Confidence> for u8 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A cited source attached to a grounded response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub uri: String,
    pub title: String,
}

impl GroundingSource {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
        }
    }

    /// Host part of the uri, for compact display
    pub fn host(&self) -> &str {
        let rest = self
            .uri
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.uri);
        rest.split(['/', '?', '#']).next().unwrap_or(rest)
    }
}

/// One completed verification
///
/// Immutable once created; lives in the session's result list until the
/// history is cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub id: Uuid,
    pub query: String,
    pub verdict: Verdict,
    pub confidence: Confidence,
    /// Raw model text, verbatim
    pub analysis: String,
    /// Citations in service order, not deduplicated
    pub sources: Vec<GroundingSource>,
    pub timestamp: DateTime<Utc>,
    pub category: String,
}

impl VerificationResult {
    /// Create a result with a fresh id and the current instant
    pub fn new(
        query: impl Into<String>,
        category: impl Into<String>,
        verdict: Verdict,
        confidence: Confidence,
        analysis: impl Into<String>,
        sources: Vec<GroundingSource>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            query: query.into(),
            verdict,
            confidence,
            analysis: analysis.into(),
            sources,
            timestamp: Utc::now(),
            category: category.into(),
        }
    }

    /// Analysis with the `VERDICT:` and `CONFIDENCE:` lines removed
    ///
    /// Display-time cleanup only; `analysis` itself stays verbatim.
    pub fn analysis_body(&self) -> String {
        crate::signal::parser::strip_marker_lines(&self.analysis)
    }
}

/// Status badge of a watched topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchStatus {
    #[default]
    Monitoring,
    Idle,
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchStatus::Monitoring => f.write_str("monitoring"),
            WatchStatus::Idle => f.write_str("idle"),
        }
    }
}

/// A topic on the watchlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchTopic {
    pub id: Uuid,
    pub topic: String,
    pub last_updated: DateTime<Utc>,
    pub status: WatchStatus,
}

impl WatchTopic {
    /// Create a topic with a fresh id and the current instant
    pub fn new(topic: impl Into<String>, status: WatchStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            topic: topic.into(),
            last_updated: Utc::now(),
            status,
        }
    }
}

/// The dashboard's views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Dashboard,
    Verify,
    Watchlist,
    History,
}
