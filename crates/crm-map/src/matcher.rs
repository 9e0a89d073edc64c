//! Header-to-pattern confidence scoring.
//!
//! Three tiers are tried per pattern, highest first:
//! - exact match of the trimmed, lowercased header: 100
//! - substring containment in either direction: 75
//! - normalized Levenshtein similarity `(max_len - distance) / max_len`,
//!   scaled by 80 above 0.7 and by 60 above 0.5, otherwise 0
//!
//! The score for a pattern list is the best score of any pattern in it.

use rapidfuzz::distance::levenshtein;
use serde::Serialize;

use crate::utils::normalize_header;

pub const EXACT_CONFIDENCE: u8 = 100;
pub const SUBSTRING_CONFIDENCE: u8 = 75;

const STRONG_SIMILARITY: f64 = 0.7;
const WEAK_SIMILARITY: f64 = 0.5;
const STRONG_SCALE: f64 = 80.0;
const WEAK_SCALE: f64 = 60.0;

/// How a header matched a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchKind {
    Exact,
    Substring,
    Fuzzy,
    None,
}

/// Best match of a header against a pattern list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderMatch {
    pub confidence: u8,
    pub kind: MatchKind,
    /// Pattern that produced the score, if any did.
    pub pattern: Option<String>,
}

impl HeaderMatch {
    fn none() -> Self {
        Self {
            confidence: 0,
            kind: MatchKind::None,
            pattern: None,
        }
    }

    /// Short explanation for mapping reports.
    pub fn explain(&self) -> String {
        match (&self.kind, &self.pattern) {
            (MatchKind::Exact, Some(p)) => format!("exact match '{p}'"),
            (MatchKind::Substring, Some(p)) => format!("contains '{p}'"),
            (MatchKind::Fuzzy, Some(p)) => format!("similar to '{p}'"),
            _ => "no match".to_string(),
        }
    }
}

/// Confidence (0-100) that `header` corresponds to one of `patterns`.
pub fn match_confidence(header: &str, patterns: &[&str]) -> u8 {
    match_header(header, patterns).confidence
}

/// Like [`match_confidence`] but also reports which pattern matched and how.
///
/// Ties between patterns keep the first pattern that reached the score.
pub fn match_header(header: &str, patterns: &[&str]) -> HeaderMatch {
    let normalized = normalize_header(header);
    if normalized.is_empty() {
        return HeaderMatch::none();
    }

    let mut best = HeaderMatch::none();
    for pattern in patterns {
        let pattern = normalize_header(pattern);
        if pattern.is_empty() {
            continue;
        }
        let (confidence, kind) = score_pattern(&normalized, &pattern);
        if confidence > best.confidence {
            best = HeaderMatch {
                confidence,
                kind,
                pattern: Some(pattern),
            };
            if confidence == EXACT_CONFIDENCE {
                break;
            }
        }
    }
    best
}

fn score_pattern(header: &str, pattern: &str) -> (u8, MatchKind) {
    if header == pattern {
        return (EXACT_CONFIDENCE, MatchKind::Exact);
    }
    if header.contains(pattern) || pattern.contains(header) {
        return (SUBSTRING_CONFIDENCE, MatchKind::Substring);
    }
    let sim = similarity(header, pattern);
    if sim > STRONG_SIMILARITY {
        (scale(sim, STRONG_SCALE), MatchKind::Fuzzy)
    } else if sim > WEAK_SIMILARITY {
        (scale(sim, WEAK_SCALE), MatchKind::Fuzzy)
    } else {
        (0, MatchKind::None)
    }
}

/// Normalized Levenshtein similarity in `[0, 1]`, measured in characters.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein::distance(a.chars(), b.chars());
    (max_len.saturating_sub(distance)) as f64 / max_len as f64
}

fn scale(sim: f64, factor: f64) -> u8 {
    (sim * factor).round().clamp(0.0, 100.0) as u8
}
