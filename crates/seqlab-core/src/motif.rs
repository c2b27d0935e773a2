use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ops::{iupac_bases, normalize_dna};

/// A motif occurrence (0-based, half-open).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotifMatch {
    pub start: usize,
    pub end: usize,
    pub matched: String,
}

/// Expand an IUPAC pattern into a character-class regular expression.
/// Letters outside the IUPAC alphabet are escaped and matched literally,
/// so protein motifs pass through unchanged.
fn pattern_to_regex(pattern: &str) -> Option<Regex> {
    let mut expr = String::from("(?i)");
    for ch in pattern.chars() {
        match iupac_bases(ch) {
            Some(set) if set.len() > 1 => {
                expr.push('[');
                expr.push_str(set);
                expr.push(']');
            }
            Some(set) => expr.push_str(set),
            None => expr.push_str(&regex::escape(&ch.to_string())),
        }
    }
    Regex::new(&expr).ok()
}

/// Find every occurrence of an IUPAC-aware pattern, overlaps included:
/// after a hit at `p` the scan resumes from `p + 1`, not past the match.
pub fn find_motif(seq: &str, pattern: &str) -> Vec<MotifMatch> {
    if seq.is_empty() || pattern.is_empty() {
        return Vec::new();
    }
    let haystack = normalize_dna(seq);
    let re = match pattern_to_regex(pattern) {
        Some(re) => re,
        None => return Vec::new(),
    };

    let mut matches = Vec::new();
    let mut pos = 0;
    while pos < haystack.len() {
        match re.find(&haystack[pos..]) {
            Some(m) => {
                let start = pos + m.start();
                matches.push(MotifMatch {
                    start,
                    end: start + m.as_str().len(),
                    matched: m.as_str().to_string(),
                });
                pos = start + 1;
            }
            None => break,
        }
    }
    matches
}
