use serde::{Deserialize, Serialize};

/// Above this many matrix cells the aligner falls back to a positional
/// comparison instead of full dynamic programming.
pub const CELL_BUDGET: usize = 25_000_000;

const MATCH_SCORE: i32 = 2;
const MISMATCH_SCORE: i32 = -1;
const GAP_SCORE: i32 = -2;

/// Column classification. By convention `Insertion` is a gap in the first
/// sequence and `Deletion` a gap in the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffOp {
    Match,
    Mismatch,
    Insertion,
    Deletion,
}

/// A run of consecutive columns with the same classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub op: DiffOp,
    pub length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffResult {
    pub segments: Vec<DiffSegment>,
    /// Percent of aligned (non-gap) columns that match, one decimal.
    pub identity: f64,
    pub matches: usize,
    pub mismatches: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub aligned1: String,
    pub aligned2: String,
}

/// Compare two sequences by global alignment, or by positional diff when
/// the score matrix would exceed the cell budget.
pub fn sequence_diff(seq1: &str, seq2: &str) -> DiffResult {
    let s1 = seq1.to_uppercase();
    let s2 = seq2.to_uppercase();

    let (aligned1, aligned2) = if s1.len().saturating_mul(s2.len()) > CELL_BUDGET {
        positional_alignment(&s1, &s2)
    } else {
        needleman_wunsch(&s1, &s2)
    };

    classify(aligned1, aligned2)
}

/// Cheap fallback: pair characters up to the shorter length, then pad the
/// shorter side with gaps for the remaining suffix.
fn positional_alignment(s1: &str, s2: &str) -> (String, String) {
    let longer = s1.len().max(s2.len());
    let mut a1 = String::with_capacity(longer);
    let mut a2 = String::with_capacity(longer);
    a1.push_str(s1);
    a2.push_str(s2);
    for _ in s1.len()..longer {
        a1.push('-');
    }
    for _ in s2.len()..longer {
        a2.push('-');
    }
    (a1, a2)
}

fn score(a: u8, b: u8) -> i32 {
    if a == b {
        MATCH_SCORE
    } else {
        MISMATCH_SCORE
    }
}

/// Global alignment, match +2 / mismatch -1 / gap -2. Traceback prefers
/// diagonal, then up (gap in the second sequence), then left (gap in the
/// first).
fn needleman_wunsch(s1: &str, s2: &str) -> (String, String) {
    let a = s1.as_bytes();
    let b = s2.as_bytes();
    let m = a.len();
    let n = b.len();

    let cols = n + 1;
    let idx = |i: usize, j: usize| -> usize { i * cols + j };

    let mut dp = vec![0i32; (m + 1) * cols];
    for i in 1..=m {
        dp[idx(i, 0)] = i as i32 * GAP_SCORE;
    }
    for j in 1..=n {
        dp[idx(0, j)] = j as i32 * GAP_SCORE;
    }

    for i in 1..=m {
        for j in 1..=n {
            let diag = dp[idx(i - 1, j - 1)] + score(a[i - 1], b[j - 1]);
            let up = dp[idx(i - 1, j)] + GAP_SCORE;
            let left = dp[idx(i, j - 1)] + GAP_SCORE;
            dp[idx(i, j)] = diag.max(up).max(left);
        }
    }

    let mut r1 = Vec::with_capacity(m.max(n));
    let mut r2 = Vec::with_capacity(m.max(n));
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        let here = dp[idx(i, j)];
        if i > 0 && j > 0 && here == dp[idx(i - 1, j - 1)] + score(a[i - 1], b[j - 1]) {
            r1.push(a[i - 1]);
            r2.push(b[j - 1]);
            i -= 1;
            j -= 1;
        } else if i > 0 && here == dp[idx(i - 1, j)] + GAP_SCORE {
            r1.push(a[i - 1]);
            r2.push(b'-');
            i -= 1;
        } else {
            r1.push(b'-');
            r2.push(b[j - 1]);
            j -= 1;
        }
    }
    r1.reverse();
    r2.reverse();
    (
        String::from_utf8_lossy(&r1).into_owned(),
        String::from_utf8_lossy(&r2).into_owned(),
    )
}

/// Classify each aligned column and run-length-encode the result.
fn classify(aligned1: String, aligned2: String) -> DiffResult {
    let mut segments: Vec<DiffSegment> = Vec::new();
    let mut matches = 0usize;
    let mut mismatches = 0usize;
    let mut insertions = 0usize;
    let mut deletions = 0usize;

    for (c1, c2) in aligned1.chars().zip(aligned2.chars()) {
        let op = if c1 == '-' {
            insertions += 1;
            DiffOp::Insertion
        } else if c2 == '-' {
            deletions += 1;
            DiffOp::Deletion
        } else if c1 == c2 {
            matches += 1;
            DiffOp::Match
        } else {
            mismatches += 1;
            DiffOp::Mismatch
        };

        match segments.last_mut() {
            Some(seg) if seg.op == op => seg.length += 1,
            _ => segments.push(DiffSegment { op, length: 1 }),
        }
    }

    let aligned_columns = matches + mismatches;
    let identity = if aligned_columns == 0 {
        0.0
    } else {
        (matches as f64 / aligned_columns as f64 * 1000.0).round() / 10.0
    };

    DiffResult {
        segments,
        identity,
        matches,
        mismatches,
        insertions,
        deletions,
        aligned1,
        aligned2,
    }
}
