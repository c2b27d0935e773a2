use serde::{Deserialize, Serialize};

use crate::compose::{gc_content, melting_temperature};
use crate::feature::{Feature, FeatureType, Strand};
use crate::ops::{normalize_dna, reverse_complement};

/// Constraints for candidate enumeration. GC bounds are fractions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimerParams {
    pub min_length: usize,
    pub max_length: usize,
    pub target_tm: f64,
    pub tm_tolerance: f64,
    pub min_gc: f64,
    pub max_gc: f64,
}

impl Default for PrimerParams {
    fn default() -> Self {
        Self {
            min_length: 18,
            max_length: 28,
            target_tm: 60.0,
            tm_tolerance: 3.0,
            min_gc: 0.30,
            max_gc: 0.70,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimerDirection {
    Forward,
    Reverse,
}

/// A primer candidate. `start`/`end`/`length`, `tm` and `gc_percent` all
/// describe the binding region alone; the optional 5' tail shows up only in
/// `full_sequence`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimerCandidate {
    pub sequence: String,
    pub full_sequence: String,
    pub full_length: usize,
    pub tail: String,
    pub start: usize,
    pub end: usize,
    pub length: usize,
    pub tm: f64,
    pub gc_percent: f64,
    pub direction: PrimerDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimerPair {
    pub forward: PrimerCandidate,
    pub reverse: PrimerCandidate,
    pub product_length: usize,
    pub tm_difference: f64,
}

const MAX_PAIR_TM_DIFFERENCE: f64 = 5.0;
const MAX_PAIRS: usize = 10;

fn candidate(
    binding: &str,
    start: usize,
    tail: Option<&str>,
    direction: PrimerDirection,
    params: &PrimerParams,
) -> Option<PrimerCandidate> {
    let tm = melting_temperature(binding)?;
    if (tm - params.target_tm).abs() > params.tm_tolerance {
        return None;
    }
    let gc = gc_content(binding);
    if gc < params.min_gc || gc > params.max_gc {
        return None;
    }
    let tail = tail.unwrap_or("").to_uppercase();
    let full_sequence = format!("{tail}{binding}");
    Some(PrimerCandidate {
        sequence: binding.to_string(),
        full_length: full_sequence.len(),
        full_sequence,
        tail,
        start,
        end: start + binding.len(),
        length: binding.len(),
        tm,
        gc_percent: gc * 100.0,
        direction,
    })
}

fn sort_by_tm_closeness(candidates: &mut [PrimerCandidate], target_tm: f64) {
    candidates.sort_by(|a, b| {
        let da = (a.tm - target_tm).abs();
        let db = (b.tm - target_tm).abs();
        da.total_cmp(&db)
    });
}

/// Enumerate forward primers binding at `target_start`, best Tm first.
pub fn design_forward_primer(
    template: &str,
    target_start: usize,
    params: &PrimerParams,
    tail: Option<&str>,
) -> Vec<PrimerCandidate> {
    let template = normalize_dna(template);
    let mut candidates = Vec::new();
    for len in params.min_length..=params.max_length {
        let end = target_start + len;
        if end > template.len() {
            break;
        }
        let binding = &template[target_start..end];
        if let Some(c) = candidate(binding, target_start, tail, PrimerDirection::Forward, params) {
            candidates.push(c);
        }
    }
    sort_by_tm_closeness(&mut candidates, params.target_tm);
    candidates
}

/// Enumerate reverse primers whose binding region ends at `target_end`.
/// The primer sequence is the reverse complement of the template region;
/// `start`/`end` stay in template coordinates.
pub fn design_reverse_primer(
    template: &str,
    target_end: usize,
    params: &PrimerParams,
    tail: Option<&str>,
) -> Vec<PrimerCandidate> {
    let template = normalize_dna(template);
    let target_end = target_end.min(template.len());
    let mut candidates = Vec::new();
    for len in params.min_length..=params.max_length {
        if len > target_end {
            break;
        }
        let start = target_end - len;
        let binding = reverse_complement(&template[start..target_end]);
        if let Some(c) = candidate(&binding, start, tail, PrimerDirection::Reverse, params) {
            candidates.push(c);
        }
    }
    sort_by_tm_closeness(&mut candidates, params.target_tm);
    candidates
}

/// Cross-join forward and reverse candidates into compatible pairs:
/// Tm difference at most 5 degrees, positive product length. Sorted by Tm
/// difference then product length; at most 10 returned.
pub fn design_primer_pair(
    template: &str,
    target_start: usize,
    target_end: usize,
    params: &PrimerParams,
) -> Vec<PrimerPair> {
    let forwards = design_forward_primer(template, target_start, params, None);
    let reverses = design_reverse_primer(template, target_end, params, None);

    let mut pairs = Vec::new();
    for f in &forwards {
        for r in &reverses {
            let tm_difference = (f.tm - r.tm).abs();
            if tm_difference > MAX_PAIR_TM_DIFFERENCE {
                continue;
            }
            if r.end <= f.start {
                continue;
            }
            pairs.push(PrimerPair {
                forward: f.clone(),
                reverse: r.clone(),
                product_length: r.end - f.start,
                tm_difference,
            });
        }
    }

    pairs.sort_by(|a, b| {
        a.tm_difference
            .total_cmp(&b.tm_difference)
            .then(a.product_length.cmp(&b.product_length))
    });
    pairs.truncate(MAX_PAIRS);
    pairs
}

/// Express a primer candidate as a `primer_bind` feature over its binding
/// region.
pub fn primer_to_feature(primer: &PrimerCandidate) -> Feature {
    let (name, strand) = match primer.direction {
        PrimerDirection::Forward => ("forward primer", Strand::Forward),
        PrimerDirection::Reverse => ("reverse primer", Strand::Reverse),
    };
    let mut feature = Feature::new(name, FeatureType::PrimerBind, primer.start, primer.end, strand);
    feature.add_qualifier("tm", format!("{:.1}", primer.tm));
    feature.add_qualifier("gc_percent", format!("{:.1}", primer.gc_percent));
    if !primer.tail.is_empty() {
        feature.add_qualifier("tail", primer.tail.clone());
    }
    feature
}

#[cfg(test)]
mod tests {
    use super::*;

    // 60 bp, mixed composition so 18-28mers land near the default window
    const TEMPLATE: &str = "ATGGCTAGCGATCGTACGTAGCTAGCTAGGATCCTAGCTAGCATCGATCGGAATTCGCTA";

    #[test]
    fn test_forward_candidates_respect_constraints() {
        let params = PrimerParams::default();
        let candidates = design_forward_primer(TEMPLATE, 0, &params, None);
        assert!(!candidates.is_empty());
        for c in &candidates {
            assert!(c.length >= params.min_length && c.length <= params.max_length);
            assert!((c.tm - params.target_tm).abs() <= params.tm_tolerance);
            let gc = c.gc_percent / 100.0;
            assert!(gc >= params.min_gc && gc <= params.max_gc);
            assert_eq!(c.start, 0);
            assert_eq!(c.end, c.length);
        }
    }

    #[test]
    fn test_forward_sorted_by_tm_closeness() {
        let params = PrimerParams::default();
        let candidates = design_forward_primer(TEMPLATE, 0, &params, None);
        for pair in candidates.windows(2) {
            assert!(
                (pair[0].tm - params.target_tm).abs() <= (pair[1].tm - params.target_tm).abs()
            );
        }
    }

    #[test]
    fn test_tail_excluded_from_tm() {
        let params = PrimerParams::default();
        let plain = design_forward_primer(TEMPLATE, 0, &params, None);
        let tailed = design_forward_primer(TEMPLATE, 0, &params, Some("ggaattc"));
        assert_eq!(plain.len(), tailed.len());
        for (p, t) in plain.iter().zip(&tailed) {
            assert_eq!(p.tm, t.tm);
            assert_eq!(p.gc_percent, t.gc_percent);
            assert_eq!(t.tail, "GGAATTC");
            assert_eq!(t.full_sequence, format!("GGAATTC{}", t.sequence));
            assert_eq!(t.full_length, t.tail.len() + t.length);
        }
    }

    #[test]
    fn test_reverse_primer_is_reverse_complement() {
        let params = PrimerParams {
            tm_tolerance: 40.0,
            min_gc: 0.0,
            max_gc: 1.0,
            ..Default::default()
        };
        let candidates = design_reverse_primer(TEMPLATE, TEMPLATE.len(), &params, None);
        assert!(!candidates.is_empty());
        let c = &candidates[0];
        assert_eq!(c.end, TEMPLATE.len());
        let region = &TEMPLATE[c.start..c.end];
        assert_eq!(c.sequence, reverse_complement(region));
        assert_eq!(c.direction, PrimerDirection::Reverse);
    }

    #[test]
    fn test_pair_constraints() {
        let params = PrimerParams {
            tm_tolerance: 10.0,
            ..Default::default()
        };
        let pairs = design_primer_pair(TEMPLATE, 0, TEMPLATE.len(), &params);
        assert!(pairs.len() <= 10);
        for p in &pairs {
            assert!(p.tm_difference <= MAX_PAIR_TM_DIFFERENCE);
            assert!(p.product_length > 0);
            assert_eq!(p.product_length, p.reverse.end - p.forward.start);
        }
        for w in pairs.windows(2) {
            assert!(w[0].tm_difference <= w[1].tm_difference);
        }
    }

    #[test]
    fn test_out_of_range_start_yields_nothing() {
        let params = PrimerParams::default();
        assert!(design_forward_primer("ATGC", 0, &params, None).is_empty());
        assert!(design_forward_primer(TEMPLATE, TEMPLATE.len(), &params, None).is_empty());
    }

    #[test]
    fn test_primer_to_feature() {
        let params = PrimerParams {
            tm_tolerance: 40.0,
            min_gc: 0.0,
            max_gc: 1.0,
            ..Default::default()
        };
        let candidates = design_forward_primer(TEMPLATE, 0, &params, Some("AAA"));
        let feature = primer_to_feature(&candidates[0]);
        assert_eq!(feature.feature_type, FeatureType::PrimerBind);
        assert_eq!(feature.strand, Strand::Forward);
        assert_eq!(feature.start, candidates[0].start);
        assert_eq!(feature.end, candidates[0].end);
        assert_eq!(feature.get_qualifier("tail"), Some("AAA"));
    }
}
