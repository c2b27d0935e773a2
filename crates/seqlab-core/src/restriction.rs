use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ops::{iupac_matches, normalize_dna};
use crate::record::Topology;

/// Overhang left by a cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overhang {
    FivePrime,
    ThreePrime,
    Blunt,
}

/// A restriction enzyme: IUPAC recognition sequence plus top/bottom strand
/// cut offsets from the site start.
#[derive(Debug, Clone, Copy)]
pub struct Enzyme {
    pub name: &'static str,
    pub recognition: &'static str,
    pub cut_top: usize,
    pub cut_bottom: usize,
    pub overhang: Overhang,
}

/// Curated database of common cloning enzymes.
pub const ENZYME_DATABASE: &[Enzyme] = &[
    Enzyme { name: "EcoRI",   recognition: "GAATTC",   cut_top: 1, cut_bottom: 5, overhang: Overhang::FivePrime },
    Enzyme { name: "BamHI",   recognition: "GGATCC",   cut_top: 1, cut_bottom: 5, overhang: Overhang::FivePrime },
    Enzyme { name: "HindIII", recognition: "AAGCTT",   cut_top: 1, cut_bottom: 5, overhang: Overhang::FivePrime },
    Enzyme { name: "NotI",    recognition: "GCGGCCGC", cut_top: 2, cut_bottom: 6, overhang: Overhang::FivePrime },
    Enzyme { name: "XhoI",    recognition: "CTCGAG",   cut_top: 1, cut_bottom: 5, overhang: Overhang::FivePrime },
    Enzyme { name: "SalI",    recognition: "GTCGAC",   cut_top: 1, cut_bottom: 5, overhang: Overhang::FivePrime },
    Enzyme { name: "BglII",   recognition: "AGATCT",   cut_top: 1, cut_bottom: 5, overhang: Overhang::FivePrime },
    Enzyme { name: "NcoI",    recognition: "CCATGG",   cut_top: 1, cut_bottom: 5, overhang: Overhang::FivePrime },
    Enzyme { name: "NdeI",    recognition: "CATATG",   cut_top: 2, cut_bottom: 4, overhang: Overhang::FivePrime },
    Enzyme { name: "XbaI",    recognition: "TCTAGA",   cut_top: 1, cut_bottom: 5, overhang: Overhang::FivePrime },
    Enzyme { name: "SpeI",    recognition: "ACTAGT",   cut_top: 1, cut_bottom: 5, overhang: Overhang::FivePrime },
    Enzyme { name: "StyI",    recognition: "CCWWGG",   cut_top: 1, cut_bottom: 5, overhang: Overhang::FivePrime },
    Enzyme { name: "KpnI",    recognition: "GGTACC",   cut_top: 5, cut_bottom: 1, overhang: Overhang::ThreePrime },
    Enzyme { name: "SacI",    recognition: "GAGCTC",   cut_top: 5, cut_bottom: 1, overhang: Overhang::ThreePrime },
    Enzyme { name: "PstI",    recognition: "CTGCAG",   cut_top: 5, cut_bottom: 1, overhang: Overhang::ThreePrime },
    Enzyme { name: "SphI",    recognition: "GCATGC",   cut_top: 5, cut_bottom: 1, overhang: Overhang::ThreePrime },
    Enzyme { name: "ApaI",    recognition: "GGGCCC",   cut_top: 5, cut_bottom: 1, overhang: Overhang::ThreePrime },
    Enzyme { name: "AatII",   recognition: "GACGTC",   cut_top: 5, cut_bottom: 1, overhang: Overhang::ThreePrime },
    Enzyme { name: "EcoRV",   recognition: "GATATC",   cut_top: 3, cut_bottom: 3, overhang: Overhang::Blunt },
    Enzyme { name: "SmaI",    recognition: "CCCGGG",   cut_top: 3, cut_bottom: 3, overhang: Overhang::Blunt },
    Enzyme { name: "HpaI",    recognition: "GTTAAC",   cut_top: 3, cut_bottom: 3, overhang: Overhang::Blunt },
    Enzyme { name: "ScaI",    recognition: "AGTACT",   cut_top: 3, cut_bottom: 3, overhang: Overhang::Blunt },
];

/// Look up an enzyme by name, case-insensitively.
pub fn find_enzyme(name: &str) -> Option<&'static Enzyme> {
    ENZYME_DATABASE
        .iter()
        .find(|e| e.name.eq_ignore_ascii_case(name))
}

/// A located recognition site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestrictionSite {
    pub enzyme: String,
    pub position: usize,
    pub cut_position: usize,
    pub recognition_sequence: String,
    pub overhang: Overhang,
}

/// A digestion product. `left_enzyme`/`right_enzyme` are `None` at the free
/// ends of a linear molecule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestFragment {
    pub sequence: String,
    pub length: usize,
    pub start_in_original: usize,
    pub end_in_original: usize,
    pub left_enzyme: Option<String>,
    pub right_enzyme: Option<String>,
}

/// All recognition sites of one enzyme, overlaps included (the scan tests
/// every start position).
pub fn find_sites(seq: &str, enzyme: &Enzyme) -> Vec<RestrictionSite> {
    let haystack: Vec<char> = normalize_dna(seq).chars().collect();
    let pattern: Vec<char> = enzyme.recognition.chars().collect();
    if haystack.len() < pattern.len() || pattern.is_empty() {
        return Vec::new();
    }

    let mut sites = Vec::new();
    for start in 0..=haystack.len() - pattern.len() {
        let hit = pattern
            .iter()
            .zip(&haystack[start..start + pattern.len()])
            .all(|(&code, &base)| iupac_matches(code, base));
        if hit {
            sites.push(RestrictionSite {
                enzyme: enzyme.name.to_string(),
                position: start,
                cut_position: start + enzyme.cut_top,
                recognition_sequence: enzyme.recognition.to_string(),
                overhang: enzyme.overhang,
            });
        }
    }
    sites
}

/// Sites for a set of enzymes, sorted by position. Names that match nothing
/// in the database are skipped.
pub fn find_all_sites(seq: &str, enzyme_names: &[&str]) -> Vec<RestrictionSite> {
    let mut sites = Vec::new();
    for name in enzyme_names {
        if let Some(enzyme) = find_enzyme(name) {
            sites.extend(find_sites(seq, enzyme));
        }
    }
    sites.sort_by_key(|s| (s.position, s.cut_position));
    sites
}

/// Digest a sequence with the named enzymes.
///
/// Linear topology yields N+1 fragments for N distinct cut positions;
/// circular topology yields exactly N, with the fragment spanning the
/// origin concatenated from tail and head. Duplicate cut positions from
/// different enzymes collapse to one.
pub fn restriction_digest(
    seq: &str,
    enzyme_names: &[&str],
    topology: Topology,
) -> Vec<DigestFragment> {
    let normalized = normalize_dna(seq);
    let len = normalized.len();
    let sites = find_all_sites(&normalized, enzyme_names);

    // First site at each distinct cut position names the boundary.
    let mut boundary: BTreeMap<usize, String> = BTreeMap::new();
    for site in &sites {
        let keep = match topology {
            Topology::Linear => site.cut_position > 0 && site.cut_position < len,
            Topology::Circular => site.cut_position < len,
        };
        if keep {
            boundary
                .entry(site.cut_position)
                .or_insert_with(|| site.enzyme.clone());
        }
    }

    if boundary.is_empty() {
        return vec![DigestFragment {
            sequence: normalized.clone(),
            length: len,
            start_in_original: 0,
            end_in_original: len,
            left_enzyme: None,
            right_enzyme: None,
        }];
    }

    let cuts: Vec<(usize, &String)> = boundary.iter().map(|(&p, e)| (p, e)).collect();
    let mut fragments = Vec::new();

    match topology {
        Topology::Linear => {
            let mut prev = 0usize;
            let mut left: Option<String> = None;
            for &(pos, enzyme) in &cuts {
                fragments.push(DigestFragment {
                    sequence: normalized[prev..pos].to_string(),
                    length: pos - prev,
                    start_in_original: prev,
                    end_in_original: pos,
                    left_enzyme: left.take(),
                    right_enzyme: Some(enzyme.clone()),
                });
                prev = pos;
                left = Some(enzyme.clone());
            }
            fragments.push(DigestFragment {
                sequence: normalized[prev..].to_string(),
                length: len - prev,
                start_in_original: prev,
                end_in_original: len,
                left_enzyme: left,
                right_enzyme: None,
            });
        }
        Topology::Circular => {
            for (i, &(start, enzyme)) in cuts.iter().enumerate() {
                let (end, next_enzyme) = cuts[(i + 1) % cuts.len()];
                let (sequence, length) = if end > start {
                    (normalized[start..end].to_string(), end - start)
                } else {
                    // Wraps through the origin
                    let mut s = normalized[start..].to_string();
                    s.push_str(&normalized[..end]);
                    (s, len - start + end)
                };
                fragments.push(DigestFragment {
                    sequence,
                    length,
                    start_in_original: start,
                    end_in_original: end,
                    left_enzyme: Some(enzyme.clone()),
                    right_enzyme: Some(next_enzyme.clone()),
                });
            }
        }
    }

    fragments
}

/// Cut counts per enzyme, without materializing fragments. Unknown names
/// are skipped.
pub fn digest_preview(seq: &str, enzyme_names: &[&str]) -> BTreeMap<String, usize> {
    let normalized = normalize_dna(seq);
    let mut counts = BTreeMap::new();
    for name in enzyme_names {
        if let Some(enzyme) = find_enzyme(name) {
            counts.insert(enzyme.name.to_string(), find_sites(&normalized, enzyme).len());
        }
    }
    counts
}

/// Sites of enzymes that cut exactly once.
pub fn find_unique_cutters(seq: &str, enzyme_names: &[&str]) -> Vec<RestrictionSite> {
    let normalized = normalize_dna(seq);
    let mut unique = Vec::new();
    for name in enzyme_names {
        if let Some(enzyme) = find_enzyme(name) {
            let mut sites = find_sites(&normalized, enzyme);
            if sites.len() == 1 {
                unique.push(sites.remove(0));
            }
        }
    }
    unique.sort_by_key(|s| s.position);
    unique
}

/// Names of selected enzymes with zero sites.
pub fn find_non_cutters(seq: &str, enzyme_names: &[&str]) -> Vec<String> {
    let normalized = normalize_dna(seq);
    let mut absent = Vec::new();
    for name in enzyme_names {
        if let Some(enzyme) = find_enzyme(name) {
            if find_sites(&normalized, enzyme).is_empty() {
                absent.push(enzyme.name.to_string());
            }
        }
    }
    absent
}
