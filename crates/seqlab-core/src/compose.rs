use serde::{Deserialize, Serialize};

/// Per-base tallies. `U` counts as `T`; anything outside the alphabet and
/// `N` lands in `other`/`n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NucleotideComposition {
    pub a: usize,
    pub t: usize,
    pub g: usize,
    pub c: usize,
    pub n: usize,
    pub other: usize,
}

impl NucleotideComposition {
    /// Count of recognized bases (A+T+G+C), the denominator for GC/AT.
    pub fn recognized(&self) -> usize {
        self.a + self.t + self.g + self.c
    }
}

pub fn nucleotide_composition(seq: &str) -> NucleotideComposition {
    let mut comp = NucleotideComposition::default();
    for ch in seq.chars() {
        match ch.to_ascii_uppercase() {
            'A' => comp.a += 1,
            'T' | 'U' => comp.t += 1,
            'G' => comp.g += 1,
            'C' => comp.c += 1,
            'N' => comp.n += 1,
            _ => comp.other += 1,
        }
    }
    comp
}

/// GC fraction (0.0 to 1.0) over recognized bases only. 0 for an empty or
/// all-N sequence.
pub fn gc_content(seq: &str) -> f64 {
    let comp = nucleotide_composition(seq);
    let total = comp.recognized();
    if total == 0 {
        return 0.0;
    }
    (comp.g + comp.c) as f64 / total as f64
}

/// AT(U) fraction (0.0 to 1.0) over recognized bases only.
pub fn at_content(seq: &str) -> f64 {
    let comp = nucleotide_composition(seq);
    let total = comp.recognized();
    if total == 0 {
        return 0.0;
    }
    (comp.a + comp.t) as f64 / total as f64
}

// Average monophosphate residue masses in Daltons.
const MASS_A: f64 = 331.22;
const MASS_T: f64 = 322.21;
const MASS_G: f64 = 347.22;
const MASS_C: f64 = 307.20;
const MASS_AVG: f64 = (MASS_A + MASS_T + MASS_G + MASS_C) / 4.0;

const WATER: f64 = 18.02;
const TERMINAL_OH: f64 = 17.01;
const TERMINAL_PHOSPHATE: f64 = 79.0;

/// Approximate single-stranded molecular weight in Daltons, rounded to two
/// decimals. 0 for an empty sequence.
pub fn molecular_weight(seq: &str) -> f64 {
    let n = seq.chars().count();
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = seq
        .chars()
        .map(|ch| match ch.to_ascii_uppercase() {
            'A' => MASS_A,
            'T' | 'U' => MASS_T,
            'G' => MASS_G,
            'C' => MASS_C,
            _ => MASS_AVG,
        })
        .sum();
    let mw = sum - (n as f64 - 1.0) * WATER + TERMINAL_OH + TERMINAL_PHOSPHATE;
    (mw * 100.0).round() / 100.0
}

/// Average amino-acid residue mass (peptide-bonded, water excluded).
fn residue_mass(aa: char) -> Option<f64> {
    let m = match aa.to_ascii_uppercase() {
        'A' => 71.0788,
        'R' => 156.1875,
        'N' => 114.1038,
        'D' => 115.0886,
        'C' => 103.1388,
        'E' => 129.1155,
        'Q' => 128.1307,
        'G' => 57.0519,
        'H' => 137.1411,
        'I' => 113.1594,
        'L' => 113.1594,
        'K' => 128.1741,
        'M' => 131.1926,
        'F' => 147.1766,
        'P' => 97.1167,
        'S' => 87.0782,
        'T' => 101.1051,
        'W' => 186.2132,
        'Y' => 163.1760,
        'V' => 99.1326,
        _ => return None,
    };
    Some(m)
}

/// Average protein molecular weight in Daltons, rounded to two decimals.
/// Trailing stop symbols are stripped; unrecognized residues are skipped.
pub fn protein_molecular_weight(protein: &str) -> f64 {
    let trimmed = protein.trim_end_matches('*');
    let mut sum = 0.0;
    let mut residues = 0usize;
    for aa in trimmed.chars() {
        if let Some(m) = residue_mass(aa) {
            sum += m;
            residues += 1;
        }
    }
    if residues == 0 {
        return 0.0;
    }
    let mw = sum + WATER;
    (mw * 100.0).round() / 100.0
}

/// Melting temperature in degrees C, or `None` for an empty sequence.
///
/// At 13 recognized bases or fewer this is the Wallace rule
/// `2(A+T) + 4(G+C)`; above that, the salt-adjusted approximation
/// `64.9 + 41(GC - 16.4)/total`. The switch is exact at the 13/14 boundary.
pub fn melting_temperature(seq: &str) -> Option<f64> {
    if seq.is_empty() {
        return None;
    }
    let comp = nucleotide_composition(seq);
    let at = (comp.a + comp.t) as f64;
    let gc = (comp.g + comp.c) as f64;
    let total = comp.recognized();

    if total <= 13 {
        Some(2.0 * at + 4.0 * gc)
    } else {
        Some(64.9 + 41.0 * (gc - 16.4) / total as f64)
    }
}
