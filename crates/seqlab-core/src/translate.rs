use crate::codon::{CodonChoice, CodonTable, CodonUsage, Organism};
use crate::ops::normalize_dna;

/// Placeholder emitted when a residue has no codon in the usage table.
pub const UNKNOWN_CODON: &str = "NNN";

/// Translate from a reading-frame offset (0, 1 or 2), one letter per
/// complete codon. Unknown codons emit `X`. With `stop_at_first`, emission
/// halts right after the first stop (stop symbol included).
pub fn translate(seq: &str, frame: usize, table: &CodonTable, stop_at_first: bool) -> String {
    let bases: Vec<char> = normalize_dna(seq).chars().collect();
    let mut protein = String::new();
    let mut i = frame.min(3);
    while i + 3 <= bases.len() {
        let codon: String = bases[i..i + 3].iter().collect();
        let aa = table.translate_codon(&codon);
        protein.push(aa);
        if stop_at_first && aa == '*' {
            break;
        }
        i += 3;
    }
    protein
}

/// The three forward-frame translations.
pub fn translate_all_frames(seq: &str, table: &CodonTable) -> [String; 3] {
    [
        translate(seq, 0, table, false),
        translate(seq, 1, table, false),
        translate(seq, 2, table, false),
    ]
}

/// Translate from the first ATG, stopping at the first stop codon.
/// `None` when the sequence has no ATG.
pub fn translate_from_first_atg(seq: &str, table: &CodonTable) -> Option<String> {
    let normalized = normalize_dna(seq);
    let start = normalized.find("ATG")?;
    Some(translate(&normalized[start..], 0, table, true))
}

/// Back-translate a protein using the organism's preferred codon per
/// residue. A stop residue emits the preferred stop codon and halts;
/// unknown residues emit the `NNN` placeholder.
pub fn reverse_translate(protein: &str, usage: &CodonUsage) -> String {
    let mut dna = String::with_capacity(protein.len() * 3);
    for aa in protein.chars() {
        match usage.best_codon(aa) {
            Some(codon) => {
                dna.push_str(codon);
                if aa == '*' {
                    break;
                }
            }
            None => dna.push_str(UNKNOWN_CODON),
        }
    }
    dna
}

/// Back-translate returning the full ranked codon list per residue, best
/// first. Residues after a stop are not reported; unknown residues get an
/// empty list.
pub fn reverse_translate_all(protein: &str, usage: &CodonUsage) -> Vec<Vec<CodonChoice>> {
    let mut out = Vec::with_capacity(protein.len());
    for aa in protein.chars() {
        match usage.ranked_codons(aa) {
            Some(choices) => {
                out.push(choices.to_vec());
                if aa == '*' {
                    break;
                }
            }
            None => out.push(Vec::new()),
        }
    }
    out
}

/// Re-encode a nucleotide sequence with the organism's preferred codons.
///
/// Bases before `frame` and any trailing partial codon pass through
/// unchanged, as do stop codons and codons that do not translate.
pub fn codon_optimize(seq: &str, organism: Organism, frame: usize) -> String {
    let normalized = normalize_dna(seq);
    let usage = CodonUsage::for_organism(organism);
    let table = CodonTable::standard();
    let bases: Vec<char> = normalized.chars().collect();
    let frame = frame.min(3).min(bases.len());

    let mut out = String::with_capacity(bases.len());
    out.extend(&bases[..frame]);

    let mut i = frame;
    while i + 3 <= bases.len() {
        let codon: String = bases[i..i + 3].iter().collect();
        let aa = table.translate_codon(&codon);
        if aa == 'X' || aa == '*' {
            out.push_str(&codon);
        } else {
            match usage.best_codon(aa) {
                Some(best) => out.push_str(best),
                None => out.push_str(&codon),
            }
        }
        i += 3;
    }
    out.extend(&bases[i..]);
    out
}

/// Codon Adaptation Index: the geometric mean of
/// `frequency / max family frequency` over every scoreable in-frame codon.
/// Stop codons and unknown codons are skipped; 0 when nothing scores.
pub fn calculate_cai(seq: &str, organism: Organism, frame: usize) -> f64 {
    let normalized = normalize_dna(seq);
    let usage = CodonUsage::for_organism(organism);
    let table = CodonTable::standard();
    let bases: Vec<char> = normalized.chars().collect();

    let mut log_sum = 0.0;
    let mut scored = 0usize;
    let mut i = frame.min(3);
    while i + 3 <= bases.len() {
        let codon: String = bases[i..i + 3].iter().collect();
        i += 3;
        let aa = table.translate_codon(&codon);
        if aa == 'X' || aa == '*' {
            continue;
        }
        let (freq, max) = match (usage.frequency(&codon), usage.max_frequency(aa)) {
            (Some(f), Some(m)) if f > 0.0 && m > 0.0 => (f, m),
            _ => continue,
        };
        log_sum += (freq / max).ln();
        scored += 1;
    }

    if scored == 0 {
        return 0.0;
    }
    (log_sum / scored as f64).exp()
}
