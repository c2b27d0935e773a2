use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// A genetic-code table: 64 codons, plus explicit start and stop sets.
pub struct CodonTable {
    pub name: String,
    pub id: u8,
    table: HashMap<String, char>,
    start_codons: Vec<String>,
    stop_codons: Vec<String>,
}

impl CodonTable {
    /// Standard genetic code (NCBI table 1).
    pub fn standard() -> &'static Self {
        static STANDARD: OnceLock<CodonTable> = OnceLock::new();
        STANDARD.get_or_init(|| {
            let codons = [
                ("TTT", 'F'), ("TTC", 'F'), ("TTA", 'L'), ("TTG", 'L'),
                ("CTT", 'L'), ("CTC", 'L'), ("CTA", 'L'), ("CTG", 'L'),
                ("ATT", 'I'), ("ATC", 'I'), ("ATA", 'I'), ("ATG", 'M'),
                ("GTT", 'V'), ("GTC", 'V'), ("GTA", 'V'), ("GTG", 'V'),
                ("TCT", 'S'), ("TCC", 'S'), ("TCA", 'S'), ("TCG", 'S'),
                ("CCT", 'P'), ("CCC", 'P'), ("CCA", 'P'), ("CCG", 'P'),
                ("ACT", 'T'), ("ACC", 'T'), ("ACA", 'T'), ("ACG", 'T'),
                ("GCT", 'A'), ("GCC", 'A'), ("GCA", 'A'), ("GCG", 'A'),
                ("TAT", 'Y'), ("TAC", 'Y'), ("TAA", '*'), ("TAG", '*'),
                ("CAT", 'H'), ("CAC", 'H'), ("CAA", 'Q'), ("CAG", 'Q'),
                ("AAT", 'N'), ("AAC", 'N'), ("AAA", 'K'), ("AAG", 'K'),
                ("GAT", 'D'), ("GAC", 'D'), ("GAA", 'E'), ("GAG", 'E'),
                ("TGT", 'C'), ("TGC", 'C'), ("TGA", '*'), ("TGG", 'W'),
                ("CGT", 'R'), ("CGC", 'R'), ("CGA", 'R'), ("CGG", 'R'),
                ("AGT", 'S'), ("AGC", 'S'), ("AGA", 'R'), ("AGG", 'R'),
                ("GGT", 'G'), ("GGC", 'G'), ("GGA", 'G'), ("GGG", 'G'),
            ];
            let mut table = HashMap::new();
            for (codon, aa) in &codons {
                table.insert(codon.to_string(), *aa);
            }
            CodonTable {
                name: "Standard".to_string(),
                id: 1,
                table,
                start_codons: vec!["ATG".into(), "GTG".into(), "TTG".into()],
                stop_codons: vec!["TAA".into(), "TAG".into(), "TGA".into()],
            }
        })
    }

    /// Translate a single codon; unknown codons yield `X`.
    pub fn translate_codon(&self, codon: &str) -> char {
        self.table
            .get(&codon.to_uppercase())
            .copied()
            .unwrap_or('X')
    }

    pub fn is_start_codon(&self, codon: &str) -> bool {
        self.start_codons.contains(&codon.to_uppercase())
    }

    pub fn is_stop_codon(&self, codon: &str) -> bool {
        self.stop_codons.contains(&codon.to_uppercase())
    }

    pub fn start_codons(&self) -> &[String] {
        &self.start_codons
    }

    pub fn stop_codons(&self) -> &[String] {
        &self.stop_codons
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Organism {
    Ecoli,
    Human,
    Yeast,
}

impl Organism {
    pub fn display_name(&self) -> &'static str {
        match self {
            Organism::Ecoli => "Escherichia coli K-12",
            Organism::Human => "Homo sapiens",
            Organism::Yeast => "Saccharomyces cerevisiae",
        }
    }
}

/// One codon option for a residue, with its usage frequency within the
/// residue's synonymous family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodonChoice {
    pub codon: String,
    pub frequency: f64,
}

/// Per-organism codon usage. Rankings are derived once at construction;
/// the tables themselves are immutable literals.
pub struct CodonUsage {
    pub organism: Organism,
    // Residue -> codons sorted by descending frequency.
    ranked: HashMap<char, Vec<CodonChoice>>,
    // Codon -> (residue, frequency) for direct lookup.
    by_codon: HashMap<String, (char, f64)>,
}

impl CodonUsage {
    pub fn for_organism(organism: Organism) -> &'static Self {
        static ECOLI: OnceLock<CodonUsage> = OnceLock::new();
        static HUMAN: OnceLock<CodonUsage> = OnceLock::new();
        static YEAST: OnceLock<CodonUsage> = OnceLock::new();
        match organism {
            Organism::Ecoli => ECOLI.get_or_init(|| Self::build(organism, ECOLI_USAGE)),
            Organism::Human => HUMAN.get_or_init(|| Self::build(organism, HUMAN_USAGE)),
            Organism::Yeast => YEAST.get_or_init(|| Self::build(organism, YEAST_USAGE)),
        }
    }

    fn build(organism: Organism, raw: &[(char, &str, f64)]) -> Self {
        let mut ranked: HashMap<char, Vec<CodonChoice>> = HashMap::new();
        let mut by_codon = HashMap::new();
        for &(aa, codon, frequency) in raw {
            ranked.entry(aa).or_default().push(CodonChoice {
                codon: codon.to_string(),
                frequency,
            });
            by_codon.insert(codon.to_string(), (aa, frequency));
        }
        for choices in ranked.values_mut() {
            choices.sort_by(|a, b| b.frequency.total_cmp(&a.frequency));
        }
        Self {
            organism,
            ranked,
            by_codon,
        }
    }

    /// The highest-frequency codon for a residue.
    pub fn best_codon(&self, aa: char) -> Option<&str> {
        self.ranked
            .get(&aa.to_ascii_uppercase())
            .and_then(|v| v.first())
            .map(|c| c.codon.as_str())
    }

    /// All codons for a residue, best first.
    pub fn ranked_codons(&self, aa: char) -> Option<&[CodonChoice]> {
        self.ranked
            .get(&aa.to_ascii_uppercase())
            .map(|v| v.as_slice())
    }

    /// Usage frequency of a codon within its synonymous family.
    pub fn frequency(&self, codon: &str) -> Option<f64> {
        self.by_codon.get(&codon.to_uppercase()).map(|&(_, f)| f)
    }

    /// The residue a codon encodes, per this usage table.
    pub fn residue(&self, codon: &str) -> Option<char> {
        self.by_codon.get(&codon.to_uppercase()).map(|&(aa, _)| aa)
    }

    /// Maximum frequency within a residue's family, the CAI reference.
    pub fn max_frequency(&self, aa: char) -> Option<f64> {
        self.ranked
            .get(&aa.to_ascii_uppercase())
            .and_then(|v| v.first())
            .map(|c| c.frequency)
    }
}

// Usage fractions within each synonymous family (Kazusa-style tables,
// rounded to two decimals).

const ECOLI_USAGE: &[(char, &str, f64)] = &[
    ('F', "TTT", 0.57), ('F', "TTC", 0.43),
    ('L', "TTA", 0.13), ('L', "TTG", 0.13), ('L', "CTT", 0.10),
    ('L', "CTC", 0.10), ('L', "CTA", 0.04), ('L', "CTG", 0.50),
    ('I', "ATT", 0.51), ('I', "ATC", 0.42), ('I', "ATA", 0.07),
    ('M', "ATG", 1.00),
    ('V', "GTT", 0.26), ('V', "GTC", 0.22), ('V', "GTA", 0.15), ('V', "GTG", 0.37),
    ('S', "TCT", 0.15), ('S', "TCC", 0.15), ('S', "TCA", 0.12),
    ('S', "TCG", 0.15), ('S', "AGT", 0.15), ('S', "AGC", 0.28),
    ('P', "CCT", 0.16), ('P', "CCC", 0.12), ('P', "CCA", 0.19), ('P', "CCG", 0.53),
    ('T', "ACT", 0.17), ('T', "ACC", 0.44), ('T', "ACA", 0.13), ('T', "ACG", 0.26),
    ('A', "GCT", 0.16), ('A', "GCC", 0.27), ('A', "GCA", 0.21), ('A', "GCG", 0.36),
    ('Y', "TAT", 0.57), ('Y', "TAC", 0.43),
    ('H', "CAT", 0.57), ('H', "CAC", 0.43),
    ('Q', "CAA", 0.35), ('Q', "CAG", 0.65),
    ('N', "AAT", 0.45), ('N', "AAC", 0.55),
    ('K', "AAA", 0.77), ('K', "AAG", 0.23),
    ('D', "GAT", 0.63), ('D', "GAC", 0.37),
    ('E', "GAA", 0.69), ('E', "GAG", 0.31),
    ('C', "TGT", 0.45), ('C', "TGC", 0.55),
    ('W', "TGG", 1.00),
    ('R', "CGT", 0.38), ('R', "CGC", 0.40), ('R', "CGA", 0.06),
    ('R', "CGG", 0.10), ('R', "AGA", 0.04), ('R', "AGG", 0.02),
    ('G', "GGT", 0.34), ('G', "GGC", 0.40), ('G', "GGA", 0.11), ('G', "GGG", 0.15),
    ('*', "TAA", 0.64), ('*', "TAG", 0.07), ('*', "TGA", 0.29),
];

const HUMAN_USAGE: &[(char, &str, f64)] = &[
    ('F', "TTT", 0.46), ('F', "TTC", 0.54),
    ('L', "TTA", 0.08), ('L', "TTG", 0.13), ('L', "CTT", 0.13),
    ('L', "CTC", 0.20), ('L', "CTA", 0.07), ('L', "CTG", 0.40),
    ('I', "ATT", 0.36), ('I', "ATC", 0.47), ('I', "ATA", 0.17),
    ('M', "ATG", 1.00),
    ('V', "GTT", 0.18), ('V', "GTC", 0.24), ('V', "GTA", 0.12), ('V', "GTG", 0.46),
    ('S', "TCT", 0.19), ('S', "TCC", 0.22), ('S', "TCA", 0.15),
    ('S', "TCG", 0.05), ('S', "AGT", 0.15), ('S', "AGC", 0.24),
    ('P', "CCT", 0.29), ('P', "CCC", 0.32), ('P', "CCA", 0.28), ('P', "CCG", 0.11),
    ('T', "ACT", 0.25), ('T', "ACC", 0.36), ('T', "ACA", 0.28), ('T', "ACG", 0.11),
    ('A', "GCT", 0.27), ('A', "GCC", 0.40), ('A', "GCA", 0.23), ('A', "GCG", 0.11),
    ('Y', "TAT", 0.44), ('Y', "TAC", 0.56),
    ('H', "CAT", 0.42), ('H', "CAC", 0.58),
    ('Q', "CAA", 0.27), ('Q', "CAG", 0.73),
    ('N', "AAT", 0.47), ('N', "AAC", 0.53),
    ('K', "AAA", 0.43), ('K', "AAG", 0.57),
    ('D', "GAT", 0.46), ('D', "GAC", 0.54),
    ('E', "GAA", 0.42), ('E', "GAG", 0.58),
    ('C', "TGT", 0.46), ('C', "TGC", 0.54),
    ('W', "TGG", 1.00),
    ('R', "CGT", 0.08), ('R', "CGC", 0.18), ('R', "CGA", 0.11),
    ('R', "CGG", 0.20), ('R', "AGA", 0.21), ('R', "AGG", 0.21),
    ('G', "GGT", 0.16), ('G', "GGC", 0.34), ('G', "GGA", 0.25), ('G', "GGG", 0.25),
    ('*', "TAA", 0.30), ('*', "TAG", 0.24), ('*', "TGA", 0.47),
];

const YEAST_USAGE: &[(char, &str, f64)] = &[
    ('F', "TTT", 0.59), ('F', "TTC", 0.41),
    ('L', "TTA", 0.28), ('L', "TTG", 0.29), ('L', "CTT", 0.13),
    ('L', "CTC", 0.06), ('L', "CTA", 0.14), ('L', "CTG", 0.11),
    ('I', "ATT", 0.46), ('I', "ATC", 0.26), ('I', "ATA", 0.27),
    ('M', "ATG", 1.00),
    ('V', "GTT", 0.39), ('V', "GTC", 0.21), ('V', "GTA", 0.21), ('V', "GTG", 0.19),
    ('S', "TCT", 0.26), ('S', "TCC", 0.16), ('S', "TCA", 0.21),
    ('S', "TCG", 0.10), ('S', "AGT", 0.16), ('S', "AGC", 0.11),
    ('P', "CCT", 0.31), ('P', "CCC", 0.15), ('P', "CCA", 0.42), ('P', "CCG", 0.12),
    ('T', "ACT", 0.35), ('T', "ACC", 0.22), ('T', "ACA", 0.30), ('T', "ACG", 0.14),
    ('A', "GCT", 0.38), ('A', "GCC", 0.22), ('A', "GCA", 0.29), ('A', "GCG", 0.11),
    ('Y', "TAT", 0.56), ('Y', "TAC", 0.44),
    ('H', "CAT", 0.64), ('H', "CAC", 0.36),
    ('Q', "CAA", 0.69), ('Q', "CAG", 0.31),
    ('N', "AAT", 0.59), ('N', "AAC", 0.41),
    ('K', "AAA", 0.58), ('K', "AAG", 0.42),
    ('D', "GAT", 0.65), ('D', "GAC", 0.35),
    ('E', "GAA", 0.70), ('E', "GAG", 0.30),
    ('C', "TGT", 0.63), ('C', "TGC", 0.37),
    ('W', "TGG", 1.00),
    ('R', "CGT", 0.14), ('R', "CGC", 0.06), ('R', "CGA", 0.07),
    ('R', "CGG", 0.04), ('R', "AGA", 0.48), ('R', "AGG", 0.21),
    ('G', "GGT", 0.47), ('G', "GGC", 0.19), ('G', "GGA", 0.22), ('G', "GGG", 0.12),
    ('*', "TAA", 0.47), ('*', "TAG", 0.23), ('*', "TGA", 0.30),
];
