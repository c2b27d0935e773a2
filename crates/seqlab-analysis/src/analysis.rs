use serde::{Deserialize, Serialize};

use seqlab_core::codon::CodonTable;
use seqlab_core::compose::{
    at_content, gc_content, melting_temperature, molecular_weight, nucleotide_composition,
    NucleotideComposition,
};
use seqlab_core::orf::{find_orfs, Orf, DEFAULT_MIN_AMINO_ACIDS};
use seqlab_core::restriction::{find_all_sites, RestrictionSite, ENZYME_DATABASE};

/// Knobs for the combined analysis. `enzymes` of `None` scans the whole
/// database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub min_orf_amino_acids: usize,
    #[serde(default)]
    pub enzymes: Option<Vec<String>>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            min_orf_amino_acids: DEFAULT_MIN_AMINO_ACIDS,
            enzymes: None,
        }
    }
}

/// Everything the workspace shows for a sequence in one object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceAnalysis {
    pub length: usize,
    pub gc_content: f64,
    pub at_content: f64,
    pub molecular_weight: f64,
    pub melting_temp: Option<f64>,
    pub composition: NucleotideComposition,
    pub orfs: Vec<Orf>,
    pub restriction_sites: Vec<RestrictionSite>,
}

/// Run composition, ORF and restriction analysis over one sequence.
pub fn analyze_sequence(seq: &str, options: &AnalysisOptions) -> SequenceAnalysis {
    let enzyme_names: Vec<&str> = match &options.enzymes {
        Some(names) => names.iter().map(String::as_str).collect(),
        None => ENZYME_DATABASE.iter().map(|e| e.name).collect(),
    };

    SequenceAnalysis {
        length: seq.len(),
        gc_content: gc_content(seq),
        at_content: at_content(seq),
        molecular_weight: molecular_weight(seq),
        melting_temp: melting_temperature(seq),
        composition: nucleotide_composition(seq),
        orfs: find_orfs(seq, CodonTable::standard(), options.min_orf_amino_acids),
        restriction_sites: find_all_sites(seq, &enzyme_names),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sequence_neutral_result() {
        let analysis = analyze_sequence("", &AnalysisOptions::default());
        assert_eq!(analysis.length, 0);
        assert_eq!(analysis.gc_content, 0.0);
        assert_eq!(analysis.molecular_weight, 0.0);
        assert_eq!(analysis.melting_temp, None);
        assert!(analysis.orfs.is_empty());
        assert!(analysis.restriction_sites.is_empty());
    }

    #[test]
    fn test_analysis_fields_consistent() {
        let seq = "AAAGAATTCAAAGGATCCAAA";
        let analysis = analyze_sequence(seq, &AnalysisOptions::default());
        assert_eq!(analysis.length, seq.len());
        assert!((analysis.gc_content + analysis.at_content - 1.0).abs() < 1e-9);
        let enzymes: Vec<&str> = analysis
            .restriction_sites
            .iter()
            .map(|s| s.enzyme.as_str())
            .collect();
        assert!(enzymes.contains(&"EcoRI"));
        assert!(enzymes.contains(&"BamHI"));
    }

    #[test]
    fn test_enzyme_selection_restricts_scan() {
        let seq = "AAAGAATTCAAAGGATCCAAA";
        let options = AnalysisOptions {
            enzymes: Some(vec!["EcoRI".to_string()]),
            ..Default::default()
        };
        let analysis = analyze_sequence(seq, &options);
        assert!(analysis
            .restriction_sites
            .iter()
            .all(|s| s.enzyme == "EcoRI"));
    }
}
