use serde::{Deserialize, Serialize};

use crate::feature::Feature;

/// One piece of a planned ligation: sequence plus the annotations that
/// should ride along into the product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LigationFragment {
    pub sequence: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl LigationFragment {
    pub fn new(sequence: impl Into<String>) -> Self {
        Self {
            sequence: sequence.into(),
            features: Vec::new(),
        }
    }

    pub fn with_features(sequence: impl Into<String>, features: Vec<Feature>) -> Self {
        Self {
            sequence: sequence.into(),
            features,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LigationProduct {
    pub sequence: String,
    pub features: Vec<Feature>,
}

/// Join fragments in order, placing the uppercased linker between (never
/// before or after) fragments. Carried-over features get fresh IDs and
/// coordinates shifted by their fragment's offset in the product.
pub fn ligate(fragments: &[LigationFragment], linker: Option<&str>) -> LigationProduct {
    let linker = linker.unwrap_or("").to_uppercase();
    let mut sequence = String::new();
    let mut features = Vec::new();

    for (i, fragment) in fragments.iter().enumerate() {
        if i > 0 && !linker.is_empty() {
            sequence.push_str(&linker);
        }
        let offset = sequence.len();
        sequence.push_str(&fragment.sequence.to_uppercase());
        for feature in &fragment.features {
            features.push(feature.cloned_shifted(offset));
        }
    }

    LigationProduct { sequence, features }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{FeatureType, Strand};

    #[test]
    fn test_empty_ligation() {
        let product = ligate(&[], Some("GGATCC"));
        assert_eq!(product.sequence, "");
        assert!(product.features.is_empty());
    }

    #[test]
    fn test_concatenation_without_linker() {
        let product = ligate(
            &[
                LigationFragment::new("AAAA"),
                LigationFragment::new("cccc"),
            ],
            None,
        );
        assert_eq!(product.sequence, "AAAACCCC");
    }

    #[test]
    fn test_linker_between_only() {
        let product = ligate(
            &[
                LigationFragment::new("AAAA"),
                LigationFragment::new("CCCC"),
                LigationFragment::new("TTTT"),
            ],
            Some("gg"),
        );
        assert_eq!(product.sequence, "AAAAGGCCCCGGTTTT");
    }

    #[test]
    fn test_feature_offsets_without_linker() {
        let f1 = Feature::new("a", FeatureType::Gene, 0, 4, Strand::Forward);
        let f2 = Feature::new("b", FeatureType::Gene, 1, 3, Strand::Forward);
        let product = ligate(
            &[
                LigationFragment::with_features("AAAA", vec![f1]),
                LigationFragment::with_features("CCCC", vec![f2]),
            ],
            None,
        );
        assert_eq!(product.features.len(), 2);
        assert_eq!(product.features[0].start, 0);
        assert_eq!(product.features[0].end, 4);
        // Shifted by the first fragment's length only
        assert_eq!(product.features[1].start, 5);
        assert_eq!(product.features[1].end, 7);
    }

    #[test]
    fn test_feature_offsets_include_linker() {
        let f2 = Feature::new("b", FeatureType::Gene, 0, 4, Strand::Forward);
        let product = ligate(
            &[
                LigationFragment::new("AAAA"),
                LigationFragment::with_features("CCCC", vec![f2]),
            ],
            Some("GGATCC"),
        );
        // Second fragment starts after 4 + 6 linker bases
        assert_eq!(product.features[0].start, 10);
        assert_eq!(product.features[0].end, 14);
    }

    #[test]
    fn test_features_get_fresh_ids() {
        let f = Feature::new("a", FeatureType::Gene, 0, 4, Strand::Forward);
        let original_id = f.id;
        let product = ligate(&[LigationFragment::with_features("AAAA", vec![f])], None);
        assert_ne!(product.features[0].id, original_id);
    }
}
