use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    Gene,
    Cds,
    Promoter,
    Terminator,
    MiscFeature,
    Origin,
    PrimerBind,
    Orf,
    Rbs,
    Resistance,
    RestrictionSite,
    #[serde(other)]
    Custom,
}

impl FeatureType {
    pub fn from_genbank_key(key: &str) -> Self {
        match key.to_lowercase().as_str() {
            "gene" => FeatureType::Gene,
            "cds" => FeatureType::Cds,
            "promoter" => FeatureType::Promoter,
            "terminator" => FeatureType::Terminator,
            "rep_origin" | "ori" | "origin" => FeatureType::Origin,
            "primer_bind" | "primer" => FeatureType::PrimerBind,
            "orf" => FeatureType::Orf,
            "rbs" | "ribosome_binding_site" => FeatureType::Rbs,
            "protein_bind" => FeatureType::MiscFeature,
            "misc_feature" | "misc_binding" | "misc_difference" | "misc_recomb"
            | "misc_structure" | "misc_signal" => FeatureType::MiscFeature,
            _ => FeatureType::Custom,
        }
    }

    pub fn to_genbank_key(&self) -> &'static str {
        match self {
            FeatureType::Gene => "gene",
            FeatureType::Cds => "CDS",
            FeatureType::Promoter => "promoter",
            FeatureType::Terminator => "terminator",
            FeatureType::MiscFeature => "misc_feature",
            FeatureType::Origin => "rep_origin",
            FeatureType::PrimerBind => "primer_bind",
            FeatureType::Orf => "misc_feature",
            FeatureType::Rbs => "RBS",
            FeatureType::Resistance => "CDS",
            FeatureType::RestrictionSite => "misc_feature",
            FeatureType::Custom => "misc_feature",
        }
    }

    pub fn default_color(&self) -> &'static str {
        match self {
            FeatureType::Gene => "#60a5fa",
            FeatureType::Cds => "#5b9cf5",
            FeatureType::Promoter => "#2dd4a8",
            FeatureType::Terminator => "#ef6b6b",
            FeatureType::Origin => "#f0b429",
            FeatureType::PrimerBind => "#f472b6",
            FeatureType::Orf => "#34d399",
            FeatureType::Rbs => "#67e8f9",
            FeatureType::Resistance => "#a78bfa",
            FeatureType::RestrictionSite => "#fb923c",
            _ => "#9a9ba3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn as_i8(&self) -> i8 {
        match self {
            Strand::Forward => 1,
            Strand::Reverse => -1,
        }
    }

    pub fn from_i8(v: i8) -> Self {
        if v < 0 {
            Strand::Reverse
        } else {
            Strand::Forward
        }
    }
}

/// One key/value entry of a feature's open metadata map. GenBank qualifiers
/// land here unchanged; algorithms append their own entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualifier {
    pub key: String,
    pub value: String,
}

/// An annotated region of a sequence.
///
/// Coordinates are 0-based, half-open. On circular sequences a feature with
/// `start > end` wraps through the origin by convention; the algorithms in
/// this crate never emit wrapped features themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub id: Uuid,
    pub name: String,
    pub feature_type: FeatureType,
    pub start: usize,
    pub end: usize,
    pub strand: Strand,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub qualifiers: Vec<Qualifier>,
}

impl Feature {
    pub fn new(
        name: impl Into<String>,
        feature_type: FeatureType,
        start: usize,
        end: usize,
        strand: Strand,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            feature_type,
            start,
            end,
            strand,
            color: None,
            qualifiers: Vec::new(),
        }
    }

    /// Length in bases for a non-wrapping feature.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn effective_color(&self) -> &str {
        self.color
            .as_deref()
            .unwrap_or_else(|| self.feature_type.default_color())
    }

    pub fn get_qualifier(&self, key: &str) -> Option<&str> {
        self.qualifiers
            .iter()
            .find(|q| q.key == key)
            .map(|q| q.value.as_str())
    }

    pub fn add_qualifier(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.qualifiers.push(Qualifier {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Clone under a fresh identifier with coordinates shifted by `offset`.
    /// Used when fragments are joined and their annotations carried over.
    pub fn cloned_shifted(&self, offset: usize) -> Self {
        let mut copy = self.clone();
        copy.id = Uuid::new_v4();
        copy.start += offset;
        copy.end += offset;
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_type_from_genbank() {
        assert_eq!(FeatureType::from_genbank_key("CDS"), FeatureType::Cds);
        assert_eq!(
            FeatureType::from_genbank_key("promoter"),
            FeatureType::Promoter
        );
        assert_eq!(
            FeatureType::from_genbank_key("rep_origin"),
            FeatureType::Origin
        );
        assert_eq!(
            FeatureType::from_genbank_key("unknown_type"),
            FeatureType::Custom
        );
    }

    #[test]
    fn test_strand_conversion() {
        assert_eq!(Strand::Forward.as_i8(), 1);
        assert_eq!(Strand::Reverse.as_i8(), -1);
        assert_eq!(Strand::from_i8(-1), Strand::Reverse);
        assert_eq!(Strand::from_i8(1), Strand::Forward);
    }

    #[test]
    fn test_feature_creation() {
        let f = Feature::new("GFP", FeatureType::Cds, 100, 800, Strand::Forward);
        assert_eq!(f.name, "GFP");
        assert_eq!(f.len(), 700);
        assert_eq!(f.effective_color(), "#5b9cf5");
    }

    #[test]
    fn test_cloned_shifted() {
        let f = Feature::new("ori", FeatureType::Origin, 10, 50, Strand::Forward);
        let moved = f.cloned_shifted(100);
        assert_eq!(moved.start, 110);
        assert_eq!(moved.end, 150);
        assert_ne!(moved.id, f.id);
        assert_eq!(moved.name, f.name);
    }

    #[test]
    fn test_qualifiers() {
        let mut f = Feature::new("tag", FeatureType::MiscFeature, 0, 6, Strand::Forward);
        f.add_qualifier("note", "6xHis");
        assert_eq!(f.get_qualifier("note"), Some("6xHis"));
        assert_eq!(f.get_qualifier("gene"), None);
    }
}
