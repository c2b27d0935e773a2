use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::feature::Feature;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    Linear,
    Circular,
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Topology::Linear => write!(f, "linear"),
            Topology::Circular => write!(f, "circular"),
        }
    }
}

/// Header-level metadata carried through from flat-file formats.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordMetadata {
    #[serde(default)]
    pub accession: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub molecule_type: Option<String>,
    #[serde(default)]
    pub division: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub organism: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
}

/// A sequence with its annotations, as produced by the parsers and consumed
/// by every algorithm that needs topology or feature context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub topology: Topology,
    pub sequence: String,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub metadata: RecordMetadata,
}

impl SequenceRecord {
    pub fn new(name: impl Into<String>, sequence: impl Into<String>, topology: Topology) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            topology,
            sequence: sequence.into().to_uppercase(),
            features: Vec::new(),
            metadata: RecordMetadata::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn is_circular(&self) -> bool {
        self.topology == Topology::Circular
    }

    /// Get a subsequence; `start > end` wraps through the origin on a
    /// circular record and yields nothing on a linear one.
    pub fn subsequence(&self, start: usize, end: usize) -> String {
        if start <= end {
            self.sequence[start..end].to_string()
        } else if self.is_circular() {
            let mut result = self.sequence[start..].to_string();
            result.push_str(&self.sequence[..end]);
            result
        } else {
            String::new()
        }
    }

    pub fn add_feature(&mut self, feature: Feature) {
        self.features.push(feature);
    }
}
