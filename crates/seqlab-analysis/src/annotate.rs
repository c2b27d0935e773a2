use uuid::Uuid;

use seqlab_core::feature::{Feature, FeatureType, Strand};

use crate::analysis::{analyze_sequence, AnalysisOptions};

/// Turn analysis results into a feature list, minting IDs from the caller's
/// generator. Hosts that need reproducible or namespaced identifiers inject
/// their own; everyone else uses [`annotate_features`].
pub fn annotate_features_with<F>(
    seq: &str,
    options: &AnalysisOptions,
    mut next_id: F,
) -> Vec<Feature>
where
    F: FnMut() -> Uuid,
{
    let analysis = analyze_sequence(seq, options);
    let mut features = Vec::new();

    for (n, orf) in analysis.orfs.iter().enumerate() {
        let mut feature = Feature {
            id: next_id(),
            name: format!("ORF {}", n + 1),
            feature_type: FeatureType::Orf,
            start: orf.start,
            end: orf.end,
            strand: orf.strand,
            color: None,
            qualifiers: Vec::new(),
        };
        feature.add_qualifier("frame", orf.frame.to_string());
        feature.add_qualifier("translation", orf.amino_acids.clone());
        features.push(feature);
    }

    for site in &analysis.restriction_sites {
        let mut feature = Feature {
            id: next_id(),
            name: site.enzyme.clone(),
            feature_type: FeatureType::RestrictionSite,
            start: site.position,
            end: site.position + site.recognition_sequence.len(),
            strand: Strand::Forward,
            color: None,
            qualifiers: Vec::new(),
        };
        feature.add_qualifier("cut_position", site.cut_position.to_string());
        features.push(feature);
    }

    features.sort_by_key(|f| (f.start, f.end));
    features
}

/// [`annotate_features_with`] under stateless v4 identifiers.
pub fn annotate_features(seq: &str, options: &AnalysisOptions) -> Vec<Feature> {
    annotate_features_with(seq, options, Uuid::new_v4)
}
