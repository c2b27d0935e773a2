//! End-to-end flow: analyze a small plasmid, digest it, religate the
//! fragments, and re-annotate the product.

use seqlab_analysis::{analyze_sequence, annotate_features, AnalysisOptions};
use seqlab_core::feature::FeatureType;
use seqlab_core::ligate::{ligate, LigationFragment};
use seqlab_core::record::Topology;
use seqlab_core::restriction::restriction_digest;

// 60 bp circular toy plasmid with one EcoRI and one BamHI site.
const PLASMID: &str = "AAACCCGAATTCTTTAAACCCTTTAAAGGATCCTTTAAACCCTTTAAACCCTTTAAATTT";

#[test]
fn test_circular_double_digest_scenario() {
    let fragments = restriction_digest(PLASMID, &["EcoRI", "BamHI"], Topology::Circular);

    assert_eq!(fragments.len(), 2);
    let total: usize = fragments.iter().map(|f| f.length).sum();
    assert_eq!(total, PLASMID.len());

    let forward = fragments
        .iter()
        .find(|f| f.left_enzyme.as_deref() == Some("EcoRI"))
        .expect("EcoRI-left fragment missing");
    assert_eq!(forward.right_enzyme.as_deref(), Some("BamHI"));

    let wrapping = fragments
        .iter()
        .find(|f| f.left_enzyme.as_deref() == Some("BamHI"))
        .expect("BamHI-left fragment missing");
    assert_eq!(wrapping.right_enzyme.as_deref(), Some("EcoRI"));
    assert!(wrapping.end_in_original < wrapping.start_in_original);
}

#[test]
fn test_religation_restores_length() {
    let fragments = restriction_digest(PLASMID, &["EcoRI", "BamHI"], Topology::Circular);
    let inputs: Vec<LigationFragment> = fragments
        .iter()
        .map(|f| LigationFragment::new(f.sequence.clone()))
        .collect();
    let product = ligate(&inputs, None);
    assert_eq!(product.sequence.len(), PLASMID.len());
}

#[test]
fn test_analysis_and_annotation_agree() {
    let options = AnalysisOptions {
        enzymes: Some(vec!["EcoRI".into(), "BamHI".into()]),
        ..Default::default()
    };
    let analysis = analyze_sequence(PLASMID, &options);
    assert_eq!(analysis.length, PLASMID.len());
    assert_eq!(analysis.restriction_sites.len(), 2);

    let features = annotate_features(PLASMID, &options);
    let site_features: Vec<_> = features
        .iter()
        .filter(|f| f.feature_type == FeatureType::RestrictionSite)
        .collect();
    assert_eq!(site_features.len(), analysis.restriction_sites.len());
    for (feature, site) in site_features.iter().zip(&analysis.restriction_sites) {
        assert_eq!(feature.name, site.enzyme);
        assert_eq!(feature.start, site.position);
    }
}
