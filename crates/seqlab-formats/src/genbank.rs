use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char as symbol, digit1, multispace0},
    combinator::{map, opt},
    multi::separated_list1,
    sequence::{delimited, preceded, tuple},
    IResult,
};
use uuid::Uuid;

use seqlab_core::feature::{Feature, FeatureType, Qualifier, Strand};
use seqlab_core::record::{SequenceRecord, Topology};

use crate::ParseError;

// ---------------------------------------------------------------------
// Location grammar
// ---------------------------------------------------------------------

/// A collapsed location: outer span of whatever the grammar described,
/// 1-based inclusive until the caller converts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
    reverse: bool,
}

// A position; partial-location markers (`<`, `>`) are tolerated and dropped.
fn position(input: &str) -> IResult<&str, usize> {
    let (input, _) = opt(alt((symbol('<'), symbol('>'))))(input)?;
    let (input, digits) = digit1(input)?;
    Ok((input, digits.parse().unwrap_or(0)))
}

// `start..end`, or a single position standing for a 1-base span.
fn simple_span(input: &str) -> IResult<&str, Span> {
    alt((
        map(tuple((position, tag(".."), position)), |(start, _, end)| Span {
            start,
            end,
            reverse: false,
        }),
        map(position, |p| Span {
            start: p,
            end: p,
            reverse: false,
        }),
    ))(input)
}

fn complement_span(input: &str) -> IResult<&str, Span> {
    let (input, inner) = preceded(
        tag("complement"),
        delimited(symbol('('), location, symbol(')')),
    )(input)?;
    Ok((
        input,
        Span {
            reverse: !inner.reverse,
            ..inner
        },
    ))
}

// `join(...)`/`order(...)` collapse to the outer min/max span.
fn compound_span(input: &str) -> IResult<&str, Span> {
    let (input, parts) = preceded(
        alt((tag("join"), tag("order"))),
        delimited(
            symbol('('),
            separated_list1(tuple((symbol(','), multispace0)), location),
            symbol(')'),
        ),
    )(input)?;
    let start = parts.iter().map(|s| s.start).min().unwrap_or(0);
    let end = parts.iter().map(|s| s.end).max().unwrap_or(0);
    let reverse = parts.iter().any(|s| s.reverse);
    Ok((input, Span { start, end, reverse }))
}

fn location(input: &str) -> IResult<&str, Span> {
    alt((complement_span, compound_span, simple_span))(input)
}

/// Parse a location string into 0-based half-open coordinates and a strand.
/// An unreadable location degrades to an empty span at the origin.
fn parse_location(loc: &str) -> (usize, usize, Strand) {
    match location(loc.trim()) {
        Ok((_, span)) => {
            let strand = if span.reverse {
                Strand::Reverse
            } else {
                Strand::Forward
            };
            (span.start.saturating_sub(1), span.end, strand)
        }
        Err(_) => (0, 0, Strand::Forward),
    }
}

// ---------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------

/// Parse a GenBank flat file into a single record.
pub fn parse(input: &str) -> Result<SequenceRecord, ParseError> {
    if !input.trim_start().starts_with("LOCUS") {
        return Err(ParseError::InvalidFormat(
            "GenBank input must begin with a LOCUS line".to_string(),
        ));
    }

    let lines: Vec<&str> = input.lines().collect();
    let mut record = SequenceRecord::new("", "", Topology::Linear);
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if line.starts_with("LOCUS") {
            parse_locus(line, &mut record);
            i += 1;
        } else if line.starts_with("DEFINITION") {
            let def = read_field(&lines, &mut i);
            let def = def.trim_end_matches('.').to_string();
            record.description = def.clone();
            record.metadata.definition = Some(def);
        } else if line.starts_with("ACCESSION") {
            record.metadata.accession = Some(field_value(line));
            i += 1;
        } else if line.starts_with("KEYWORDS") {
            record.metadata.keywords = Some(field_value(line));
            i += 1;
        } else if line.starts_with("SOURCE") {
            record.metadata.source = Some(field_value(line));
            i += 1;
            if i < lines.len() {
                let next = lines[i].trim_start();
                if let Some(organism) = next.strip_prefix("ORGANISM") {
                    record.metadata.organism = Some(organism.trim().to_string());
                    i += 1;
                }
            }
        } else if line.starts_with("FEATURES") {
            i += 1;
            parse_features(&lines, &mut i, &mut record.features);
        } else if line.starts_with("ORIGIN") {
            i += 1;
            record.sequence = parse_origin(&lines, &mut i);
        } else {
            i += 1;
        }
    }

    Ok(record)
}

/// LOCUS       name    length bp    type    topology    division    date
fn parse_locus(line: &str, record: &mut SequenceRecord) {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() >= 2 {
        record.name = parts[1].to_string();
    }
    for part in parts.iter().skip(2) {
        let lower = part.to_lowercase();
        if lower == "circular" {
            record.topology = Topology::Circular;
        } else if lower == "linear" {
            record.topology = Topology::Linear;
        } else if lower.contains("dna") || lower.contains("rna") {
            record.metadata.molecule_type = Some(part.to_string());
        } else if part.len() == 3 && part.chars().all(|c| c.is_ascii_uppercase()) {
            record.metadata.division = Some(part.to_string());
        } else if part.len() >= 9 && part.contains('-') {
            record.metadata.date = Some(part.to_string());
        }
    }
}

/// Everything after the 12-column field label on one line.
fn field_value(line: &str) -> String {
    line.get(12..).unwrap_or("").trim().to_string()
}

/// A field value plus its indented continuation lines, joined with spaces.
/// Leaves the cursor on the first non-continuation line.
fn read_field(lines: &[&str], i: &mut usize) -> String {
    let mut value = field_value(lines[*i]);
    *i += 1;
    while *i < lines.len() && lines[*i].starts_with("            ") {
        value.push(' ');
        value.push_str(lines[*i].trim());
        *i += 1;
    }
    value
}

const QUALIFIER_INDENT: &str = "                     ";

fn parse_features(lines: &[&str], i: &mut usize, features: &mut Vec<Feature>) {
    while *i < lines.len() {
        let line = lines[*i];

        if line.starts_with("ORIGIN") || line.starts_with("//") || line.starts_with("CONTIG") {
            break;
        }
        // Any new top-level section ends the block
        if line.starts_with(char::is_alphabetic) {
            break;
        }

        let is_key_line = line.len() >= 21
            && line.starts_with("     ")
            && line.as_bytes().get(5).is_some_and(|b| *b != b' ');
        if !is_key_line {
            *i += 1;
            continue;
        }

        let key = line[5..21].trim().to_string();
        let mut location_str = line[21..].trim().to_string();
        *i += 1;

        // Location continuation lines
        while *i < lines.len()
            && lines[*i].starts_with(QUALIFIER_INDENT)
            && !lines[*i][21..].trim_start().starts_with('/')
        {
            location_str.push_str(lines[*i][21..].trim());
            *i += 1;
        }

        let qualifiers = parse_qualifiers(lines, i);
        features.push(build_feature(&key, &location_str, qualifiers));
    }
}

fn parse_qualifiers(lines: &[&str], i: &mut usize) -> Vec<Qualifier> {
    let mut qualifiers = Vec::new();
    while *i < lines.len()
        && lines[*i].starts_with(QUALIFIER_INDENT)
        && lines[*i][21..].trim_start().starts_with('/')
    {
        let content = &lines[*i][21..].trim()[1..];
        match content.find('=') {
            Some(eq) => {
                let key = content[..eq].to_string();
                let mut value = content[eq + 1..].to_string();
                *i += 1;
                while *i < lines.len()
                    && lines[*i].starts_with(QUALIFIER_INDENT)
                    && !lines[*i][21..].trim_start().starts_with('/')
                {
                    value.push(' ');
                    value.push_str(lines[*i][21..].trim());
                    *i += 1;
                }
                qualifiers.push(Qualifier {
                    key,
                    value: value.trim_matches('"').to_string(),
                });
            }
            None => {
                // Flag qualifier without a value
                qualifiers.push(Qualifier {
                    key: content.to_string(),
                    value: String::new(),
                });
                *i += 1;
            }
        }
    }
    qualifiers
}

fn build_feature(key: &str, location_str: &str, qualifiers: Vec<Qualifier>) -> Feature {
    let (start, end, strand) = parse_location(location_str);

    let name = ["label", "gene", "product", "note"]
        .iter()
        .find_map(|k| qualifiers.iter().find(|q| q.key == *k))
        .map(|q| q.value.clone())
        .unwrap_or_else(|| key.to_string());

    let color = qualifiers
        .iter()
        .find(|q| q.key == "ApEinfo_fwdcolor" || q.key == "color")
        .map(|q| q.value.clone());

    Feature {
        id: Uuid::new_v4(),
        name,
        feature_type: FeatureType::from_genbank_key(key),
        start,
        end,
        strand,
        color,
        qualifiers,
    }
}

fn parse_origin(lines: &[&str], i: &mut usize) -> String {
    let mut seq = String::new();
    while *i < lines.len() {
        let line = lines[*i];
        if line.starts_with("//") {
            break;
        }
        seq.extend(
            line.chars()
                .filter(char::is_ascii_alphabetic)
                .map(|c| c.to_ascii_uppercase()),
        );
        *i += 1;
    }
    seq
}

// ---------------------------------------------------------------------
// Serializer
// ---------------------------------------------------------------------

/// Serialize a record to a GenBank flat file that `parse` round-trips.
pub fn serialize(record: &SequenceRecord) -> String {
    let mut out = String::new();

    let meta = &record.metadata;
    out.push_str(&format!(
        "LOCUS       {:<16} {} bp    {}     {}       {} {}\n",
        record.name,
        record.len(),
        meta.molecule_type.as_deref().unwrap_or("DNA"),
        record.topology,
        meta.division.as_deref().unwrap_or("SYN"),
        meta.date.as_deref().unwrap_or("01-JAN-2026"),
    ));

    if !record.description.is_empty() {
        out.push_str(&format!("DEFINITION  {}.\n", record.description));
    }
    if let Some(accession) = &meta.accession {
        out.push_str(&format!("ACCESSION   {accession}\n"));
    }
    if let Some(keywords) = &meta.keywords {
        out.push_str(&format!("KEYWORDS    {keywords}\n"));
    }
    if let Some(source) = &meta.source {
        out.push_str(&format!("SOURCE      {source}\n"));
        if let Some(organism) = &meta.organism {
            out.push_str(&format!("  ORGANISM  {organism}\n"));
        }
    }

    if !record.features.is_empty() {
        out.push_str("FEATURES             Location/Qualifiers\n");
        for feature in &record.features {
            let key = feature.feature_type.to_genbank_key();
            out.push_str(&format!(
                "     {:<16}{}\n",
                key,
                serialize_location(feature)
            ));

            // The name survives the trip through the label qualifier
            if feature.get_qualifier("label").is_none() {
                out.push_str(&format!("{QUALIFIER_INDENT}/label=\"{}\"\n", feature.name));
            }
            for q in &feature.qualifiers {
                if q.value.is_empty() {
                    out.push_str(&format!("{QUALIFIER_INDENT}/{}\n", q.key));
                } else if q.value.parse::<f64>().is_ok() {
                    out.push_str(&format!("{QUALIFIER_INDENT}/{}={}\n", q.key, q.value));
                } else {
                    out.push_str(&format!("{QUALIFIER_INDENT}/{}=\"{}\"\n", q.key, q.value));
                }
            }
        }
    }

    out.push_str("ORIGIN\n");
    let bases: Vec<char> = record.sequence.to_lowercase().chars().collect();
    for (row, chunk) in bases.chunks(60).enumerate() {
        out.push_str(&format!("{:>9}", row * 60 + 1));
        for group in chunk.chunks(10) {
            out.push(' ');
            out.extend(group);
        }
        out.push('\n');
    }
    out.push_str("//\n");
    out
}

fn serialize_location(feature: &Feature) -> String {
    // Back to 1-based inclusive
    let span = format!("{}..{}", feature.start + 1, feature.end);
    match feature.strand {
        Strand::Reverse => format!("complement({span})"),
        Strand::Forward => span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINI_GENBANK: &str = r#"LOCUS       pMini           100 bp    DNA     circular SYN 01-JAN-2026
DEFINITION  Test plasmid.
ACCESSION   SL000001
KEYWORDS    .
SOURCE      synthetic construct
  ORGANISM  synthetic construct
FEATURES             Location/Qualifiers
     promoter        1..20
                     /label="test promoter"
     CDS             complement(30..90)
                     /label="GFP"
                     /gene="gfp"
                     /codon_start=1
ORIGIN
        1 atcgatcgat cgatcgatcg atcgatcgat cgatcgatcg atcgatcgat
       51 cgatcgatcg atcgatcgat cgatcgatcg atcgatcgat cgatcgatcg
//
"#;

    #[test]
    fn test_parse_basic_fields() {
        let record = parse(MINI_GENBANK).unwrap();
        assert_eq!(record.name, "pMini");
        assert_eq!(record.topology, Topology::Circular);
        assert_eq!(record.len(), 100);
        assert_eq!(record.metadata.accession.as_deref(), Some("SL000001"));
        assert_eq!(
            record.metadata.organism.as_deref(),
            Some("synthetic construct")
        );
        assert_eq!(record.metadata.molecule_type.as_deref(), Some("DNA"));
    }

    #[test]
    fn test_parse_features_and_coordinates() {
        let record = parse(MINI_GENBANK).unwrap();
        assert_eq!(record.features.len(), 2);

        let promoter = &record.features[0];
        assert_eq!(promoter.name, "test promoter");
        assert_eq!(promoter.feature_type, FeatureType::Promoter);
        assert_eq!(promoter.start, 0);
        assert_eq!(promoter.end, 20);
        assert_eq!(promoter.strand, Strand::Forward);

        let cds = &record.features[1];
        assert_eq!(cds.name, "GFP");
        assert_eq!(cds.feature_type, FeatureType::Cds);
        assert_eq!(cds.start, 29);
        assert_eq!(cds.end, 90);
        assert_eq!(cds.strand, Strand::Reverse);
        assert_eq!(cds.get_qualifier("codon_start"), Some("1"));
    }

    #[test]
    fn test_parse_origin_sequence() {
        let record = parse(MINI_GENBANK).unwrap();
        assert!(record.sequence.starts_with("ATCGATCG"));
        assert_eq!(record.len(), 100);
    }

    #[test]
    fn test_non_genbank_rejected() {
        assert!(parse(">fasta\nATGC\n").is_err());
    }

    #[test]
    fn test_roundtrip() {
        let record = parse(MINI_GENBANK).unwrap();
        let reparsed = parse(&serialize(&record)).unwrap();
        assert_eq!(reparsed.name, record.name);
        assert_eq!(reparsed.topology, record.topology);
        assert_eq!(reparsed.sequence, record.sequence);
        assert_eq!(reparsed.features.len(), record.features.len());
        for (a, b) in reparsed.features.iter().zip(&record.features) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.start, b.start);
            assert_eq!(a.end, b.end);
            assert_eq!(a.strand, b.strand);
        }
    }

    #[test]
    fn test_location_simple() {
        assert_eq!(parse_location("100..200"), (99, 200, Strand::Forward));
    }

    #[test]
    fn test_location_single_position() {
        assert_eq!(parse_location("42"), (41, 42, Strand::Forward));
    }

    #[test]
    fn test_location_partial_markers() {
        assert_eq!(parse_location("<100..>200"), (99, 200, Strand::Forward));
    }

    #[test]
    fn test_location_complement() {
        assert_eq!(
            parse_location("complement(100..200)"),
            (99, 200, Strand::Reverse)
        );
    }

    #[test]
    fn test_location_join_collapses() {
        assert_eq!(
            parse_location("join(100..200,300..400)"),
            (99, 400, Strand::Forward)
        );
        assert_eq!(
            parse_location("order(50..60, 10..20)"),
            (9, 60, Strand::Forward)
        );
    }

    #[test]
    fn test_location_nested_complement_join() {
        assert_eq!(
            parse_location("complement(join(100..200,300..400))"),
            (99, 400, Strand::Reverse)
        );
    }

    #[test]
    fn test_location_garbage_degrades() {
        assert_eq!(parse_location("what..ever"), (0, 0, Strand::Forward));
    }
}
