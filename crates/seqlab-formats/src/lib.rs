pub mod detect;
pub mod fasta;
pub mod genbank;

use seqlab_core::record::{SequenceRecord, Topology};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Unexpected end of input")]
    UnexpectedEnd,
    #[error("Invalid location: {0}")]
    InvalidLocation(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    GenBank,
    Fasta,
    Raw,
}

/// Result of sniff-then-parse on arbitrary pasted or uploaded text.
/// `cleaned_chars` reports how many non-sequence characters the raw-text
/// path dropped; it is advisory and always 0 for recognized formats.
#[derive(Debug, Clone)]
pub struct ParsedInput {
    pub format: FileFormat,
    pub records: Vec<SequenceRecord>,
    pub cleaned_chars: usize,
}

/// Parse text in whatever format it appears to be. Raw text becomes a
/// single record with everything but letters, `*` and `-` stripped.
pub fn parse_file(content: &str) -> Result<ParsedInput, ParseError> {
    match detect::detect_format(content) {
        FileFormat::GenBank => Ok(ParsedInput {
            format: FileFormat::GenBank,
            records: vec![genbank::parse(content)?],
            cleaned_chars: 0,
        }),
        FileFormat::Fasta => Ok(ParsedInput {
            format: FileFormat::Fasta,
            records: fasta::parse(content)?,
            cleaned_chars: 0,
        }),
        FileFormat::Raw => {
            let mut cleaned = String::with_capacity(content.len());
            let mut removed = 0usize;
            for ch in content.chars() {
                if ch.is_ascii_alphabetic() || ch == '*' || ch == '-' {
                    cleaned.push(ch.to_ascii_uppercase());
                } else if !ch.is_whitespace() {
                    removed += 1;
                }
            }
            Ok(ParsedInput {
                format: FileFormat::Raw,
                records: vec![SequenceRecord::new("untitled", cleaned, Topology::Linear)],
                cleaned_chars: removed,
            })
        }
    }
}
