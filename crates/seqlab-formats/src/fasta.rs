use seqlab_core::record::{SequenceRecord, Topology};

use crate::ParseError;

/// Parse FASTA text into one or more records. Headers split on the first
/// whitespace into id and description; sequence lines are concatenated
/// after stripping whitespace and digits.
pub fn parse(input: &str) -> Result<Vec<SequenceRecord>, ParseError> {
    let mut records = Vec::new();
    let mut current_name: Option<String> = None;
    let mut current_desc: Option<String> = None;
    let mut current_seq = String::new();

    let flush = |name: Option<String>, desc: Option<String>, seq: &mut String,
                     records: &mut Vec<SequenceRecord>| {
        if let Some(name) = name {
            if !seq.is_empty() {
                let mut record =
                    SequenceRecord::new(name, std::mem::take(seq), Topology::Linear);
                if let Some(desc) = desc {
                    record.description = desc;
                }
                records.push(record);
            }
        }
    };

    for line in input.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(header) = trimmed.strip_prefix('>') {
            flush(
                current_name.take(),
                current_desc.take(),
                &mut current_seq,
                &mut records,
            );
            let mut parts = header.splitn(2, char::is_whitespace);
            current_name = Some(parts.next().unwrap_or("").to_string());
            current_desc = parts.next().map(|s| s.trim().to_string());
        } else if trimmed.starts_with(';') {
            // Comment line
            continue;
        } else {
            current_seq.extend(
                trimmed
                    .chars()
                    .filter(|c| !c.is_whitespace() && !c.is_ascii_digit())
                    .map(|c| c.to_ascii_uppercase()),
            );
        }
    }
    flush(current_name, current_desc, &mut current_seq, &mut records);

    if records.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA input".to_string(),
        ));
    }
    Ok(records)
}

/// Serialize records to FASTA, wrapping sequence lines at `width` columns
/// (a width of 0 writes each sequence on one line).
pub fn serialize(records: &[SequenceRecord], width: usize) -> String {
    let mut out = String::new();
    for record in records {
        out.push('>');
        out.push_str(&record.name);
        if !record.description.is_empty() {
            out.push(' ');
            out.push_str(&record.description);
        }
        out.push('\n');

        if width == 0 {
            out.push_str(&record.sequence);
            out.push('\n');
        } else {
            for chunk in record.sequence.as_bytes().chunks(width) {
                out.push_str(&String::from_utf8_lossy(chunk));
                out.push('\n');
            }
        }
    }
    out
}
