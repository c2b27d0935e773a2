use serde::{Deserialize, Serialize};

use crate::codon::CodonTable;
use crate::feature::Strand;
use crate::ops::{normalize_dna, reverse_complement};

pub const DEFAULT_MIN_AMINO_ACIDS: usize = 30;

/// An open reading frame. Coordinates are always on the forward strand,
/// 0-based half-open; `length` is in bases and includes the stop codon when
/// one was found. `stop_codon` is empty when the frame runs off the end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orf {
    pub start: usize,
    pub end: usize,
    pub frame: u8,
    pub strand: Strand,
    pub length: usize,
    pub amino_acids: String,
    pub start_codon: String,
    pub stop_codon: String,
}

/// Six-frame ORF scan. Results are sorted by descending nucleotide length.
pub fn find_orfs(seq: &str, table: &CodonTable, min_amino_acids: usize) -> Vec<Orf> {
    let forward = normalize_dna(seq);
    let len = forward.len();
    let mut orfs = Vec::new();

    for offset in 0..3usize {
        scan_frame(&forward, offset, table, min_amino_acids, Strand::Forward, &mut orfs);
    }

    let reverse = reverse_complement(&forward);
    let mut rev_orfs = Vec::new();
    for offset in 0..3usize {
        scan_frame(&reverse, offset, table, min_amino_acids, Strand::Reverse, &mut rev_orfs);
    }
    // Map reverse-complement coordinates back onto forward-strand numbering
    for orf in &mut rev_orfs {
        let (rev_start, rev_end) = (orf.start, orf.end);
        orf.start = len - rev_end;
        orf.end = len - rev_start;
    }
    orfs.append(&mut rev_orfs);

    orfs.sort_by(|a, b| b.length.cmp(&a.length));
    orfs
}

/// The longest ORF of any length, if the sequence has one at all.
pub fn find_longest_orf(seq: &str, table: &CodonTable) -> Option<Orf> {
    find_orfs(seq, table, 1).into_iter().next()
}

fn scan_frame(
    bases: &str,
    offset: usize,
    table: &CodonTable,
    min_amino_acids: usize,
    strand: Strand,
    orfs: &mut Vec<Orf>,
) {
    let chars: Vec<char> = bases.chars().collect();
    let mut starts = Vec::new();
    let mut stops = Vec::new();

    let mut i = offset;
    while i + 3 <= chars.len() {
        let codon: String = chars[i..i + 3].iter().collect();
        if table.is_start_codon(&codon) {
            starts.push(i);
        }
        if table.is_stop_codon(&codon) {
            stops.push(i);
        }
        i += 3;
    }

    for &start in &starts {
        // Nearest in-frame stop downstream of the start codon
        let stop = stops.iter().copied().find(|&s| s > start);
        let (end, aa_count, stop_codon) = match stop {
            Some(s) => (s + 3, (s - start) / 3, chars[s..s + 3].iter().collect()),
            None => {
                let codons = (chars.len() - start) / 3;
                (start + codons * 3, codons, String::new())
            }
        };
        if aa_count < min_amino_acids {
            continue;
        }

        let amino_acids: String = (0..aa_count)
            .map(|k| {
                let codon: String = chars[start + 3 * k..start + 3 * k + 3].iter().collect();
                table.translate_codon(&codon)
            })
            .collect();

        orfs.push(Orf {
            start,
            end,
            frame: (offset + 1) as u8,
            strand,
            length: end - start,
            amino_acids,
            start_codon: chars[start..start + 3].iter().collect(),
            stop_codon,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> &'static CodonTable {
        CodonTable::standard()
    }

    #[test]
    fn test_simple_forward_orf() {
        // ATG AAA TGA: M K stop
        let orfs = find_orfs("ATGAAATGA", table(), 1);
        let fwd: Vec<_> = orfs
            .iter()
            .filter(|o| o.strand == Strand::Forward && o.start == 0)
            .collect();
        assert_eq!(fwd.len(), 1);
        let orf = fwd[0];
        assert_eq!(orf.end, 9);
        assert_eq!(orf.length, 9);
        assert_eq!(orf.frame, 1);
        assert_eq!(orf.amino_acids, "MK");
        assert_eq!(orf.start_codon, "ATG");
        assert_eq!(orf.stop_codon, "TGA");
    }

    #[test]
    fn test_orf_without_stop_runs_to_end() {
        let orfs = find_orfs("ATGAAAAAA", table(), 1);
        let orf = orfs
            .iter()
            .find(|o| o.strand == Strand::Forward && o.start == 0)
            .unwrap();
        assert_eq!(orf.stop_codon, "");
        assert_eq!(orf.end, 9);
        assert_eq!(orf.amino_acids, "MKK");
    }

    #[test]
    fn test_min_length_filter() {
        // Only 2 amino acids; threshold of 3 rejects it
        let orfs = find_orfs("ATGAAATGA", table(), 3);
        assert!(orfs.iter().all(|o| o.amino_acids.len() >= 3));
    }

    #[test]
    fn test_reverse_strand_mapping() {
        // Forward: no ATG in frame. Reverse complement of TCATTTCAT
        // is ATGAAATGA, which carries M K stop at offset 0.
        let seq = "TCATTTCAT";
        let orfs = find_orfs(seq, table(), 1);
        let rev = orfs
            .iter()
            .find(|o| o.strand == Strand::Reverse && o.length == 9)
            .expect("reverse ORF not found");
        // rev coords 0..9 map back to forward 0..9 (len 9)
        assert_eq!(rev.start, 0);
        assert_eq!(rev.end, 9);
        assert_eq!(rev.amino_acids, "MK");
    }

    #[test]
    fn test_sorted_by_descending_length() {
        let seq = "ATGAAATGAATGAAAAAAAAATGA";
        let orfs = find_orfs(seq, table(), 1);
        for pair in orfs.windows(2) {
            assert!(pair[0].length >= pair[1].length);
        }
    }

    #[test]
    fn test_find_longest_orf() {
        let seq = "ATGAAATGAATGAAAAAAAAATGA";
        let longest = find_longest_orf(seq, table()).unwrap();
        let all = find_orfs(seq, table(), 1);
        assert_eq!(longest.length, all[0].length);
    }

    #[test]
    fn test_empty_sequence() {
        assert!(find_orfs("", table(), 1).is_empty());
        assert!(find_longest_orf("", table()).is_none());
    }

    #[test]
    fn test_rna_input() {
        let orfs = find_orfs("AUGAAAUGA", table(), 1);
        assert!(orfs
            .iter()
            .any(|o| o.strand == Strand::Forward && o.amino_acids == "MK"));
    }
}
