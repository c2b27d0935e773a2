/// Complement a single DNA base, IUPAC ambiguity codes included.
pub fn complement_base(base: char) -> char {
    match base.to_ascii_uppercase() {
        'A' => 'T',
        'T' => 'A',
        'G' => 'C',
        'C' => 'G',
        'U' => 'A',
        'R' => 'Y',
        'Y' => 'R',
        'S' => 'S',
        'W' => 'W',
        'K' => 'M',
        'M' => 'K',
        'B' => 'V',
        'V' => 'B',
        'D' => 'H',
        'H' => 'D',
        'N' => 'N',
        other => other,
    }
}

/// Reverse complement of a DNA sequence
pub fn reverse_complement(seq: &str) -> String {
    seq.chars().rev().map(complement_base).collect()
}

/// Normalize sequence text for the algorithm layer: uppercase, RNA `U`
/// folded onto `T`.
pub fn normalize_dna(seq: &str) -> String {
    seq.chars()
        .map(|c| match c.to_ascii_uppercase() {
            'U' => 'T',
            up => up,
        })
        .collect()
}

/// The set of literal bases an IUPAC letter stands for, or `None` for a
/// character outside the alphabet.
pub fn iupac_bases(code: char) -> Option<&'static str> {
    match code.to_ascii_uppercase() {
        'A' => Some("A"),
        'C' => Some("C"),
        'G' => Some("G"),
        'T' | 'U' => Some("T"),
        'R' => Some("AG"),
        'Y' => Some("CT"),
        'S' => Some("GC"),
        'W' => Some("AT"),
        'K' => Some("GT"),
        'M' => Some("AC"),
        'B' => Some("CGT"),
        'D' => Some("AGT"),
        'H' => Some("ACT"),
        'V' => Some("ACG"),
        'N' => Some("ACGT"),
        _ => None,
    }
}

/// Whether `base` is one of the literals an IUPAC `code` allows.
/// Non-IUPAC codes match themselves literally.
pub fn iupac_matches(code: char, base: char) -> bool {
    let b = match base.to_ascii_uppercase() {
        'U' => 'T',
        up => up,
    };
    match iupac_bases(code) {
        Some(set) => set.contains(b),
        None => code.to_ascii_uppercase() == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complement_base() {
        assert_eq!(complement_base('A'), 'T');
        assert_eq!(complement_base('t'), 'A');
        assert_eq!(complement_base('G'), 'C');
        assert_eq!(complement_base('C'), 'G');
        assert_eq!(complement_base('R'), 'Y');
        assert_eq!(complement_base('N'), 'N');
    }

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement("ATCGATCG"), "CGATCGAT");
        assert_eq!(reverse_complement("AAAAAA"), "TTTTTT");
        assert_eq!(reverse_complement(""), "");
    }

    #[test]
    fn test_normalize_dna() {
        assert_eq!(normalize_dna("augc"), "ATGC");
        assert_eq!(normalize_dna("ATGC"), "ATGC");
    }

    #[test]
    fn test_iupac_matches() {
        assert!(iupac_matches('R', 'A'));
        assert!(iupac_matches('R', 'G'));
        assert!(!iupac_matches('R', 'C'));
        assert!(iupac_matches('N', 'T'));
        assert!(iupac_matches('N', 'u'));
        // Outside the alphabet: literal comparison
        assert!(iupac_matches('X', 'X'));
        assert!(!iupac_matches('X', 'A'));
    }
}
