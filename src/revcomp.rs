//! Reverse complement of nucleotide sequences.

/// Watson-Crick complement of one base, case preserved.
///
/// Anything outside `ACGTacgt` (including `N`/`n`) is returned unchanged.
#[inline]
pub fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'a' => b't',
        b't' => b'a',
        b'c' => b'g',
        b'g' => b'c',
        _ => base,
    }
}

/// Reverses a sequence and complements every base.
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().map(|&base| complement(base)).collect()
}

/// String form of [`reverse_complement`].
pub fn reverse_complement_str(seq: &str) -> String {
    // Reversing raw bytes would split multi-byte characters
    if seq.is_ascii() {
        String::from_utf8(reverse_complement(seq.as_bytes())).unwrap_or_default()
    } else {
        seq.chars()
            .rev()
            .map(|c| if c.is_ascii() { complement(c as u8) as char } else { c })
            .collect()
    }
}
