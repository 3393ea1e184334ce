//! Exact and single-mismatch placement of an oligo on a reference.
//!
//! The search runs in two passes over the reference:
//! 1. the leftmost window identical to the oligo, if any;
//! 2. otherwise the leftmost window that differs from the oligo in exactly
//!    one position.
//!
//! Comparison is byte-wise and case-sensitive: `a` and `A` are different
//! symbols. Offsets are byte offsets, which equal character offsets only
//! for ASCII sequences. Callers that want case-insensitive matching must normalise
//! both sequences first.

/// A window of the reference matched by an oligo in one orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// 0-based offset of the window in the reference
    pub position: usize,
    /// Mismatching positions inside the window (0 or 1)
    pub mismatches: u8,
}

/// Finds the best window of `reference` for `oligo`.
///
/// An exact hit always wins over a single-mismatch hit, even when the
/// mismatch window lies further left. Ties are broken by the lowest offset.
/// Returns `None` when neither pass finds a window, including when the
/// oligo is longer than the reference. An empty oligo matches at offset 0.
pub fn locate(oligo: &[u8], reference: &[u8]) -> Option<Hit> {
    if let Some(position) = find_exact(oligo, reference) {
        return Some(Hit {
            position,
            mismatches: 0,
        });
    }
    find_single_mismatch(oligo, reference).map(|position| Hit {
        position,
        mismatches: 1,
    })
}

/// Offset of the leftmost window equal to `oligo`.
pub fn find_exact(oligo: &[u8], reference: &[u8]) -> Option<usize> {
    if oligo.is_empty() {
        return Some(0);
    }
    if oligo.len() > reference.len() {
        return None;
    }
    reference.windows(oligo.len()).position(|window| window == oligo)
}

/// Offset of the leftmost window with exactly one mismatch against `oligo`.
pub fn find_single_mismatch(oligo: &[u8], reference: &[u8]) -> Option<usize> {
    if oligo.is_empty() || oligo.len() > reference.len() {
        return None;
    }
    reference
        .windows(oligo.len())
        .position(|window| mismatches_up_to(oligo, window, 2) == 1)
}

/// Counts mismatches between two equal-length slices, stopping at `limit`.
#[inline]
fn mismatches_up_to(a: &[u8], b: &[u8], limit: usize) -> usize {
    let mut count = 0;
    for (x, y) in a.iter().zip(b) {
        if x != y {
            count += 1;
            if count >= limit {
                break;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(position: usize, mismatches: u8) -> Option<Hit> {
        Some(Hit {
            position,
            mismatches,
        })
    }

    #[test]
    fn test_exact_leftmost() {
        assert_eq!(locate(b"AT", b"ATATAT"), hit(0, 0));
        assert_eq!(locate(b"TA", b"ATATAT"), hit(1, 0));
    }

    #[test]
    fn test_exact_at_end() {
        assert_eq!(locate(b"GGT", b"AAAGGT"), hit(3, 0));
        assert_eq!(locate(b"AAAGGT", b"AAAGGT"), hit(0, 0));
    }

    #[test]
    fn test_single_mismatch() {
        assert_eq!(locate(b"ACCTACGT", b"ACGTACGT"), hit(0, 1));
    }

    #[test]
    fn test_single_mismatch_leftmost() {
        // CAT and CGT are both one substitution away from CCT; CAT is first
        assert_eq!(locate(b"CCT", b"GGCATGGCGTGG"), hit(2, 1));
    }

    #[test]
    fn test_exact_beats_earlier_mismatch_window() {
        // window 0 ("ACGA") has one mismatch, window 6 is exact
        let reference = b"ACGATTACGT";
        assert_eq!(find_single_mismatch(b"ACGT", reference), Some(0));
        assert_eq!(locate(b"ACGT", reference), hit(6, 0));
    }

    #[test]
    fn test_two_mismatches_rejected() {
        assert_eq!(locate(b"AGGT", b"ACCT"), None);
        assert_eq!(locate(b"CCCC", b"AAAA"), None);
    }

    #[test]
    fn test_oligo_longer_than_reference() {
        assert_eq!(locate(b"ACGTA", b"ACGT"), None);
        assert_eq!(find_single_mismatch(b"ACGTA", b"ACGT"), None);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(locate(b"acgt", b"ACGT"), None);
        assert_eq!(locate(b"aCGT", b"ACGT"), hit(0, 1));
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(locate(b"", b"ACGT"), hit(0, 0));
        assert_eq!(locate(b"", b""), hit(0, 0));
        assert_eq!(locate(b"A", b""), None);
    }

    #[test]
    fn test_single_base_oligo() {
        // any base is at most one substitution away from a 1-base window
        assert_eq!(locate(b"G", b"AAAA"), hit(0, 1));
    }

    #[test]
    fn test_mismatch_counter_stops_at_limit() {
        assert_eq!(mismatches_up_to(b"AAAA", b"CCCC", 2), 2);
        assert_eq!(mismatches_up_to(b"AAAA", b"AACA", 2), 1);
        assert_eq!(mismatches_up_to(b"AAAA", b"AAAA", 2), 0);
    }
}
