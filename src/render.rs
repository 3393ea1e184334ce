//! Projection of a placed oligo onto reference coordinates.

use thiserror::Error;

/// Gap symbol for reference positions not covered by the oligo.
pub const GAP: u8 = b'-';

/// Errors raised while rendering an alignment string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error(
        "oligo of length {oligo_len} at position {position} runs past the end of the reference (length {reference_len})"
    )]
    OutOfBounds {
        position: usize,
        oligo_len: usize,
        reference_len: usize,
    },
}

/// Builds a gapped string of `reference_len` with `oligo` written at `position`.
///
/// Lengths and positions are byte counts, as reported by the locator. For
/// ASCII sequences this is the character count; a non-ASCII symbol takes
/// more than one byte, so the rendered string has the byte length of the
/// reference, not its character count.
///
/// ```
/// use oligo_aligner::render::render_alignment;
///
/// assert_eq!(render_alignment(b"GG", 10, 3).unwrap(), "---GG-----");
/// ```
pub fn render_alignment(
    oligo: &[u8],
    reference_len: usize,
    position: usize,
) -> Result<String, RenderError> {
    let end = position
        .checked_add(oligo.len())
        .filter(|&end| end <= reference_len)
        .ok_or(RenderError::OutOfBounds {
            position,
            oligo_len: oligo.len(),
            reference_len,
        })?;

    let mut aligned = vec![GAP; reference_len];
    aligned[position..end].copy_from_slice(oligo);
    Ok(String::from_utf8_lossy(&aligned).into_owned())
}
