//! Per-oligo resolution and aggregation of results.
//!
//! Each oligo is tried forward first, then as its reverse complement. The
//! first orientation that the locator places wins; the sequence in that
//! orientation is what gets rendered. Oligos placed in neither orientation
//! end up as [`OligoOutcome::Unaligned`] and are left out of the results.
//!
//! Results are keyed by display id. Reverse-complement hits carry a suffix
//! (`-RC` by default). When two oligos end up with the same display id, the
//! later one in input order replaces the earlier record in place, and the
//! mismatch set follows whichever record survived.

use std::collections::HashSet;

use rayon::prelude::*;
use thiserror::Error;

use crate::locate::locate;
use crate::model::{
    AlignmentRecord, OligoOutcome, Orientation, Placement, RunSummary, Sequence, SequenceSet,
};
use crate::render::{render_alignment, RenderError};
use crate::revcomp::reverse_complement_str;

/// Default display-id suffix for oligos placed via their reverse complement.
pub const DEFAULT_RC_SUFFIX: &str = "-RC";

/// Errors that abort a resolution run.
#[derive(Error, Debug)]
pub enum AlignError {
    #[error("Reference sequence is empty")]
    EmptyReference,

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Failed to start worker threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Tunables for [`resolve_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignOptions {
    /// Appended to the id of reverse-complement hits
    pub rc_suffix: String,
    /// Worker threads; 1 resolves oligos sequentially
    pub threads: usize,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            rc_suffix: DEFAULT_RC_SUFFIX.to_string(),
            threads: 1,
        }
    }
}

/// Everything produced by one run over an oligo set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Rendered records keyed by display id, in processing order
    pub results: SequenceSet,
    /// Records of `results` whose surviving alignment has exactly one
    /// mismatch, in the same order
    pub mismatches: SequenceSet,
    /// One outcome per input oligo, in input order
    pub outcomes: Vec<OligoOutcome>,
    pub summary: RunSummary,
}

/// Resolves a single oligo against the reference.
pub fn resolve_oligo(
    oligo: &Sequence,
    reference: &[u8],
    rc_suffix: &str,
) -> Result<OligoOutcome, RenderError> {
    if let Some(hit) = locate(oligo.as_bytes(), reference) {
        let aligned = render_alignment(oligo.as_bytes(), reference.len(), hit.position)?;
        return Ok(OligoOutcome::Aligned {
            placement: Placement {
                position: hit.position,
                mismatches: hit.mismatches,
                orientation: Orientation::Forward,
            },
            record: AlignmentRecord {
                display_id: oligo.id.clone(),
                aligned,
            },
        });
    }

    let rc = reverse_complement_str(oligo.as_str());
    if let Some(hit) = locate(rc.as_bytes(), reference) {
        let aligned = render_alignment(rc.as_bytes(), reference.len(), hit.position)?;
        return Ok(OligoOutcome::Aligned {
            placement: Placement {
                position: hit.position,
                mismatches: hit.mismatches,
                orientation: Orientation::ReverseComplement,
            },
            record: AlignmentRecord {
                display_id: format!("{}{}", oligo.id, rc_suffix),
                aligned,
            },
        });
    }

    Ok(OligoOutcome::Unaligned {
        id: oligo.id.clone(),
    })
}

/// Resolves every oligo and collects the results and summary.
///
/// The reference must not be empty. An empty oligo set gives empty results
/// and an all-zero summary. With `options.threads > 1` oligos are resolved
/// on a dedicated thread pool; outcomes are still merged in input order, so
/// the result is identical to a sequential run.
pub fn resolve_all(
    reference: &str,
    oligos: &SequenceSet,
    options: &AlignOptions,
) -> Result<Resolution, AlignError> {
    if reference.is_empty() {
        return Err(AlignError::EmptyReference);
    }
    let reference = reference.as_bytes();
    let suffix = options.rc_suffix.as_str();

    let outcomes: Vec<OligoOutcome> = if options.threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.threads)
            .build()?;
        pool.install(|| {
            oligos
                .as_slice()
                .par_iter()
                .map(|oligo| resolve_oligo(oligo, reference, suffix))
                .collect::<Result<Vec<_>, _>>()
        })?
    } else {
        oligos
            .iter()
            .map(|oligo| resolve_oligo(oligo, reference, suffix))
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut results = SequenceSet::new();
    // Display ids whose current record in `results` has one mismatch
    let mut mismatch_ids: HashSet<&str> = HashSet::new();

    for outcome in &outcomes {
        match outcome {
            OligoOutcome::Aligned { placement, record } => {
                log::debug!(
                    "{}: {} at {} ({} mismatch)",
                    record.display_id,
                    placement.orientation,
                    placement.position,
                    placement.mismatches
                );
                if results.insert(record.clone().into()).is_some() {
                    log::warn!(
                        "Display id '{}' already used; keeping the later alignment",
                        record.display_id
                    );
                }
                if placement.mismatches == 1 {
                    mismatch_ids.insert(record.display_id.as_str());
                } else {
                    mismatch_ids.remove(record.display_id.as_str());
                }
            }
            OligoOutcome::Unaligned { id } => {
                log::debug!("{}: no placement in either orientation", id);
            }
        }
    }

    let mismatches: SequenceSet = results
        .iter()
        .filter(|record| mismatch_ids.contains(record.id.as_str()))
        .cloned()
        .collect();
    let summary = RunSummary::from_outcomes(&outcomes);

    Ok(Resolution {
        results,
        mismatches,
        outcomes,
        summary,
    })
}
