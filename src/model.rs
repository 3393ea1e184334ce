//! Data model for oligo alignment.
//!
//! This module contains the data structures shared by the codec, the
//! locator and the orchestrator:
//! - Sequences and insertion-ordered sequence sets
//! - Placements, orientations and rendered alignment records
//! - Per-oligo outcomes and the derived run summary

use std::collections::HashMap;
use std::fmt;

/// Represents a single sequence with its identifier and data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The sequence identifier (from FASTA header, without '>')
    pub id: String,
    /// The sequence data (nucleotides, case preserved)
    pub data: String,
}

impl Sequence {
    /// Creates a new sequence.
    pub fn new(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
        }
    }

    /// Returns the length of the sequence.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }
}

/// Insertion-ordered mapping from identifier to sequence.
///
/// Iteration follows first-insertion order. Inserting an identifier that is
/// already present replaces its data but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceSet {
    entries: Vec<Sequence>,
    index: HashMap<String, usize>,
}

impl SequenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a sequence, returning the replaced data if the id was present.
    pub fn insert(&mut self, sequence: Sequence) -> Option<String> {
        match self.index.get(&sequence.id) {
            Some(&slot) => Some(std::mem::replace(
                &mut self.entries[slot].data,
                sequence.data,
            )),
            None => {
                self.index.insert(sequence.id.clone(), self.entries.len());
                self.entries.push(sequence);
                None
            }
        }
    }

    /// Gets a sequence by identifier.
    pub fn get(&self, id: &str) -> Option<&Sequence> {
        self.index.get(id).map(|&slot| &self.entries[slot])
    }

    /// Returns the first inserted sequence.
    pub fn first(&self) -> Option<&Sequence> {
        self.entries.first()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Returns the number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sequence> {
        self.entries.iter()
    }

    /// Returns the sequences in order as a slice.
    pub fn as_slice(&self) -> &[Sequence] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a SequenceSet {
    type Item = &'a Sequence;
    type IntoIter = std::slice::Iter<'a, Sequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Sequence> for SequenceSet {
    fn from_iter<I: IntoIterator<Item = Sequence>>(iter: I) -> Self {
        let mut set = SequenceSet::new();
        for sequence in iter {
            set.insert(sequence);
        }
        set
    }
}

/// Strand on which an oligo was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Forward,
    ReverseComplement,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Forward => write!(f, "forward"),
            Orientation::ReverseComplement => write!(f, "reverse-complement"),
        }
    }
}

/// Where an oligo landed on the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// 0-based offset of the first oligo base in the reference
    pub position: usize,
    /// Number of substitutions in the window (0 or 1)
    pub mismatches: u8,
    pub orientation: Orientation,
}

/// A located oligo projected onto the reference coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    /// Oligo id, suffixed when the reverse complement was placed
    pub display_id: String,
    /// Gapped string with the same length as the reference
    pub aligned: String,
}

impl From<AlignmentRecord> for Sequence {
    fn from(record: AlignmentRecord) -> Self {
        Sequence::new(record.display_id, record.aligned)
    }
}

/// Terminal state of one oligo after both orientations were tried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OligoOutcome {
    Aligned {
        placement: Placement,
        record: AlignmentRecord,
    },
    Unaligned {
        id: String,
    },
}

impl OligoOutcome {
    pub fn placement(&self) -> Option<&Placement> {
        match self {
            OligoOutcome::Aligned { placement, .. } => Some(placement),
            OligoOutcome::Unaligned { .. } => None,
        }
    }
}

/// Counters for one run, derived from the per-oligo outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Oligos processed
    pub total: usize,
    /// Oligos placed in either orientation
    pub aligned: usize,
    /// Oligos placed via their reverse complement
    pub reverse_complemented: usize,
    /// Oligos placed with exactly one mismatch
    pub single_mismatch: usize,
}

impl RunSummary {
    /// Tallies a set of outcomes.
    pub fn from_outcomes<'a, I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = &'a OligoOutcome>,
    {
        let mut summary = RunSummary::default();
        for outcome in outcomes {
            summary.total += 1;
            if let Some(placement) = outcome.placement() {
                summary.aligned += 1;
                if placement.orientation == Orientation::ReverseComplement {
                    summary.reverse_complemented += 1;
                }
                if placement.mismatches == 1 {
                    summary.single_mismatch += 1;
                }
            }
        }
        summary
    }

    pub fn unaligned(&self) -> usize {
        self.total - self.aligned
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} out of {} oligos successfully aligned.",
            self.aligned, self.total
        )?;
        write!(
            f,
            "{} out of {} oligos were reverse-complemented and successfully aligned.",
            self.reverse_complemented, self.total
        )
    }
}
