//! FASTA reading and writing.
//!
//! Records are decoded into an insertion-ordered [`SequenceSet`]; the
//! identifier is the first word of the header line and sequence lines are
//! concatenated.
//!
//! ## FASTA Format
//!
//! ```text
//! >oligo_1 optional description
//! ACGTACGT
//! ACGT
//! >oligo_2
//! TGCATGCA
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use thiserror::Error;

use crate::model::{Sequence, SequenceSet};

/// Errors that can occur during FASTA parsing.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty FASTA file")]
    EmptyFile,

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("Sequence without header at line {0}")]
    SequenceWithoutHeader(usize),
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// Parses a FASTA file into an ordered set of sequences.
///
/// # Examples
///
/// ```no_run
/// use oligo_aligner::fasta::parse_fasta_file;
///
/// let oligos = parse_fasta_file("oligos.fasta").unwrap();
/// println!("Loaded {} oligos", oligos.len());
/// ```
pub fn parse_fasta_file<P: AsRef<Path>>(path: P) -> FastaResult<SequenceSet> {
    parse_fasta_file_with_options(path, false)
}

/// Parses a FASTA file, optionally keeping records that have no sequence.
///
/// With `keep_empty` set, a header-only record is returned with empty data
/// instead of being skipped, so callers can tell which record came first.
pub fn parse_fasta_file_with_options<P: AsRef<Path>>(
    path: P,
    keep_empty: bool,
) -> FastaResult<SequenceSet> {
    let file = File::open(path)?;
    parse_fasta_with_options(BufReader::new(file), keep_empty)
}

/// Parses FASTA content from a reader.
///
/// Headers with no sequence lines are skipped. A repeated identifier
/// replaces the earlier record's data in place.
pub fn parse_fasta<R: BufRead>(reader: R) -> FastaResult<SequenceSet> {
    parse_fasta_with_options(reader, false)
}

/// Parses FASTA content from a reader, optionally keeping empty records.
pub fn parse_fasta_with_options<R: BufRead>(
    reader: R,
    keep_empty: bool,
) -> FastaResult<SequenceSet> {
    let mut sequences = SequenceSet::new();
    let mut current_id: Option<String> = None;
    let mut current_seq = String::new();
    let mut line_number = 0;

    for line_result in reader.lines() {
        line_number += 1;
        let line = line_result?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some(id) = current_id.take() {
                push_record(&mut sequences, id, std::mem::take(&mut current_seq), keep_empty);
            }

            // Only the first word of the header is the identifier
            let id = header.split_whitespace().next().unwrap_or("");
            if id.is_empty() {
                return Err(FastaError::InvalidFormat(format!(
                    "Empty sequence identifier at line {}",
                    line_number
                )));
            }

            current_id = Some(id.to_string());
        } else {
            if current_id.is_none() {
                return Err(FastaError::SequenceWithoutHeader(line_number));
            }

            // Append sequence data (removing any whitespace)
            current_seq.extend(line.chars().filter(|c| !c.is_whitespace()));
        }
    }

    // Don't forget the last record
    if let Some(id) = current_id {
        push_record(&mut sequences, id, current_seq, keep_empty);
    }

    if sequences.is_empty() {
        return Err(FastaError::EmptyFile);
    }

    Ok(sequences)
}

fn push_record(sequences: &mut SequenceSet, id: String, data: String, keep_empty: bool) {
    if data.is_empty() && !keep_empty {
        log::warn!("Skipping record '{}' with no sequence data", id);
        return;
    }
    let sequence = Sequence::new(id, data);
    let id = sequence.id.clone();
    if sequences.insert(sequence).is_some() {
        log::warn!("Duplicate record '{}': later sequence replaces earlier one", id);
    }
}

/// Parses FASTA content from a string.
///
/// Useful for testing or processing in-memory data.
pub fn parse_fasta_str(content: &str) -> FastaResult<SequenceSet> {
    parse_fasta(content.as_bytes())
}

/// Writes one record as a header line followed by a single sequence line.
pub fn write_record<W: Write + ?Sized>(writer: &mut W, id: &str, data: &str) -> std::io::Result<()> {
    writer.write_all(format_record(id, data).as_bytes())
}

/// Writes every sequence of a set in order.
pub fn write_fasta<W: Write + ?Sized>(writer: &mut W, sequences: &SequenceSet) -> std::io::Result<()> {
    for seq in sequences {
        write_record(writer, &seq.id, seq.as_str())?;
    }
    Ok(())
}

/// Encodes one record to a string.
pub fn format_record(id: &str, data: &str) -> String {
    format!(">{}\n{}\n", id, data)
}
