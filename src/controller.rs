//! Run controller.
//!
//! This module drives one complete run:
//! - Reading the reference and oligo FASTA files
//! - Resolving every oligo against the reference
//! - Writing the aligned FASTA and the single-mismatch report
//! - Printing the run summary

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::align::{resolve_all, AlignOptions, Resolution};
use crate::fasta::{parse_fasta_file, parse_fasta_file_with_options, write_fasta, write_record};
use crate::model::RunSummary;

/// Default path of the single-mismatch report.
pub const DEFAULT_MISMATCH_FILE: &str = "mismatch.err";

/// Default identifier of the reference record in the aligned output.
pub const DEFAULT_REFERENCE_ID: &str = "reference";

/// Output path meaning "write to stdout".
pub const STDOUT_PATH: &str = "-";

/// Inputs, outputs and options for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Reference FASTA; only the first record is used
    pub reference: PathBuf,
    /// Oligo FASTA
    pub oligos: PathBuf,
    /// Aligned FASTA output, or "-" for stdout
    pub output: PathBuf,
    /// Written only when at least one oligo aligned with one mismatch
    pub mismatch_file: PathBuf,
    /// Header used for the reference record in the output
    pub reference_id: String,
    pub align: AlignOptions,
}

impl RunConfig {
    /// Creates a configuration with default report paths and options.
    pub fn new(
        reference: impl Into<PathBuf>,
        oligos: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            reference: reference.into(),
            oligos: oligos.into(),
            output: output.into(),
            mismatch_file: PathBuf::from(DEFAULT_MISMATCH_FILE),
            reference_id: DEFAULT_REFERENCE_ID.to_string(),
            align: AlignOptions::default(),
        }
    }
}

/// Runs the whole pipeline and returns the summary.
///
/// The summary is also printed to stdout unless the aligned output itself
/// goes to stdout, in which case it is printed to stderr.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    // Keep header-only records so an empty first record is not skipped
    let references = parse_fasta_file_with_options(&config.reference, true).with_context(|| {
        format!(
            "Reference file '{}' is empty or improperly formatted",
            config.reference.display()
        )
    })?;
    let reference = match references.first() {
        Some(reference) => reference,
        None => anyhow::bail!(
            "Reference file '{}' contains no sequence",
            config.reference.display()
        ),
    };
    if reference.is_empty() {
        anyhow::bail!(
            "Reference record '{}' in '{}' has no sequence",
            reference.id,
            config.reference.display()
        );
    }
    if references.len() > 1 {
        log::warn!(
            "Reference file has {} records; using only the first ('{}')",
            references.len(),
            reference.id
        );
    }
    log::info!(
        "Reference '{}' ({} bp) from {}",
        reference.id,
        reference.len(),
        config.reference.display()
    );

    let oligos = parse_fasta_file(&config.oligos).with_context(|| {
        format!(
            "Oligo file '{}' is empty or improperly formatted",
            config.oligos.display()
        )
    })?;
    log::info!("Loaded {} oligos from {}", oligos.len(), config.oligos.display());

    let resolution = resolve_all(reference.as_str(), &oligos, &config.align)?;
    if resolution.summary.unaligned() > 0 {
        log::info!(
            "{} oligos could not be placed in either orientation",
            resolution.summary.unaligned()
        );
    }

    write_alignment(config, reference.as_str(), &resolution)?;
    if resolution.summary.single_mismatch > 0 {
        write_mismatches(&config.mismatch_file, &resolution)?;
    }

    let report = summary_report(&resolution.summary, &config.mismatch_file);
    if is_stdout(&config.output) {
        eprintln!("{}", report);
    } else {
        println!("{}", report);
    }

    Ok(resolution.summary)
}

/// Renders the user-facing summary lines.
pub fn summary_report(summary: &RunSummary, mismatch_file: &Path) -> String {
    let mut report = summary.to_string();
    if summary.single_mismatch > 0 {
        report.push_str(&format!(
            "\n{} out of {} oligos is/are a mismatch. See '{}' for details.",
            summary.single_mismatch,
            summary.total,
            mismatch_file.display()
        ));
    }
    report
}

fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == STDOUT_PATH
}

/// Writes the reference record followed by every aligned oligo.
fn write_alignment(config: &RunConfig, reference: &str, resolution: &Resolution) -> Result<()> {
    let write_all = |writer: &mut dyn Write| -> io::Result<()> {
        write_record(writer, &config.reference_id, reference)?;
        write_fasta(writer, &resolution.results)?;
        writer.flush()
    };

    if is_stdout(&config.output) {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_all(&mut handle).context("Error writing output to stdout")?;
    } else {
        let file = File::create(&config.output).with_context(|| {
            format!("Error creating output file '{}'", config.output.display())
        })?;
        let mut writer = BufWriter::new(file);
        write_all(&mut writer).with_context(|| {
            format!("Error writing output file '{}'", config.output.display())
        })?;
        log::info!(
            "Wrote {} aligned oligos to {}",
            resolution.results.len(),
            config.output.display()
        );
    }
    Ok(())
}

fn write_mismatches(path: &Path, resolution: &Resolution) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Error creating mismatch file '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_fasta(&mut writer, &resolution.mismatches)
        .and_then(|_| writer.flush())
        .with_context(|| format!("Error writing mismatch file '{}'", path.display()))?;
    log::info!(
        "Wrote {} single-mismatch oligos to {}",
        resolution.mismatches.len(),
        path.display()
    );
    Ok(())
}
