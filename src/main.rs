//! oligo-aligner - place oligos on a reference sequence.
//!
//! ## Usage
//!
//! ```bash
//! oligo-aligner -r reference.fa -q oligos.fa -o aligned.fa
//! oligo-aligner -r reference.fa -q oligos.fa -o - -t 4 -v
//! ```
//!
//! The aligned FASTA starts with the reference record, followed by one
//! gapped record per placed oligo. Oligos placed with one mismatch are also
//! written to the mismatch report (`mismatch.err` by default).

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use oligo_aligner::align::{AlignOptions, DEFAULT_RC_SUFFIX};
use oligo_aligner::controller::{run, RunConfig, DEFAULT_MISMATCH_FILE, DEFAULT_REFERENCE_ID};

/// Align oligos to a reference sequence.
///
/// Each oligo is placed at its leftmost exact match, or failing that at its
/// leftmost window with exactly one mismatch. Oligos that cannot be placed
/// are tried again as their reverse complement and are left out of the
/// output if that fails too.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Reference sequence file in FASTA format (first record is used)
    #[arg(short = 'r', long = "ref")]
    reference: PathBuf,

    /// Oligo sequences file in FASTA format
    #[arg(short = 'q', long = "oligo")]
    oligo: PathBuf,

    /// Output file for aligned sequences in FASTA format. Use "-" for stdout.
    #[arg(short = 'o', long = "output")]
    output: PathBuf,

    /// File receiving the oligos aligned with one mismatch
    #[arg(long = "mismatch-file", default_value = DEFAULT_MISMATCH_FILE)]
    mismatch_file: PathBuf,

    /// Suffix appended to the id of reverse-complemented oligos
    #[arg(long = "rc-suffix", default_value = DEFAULT_RC_SUFFIX, allow_hyphen_values = true)]
    rc_suffix: String,

    /// Identifier of the reference record in the output
    #[arg(long = "reference-id", default_value = DEFAULT_REFERENCE_ID)]
    reference_id: String,

    /// Number of worker threads
    #[arg(short = 't', long = "threads", default_value = "1")]
    threads: usize,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    if args.threads < 1 {
        anyhow::bail!("Thread count must be at least 1 (got {})", args.threads);
    }

    let config = RunConfig {
        reference: args.reference,
        oligos: args.oligo,
        output: args.output,
        mismatch_file: args.mismatch_file,
        reference_id: args.reference_id,
        align: AlignOptions {
            rc_suffix: args.rc_suffix,
            threads: args.threads,
        },
    };

    run(&config)?;

    Ok(())
}
