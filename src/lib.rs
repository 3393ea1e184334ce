//! # oligo-aligner
//!
//! Places short nucleotide oligos on a single reference sequence.
//!
//! ## Architecture
//!
//! - `model`: Sequences, ordered sequence sets, placements and summaries
//! - `fasta`: FASTA reading and writing
//! - `revcomp`: Reverse complement
//! - `locate`: Exact and single-mismatch search of one oligo
//! - `render`: Gapped alignment strings in reference coordinates
//! - `align`: Forward/reverse-complement resolution of an oligo set
//! - `controller`: File I/O and reporting for a complete run
//!
//! ## Example
//!
//! ```
//! use oligo_aligner::align::{resolve_all, AlignOptions};
//! use oligo_aligner::fasta::parse_fasta_str;
//!
//! let oligos = parse_fasta_str(">o1\nGGGC\n>o2\nAAACGG\n").unwrap();
//! let resolution = resolve_all("TTTGGGCCGTTT", &oligos, &AlignOptions::default()).unwrap();
//!
//! assert_eq!(resolution.results.get("o1").unwrap().as_str(), "---GGGC-----");
//! assert_eq!(resolution.results.get("o2-RC").unwrap().as_str(), "------CCGTTT");
//! assert_eq!(resolution.summary.reverse_complemented, 1);
//! ```

pub mod align;
pub mod controller;
pub mod fasta;
pub mod locate;
pub mod model;
pub mod render;
pub mod revcomp;
