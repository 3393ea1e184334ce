use std::fs;
use std::path::Path;

use oligo_aligner::align::AlignError;
use oligo_aligner::controller::{run, RunConfig};
use oligo_aligner::fasta::parse_fasta_file;
use tempfile::{tempdir, TempDir};

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn config_in(dir: &TempDir, reference: &str, oligos: &str) -> RunConfig {
    let mut config = RunConfig::new(
        write(dir, "ref.fa", reference),
        write(dir, "oligos.fa", oligos),
        dir.path().join("aligned.fa"),
    );
    config.mismatch_file = dir.path().join("mismatch.err");
    config
}

#[test]
fn run_writes_reference_then_aligned_oligos() {
    let dir = tempdir().unwrap();
    let config = config_in(
        &dir,
        ">chr_test some description\nTTTGGG\nCCGTTT\n",
        ">fwd\nGGGC\n>rc first oligo\nAAACGG\n>lost\nCACACA\n",
    );

    let summary = run(&config).unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.aligned, 2);
    assert_eq!(summary.reverse_complemented, 1);
    assert_eq!(summary.single_mismatch, 0);

    let content = fs::read_to_string(&config.output).unwrap();
    assert_eq!(
        content,
        ">reference\nTTTGGGCCGTTT\n>fwd\n---GGGC-----\n>rc-RC\n------CCGTTT\n"
    );
    assert!(!config.mismatch_file.exists());
}

#[test]
fn run_writes_mismatch_report() {
    let dir = tempdir().unwrap();
    let config = config_in(
        &dir,
        ">ref\nACGTACGT\n",
        ">exact\nGTAC\n>one_off\nACCTACGT\n",
    );

    let summary = run(&config).unwrap();
    assert_eq!(summary.aligned, 2);
    assert_eq!(summary.single_mismatch, 1);

    let mismatches = fs::read_to_string(&config.mismatch_file).unwrap();
    assert_eq!(mismatches, ">one_off\nACCTACGT\n");

    let aligned = parse_fasta_file(&config.output).unwrap();
    let ids: Vec<&str> = aligned.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["reference", "exact", "one_off"]);
    assert_eq!(aligned.get("exact").unwrap().as_str(), "--GTAC--");
}

#[test]
fn run_output_parses_back_with_reference_length() {
    let dir = tempdir().unwrap();
    let mut config = config_in(
        &dir,
        ">ref\nGATTACAGATTACA\n>ignored\nAAAA\n",
        ">a\nTACA\n>b\nTGTAATC\n>c\nGATTAGA\n",
    );
    config.reference_id = "chrM".to_string();
    config.align.rc_suffix = "_rc".to_string();

    run(&config).unwrap();

    let aligned = parse_fasta_file(&config.output).unwrap();
    assert_eq!(aligned.first().unwrap().id, "chrM");
    for record in aligned.iter() {
        assert_eq!(record.len(), 14, "record {} has wrong length", record.id);
    }
    assert_eq!(aligned.get("a").unwrap().as_str(), "---TACA-------");
    assert_eq!(aligned.get("b_rc").unwrap().as_str(), "GATTACA-------");
    assert_eq!(aligned.get("c").unwrap().as_str(), "GATTAGA-------");
}

#[test]
fn run_parallel_matches_sequential() {
    let dir = tempdir().unwrap();
    let reference = ">ref\nACGTTGCAAGGCTTACCGATCGATCGGATCCAAGCTTGAATTCGCGGCCGC\n";
    let oligos = ">p1\nAAGGCTTA\n>p2\nGGATCCTT\n>p3\nTTCGCGGC\n>p4\nGCGGCCGC\n>p5\nCCCCCCCC\n>p6\nGAATTCGA\n";

    let sequential = config_in(&dir, reference, oligos);
    run(&sequential).unwrap();
    let expected = fs::read_to_string(&sequential.output).unwrap();

    let mut parallel = sequential.clone();
    parallel.output = dir.path().join("aligned_parallel.fa");
    parallel.align.threads = 3;
    run(&parallel).unwrap();

    assert_eq!(fs::read_to_string(&parallel.output).unwrap(), expected);
}

#[test]
fn run_rejects_empty_oligo_file() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir, ">ref\nACGT\n", "\n");

    let err = run(&config).unwrap_err();
    assert!(err.to_string().contains("Oligo file"));
    assert!(!Path::new(&config.output).exists());
}

#[test]
fn run_rejects_header_only_first_reference() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir, ">first\n>second\nACGTACGT\n", ">o\nGTAC\n");

    let err = run(&config).unwrap_err();
    assert!(err.to_string().contains("'first'"));
    assert!(err.to_string().contains("has no sequence"));
    assert!(!config.output.exists());
}

#[test]
fn run_uses_first_reference_record() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir, ">first\nGGGG\n>second\nACGTACGT\n", ">o\nGTAC\n");

    let summary = run(&config).unwrap();
    assert_eq!(summary.total, 1);
    assert_eq!(summary.aligned, 0);
    assert_eq!(
        fs::read_to_string(&config.output).unwrap(),
        ">reference\nGGGG\n"
    );
}

#[test]
fn run_rejects_missing_reference() {
    let dir = tempdir().unwrap();
    let mut config = config_in(&dir, ">ref\nACGT\n", ">o\nAC\n");
    config.reference = dir.path().join("missing.fa");

    let err = run(&config).unwrap_err();
    assert!(err.to_string().contains("Reference file"));
}

#[test]
fn empty_reference_is_an_align_error() {
    let oligos = oligo_aligner::fasta::parse_fasta_str(">o\nAC\n").unwrap();
    let result = oligo_aligner::align::resolve_all("", &oligos, &Default::default());
    assert!(matches!(result, Err(AlignError::EmptyReference)));
}
