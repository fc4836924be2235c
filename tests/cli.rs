//! Validation of the `gtf2bed12` command line tool.

use gtf2bed12::test_utilities::{gtf2bed12_binary_path, random_gtffile};
use std::fs;
use std::process::Command;

#[test]
fn test_example_to_stdout() {
    let output = Command::new(gtf2bed12_binary_path())
        .arg("--gtf-file")
        .arg("tests_data/example.gtf")
        .output()
        .expect("gtf2bed12 failed");

    assert!(output.status.success(), "{:?}", output);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        fs::read_to_string("tests_data/example.bed").unwrap()
    );
}

#[test]
fn test_example_to_gzip_file() {
    let dir = tempfile::tempdir().unwrap();
    let bed_path = dir.path().join("example.bed.gz");

    let output = Command::new(gtf2bed12_binary_path())
        .arg("-g")
        .arg("tests_data/example.gtf")
        .arg("--output")
        .arg(&bed_path)
        .output()
        .expect("gtf2bed12 failed");

    assert!(output.status.success(), "{:?}", output);
    // nothing but logging on stderr, and no BED lines on stdout
    assert!(output.stdout.is_empty());

    let gzipped = fs::read(&bed_path).unwrap();
    assert_eq!(&gzipped[..2], &[0x1f, 0x8b]);
    let mut decoded = String::new();
    std::io::Read::read_to_string(
        &mut flate2::read::GzDecoder::new(gzipped.as_slice()),
        &mut decoded,
    )
    .unwrap();
    assert_eq!(decoded, fs::read_to_string("tests_data/example.bed").unwrap());
}

#[test]
fn test_bed12plus_fails() {
    let output = Command::new(gtf2bed12_binary_path())
        .arg("-g")
        .arg("tests_data/example.gtf")
        .arg("--bed12plus")
        .output()
        .expect("gtf2bed12 failed to start");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not yet implemented"));
}

#[test]
fn test_malformed_abort_and_skip() {
    let output = Command::new(gtf2bed12_binary_path())
        .arg("-g")
        .arg("tests_data/malformed.gtf")
        .output()
        .expect("gtf2bed12 failed to start");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ENST00000000002.1"));

    let output = Command::new(gtf2bed12_binary_path())
        .arg("-g")
        .arg("tests_data/malformed.gtf")
        .arg("--skip-malformed")
        .output()
        .expect("gtf2bed12 failed");
    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 2);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ENST00000000002.1"));
    assert!(stderr.contains("ENST00000000003.1"));
}

#[test]
fn test_random_gtf_threads_and_chunks_agree() {
    let gtf = random_gtffile(2_000);

    let run = |threads: &str, chunks: &str| {
        let output = Command::new(gtf2bed12_binary_path())
            .arg("-g")
            .arg(gtf.path())
            .arg("--threads")
            .arg(threads)
            .arg("--chunks")
            .arg(chunks)
            .output()
            .expect("gtf2bed12 failed");
        assert!(output.status.success(), "{:?}", output);
        output.stdout
    };

    let reference = run("1", "1");
    assert_eq!(String::from_utf8_lossy(&reference).lines().count(), 2_000);
    assert_eq!(run("4", "1000"), reference);
    assert_eq!(run("2", "7"), reference);
}

#[test]
fn test_half_open_and_sort() {
    let output = Command::new(gtf2bed12_binary_path())
        .arg("-g")
        .arg("tests_data/example.gtf")
        .arg("--half-open")
        .arg("--sort")
        .output()
        .expect("gtf2bed12 failed");
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first = stdout.lines().next().unwrap();
    assert_eq!(
        first,
        "chr2\t3143475\t3144545\t4933401J01Rik\t0\t+\t3143475\t3144545\t0\t1\t1070\t0"
    );
}
