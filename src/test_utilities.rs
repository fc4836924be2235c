//! Test cases and test utility functions.
//!

use rand::{seq::SliceRandom, thread_rng, Rng};
use std::path::PathBuf;
use tempfile::NamedTempFile;

use crate::{
    attributes::AnnotatedFeature,
    io::{GtfRecord, Strand},
    Position,
};

// Random GTF defaults
//
// exon count per transcript
pub const MIN_EXONS: usize = 1;
pub const MAX_EXONS: usize = 12;

// exon and intron lengths
pub const MIN_LEN: Position = 20;
pub const MAX_LEN: Position = 2000;

// number of chromosome sequences
pub const NCHROM: usize = 22;

/// Get the path to the `gtf2bed12` binary built alongside the integration tests.
pub fn gtf2bed12_binary_path() -> PathBuf {
    let mut path = std::env::current_exe().expect("could not get test executable path");
    // test executables live in target/<profile>/deps
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("gtf2bed12");
    path
}

/// Build a single GTF row. `strand` must be `"+"`, `"-"`, or `"."`.
pub fn gtf_row(
    seqname: &str,
    feature: &str,
    start: Position,
    end: Position,
    strand: &str,
    attribute: &str,
) -> GtfRecord {
    GtfRecord {
        seqname: seqname.to_string(),
        source: "test".to_string(),
        feature: feature.to_string(),
        start,
        end,
        score: ".".to_string(),
        strand: strand.parse().expect("invalid test strand"),
        frame: ".".to_string(),
        attribute: attribute.to_string(),
    }
}

/// Annotate rows serially, for tests of the downstream stages.
pub fn annotated_rows(rows: Vec<GtfRecord>) -> Vec<AnnotatedFeature> {
    rows.into_iter().map(AnnotatedFeature::new).collect()
}

/// Sample a random chromosome
pub fn random_chrom() -> String {
    let mut rng = thread_rng();
    format!("chr{}", rng.gen_range(1..NCHROM + 1))
}

/// Build the rows of one random transcript: a `transcript` row, followed by
/// its exons (and the occasional `CDS` row) in transcription order, so
/// reverse-strand exons are in descending coordinate order.
pub fn random_transcript(index: usize) -> Vec<GtfRecord> {
    let mut rng = thread_rng();
    let seqname = random_chrom();
    let strand = *[Strand::Forward, Strand::Reverse]
        .choose(&mut rng)
        .expect("non-empty");
    let strand = strand.to_string();

    let attribute = if rng.gen_bool(0.8) {
        format!(
            "gene_id \"ENSG{:011}.1\"; transcript_id \"ENST{:011}.1\"; gene_name \"GENE{}\";",
            index, index, index
        )
    } else {
        format!(
            "gene_id \"ENSG{:011}.1\"; transcript_id \"ENST{:011}.1\";",
            index, index
        )
    };

    let nexons = rng.gen_range(MIN_EXONS..=MAX_EXONS);
    let mut exons = Vec::with_capacity(nexons);
    let mut position: Position = rng.gen_range(1..1_000_000);
    for _ in 0..nexons {
        let len = rng.gen_range(MIN_LEN..MAX_LEN);
        exons.push((position, position + len));
        position += len + rng.gen_range(MIN_LEN..MAX_LEN);
    }
    let start = exons[0].0;
    let end = exons[nexons - 1].1;
    if strand == "-" {
        exons.reverse();
    }

    let mut rows = vec![gtf_row(&seqname, "transcript", start, end, &strand, &attribute)];
    for (exon_start, exon_end) in exons {
        rows.push(gtf_row(&seqname, "exon", exon_start, exon_end, &strand, &attribute));
        if rng.gen_bool(0.3) {
            rows.push(gtf_row(&seqname, "CDS", exon_start, exon_end, &strand, &attribute));
        }
    }
    rows
}

/// Build the rows of `n` random transcripts.
pub fn random_gtf(n: usize) -> Vec<GtfRecord> {
    (0..n).flat_map(random_transcript).collect()
}

/// Write GTF rows to a temporary file, with a leading comment line.
pub fn temp_gtffile(rows: &[GtfRecord]) -> NamedTempFile {
    let file = NamedTempFile::new().expect("could not create temporary file");
    {
        use std::io::Write;
        let mut handle = file.as_file();
        writeln!(handle, "#!genome-build test").expect("could not write comment");
    }
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(file.as_file());
    for row in rows {
        writer.serialize(row).expect("could not write GTF row");
    }
    writer.flush().expect("could not flush GTF file");
    drop(writer);
    file
}

/// Create a random GTF file of `n` transcripts.
pub fn random_gtffile(n: usize) -> NamedTempFile {
    temp_gtffile(&random_gtf(n))
}
