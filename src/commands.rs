//! The end-to-end GTF to BED12 conversion command.

use log::{debug, info, warn};
use rayon::ThreadPoolBuilder;
use std::io::Write;
use std::path::PathBuf;

use crate::{
    aggregate::{
        aggregate_transcript, group_by_transcript, CoordinateConvention, GroupOrder,
        MalformedGroupPolicy,
    },
    attributes::{annotate_rows, AnnotatedFeature},
    bed12::OutputMode,
    error::Gtf2BedError,
    io::{GtfIterator, GtfRecord, OutputStream},
    reporting::{CommandOutput, Report},
    traits::TsvSerialize,
    DEFAULT_CHUNKS,
};

/// Settings for [`gtf_to_bed12()`].
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    pub mode: OutputMode,
    /// Number of chunks the rows are split into for parallel attribute extraction.
    pub chunks: usize,
    /// Number of worker threads; `None` uses the global [`rayon`] pool.
    pub threads: Option<usize>,
    pub order: GroupOrder,
    pub malformed: MalformedGroupPolicy,
    pub convention: CoordinateConvention,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            chunks: DEFAULT_CHUNKS,
            threads: None,
            order: GroupOrder::default(),
            malformed: MalformedGroupPolicy::default(),
            convention: CoordinateConvention::default(),
        }
    }
}

fn annotate(
    rows: Vec<GtfRecord>,
    options: &ConvertOptions,
) -> Result<Vec<AnnotatedFeature>, Gtf2BedError> {
    match options.threads {
        Some(num_threads) => {
            let pool = ThreadPoolBuilder::new().num_threads(num_threads).build()?;
            pool.install(|| annotate_rows(rows, options.chunks))
        }
        None => annotate_rows(rows, options.chunks),
    }
}

/// Convert a GTF file into BED12, with one line per transcript.
///
/// Output is written to `output`, or standard output if `None`. The returned
/// [`CommandOutput`] holds the number of BED12 lines written. If a group is
/// malformed under [`MalformedGroupPolicy::Abort`], nothing is written.
pub fn gtf_to_bed12(
    gtf_file: &PathBuf,
    output: Option<&PathBuf>,
    options: &ConvertOptions,
) -> Result<CommandOutput<usize>, Gtf2BedError> {
    options.mode.check()?;

    let rows = GtfIterator::new(gtf_file)?.collect::<Result<Vec<_>, _>>()?;
    info!("read {} GTF rows from {}", rows.len(), gtf_file.display());

    let annotated = annotate(rows, options)?;
    let groups = group_by_transcript(annotated, options.order);
    info!("found {} transcripts", groups.len());

    // For reporting stuff to the user.
    let mut report = Report::new();
    if groups.unassigned > 0 {
        report.add_issue(format!(
            "{} rows had no matching transcript ID and were ignored",
            groups.unassigned
        ));
    }

    // Every group is aggregated before the output is opened, so an aborted
    // run writes nothing.
    let total = groups.len();
    let progress_step = (total / 10).max(1);
    let mut records = Vec::with_capacity(total);
    let mut skipped = 0;
    for (i, (transcript_id, rows)) in groups.iter().enumerate() {
        match aggregate_transcript(transcript_id, rows, options.convention) {
            Ok(record) => records.push(record),
            Err(e)
                if e.is_malformed_group() && options.malformed == MalformedGroupPolicy::Skip =>
            {
                warn!("skipping transcript: {}", e);
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
        if (i + 1) % progress_step == 0 {
            debug!("processed {}/{} transcripts", i + 1, total);
        }
    }

    let output_stream = output.map_or(OutputStream::new_stdout(), |file| OutputStream::new(file));
    let mut writer = output_stream.writer()?;
    for record in &records {
        writeln!(writer, "{}", record.to_tsv())?;
    }
    writer.flush()?;
    let written = records.len();

    if skipped > 0 {
        report.add_issue(format!("{} malformed transcripts were skipped", skipped));
    }
    info!("wrote {} BED12 records", written);
    Ok(CommandOutput::new(written, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utilities::random_gtffile;
    use std::fs;

    fn convert_to_string(
        gtf_file: &str,
        options: &ConvertOptions,
    ) -> Result<String, Gtf2BedError> {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.bed");
        gtf_to_bed12(&PathBuf::from(gtf_file), Some(&output), options)?;
        Ok(fs::read_to_string(output).unwrap())
    }

    #[test]
    fn test_example_gtf() {
        let result = convert_to_string("tests_data/example.gtf", &ConvertOptions::default()).unwrap();
        let expected = fs::read_to_string("tests_data/example.bed").unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_example_sorted() {
        let options = ConvertOptions {
            order: GroupOrder::Sorted,
            ..Default::default()
        };
        let result = convert_to_string("tests_data/example.gtf", &options).unwrap();
        let names: Vec<&str> = result
            .lines()
            .map(|line| line.split('\t').nth(3).unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "4933401J01Rik",
                "DDX11L1",
                "ENSG00000243485.5",
                "WASH7P",
                "ENST00000641515.2"
            ]
        );
    }

    #[test]
    fn test_chunking_and_threads_are_idempotent() {
        let reference = convert_to_string("tests_data/example.gtf", &ConvertOptions::default()).unwrap();
        for (chunks, threads) in [(1, Some(1)), (3, Some(2)), (10_000, None)] {
            let options = ConvertOptions {
                chunks,
                threads,
                ..Default::default()
            };
            assert_eq!(convert_to_string("tests_data/example.gtf", &options).unwrap(), reference);
        }
    }

    #[test]
    fn test_report_unassigned_rows() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.bed");
        let result = gtf_to_bed12(
            &PathBuf::from("tests_data/example.gtf"),
            Some(&output),
            &ConvertOptions::default(),
        )
        .unwrap();
        assert_eq!(result.value, 5);
        // three gene rows lack a transcript ID
        assert_eq!(result.report.issues().len(), 1);
        assert!(result.report.issues()[0].starts_with("3 rows"));
    }

    #[test]
    fn test_malformed_abort() {
        let err = convert_to_string("tests_data/malformed.gtf", &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, Gtf2BedError::TranscriptRowCount(ref id, 2) if id == "ENST00000000002.1"));
    }

    #[test]
    fn test_malformed_abort_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.bed");
        let result = gtf_to_bed12(
            &PathBuf::from("tests_data/malformed.gtf"),
            Some(&output),
            &ConvertOptions::default(),
        );
        assert!(result.is_err());
        // the well-formed transcript before the malformed one is not written
        assert!(!output.exists());
    }

    #[test]
    fn test_malformed_skip() {
        let options = ConvertOptions {
            malformed: MalformedGroupPolicy::Skip,
            ..Default::default()
        };
        let result = convert_to_string("tests_data/malformed.gtf", &options).unwrap();
        assert_eq!(
            result,
            "chr1\t99\t199\tFoo\t0\t+\t99\t199\t0\t2\t30,30\t0,70\n\
             chr2\t999\t1999\tQux\t0\t-\t999\t1999\t0\t2\t200,500\t0,500\n"
        );
    }

    #[test]
    fn test_bed12plus_unimplemented() {
        let options = ConvertOptions {
            mode: OutputMode::Bed12Plus,
            ..Default::default()
        };
        let err = convert_to_string("tests_data/example.gtf", &options).unwrap_err();
        assert!(matches!(err, Gtf2BedError::Bed12PlusUnimplemented));
    }

    #[test]
    fn test_random_gtf_one_line_per_transcript() {
        let n = 500;
        let gtf = random_gtffile(n);
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.bed");
        let result = gtf_to_bed12(
            &gtf.path().to_path_buf(),
            Some(&output),
            &ConvertOptions::default(),
        )
        .unwrap();
        assert_eq!(result.value, n);
        assert!(result.report.is_empty());

        let contents = fs::read_to_string(output).unwrap();
        for line in contents.lines() {
            let columns: Vec<&str> = line.split('\t').collect();
            assert_eq!(columns.len(), 12);
            let block_count: usize = columns[9].parse().unwrap();
            assert_eq!(columns[10].split(',').count(), block_count);
            assert_eq!(columns[11].split(',').count(), block_count);
            // exons are generated in transcription order, so the blocks
            // always start at the transcript start
            assert_eq!(columns[11].split(',').next(), Some("0"));
        }
    }
}
