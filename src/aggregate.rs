//! Grouping annotated GTF rows by transcript, and reducing each group to a
//! single [`TranscriptRecord`].
//!
//! # Coordinates
//!
//! GTF is 1-based and end-inclusive. Under the default
//! [`CoordinateConvention::Legacy`], both the transcript start *and end* have
//! one subtracted, and block sizes are `end - start`. This reproduces the
//! output of the tool this converter replaces, but note that a standard
//! 1-based inclusive to 0-based half-open conversion leaves the end
//! unchanged; that is [`CoordinateConvention::HalfOpen`].
//!
//! # Block order
//!
//! Blocks are emitted in the order their exon rows were encountered, not
//! sorted by position. For transcripts not on the forward strand, the block
//! size and block start lists are each reversed. So, forward-strand
//! `blockStarts` are only ascending if the input exons were in coordinate
//! order; this is the caller's responsibility.

use indexmap::IndexMap;

use crate::attributes::AnnotatedFeature;
use crate::bed12::TranscriptRecord;
use crate::error::Gtf2BedError;
use crate::io::{GtfRecord, Strand};
use crate::{Position, PositionOffset};

/// The order transcript groups (and hence output lines) are produced in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GroupOrder {
    /// The order each transcript ID first appears in the input.
    #[default]
    FirstAppearance,
    /// Lexicographically sorted by transcript ID.
    Sorted,
}

/// What to do when a transcript group is malformed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MalformedGroupPolicy {
    /// Stop the whole run with an error.
    #[default]
    Abort,
    /// Drop the group, warn, and continue.
    Skip,
}

/// How GTF coordinates are converted to BED coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CoordinateConvention {
    /// `end0 = end - 1`, `size = end - start`.
    #[default]
    Legacy,
    /// `end0 = end`, `size = end - start + 1`.
    HalfOpen,
}

impl CoordinateConvention {
    fn end(&self, end: Position) -> Position {
        match self {
            CoordinateConvention::Legacy => end - 1,
            CoordinateConvention::HalfOpen => end,
        }
    }

    fn block_size(&self, exon: &GtfRecord) -> Position {
        match self {
            CoordinateConvention::Legacy => exon.end - exon.start,
            CoordinateConvention::HalfOpen => exon.end - exon.start + 1,
        }
    }
}

/// Annotated rows grouped by transcript ID.
#[derive(Debug, Default)]
pub struct TranscriptGroups {
    pub groups: IndexMap<String, Vec<AnnotatedFeature>>,
    /// Rows with no transcript ID (e.g. gene rows), which belong to no group.
    pub unassigned: usize,
}

impl TranscriptGroups {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[AnnotatedFeature])> {
        self.groups
            .iter()
            .map(|(transcript_id, rows)| (transcript_id.as_str(), rows.as_slice()))
    }
}

/// Group rows by transcript ID. Within a group, rows keep their input order.
pub fn group_by_transcript(rows: Vec<AnnotatedFeature>, order: GroupOrder) -> TranscriptGroups {
    let mut grouped = TranscriptGroups::default();
    for row in rows {
        match row.attributes.transcript_id.clone() {
            Some(transcript_id) => grouped.groups.entry(transcript_id).or_default().push(row),
            None => grouped.unassigned += 1,
        }
    }
    if order == GroupOrder::Sorted {
        grouped.groups.sort_keys();
    }
    grouped
}

/// Check every row in the group agrees with the first on sequence name and strand.
fn check_consistency(transcript_id: &str, rows: &[AnnotatedFeature]) -> Result<(), Gtf2BedError> {
    let Some(first) = rows.first() else {
        return Ok(());
    };
    for row in &rows[1..] {
        if row.record.seqname != first.record.seqname {
            return Err(Gtf2BedError::InconsistentGroup(
                transcript_id.to_string(),
                "sequence name",
                first.record.seqname.clone(),
                row.record.seqname.clone(),
            ));
        }
        if row.record.strand != first.record.strand {
            return Err(Gtf2BedError::InconsistentGroup(
                transcript_id.to_string(),
                "strand",
                first.record.strand.to_string(),
                row.record.strand.to_string(),
            ));
        }
    }
    Ok(())
}

/// Reduce the rows of one transcript to a [`TranscriptRecord`].
///
/// The group must have exactly one `transcript` row and at least one `exon`
/// row, and all rows must share a sequence name and strand; otherwise this
/// returns a malformed-group error naming `transcript_id`.
pub fn aggregate_transcript(
    transcript_id: &str,
    rows: &[AnnotatedFeature],
    convention: CoordinateConvention,
) -> Result<TranscriptRecord, Gtf2BedError> {
    let transcripts: Vec<&GtfRecord> = rows
        .iter()
        .map(|row| &row.record)
        .filter(|record| record.is_transcript())
        .collect();
    let transcript = match transcripts.as_slice() {
        [transcript] => *transcript,
        _ => {
            return Err(Gtf2BedError::TranscriptRowCount(
                transcript_id.to_string(),
                transcripts.len(),
            ))
        }
    };

    let exons: Vec<&GtfRecord> = rows
        .iter()
        .map(|row| &row.record)
        .filter(|record| record.is_exon())
        .collect();
    if exons.is_empty() {
        return Err(Gtf2BedError::NoExons(transcript_id.to_string()));
    }

    check_consistency(transcript_id, rows)?;

    // the name and strand come from the group's first row
    let first = &rows[0];
    let strand = first.record.strand;
    let name = first
        .name
        .clone()
        .unwrap_or_else(|| transcript_id.to_string());

    let mut block_sizes: Vec<Position> =
        exons.iter().map(|exon| convention.block_size(exon)).collect();
    let mut block_starts: Vec<PositionOffset> = exons
        .iter()
        .map(|exon| exon.start as PositionOffset - transcript.start as PositionOffset)
        .collect();

    if strand != Strand::Forward {
        block_sizes.reverse();
        block_starts.reverse();
    }

    let start = transcript.start - 1;
    let end = convention.end(transcript.end);

    Ok(TranscriptRecord {
        chrom: transcript.seqname.clone(),
        start,
        end,
        name,
        score: 0,
        strand,
        thick_start: start,
        thick_end: end,
        item_rgb: 0,
        block_sizes,
        block_starts,
    })
}
