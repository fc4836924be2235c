//! BED12 transcript records and their serialization.
//!
//! A BED12 line describes a transcript as one outer range plus a list of
//! *blocks* (exons), given as comma-separated block sizes and block starts
//! relative to the range start. See the
//! [BED specification](https://samtools.github.io/hts-specs/BEDv1.pdf).

use crate::error::Gtf2BedError;
use crate::io::Strand;
use crate::traits::TsvSerialize;
use crate::{Position, PositionOffset};

/// Which flavor of BED output to produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// The standard twelve BED columns.
    #[default]
    Bed12,
    /// BED12 with the transcript ID as a 13th column. Not implemented.
    Bed12Plus,
}

impl OutputMode {
    /// Fail up front on modes that are not supported, rather than silently
    /// falling back to standard BED12.
    pub fn check(&self) -> Result<(), Gtf2BedError> {
        match self {
            OutputMode::Bed12 => Ok(()),
            OutputMode::Bed12Plus => Err(Gtf2BedError::Bed12PlusUnimplemented),
        }
    }
}

/// One aggregated transcript, ready to be written as a BED12 line.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptRecord {
    pub chrom: String,
    pub start: Position,
    pub end: Position,
    pub name: String,
    pub score: u32,
    pub strand: Strand,
    pub thick_start: Position,
    pub thick_end: Position,
    pub item_rgb: u32,
    pub block_sizes: Vec<Position>,
    pub block_starts: Vec<PositionOffset>,
}

impl TranscriptRecord {
    /// The number of blocks (exons).
    pub fn block_count(&self) -> usize {
        self.block_sizes.len()
    }
}

fn comma_join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(|x| x.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

impl TsvSerialize for TranscriptRecord {
    fn to_tsv(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom,
            self.start,
            self.end,
            self.name,
            self.score,
            self.strand,
            self.thick_start,
            self.thick_end,
            self.item_rgb,
            self.block_count(),
            comma_join(&self.block_sizes),
            comma_join(&self.block_starts),
        )
    }
}
