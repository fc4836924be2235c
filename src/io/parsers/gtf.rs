//! GTF row types and the [`GtfIterator`] parsing iterator.
//!
//! GTF rows have nine tab-separated columns:
//! `seqname, source, feature, start, end, score, strand, frame, attribute`.
//! Coordinates are 1-based and inclusive on both ends.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::tsv::{deserialize_trimmed, TsvRecordIterator};
use crate::error::Gtf2BedError;
use crate::Position;

/// The number of columns in a GTF row.
pub const GTF_COLUMNS: usize = 9;

/// Nucleotide strand enum type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
    Unknown,
}

impl FromStr for Strand {
    type Err = Gtf2BedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            "." => Ok(Strand::Unknown),
            _ => Err(Gtf2BedError::InvalidStrand(s.to_string())),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Strand::Forward => "+",
            Strand::Reverse => "-",
            Strand::Unknown => ".",
        };
        f.write_str(s)
    }
}

impl Serialize for Strand {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One GTF row.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct GtfRecord {
    pub seqname: String,
    pub source: String,
    pub feature: String,
    pub start: Position,
    pub end: Position,
    pub score: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    pub strand: Strand,
    pub frame: String,
    pub attribute: String,
}

impl GtfRecord {
    /// Check the 1-based, end-inclusive coordinates are sensible.
    pub fn validate(self) -> Result<Self, Gtf2BedError> {
        if self.start < 1 || self.start > self.end {
            return Err(Gtf2BedError::InvalidGtfRange(self.start, self.end));
        }
        Ok(self)
    }

    pub fn is_transcript(&self) -> bool {
        self.feature == "transcript"
    }

    pub fn is_exon(&self) -> bool {
        self.feature == "exon"
    }
}

/// An iterator over GTF rows. Comment lines (starting with `'#'`) are
/// skipped, rows must have exactly [`GTF_COLUMNS`] columns, and each row's
/// coordinates are validated.
#[derive(Debug)]
pub struct GtfIterator {
    iter: TsvRecordIterator<GtfRecord>,
}

impl GtfIterator {
    /// Creates a parsing iterator over a (possibly gzip-compressed) GTF file.
    pub fn new(filepath: impl Into<PathBuf>) -> Result<Self, Gtf2BedError> {
        let iter = TsvRecordIterator::with_columns(filepath, GTF_COLUMNS)?;
        Ok(Self { iter })
    }
}

impl Iterator for GtfIterator {
    type Item = Result<GtfRecord, Gtf2BedError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter
            .next()
            .map(|result| result.and_then(GtfRecord::validate))
    }
}
