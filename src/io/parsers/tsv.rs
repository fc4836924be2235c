//! Essential TSV parsing functionality, which wraps the blazingly-fast [`csv`] crate's
//! deserialization method using [`serde`].

use csv::{Reader, ReaderBuilder, StringRecord, StringRecordsIntoIter};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use std::io::{BufReader, Read};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::Gtf2BedError;
use crate::io::InputStream;

type TsvStream = BufReader<Box<dyn Read>>;

/// Build a TSV reader which ignores comment lines, works on gzip-compressed
/// files, etc.
///
/// Quoting is disabled: GTF attribute columns contain literal `"` characters
/// that must reach the attribute parser untouched. The reader is flexible about
/// row length; column counts are checked by [`TsvRecordIterator`].
pub fn build_tsv_reader(filepath: impl Into<PathBuf>) -> Result<Reader<TsvStream>, Gtf2BedError> {
    let stream = InputStream::new(filepath).reader()?;
    let reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(stream);
    Ok(reader)
}

/// Deserializes some value of type `T` from a string column, trimming surrounding
/// whitespace first.
pub fn deserialize_trimmed<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    s.trim()
        .parse::<T>()
        .map_err(|e| DeError::custom(format!("parsing error: {}", e)))
}

/// A generic TSV parsing iterator, yielding one deserialized `T` per non-comment row.
///
/// If constructed with [`TsvRecordIterator::with_columns()`], rows with any other
/// number of columns are rejected with [`Gtf2BedError::WrongColumnCount`], rather
/// than having their trailing columns silently dropped by deserialization.
pub struct TsvRecordIterator<T> {
    inner: StringRecordsIntoIter<TsvStream>,
    ncols: Option<usize>,
    phantom: std::marker::PhantomData<T>,
}

impl<T> std::fmt::Debug for TsvRecordIterator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TsvRecordIterator")
            .field("ncols", &self.ncols)
            .finish_non_exhaustive()
    }
}

impl<T> TsvRecordIterator<T>
where
    for<'de> T: Deserialize<'de>,
{
    /// Create a new TSV reader. This will skip lines that begin with `'#'`.
    pub fn new(filepath: impl Into<PathBuf>) -> Result<Self, Gtf2BedError> {
        let reader = build_tsv_reader(filepath)?;
        Ok(Self {
            inner: reader.into_records(),
            ncols: None,
            phantom: std::marker::PhantomData,
        })
    }

    /// Create a new TSV reader that requires exactly `ncols` columns per row.
    pub fn with_columns(filepath: impl Into<PathBuf>, ncols: usize) -> Result<Self, Gtf2BedError> {
        let mut iter = Self::new(filepath)?;
        iter.ncols = Some(ncols);
        Ok(iter)
    }

    fn parse_record(&self, record: StringRecord) -> Result<T, Gtf2BedError> {
        if let Some(expected) = self.ncols {
            if record.len() != expected {
                let line = record.position().map_or(0, |pos| pos.line());
                return Err(Gtf2BedError::WrongColumnCount(line, expected, record.len()));
            }
        }
        Ok(record.deserialize(None)?)
    }
}

impl<T> Iterator for TsvRecordIterator<T>
where
    for<'de> T: Deserialize<'de>,
{
    type Item = Result<T, Gtf2BedError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        Some(
            result
                .map_err(Gtf2BedError::from)
                .and_then(|record| self.parse_record(record)),
        )
    }
}
