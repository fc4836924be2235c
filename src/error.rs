//! The [`Gtf2BedError`] `enum` definition and error messages.
//!
use crate::Position;
use std::num::ParseIntError;
use thiserror::Error;

/// The [`Gtf2BedError`] defines the standard set of errors that should
/// be passed to the user.
#[derive(Debug, Error)]
pub enum Gtf2BedError {
    // IO related errors
    #[error("File reading error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("GTF parsing error: {0}")]
    CsvError(#[from] csv::Error),

    // File parsing related errors
    #[error("Integer parsing error: {0}")]
    ParseIntError(#[from] ParseIntError),
    #[error("Line {0}: expected {1} tab-separated columns, found {2}")]
    WrongColumnCount(u64, usize, usize),
    #[error("Invalid strand '{0}': must be either '+', '-', or '.'")]
    InvalidStrand(String),
    #[error("GTF range invalid: start ({0}) must be >= 1 and <= end ({1})")]
    InvalidGtfRange(Position, Position),

    // Malformed transcript groups
    #[error("Malformed transcript '{0}': expected exactly one 'transcript' row, found {1}")]
    TranscriptRowCount(String, usize),
    #[error("Malformed transcript '{0}': no 'exon' rows")]
    NoExons(String),
    #[error("Malformed transcript '{0}': rows disagree on {1} ('{2}' vs '{3}')")]
    InconsistentGroup(String, &'static str, String, String),

    // Command line tool related errors
    #[error("BED12+ output (transcript ID as a 13th column) is not yet implemented")]
    Bed12PlusUnimplemented,
    #[error("Invalid chunk count: {0} (must be at least 1)")]
    InvalidChunkCount(usize),
    #[error("Command line argument error: {0}")]
    ArgumentError(#[from] clap::error::Error),
    #[error("Could not build the thread pool: {0}")]
    ThreadPoolError(#[from] rayon::ThreadPoolBuildError),
    #[error("Could not initialize logging: {0}")]
    LoggerError(#[from] log::SetLoggerError),
}

impl Gtf2BedError {
    /// Whether this error describes a structurally malformed transcript group,
    /// as opposed to an I/O, parsing, or configuration problem.
    pub fn is_malformed_group(&self) -> bool {
        matches!(
            self,
            Gtf2BedError::TranscriptRowCount(..)
                | Gtf2BedError::NoExons(_)
                | Gtf2BedError::InconsistentGroup(..)
        )
    }
}
