//! gtf2bed12: convert per-feature GTF transcript annotations into
//! per-transcript BED12 records.
//!
//! The pipeline has three stages:
//!
//!  1. [`attributes`]: a stateless, parallel map that pulls the transcript ID, gene ID,
//!     and gene name out of each row's attribute column.
//!  2. [`aggregate`]: rows are grouped by transcript ID and each group is reduced to a
//!     single [`TranscriptRecord`].
//!  3. [`bed12`]: each [`TranscriptRecord`] is serialized as a BED12 line.
//!
//! [`TranscriptRecord`]: crate::bed12::TranscriptRecord

pub mod aggregate;
pub mod attributes;
pub mod bed12;
pub mod commands;
pub mod error;
pub mod io;
pub mod reporting;
pub mod test_utilities;
pub mod traits;

#[cfg(not(feature = "big-position"))]
pub type Position = u32;
#[cfg(feature = "big-position")]
pub type Position = u64;

/// A signed offset, used for block starts relative to the transcript start.
pub type PositionOffset = i64;

/// The default number of chunks the row table is split into for parallel
/// attribute extraction.
pub const DEFAULT_CHUNKS: usize = 1000;

pub mod prelude {
    pub use crate::aggregate::{
        aggregate_transcript, group_by_transcript, CoordinateConvention, GroupOrder,
        MalformedGroupPolicy,
    };
    pub use crate::attributes::{annotate_rows, AnnotatedFeature, TranscriptAttributes};
    pub use crate::bed12::{OutputMode, TranscriptRecord};
    pub use crate::commands::{gtf_to_bed12, ConvertOptions};
    pub use crate::error::Gtf2BedError;
    pub use crate::io::{GtfIterator, GtfRecord, InputStream, OutputStream, Strand};
    pub use crate::traits::TsvSerialize;
}
