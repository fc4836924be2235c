//! Types and methods for reading and parsing input and writing output.

pub mod file;
pub mod parsers;

pub use file::{InputStream, OutputStream};
pub use parsers::{
    gtf::{GtfIterator, GtfRecord, Strand},
    tsv::TsvRecordIterator,
};
