//! Parsing iterators for annotation formats.
//!
//! Each row of a file is yielded as a parsed record, which can then be filtered or collected
//! through the standard [`Iterator`] trait methods. Under the hood, rows are deserialized with
//! the [`csv`] crate using [`serde`], which handles both plaintext and gzip-compressed input.
//!
//! At the moment, the only record type is the nine-column GTF row, [`GtfRecord`].
//!
//! [`GtfRecord`]: crate::io::parsers::gtf::GtfRecord

pub mod gtf;
pub mod tsv;
