//! Attribute extraction: pulling transcript and gene identifiers out of the GTF
//! attribute column.
//!
//! Each row is handled independently, so extraction is a stateless map that
//! [`annotate_rows()`] runs in parallel over contiguous chunks of the row table.
//! The result is identical for any chunking.

use lazy_static::lazy_static;
use log::debug;
use rayon::prelude::*;
use regex::Regex;

use crate::error::Gtf2BedError;
use crate::io::GtfRecord;

lazy_static! {
    /// Ensembl transcript IDs, e.g. `ENST00000456328.2` or `ENSMUST00000193812.1`.
    static ref TRANSCRIPT_ID: Regex =
        Regex::new(r#"transcript_id "(ENSM?U?S?T[0-9.]+)";"#).expect("valid regex");
    /// Ensembl gene IDs, e.g. `ENSG00000223972.5`.
    static ref GENE_ID: Regex =
        Regex::new(r#"gene_id "(ENSM?U?S?G[0-9.]+)";"#).expect("valid regex");
    static ref GENE_NAME: Regex = Regex::new(r#"gene_name "(\w+)";"#).expect("valid regex");
}

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// The identifiers extracted from one row's attribute column. A field is
/// `None` when its pattern does not match; this is not an error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranscriptAttributes {
    pub transcript_id: Option<String>,
    pub gene_id: Option<String>,
    pub gene_name: Option<String>,
}

impl TranscriptAttributes {
    /// Extract the first match of each identifier pattern from `attribute`.
    pub fn extract(attribute: &str) -> Self {
        Self {
            transcript_id: first_capture(&TRANSCRIPT_ID, attribute),
            gene_id: first_capture(&GENE_ID, attribute),
            gene_name: first_capture(&GENE_NAME, attribute),
        }
    }

    /// The name shown in the BED name column: the gene name, falling back to
    /// the gene ID, then the transcript ID.
    pub fn display_name(&self) -> Option<&str> {
        self.gene_name
            .as_deref()
            .or(self.gene_id.as_deref())
            .or(self.transcript_id.as_deref())
    }
}

/// A [`GtfRecord`] annotated with its extracted identifiers and resolved
/// display name.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotatedFeature {
    pub record: GtfRecord,
    pub attributes: TranscriptAttributes,
    pub name: Option<String>,
}

impl AnnotatedFeature {
    pub fn new(record: GtfRecord) -> Self {
        let attributes = TranscriptAttributes::extract(&record.attribute);
        let name = attributes.display_name().map(String::from);
        Self {
            record,
            attributes,
            name,
        }
    }

    pub fn transcript_id(&self) -> Option<&str> {
        self.attributes.transcript_id.as_deref()
    }
}

/// Annotate every row, splitting the table into `n_chunks` contiguous chunks
/// that are processed in parallel on the current [`rayon`] thread pool. Rows
/// are returned in input order.
pub fn annotate_rows(
    rows: Vec<GtfRecord>,
    n_chunks: usize,
) -> Result<Vec<AnnotatedFeature>, Gtf2BedError> {
    if n_chunks == 0 {
        return Err(Gtf2BedError::InvalidChunkCount(n_chunks));
    }
    let nrows = rows.len();
    let chunk_size = ((nrows + n_chunks - 1) / n_chunks).max(1);
    debug!(
        "annotating {} rows in chunks of {} rows ({} threads)",
        nrows,
        chunk_size,
        rayon::current_num_threads()
    );

    let chunks: Vec<Vec<AnnotatedFeature>> = rows
        .into_par_iter()
        .chunks(chunk_size)
        .map(|chunk| chunk.into_iter().map(AnnotatedFeature::new).collect())
        .collect();

    Ok(chunks.into_iter().flatten().collect())
}
