//! Traits used by the gtf2bed12 library.
//!

/// Defines how to serialize something to TSV.
pub trait TsvSerialize {
    // Serialize something to a TSV [`String`].
    fn to_tsv(&self) -> String;
}
