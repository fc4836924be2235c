//! Types for standardized reports to the user about a conversion run.
//!
//! Issues that do not stop a run, e.g. skipped malformed transcripts or rows
//! that belong to no transcript, are collected in a [`Report`] and returned
//! alongside the command's value in a [`CommandOutput`].

/// The [`CommandOutput<U>`] type output is generic over some data output
/// from a command, and a [`Report`] that reports information to the user.
#[derive(Debug)]
pub struct CommandOutput<U> {
    pub value: U,
    pub report: Report,
}

impl<U> CommandOutput<U> {
    pub fn new(value: U, report: Report) -> Self {
        Self { value, report }
    }
}

/// A type to (semi) standardize reporting to the user.
#[derive(Debug, Default)]
pub struct Report {
    entries: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, message: String) {
        self.entries.push(message)
    }

    pub fn issues(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
