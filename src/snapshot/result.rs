//! Outcome record for one snapshot run.

use std::path::{Path, PathBuf};

/// What a snapshot run captured, in the order it happened.
///
/// Labels are paths relative to [`destination`](Self::destination). Only the
/// orchestrator records into it; everyone else gets a finished value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotResult {
    destination: PathBuf,
    copied: Vec<String>,
    exported: Vec<String>,
    notes: Vec<String>,
}

impl SnapshotResult {
    pub(crate) fn new(destination: PathBuf) -> Self {
        Self {
            destination,
            copied: Vec::new(),
            exported: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Files and directories duplicated into the snapshot.
    pub fn copied(&self) -> &[String] {
        &self.copied
    }

    /// Command output captured into the snapshot.
    pub fn exported(&self) -> &[String] {
        &self.exported
    }

    /// Human-readable warnings.
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub(crate) fn record_copied(&mut self, label: impl Into<String>) {
        self.copied.push(label.into());
    }

    pub(crate) fn record_exported(&mut self, label: impl Into<String>) {
        self.exported.push(label.into());
    }

    pub(crate) fn note(&mut self, note: impl Into<String>) {
        let note = note.into();
        tracing::info!(note = %note, "snapshot note");
        self.notes.push(note);
    }
}
