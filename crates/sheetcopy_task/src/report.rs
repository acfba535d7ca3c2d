//! Aggregate result of one copy run.

use std::fmt;

use sheetcopy_io_fs::SpecCopiedFile;

use crate::spec::CopyJobError;

/// Files copied and row failures, in row order.
///
/// Both lists only grow: files by concatenation, errors by append.
#[derive(Debug, Default, Clone)]
pub struct ReportCopyTask {
    files: Vec<SpecCopiedFile>,
    errors: Vec<CopyJobError>,
}

impl ReportCopyTask {
    pub fn extend_files(&mut self, files: Vec<SpecCopiedFile>) {
        self.files.extend(files);
    }

    pub fn add_error(&mut self, error: CopyJobError) {
        self.errors.push(error);
    }

    pub fn files(&self) -> &[SpecCopiedFile] {
        &self.files
    }

    pub fn errors(&self) -> &[CopyJobError] {
        &self.errors
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Terminal message for the host.
    pub fn summary(&self) -> String {
        if self.is_success() {
            format!(
                "Copy task executed successfully with {} file(s) copied",
                self.files.len()
            )
        } else {
            format!("Copy task has failed with {} error(s)", self.errors.len())
        }
    }
}

impl fmt::Display for ReportCopyTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}
