//! Copy specification models and top-level error types.

use std::path::PathBuf;

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Existing destination file conflict policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumCopyFileConflictStrategy {
    /// Keep destination file and skip current source file.
    Skip,
    /// Replace destination file with source file.
    Overwrite,
    /// Record an error and skip this file.
    Error,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Input options for `copy_glob`.
#[derive(Debug, Clone)]
pub struct SpecCopyOptions {
    /// Conflict behavior for destination files.
    pub rule_conflict_file: EnumCopyFileConflictStrategy,
    /// Drop the relative source tree and copy every match directly into the destination.
    pub if_flatten: bool,
    /// Maximum worker threads for file-copy stage.
    pub num_workers_max: Option<usize>,
    /// Do not mutate filesystem; record what would be copied.
    pub if_dry_run: bool,
}

impl Default for SpecCopyOptions {
    fn default() -> Self {
        Self {
            rule_conflict_file: EnumCopyFileConflictStrategy::Overwrite,
            if_flatten: false,
            num_workers_max: None,
            if_dry_run: false,
        }
    }
}

/// One copied (or, in dry-run, planned) file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCopiedFile {
    /// Matched source file.
    pub path_src: PathBuf,
    /// Written destination file.
    pub path_dst: PathBuf,
}

/// One copy failure item with path + error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCopyError {
    /// Failed source or destination path.
    pub path: PathBuf,
    /// User-facing error text.
    pub exception: String,
}

/// "Top-level call failed" errors (input validation / setup stage).
#[derive(Debug, Error)]
pub enum CopyGlobError {
    /// Source spec is empty.
    #[error("Source path is empty")]
    EmptySource,
    /// Invalid glob remainder in the source spec.
    #[error("Invalid pattern {pattern:?}: {message}")]
    InvalidPattern {
        /// Glob text that failed to compile.
        pattern: String,
        /// Compiler message.
        message: String,
    },
    /// Literal (glob-free) source does not exist.
    #[error("Source not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// Destination directory initialization failed.
    #[error("Failed to initialize destination {}: {message}", path.display())]
    DestinationInitFailed {
        /// Destination path that failed initialization.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
