//! Task-level models, host enums and per-row errors.

use std::fmt;
use std::path::Path;

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region Models

/// One named value supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecVariableInfo {
    pub name: String,
    pub value: String,
}

impl SpecVariableInfo {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One eligible worksheet row: source and target are present, pattern is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCopyJobRow {
    pub path_source: String,
    pub pattern: Option<String>,
    pub path_target: String,
}

impl SpecCopyJobRow {
    /// Source directory joined with the pattern, or the bare source when no pattern is set.
    ///
    /// Leading separators on the pattern are dropped so it always lands under the source.
    pub fn derive_source_spec(&self) -> String {
        match &self.pattern {
            Some(pattern) => {
                let pattern_rel = pattern.trim_start_matches(['/', '\\']);
                Path::new(&self.path_source)
                    .join(pattern_rel)
                    .to_string_lossy()
                    .into_owned()
            }
            None => self.path_source.clone(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region HostEnums

/// Severity of an issue logged to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumIssueType {
    Error,
    Warning,
}

impl EnumIssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// Terminal result of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumTaskResult {
    Succeeded,
    Failed,
}

impl EnumTaskResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
        }
    }

    /// Process exit code reported by the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Succeeded => 0,
            Self::Failed => 1,
        }
    }
}

impl fmt::Display for EnumTaskResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Failure of one row's copy. Recovered by the orchestrator, never fatal to the run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CopyJobError {
    /// The primitive matched zero files.
    #[error("No file copied from {source_spec}")]
    NoFilesCopied { source_spec: String },
    /// The primitive itself failed (permission, missing source, bad pattern...).
    #[error("{message}")]
    CopyPrimitiveError {
        source_spec: String,
        message: String,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::SpecCopyJobRow;

    fn job(path_source: &str, pattern: Option<&str>, path_target: &str) -> SpecCopyJobRow {
        SpecCopyJobRow {
            path_source: path_source.to_string(),
            pattern: pattern.map(str::to_string),
            path_target: path_target.to_string(),
        }
    }

    #[test]
    fn source_spec_joins_pattern_under_source() {
        let spec_job = job("A", Some("*.txt"), "B");
        assert_eq!(
            spec_job.derive_source_spec(),
            Path::new("A").join("*.txt").to_string_lossy()
        );
    }

    #[test]
    fn source_spec_without_pattern_is_source() {
        assert_eq!(job("A", None, "B").derive_source_spec(), "A");
    }

    #[test]
    fn source_spec_keeps_rooted_pattern_under_source() {
        let spec_job = job("$(Build.BinariesDirectory)", Some("/bin/*.dll"), "out");
        assert_eq!(
            spec_job.derive_source_spec(),
            Path::new("$(Build.BinariesDirectory)")
                .join("bin/*.dll")
                .to_string_lossy()
        );
    }
}
