//! Copy report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::spec::{SpecCopiedFile, SpecCopyError};

/// Aggregate file list and diagnostics for one `copy_glob` run.
#[derive(Debug, Default, Clone)]
pub struct ReportCopy {
    /// Copied files in walk order.
    pub files: Vec<SpecCopiedFile>,
    /// Total scanned file entries under the glob base.
    pub cnt_scanned: u64,
    /// Number of scanned files that matched the glob.
    pub cnt_matched: u64,
    /// Number of matches skipped by conflict strategy.
    pub cnt_skipped: u64,
    /// Non-fatal warnings collected during walk/copy.
    pub warnings: Vec<String>,
    /// Per-file failures.
    pub errors: Vec<SpecCopyError>,
}

impl ReportCopy {
    /// Number of copied files.
    pub fn copied_count(&self) -> usize {
        self.files.len()
    }

    /// Number of collected hard errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_scanned".to_string(), self.cnt_scanned);
        dict_counts.insert("cnt_matched".to_string(), self.cnt_matched);
        dict_counts.insert("cnt_copied".to_string(), self.copied_count() as u64);
        dict_counts.insert("cnt_skipped".to_string(), self.cnt_skipped);
        dict_counts.insert("cnt_errors".to_string(), self.error_count() as u64);
        dict_counts.insert("cnt_warnings".to_string(), self.warnings.len() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} scanned={} matched={} copied={} skipped={} errors={} warnings={}",
            dict_counts["cnt_scanned"],
            dict_counts["cnt_matched"],
            dict_counts["cnt_copied"],
            dict_counts["cnt_skipped"],
            dict_counts["cnt_errors"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[COPY]"))
    }
}

/// Mutable accumulator for one copy run.
#[derive(Debug, Default, Clone)]
pub struct ReportCopyBuilder {
    files: Vec<SpecCopiedFile>,
    cnt_scanned: u64,
    cnt_matched: u64,
    cnt_skipped: u64,
    warnings: Vec<String>,
    errors: Vec<SpecCopyError>,
}

impl ReportCopyBuilder {
    pub fn add_scanned(&mut self) {
        self.cnt_scanned += 1;
    }

    pub fn add_matched(&mut self) {
        self.cnt_matched += 1;
    }

    pub fn add_skipped(&mut self) {
        self.cnt_skipped += 1;
    }

    /// Record one committed (or planned) file.
    pub fn add_copied(&mut self, path_src: PathBuf, path_dst: PathBuf) {
        self.files.push(SpecCopiedFile { path_src, path_dst });
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Add one path-scoped error.
    pub fn add_error(&mut self, path: PathBuf, exception: String) {
        self.errors.push(SpecCopyError { path, exception });
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportCopy {
        ReportCopy {
            files: self.files,
            cnt_scanned: self.cnt_scanned,
            cnt_matched: self.cnt_matched,
            cnt_skipped: self.cnt_skipped,
            warnings: self.warnings,
            errors: self.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::ReportCopyBuilder;

    #[test]
    fn report_copy_format_counts_files_and_errors() {
        let mut builder = ReportCopyBuilder::default();
        for _ in 0..4 {
            builder.add_scanned();
        }
        builder.add_matched();
        builder.add_matched();
        builder.add_copied(PathBuf::from("a/x.txt"), PathBuf::from("b/x.txt"));
        builder.add_error(PathBuf::from("b/y.txt"), "denied".to_string());
        builder.add_warning("w".to_string());

        let report = builder.build();
        assert_eq!(report.copied_count(), 1);
        assert_eq!(report.error_count(), 1);

        let txt = report.format("[COPY]");
        assert_eq!(
            txt,
            "[COPY] scanned=4 matched=2 copied=1 skipped=0 errors=1 warnings=1"
        );
        assert_eq!(report.to_string(), txt);
    }
}
