//! One copy job: resolved source spec to resolved target over a copy primitive.

use std::path::Path;

use sheetcopy_io_fs::{ReportCopy, SpecCopiedFile, SpecCopyOptions, copy_glob};
use tracing::{debug, error, info, warn};

use crate::host::TaskHost;
use crate::spec::{CopyJobError, EnumIssueType};

/// Recursive copy with glob expansion, as seen by the executor.
///
/// Returns the run report (matched and skipped counts, copied files, warnings) or the
/// primitive's failure text.
pub trait CopyPrimitive {
    fn expand_and_copy(&self, source_spec: &str, path_target: &Path) -> Result<ReportCopy, String>;
}

/// [`CopyPrimitive`] backed by [`copy_glob`].
#[derive(Debug, Clone, Default)]
pub struct GlobCopyPrimitive {
    spec_cp_options: SpecCopyOptions,
}

impl GlobCopyPrimitive {
    pub fn new(spec_cp_options: SpecCopyOptions) -> Self {
        Self { spec_cp_options }
    }
}

impl CopyPrimitive for GlobCopyPrimitive {
    fn expand_and_copy(&self, source_spec: &str, path_target: &Path) -> Result<ReportCopy, String> {
        let report = copy_glob(source_spec, path_target, self.spec_cp_options.clone())
            .map_err(|e| e.to_string())?;
        debug!("{report}");

        match report.errors.first() {
            None => Ok(report),
            Some(spec_error) => Err(format!(
                "{} file(s) failed to copy from {source_spec}; first: {}: {}",
                report.error_count(),
                spec_error.path.display(),
                spec_error.exception
            )),
        }
    }
}

/// Copy `source_spec` to `target`; zero matched files is a failure.
///
/// Matches all left in place by the conflict rule are a success with no files. Primitive
/// warnings go to the host as warning issues; failures are logged as error issues before
/// being returned.
pub fn copy_job(
    primitive: &dyn CopyPrimitive,
    host: &mut dyn TaskHost,
    source_spec: &str,
    target: &str,
) -> Result<Vec<SpecCopiedFile>, CopyJobError> {
    info!("Copy {source_spec} to {target}");
    let res_copy = primitive
        .expand_and_copy(source_spec, Path::new(target))
        .map_err(|message| CopyJobError::CopyPrimitiveError {
            source_spec: source_spec.to_string(),
            message,
        })
        .and_then(|report| {
            for warning in &report.warnings {
                warn!("{warning}");
                host.log_issue(EnumIssueType::Warning, warning);
            }
            if report.cnt_matched == 0 {
                return Err(CopyJobError::NoFilesCopied {
                    source_spec: source_spec.to_string(),
                });
            }
            if report.cnt_skipped > 0 {
                info!("{} matched file(s) skipped for {target}", report.cnt_skipped);
            }
            Ok(report.files)
        });

    match res_copy {
        Ok(files) => {
            info!("{} file(s) copied to {target}", files.len());
            Ok(files)
        }
        Err(e) => {
            error!("{e}");
            host.log_issue(EnumIssueType::Error, &e.to_string());
            Err(e)
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::path::{Path, PathBuf};

    use sheetcopy_io_fs::{ReportCopy, SpecCopiedFile};

    use super::CopyPrimitive;

    /// Scripted primitive: answers calls in order and records what it was asked.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedCopyPrimitive {
        answers: RefCell<VecDeque<Result<usize, String>>>,
        pub(crate) calls: RefCell<Vec<(String, PathBuf)>>,
    }

    impl ScriptedCopyPrimitive {
        /// `Ok(n)` answers with `n` fake files, `Err(msg)` with a primitive failure.
        pub(crate) fn new(answers: Vec<Result<usize, String>>) -> Self {
            Self {
                answers: RefCell::new(answers.into()),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CopyPrimitive for ScriptedCopyPrimitive {
        fn expand_and_copy(
            &self,
            source_spec: &str,
            path_target: &Path,
        ) -> Result<ReportCopy, String> {
            self.calls
                .borrow_mut()
                .push((source_spec.to_string(), path_target.to_path_buf()));
            let answer = self.answers.borrow_mut().pop_front().unwrap_or(Ok(0));
            answer.map(|n_files| ReportCopy {
                files: (0..n_files)
                    .map(|n_idx| SpecCopiedFile {
                        path_src: Path::new(source_spec).join(format!("f{n_idx}")),
                        path_dst: path_target.join(format!("f{n_idx}")),
                    })
                    .collect(),
                cnt_scanned: n_files as u64,
                cnt_matched: n_files as u64,
                ..ReportCopy::default()
            })
        }
    }
}
