//! Sequential orchestration of all copy jobs and terminal host reporting.

use sheetcopy_io_xlsx::XlsxReadError;
use tracing::{error, info};

use crate::conf::SpecTaskConfig;
use crate::executor::{CopyPrimitive, copy_job};
use crate::host::TaskHost;
use crate::loader::{extract_copy_jobs, load_copy_sheet};
use crate::report::ReportCopyTask;
use crate::resolver::VariableResolver;
use crate::spec::EnumTaskResult;

/// Load the workbook and fold every job into one report, strictly one copy at a time.
///
/// A load or validation failure returns before any row is copied. A failed row is recorded
/// and the next row still runs.
pub fn execute_copy_task(
    spec_task_cfg: &SpecTaskConfig,
    primitive: &dyn CopyPrimitive,
    host: &mut dyn TaskHost,
) -> Result<ReportCopyTask, XlsxReadError> {
    let resolver = VariableResolver::new(spec_task_cfg.variables.clone());
    let table = load_copy_sheet(spec_task_cfg.path_excel_file.as_deref())?;

    let mut report = ReportCopyTask::default();
    for spec_job in extract_copy_jobs(&table) {
        let source_spec = resolver.resolve(&spec_job.derive_source_spec());
        let target = resolver.resolve(&spec_job.path_target);
        match copy_job(primitive, host, &source_spec, &target) {
            Ok(files) => report.extend_files(files),
            Err(e) => report.add_error(e),
        }
    }
    Ok(report)
}

/// Run the task and send exactly one terminal result to `host`.
pub fn run_copy_task(
    spec_task_cfg: &SpecTaskConfig,
    primitive: &dyn CopyPrimitive,
    host: &mut dyn TaskHost,
) -> EnumTaskResult {
    match execute_copy_task(spec_task_cfg, primitive, host) {
        Ok(report) if report.is_success() => {
            info!("{report}");
            host.set_result(EnumTaskResult::Succeeded, &report.summary());
            EnumTaskResult::Succeeded
        }
        Ok(report) => {
            error!("{report}");
            host.set_result(EnumTaskResult::Failed, &report.summary());
            EnumTaskResult::Failed
        }
        Err(e) => {
            error!("{e}");
            host.set_result(EnumTaskResult::Failed, &e.to_string());
            EnumTaskResult::Failed
        }
    }
}
