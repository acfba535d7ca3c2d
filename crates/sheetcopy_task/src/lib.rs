//! `sheetcopy_task` v1:
//! Build-pipeline step that copies files listed in a workbook.
//!
//! Layout:
//! - `conf`     : task configuration and defaults
//! - `spec`     : variables, job rows, host enums, errors
//! - `resolver` : `$(name)` placeholder substitution
//! - `loader`   : workbook loading, column validation, row extraction
//! - `executor` : one copy job over a [`executor::CopyPrimitive`]
//! - `report`   : aggregate result of a run
//! - `task`     : sequential orchestration and host reporting
//! - `host`     : task-host seam (issues and terminal result)
//! - `cli`      : command-line surface
pub mod cli;
pub mod conf;
pub mod executor;
pub mod host;
pub mod loader;
pub mod report;
pub mod resolver;
pub mod spec;
pub mod task;

pub use conf::SpecTaskConfig;
pub use executor::{CopyPrimitive, GlobCopyPrimitive, copy_job};
pub use host::{ConsoleTaskHost, TaskHost};
pub use loader::{extract_copy_jobs, load_copy_sheet};
pub use report::ReportCopyTask;
pub use resolver::VariableResolver;
pub use spec::{CopyJobError, EnumIssueType, EnumTaskResult, SpecCopyJobRow, SpecVariableInfo};
pub use task::{execute_copy_task, run_copy_task};
