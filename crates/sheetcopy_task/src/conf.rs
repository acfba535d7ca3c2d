//! Task configuration and defaults.

use std::path::PathBuf;

use sheetcopy_io_fs::SpecCopyOptions;

use crate::spec::SpecVariableInfo;

/// Host input name of the workbook path.
pub const C_INPUT_EXCEL_FILE_PATH: &str = "excelFilePath";
/// Default tracing filter when `RUST_LOG` is unset.
pub const C_LOG_LEVEL_DEFAULT: &str = "info";

/// Everything one run needs, built once before any row is processed.
#[derive(Debug, Clone, Default)]
pub struct SpecTaskConfig {
    /// Workbook listing the copy jobs.
    pub path_excel_file: Option<PathBuf>,
    /// Named values for placeholder resolution, looked up first-match.
    pub variables: Vec<SpecVariableInfo>,
    /// Options handed to the copy primitive for every row.
    pub spec_cp_options: SpecCopyOptions,
}
