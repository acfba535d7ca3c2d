//! Command-line surface of the `sheetcopy` binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use sheetcopy_io_fs::{EnumCopyFileConflictStrategy, SpecCopyOptions};

use crate::conf::{C_LOG_LEVEL_DEFAULT, SpecTaskConfig};
use crate::spec::SpecVariableInfo;

/// Copy files listed in a workbook (columns SourcePath, Pattern, TargetPath).
#[derive(Debug, Parser)]
#[command(name = "sheetcopy", version, about)]
pub struct Cli {
    /// Workbook whose first sheet lists the copy jobs
    #[arg(long = "excel-file-path", env = "INPUT_EXCELFILEPATH", value_name = "PATH")]
    pub excel_file_path: Option<PathBuf>,

    /// Variable for `$(name)` placeholders; repeatable
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_variable)]
    pub variables: Vec<SpecVariableInfo>,

    /// Also expose every process environment variable to placeholders
    #[arg(long)]
    pub import_env: bool,

    /// What to do when a destination file already exists
    #[arg(long, value_enum, default_value_t = EnumConflictArg::Overwrite)]
    pub conflict: EnumConflictArg,

    /// Copy every match directly into the target, dropping subdirectories
    #[arg(long)]
    pub flatten: bool,

    /// Maximum parallel file copies inside one job
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// List what would be copied without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Tracing filter used when RUST_LOG is unset
    #[arg(long, default_value = C_LOG_LEVEL_DEFAULT)]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnumConflictArg {
    Overwrite,
    Skip,
    Error,
}

impl From<EnumConflictArg> for EnumCopyFileConflictStrategy {
    fn from(value: EnumConflictArg) -> Self {
        match value {
            EnumConflictArg::Overwrite => Self::Overwrite,
            EnumConflictArg::Skip => Self::Skip,
            EnumConflictArg::Error => Self::Error,
        }
    }
}

fn parse_variable(raw: &str) -> Result<SpecVariableInfo, String> {
    let Some((name, value)) = raw.split_once('=') else {
        return Err(format!("expected NAME=VALUE, got `{raw}`"));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("variable name is empty in `{raw}`"));
    }
    Ok(SpecVariableInfo::new(name, value))
}

impl Cli {
    /// Build the run configuration; explicit `--var` entries shadow imported environment.
    pub fn into_task_config(self) -> SpecTaskConfig {
        let mut variables = self.variables;
        if self.import_env {
            variables.extend(
                std::env::vars().map(|(name, value)| SpecVariableInfo::new(name, value)),
            );
        }

        SpecTaskConfig {
            path_excel_file: self.excel_file_path,
            variables,
            spec_cp_options: SpecCopyOptions {
                rule_conflict_file: self.conflict.into(),
                if_flatten: self.flatten,
                num_workers_max: self.workers,
                if_dry_run: self.dry_run,
            },
        }
    }
}
