//! Workbook loading, column validation and row extraction.

use std::path::Path;

use sheetcopy_io_xlsx::{
    C_COL_PATTERN, C_COL_SOURCE_PATH, C_COL_TARGET_PATH, SpecSheetTable, TUP_REQUIRED_COLUMNS,
    XlsxReadError, read_first_sheet, validate_required_columns,
};
use tracing::{debug, info};

use crate::conf::C_INPUT_EXCEL_FILE_PATH;
use crate::spec::SpecCopyJobRow;

fn validate_excel_file_path(path_excel_file: Option<&Path>) -> Result<&Path, XlsxReadError> {
    let Some(path_file) = path_excel_file.filter(|p| !p.as_os_str().is_empty()) else {
        return Err(XlsxReadError::InvalidPath(
            "Excel file path is not a valid file path".to_string(),
        ));
    };
    if !path_file.is_file() {
        return Err(XlsxReadError::InvalidPath(format!(
            "Not found {C_INPUT_EXCEL_FILE_PATH}: {}",
            path_file.display()
        )));
    }
    Ok(path_file)
}

/// Open the workbook, read its first sheet and require the copy-job columns.
///
/// Every failure here is fatal to the run: no row is processed.
pub fn load_copy_sheet(path_excel_file: Option<&Path>) -> Result<SpecSheetTable, XlsxReadError> {
    let path_file = validate_excel_file_path(path_excel_file)?;

    info!("Open Excel file {}", path_file.display());
    let table = read_first_sheet(path_file)?;
    info!("Read sheet {}", table.name_sheet);
    info!("Headers found in sheet {}", table.headers.join(","));

    validate_required_columns(&table.headers, &TUP_REQUIRED_COLUMNS)?;
    info!("{} rows loaded", table.rows.len());
    Ok(table)
}

/// Turn sheet rows into copy jobs, in sheet order.
///
/// Rows without a truthy `SourcePath` or `TargetPath` are skipped without being recorded as
/// errors.
pub fn extract_copy_jobs(table: &SpecSheetTable) -> Vec<SpecCopyJobRow> {
    table
        .rows
        .iter()
        .filter_map(|row| {
            let path_source = row.get_truthy_text(C_COL_SOURCE_PATH);
            let path_target = row.get_truthy_text(C_COL_TARGET_PATH);
            match (path_source, path_target) {
                (Some(path_source), Some(path_target)) => Some(SpecCopyJobRow {
                    path_source,
                    pattern: row.get_truthy_text(C_COL_PATTERN),
                    path_target,
                }),
                _ => {
                    debug!(
                        "Row {} skipped: SourcePath or TargetPath is empty",
                        row.n_row_sheet
                    );
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use rust_xlsxwriter::Workbook;
    use sheetcopy_io_xlsx::{EnumCellValue, SpecSheetRow, SpecSheetTable, XlsxReadError};
    use tempfile::TempDir;

    use super::{extract_copy_jobs, load_copy_sheet};

    fn row(cells: &[(&str, &str)]) -> SpecSheetRow {
        let mut spec_row = SpecSheetRow::default();
        for (c_key, c_value) in cells {
            spec_row.cells.insert(
                c_key.to_string(),
                EnumCellValue::String(c_value.to_string()),
            );
        }
        spec_row
    }

    fn write_headers(path: &Path, headers: &[&str]) {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        for (n_col, c_header) in headers.iter().enumerate() {
            worksheet
                .write_string(0, n_col as u16, *c_header)
                .expect("write header");
        }
        workbook.save(path).expect("save workbook");
    }

    #[test]
    fn extract_copy_jobs_keeps_order_and_skips_incomplete_rows() {
        let table = SpecSheetTable {
            name_sheet: "Sheet1".to_string(),
            headers: vec![
                "SourcePath".to_string(),
                "Pattern".to_string(),
                "TargetPath".to_string(),
            ],
            rows: vec![
                row(&[("SourcePath", "A"), ("Pattern", "*.txt"), ("TargetPath", "B")]),
                row(&[("SourcePath", "A"), ("TargetPath", "")]),
                row(&[("Pattern", "*.txt"), ("TargetPath", "B")]),
                row(&[("SourcePath", "C"), ("TargetPath", "D")]),
            ],
        };

        let l_jobs = extract_copy_jobs(&table);
        assert_eq!(l_jobs.len(), 2);
        assert_eq!(l_jobs[0].path_source, "A");
        assert_eq!(l_jobs[0].pattern.as_deref(), Some("*.txt"));
        assert_eq!(l_jobs[1].path_source, "C");
        assert_eq!(l_jobs[1].pattern, None);
        assert_eq!(l_jobs[1].path_target, "D");
    }

    #[test]
    fn load_copy_sheet_requires_path() {
        let err = load_copy_sheet(None).expect_err("missing path");
        assert!(matches!(err, XlsxReadError::InvalidPath(_)));
        assert_eq!(err.to_string(), "Excel file path is not a valid file path");

        let err = load_copy_sheet(Some(Path::new(""))).expect_err("empty path");
        assert!(matches!(err, XlsxReadError::InvalidPath(_)));
    }

    #[test]
    fn load_copy_sheet_rejects_missing_file() {
        let tmp = TempDir::new().expect("tempdir");
        let path_xlsx = tmp.path().join("absent.xlsx");
        let err = load_copy_sheet(Some(path_xlsx.as_path())).expect_err("absent file");
        assert!(err.to_string().starts_with("Not found excelFilePath: "));
    }

    #[test]
    fn load_copy_sheet_lists_every_missing_column() {
        let tmp = TempDir::new().expect("tempdir");
        let path_xlsx = tmp.path().join("partial.xlsx");
        write_headers(&path_xlsx, &["SourcePath", "Comment"]);

        let err = load_copy_sheet(Some(path_xlsx.as_path())).expect_err("missing columns");
        assert_eq!(
            err.to_string(),
            "The Pattern column is required\nThe TargetPath column is required"
        );
    }

    #[test]
    fn load_copy_sheet_accepts_header_only_sheet() {
        let tmp = TempDir::new().expect("tempdir");
        let path_xlsx = tmp.path().join("jobs.xlsx");
        write_headers(&path_xlsx, &["SourcePath", "Pattern", "TargetPath"]);

        let table = load_copy_sheet(Some(path_xlsx.as_path())).expect("load");
        assert!(table.rows.is_empty());
        assert!(extract_copy_jobs(&table).is_empty());
    }
}
