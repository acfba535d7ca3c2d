//! Shared workbook models and read errors.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region CellValue

/// Normalized cell value read from a worksheet.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Numeric value (dates arrive as serial numbers).
    Number(f64),
    /// Boolean value.
    Bool(bool),
}

impl EnumCellValue {
    /// Spreadsheet-host truthiness: blank, `""`, `0`, `NaN` and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::None => false,
            Self::String(s) => !s.is_empty(),
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Bool(b) => *b,
        }
    }

    /// Text rendering; `None` for a blank cell.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::String(s) => Some(s.clone()),
            Self::Number(n) if n.is_infinite() => Some(
                if n.is_sign_positive() {
                    "Infinity"
                } else {
                    "-Infinity"
                }
                .to_string(),
            ),
            Self::Number(n) => Some(n.to_string()),
            Self::Bool(b) => Some(b.to_string()),
        }
    }
}

impl fmt::Display for EnumCellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text().unwrap_or_default())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetModels

/// One data row keyed by header name. Blank cells are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecSheetRow {
    /// 1-based worksheet row number, stable across dropped blank rows.
    pub n_row_sheet: u32,
    pub cells: BTreeMap<String, EnumCellValue>,
}

impl SpecSheetRow {
    pub fn get(&self, name_col: &str) -> Option<&EnumCellValue> {
        self.cells.get(name_col)
    }

    /// Text of `name_col` when present and truthy.
    pub fn get_truthy_text(&self, name_col: &str) -> Option<String> {
        self.get(name_col)
            .filter(|v| v.is_truthy())
            .and_then(EnumCellValue::to_text)
    }
}

/// Header list and data rows of the first worksheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecSheetTable {
    /// Worksheet name.
    pub name_sheet: String,
    /// Non-blank header cells of row 1 (`A1:ZZ1`), left to right.
    pub headers: Vec<String>,
    /// Data rows below the header row, fully blank rows dropped.
    pub rows: Vec<SpecSheetRow>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Workbook open / validation errors.
#[derive(Debug, Error)]
pub enum XlsxReadError {
    /// Path input is empty or does not name an existing file.
    #[error("{0}")]
    InvalidPath(String),
    /// File could not be opened as a workbook.
    #[error("Failed to open workbook {}: {message}", path.display())]
    OpenFailed {
        /// Workbook path.
        path: PathBuf,
        /// Reader error text.
        message: String,
    },
    /// Workbook holds zero worksheets.
    #[error("Excel file has no sheet")]
    NoSheets,
    /// First worksheet could not be decoded.
    #[error("Failed to read sheet {name_sheet}: {message}")]
    SheetReadFailed {
        /// Worksheet name.
        name_sheet: String,
        /// Reader error text.
        message: String,
    },
    /// Required header names absent from row 1; every missing name is listed.
    #[error("{}", format_missing_columns(.0))]
    MissingColumns(Vec<String>),
}

fn format_missing_columns(l_missing: &[String]) -> String {
    l_missing
        .iter()
        .map(|name| format!("The {name} column is required"))
        .collect::<Vec<_>>()
        .join("\n")
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{EnumCellValue, SpecSheetRow, XlsxReadError};

    #[test]
    fn cell_truthiness_follows_host_rules() {
        assert!(!EnumCellValue::None.is_truthy());
        assert!(!EnumCellValue::String(String::new()).is_truthy());
        assert!(!EnumCellValue::Number(0.0).is_truthy());
        assert!(!EnumCellValue::Number(f64::NAN).is_truthy());
        assert!(!EnumCellValue::Bool(false).is_truthy());
        assert!(EnumCellValue::String("0".to_string()).is_truthy());
        assert!(EnumCellValue::Number(2.0).is_truthy());
    }

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(EnumCellValue::Number(2024.0).to_text().as_deref(), Some("2024"));
        assert_eq!(EnumCellValue::Number(1.5).to_text().as_deref(), Some("1.5"));
        assert_eq!(EnumCellValue::None.to_text(), None);
    }

    #[test]
    fn row_truthy_text_skips_blank_strings() {
        let mut row = SpecSheetRow::default();
        row.cells
            .insert("A".to_string(), EnumCellValue::String(String::new()));
        row.cells
            .insert("B".to_string(), EnumCellValue::String("x".to_string()));
        assert_eq!(row.get_truthy_text("A"), None);
        assert_eq!(row.get_truthy_text("B").as_deref(), Some("x"));
        assert_eq!(row.get_truthy_text("C"), None);
    }

    #[test]
    fn missing_columns_message_lists_every_name() {
        let err = XlsxReadError::MissingColumns(vec!["Pattern".to_string(), "TargetPath".to_string()]);
        assert_eq!(
            err.to_string(),
            "The Pattern column is required\nThe TargetPath column is required"
        );
    }
}
