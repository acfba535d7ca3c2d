//! First-sheet workbook reader on top of calamine.

use std::collections::BTreeSet;
use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};

use crate::conf::N_NCOLS_HEADER_MAX;
use crate::spec::{EnumCellValue, SpecSheetRow, SpecSheetTable, XlsxReadError};
use crate::util::select_first_sheet_name;

/// Read header list and data rows of the first worksheet in `file_path`.
///
/// Headers come from row 1, columns `A..=ZZ`. Data rows are keyed by the first row of the
/// sheet's used range; blank cells are left out and fully blank rows dropped. The format is
/// detected from the extension (`xlsx`, `xlsm`, `xlsb`, `xls`, `ods`).
pub fn read_first_sheet<P: AsRef<Path>>(file_path: P) -> Result<SpecSheetTable, XlsxReadError> {
    let path_file = file_path.as_ref();
    if path_file.as_os_str().is_empty() {
        return Err(XlsxReadError::InvalidPath(
            "Excel file path is not a valid file path".to_string(),
        ));
    }

    let mut workbook =
        open_workbook_auto(path_file).map_err(|e| XlsxReadError::OpenFailed {
            path: path_file.to_path_buf(),
            message: e.to_string(),
        })?;
    let l_sheet_names = workbook.sheet_names();
    let name_sheet = select_first_sheet_name(&l_sheet_names)?.to_string();
    let range = workbook
        .worksheet_range(&name_sheet)
        .map_err(|e| XlsxReadError::SheetReadFailed {
            name_sheet: name_sheet.clone(),
            message: e.to_string(),
        })?;

    Ok(SpecSheetTable {
        headers: derive_header_row(&range),
        rows: derive_data_rows(&range),
        name_sheet,
    })
}

fn convert_data_to_cell_value(data: &Data) -> EnumCellValue {
    match data {
        Data::Empty | Data::Error(_) => EnumCellValue::None,
        Data::String(s) => EnumCellValue::String(s.clone()),
        Data::Int(n) => EnumCellValue::Number(*n as f64),
        Data::Float(n) => EnumCellValue::Number(*n),
        Data::Bool(b) => EnumCellValue::Bool(*b),
        Data::DateTime(dt) => EnumCellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => EnumCellValue::String(s.clone()),
    }
}

fn derive_header_row(range: &Range<Data>) -> Vec<String> {
    let n_col_end = range
        .end()
        .map_or(0, |(_, n_col)| (n_col as usize + 1).min(N_NCOLS_HEADER_MAX));
    (0..n_col_end)
        .filter_map(|n_col| range.get_value((0, n_col as u32)))
        .filter_map(|data| convert_data_to_cell_value(data).to_text())
        .filter(|c_header| !c_header.is_empty())
        .collect()
}

fn derive_data_rows(range: &Range<Data>) -> Vec<SpecSheetRow> {
    let n_row_start = range.start().map_or(0, |(n_row, _)| n_row);
    let mut iter_rows = range.rows();
    let Some(row_header) = iter_rows.next() else {
        return Vec::new();
    };

    // First occurrence of a duplicated header keeps the key.
    let mut set_seen = BTreeSet::new();
    let l_keys = row_header
        .iter()
        .map(|data| {
            convert_data_to_cell_value(data)
                .to_text()
                .filter(|c_key| !c_key.is_empty() && set_seen.insert(c_key.clone()))
        })
        .collect::<Vec<_>>();

    iter_rows
        .zip(1u32..)
        .filter_map(|(row, n_offset)| {
            let mut spec_row = SpecSheetRow {
                n_row_sheet: n_row_start + n_offset + 1,
                ..SpecSheetRow::default()
            };
            for (c_key, data) in l_keys.iter().zip(row) {
                let Some(c_key) = c_key else {
                    continue;
                };
                let value = convert_data_to_cell_value(data);
                if value != EnumCellValue::None {
                    spec_row.cells.insert(c_key.clone(), value);
                }
            }
            (!spec_row.cells.is_empty()).then_some(spec_row)
        })
        .collect()
}
