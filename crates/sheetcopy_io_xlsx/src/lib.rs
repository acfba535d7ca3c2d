//! `sheetcopy_io_xlsx` v1:
//! Rust-side workbook reader for copy-job sheets.
//!
//! Layout:
//! - `conf`   : constants (header range, required columns)
//! - `spec`   : specs/models/errors
//! - `util`   : pure helper functions
//! - `reader` : first-sheet reader on top of calamine
pub mod conf;
pub mod reader;
pub mod spec;
pub mod util;

pub use conf::{
    C_COL_PATTERN, C_COL_SOURCE_PATH, C_COL_TARGET_PATH, N_NCOLS_HEADER_MAX, TUP_REQUIRED_COLUMNS,
};
pub use reader::read_first_sheet;
pub use spec::{EnumCellValue, SpecSheetRow, SpecSheetTable, XlsxReadError};
pub use util::{select_first_sheet_name, validate_required_columns};
