//! Workbook layout constants.

/// Header cells are read from row 1, columns `A..=ZZ`.
pub const N_NCOLS_HEADER_MAX: usize = 26 + 26 * 26;

/// Column naming the source directory (or file) of a copy job.
pub const C_COL_SOURCE_PATH: &str = "SourcePath";
/// Optional glob appended under the source directory.
pub const C_COL_PATTERN: &str = "Pattern";
/// Column naming the destination directory of a copy job.
pub const C_COL_TARGET_PATH: &str = "TargetPath";

/// Header names every copy-job sheet must carry (exact, case-sensitive).
pub const TUP_REQUIRED_COLUMNS: [&str; 3] = [C_COL_SOURCE_PATH, C_COL_PATTERN, C_COL_TARGET_PATH];
