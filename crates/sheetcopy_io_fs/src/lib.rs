//! `sheetcopy_io_fs` v1:
//! Glob expansion and recursive file-copy primitive.
//!
//! Layout:
//! - `copy`   : glob walk and copy orchestration
//! - `spec`   : enums/options/errors
//! - `report` : run-time report model
//! - `util`   : shared helper functions

pub mod copy;
pub mod report;
pub mod spec;
mod util;

pub use copy::copy_glob;
pub use report::{ReportCopy, ReportCopyBuilder};
pub use spec::{
    CopyGlobError, EnumCopyFileConflictStrategy, SpecCopiedFile, SpecCopyError, SpecCopyOptions,
};
