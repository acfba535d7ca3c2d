use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};

use crate::report::ReportCopyBuilder;
use crate::spec::{CopyGlobError, EnumCopyFileConflictStrategy};

////////////////////////////////////////////////////////////////////////////////
// #region GlobSource

const TUP_GLOB_META: [char; 4] = ['*', '?', '[', '{'];

/// Source spec split into a literal walk base and an optional glob remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SpecGlobSource {
    pub(crate) path_dir_base: PathBuf,
    pub(crate) pattern: Option<String>,
}

fn _has_glob_meta(part: &str) -> bool {
    part.contains(TUP_GLOB_META)
}

/// Split `source_spec` at the first path component holding a glob metacharacter.
///
/// `build/out/**/*.dll` becomes base `build/out` and pattern `**/*.dll`. A spec without
/// metacharacters is returned whole as the base with no pattern.
pub(crate) fn split_glob_source(source_spec: &str) -> SpecGlobSource {
    let mut path_dir_base = PathBuf::new();
    let mut l_parts_glob: Vec<String> = Vec::new();

    for component in Path::new(source_spec).components() {
        let c_part = component.as_os_str().to_string_lossy();
        if l_parts_glob.is_empty() && !_has_glob_meta(&c_part) {
            path_dir_base.push(component.as_os_str());
        } else {
            l_parts_glob.push(c_part.into_owned());
        }
    }

    if path_dir_base.as_os_str().is_empty() {
        path_dir_base.push(".");
    }
    SpecGlobSource {
        path_dir_base,
        pattern: (!l_parts_glob.is_empty()).then(|| l_parts_glob.join("/")),
    }
}

/// Compile a `/`-separated glob where `*` stays inside one component and `**` spans many.
pub(crate) fn compile_glob(pattern: &str) -> Result<GlobMatcher, CopyGlobError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| CopyGlobError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

/// Deepest file depth (relative to the base) a pattern can match; `None` when it holds `**`.
pub(crate) fn derive_walk_depth_limit(pattern: &str) -> Option<usize> {
    if pattern.contains("**") {
        return None;
    }
    Some(pattern.split('/').filter(|p| !p.is_empty()).count())
}

/// Relative path rendered with `/` separators for glob matching.
pub(crate) fn derive_match_key(path_rel: &Path) -> String {
    path_rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region PathUtilities

fn _absolutize_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(path)
}

/// Resolve a path to its canonical form when it exists.
pub(crate) fn canonicalize_if_exists(path: &Path) -> Option<PathBuf> {
    fs::canonicalize(path).ok()
}

/// Derive the destination of one match.
///
/// Keeps the path relative to the glob base unless `if_flatten` is set, in which case only the
/// file name is kept.
pub(crate) fn derive_destination_path(
    path_rel: &Path,
    path_dir_dst: &Path,
    if_flatten: bool,
) -> PathBuf {
    match path_rel.file_name() {
        Some(name_file) if if_flatten => path_dir_dst.join(name_file),
        _ => path_dir_dst.join(path_rel),
    }
}

/// Reject destinations outside the root or reached through a symlink component.
pub(crate) fn validate_destination_path_safety(
    path_dst_item: &Path,
    path_dir_dst_root: &Path,
) -> Result<(), String> {
    let path_dir_dst_root_abs = _absolutize_path(path_dir_dst_root);
    let path_dst_item_abs = _absolutize_path(path_dst_item);

    let Ok(path_rel) = path_dst_item_abs.strip_prefix(&path_dir_dst_root_abs) else {
        return Err(format!(
            "Unsafe destination path escapes destination root: {} (root={})",
            path_dst_item.display(),
            path_dir_dst_root.display()
        ));
    };

    let mut path_cursor = path_dir_dst_root_abs.clone();
    for part_rel in path_rel.components() {
        path_cursor.push(part_rel.as_os_str());
        match fs::symlink_metadata(&path_cursor) {
            Ok(meta_cursor) if meta_cursor.file_type().is_symlink() => {
                return Err(format!(
                    "Unsafe destination path traverses symlink: {}",
                    path_cursor.display()
                ));
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => break,
            Err(e) => {
                return Err(format!(
                    "Failed to inspect destination path component {} ({e})",
                    path_cursor.display()
                ));
            }
        }
    }
    Ok(())
}

/// Apply the conflict rule to an existing destination; `true` means do not copy.
pub(crate) fn should_skip_file_conflict(
    path_dst: &Path,
    rule_conflict: EnumCopyFileConflictStrategy,
    builder_cp_report: &mut ReportCopyBuilder,
) -> bool {
    if !path_dst.exists() {
        return false;
    }
    if path_dst.is_dir() {
        builder_cp_report.add_error(
            path_dst.to_path_buf(),
            format!("Destination is a directory: {}", path_dst.display()),
        );
        return true;
    }

    match rule_conflict {
        EnumCopyFileConflictStrategy::Skip => {
            builder_cp_report.add_skipped();
            true
        }
        EnumCopyFileConflictStrategy::Error => {
            builder_cp_report.add_error(
                path_dst.to_path_buf(),
                format!("Destination exists: {}", path_dst.display()),
            );
            true
        }
        EnumCopyFileConflictStrategy::Overwrite => false,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FileCopy

/// Copy bytes and, on Linux, permissions, timestamps and extended attributes.
pub(crate) fn copy_file_with_metadata(
    path_file_src: &Path,
    path_file_dst: &Path,
) -> Result<(), io::Error> {
    if let Some(path_parent_dst) = path_file_dst.parent() {
        fs::create_dir_all(path_parent_dst)?;
    }
    fs::copy(path_file_src, path_file_dst)?;
    #[cfg(target_os = "linux")]
    {
        apply_metadata_linux(path_file_src, path_file_dst)?;
    }
    Ok(())
}

#[cfg(target_os = "linux")]
fn apply_metadata_linux(path_file_src: &Path, path_file_dst: &Path) -> Result<(), io::Error> {
    use filetime::{FileTime, set_file_times};

    let stat_src = fs::metadata(path_file_src)?;
    set_file_times(
        path_file_dst,
        FileTime::from_last_access_time(&stat_src),
        FileTime::from_last_modification_time(&stat_src),
    )?;

    // Best effort: filesystems without xattr support still get the bytes.
    if let Ok(iter_xattr_names) = xattr::list(path_file_src) {
        for name in iter_xattr_names {
            if let Ok(Some(raw_value)) = xattr::get(path_file_src, &name) {
                let _ = xattr::set(path_file_dst, &name, &raw_value);
            }
        }
    }
    Ok(())
}

pub(crate) fn calculate_worker_limit(num_workers_max: Option<usize>) -> usize {
    let n_cpu = std::thread::available_parallelism()
        .map(|v| v.get())
        .unwrap_or(1);

    match num_workers_max {
        Some(n) => n.clamp(1, n_cpu),
        None => n_cpu.clamp(1, 8),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
