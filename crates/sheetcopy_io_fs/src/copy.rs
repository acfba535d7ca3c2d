//! Glob expansion, tree walk and copy orchestration.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use globset::GlobMatcher;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::report::{ReportCopy, ReportCopyBuilder};
use crate::spec::{CopyGlobError, EnumCopyFileConflictStrategy, SpecCopyOptions};
use crate::util::{
    calculate_worker_limit, canonicalize_if_exists, compile_glob, copy_file_with_metadata,
    derive_destination_path, derive_match_key, derive_walk_depth_limit, should_skip_file_conflict,
    split_glob_source, validate_destination_path_safety,
};

#[derive(Debug, Clone)]
struct SpecCopyTaskFile {
    path_file_src: PathBuf,
    path_file_dst: PathBuf,
}

#[derive(Debug)]
struct SpecCopyContext {
    path_dir_base: PathBuf,
    path_dir_dst: PathBuf,
    path_dir_dst_canonical: Option<PathBuf>,
    matcher: GlobMatcher,
    depth_limit: Option<usize>,
    spec_cp_options: SpecCopyOptions,
    builder_cp_report: ReportCopyBuilder,
    l_tasks_file_copy: Vec<SpecCopyTaskFile>,
    /// Destination -> index into `l_tasks_file_copy`.
    dict_dst_planned: HashMap<PathBuf, usize>,
}

/// Expand `source_spec` and copy every matched file under `dir_destination`.
///
/// `source_spec` is a path whose trailing components may be a glob (`dir/*.txt`,
/// `dir/**/*.dll`). The literal prefix is the walk base; each match keeps its path relative to
/// that base unless [`SpecCopyOptions::if_flatten`] is set. A glob-free spec naming a file copies
/// that file; one naming a directory copies the whole tree.
///
/// A glob whose base does not exist matches nothing and yields an empty report. Returns
/// [`CopyGlobError`] only for setup failures; per-file failures are stored in the report.
pub fn copy_glob<Q>(
    source_spec: &str,
    dir_destination: Q,
    spec_cp_options: SpecCopyOptions,
) -> Result<ReportCopy, CopyGlobError>
where
    Q: AsRef<Path>,
{
    if source_spec.trim().is_empty() {
        return Err(CopyGlobError::EmptySource);
    }
    let path_dir_dst = dir_destination.as_ref().to_path_buf();
    let spec_glob_src = split_glob_source(source_spec);

    let pattern = match spec_glob_src.pattern {
        Some(pattern) => pattern,
        None if spec_glob_src.path_dir_base.is_file() => {
            return copy_single_file(&spec_glob_src.path_dir_base, &path_dir_dst, spec_cp_options);
        }
        None if spec_glob_src.path_dir_base.is_dir() => "**/*".to_string(),
        None => return Err(CopyGlobError::SourceNotFound(spec_glob_src.path_dir_base)),
    };

    let mut spec_cp_ctx = SpecCopyContext {
        path_dir_base: spec_glob_src.path_dir_base.clone(),
        path_dir_dst_canonical: canonicalize_if_exists(&path_dir_dst),
        path_dir_dst,
        matcher: compile_glob(&pattern)?,
        depth_limit: derive_walk_depth_limit(&pattern),
        spec_cp_options,
        builder_cp_report: ReportCopyBuilder::default(),
        l_tasks_file_copy: Vec::new(),
        dict_dst_planned: HashMap::new(),
    };

    if spec_glob_src.path_dir_base.is_dir() {
        walk_directory(&spec_glob_src.path_dir_base, 0, &mut spec_cp_ctx);
    }
    flush_file_copy_tasks(&mut spec_cp_ctx)?;
    Ok(spec_cp_ctx.builder_cp_report.build())
}

fn copy_single_file(
    path_file_src: &Path,
    path_dir_dst: &Path,
    spec_cp_options: SpecCopyOptions,
) -> Result<ReportCopy, CopyGlobError> {
    let path_dir_base = path_file_src
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let mut spec_cp_ctx = SpecCopyContext {
        path_dir_base,
        path_dir_dst: path_dir_dst.to_path_buf(),
        path_dir_dst_canonical: None,
        matcher: compile_glob("*")?,
        depth_limit: Some(1),
        spec_cp_options,
        builder_cp_report: ReportCopyBuilder::default(),
        l_tasks_file_copy: Vec::new(),
        dict_dst_planned: HashMap::new(),
    };

    spec_cp_ctx.builder_cp_report.add_scanned();
    handle_file_match(path_file_src.to_path_buf(), &mut spec_cp_ctx);
    flush_file_copy_tasks(&mut spec_cp_ctx)?;
    Ok(spec_cp_ctx.builder_cp_report.build())
}

fn walk_directory(path_root: &Path, n_depth_relative: usize, spec_cp_ctx: &mut SpecCopyContext) {
    let iter_entries = match fs::read_dir(path_root) {
        Ok(iter) => iter,
        Err(e) => {
            spec_cp_ctx.builder_cp_report.add_warning(format!(
                "Failed to read directory {} ({e})",
                path_root.display()
            ));
            return;
        }
    };

    let mut l_dirs: Vec<(String, PathBuf)> = Vec::new();
    let mut l_files: Vec<(String, PathBuf)> = Vec::new();
    for entry_res in iter_entries {
        let entry = match entry_res {
            Ok(v) => v,
            Err(e) => {
                spec_cp_ctx.builder_cp_report.add_warning(format!(
                    "Failed to read directory entry under {} ({e})",
                    path_root.display()
                ));
                continue;
            }
        };

        let path_entry = entry.path();
        let c_name = entry.file_name().to_string_lossy().to_string();
        let cfg_file_type = match entry.file_type() {
            Ok(v) => v,
            Err(e) => {
                spec_cp_ctx
                    .builder_cp_report
                    .add_warning(format!("Failed to inspect {} ({e})", path_entry.display()));
                continue;
            }
        };

        if cfg_file_type.is_symlink() {
            if path_entry.is_file() {
                l_files.push((c_name, path_entry));
            } else if path_entry.is_dir() {
                spec_cp_ctx.builder_cp_report.add_warning(format!(
                    "Symlinked directory not followed: {}",
                    path_entry.display()
                ));
            } else {
                spec_cp_ctx
                    .builder_cp_report
                    .add_warning(format!("Broken symlink skipped: {}", path_entry.display()));
            }
        } else if cfg_file_type.is_dir() {
            l_dirs.push((c_name, path_entry));
        } else if cfg_file_type.is_file() {
            l_files.push((c_name, path_entry));
        } else {
            spec_cp_ctx
                .builder_cp_report
                .add_warning(format!("Special file skipped: {}", path_entry.display()));
        }
    }

    l_dirs.sort_by(|a, b| a.0.cmp(&b.0));
    l_files.sort_by(|a, b| a.0.cmp(&b.0));

    for (_, path_file_src) in l_files {
        spec_cp_ctx.builder_cp_report.add_scanned();
        handle_file_match(path_file_src, spec_cp_ctx);
    }

    if spec_cp_ctx
        .depth_limit
        .is_some_and(|n| n_depth_relative + 1 >= n)
    {
        return;
    }
    for (_, path_dir_sub) in l_dirs {
        if spec_cp_ctx.path_dir_dst_canonical.is_some()
            && canonicalize_if_exists(&path_dir_sub) == spec_cp_ctx.path_dir_dst_canonical
        {
            continue;
        }
        walk_directory(&path_dir_sub, n_depth_relative + 1, spec_cp_ctx);
    }
}

fn handle_file_match(path_file_src: PathBuf, spec_cp_ctx: &mut SpecCopyContext) {
    let Ok(path_rel) = path_file_src.strip_prefix(&spec_cp_ctx.path_dir_base) else {
        return;
    };
    if !spec_cp_ctx.matcher.is_match(derive_match_key(path_rel)) {
        return;
    }
    spec_cp_ctx.builder_cp_report.add_matched();

    let path_file_dst = derive_destination_path(
        path_rel,
        &spec_cp_ctx.path_dir_dst,
        spec_cp_ctx.spec_cp_options.if_flatten,
    );
    if let Err(message) =
        validate_destination_path_safety(&path_file_dst, &spec_cp_ctx.path_dir_dst)
    {
        spec_cp_ctx
            .builder_cp_report
            .add_error(path_file_dst, message);
        return;
    }
    if let Some(&n_idx_task) = spec_cp_ctx.dict_dst_planned.get(&path_file_dst) {
        handle_planned_conflict(path_file_src, path_file_dst, n_idx_task, spec_cp_ctx);
        return;
    }
    if should_skip_file_conflict(
        &path_file_dst,
        spec_cp_ctx.spec_cp_options.rule_conflict_file,
        &mut spec_cp_ctx.builder_cp_report,
    ) {
        return;
    }

    spec_cp_ctx
        .dict_dst_planned
        .insert(path_file_dst.clone(), spec_cp_ctx.l_tasks_file_copy.len());
    spec_cp_ctx.l_tasks_file_copy.push(SpecCopyTaskFile {
        path_file_src,
        path_file_dst,
    });
}

/// Apply the conflict rule to a second match landing on an already planned destination.
///
/// At most one task per destination ever reaches the copy stage.
fn handle_planned_conflict(
    path_file_src: PathBuf,
    path_file_dst: PathBuf,
    n_idx_task: usize,
    spec_cp_ctx: &mut SpecCopyContext,
) {
    match spec_cp_ctx.spec_cp_options.rule_conflict_file {
        EnumCopyFileConflictStrategy::Skip => spec_cp_ctx.builder_cp_report.add_skipped(),
        EnumCopyFileConflictStrategy::Error => {
            let message = format!(
                "Destination already planned from another source: {} (source={})",
                path_file_dst.display(),
                path_file_src.display()
            );
            spec_cp_ctx.builder_cp_report.add_error(path_file_dst, message);
        }
        EnumCopyFileConflictStrategy::Overwrite => {
            // Later match wins; the superseded one counts as skipped.
            if let Some(spec_task) = spec_cp_ctx.l_tasks_file_copy.get_mut(n_idx_task) {
                spec_task.path_file_src = path_file_src;
            }
            spec_cp_ctx.builder_cp_report.add_skipped();
        }
    }
}

fn run_copy_task(spec_task: SpecCopyTaskFile) -> (SpecCopyTaskFile, Result<(), String>) {
    let res_copy = copy_file_with_metadata(&spec_task.path_file_src, &spec_task.path_file_dst)
        .map_err(|e| e.to_string());
    (spec_task, res_copy)
}

fn flush_file_copy_tasks(spec_cp_ctx: &mut SpecCopyContext) -> Result<(), CopyGlobError> {
    let l_tasks_file_copy = std::mem::take(&mut spec_cp_ctx.l_tasks_file_copy);
    spec_cp_ctx.dict_dst_planned.clear();
    if l_tasks_file_copy.is_empty() {
        return Ok(());
    }
    if spec_cp_ctx.spec_cp_options.if_dry_run {
        for spec_task in l_tasks_file_copy {
            spec_cp_ctx
                .builder_cp_report
                .add_copied(spec_task.path_file_src, spec_task.path_file_dst);
        }
        return Ok(());
    }
    fs::create_dir_all(&spec_cp_ctx.path_dir_dst).map_err(|e| {
        CopyGlobError::DestinationInitFailed {
            path: spec_cp_ctx.path_dir_dst.clone(),
            message: e.to_string(),
        }
    })?;

    let n_workers_max = calculate_worker_limit(spec_cp_ctx.spec_cp_options.num_workers_max);
    let l_results = if n_workers_max <= 1 || l_tasks_file_copy.len() == 1 {
        l_tasks_file_copy
            .into_iter()
            .map(run_copy_task)
            .collect::<Vec<_>>()
    } else {
        match ThreadPoolBuilder::new().num_threads(n_workers_max).build() {
            Ok(thread_pool) => thread_pool.install(|| {
                l_tasks_file_copy
                    .into_par_iter()
                    .map(run_copy_task)
                    .collect::<Vec<_>>()
            }),
            Err(_) => {
                spec_cp_ctx.builder_cp_report.add_warning(format!(
                    "Failed to initialize thread pool (workers={n_workers_max}); fallback to serial copy."
                ));
                l_tasks_file_copy
                    .into_iter()
                    .map(run_copy_task)
                    .collect::<Vec<_>>()
            }
        }
    };

    for (spec_task, res_copy) in l_results {
        match res_copy {
            Ok(()) => spec_cp_ctx
                .builder_cp_report
                .add_copied(spec_task.path_file_src, spec_task.path_file_dst),
            Err(msg) => spec_cp_ctx
                .builder_cp_report
                .add_error(spec_task.path_file_dst, msg),
        }
    }
    Ok(())
}
