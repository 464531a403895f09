use crate::fs::FileSystem;
use crate::matcher::{ExpandOptions, GlobEngine};
use crate::utils::clean_path;
use crate::CopyError;
use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Lists all files matching `pattern` under `root_dir`, fully resolved.
///
/// Hidden entries are matched, entries matching `ignore` are skipped while
/// expanding, and directories are dropped. A matched entry that disappears
/// before its status check fails the whole call.
pub async fn list_files(
    engine: &dyn GlobEngine,
    fs: &dyn FileSystem,
    pattern: &str,
    root_dir: &Path,
    ignore: &[String],
) -> Result<Vec<PathBuf>, CopyError> {
    let options = ExpandOptions {
        cwd: root_dir.to_path_buf(),
        include_hidden: true,
        ignore: ignore.to_vec(),
    };
    let entries = engine
        .expand(pattern, &options)
        .await
        .map_err(|e| match e {
            CopyError::InvalidPattern(_) | CopyError::PatternResolution { .. } => e,
            other => CopyError::pattern_resolution(pattern, other),
        })?;

    let mut files = Vec::with_capacity(entries.len());
    for entry in entries {
        let path = clean_path(&root_dir.join(entry));
        let is_dir = fs
            .is_dir(&path)
            .map_err(|e| CopyError::pattern_resolution(pattern, format!("{}: {}", path.display(), e)))?;
        if is_dir {
            trace!("Skipping directory {:?}", path);
            continue;
        }
        files.push(path);
    }

    debug!("Pattern {} resolved to {} files", pattern, files.len());
    Ok(files)
}

/// Resolves every pattern concurrently and concatenates the results in
/// pattern order. Files matched by several patterns appear once per match.
pub async fn patterns_to_files(
    engine: &dyn GlobEngine,
    fs: &dyn FileSystem,
    patterns: &[String],
    root_dir: &Path,
    exclude: &[String],
) -> Result<Vec<PathBuf>, CopyError> {
    let lookups = patterns
        .iter()
        .map(|pattern| list_files(engine, fs, pattern, root_dir, exclude));
    let per_pattern = try_join_all(lookups).await?;

    let files: Vec<PathBuf> = per_pattern.into_iter().flatten().collect();
    debug!(
        "Resolved {} patterns to {} files under {:?}",
        patterns.len(),
        files.len(),
        root_dir
    );
    Ok(files)
}
