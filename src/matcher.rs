use crate::ignore::IgnorePatterns;
use crate::utils::normalize_path;
use crate::CopyError;
use async_trait::async_trait;
use globset::{Glob, GlobBuilder, GlobMatcher};
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ExpandOptions {
    /// Directory the pattern is matched against.
    pub cwd: PathBuf,
    /// Let wildcards match names starting with `.`.
    pub include_hidden: bool,
    /// Globs whose matches are dropped while expanding.
    pub ignore: Vec<String>,
}

/// Expands a glob pattern into concrete paths.
#[async_trait]
pub trait GlobEngine: Send + Sync {
    /// Returns matching entries (files and directories) relative to
    /// `options.cwd`, in the order the engine walks them.
    async fn expand(
        &self,
        pattern: &str,
        options: &ExpandOptions,
    ) -> Result<Vec<PathBuf>, CopyError>;
}

/// Compiles a glob where `*` and `?` never cross `/`. Braces, character
/// classes and `**` follow `globset` syntax.
pub fn build_glob(pattern: &str) -> Result<Glob, globset::Error> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
}

/// [`GlobEngine`] that walks the tree with `walkdir` and matches entries with
/// `globset`. Walking runs on the blocking thread pool.
#[derive(Debug, Clone, Default)]
pub struct WalkGlobEngine;

impl WalkGlobEngine {
    pub fn new() -> Self {
        WalkGlobEngine
    }

    pub fn expand_blocking(
        pattern: &str,
        options: &ExpandOptions,
    ) -> Result<Vec<PathBuf>, CopyError> {
        let pattern = normalize_path(pattern);
        let (base, rest) = split_literal_base(&pattern);
        let ignore = IgnorePatterns::new(&options.ignore);
        let walk_root = options.cwd.join(&base);
        debug!("Expanding pattern {} from {:?}", pattern, walk_root);

        if rest.is_empty() {
            return Ok(literal_entry(&base, &walk_root, &ignore));
        }

        let matcher = build_glob(&rest)?.compile_matcher();
        let entries = walk_matches(&walk_root, &base, &rest, &matcher, &ignore, options);
        trace!("Pattern {} matched {} entries", pattern, entries.len());
        Ok(entries)
    }
}

#[async_trait]
impl GlobEngine for WalkGlobEngine {
    async fn expand(
        &self,
        pattern: &str,
        options: &ExpandOptions,
    ) -> Result<Vec<PathBuf>, CopyError> {
        let pattern = pattern.to_string();
        let options = options.clone();
        tokio::task::spawn_blocking(move || Self::expand_blocking(&pattern, &options)).await?
    }
}

fn walk_matches(
    walk_root: &Path,
    base: &Path,
    rest: &str,
    matcher: &GlobMatcher,
    ignore: &IgnorePatterns,
    options: &ExpandOptions,
) -> Vec<PathBuf> {
    if !walk_root.is_dir() {
        trace!("Nothing to walk at {:?}", walk_root);
        return Vec::new();
    }

    let mut walker = WalkDir::new(walk_root).min_depth(1).sort_by_file_name();
    if !rest.contains("**") && !rest.contains('{') {
        walker = walker.max_depth(rest.split('/').count());
    }

    let mut entries = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Error walking {:?}: {}", walk_root, e);
                continue;
            }
        };
        let Ok(below_root) = entry.path().strip_prefix(walk_root) else {
            continue;
        };
        if !options.include_hidden && is_hidden(below_root) {
            continue;
        }
        if !matcher.is_match(normalize_path(&below_root.to_string_lossy())) {
            continue;
        }
        let relative = base.join(below_root);
        if ignore.should_ignore(&relative) {
            trace!("Ignoring {:?}", relative);
            continue;
        }
        entries.push(relative);
    }
    entries
}

/// A pattern without wildcards matches itself when it exists.
fn literal_entry(base: &Path, path: &Path, ignore: &IgnorePatterns) -> Vec<PathBuf> {
    match std::fs::symlink_metadata(path) {
        Ok(_) if !ignore.should_ignore(base) => vec![base.to_path_buf()],
        Ok(_) => Vec::new(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            warn!("Error reading {:?}: {}", path, e);
            Vec::new()
        }
    }
}

fn is_hidden(path: &Path) -> bool {
    path.components().any(|c| match c {
        Component::Normal(name) => name.to_string_lossy().starts_with('.'),
        _ => false,
    })
}

fn has_glob_meta(part: &str) -> bool {
    part.contains(|c: char| matches!(c, '*' | '?' | '[' | '{' | '\\'))
}

/// Splits a `/`-separated pattern into the leading components free of glob
/// syntax and the remaining glob.
fn split_literal_base(pattern: &str) -> (PathBuf, String) {
    let mut base = PathBuf::new();
    let mut rest: Vec<&str> = Vec::new();
    let mut parts = pattern.split('/');
    if pattern.starts_with('/') {
        base.push("/");
        parts.next();
    }
    for part in parts {
        if rest.is_empty() && !has_glob_meta(part) {
            if !part.is_empty() && part != "." {
                base.push(part);
            }
        } else {
            rest.push(part);
        }
    }
    (base, rest.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_literal_prefix_from_glob() {
        assert_eq!(split_literal_base("*.txt"), (PathBuf::new(), "*.txt".to_string()));
        assert_eq!(
            split_literal_base("a/b/**/*.svg"),
            (PathBuf::from("a/b"), "**/*.svg".to_string())
        );
        assert_eq!(
            split_literal_base("../shared/*.svg"),
            (PathBuf::from("../shared"), "*.svg".to_string())
        );
        assert_eq!(split_literal_base("a/b.txt"), (PathBuf::from("a/b.txt"), String::new()));
    }

    #[test]
    fn braces_and_classes_are_glob_syntax() {
        assert_eq!(
            split_literal_base("img/{a,b}/x.png"),
            (PathBuf::from("img"), "{a,b}/x.png".to_string())
        );
        assert_eq!(
            split_literal_base("v[0-9]/x"),
            (PathBuf::new(), "v[0-9]/x".to_string())
        );
    }

    #[test]
    fn keeps_absolute_base() {
        assert_eq!(
            split_literal_base("/abs/*.txt"),
            (PathBuf::from("/abs"), "*.txt".to_string())
        );
    }

    #[test]
    fn star_does_not_cross_separators() {
        let glob = build_glob("*.txt").unwrap().compile_matcher();
        assert!(glob.is_match("a.txt"));
        assert!(!glob.is_match("nested/a.txt"));
    }
}
