use std::io;
use std::path::{Component, Path, PathBuf};

/// Strips a leading `./` and converts separators to `/`.
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    match path.strip_prefix("./") {
        Some(stripped) => stripped.to_string(),
        None => path,
    }
}

/// Lexically removes `.` components and folds `..` into the preceding
/// component. Does not touch the filesystem.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    cleaned.components().next_back(),
                    Some(Component::Normal(_))
                ) && cleaned.pop();
                if !popped && !cleaned.has_root() {
                    cleaned.push("..");
                }
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}

/// Resolves an optional root directory against the current working directory.
pub fn resolve_root_dir(root_dir: Option<&Path>) -> io::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let root = match root_dir {
        Some(dir) => cwd.join(dir),
        None => cwd,
    };
    Ok(clean_path(&root))
}

/// Name of the emitted asset for `file`: its path relative to `root_dir`,
/// `/`-separated.
pub fn relative_asset_name(file: &Path, root_dir: &Path) -> String {
    let file = clean_path(file);
    let relative = match file.strip_prefix(root_dir) {
        Ok(rest) => rest.to_path_buf(),
        Err(_) => relative_via_parents(&file, root_dir),
    };
    normalize_path(&relative.to_string_lossy())
}

fn relative_via_parents(file: &Path, root_dir: &Path) -> PathBuf {
    let file_components: Vec<_> = file.components().collect();
    let root_components: Vec<_> = root_dir.components().collect();
    let common = file_components
        .iter()
        .zip(root_components.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..root_components.len() {
        relative.push("..");
    }
    for component in &file_components[common..] {
        relative.push(component.as_os_str());
    }
    relative
}
