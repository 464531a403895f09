use crate::matcher::build_glob;
use crate::utils::normalize_path;
use globset::{GlobSet, GlobSetBuilder};
use std::path::Path;
use tracing::{debug, warn};

/// Exclusion globs, compiled once per expansion and matched against paths
/// relative to the expansion root.
pub struct IgnorePatterns {
    set: GlobSet,
}

impl IgnorePatterns {
    pub fn new(patterns: &[String]) -> Self {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            match build_glob(&normalize_path(pattern)) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => warn!("Invalid ignore pattern '{}': {}", pattern, e),
            }
        }

        debug!("Using ignore patterns: {:?}", patterns);

        let set = builder.build().unwrap_or_else(|e| {
            warn!("Failed to compile ignore patterns: {}", e);
            GlobSet::empty()
        });
        IgnorePatterns { set }
    }

    pub fn should_ignore<P: AsRef<Path>>(&self, path: P) -> bool {
        let path_str = normalize_path(&path.as_ref().to_string_lossy());
        self.set.is_match(path_str)
    }
}
