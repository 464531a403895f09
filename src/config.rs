use crate::CopyError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One glob or a list of globs, as accepted by `patterns` and `exclude`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "OneOrMany")]
pub struct PatternList(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for PatternList {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(pattern) => PatternList(vec![pattern]),
            OneOrMany::Many(patterns) => PatternList(patterns),
        }
    }
}

impl PatternList {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for PatternList {
    fn from(pattern: &str) -> Self {
        PatternList(vec![pattern.to_string()])
    }
}

impl From<String> for PatternList {
    fn from(pattern: String) -> Self {
        PatternList(vec![pattern])
    }
}

impl From<Vec<String>> for PatternList {
    fn from(patterns: Vec<String>) -> Self {
        PatternList(patterns)
    }
}

impl From<Vec<&str>> for PatternList {
    fn from(patterns: Vec<&str>) -> Self {
        patterns.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for PatternList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        PatternList(iter.into_iter().map(Into::into).collect())
    }
}

/// Construction-time options for [`CopyPlugin`](crate::CopyPlugin).
///
/// Nothing here is validated: an empty pattern list simply copies nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyOptions {
    #[serde(default)]
    pub patterns: PatternList,
    #[serde(default)]
    pub exclude: Option<PatternList>,
    #[serde(default)]
    pub root_dir: Option<PathBuf>,
}

impl CopyOptions {
    pub fn new(patterns: impl Into<PatternList>) -> Self {
        CopyOptions {
            patterns: patterns.into(),
            ..Default::default()
        }
    }

    pub fn exclude(mut self, exclude: impl Into<PatternList>) -> Self {
        self.exclude = Some(exclude.into());
        self
    }

    pub fn root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(root_dir.into());
        self
    }

    pub fn exclude_patterns(&self) -> &[String] {
        self.exclude.as_ref().map(PatternList::as_slice).unwrap_or(&[])
    }

    pub fn from_json_str(content: &str) -> Result<Self, CopyError> {
        Ok(serde_json::from_str(content)?)
    }

    pub async fn from_json_file(path: &Path) -> Result<Self, CopyError> {
        debug!("Loading copy options from {:?}", path);
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CopyError::ConfigError(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }
}
