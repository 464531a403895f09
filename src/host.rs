use crate::plugin::{EmittedAsset, PluginContext};
use crate::CopyError;
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tracing::{debug, info};

/// In-memory plugin host that records watch registrations and emitted
/// assets in call order.
#[derive(Debug, Clone, Default)]
pub struct BundleOutput {
    watch_files: Vec<PathBuf>,
    assets: Vec<EmittedAsset>,
}

impl BundleOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn watch_files(&self) -> &[PathBuf] {
        &self.watch_files
    }

    pub fn assets(&self) -> &[EmittedAsset] {
        &self.assets
    }

    pub fn asset_names(&self) -> Vec<&str> {
        self.assets.iter().map(|a| a.file_name.as_str()).collect()
    }

    /// Writes every asset below `out_dir` in emission order. A name emitted
    /// twice ends up with the content of the last emission.
    pub async fn write_to(&self, out_dir: &Path) -> Result<usize, CopyError> {
        for asset in &self.assets {
            let target = out_dir.join(&asset.file_name);
            write_file_async(&target, &asset.source).await?;
            debug!("Wrote {:?}", target);
        }
        info!("Wrote {} assets to {:?}", self.assets.len(), out_dir);
        Ok(self.assets.len())
    }
}

impl PluginContext for BundleOutput {
    fn add_watch_file(&mut self, path: &Path) {
        self.watch_files.push(path.to_path_buf());
    }

    fn emit_file(&mut self, asset: EmittedAsset) {
        self.assets.push(asset);
    }
}

async fn write_file_async(path: &Path, content: &[u8]) -> Result<(), CopyError> {
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| CopyError::IoError(format!("{}: {}", parent.display(), e)))?;
    }
    async_fs::write(path, content)
        .await
        .map_err(|e| CopyError::IoError(format!("{}: {}", path.display(), e)))
}
