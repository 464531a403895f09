use crate::config::CopyOptions;
use crate::fs::{FileSystem, RealFileSystem};
use crate::matcher::{GlobEngine, WalkGlobEngine};
use crate::resolver::patterns_to_files;
use crate::utils::{relative_asset_name, resolve_root_dir};
use crate::CopyError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, trace};

pub const PLUGIN_NAME: &str = "assetcopy";

/// A file handed to the host for inclusion in the build output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedAsset {
    pub file_name: String,
    pub source: Vec<u8>,
}

/// Services the bundler exposes to a plugin while a hook runs.
pub trait PluginContext: Send {
    fn add_watch_file(&mut self, path: &Path);
    fn emit_file(&mut self, asset: EmittedAsset);
}

/// Lifecycle hooks a bundler invokes on a plugin.
#[async_trait]
pub trait Plugin: Send {
    fn name(&self) -> &'static str;

    async fn build_start(&mut self, ctx: &mut dyn PluginContext) -> Result<(), CopyError>;

    async fn generate_bundle(&mut self, ctx: &mut dyn PluginContext) -> Result<(), CopyError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    FilesResolved,
}

/// Copies every file matching the configured patterns into the bundle,
/// named by its path relative to the root directory.
pub struct CopyPlugin {
    options: CopyOptions,
    root_dir: PathBuf,
    fs: Arc<dyn FileSystem>,
    engine: Arc<dyn GlobEngine>,
    phase: Phase,
    resolved_files: Vec<PathBuf>,
}

impl CopyPlugin {
    pub fn new(options: CopyOptions) -> Result<Self, CopyError> {
        Self::with_backends(options, Arc::new(RealFileSystem), Arc::new(WalkGlobEngine::new()))
    }

    /// The root directory is resolved against the current working directory
    /// here, once.
    pub fn with_backends(
        options: CopyOptions,
        fs: Arc<dyn FileSystem>,
        engine: Arc<dyn GlobEngine>,
    ) -> Result<Self, CopyError> {
        let root_dir = resolve_root_dir(options.root_dir.as_deref())?;
        debug!("Copy plugin rooted at {:?}", root_dir);
        Ok(CopyPlugin {
            options,
            root_dir,
            fs,
            engine,
            phase: Phase::Uninitialized,
            resolved_files: Vec::new(),
        })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn resolved_files(&self) -> &[PathBuf] {
        &self.resolved_files
    }
}

#[async_trait]
impl Plugin for CopyPlugin {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    async fn build_start(&mut self, ctx: &mut dyn PluginContext) -> Result<(), CopyError> {
        let files = patterns_to_files(
            self.engine.as_ref(),
            self.fs.as_ref(),
            self.options.patterns.as_slice(),
            &self.root_dir,
            self.options.exclude_patterns(),
        )
        .await?;

        self.resolved_files = files;
        self.phase = Phase::FilesResolved;

        for file in &self.resolved_files {
            trace!("Watching {:?}", file);
            ctx.add_watch_file(file);
        }
        info!("Resolved {} files to copy", self.resolved_files.len());
        Ok(())
    }

    async fn generate_bundle(&mut self, ctx: &mut dyn PluginContext) -> Result<(), CopyError> {
        for file in &self.resolved_files {
            let file_name = relative_asset_name(file, &self.root_dir);
            let source = self
                .fs
                .read_bytes(file)
                .map_err(|source| CopyError::AssetRead {
                    path: file.clone(),
                    source,
                })?;
            debug!("Emitting asset {} ({} bytes)", file_name, source.len());
            ctx.emit_file(EmittedAsset { file_name, source });
        }
        Ok(())
    }
}
