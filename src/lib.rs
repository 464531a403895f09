pub mod config;
pub mod errors;
pub mod fs;
pub mod host;
pub mod ignore;
pub mod logger;
pub mod matcher;
pub mod plugin;
pub mod resolver;
pub mod utils;

pub use config::{CopyOptions, PatternList};
pub use errors::CopyError;
pub use host::BundleOutput;
pub use plugin::{CopyPlugin, EmittedAsset, Phase, Plugin, PluginContext, PLUGIN_NAME};
