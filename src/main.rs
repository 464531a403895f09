use assetcopy::logger::initialize_logger;
use assetcopy::{BundleOutput, CopyError, CopyOptions, CopyPlugin, PatternList, Plugin};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Copies glob-matched files into an output directory, preserving their
/// paths relative to the root directory.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    #[arg(short = 'c', long, help = "JSON file with patterns, exclude and rootDir")]
    config: Option<PathBuf>,
    #[arg(short = 'p', long = "pattern", help = "Glob selecting files to copy (repeatable)")]
    patterns: Vec<String>,
    #[arg(short = 'e', long = "exclude", help = "Glob to exclude (repeatable)")]
    exclude: Vec<String>,
    #[arg(short = 'r', long, env = "ASSETCOPY_ROOT_DIR")]
    root_dir: Option<PathBuf>,
    #[arg(short = 'o', long, default_value = "dist")]
    out_dir: PathBuf,
    #[arg(long, help = "List the assets without writing them")]
    dry_run: bool,
}

async fn build_options(args: &CliArgs) -> Result<CopyOptions, CopyError> {
    let mut options = match &args.config {
        Some(path) => CopyOptions::from_json_file(path).await?,
        None => CopyOptions::default(),
    };
    if !args.patterns.is_empty() {
        options.patterns = PatternList::from(args.patterns.clone());
    }
    if !args.exclude.is_empty() {
        options.exclude = Some(PatternList::from(args.exclude.clone()));
    }
    if let Some(root_dir) = &args.root_dir {
        options.root_dir = Some(root_dir.clone());
    }
    debug!("Effective options: {:?}", options);
    Ok(options)
}

async fn run(args: CliArgs) -> Result<(), CopyError> {
    let options = build_options(&args).await?;
    let mut plugin = CopyPlugin::new(options)?;
    let mut output = BundleOutput::new();

    plugin.build_start(&mut output).await?;
    for file in output.watch_files() {
        debug!("Watching {}", file.display());
    }
    plugin.generate_bundle(&mut output).await?;

    if args.dry_run {
        for name in output.asset_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    output.write_to(&args.out_dir).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli_args = CliArgs::parse();
    initialize_logger();

    info!("Starting {}", assetcopy::PLUGIN_NAME);
    if let Err(e) = run(cli_args).await {
        error!("Copy failed: {}", e);
        eprintln!("Error copying assets: {}", e);
        std::process::exit(1);
    }
}
