//! # sb-cli
//!
//! Command-line interface for extracting the schemas of an OpenAPI document
//! into standalone SchemaBlocks documents.
//!
//! Settings come from a YAML config file (`-c`), from flags, or both; flags
//! win over the config file. Without `-c` and `-f`, `./sb-openapi.yaml` is
//! used when present.

use anyhow::Context;
use clap::Parser;
use sb_pipeline::{ConfigFile, HeaderSource, Pipeline};
use sb_schema::RefStyle;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_FILE: &str = "sb-openapi.yaml";

#[derive(Parser)]
#[command(name = "sb-openapi")]
#[command(about = "Extract OpenAPI component schemas into standalone SchemaBlocks documents")]
#[command(version)]
struct Cli {
    /// Path to configuration file bundling schemafile, outdir, project and header
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input OpenAPI document (YAML or JSON)
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Output directory for the extracted schemas
    #[arg(short, long)]
    outdir: Option<PathBuf>,

    /// Metadata header YAML file
    #[arg(short = 'm', long)]
    header: Option<PathBuf>,

    /// Project identifier substituted for __project__
    #[arg(short, long)]
    project: Option<String>,

    /// Rewritten reference form: yaml-fragment (Name.yaml#/) or relative (./Name)
    #[arg(long)]
    ref_style: Option<RefStyle>,

    /// Log debug details
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn default_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Flag values as a config layer; relative paths are anchored at `cwd`
    fn overrides(&self, cwd: &Path) -> ConfigFile {
        ConfigFile {
            schemafile: self.file.as_ref().map(|p| cwd.join(p)),
            outdir: self.outdir.as_ref().map(|p| cwd.join(p)),
            project: self.project.clone(),
            header: self.header.as_ref().map(|p| HeaderSource::Path(cwd.join(p))),
            ref_style: self.ref_style,
        }
    }

    fn config_path(&self, cwd: &Path) -> Option<PathBuf> {
        match &self.config {
            Some(path) => Some(cwd.join(path)),
            None if self.file.is_none() => {
                let fallback = cwd.join(DEFAULT_CONFIG_FILE);
                fallback.is_file().then_some(fallback)
            }
            None => None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cwd = std::env::current_dir().context("cannot determine the current directory")?;

    let (base, base_dir) = match cli.config_path(&cwd) {
        Some(path) => {
            tracing::info!("Using configuration {}", path.display());
            let config = ConfigFile::from_path(&path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?;
            (config, ConfigFile::base_dir_of(&path))
        }
        None => (ConfigFile::default(), cwd.clone()),
    };

    let config = base
        .overlay(cli.overrides(&cwd))
        .resolve(&base_dir)
        .context("invalid configuration")?;

    let stats = Pipeline::new(config)
        .run()
        .context("schema extraction failed")?;

    tracing::debug!("Wrote {} file(s)", stats.files.len());
    Ok(())
}
