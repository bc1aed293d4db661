//! Command line front end for building and converting colormaps.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use log::{LevelFilter, info};

use colormap_creator::format::formats::NpyFormat;
use colormap_creator::format::{ColormapData, ColormapFormat, FormatRegistry};
use colormap_creator::{AppConfig, Gradient, Rgb};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a colormap from color stops and save it
    Build {
        /// Color stop as POSITION:#RRGGBB, e.g. 0.5:#ff0000
        #[arg(short, long = "stop", required = true)]
        stops: Vec<String>,
        #[arg(short, long)]
        out: PathBuf,
        /// Output format id (guessed from the extension otherwise)
        #[arg(short, long)]
        format: Option<String>,
        #[arg(short, long)]
        name: Option<String>,
        /// Samples for image output
        #[arg(long)]
        samples: Option<usize>,
        /// Height for image output
        #[arg(long)]
        height: Option<u32>,
    },
    /// Convert a saved colormap to another format
    Convert {
        input: PathBuf,
        output: PathBuf,
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Print evenly spaced samples of a saved colormap as hex colors
    Sample {
        input: PathBuf,
        /// Number of samples (defaults to the configured preview size)
        #[arg(short, long)]
        count: Option<usize>,
    },
    /// List available formats
    Formats,
}

fn init_logging(config: &AppConfig, verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        config.log_level.to_level_filter()
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    }
    builder.init();
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(AppConfig::load_from_default_path().unwrap_or_default()),
    }
}

/// Parse `POSITION:#RRGGBB`.
fn parse_stop(stop: &str) -> Result<(f32, Rgb)> {
    let (position, color) = stop
        .split_once(':')
        .ok_or_else(|| anyhow!("stop '{}' is not POSITION:#RRGGBB", stop))?;
    let position: f32 = position
        .trim()
        .parse()
        .with_context(|| format!("bad position in stop '{}'", stop))?;
    let color = Rgb::from_hex(color.trim()).ok_or_else(|| anyhow!("bad color in stop '{}'", stop))?;
    Ok((position, color))
}

fn output_format<'a>(
    registry: &'a FormatRegistry,
    config: &AppConfig,
    explicit: Option<&str>,
    path: &Path,
) -> Result<&'a dyn ColormapFormat> {
    if let Some(id) = explicit {
        return registry
            .get(id)
            .ok_or_else(|| anyhow!("unknown format '{}' (known: {})", id, registry.ids().join(", ")));
    }
    if let Some(format) = registry.for_path(path) {
        return Ok(format);
    }
    registry
        .get(&config.export.default_format)
        .ok_or_else(|| anyhow!("unknown default format '{}'", config.export.default_format))
}

fn read_colormap(registry: &FormatRegistry, path: &Path) -> Result<ColormapData> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    let format = match registry.for_path(path) {
        Some(format) if format.supports_import() => format,
        _ if NpyFormat::is_npy(&bytes) => registry
            .get("npy")
            .ok_or_else(|| anyhow!("npy format is not registered"))?,
        _ => registry.native(),
    };
    info!("Reading {} as {}", path.display(), format.display_name());

    format
        .import_from_bytes(&bytes)
        .with_context(|| format!("failed to import {}", path.display()))
}

fn write_colormap(
    format: &dyn ColormapFormat,
    data: &ColormapData,
    path: &Path,
    config: &AppConfig,
    samples: Option<usize>,
    height: Option<u32>,
) -> Result<()> {
    let mut options = config.export_options();
    if let Some(samples) = samples {
        options = options.samples(samples);
    }
    if let Some(height) = height {
        options = options.height(height);
    }

    let result = format
        .export(data, path, &options)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!(
        "Wrote {} keypoints to {} ({} bytes)",
        result.keypoints_exported,
        path.display(),
        result.bytes_written
    );
    for warning in &result.warnings {
        eprintln!("warning: {}", warning.message);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_logging(&config, cli.verbose);

    let registry = FormatRegistry::new();

    match cli.command {
        Commands::Build {
            stops,
            out,
            format,
            name,
            samples,
            height,
        } => {
            let mut gradient = config.new_gradient();
            for stop in &stops {
                let (position, color) = parse_stop(stop)?;
                gradient
                    .add(position, color)
                    .with_context(|| format!("cannot add stop '{}'", stop))?;
            }

            let name = name.unwrap_or_else(|| config.export.name.clone());
            let data = gradient.export_data(name)?;
            let format = output_format(&registry, &config, format.as_deref(), &out)?;
            write_colormap(format, &data, &out, &config, samples, height)?;
        }
        Commands::Convert {
            input,
            output,
            format,
        } => {
            let data = read_colormap(&registry, &input)?;
            let format = output_format(&registry, &config, format.as_deref(), &output)?;
            write_colormap(format, &data, &output, &config, None, None)?;
        }
        Commands::Sample { input, count } => {
            let data = read_colormap(&registry, &input)?;
            let gradient = Gradient::import_data(&data, config.tolerance)?;
            let count = count.unwrap_or(config.preview_samples);
            for color in gradient.render_preview(count)? {
                println!("{}", color.to_hex());
            }
        }
        Commands::Formats => {
            for format in registry.all() {
                let access = if format.supports_import() {
                    "import/export"
                } else {
                    "export"
                };
                println!(
                    "{:<8} {:<26} {:<14} .{}",
                    format.id(),
                    format.display_name(),
                    access,
                    format.extensions().join(", .")
                );
            }
        }
    }

    Ok(())
}
