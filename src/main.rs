use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use serde::Serialize;

use sheetslice::cli::{
    AnalyzeArgs, BoundsPolicy, CliArgs, Command, CompressionLevel, DetectArgs, InitArgs,
    SliceArgs,
};
use sheetslice::config::{CompressConfig, LoadedConfig, SlicerConfig, save_config};
use sheetslice::detect::{BackgroundColor, Grid, Segment};
use sheetslice::extract::{SpriteExtractor, load_sheet};
use sheetslice::geometry::Rect;
use sheetslice::output::{WriteOptions, write_sprites};

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., config loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();

    match &cli.command {
        Command::Slice(args) => slice(args),
        Command::Analyze(args) => analyze(args),
        Command::Init(args) => init(args),
    }
}

fn init_logging(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn slice(args: &SliceArgs) -> Result<()> {
    let merged = merge_config_with_args(&args.detect, Some(args))?;
    init_logging(merged.verbose);

    info!("sheetslice v{}", env!("CARGO_PKG_VERSION"));

    let sheet = load_sheet(&merged.input)?;
    info!(
        "Loaded {} ({}x{})",
        merged.input.display(),
        sheet.width(),
        sheet.height()
    );

    let extraction = merged.extractor.extract(&sheet)?;

    let options = WriteOptions {
        opaque: merged.opaque,
        compress: merged.compress,
        manifest_sheet: merged.manifest.then_some(merged.input.as_path()),
    };
    let written = write_sprites(&extraction, &merged.extractor, &merged.output, options)?;
    for path in &written {
        info!("Saved {}", path.display());
    }

    info!("Done!");

    Ok(())
}

/// Detection summary printed by `analyze --json`
#[derive(Serialize)]
struct AnalysisReport {
    sheet: String,
    width: u32,
    height: u32,
    foreground: usize,
    rows: Vec<Segment>,
    columns: Vec<Segment>,
    crops: Vec<Rect>,
}

#[allow(clippy::print_stdout)]
fn analyze(args: &AnalyzeArgs) -> Result<()> {
    let merged = merge_config_with_args(&args.detect, None)?;
    init_logging(merged.verbose);

    let extractor = &merged.extractor;
    let sheet = load_sheet(&merged.input)?;
    let detection = extractor.detect(&sheet);

    info!(
        "Sheet {} is {}x{} with {} foreground pixels",
        merged.input.display(),
        detection.width,
        detection.height,
        detection.foreground
    );
    info!("Found {} rows: {}", detection.rows.len(), format_segments(&detection.rows));
    info!(
        "Found {} cols: {}",
        detection.columns.len(),
        format_segments(&detection.columns)
    );

    let crops: Vec<Rect> = match Grid::fit(
        detection.rows.clone(),
        detection.columns.clone(),
        extractor.rows,
        extractor.columns,
        false,
    ) {
        Ok(grid) => grid
            .boxes()
            .zip(&extractor.names)
            .map(|(bbox, name)| {
                let crop = bbox.crop_window(extractor.half_size);
                info!(
                    "  {} <- row {} col {}, crop ({}, {}) {}x{}",
                    name, bbox.row, bbox.column, crop.x, crop.y, crop.width, crop.height
                );
                crop
            })
            .collect(),
        Err(e) => {
            warn!("{}", e);
            Vec::new()
        }
    };

    if args.json {
        let report = AnalysisReport {
            sheet: merged.input.to_string_lossy().into_owned(),
            width: detection.width,
            height: detection.height,
            foreground: detection.foreground,
            rows: detection.rows,
            columns: detection.columns,
            crops,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn init(args: &InitArgs) -> Result<()> {
    init_logging(false);

    if args.path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite it",
            args.path.display()
        );
    }

    save_config(&SlicerConfig::default(), &args.path)?;
    info!("Wrote default config to {}", args.path.display());

    Ok(())
}

fn format_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| format!("({}, {})", s.start, s.end))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Merged configuration from CLI args and optional config file.
struct MergedConfig {
    input: PathBuf,
    output: PathBuf,
    extractor: SpriteExtractor,
    opaque: bool,
    compress: Option<CompressionLevel>,
    manifest: bool,
    verbose: bool,
}

/// Merge config file values with CLI arguments.
/// CLI arguments always take precedence over config values.
fn merge_config_with_args(detect: &DetectArgs, slice: Option<&SliceArgs>) -> Result<MergedConfig> {
    // Load config if specified
    let loaded_config = if let Some(config_path) = &detect.config {
        Some(
            LoadedConfig::load(config_path)
                .with_context(|| format!("failed to load config: {}", config_path.display()))?,
        )
    } else {
        None
    };
    let defaults = SlicerConfig::default();
    let config = loaded_config
        .as_ref()
        .map(|lc| &lc.config)
        .unwrap_or(&defaults);

    // Paths: CLI > config (relative to its directory) > default
    let input = detect.input.clone().unwrap_or_else(|| {
        loaded_config
            .as_ref()
            .map(|lc| lc.resolve_input())
            .unwrap_or_else(|| PathBuf::from(&defaults.input))
    });

    let output = slice
        .and_then(|s| s.output.clone())
        .unwrap_or_else(|| {
            loaded_config
                .as_ref()
                .map(|lc| lc.resolve_output_dir())
                .unwrap_or_else(|| PathBuf::from(&defaults.output_dir))
        });

    // Detection parameters: CLI > config > default
    let background: BackgroundColor = detect.background.unwrap_or(config.background);
    let threshold = detect.threshold.unwrap_or(config.threshold);
    let min_segment = detect.min_segment.unwrap_or(config.min_segment_length);
    let half_size = detect.half_size.unwrap_or(config.half_size);
    let rows = detect.rows.unwrap_or(config.rows);
    let cols = detect.cols.unwrap_or(config.cols);

    let names = slice
        .and_then(|s| s.names.clone())
        .unwrap_or_else(|| config.names.clone());

    let bounds = if let Some(b) = slice.and_then(|s| s.bounds) {
        b
    } else {
        parse_bounds(&config.bounds).ok_or_else(|| {
            anyhow::anyhow!(
                "unknown bounds policy '{}' in config file. Valid values: pad, error",
                config.bounds
            )
        })?
    };

    // Boolean flags: CLI presence sets them to true, otherwise use config
    let strict_grid = slice.is_some_and(|s| s.strict_grid) || config.strict_grid;
    let opaque = slice.is_some_and(|s| s.opaque) || config.opaque;
    let manifest = slice.is_some_and(|s| s.manifest) || config.manifest;

    // Compress: CLI option overrides config
    let compress = if let Some(level) = slice.and_then(|s| s.compress) {
        Some(level)
    } else {
        config
            .compress
            .as_ref()
            .map(parse_compress)
            .transpose()?
    };

    let extractor = SpriteExtractor::new(names)
        .background(background)
        .threshold(threshold)
        .min_segment(min_segment)
        .half_size(half_size)
        .grid(rows, cols)
        .bounds(bounds)
        .strict_grid(strict_grid);

    Ok(MergedConfig {
        input,
        output,
        extractor,
        opaque,
        compress,
        manifest,
        verbose: detect.verbose,
    })
}

fn parse_bounds(s: &str) -> Option<BoundsPolicy> {
    match s {
        "pad" => Some(BoundsPolicy::Pad),
        "error" => Some(BoundsPolicy::Error),
        _ => None,
    }
}

fn parse_compress(c: &CompressConfig) -> Result<CompressionLevel> {
    match c {
        CompressConfig::Level(n) if *n <= 6 => Ok(CompressionLevel::Level(*n)),
        CompressConfig::Level(n) => {
            anyhow::bail!("compression level must be 0-6 or 'max', got {}", n)
        }
        CompressConfig::Max(s) if s.eq_ignore_ascii_case("max") => Ok(CompressionLevel::Max),
        CompressConfig::Max(s) => anyhow::bail!("unknown compression level '{}'", s),
    }
}
