use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::detect::BackgroundColor;

#[derive(Parser, Debug)]
#[command(name = "sheetslice")]
#[command(version, about = "Slice a grid sprite sheet into sprite images", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Cut the sheet into one PNG per sprite name
    Slice(SliceArgs),
    /// Report detected rows and columns without writing anything
    Analyze(AnalyzeArgs),
    /// Write a config file with the default settings
    Init(InitArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SliceArgs {
    #[command(flatten)]
    pub detect: DetectArgs,

    /// Output directory for sprite images [default: public/images]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Comma-separated sprite names in row-major order
    #[arg(long, value_delimiter = ',')]
    pub names: Option<Vec<String>>,

    /// What to do when a crop reaches past the sheet edge [default: pad]
    #[arg(long, value_enum)]
    pub bounds: Option<BoundsPolicy>,

    /// Fail unless exactly the configured number of rows and columns are found
    #[arg(long)]
    pub strict_grid: bool,

    /// Output RGB instead of RGBA
    #[arg(long)]
    pub opaque: bool,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    /// Also write sprites.json describing every crop
    #[arg(long)]
    pub manifest: bool,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub detect: DetectArgs,

    /// Print the analysis as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Config file to create
    #[arg(default_value = "sheetslice.json")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Options shared by every command that reads a sheet
#[derive(Args, Debug, Clone)]
pub struct DetectArgs {
    /// Sprite sheet image [default: public/sprites.png]
    pub input: Option<PathBuf>,

    /// Load settings from a config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Sheet background color as R,G,B or #rrggbb [default: 254,254,254]
    #[arg(long, value_name = "COLOR")]
    pub background: Option<BackgroundColor>,

    /// Color distance above which a pixel counts as sprite ink [default: 30]
    #[arg(long)]
    pub threshold: Option<u32>,

    /// Shortest run of ink rows/columns kept as a segment [default: 10]
    #[arg(long, value_name = "PIXELS")]
    pub min_segment: Option<u32>,

    /// Half the side of each output square [default: 250]
    #[arg(long, value_name = "PIXELS")]
    pub half_size: Option<u32>,

    /// Grid rows [default: 3]
    #[arg(long)]
    pub rows: Option<usize>,

    /// Grid columns [default: 3]
    #[arg(long)]
    pub cols: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Handling of crop windows that extend past the sheet
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum BoundsPolicy {
    /// Keep the full size and fill the outside with transparent pixels
    #[default]
    Pad,
    /// Abort the run
    Error,
}

impl BoundsPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            BoundsPolicy::Pad => "pad",
            BoundsPolicy::Error => "error",
        }
    }
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Level(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slice() {
        let cli = CliArgs::try_parse_from([
            "sheetslice",
            "slice",
            "sheet.png",
            "--background",
            "#ffffff",
            "--names",
            "a,b,c",
            "--bounds",
            "error",
            "--compress",
        ])
        .unwrap();

        let Command::Slice(args) = cli.command else {
            panic!("expected slice command");
        };
        assert_eq!(args.detect.input, Some(PathBuf::from("sheet.png")));
        assert_eq!(
            args.detect.background,
            Some(BackgroundColor::new(255, 255, 255))
        );
        assert_eq!(
            args.names,
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert_eq!(args.bounds, Some(BoundsPolicy::Error));
        assert_eq!(args.compress, Some(CompressionLevel::Level(2)));
    }

    #[test]
    fn test_parse_analyze_defaults() {
        let cli = CliArgs::try_parse_from(["sheetslice", "analyze"]).unwrap();
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze command");
        };
        assert!(args.detect.input.is_none());
        assert!(args.detect.threshold.is_none());
        assert!(!args.json);
    }

    #[test]
    fn test_rejects_bad_color() {
        assert!(
            CliArgs::try_parse_from(["sheetslice", "slice", "--background", "red"]).is_err()
        );
    }

    #[test]
    fn test_compression_level() {
        assert_eq!("max".parse::<CompressionLevel>(), Ok(CompressionLevel::Max));
        assert_eq!("4".parse::<CompressionLevel>(), Ok(CompressionLevel::Level(4)));
        assert!("7".parse::<CompressionLevel>().is_err());
    }
}
