mod args;

pub use args::{
    AnalyzeArgs, BoundsPolicy, CliArgs, Command, CompressionLevel, DetectArgs, InitArgs,
    SliceArgs,
};
