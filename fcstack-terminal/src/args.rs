/// Command-line argument definitions for the stack viewer.
use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the fuel-cell stack viewer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Bottom face of the first layer; overrides the config file
    #[arg(long, allow_negative_numbers = true)]
    pub start_offset: Option<f32>,

    /// Print the layer placements and exit instead of opening the viewer
    #[arg(long)]
    pub print_layout: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["fcstack"]);
        assert!(args.config.is_none());
        assert_eq!(args.log_level, "warn");
        assert!(args.start_offset.is_none());
        assert!(!args.print_layout);
    }

    #[test]
    fn test_negative_offset_and_flags() {
        let args = Args::parse_from([
            "fcstack",
            "-c",
            "stack.toml",
            "--start-offset",
            "-0.5",
            "--print-layout",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("stack.toml")));
        assert_eq!(args.start_offset, Some(-0.5));
        assert!(args.print_layout);
    }
}
