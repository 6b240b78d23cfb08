//! Command-line argument definitions for the Zygo XYZ tool
//!
//! Defines the CLI using the clap derive API and maps flags onto the
//! library's parser and export configuration.

use crate::config::{
    CompressionAlgorithm, ExportConfig, ExportFormat, ObjectiveFormat, ParserConfig,
};
use crate::constants::DEFAULT_OUTPUT_DIR;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the Zygo XYZ reader
#[derive(Debug, Clone, Parser)]
#[command(
    name = "zygo-xyz",
    version,
    about = "Inspect and convert Zygo MetroPro ASCII surface-profile (*.xyz) files",
    long_about = "Reads Zygo interferometer *.xyz exports (MetroPro ASCII data file header \
                  followed by a point list), reports their header metadata and converts the \
                  surface raster to Parquet or CSV tables for analysis."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Print header metadata and raster summary of one file
    Info(InfoArgs),
    /// Convert XYZ files to Parquet or CSV tables
    Convert(ConvertArgs),
}

/// Decoder options shared by all commands
#[derive(Debug, Clone, Parser)]
pub struct ParseOptions {
    /// Encoding of the objective name on header line 8
    #[arg(long, value_enum, default_value_t = ObjectiveFormat::Auto)]
    pub objective: ObjectiveFormat,

    /// Keep raw pixel indices and raw heights (no unit scaling)
    #[arg(long)]
    pub raw: bool,
}

impl ParseOptions {
    pub fn parser_config(&self) -> ParserConfig {
        let config = ParserConfig::default().with_objective_format(self.objective);
        if self.raw {
            config.without_scaling()
        } else {
            config
        }
    }
}

/// Arguments for the info command
#[derive(Debug, Clone, Parser)]
pub struct InfoArgs {
    /// XYZ file to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub parse: ParseOptions,
}

/// Arguments for the convert command
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// Input files, directories (searched recursively) or glob patterns
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Directory for the generated tables
    #[arg(short, long = "output", value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Output table format
    #[arg(long, value_enum, default_value_t = ExportFormat::Parquet)]
    pub format: ExportFormat,

    /// Parquet compression algorithm
    #[arg(long, value_enum, default_value_t = CompressionAlgorithm::Snappy)]
    pub compression: CompressionAlgorithm,

    /// Omit dropout cells instead of writing them with a null height
    #[arg(long)]
    pub drop_invalid: bool,

    #[command(flatten)]
    pub parse: ParseOptions,
}

impl ConvertArgs {
    pub fn export_config(&self) -> ExportConfig {
        let config = ExportConfig::default()
            .with_format(self.format)
            .with_compression(self.compression);
        if self.drop_invalid {
            config.without_invalid()
        } else {
            config
        }
    }
}

impl Args {
    /// Log level from -v/-q flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_args() {
        let args = Args::try_parse_from([
            "zygo-xyz",
            "-vv",
            "convert",
            "scans/",
            "extra.xyz",
            "--format",
            "csv",
            "--drop-invalid",
            "--objective",
            "unquoted",
            "--raw",
        ])
        .unwrap();

        assert_eq!(args.get_log_level(), "debug");
        let Some(Commands::Convert(convert)) = args.command else {
            panic!("Expected convert command");
        };
        assert_eq!(convert.inputs.len(), 2);
        assert_eq!(convert.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));

        let export = convert.export_config();
        assert_eq!(export.format, ExportFormat::Csv);
        assert!(!export.include_invalid);

        let parser = convert.parse.parser_config();
        assert_eq!(parser.objective_format, ObjectiveFormat::Unquoted);
        assert!(!parser.apply_scaling);
    }

    #[test]
    fn test_info_defaults() {
        let args = Args::try_parse_from(["zygo-xyz", "-q", "info", "scan.xyz"]).unwrap();
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_progress());

        let Some(Commands::Info(info)) = args.command else {
            panic!("Expected info command");
        };
        let parser = info.parse.parser_config();
        assert_eq!(parser.objective_format, ObjectiveFormat::Auto);
        assert!(parser.apply_scaling);
    }

    #[test]
    fn test_compression_value_names() {
        let args =
            Args::try_parse_from(["zygo-xyz", "convert", "a.xyz", "--compression", "none"])
                .unwrap();
        let Some(Commands::Convert(convert)) = args.command else {
            panic!("Expected convert command");
        };
        assert_eq!(convert.compression, CompressionAlgorithm::Uncompressed);
    }
}
