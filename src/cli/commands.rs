//! Command implementations for the Zygo XYZ tool
//!
//! Dispatches parsed CLI arguments to the info and convert commands and
//! reports results on stdout.

use crate::cli::args::{Args, Commands, ConvertArgs, InfoArgs};
use crate::discovery::discover_xyz_files;
use crate::reader::XyzReader;
use crate::writer::{GridExporter, output_path_for};

use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Statistics reported by a command run
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Number of files parsed (and written, for convert)
    pub files_processed: usize,
    /// Number of files that failed
    pub files_failed: usize,
    /// Table rows written
    pub total_rows: usize,
    /// Total processing time
    pub processing_time: Duration,
}

/// Main entry point for CLI command execution
pub fn run(args: Args) -> Result<ProcessingStats> {
    setup_logging(&args)?;

    let start_time = Instant::now();
    let mut stats = match &args.command {
        Some(Commands::Info(info_args)) => run_info(info_args)?,
        Some(Commands::Convert(convert_args)) => run_convert(convert_args, args.show_progress())?,
        None => ProcessingStats::default(),
    };
    stats.processing_time = start_time.elapsed();

    Ok(stats)
}

/// Print header metadata and a raster summary for one file
fn run_info(args: &InfoArgs) -> Result<ProcessingStats> {
    let reader = XyzReader::new().with_config(args.parse.parser_config());
    let file = reader
        .read(&args.file)
        .with_context(|| format!("Failed to parse {}", args.file.display()))?;
    let header = &file.header;
    let grid = &file.grid;

    println!("{}", args.file.display().to_string().bright_green().bold());

    println!("\n{}", "Instrument".bright_yellow());
    println!("  {} {}", "Objective:".bright_cyan(), header.objective_label());
    println!("  {} {}", "Magnification:".bright_cyan(), header.magnification);
    println!("  {} {}", "Wavelength:".bright_cyan(), header.wavelength_in);
    println!("  {} {}", "Numerical aperture:".bright_cyan(), header.numerical_aperture);
    println!(
        "  {} {} x {}",
        "Camera:".bright_cyan(),
        header.camera_width,
        header.camera_height
    );
    println!("  {} {}", "System serial:".bright_cyan(), header.system_serial);
    let acquired = header
        .acquired_at()
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "unknown".to_string());
    println!("  {} {}", "Acquired:".bright_cyan(), acquired);

    println!("\n{}", "Scale".bright_yellow());
    println!("  {} {}", "Camera resolution:".bright_cyan(), header.camera_res);
    println!(
        "  {} {}",
        "Interferometric scale factor:".bright_cyan(),
        header.intf_scale_factor
    );
    println!(
        "  {} {}",
        "Units:".bright_cyan(),
        if reader.config().apply_scaling {
            "physical"
        } else {
            "raw"
        }
    );

    println!("\n{}", "Raster".bright_yellow());
    println!(
        "  {} {} x {}",
        "Shape (x, y):".bright_cyan(),
        grid.x_len().to_string().bright_white().bold(),
        grid.y_len().to_string().bright_white().bold()
    );
    println!("  {} {}", "Samples:".bright_cyan(), grid.len());
    if grid.invalid_count() > 0 {
        println!(
            "  {} {}",
            "Invalid samples:".bright_red(),
            grid.invalid_count().to_string().bright_red()
        );
    } else {
        println!("  {} 0", "Invalid samples:".bright_cyan());
    }
    match grid.z_range() {
        Some((lo, hi)) => println!("  {} {} .. {}", "Height range:".bright_cyan(), lo, hi),
        None => println!("  {} none (no valid samples)", "Height range:".bright_cyan()),
    }

    Ok(ProcessingStats {
        files_processed: 1,
        ..Default::default()
    })
}

/// Convert every discovered input file; failures are counted, not fatal
fn run_convert(args: &ConvertArgs, show_progress: bool) -> Result<ProcessingStats> {
    let files = discover_xyz_files(&args.inputs).context("Failed to discover input files")?;
    if files.is_empty() {
        anyhow::bail!("No XYZ files found in the given inputs");
    }
    info!("Converting {} files", files.len());

    let reader = XyzReader::new().with_config(args.parse.parser_config());
    let exporter = GridExporter::new(args.export_config());

    let progress_bar = if show_progress {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut stats = ProcessingStats::default();
    let mut outputs = HashSet::new();

    for path in &files {
        let output = output_path_for(path, &args.output_dir, args.format);
        if let Some(pb) = &progress_bar {
            pb.set_message(path.file_name().unwrap_or_default().to_string_lossy().to_string());
        }

        let result = if outputs.insert(output.clone()) {
            reader
                .read(path)
                .and_then(|file| exporter.write(&file, &output))
                .map_err(anyhow::Error::from)
        } else {
            Err(anyhow::anyhow!(
                "output {} was already written by another input",
                output.display()
            ))
        };

        match result {
            Ok(rows) => {
                debug!("{} -> {} ({} rows)", path.display(), output.display(), rows);
                stats.files_processed += 1;
                stats.total_rows += rows;
            }
            Err(e) => {
                warn!("Failed to convert {}: {:#}", path.display(), e);
                stats.files_failed += 1;
                let message = format!("{} {}: {:#}", "Failed".bright_red(), path.display(), e);
                match &progress_bar {
                    Some(pb) => pb.println(message),
                    None => eprintln!("{}", message),
                }
            }
        }

        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Conversion complete");
    }

    println!("\n{}", "Conversion Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Files converted:".bright_cyan(),
        stats.files_processed.to_string().bright_white()
    );
    if stats.files_failed > 0 {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            stats.files_failed.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}",
        "Total rows:".bright_cyan(),
        stats.total_rows.to_string().bright_white().bold()
    );
    println!("  {} {}", "Output:".bright_cyan(), args.output_dir.display());

    Ok(stats)
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("zygo_xyz={}", log_level)));

    // Quiet mode drops the uptime column and uses the compact formatter
    let quiet_layer = args.quiet.then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
    });
    let timed_layer = (!args.quiet).then(|| {
        fmt::layer()
            .with_target(false)
            .with_timer(fmt::time::uptime())
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(quiet_layer)
        .with(timed_layer)
        .try_init()
        .context("Failed to initialise logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}
