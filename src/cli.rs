//
// cli.rs
// dicom2mesh-rs
//
// Defines the binary surface with Clap, sets up logging and hands the dicom2mesh options to the parser.
//
// Thales Matheus Mendonça Santos - November 2025

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use crate::error::ParseError;
use crate::models::{Parameters, Visualization};
use crate::parser;

/// Command-line glue code: front-end flags for the binary, everything else goes to the dicom2mesh parser.
#[derive(Parser)]
#[command(name = "dicom2mesh")]
#[command(about = "Converte séries DICOM em malhas 3D", long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Log verbosity (written to stderr)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,
    /// Print the resolved parameters as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
    /// dicom2mesh options, e.g. `-i scans/ -t 400 -o mesh.stl` (use -h to list them)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub options: Vec<String>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    // Parse the front-end flags once; the remaining tokens are dicom2mesh options.
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    let params = match parser::parse(&cli.options) {
        Ok(params) => params,
        Err(ParseError::HelpRequested) => {
            print!("{}", parser::usage());
            return Ok(());
        }
        Err(err) => {
            eprint!("{}", parser::usage());
            return Err(err).context("Invalid command line");
        }
    };

    check_requirements(&params)?;
    info!(input = ?params.input_path, "parameters ready for the mesh pipeline");

    if cli.json {
        let json_str =
            serde_json::to_string_pretty(&params).context("Failed to serialize parameters")?;
        println!("{}", json_str);
    } else {
        print_summary(&params);
    }

    Ok(())
}

/// Checks the pipeline needs before it may start: an input directory and a writable mesh format.
pub fn check_requirements(params: &Parameters) -> anyhow::Result<()> {
    if !params.path_to_input_available() {
        warn!("no input directory given");
        bail!("No input directory given (-i <dir>)");
    }
    if let Some(output) = &params.output_path {
        if params.output_format().is_none() {
            bail!(
                "Unsupported mesh format for {:?}; use .obj, .stl or .ply",
                output
            );
        }
    }
    Ok(())
}

fn print_summary(params: &Parameters) {
    let input = params
        .input_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    println!("Input:      {}", input);
    match (&params.output_path, params.output_format()) {
        (Some(path), Some(format)) => println!("Output:     {:?} ({:?})", path, format),
        _ => println!("Output:     (none)"),
    }
    println!("Iso value:  {}", params.iso_value);
    if let Some(rate) = params.reduction_rate {
        println!("Reduction:  {:.3}", rate);
    }
    if let Some(limit) = params.polygon_limit {
        println!("Polygons:   at most {}", limit);
    }
    if let Some(ratio) = params.object_size_ratio {
        println!("Filtering:  objects below {:.4} of the largest", ratio);
    }
    println!("Smoothing:  {}", params.smoothing);
    println!("Crop:       {}", params.crop);
    println!("Centering:  {}", params.center_of_mass_origin);
    match &params.visualization {
        Visualization::Off => println!("Visualize:  no"),
        Visualization::Surface => println!("Visualize:  surface"),
        Visualization::Volume(stops) => {
            println!("Visualize:  volume, {} color stop(s)", stops.len());
            for stop in stops {
                println!(
                    "  voxel {:>6} -> rgba({}, {}, {}, {})",
                    stop.voxel_value, stop.red, stop.green, stop.blue, stop.alpha
                );
            }
        }
    }
}
