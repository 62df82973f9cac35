//
// main.rs
// dicom2mesh-rs
//
// Binary entry point that hands off execution to the CLI layer.
//
// Thales Matheus Mendonça Santos - November 2025

use dicom2mesh::cli;

fn main() -> anyhow::Result<()> {
    // Delegate argument parsing, validation and reporting to the CLI module.
    cli::run()
}
