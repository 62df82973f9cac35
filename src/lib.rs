//
// lib.rs
// dicom2mesh-rs
//
// Exposes the crate's modules and re-exports the parser entry points for both binary and library consumers.
//
// Thales Matheus Mendonça Santos - November 2025

// Public surface of the library: the parameter model, the option parser and the CLI front-end.
pub mod cli;
pub mod color_ramp;
pub mod error;
pub mod models;
pub mod parser;

pub use cli::{run as run_cli, Cli};
pub use color_ramp::parse_color_ramp;
pub use error::{ColorRampError, ParseError};
pub use models::{ColorStop, MeshFormat, Parameters, Visualization};
pub use parser::{parse, usage, Flag};
