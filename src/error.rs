//
// error.rs
// dicom2mesh-rs
//
// Error types reported by the argument parser and the color ramp sub-parser.
//
// Thales Matheus Mendonça Santos - November 2025

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Failure of a whole command-line parse. Any of these aborts the scan.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unrecognized argument '{0}'")]
    UnknownArgument(String),

    #[error("missing value after '{flag}'")]
    MissingValue { flag: &'static str },

    #[error("'{value}' is not a valid integer for '{flag}'")]
    InvalidInteger {
        flag: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("'{value}' is not a valid number for '{flag}'")]
    InvalidFloat {
        flag: &'static str,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("invalid volume coloring")]
    InvalidColorRamp {
        #[from]
        source: ColorRampError,
    },

    /// `-h` was given; the caller is expected to print usage.
    #[error("help requested")]
    HelpRequested,
}

/// Why a `(r,g,b,a,voxel),...` list was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorRampError {
    #[error("no color stops given")]
    Empty,

    #[error("unbalanced parentheses at offset {position}")]
    UnbalancedParentheses { position: usize },

    #[error("unexpected '{found}' at offset {position}")]
    UnexpectedCharacter { found: char, position: usize },

    #[error("color stop {group} has {found} fields, expected 5")]
    WrongArity { group: usize, found: usize },

    #[error("color stop {group}: '{value}' is not an integer")]
    InvalidField { group: usize, value: String },

    #[error("color stop {group}: {channel} value {value} is outside 0..=255")]
    ChannelOutOfRange {
        group: usize,
        channel: &'static str,
        value: i64,
    },
}
