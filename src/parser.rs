//
// parser.rs
// dicom2mesh-rs
//
// Left-to-right scan over the dicom2mesh command-line tokens, building the pipeline Parameters.
//
// Thales Matheus Mendonça Santos - November 2025

use std::fmt::Write as _;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::color_ramp::parse_color_ramp;
use crate::error::ParseError;
use crate::models::{Parameters, Visualization};

/// Every option dicom2mesh understands, in the order usage lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Help,
    Input,
    Output,
    Threshold,
    Reduction,
    PolygonLimit,
    Smoothing,
    ObjectFilter,
    Center,
    Crop,
    Visualize,
    VisualizeVolume,
}

impl Flag {
    pub const ALL: [Flag; 12] = [
        Flag::Help,
        Flag::Input,
        Flag::Output,
        Flag::Threshold,
        Flag::Reduction,
        Flag::PolygonLimit,
        Flag::Smoothing,
        Flag::ObjectFilter,
        Flag::Center,
        Flag::Crop,
        Flag::Visualize,
        Flag::VisualizeVolume,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Flag::Help => "-h",
            Flag::Input => "-i",
            Flag::Output => "-o",
            Flag::Threshold => "-t",
            Flag::Reduction => "-r",
            Flag::PolygonLimit => "-p",
            Flag::Smoothing => "-s",
            Flag::ObjectFilter => "-e",
            Flag::Center => "-c",
            Flag::Crop => "-z",
            Flag::Visualize => "-v",
            Flag::VisualizeVolume => "-vo",
        }
    }

    /// Exact match only; `-24` or `-5)` are values, not flags.
    pub fn from_token(token: &str) -> Option<Flag> {
        Flag::ALL.into_iter().find(|flag| flag.token() == token)
    }

    fn value_hint(self) -> &'static str {
        match self {
            Flag::Input => "<dir>",
            Flag::Output => "<file>",
            Flag::Threshold => "<int>",
            Flag::Reduction | Flag::ObjectFilter => "<ratio>",
            Flag::PolygonLimit => "<count>",
            Flag::VisualizeVolume => "(r,g,b,a,voxel),...",
            _ => "",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Flag::Help => "Print this help and exit",
            Flag::Input => "Directory holding the DICOM series",
            Flag::Output => "Mesh file to write (.obj, .stl or .ply)",
            Flag::Threshold => "Iso value used for surface extraction (may be negative)",
            Flag::Reduction => "Reduce the mesh by the given rate (0..1)",
            Flag::PolygonLimit => "Reduce the mesh to at most this many polygons",
            Flag::Smoothing => "Smooth the extracted surface",
            Flag::ObjectFilter => "Drop objects smaller than this fraction of the largest one",
            Flag::Center => "Move the mesh origin to its center of mass",
            Flag::Crop => "Crop the volume before extraction",
            Flag::Visualize => "Show the resulting mesh",
            Flag::VisualizeVolume => "Show the volume with the given color ramp",
        }
    }
}

/// Builds the help text from the flag table.
pub fn usage() -> String {
    let mut text = String::from("Usage: dicom2mesh -i <dir> [options]\n\nOptions:\n");
    for flag in Flag::ALL {
        let lhs = format!("{} {}", flag.token(), flag.value_hint());
        let _ = writeln!(text, "  {:<26} {}", lhs.trim_end(), flag.description());
    }
    text.push_str("\nExample: dicom2mesh -i scans/ -t 400 -r 0.5 -s -o mesh.stl\n");
    text
}

/// Parses dicom2mesh options (program name excluded) into a parameter set.
///
/// Every token must be consumed by a recognized flag; the first problem aborts
/// the whole parse. A missing `-i` is not an error here, callers check
/// [`Parameters::path_to_input_available`].
pub fn parse<I, S>(tokens: I) -> Result<Parameters, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tokens: Vec<S> = tokens.into_iter().collect();
    let tokens: Vec<&str> = tokens.iter().map(|token| token.as_ref()).collect();
    let mut cursor = Cursor {
        tokens: &tokens,
        pos: 0,
    };
    let mut params = Parameters::default();

    while let Some(token) = cursor.advance() {
        let flag = Flag::from_token(token)
            .ok_or_else(|| ParseError::UnknownArgument(token.to_string()))?;
        trace!(flag = flag.token(), "recognized flag");

        match flag {
            Flag::Help => return Err(ParseError::HelpRequested),
            Flag::Input => params.input_path = Some(PathBuf::from(cursor.value(flag)?)),
            Flag::Output => params.output_path = Some(PathBuf::from(cursor.value(flag)?)),
            Flag::Threshold => params.iso_value = cursor.integer(flag)?,
            Flag::Reduction => params.reduction_rate = Some(cursor.float(flag)?),
            Flag::PolygonLimit => params.polygon_limit = Some(cursor.integer(flag)?),
            Flag::Smoothing => params.smoothing = true,
            Flag::ObjectFilter => params.object_size_ratio = Some(cursor.float(flag)?),
            Flag::Center => params.center_of_mass_origin = true,
            Flag::Crop => params.crop = true,
            Flag::Visualize => {
                // Never downgrade a volume request.
                if params.visualization == Visualization::Off {
                    params.visualization = Visualization::Surface;
                }
            }
            Flag::VisualizeVolume => {
                let text = cursor.structured_value(flag)?;
                let stops = parse_color_ramp(&text)?;
                match &mut params.visualization {
                    Visualization::Volume(existing) => existing.extend(stops),
                    other => *other = Visualization::Volume(stops),
                }
            }
        }
    }

    debug!(
        input = ?params.input_path,
        output = ?params.output_path,
        iso_value = params.iso_value,
        volume_stops = params.volume_rendering_coloring().len(),
        "parsed command line"
    );
    Ok(params)
}

struct Cursor<'a> {
    tokens: &'a [&'a str],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn advance(&mut self) -> Option<&'a str> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Next token, unless the list ended or a flag sits where the value should be.
    fn value(&mut self, flag: Flag) -> Result<&'a str, ParseError> {
        match self.tokens.get(self.pos) {
            Some(&token) if Flag::from_token(token).is_none() => {
                self.pos += 1;
                Ok(token)
            }
            _ => Err(ParseError::MissingValue { flag: flag.token() }),
        }
    }

    fn integer<T>(&mut self, flag: Flag) -> Result<T, ParseError>
    where
        T: FromStr<Err = std::num::ParseIntError>,
    {
        let value = self.value(flag)?;
        value.trim().parse().map_err(|source| ParseError::InvalidInteger {
            flag: flag.token(),
            value: value.to_string(),
            source,
        })
    }

    fn float(&mut self, flag: Flag) -> Result<f32, ParseError> {
        let value = self.value(flag)?;
        value.trim().parse().map_err(|source| ParseError::InvalidFloat {
            flag: flag.token(),
            value: value.to_string(),
            source,
        })
    }

    /// Joins every token up to the next flag; the shell may have split the value anywhere.
    fn structured_value(&mut self, flag: Flag) -> Result<String, ParseError> {
        let start = self.pos;
        while matches!(self.tokens.get(self.pos), Some(&token) if Flag::from_token(token).is_none()) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(ParseError::MissingValue { flag: flag.token() });
        }
        Ok(self.tokens[start..self.pos].join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ColorRampError;

    #[test]
    fn flag_tokens_round_trip() {
        for flag in Flag::ALL {
            assert_eq!(Flag::from_token(flag.token()), Some(flag));
        }
        assert_eq!(Flag::from_token("-x"), None);
        assert_eq!(Flag::from_token("-24"), None);
        assert_eq!(Flag::from_token("i"), None);
    }

    #[test]
    fn usage_lists_every_flag() {
        let text = usage();
        for flag in Flag::ALL {
            assert!(text.contains(flag.token()), "usage is missing {}", flag.token());
        }
    }

    #[test]
    fn empty_token_list_yields_defaults() {
        let params = parse(Vec::<String>::new()).unwrap();
        assert_eq!(params, Parameters::default());
    }

    #[test]
    fn value_flag_followed_by_flag_is_missing_value() {
        let err = parse(["-o", "-i", "dir"]).unwrap_err();
        assert!(matches!(err, ParseError::MissingValue { flag: "-o" }));
    }

    #[test]
    fn value_flag_at_end_is_missing_value() {
        assert!(matches!(
            parse(["-i", "dir", "-t"]),
            Err(ParseError::MissingValue { flag: "-t" })
        ));
        assert!(matches!(
            parse(["-i", "dir", "-vo"]),
            Err(ParseError::MissingValue { flag: "-vo" })
        ));
    }

    #[test]
    fn malformed_numbers_fail() {
        assert!(matches!(
            parse(["-t", "12a"]),
            Err(ParseError::InvalidInteger { flag: "-t", .. })
        ));
        assert!(matches!(
            parse(["-t", "4.5"]),
            Err(ParseError::InvalidInteger { .. })
        ));
        assert!(matches!(
            parse(["-r", "half"]),
            Err(ParseError::InvalidFloat { flag: "-r", .. })
        ));
        assert!(matches!(
            parse(["-p", "-10"]),
            Err(ParseError::InvalidInteger { flag: "-p", .. })
        ));
    }

    #[test]
    fn unknown_tokens_fail() {
        assert!(matches!(
            parse(["-i", "dir", "-x"]),
            Err(ParseError::UnknownArgument(token)) if token == "-x"
        ));
        assert!(matches!(
            parse(["dir"]),
            Err(ParseError::UnknownArgument(token)) if token == "dir"
        ));
    }

    #[test]
    fn help_aborts_the_scan() {
        assert!(matches!(
            parse(["-i", "dir", "-h", "-bogus"]),
            Err(ParseError::HelpRequested)
        ));
    }

    #[test]
    fn polygon_limit_enables_limitation() {
        let params = parse(["-i", "dir", "-p", "50000"]).unwrap();
        assert!(params.enable_polygon_limitation());
        assert_eq!(params.polygon_limit, Some(50000));
    }

    #[test]
    fn ramp_errors_are_wrapped() {
        let err = parse(["-vo", "(1,2,3)"]).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidColorRamp {
                source: ColorRampError::WrongArity { group: 1, found: 3 }
            }
        ));
    }

    #[test]
    fn volume_value_stops_at_next_flag() {
        let params = parse(["-vo", "(1,2,3,4,5)", "-i", "dir"]).unwrap();
        assert_eq!(params.volume_rendering_coloring().len(), 1);
        assert_eq!(params.input_path, Some(PathBuf::from("dir")));
    }

    #[test]
    fn later_value_wins() {
        let params = parse(["-t", "100", "-t", "-300"]).unwrap();
        assert_eq!(params.iso_value, -300);
    }
}
