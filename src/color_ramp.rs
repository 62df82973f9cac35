//
// color_ramp.rs
// dicom2mesh-rs
//
// Parses the `(r,g,b,a,voxel)` group list given to the volume visualization flag.
//
// Thales Matheus Mendonça Santos - November 2025

use crate::error::ColorRampError;
use crate::models::ColorStop;

const CHANNELS: [&str; 4] = ["red", "green", "blue", "alpha"];

/// Byte-offset cursor over the ramp text.
struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<(usize, char)> {
        self.text[self.pos..].chars().next().map(|c| (self.pos, c))
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let next = self.peek();
        if let Some((_, c)) = next {
            self.pos += c.len_utf8();
        }
        next
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some((_, c)) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn take_field(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some((_, c)) if !matches!(c, ',' | '(' | ')')) {
            self.bump();
        }
        &self.text[start..self.pos]
    }
}

/// Parses a list of 5-tuples such as `(0,0,0,0,-1000), (255,255,255,255,3000)`.
///
/// Whitespace is free-form and the comma between groups is optional. The first
/// four fields of each group must fit in `0..=255`; the fifth is any `i32`.
pub fn parse_color_ramp(text: &str) -> Result<Vec<ColorStop>, ColorRampError> {
    let mut scanner = Scanner::new(text);
    scanner.skip_whitespace();
    if scanner.peek().is_none() {
        return Err(ColorRampError::Empty);
    }

    let mut stops = Vec::new();
    loop {
        stops.push(parse_group(&mut scanner, stops.len() + 1)?);
        scanner.skip_whitespace();
        match scanner.peek() {
            None => return Ok(stops),
            Some((_, '(')) => {}
            Some((position, ',')) => {
                scanner.bump();
                scanner.skip_whitespace();
                // A trailing separator must be followed by another group.
                if scanner.peek().is_none() {
                    return Err(ColorRampError::UnexpectedCharacter {
                        found: ',',
                        position,
                    });
                }
            }
            Some((position, ')')) => {
                return Err(ColorRampError::UnbalancedParentheses { position })
            }
            Some((position, found)) => {
                return Err(ColorRampError::UnexpectedCharacter { found, position })
            }
        }
    }
}

fn parse_group(scanner: &mut Scanner<'_>, group: usize) -> Result<ColorStop, ColorRampError> {
    scanner.skip_whitespace();
    let open = match scanner.bump() {
        Some((position, '(')) => position,
        Some((position, ')')) => return Err(ColorRampError::UnbalancedParentheses { position }),
        Some((position, found)) => {
            return Err(ColorRampError::UnexpectedCharacter { found, position })
        }
        None => return Err(ColorRampError::Empty),
    };

    let mut fields = Vec::with_capacity(5);
    loop {
        fields.push(scanner.take_field().trim());
        match scanner.bump() {
            Some((_, ',')) => {}
            Some((_, ')')) => break,
            Some((position, _)) => {
                return Err(ColorRampError::UnbalancedParentheses { position })
            }
            None => return Err(ColorRampError::UnbalancedParentheses { position: open }),
        }
    }

    if fields.len() != 5 {
        let found = if fields == [""] { 0 } else { fields.len() };
        return Err(ColorRampError::WrongArity { group, found });
    }

    let mut channels = [0u8; 4];
    for (slot, (name, field)) in channels.iter_mut().zip(CHANNELS.iter().zip(&fields)) {
        let value = parse_field::<i64>(field, group)?;
        *slot = u8::try_from(value).map_err(|_| ColorRampError::ChannelOutOfRange {
            group,
            channel: *name,
            value,
        })?;
    }
    let voxel_value = parse_field::<i32>(fields[4], group)?;

    let [red, green, blue, alpha] = channels;
    Ok(ColorStop {
        red,
        green,
        blue,
        alpha,
        voxel_value,
    })
}

fn parse_field<T: std::str::FromStr>(field: &str, group: usize) -> Result<T, ColorRampError> {
    field.parse().map_err(|_| ColorRampError::InvalidField {
        group,
        value: field.to_string(),
    })
}
