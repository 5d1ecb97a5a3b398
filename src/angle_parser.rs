//! Sexagesimal zenith angle parsing (`D°M'S"` into radians).

use crate::types::{AngleField, AngleListError, AngleParseError};

const DEGREE_MARKERS: &[char] = &['°', 'º'];
const MINUTE_MARKERS: &[char] = &['\'', '′'];
const SECOND_MARKERS: &[char] = &['"', '″'];

/// Parses a single `D°M'S"` angle into radians.
///
/// Each component may carry its own sign and fraction; the total is
/// `D + M/60 + S/3600` degrees. All three markers are required.
pub fn parse_angle(input: &str) -> Result<f64, AngleParseError> {
    let text = input.trim();

    let (deg_str, rest) = split_at_marker(text, DEGREE_MARKERS)
        .ok_or_else(|| missing_marker(input, AngleField::Degrees))?;
    let (min_str, rest) = split_at_marker(rest, MINUTE_MARKERS)
        .ok_or_else(|| missing_marker(input, AngleField::Minutes))?;
    let (sec_str, trailing) = split_at_marker(rest, SECOND_MARKERS)
        .ok_or_else(|| missing_marker(input, AngleField::Seconds))?;

    if !trailing.trim().is_empty() {
        return Err(AngleParseError::TrailingText {
            input: input.to_string(),
        });
    }

    let degrees = parse_field(input, deg_str, AngleField::Degrees)?;
    let minutes = parse_field(input, min_str, AngleField::Minutes)?;
    let seconds = parse_field(input, sec_str, AngleField::Seconds)?;

    Ok((degrees + minutes / 60.0 + seconds / 3600.0).to_radians())
}

/// Parses a comma-separated list of angles.
///
/// Every element is attempted so the error lists all offending entries,
/// not just the first one.
pub fn parse_angle_list(input: &str) -> Result<Vec<f64>, AngleListError> {
    let mut angles = Vec::new();
    let mut failures = Vec::new();

    for (idx, element) in input.split(',').enumerate() {
        match parse_angle(element) {
            Ok(angle) => angles.push(angle),
            Err(err) => failures.push((idx, err)),
        }
    }

    if failures.is_empty() {
        Ok(angles)
    } else {
        Err(AngleListError { failures })
    }
}

fn split_at_marker<'a>(text: &'a str, markers: &[char]) -> Option<(&'a str, &'a str)> {
    let (pos, marker) = text.char_indices().find(|(_, c)| markers.contains(c))?;
    Some((&text[..pos], &text[pos + marker.len_utf8()..]))
}

fn missing_marker(input: &str, field: AngleField) -> AngleParseError {
    AngleParseError::MissingMarker {
        input: input.to_string(),
        field,
    }
}

fn parse_field(input: &str, value: &str, field: AngleField) -> Result<f64, AngleParseError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| AngleParseError::InvalidField {
            input: input.to_string(),
            field,
            value: value.trim().to_string(),
        })
}
