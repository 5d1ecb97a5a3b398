//! Turns the raw text fields of a calculation request into validated inputs.
//!
//! Every field is parsed before any refractive index is evaluated, so a bad
//! request never produces a partial matrix.

use crate::angle_parser::parse_angle_list;
use crate::matrix::{RefractionMatrix, build_matrix};
use crate::types::{AtmosphericState, NumericInputError, RequestError};

/// Reference wavelength used when none is configured.
pub const DEFAULT_REFERENCE_WAVELENGTH: f64 = 5000.0;

/// Unparsed request fields as entered by the user.
#[derive(Debug, Clone, Copy)]
pub struct RequestText<'a> {
    pub wavelengths: &'a str,
    pub angles: &'a str,
    pub pressure: &'a str,
    pub temperature: &'a str,
    pub water_vapor: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefractionRequest {
    /// Wavelengths in angstroms.
    pub wavelengths: Vec<f64>,
    /// Zenith angles in radians.
    pub angles: Vec<f64>,
    pub state: AtmosphericState,
    /// Reference wavelength in angstroms.
    pub reference_wavelength: f64,
}

impl RefractionRequest {
    pub fn parse(text: &RequestText<'_>, reference_wavelength: f64) -> Result<Self, RequestError> {
        let wavelengths = parse_wavelength_list(text.wavelengths)?;
        let angles = parse_angle_list(text.angles)?;
        let state = AtmosphericState::new(
            parse_scalar("pressure", text.pressure)?,
            parse_scalar("temperature", text.temperature)?,
            parse_scalar("water vapor", text.water_vapor)?,
        );

        log::debug!(
            "parsed request: {} wavelengths, {} angles, {}, reference {} Å",
            wavelengths.len(),
            angles.len(),
            state,
            reference_wavelength
        );

        Ok(Self {
            wavelengths,
            angles,
            state,
            reference_wavelength,
        })
    }

    pub fn compute(&self) -> RefractionMatrix {
        build_matrix(
            &self.wavelengths,
            &self.state,
            &self.angles,
            self.reference_wavelength,
        )
    }
}

pub fn parse_scalar(label: &str, value: &str) -> Result<f64, NumericInputError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| NumericInputError::new(label, value.trim()))
}

/// Parses a comma-separated list of wavelengths in angstroms.
pub fn parse_wavelength_list(input: &str) -> Result<Vec<f64>, NumericInputError> {
    input
        .split(',')
        .enumerate()
        .map(|(idx, element)| {
            parse_scalar(&format!("wavelength #{}", idx + 1), element)
        })
        .collect()
}
