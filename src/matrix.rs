//! Differential refraction matrix assembly.
//!
//! Orientation is wavelength-major: row `i` belongs to wavelength `i`,
//! column `j` to zenith angle `j`. Labels follow the same orientation.

use crate::refraction::refractive_index_angstrom;
use crate::types::AtmosphericState;

/// Radians to arcseconds, as used by the refraction formula.
pub const ARCSEC_PER_RADIAN: f64 = 206265.0;

/// Differential refraction in arcseconds between an index `n_lambda` and
/// the reference index `n_ref` at the given zenith angle.
///
/// At the horizon (`π/2`) the tangent diverges and so does the result.
pub fn differential_refraction(n_lambda: f64, n_ref: f64, zenith_angle: f64) -> f64 {
    ARCSEC_PER_RADIAN * (n_lambda - n_ref) * zenith_angle.tan()
}

/// Secant of the zenith angle, a proxy for airmass.
pub fn secant(zenith_angle: f64) -> f64 {
    1.0 / zenith_angle.cos()
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefractiveIndexTable {
    /// Reference wavelength in angstroms.
    pub reference_wavelength: f64,
    pub reference_index: f64,
    /// `(wavelength in angstroms, refractive index)` in request order.
    pub entries: Vec<(f64, f64)>,
}

impl RefractiveIndexTable {
    pub fn compute(
        wavelengths_angstrom: &[f64],
        state: &AtmosphericState,
        reference_wavelength_angstrom: f64,
    ) -> Self {
        let reference_index = refractive_index_angstrom(reference_wavelength_angstrom, state);
        log::debug!(
            "reference index {} at {} Å ({})",
            reference_index,
            reference_wavelength_angstrom,
            state
        );

        let entries = wavelengths_angstrom
            .iter()
            .map(|&wavelength| {
                let n = refractive_index_angstrom(wavelength, state);
                log::debug!("index {} at {} Å", n, wavelength);
                (wavelength, n)
            })
            .collect();

        Self {
            reference_wavelength: reference_wavelength_angstrom,
            reference_index,
            entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefractionMatrix {
    indices: RefractiveIndexTable,
    angles: Vec<f64>,
    values: Vec<f64>,
}

/// One cell of the matrix together with its coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixCell {
    pub row: usize,
    pub column: usize,
    pub wavelength: f64,
    pub refractive_index: f64,
    pub zenith_angle: f64,
    pub delta_r: f64,
}

/// Builds the wavelength-major matrix of differential refraction values.
pub fn build_matrix(
    wavelengths_angstrom: &[f64],
    state: &AtmosphericState,
    angles: &[f64],
    reference_wavelength_angstrom: f64,
) -> RefractionMatrix {
    let indices =
        RefractiveIndexTable::compute(wavelengths_angstrom, state, reference_wavelength_angstrom);
    RefractionMatrix::from_indices(indices, angles)
}

impl RefractionMatrix {
    pub fn from_indices(indices: RefractiveIndexTable, angles: &[f64]) -> Self {
        let n_ref = indices.reference_index;
        let values: Vec<f64> = indices
            .entries
            .iter()
            .flat_map(|&(_, n_lambda)| {
                angles
                    .iter()
                    .map(move |&angle| differential_refraction(n_lambda, n_ref, angle))
            })
            .collect();

        let non_finite = values.iter().filter(|v| !v.is_finite()).count();
        if non_finite > 0 {
            log::warn!(
                "{} of {} refraction values are not finite",
                non_finite,
                values.len()
            );
        }

        Self {
            indices,
            angles: angles.to_vec(),
            values,
        }
    }

    /// `(rows, columns)`, i.e. `(wavelengths, angles)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.indices.entries.len(), self.angles.len())
    }

    pub fn indices(&self) -> &RefractiveIndexTable {
        &self.indices
    }

    pub fn wavelengths(&self) -> impl Iterator<Item = f64> + '_ {
        self.indices.entries.iter().map(|&(wavelength, _)| wavelength)
    }

    /// Zenith angles in radians.
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if column >= self.angles.len() {
            return None;
        }
        self.values.get(row * self.angles.len() + column).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        let width = self.angles.len();
        let start = row.checked_mul(width)?;
        self.values.get(start..start + width)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        let width = self.angles.len().max(1);
        let rows = self.indices.entries.len();
        self.values.chunks(width).take(rows)
    }

    pub fn cells(&self) -> impl Iterator<Item = MatrixCell> + '_ {
        self.indices
            .entries
            .iter()
            .enumerate()
            .flat_map(move |(row, &(wavelength, refractive_index))| {
                self.angles
                    .iter()
                    .enumerate()
                    .map(move |(column, &zenith_angle)| MatrixCell {
                        row,
                        column,
                        wavelength,
                        refractive_index,
                        zenith_angle,
                        delta_r: self.values[row * self.angles.len() + column],
                    })
            })
    }

    /// Row labels: wavelength with unit.
    pub fn row_labels(&self) -> Vec<String> {
        self.wavelengths().map(wavelength_label).collect()
    }

    /// Column labels: secant rounded to 2 decimals, optionally followed by
    /// the zenith angle in degrees.
    pub fn column_labels(&self, with_degrees: bool) -> Vec<String> {
        self.angles
            .iter()
            .map(|&angle| column_label(angle, with_degrees))
            .collect()
    }
}

pub fn wavelength_label(wavelength: f64) -> String {
    format!("{} Å", wavelength)
}

pub fn column_label(zenith_angle: f64, with_degrees: bool) -> String {
    let sec = display_value(secant(zenith_angle));
    if with_degrees {
        format!("{} ({}°)", sec, display_value(zenith_angle.to_degrees()))
    } else {
        sec
    }
}

/// Presentation rounding to 2 decimals; a rounded zero never shows a sign.
pub fn display_value(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0.00".to_string()
    } else {
        format!("{:.2}", rounded)
    }
}
