//! Refractive index of moist air (Cauchy-type dispersion with pressure,
//! temperature and water-vapor correction).

use crate::types::AtmosphericState;

const K1: f64 = 64.328;
const K2: f64 = 29498.1;
const K3: f64 = 255.4;

/// Conversion factor from angstroms to micrometers.
pub const ANGSTROM_TO_MICROMETER: f64 = 1e-4;

/// Refractive index of air at `wavelength_um` micrometers.
///
/// Pure evaluator: no input is validated and the poles near 0.0828 µm and
/// 0.1562 µm are left as bare divisions, so they yield `inf`/`NaN`.
/// Operation order is fixed for reproducible rounding.
pub fn refractive_index(wavelength_um: f64, state: &AtmosphericState) -> f64 {
    let p = state.pressure_mmhg;
    let t = state.temperature_c;
    let w = state.water_vapor_mmhg;
    let sigma2 = (1.0 / wavelength_um).powi(2);

    let dispersion = K1 + K2 / (146.0 - sigma2) + K3 / (41.0 - sigma2);
    let density = dispersion
        * (p * (1.0 + (1.049 - 0.0157 * t) * 1e-6 * p) / (720.883 * (1.0 + 0.003661 * t)));
    let moist = density - (0.0624 - 0.000680 / wavelength_um) / (1.0 + 0.003661 * t) * w;

    moist / 1e6 + 1.0
}

/// Same as [`refractive_index`] for a wavelength given in angstroms.
pub fn refractive_index_angstrom(wavelength_angstrom: f64, state: &AtmosphericState) -> f64 {
    refractive_index(wavelength_angstrom * ANGSTROM_TO_MICROMETER, state)
}
