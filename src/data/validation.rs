pub fn validate_reference_wavelength(value: f64) -> Result<f64, String> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!(
            "Reference wavelength must be a positive number of angstroms, got {}",
            value
        ))
    }
}
