//! Execution planning: resolve list sources and parse the request before any
//! computation starts.

use crate::data::{ListSource, Parameters, RequestSource};
use crate::error::PlannerError;
use skyrefrax::file_input::{create_file_reader, read_list};
use skyrefrax::{RefractionRequest, RequestText};

pub struct ComputePlan {
    pub request: RefractionRequest,
    pub params: Parameters,
}

pub fn build_job(source: RequestSource, params: Parameters) -> Result<ComputePlan, PlannerError> {
    if source.uses_stdin() {
        log::debug!("reading one input list from stdin");
    }
    let wavelengths = resolve_list(&source.wavelengths, "wavelengths")?;
    let angles = resolve_list(&source.angles, "zenith angles")?;

    let text = RequestText {
        wavelengths: &wavelengths,
        angles: &angles,
        pressure: &source.pressure,
        temperature: &source.temperature,
        water_vapor: &source.water_vapor,
    };
    let request = RefractionRequest::parse(&text, params.reference_wavelength)?;

    Ok(ComputePlan { request, params })
}

fn resolve_list(source: &ListSource, label: &str) -> Result<String, PlannerError> {
    match source {
        ListSource::Inline(text) => Ok(text.clone()),
        ListSource::File(path) => {
            let arg = path.as_arg();
            let reader = create_file_reader(&arg)
                .map_err(|e| PlannerError::from(format!("Cannot open {}: {}", arg, e)))?;
            let text = read_list(reader)
                .map_err(|e| PlannerError::from(format!("Cannot read {}: {}", arg, e)))?;
            if text.is_empty() {
                return Err(format!("No {} found in {}", label, arg).into());
            }
            log::debug!("read {} from {}", label, arg);
            Ok(text)
        }
    }
}
