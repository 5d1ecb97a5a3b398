//! Differential atmospheric refraction: refractive index of air, sexagesimal
//! zenith angle parsing and the wavelength × zenith angle offset matrix.

pub mod angle_parser;
pub mod file_input;
pub mod matrix;
pub mod refraction;
pub mod request;
pub mod types;

pub use angle_parser::{parse_angle, parse_angle_list};
pub use matrix::{RefractionMatrix, RefractiveIndexTable, build_matrix, differential_refraction};
pub use refraction::{refractive_index, refractive_index_angstrom};
pub use request::{RefractionRequest, RequestText};
pub use types::{AngleListError, AngleParseError, AtmosphericState, NumericInputError, RequestError};
