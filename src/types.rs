use std::fmt;
use thiserror::Error;

/// Which component of a sexagesimal angle a parse error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleField {
    Degrees,
    Minutes,
    Seconds,
}

impl fmt::Display for AngleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleField::Degrees => write!(f, "degrees"),
            AngleField::Minutes => write!(f, "minutes"),
            AngleField::Seconds => write!(f, "seconds"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AngleParseError {
    #[error("missing {field} marker in '{input}'")]
    MissingMarker { input: String, field: AngleField },
    #[error("invalid {field} value '{value}' in '{input}'")]
    InvalidField {
        input: String,
        field: AngleField,
        value: String,
    },
    #[error("unexpected text after seconds marker in '{input}'")]
    TrailingText { input: String },
}

impl AngleParseError {
    /// The angle text that failed to parse.
    pub fn input(&self) -> &str {
        match self {
            AngleParseError::MissingMarker { input, .. }
            | AngleParseError::InvalidField { input, .. }
            | AngleParseError::TrailingText { input } => input,
        }
    }
}

/// Every element of a comma-separated angle list that failed to parse.
///
/// Positions are 0-based in `failures` and reported 1-based in the message.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid zenith angles: {}", describe_failures(.failures))]
pub struct AngleListError {
    pub failures: Vec<(usize, AngleParseError)>,
}

impl AngleListError {
    pub fn failed_positions(&self) -> Vec<usize> {
        self.failures.iter().map(|(idx, _)| *idx).collect()
    }
}

fn describe_failures(failures: &[(usize, AngleParseError)]) -> String {
    failures
        .iter()
        .map(|(idx, err)| format!("angle {} is invalid: {}", idx + 1, err))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid {field} value: {value}")]
pub struct NumericInputError {
    pub field: String,
    pub value: String,
}

impl NumericInputError {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error(transparent)]
    Angles(#[from] AngleListError),
    #[error(transparent)]
    Numeric(#[from] NumericInputError),
}

/// Local atmospheric conditions at the observing site.
///
/// No range is enforced: values far outside terrestrial conditions simply
/// propagate through the index formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphericState {
    pub pressure_mmhg: f64,
    pub temperature_c: f64,
    pub water_vapor_mmhg: f64,
}

impl AtmosphericState {
    pub fn new(pressure_mmhg: f64, temperature_c: f64, water_vapor_mmhg: f64) -> Self {
        Self {
            pressure_mmhg,
            temperature_c,
            water_vapor_mmhg,
        }
    }
}

impl fmt::Display for AtmosphericState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P={} mmHg, T={}°C, W={} mmHg",
            self.pressure_mmhg, self.temperature_c, self.water_vapor_mmhg
        )
    }
}
