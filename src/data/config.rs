use skyrefrax::request::DEFAULT_REFERENCE_WAVELENGTH;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
    #[cfg(feature = "parquet")]
    Parquet,
}

impl OutputFormat {
    pub fn all() -> Vec<&'static str> {
        vec![
            "text",
            "csv",
            "json",
            #[cfg(feature = "parquet")]
            "parquet",
        ]
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            #[cfg(feature = "parquet")]
            "parquet" => Ok(OutputFormat::Parquet),
            _ => Err(format!(
                "Unknown format: {}. Supported formats: {}",
                s,
                OutputFormat::all().join(", ")
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            #[cfg(feature = "parquet")]
            OutputFormat::Parquet => "parquet",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub headers: bool,
    pub show_inputs: Option<bool>,
    pub degrees: bool,
}

impl OutputOptions {
    /// Inputs are shown by default only in the text table.
    pub fn should_show_inputs(&self) -> bool {
        self.show_inputs
            .unwrap_or(self.format == OutputFormat::Text)
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            headers: true,
            show_inputs: None,
            degrees: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Parameters {
    /// Reference wavelength in angstroms.
    pub reference_wavelength: f64,
    pub output: OutputOptions,
    pub perf: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            reference_wavelength: DEFAULT_REFERENCE_WAVELENGTH,
            output: OutputOptions::default(),
            perf: false,
        }
    }
}
