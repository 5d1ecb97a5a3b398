use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum InputPath {
    Stdin,
    File(PathBuf),
}

impl InputPath {
    pub fn as_arg(&self) -> String {
        match self {
            InputPath::Stdin => "@-".to_string(),
            InputPath::File(path) => format!("@{}", path.display()),
        }
    }
}

/// Where a comma-separated list comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ListSource {
    Inline(String),
    File(InputPath),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestSource {
    pub wavelengths: ListSource,
    pub angles: ListSource,
    pub pressure: String,
    pub temperature: String,
    pub water_vapor: String,
}

impl RequestSource {
    pub fn uses_stdin(&self) -> bool {
        [&self.wavelengths, &self.angles]
            .iter()
            .any(|source| matches!(source, ListSource::File(InputPath::Stdin)))
    }
}
