pub mod config;
pub mod types;
pub mod validation;

pub use config::{OutputFormat, Parameters};
pub use types::*;
pub use validation::*;
