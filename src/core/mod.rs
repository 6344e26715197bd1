pub mod config;
pub mod grid;
pub mod prelude;
pub mod render;
pub mod view;
pub mod workspace;

use thiserror::Error;

/// Non-finite (or otherwise unusable) numeric input. The engine expects
/// already-parsed values from the form collaborator, but never lets NaN or
/// infinity into the live state.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid input: {name} = {value}")]
pub struct InvalidInputError {
    pub name: &'static str,
    pub value: f64,
}

pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64, InvalidInputError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvalidInputError { name, value })
    }
}
