use crate::coordinates::eop_errors::EOPErrors;
use std::{error::Error, fmt};

#[derive(Debug)]
pub enum ForceModelError {
    /// An enumerated selector (shadow model, atmosphere, ephemeris, body...) that is
    /// unknown or not supported in the requested combination.
    UnsupportedConfiguration(String),
    /// A state-based coefficient model was used without the matching parameter slot.
    MissingState(&'static str),
    /// A physical input that must be positive and finite was not.
    InvalidParameter { name: &'static str, value: f64 },
    Unimplemented(&'static str),
    Eop(EOPErrors),
    /// A force model configuration document could not be parsed.
    Config(serde_json::Error),
}

impl fmt::Display for ForceModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForceModelError::UnsupportedConfiguration(s) => {
                write!(f, "Unsupported configuration: {}", s)
            }
            ForceModelError::MissingState(slot) => {
                write!(f, "Missing state: parameter `{}` is not set", slot)
            }
            ForceModelError::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter: {} = {} (must be positive and finite)", name, value)
            }
            ForceModelError::Unimplemented(what) => write!(f, "{} is not implemented", what),
            ForceModelError::Eop(e) => write!(f, "EOP error: {}", e),
            ForceModelError::Config(e) => write!(f, "Invalid force model configuration: {}", e),
        }
    }
}

impl Error for ForceModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ForceModelError::Eop(e) => Some(e),
            ForceModelError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EOPErrors> for ForceModelError {
    fn from(err: EOPErrors) -> Self {
        ForceModelError::Eop(err)
    }
}

impl From<serde_json::Error> for ForceModelError {
    fn from(err: serde_json::Error) -> Self {
        ForceModelError::Config(err)
    }
}

/// Checks that a physical quantity is positive and finite.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64, ForceModelError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ForceModelError::InvalidParameter { name, value })
    }
}
