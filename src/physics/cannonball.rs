use crate::constants::PI;
use crate::errors::{ensure_positive, ForceModelError};

/// Validated spherical spacecraft geometry with one force coefficient (C_D or C_R).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cannonball {
    pub radius: f64, // m
    pub mass: f64,   // kg
    pub coefficient: f64,
}

impl Cannonball {
    pub(crate) fn new(
        radius: f64,
        mass: f64,
        coefficient: f64,
        coefficient_name: &'static str,
    ) -> Result<Self, ForceModelError> {
        Ok(Self {
            radius: ensure_positive("radius", radius)?,
            mass: ensure_positive("mass", mass)?,
            coefficient: ensure_positive(coefficient_name, coefficient)?,
        })
    }

    /// Projected area of the sphere, π r².
    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// coefficient · area / mass [m²/kg]
    pub fn ballistic_coefficient(&self) -> f64 {
        self.coefficient * self.area() / self.mass
    }
}
