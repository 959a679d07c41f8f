use crate::errors::{ensure_positive, ForceModelError};
use crate::models::spacecraft::SpacecraftProperties;
use serde::{Deserialize, Serialize};

/// Reference LEO smallsat used by the demo and tests.
pub struct SimpleSat;

impl SimpleSat {
    pub const MASS: f64 = 100.0; // kg
    pub const C_D: f64 = 2.2;
    pub const C_R: f64 = 1.3;
    pub const R_SPACECRAFT: f64 = 1.0; // meters
}

impl SpacecraftProperties for SimpleSat {
    fn mass(&self) -> f64 {
        Self::MASS
    }

    fn radius(&self) -> f64 {
        Self::R_SPACECRAFT
    }

    fn drag_coefficient(&self) -> f64 {
        Self::C_D
    }

    fn reflectivity_coefficient(&self) -> f64 {
        Self::C_R
    }
}

/// Spacecraft description loaded from user configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacecraftConfig {
    pub mass: f64,   // kg
    pub radius: f64, // m
    #[serde(default = "default_drag_coefficient")]
    pub drag_coefficient: f64,
    #[serde(default = "default_reflectivity_coefficient")]
    pub reflectivity_coefficient: f64,
}

fn default_drag_coefficient() -> f64 {
    SimpleSat::C_D
}

fn default_reflectivity_coefficient() -> f64 {
    SimpleSat::C_R
}

impl Default for SpacecraftConfig {
    fn default() -> Self {
        Self {
            mass: SimpleSat::MASS,
            radius: SimpleSat::R_SPACECRAFT,
            drag_coefficient: SimpleSat::C_D,
            reflectivity_coefficient: SimpleSat::C_R,
        }
    }
}

impl SpacecraftConfig {
    pub fn validate(&self) -> Result<(), ForceModelError> {
        ensure_positive("mass", self.mass)?;
        ensure_positive("radius", self.radius)?;
        ensure_positive("drag_coeff", self.drag_coefficient)?;
        ensure_positive("reflectivity_coeff", self.reflectivity_coefficient)?;
        Ok(())
    }
}

impl SpacecraftProperties for SpacecraftConfig {
    fn mass(&self) -> f64 {
        self.mass
    }

    fn radius(&self) -> f64 {
        self.radius
    }

    fn drag_coefficient(&self) -> f64 {
        self.drag_coefficient
    }

    fn reflectivity_coefficient(&self) -> f64 {
        self.reflectivity_coefficient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_config_matches_simple_sat() {
        let config = SpacecraftConfig::default();
        assert_eq!(config.mass(), SimpleSat.mass());
        assert_eq!(config.drag_coefficient(), SimpleSat.drag_coefficient());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_simple_sat_ballistic_coeff() {
        let drag = crate::physics::drag::CannonballFixedDrag::from_spacecraft(&SimpleSat).unwrap();
        assert_abs_diff_eq!(
            drag.ballistic_coeff(),
            SimpleSat::C_D * std::f64::consts::PI / SimpleSat::MASS,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_validate_rejects_bad_mass() {
        let config = SpacecraftConfig { mass: 0.0, ..Default::default() };
        assert!(matches!(
            config.validate(),
            Err(ForceModelError::InvalidParameter { name: "mass", .. })
        ));
    }
}
