//! Solar radiation pressure.
//!
//! Cannonball model: `a = F · RC · Ψ · (AU / |R|)² · R̂` where `R` points from the Sun
//! to the spacecraft, `Ψ` is the solar pressure at 1 AU and `F` the lighting fraction
//! from the Earth shadow model.

use super::cannonball::Cannonball;
use super::dynamics::AccelerationModel;
use super::shadow::{shadow_model, ShadowModel};
use super::third_body::ThirdBodyModel;
use crate::constants::{AU, R_EARTH, R_SUN, SOLAR_PRESSURE_1AU};
use crate::errors::{ensure_positive, ForceModelError};
use crate::models::{Parameters, SpacecraftProperties, State};
use nalgebra as na;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cannonball SRP model with a fixed reflectivity ballistic coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannonballFixedSRP {
    geometry: Option<Cannonball>,
    reflectivity_ballistic_coeff: f64,
}

impl CannonballFixedSRP {
    /// `RC = C_R · π r² / m`
    pub fn new(radius: f64, mass: f64, reflectivity_coeff: f64) -> Result<Self, ForceModelError> {
        let geometry = Cannonball::new(radius, mass, reflectivity_coeff, "reflectivity_coeff")?;
        Ok(Self {
            reflectivity_ballistic_coeff: ensure_positive(
                "reflectivity_ballistic_coeff",
                geometry.ballistic_coefficient(),
            )?,
            geometry: Some(geometry),
        })
    }

    pub fn from_reflectivity_ballistic_coeff(coeff: f64) -> Result<Self, ForceModelError> {
        Ok(Self {
            geometry: None,
            reflectivity_ballistic_coeff: ensure_positive("reflectivity_ballistic_coeff", coeff)?,
        })
    }

    pub fn from_spacecraft<T: SpacecraftProperties>(spacecraft: &T) -> Result<Self, ForceModelError> {
        Self::new(spacecraft.radius(), spacecraft.mass(), spacecraft.reflectivity_coefficient())
    }

    pub fn radius(&self) -> Option<f64> {
        self.geometry.map(|g| g.radius)
    }

    pub fn mass(&self) -> Option<f64> {
        self.geometry.map(|g| g.mass)
    }

    pub fn reflectivity_coeff(&self) -> Option<f64> {
        self.geometry.map(|g| g.coefficient)
    }

    pub fn reflectivity_ballistic_coeff(&self) -> f64 {
        self.reflectivity_ballistic_coeff
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SatelliteSrpModel {
    CannonballFixed(CannonballFixedSRP),
    /// Read from [`Parameters::reflectivity_ballistic_coeff`] at every evaluation.
    State,
}

impl SatelliteSrpModel {
    /// Current reflectivity ballistic coefficient [m²/kg].
    pub fn reflectivity_ballistic_coefficient(
        &self,
        _state: &State,
        params: &Parameters,
        _t: f64,
    ) -> Result<f64, ForceModelError> {
        match self {
            SatelliteSrpModel::CannonballFixed(model) => Ok(model.reflectivity_ballistic_coeff),
            SatelliteSrpModel::State => {
                let rc = params
                    .reflectivity_ballistic_coeff
                    .ok_or(ForceModelError::MissingState("reflectivity_ballistic_coeff"))?;
                ensure_positive("reflectivity_ballistic_coeff", rc)
            }
        }
    }
}

impl From<CannonballFixedSRP> for SatelliteSrpModel {
    fn from(model: CannonballFixedSRP) -> Self {
        SatelliteSrpModel::CannonballFixed(model)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SrpType {
    #[default]
    Cannonball,
    None,
}

impl fmt::Display for SrpType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SrpType::Cannonball => write!(f, "Cannonball"),
            SrpType::None => write!(f, "None"),
        }
    }
}

impl FromStr for SrpType {
    type Err = ForceModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cannonball" => Ok(SrpType::Cannonball),
            "none" => Ok(SrpType::None),
            _ => Err(ForceModelError::UnsupportedConfiguration(format!("SRP model `{}`", s))),
        }
    }
}

/// Radii of the Sun and the occulting body, plus the solar pressure at 1 AU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarEnvironment {
    pub r_sun: f64,            // m
    pub r_earth: f64,          // m
    pub solar_pressure: f64,   // N/m² at 1 AU
}

impl Default for SolarEnvironment {
    fn default() -> Self {
        Self {
            r_sun: R_SUN,
            r_earth: R_EARTH,
            solar_pressure: SOLAR_PRESSURE_1AU,
        }
    }
}

/// SRP acceleration on a satellite at `position` with the Sun at `sun_pos`.
pub fn srp_accel(
    position: &na::Vector3<f64>,
    sun_pos: &na::Vector3<f64>,
    environment: &SolarEnvironment,
    reflectivity_ballistic_coeff: f64,
    srp_type: SrpType,
    shadow: ShadowModel,
) -> na::Vector3<f64> {
    if srp_type == SrpType::None {
        return na::Vector3::zeros();
    }

    let lighting = shadow_model(position, sun_pos, environment.r_sun, environment.r_earth, shadow);
    let sun_to_sat = position - sun_pos;
    let distance = sun_to_sat.magnitude();

    lighting
        * reflectivity_ballistic_coeff
        * environment.solar_pressure
        * (AU / distance).powi(2)
        * (sun_to_sat / distance)
}

/// Everything needed to evaluate SRP from the simulation state.
#[derive(Debug, Clone, PartialEq)]
pub struct SrpAstroModel {
    pub satellite_srp_model: SatelliteSrpModel,
    pub sun_data: ThirdBodyModel,
    pub srp_type: SrpType,
    pub shadow_model: ShadowModel,
    pub environment: SolarEnvironment,
}

impl SrpAstroModel {
    pub fn new(satellite_srp_model: impl Into<SatelliteSrpModel>, sun_data: ThirdBodyModel) -> Self {
        Self {
            satellite_srp_model: satellite_srp_model.into(),
            sun_data,
            srp_type: SrpType::Cannonball,
            shadow_model: ShadowModel::Conical,
            environment: SolarEnvironment::default(),
        }
    }

    pub fn with_shadow_model(mut self, shadow_model: ShadowModel) -> Self {
        self.shadow_model = shadow_model;
        self
    }

    pub fn with_srp_type(mut self, srp_type: SrpType) -> Self {
        self.srp_type = srp_type;
        self
    }
}

impl AccelerationModel for SrpAstroModel {
    fn acceleration(
        &self,
        state: &State,
        params: &Parameters,
        t: f64,
    ) -> Result<na::Vector3<f64>, ForceModelError> {
        let rc = self.satellite_srp_model.reflectivity_ballistic_coefficient(state, params, t)?;
        let sun_pos = self.sun_data.position(params.epoch_at(t))?;

        Ok(srp_accel(
            &state.position,
            &sun_pos,
            &self.environment,
            rc,
            self.srp_type,
            self.shadow_model,
        ))
    }

    fn name(&self) -> &'static str {
        "srp"
    }
}
