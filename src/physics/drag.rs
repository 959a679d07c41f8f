//! Atmospheric drag.
//!
//! The atmosphere is treated as a solid co-rotating with the Earth. The apparent
//! velocity of the satellite follows from the transport theorem,
//! `v_app = v - ω × r`, and the cannonball drag acceleration is
//! `a = -½ ρ BC |v_app|² v̂_app`.

use super::atmosphere::{AtmosphereType, DensityProvider};
use super::cannonball::Cannonball;
use super::dynamics::AccelerationModel;
use crate::constants::EARTH_ANGULAR_VELOCITY;
use crate::coordinates::EopTable;
use crate::errors::{ensure_positive, ForceModelError};
use crate::models::{Parameters, SpacecraftProperties, State};
use nalgebra as na;
use std::sync::Arc;

/// Cannonball drag model with a fixed ballistic coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannonballFixedDrag {
    /// Absent when the model was built from a ballistic coefficient alone.
    geometry: Option<Cannonball>,
    ballistic_coeff: f64,
}

impl CannonballFixedDrag {
    /// `BC = C_D · π r² / m`
    pub fn new(radius: f64, mass: f64, drag_coeff: f64) -> Result<Self, ForceModelError> {
        let geometry = Cannonball::new(radius, mass, drag_coeff, "drag_coeff")?;
        Ok(Self {
            ballistic_coeff: ensure_positive("ballistic_coeff", geometry.ballistic_coefficient())?,
            geometry: Some(geometry),
        })
    }

    pub fn from_ballistic_coeff(ballistic_coeff: f64) -> Result<Self, ForceModelError> {
        Ok(Self {
            geometry: None,
            ballistic_coeff: ensure_positive("ballistic_coeff", ballistic_coeff)?,
        })
    }

    pub fn from_spacecraft<T: SpacecraftProperties>(spacecraft: &T) -> Result<Self, ForceModelError> {
        Self::new(spacecraft.radius(), spacecraft.mass(), spacecraft.drag_coefficient())
    }

    pub fn radius(&self) -> Option<f64> {
        self.geometry.map(|g| g.radius)
    }

    pub fn mass(&self) -> Option<f64> {
        self.geometry.map(|g| g.mass)
    }

    pub fn drag_coeff(&self) -> Option<f64> {
        self.geometry.map(|g| g.coefficient)
    }

    pub fn ballistic_coeff(&self) -> f64 {
        self.ballistic_coeff
    }
}

/// How the ballistic coefficient of the satellite is obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SatelliteDragModel {
    CannonballFixed(CannonballFixedDrag),
    /// Read from [`Parameters::ballistic_coeff`] at every evaluation.
    State,
}

impl SatelliteDragModel {
    /// Current ballistic coefficient [m²/kg].
    pub fn ballistic_coefficient(
        &self,
        _state: &State,
        params: &Parameters,
        _t: f64,
    ) -> Result<f64, ForceModelError> {
        match self {
            SatelliteDragModel::CannonballFixed(model) => Ok(model.ballistic_coeff),
            SatelliteDragModel::State => {
                let bc = params
                    .ballistic_coeff
                    .ok_or(ForceModelError::MissingState("ballistic_coeff"))?;
                ensure_positive("ballistic_coeff", bc)
            }
        }
    }
}

impl From<CannonballFixedDrag> for SatelliteDragModel {
    fn from(model: CannonballFixedDrag) -> Self {
        SatelliteDragModel::CannonballFixed(model)
    }
}

/// Drag acceleration for a given density and ballistic coefficient.
///
/// `omega` is the angular velocity of the atmosphere, typically `[0, 0, ω_Earth]`.
pub fn drag_accel(
    state: &State,
    rho: f64,
    ballistic_coeff: f64,
    omega: &na::Vector3<f64>,
) -> na::Vector3<f64> {
    let apparent_velocity = state.velocity - omega.cross(&state.position);
    let v_app = apparent_velocity.magnitude();

    // |v|² v̂ = |v| v, which also stays finite at zero apparent velocity
    -0.5 * rho * ballistic_coeff * v_app * apparent_velocity
}

/// Everything needed to evaluate drag from the simulation state.
pub struct DragAstroModel<A: DensityProvider = AtmosphereType> {
    pub satellite_drag_model: SatelliteDragModel,
    pub atmosphere_model: A,
    pub eop_data: Arc<EopTable>,
    /// Angular velocity of the atmosphere [rad/s]
    pub angular_velocity: na::Vector3<f64>,
}

impl<A: DensityProvider> DragAstroModel<A> {
    pub fn new(
        satellite_drag_model: impl Into<SatelliteDragModel>,
        atmosphere_model: A,
        eop_data: Arc<EopTable>,
    ) -> Self {
        Self {
            satellite_drag_model: satellite_drag_model.into(),
            atmosphere_model,
            eop_data,
            angular_velocity: na::Vector3::new(0.0, 0.0, EARTH_ANGULAR_VELOCITY),
        }
    }
}

impl<A: DensityProvider> AccelerationModel for DragAstroModel<A> {
    fn acceleration(
        &self,
        state: &State,
        params: &Parameters,
        t: f64,
    ) -> Result<na::Vector3<f64>, ForceModelError> {
        let ballistic_coeff = self.satellite_drag_model.ballistic_coefficient(state, params, t)?;

        let epoch = params.epoch_at(t);
        let eop = self.eop_data.interpolate(epoch)?;
        let rho = self.atmosphere_model.density(epoch, state, &eop)?;

        Ok(drag_accel(state, rho, ballistic_coeff, &self.angular_velocity))
    }

    fn name(&self) -> &'static str {
        "drag"
    }
}
