use super::dynamics::AccelerationModel;
use crate::bodies::{get_position, CelestialBody, EphemerisType};
use crate::errors::ForceModelError;
use crate::models::{Parameters, State};
use hifitime::Epoch;
use nalgebra as na;

/// Acceleration from a third body represented as a point mass.
///
/// The central body is pulled by the third body too, so only the difference
/// `∇U_B(r_sc) - ∇U_B(r_central)` perturbs the orbit. It is evaluated with Battin's
/// `f(q)` series, which avoids subtracting two nearly equal accelerations.
///
/// `body_pos` is the position of the third body relative to the central body.
pub fn third_body_accel(
    position: &na::Vector3<f64>,
    mu_body: f64,
    body_pos: &na::Vector3<f64>,
) -> na::Vector3<f64> {
    let d = position - body_pos;
    let q = position.dot(&(position - 2.0 * body_pos)) / body_pos.dot(body_pos);
    let f_q = q * (3.0 + 3.0 * q + q * q) / (1.0 + (1.0 + q).powf(1.5));

    -mu_body / d.magnitude().powi(3) * (position + f_q * body_pos)
}

/// A perturbing body and the ephemeris used to place it.
#[derive(Debug, Clone, PartialEq)]
pub struct ThirdBodyModel {
    pub body: CelestialBody,
    pub ephem_type: EphemerisType,
}

impl ThirdBodyModel {
    pub fn new(body: CelestialBody, ephem_type: EphemerisType) -> Self {
        Self { body, ephem_type }
    }

    pub fn sun() -> Self {
        Self::new(CelestialBody::sun(), EphemerisType::Vallado)
    }

    pub fn moon() -> Self {
        Self::new(CelestialBody::moon(), EphemerisType::Vallado)
    }

    /// Position of the body relative to the central body [m].
    pub fn position(&self, epoch: Epoch) -> Result<na::Vector3<f64>, ForceModelError> {
        get_position(self.ephem_type, &self.body, epoch)
    }
}

impl AccelerationModel for ThirdBodyModel {
    fn acceleration(
        &self,
        state: &State,
        params: &Parameters,
        t: f64,
    ) -> Result<na::Vector3<f64>, ForceModelError> {
        let body_pos = self.position(params.epoch_at(t))?;
        Ok(third_body_accel(&state.position, self.body.mu, &body_pos))
    }

    fn name(&self) -> &'static str {
        match self.body.jpl_code {
            10 => "third_body_sun",
            301 => "third_body_moon",
            _ => "third_body",
        }
    }
}
