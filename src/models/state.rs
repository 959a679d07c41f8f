use hifitime::{Duration, Epoch};
use nalgebra as na;

/// Translational state in the central body's inertial frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub position: na::Vector3<f64>, // m
    pub velocity: na::Vector3<f64>, // m/s
}

impl State {
    pub fn new(position: na::Vector3<f64>, velocity: na::Vector3<f64>) -> Self {
        State { position, velocity }
    }

    pub fn zero() -> Self {
        State {
            position: na::Vector3::zeros(),
            velocity: na::Vector3::zeros(),
        }
    }

    /// Builds a state from a stacked `[r; v]` vector.
    pub fn from_vector(u: &na::Vector6<f64>) -> Self {
        State {
            position: u.fixed_rows::<3>(0).into_owned(),
            velocity: u.fixed_rows::<3>(3).into_owned(),
        }
    }

    pub fn to_vector(&self) -> na::Vector6<f64> {
        let mut u = na::Vector6::zeros();
        u.fixed_rows_mut::<3>(0).copy_from(&self.position);
        u.fixed_rows_mut::<3>(3).copy_from(&self.velocity);
        u
    }
}

impl From<na::Vector6<f64>> for State {
    fn from(u: na::Vector6<f64>) -> Self {
        State::from_vector(&u)
    }
}

impl std::ops::Add for State {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        State {
            position: self.position + other.position,
            velocity: self.velocity + other.velocity,
        }
    }
}

impl std::ops::Mul<f64> for State {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        State {
            position: self.position * scalar,
            velocity: self.velocity * scalar,
        }
    }
}

/// Simulation parameters shared by every force model.
///
/// `t` passed to the force models is measured in seconds from `epoch`. The coefficient
/// slots are read by the state-based drag and SRP models only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub epoch: Epoch,
    /// Ballistic coefficient C_D·A/m [m²/kg]
    pub ballistic_coeff: Option<f64>,
    /// Reflectivity ballistic coefficient C_R·A/m [m²/kg]
    pub reflectivity_ballistic_coeff: Option<f64>,
}

impl Parameters {
    pub fn new(epoch: Epoch) -> Self {
        Parameters {
            epoch,
            ballistic_coeff: None,
            reflectivity_ballistic_coeff: None,
        }
    }

    pub fn with_ballistic_coeff(mut self, bc: f64) -> Self {
        self.ballistic_coeff = Some(bc);
        self
    }

    pub fn with_reflectivity_ballistic_coeff(mut self, rc: f64) -> Self {
        self.reflectivity_ballistic_coeff = Some(rc);
        self
    }

    /// Absolute epoch `t` seconds after the reference epoch.
    pub fn epoch_at(&self, t: f64) -> Epoch {
        self.epoch + Duration::from_seconds(t)
    }
}
