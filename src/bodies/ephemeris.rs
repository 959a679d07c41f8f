//! Low-precision analytic ephemerides.
//!
//! Positions come from the series in Vallado, *Fundamentals of Astrodynamics and
//! Applications* (Sun: algorithm 29, Moon: algorithm 31). Both are mean-of-date
//! geocentric positions, accurate to roughly 0.01° for the Sun and 0.3° for the Moon,
//! which is treated as J2000 at this fidelity.

use super::celestial_body::CelestialBody;
use crate::constants::{AU, DAYS_PER_JULIAN_CENTURY, JD_J2000, R_EARTH};
use crate::errors::ForceModelError;
use hifitime::Epoch;
use nalgebra as na;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SUN_NAIF_ID: i32 = 10;
const MOON_NAIF_ID: i32 = 301;

/// Ephemeris used to compute a third body's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EphemerisType {
    #[default]
    Vallado,
}

impl FromStr for EphemerisType {
    type Err = ForceModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vallado" => Ok(EphemerisType::Vallado),
            _ => Err(ForceModelError::UnsupportedConfiguration(format!(
                "ephemeris type `{}`",
                s
            ))),
        }
    }
}

impl fmt::Display for EphemerisType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EphemerisType::Vallado => write!(f, "Vallado"),
        }
    }
}

/// Position of `body` relative to the Earth at `epoch` [m].
pub fn get_position(
    ephem_type: EphemerisType,
    body: &CelestialBody,
    epoch: Epoch,
) -> Result<na::Vector3<f64>, ForceModelError> {
    match (ephem_type, body.jpl_code) {
        (EphemerisType::Vallado, SUN_NAIF_ID) => Ok(sun_position_vallado(epoch)),
        (EphemerisType::Vallado, MOON_NAIF_ID) => Ok(moon_position_vallado(epoch)),
        (ephem, _) => Err(ForceModelError::UnsupportedConfiguration(format!(
            "{} ephemeris for body `{}`",
            ephem, body.name
        ))),
    }
}

fn julian_centuries(epoch: Epoch) -> f64 {
    (epoch.to_jde_tt_days() - JD_J2000) / DAYS_PER_JULIAN_CENTURY
}

/// Mean obliquity of the ecliptic [rad].
fn obliquity(t: f64) -> f64 {
    (23.439291 - 0.0130042 * t).to_radians()
}

pub fn sun_position_vallado(epoch: Epoch) -> na::Vector3<f64> {
    let t = julian_centuries(epoch);

    let mean_longitude = (280.460 + 36000.771 * t).rem_euclid(360.0);
    let mean_anomaly = (357.5291092 + 35999.05034 * t).rem_euclid(360.0).to_radians();

    let ecliptic_longitude = (mean_longitude
        + 1.914666471 * mean_anomaly.sin()
        + 0.019994643 * (2.0 * mean_anomaly).sin())
    .to_radians();

    let distance = (1.000140612
        - 0.016708617 * mean_anomaly.cos()
        - 0.000139589 * (2.0 * mean_anomaly).cos())
        * AU;

    let eps = obliquity(t);
    distance
        * na::Vector3::new(
            ecliptic_longitude.cos(),
            eps.cos() * ecliptic_longitude.sin(),
            eps.sin() * ecliptic_longitude.sin(),
        )
}

pub fn moon_position_vallado(epoch: Epoch) -> na::Vector3<f64> {
    let t = julian_centuries(epoch);
    let sin_deg = |deg: f64| deg.to_radians().sin();
    let cos_deg = |deg: f64| deg.to_radians().cos();

    let ecliptic_longitude = (218.32 + 481267.8813 * t
        + 6.29 * sin_deg(134.9 + 477198.85 * t)
        - 1.27 * sin_deg(259.2 - 413335.38 * t)
        + 0.66 * sin_deg(235.7 + 890534.23 * t)
        + 0.21 * sin_deg(269.9 + 954397.70 * t)
        - 0.19 * sin_deg(357.5 + 35999.05 * t)
        - 0.11 * sin_deg(186.6 + 966404.05 * t))
    .rem_euclid(360.0)
    .to_radians();

    let ecliptic_latitude = (5.13 * sin_deg(93.3 + 483202.03 * t)
        + 0.28 * sin_deg(228.2 + 960400.87 * t)
        - 0.28 * sin_deg(318.3 + 6003.18 * t)
        - 0.17 * sin_deg(217.6 - 407332.20 * t))
    .to_radians();

    let horizontal_parallax = (0.9508
        + 0.0518 * cos_deg(134.9 + 477198.85 * t)
        + 0.0095 * cos_deg(259.2 - 413335.38 * t)
        + 0.0078 * cos_deg(235.7 + 890534.23 * t)
        + 0.0028 * cos_deg(269.9 + 954397.70 * t))
    .to_radians();

    let distance = R_EARTH / horizontal_parallax.sin();
    let eps = obliquity(t);
    let (sin_lon, cos_lon) = ecliptic_longitude.sin_cos();
    let (sin_lat, cos_lat) = ecliptic_latitude.sin_cos();

    distance
        * na::Vector3::new(
            cos_lat * cos_lon,
            eps.cos() * cos_lat * sin_lon - eps.sin() * sin_lat,
            eps.sin() * cos_lat * sin_lon + eps.cos() * sin_lat,
        )
}
