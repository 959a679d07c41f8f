use crate::errors::{ensure_positive, ForceModelError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Gravitational and geometric description of a celestial body.
///
/// Values follow GMAT/JPL DE defaults, converted to SI units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub name: String,
    /// Name of the body being orbited, `"None"` for the Sun.
    pub central_body: String,
    /// NAIF ID code
    pub jpl_code: i32,
    /// Gravitational parameter [m³/s²]
    pub mu: f64,
    /// Equatorial radius [m]
    pub equatorial_radius: f64,
}

/// name, central body, NAIF id, μ [m³/s²], equatorial radius [m]
const KNOWN_BODIES: [(&str, &str, i32, f64, f64); 11] = [
    ("Sun", "None", 10, 1.32712440018e20, 6.955e8),
    ("Mercury", "Sun", 199, 2.2032080486418e13, 2.4397e6),
    ("Venus", "Sun", 299, 3.2485859882646e14, 6.0518e6),
    ("Earth", "Sun", 399, 3.986004415e14, 6.378137e6),
    ("Moon", "Earth", 301, 4.9028005821478e12, 1.7381e6),
    ("Mars", "Sun", 499, 4.282837581575e13, 3.3962e6),
    ("Jupiter", "Sun", 599, 1.26712767857796e17, 7.1492e7),
    ("Saturn", "Sun", 699, 3.7940626061137e16, 6.0268e7),
    ("Uranus", "Sun", 799, 5.794549007071e15, 2.5559e7),
    ("Neptune", "Sun", 899, 6.836534063879e15, 2.4764e7),
    ("Pluto", "Sun", 999, 9.81601e11, 1.1883e6),
];

impl CelestialBody {
    /// Builds a custom body. μ and radius must be positive and finite.
    pub fn new(
        name: impl Into<String>,
        central_body: impl Into<String>,
        jpl_code: i32,
        mu: f64,
        equatorial_radius: f64,
    ) -> Result<Self, ForceModelError> {
        Ok(Self {
            name: name.into(),
            central_body: central_body.into(),
            jpl_code,
            mu: ensure_positive("mu", mu)?,
            equatorial_radius: ensure_positive("equatorial_radius", equatorial_radius)?,
        })
    }

    /// Looks a body up by name, ignoring case.
    pub fn from_name(name: &str) -> Result<Self, ForceModelError> {
        KNOWN_BODIES
            .iter()
            .find(|(known, ..)| known.eq_ignore_ascii_case(name.trim()))
            .map(|&(name, central_body, jpl_code, mu, equatorial_radius)| Self {
                name: name.to_string(),
                central_body: central_body.to_string(),
                jpl_code,
                mu,
                equatorial_radius,
            })
            .ok_or_else(|| {
                ForceModelError::UnsupportedConfiguration(format!("celestial body `{}`", name))
            })
    }

    pub fn sun() -> Self {
        Self::known(0)
    }

    pub fn earth() -> Self {
        Self::known(3)
    }

    pub fn moon() -> Self {
        Self::known(4)
    }

    /// Names accepted by [`CelestialBody::from_name`].
    pub fn available() -> impl Iterator<Item = &'static str> {
        KNOWN_BODIES.iter().map(|(name, ..)| *name)
    }

    fn known(index: usize) -> Self {
        let (name, central_body, jpl_code, mu, equatorial_radius) = KNOWN_BODIES[index];
        Self {
            name: name.to_string(),
            central_body: central_body.to_string(),
            jpl_code,
            mu,
            equatorial_radius,
        }
    }
}

impl FromStr for CelestialBody {
    type Err = ForceModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
