use crate::coordinates::{gcrs_to_itrs, itrs_to_geodetic, EOPData};
use crate::errors::ForceModelError;
use crate::models::State;
use hifitime::Epoch;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source of atmospheric mass density for the drag model.
///
/// Implementations must be thread-safe so drag models can be shared between
/// propagations running in parallel.
pub trait DensityProvider: Send + Sync {
    /// Density at the spacecraft position [kg/m³].
    fn density(&self, epoch: Epoch, state: &State, eop: &EOPData) -> Result<f64, ForceModelError>;

    fn name(&self) -> &'static str;
}

/// Built-in atmosphere selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AtmosphereType {
    /// Jacchia-Bowman 2008
    JB2008,
    /// Jacchia-Roberts 1971
    JR1971,
    /// NRL MSIS 2000
    MSIS2000,
    /// Piecewise exponential atmosphere (Vallado table 8-4)
    ExpAtmo,
    None,
}

impl AtmosphereType {
    pub fn label(&self) -> &'static str {
        match self {
            AtmosphereType::JB2008 => "JB2008",
            AtmosphereType::JR1971 => "JR1971",
            AtmosphereType::MSIS2000 => "MSIS2000",
            AtmosphereType::ExpAtmo => "ExpAtmo",
            AtmosphereType::None => "None",
        }
    }
}

impl fmt::Display for AtmosphereType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for AtmosphereType {
    type Err = ForceModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jb2008" => Ok(AtmosphereType::JB2008),
            "jr1971" => Ok(AtmosphereType::JR1971),
            "msis2000" => Ok(AtmosphereType::MSIS2000),
            "expatmo" | "exponential" => Ok(AtmosphereType::ExpAtmo),
            "none" => Ok(AtmosphereType::None),
            _ => Err(ForceModelError::UnsupportedConfiguration(format!(
                "atmosphere model `{}`",
                s
            ))),
        }
    }
}

impl DensityProvider for AtmosphereType {
    fn density(&self, epoch: Epoch, state: &State, eop: &EOPData) -> Result<f64, ForceModelError> {
        compute_density(epoch, state, eop, *self)
    }

    fn name(&self) -> &'static str {
        self.label()
    }
}

/// Computes the atmospheric density at the spacecraft position.
///
/// The empirical thermosphere models need space weather indices this crate does not
/// carry; plug them in through a custom [`DensityProvider`] instead.
pub fn compute_density(
    epoch: Epoch,
    state: &State,
    eop: &EOPData,
    atmosphere: AtmosphereType,
) -> Result<f64, ForceModelError> {
    match atmosphere {
        AtmosphereType::ExpAtmo => {
            let itrs = gcrs_to_itrs(&state.position, &epoch, eop);
            let altitude = itrs_to_geodetic(&itrs).altitude;
            Ok(exponential_density(altitude))
        }
        AtmosphereType::None => Ok(0.0),
        AtmosphereType::JB2008 | AtmosphereType::JR1971 | AtmosphereType::MSIS2000 => {
            Err(ForceModelError::UnsupportedConfiguration(format!(
                "atmosphere model `{}` requires an external density provider",
                atmosphere
            )))
        }
    }
}

// Base altitude [km], nominal density [kg/m³], scale height [km]
const EXPONENTIAL_TABLE: [(f64, f64, f64); 28] = [
    (0.0, 1.225, 7.249),
    (25.0, 3.899e-2, 6.349),
    (30.0, 1.774e-2, 6.682),
    (40.0, 3.972e-3, 7.554),
    (50.0, 1.057e-3, 8.382),
    (60.0, 3.206e-4, 7.714),
    (70.0, 8.770e-5, 6.549),
    (80.0, 1.905e-5, 5.799),
    (90.0, 3.396e-6, 5.382),
    (100.0, 5.297e-7, 5.877),
    (110.0, 9.661e-8, 7.263),
    (120.0, 2.438e-8, 9.473),
    (130.0, 8.484e-9, 12.636),
    (140.0, 3.845e-9, 16.149),
    (150.0, 2.070e-9, 22.523),
    (180.0, 5.464e-10, 29.740),
    (200.0, 2.789e-10, 37.105),
    (250.0, 7.248e-11, 45.546),
    (300.0, 2.418e-11, 53.628),
    (350.0, 9.518e-12, 53.298),
    (400.0, 3.725e-12, 58.515),
    (450.0, 1.585e-12, 60.828),
    (500.0, 6.967e-13, 63.822),
    (600.0, 1.454e-13, 71.835),
    (700.0, 3.614e-14, 88.667),
    (800.0, 1.170e-14, 124.64),
    (900.0, 5.245e-15, 181.05),
    (1000.0, 3.019e-15, 268.00),
];

/// Exponential atmosphere density at a geodetic altitude [m].
pub fn exponential_density(altitude: f64) -> f64 {
    let h = (altitude / 1000.0).max(0.0);
    let &(h0, rho0, scale_height) = EXPONENTIAL_TABLE
        .iter()
        .rev()
        .find(|(base, ..)| h >= *base)
        .unwrap_or(&EXPONENTIAL_TABLE[0]);
    rho0 * (-(h - h0) / scale_height).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WGS84_A;
    use approx::assert_relative_eq;
    use nalgebra as na;
    use test_case::test_case;

    #[test_case(0.0, 1.225; "sea level")]
    #[test_case(400e3, 3.725e-12; "400 km band base")]
    #[test_case(1000e3, 3.019e-15; "1000 km band base")]
    #[test_case(-50.0, 1.225; "below the surface clamps")]
    fn test_exponential_density_table(altitude: f64, expected: f64) {
        assert_relative_eq!(exponential_density(altitude), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_exponential_density_decreases_with_altitude() {
        let mut previous = f64::INFINITY;
        for km in (0..1500).step_by(5) {
            let rho = exponential_density(km as f64 * 1000.0);
            assert!(rho > 0.0);
            assert!(rho < previous, "density not decreasing at {} km", km);
            previous = rho;
        }
    }

    #[test]
    fn test_compute_density_exponential_at_equator() {
        let epoch = Epoch::from_gregorian_utc_at_midnight(2024, 3, 15);
        // Equatorial position: altitude is independent of Earth rotation
        let state = State::new(na::Vector3::new(WGS84_A + 450e3, 0.0, 0.0), na::Vector3::zeros());

        let rho = compute_density(epoch, &state, &EOPData::default(), AtmosphereType::ExpAtmo).unwrap();
        assert_relative_eq!(rho, exponential_density(450e3), max_relative = 1e-2);
    }

    #[test]
    fn test_none_atmosphere_is_vacuum() {
        let epoch = Epoch::from_gregorian_utc_at_midnight(2024, 3, 15);
        let state = State::new(na::Vector3::new(WGS84_A + 200e3, 0.0, 0.0), na::Vector3::zeros());
        let rho = AtmosphereType::None.density(epoch, &state, &EOPData::default()).unwrap();
        assert_eq!(rho, 0.0);
    }

    #[test_case(AtmosphereType::JB2008; "jb2008")]
    #[test_case(AtmosphereType::JR1971; "jr1971")]
    #[test_case(AtmosphereType::MSIS2000; "msis2000")]
    fn test_empirical_models_need_provider(atmosphere: AtmosphereType) {
        let epoch = Epoch::from_gregorian_utc_at_midnight(2024, 3, 15);
        let state = State::new(na::Vector3::new(WGS84_A + 200e3, 0.0, 0.0), na::Vector3::zeros());
        let err = compute_density(epoch, &state, &EOPData::default(), atmosphere).unwrap_err();
        assert!(err.to_string().contains(atmosphere.label()));
    }

    #[test]
    fn test_parse_atmosphere_type() {
        assert_eq!("JB2008".parse::<AtmosphereType>().unwrap(), AtmosphereType::JB2008);
        assert_eq!("expatmo".parse::<AtmosphereType>().unwrap(), AtmosphereType::ExpAtmo);
        assert_eq!("None".parse::<AtmosphereType>().unwrap(), AtmosphereType::None);
        let err = "DTM2013".parse::<AtmosphereType>().unwrap_err();
        assert!(err.to_string().contains("DTM2013"));
    }
}
