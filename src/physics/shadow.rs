use crate::constants::PI;
use crate::errors::ForceModelError;
use nalgebra as na;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Earth shadow geometry used to scale solar radiation pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShadowModel {
    /// Shadow is a cylinder of one Earth radius behind the Earth; no penumbra.
    Cylindrical,
    /// Umbra and penumbra from the overlap of the apparent solar and Earth disks.
    #[default]
    Conical,
    /// Conical geometry with a linear penumbra transition.
    ConicalSimplified,
    None,
}

impl fmt::Display for ShadowModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShadowModel::Cylindrical => write!(f, "Cylindrical"),
            ShadowModel::Conical => write!(f, "Conical"),
            ShadowModel::ConicalSimplified => write!(f, "Conical_Simplified"),
            ShadowModel::None => write!(f, "None"),
        }
    }
}

impl FromStr for ShadowModel {
    type Err = ForceModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cylindrical" => Ok(ShadowModel::Cylindrical),
            "conical" => Ok(ShadowModel::Conical),
            "conical_simplified" | "conicalsimplified" => Ok(ShadowModel::ConicalSimplified),
            "none" => Ok(ShadowModel::None),
            _ => Err(ForceModelError::UnsupportedConfiguration(format!(
                "shadow model `{}`",
                s
            ))),
        }
    }
}

/// Fraction of sunlight reaching the satellite: 1 in full sun, 0 in the umbra.
///
/// Positions are relative to the occulting body (Earth).
pub fn shadow_model(
    sat_pos: &na::Vector3<f64>,
    sun_pos: &na::Vector3<f64>,
    r_sun: f64,
    r_earth: f64,
    model: ShadowModel,
) -> f64 {
    match model {
        ShadowModel::None => 1.0,
        ShadowModel::Cylindrical => cylindrical(sat_pos, sun_pos, r_earth),
        ShadowModel::Conical | ShadowModel::ConicalSimplified => {
            let r = sat_pos.magnitude();
            if r == 0.0 {
                return 1.0;
            }
            let sat_to_sun = sun_pos - sat_pos;
            let d = sat_to_sun.magnitude();

            // Apparent radii of the Sun and the Earth, and their separation.
            // Below the surface the Earth fills the half-sky under the local horizon.
            let a = (r_sun / d).min(1.0).asin();
            let b = (r_earth / r).min(1.0).asin();
            let c = ((-sat_pos).dot(&sat_to_sun) / (r * d)).clamp(-1.0, 1.0).acos();

            let fraction = if model == ShadowModel::Conical {
                conical(a, b, c)
            } else {
                conical_simplified(a, b, c)
            };
            fraction.clamp(0.0, 1.0)
        }
    }
}

fn cylindrical(sat_pos: &na::Vector3<f64>, sun_pos: &na::Vector3<f64>, r_earth: f64) -> f64 {
    let sun_dir = sun_pos.normalize();
    let proj = sat_pos.dot(&sun_dir);
    if proj >= 0.0 {
        return 1.0;
    }

    let perp_dist = (sat_pos - proj * sun_dir).magnitude();
    if perp_dist < r_earth {
        0.0
    } else {
        1.0
    }
}

fn conical(a: f64, b: f64, c: f64) -> f64 {
    if c >= a + b {
        1.0
    } else if c <= b - a {
        0.0
    } else if c <= a - b {
        // Earth disk fully inside the solar disk
        1.0 - (b * b) / (a * a)
    } else {
        // Area of the overlapping disk segments
        let x = (c * c + a * a - b * b) / (2.0 * c);
        let y = (a * a - x * x).max(0.0).sqrt();
        let area = a * a * (x / a).clamp(-1.0, 1.0).acos()
            + b * b * ((c - x) / b).clamp(-1.0, 1.0).acos()
            - c * y;
        1.0 - area / (PI * a * a)
    }
}

fn conical_simplified(a: f64, b: f64, c: f64) -> f64 {
    let inner = (a - b).abs();
    let outer = a + b;
    if c >= outer {
        return 1.0;
    }

    let floor = if b >= a { 0.0 } else { 1.0 - (b * b) / (a * a) };
    if c <= inner {
        return floor;
    }
    floor + (1.0 - floor) * (c - inner) / (outer - inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{AU, R_EARTH, R_SUN};
    use approx::assert_abs_diff_eq;
    use rand::Rng;
    use test_case::test_case;

    fn sun() -> na::Vector3<f64> {
        na::Vector3::new(AU, 0.0, 0.0)
    }

    const ALL: [ShadowModel; 4] = [
        ShadowModel::Cylindrical,
        ShadowModel::Conical,
        ShadowModel::ConicalSimplified,
        ShadowModel::None,
    ];

    #[test_case(ShadowModel::Cylindrical; "cylindrical")]
    #[test_case(ShadowModel::Conical; "conical")]
    #[test_case(ShadowModel::ConicalSimplified; "conical simplified")]
    fn test_sunlit_side_is_lit(model: ShadowModel) {
        let sat = na::Vector3::new(R_EARTH + 500e3, 0.0, 0.0);
        assert_eq!(shadow_model(&sat, &sun(), R_SUN, R_EARTH, model), 1.0);
    }

    #[test_case(ShadowModel::Cylindrical; "cylindrical")]
    #[test_case(ShadowModel::Conical; "conical")]
    #[test_case(ShadowModel::ConicalSimplified; "conical simplified")]
    fn test_behind_earth_is_umbra(model: ShadowModel) {
        let sat = na::Vector3::new(-(R_EARTH + 500e3), 0.0, 0.0);
        assert_eq!(shadow_model(&sat, &sun(), R_SUN, R_EARTH, model), 0.0);
    }

    #[test]
    fn test_none_is_always_lit() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let sat = na::Vector3::new(
                rng.gen_range(-5e7..5e7),
                rng.gen_range(-5e7..5e7),
                rng.gen_range(-5e7..5e7),
            );
            assert_eq!(shadow_model(&sat, &sun(), R_SUN, R_EARTH, ShadowModel::None), 1.0);
        }
    }

    #[test]
    fn test_fraction_monotonic_leaving_shadow() {
        // Sweep sideways out of the shadow behind the Earth
        let x = -(R_EARTH + 700e3);
        for model in ALL {
            let mut previous = 0.0;
            for step in 0..=400 {
                let y = step as f64 * 25e3;
                let sat = na::Vector3::new(x, y, 0.0);
                let nu = shadow_model(&sat, &sun(), R_SUN, R_EARTH, model);
                assert!((0.0..=1.0).contains(&nu));
                assert!(nu >= previous - 1e-12, "{} not monotonic at y = {}", model, y);
                previous = nu;
            }
            assert_eq!(previous, 1.0);
        }
    }

    #[test_case(0.0, 0.0; "along the shadow axis")]
    #[test_case(0.5, 0.0; "inside the umbra cone")]
    #[test_case(5.0, 1.0; "exits the shadow")]
    #[test_case(20.0, 1.0; "grazes the limb")]
    #[test_case(60.0, 1.0; "leaves the night side")]
    #[test_case(89.0, 1.0; "near the terminator")]
    #[test_case(95.0, 1.0; "sunlit hemisphere")]
    fn test_radial_sweep_monotonic(angle_deg: f64, final_fraction: f64) {
        // Climb outward along a fixed direction measured from the anti-Sun axis
        let theta = f64::to_radians(angle_deg);
        let direction = na::Vector3::new(-theta.cos(), theta.sin(), 0.0);
        for model in ALL {
            let mut previous = 0.0;
            for step in 0..4000 {
                let r = R_EARTH + 100e3 + step as f64 * 20e3;
                let nu = shadow_model(&(direction * r), &sun(), R_SUN, R_EARTH, model);
                assert!((0.0..=1.0).contains(&nu));
                assert!(nu >= previous - 1e-12, "{} not monotonic at r = {}", model, r);
                previous = nu;
            }
            let expected = if model == ShadowModel::None { 1.0 } else { final_fraction };
            assert_eq!(previous, expected, "{} at {} deg", model, angle_deg);
        }
    }

    #[test_case(na::Vector3::new(0.999 * R_EARTH, 0.0, 0.0), na::Vector3::new(AU, 0.0, 0.0), 1.0; "sub-solar point")]
    #[test_case(na::Vector3::new(-0.999 * R_EARTH, 0.0, 0.0), na::Vector3::new(AU, 0.0, 0.0), 0.0; "anti-solar point")]
    #[test_case(na::Vector3::new(0.5 * R_EARTH, 0.0, 0.4 * R_EARTH), na::Vector3::new(AU, 0.0, 0.0), 1.0; "day side interior")]
    #[test_case(na::Vector3::new(0.0, 0.0, 0.997 * R_EARTH), na::Vector3::new(AU, 0.0, 0.5 * AU), 1.0; "pole facing a tilted sun")]
    #[test_case(na::Vector3::zeros(), na::Vector3::new(AU, 0.0, 0.0), 1.0; "centre")]
    fn test_below_surface_models_agree(sat: na::Vector3<f64>, sun_pos: na::Vector3<f64>, expected: f64) {
        for model in ALL.into_iter().filter(|m| *m != ShadowModel::None) {
            assert_eq!(shadow_model(&sat, &sun_pos, R_SUN, R_EARTH, model), expected, "{}", model);
        }
    }

    #[test]
    fn test_conical_has_penumbra() {
        // The penumbra is a few tens of km wide in LEO; scan for partial lighting
        let x = -(R_EARTH + 700e3);
        let partial = (0..2000)
            .map(|i| na::Vector3::new(x, R_EARTH - 100e3 + i as f64 * 200.0, 0.0))
            .map(|sat| shadow_model(&sat, &sun(), R_SUN, R_EARTH, ShadowModel::Conical))
            .any(|nu| nu > 0.01 && nu < 0.99);
        assert!(partial);
    }

    #[test]
    fn test_conical_matches_simplified_at_limits() {
        let a = 0.005;
        let b = 1.2;
        assert_abs_diff_eq!(conical(a, b, a + b), conical_simplified(a, b, a + b), epsilon = 1e-9);
        assert_abs_diff_eq!(conical(a, b, b - a), conical_simplified(a, b, b - a), epsilon = 1e-9);
        assert_abs_diff_eq!(conical(a, b, b), 0.5, epsilon = 1e-2);
    }

    #[test]
    fn test_annular_eclipse() {
        // Occulting disk smaller than the Sun and centred on it
        assert_abs_diff_eq!(conical(0.01, 0.005, 0.0), 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(conical_simplified(0.01, 0.005, 0.0), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_parse_shadow_model() {
        assert_eq!("Conical_Simplified".parse::<ShadowModel>().unwrap(), ShadowModel::ConicalSimplified);
        assert_eq!("cylindrical".parse::<ShadowModel>().unwrap(), ShadowModel::Cylindrical);
        for model in ALL {
            assert_eq!(model.to_string().parse::<ShadowModel>().unwrap(), model);
        }
        let err = "Spherical".parse::<ShadowModel>().unwrap_err();
        assert!(err.to_string().contains("Spherical"));
    }
}
