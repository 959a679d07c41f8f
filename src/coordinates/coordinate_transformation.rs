use super::eop_table::EOPData;
use crate::constants::*;
use hifitime::Epoch;
use nalgebra as na;

const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// Geodetic coordinates on the WGS84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodetic {
    pub latitude: f64,  // rad
    pub longitude: f64, // rad
    pub altitude: f64,  // m above the ellipsoid
}

/// Convert ITRS Cartesian to Geodetic coordinates (WGS84)
pub fn itrs_to_geodetic(pos: &na::Vector3<f64>) -> Geodetic {
    let (x, y, z) = (pos.x, pos.y, pos.z);

    let a = WGS84_A;
    let f = WGS84_F;
    let b = a * (1.0 - f); // Semi-minor axis
    let e2 = 2.0 * f - f * f; // First eccentricity squared

    let p = (x * x + y * y).sqrt();

    // On the polar axis the longitude is undefined
    if p < 1e-10 {
        return Geodetic {
            latitude: if z < 0.0 { -PI / 2.0 } else { PI / 2.0 },
            longitude: 0.0,
            altitude: z.abs() - b,
        };
    }

    let longitude = y.atan2(x);
    let mut latitude = z.atan2(p * (1.0 - e2));
    let mut altitude = 0.0;

    // Usually converges in 2-3 iterations
    for _ in 0..10 {
        let sin_lat = latitude.sin();
        let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        altitude = p / latitude.cos() - n;

        let prev_lat = latitude;
        latitude = (z / p).atan2(1.0 - e2 * n / (n + altitude));

        if (latitude - prev_lat).abs() < 1e-12 {
            break;
        }
    }

    Geodetic { latitude, longitude, altitude }
}

/// Convert GCRS to ITRS using a simplified IAU 2000/2006 CIO-based transformation
pub fn gcrs_to_itrs(position: &na::Vector3<f64>, epoch: &Epoch, eop: &EOPData) -> na::Vector3<f64> {
    let jd_utc = epoch.to_jde_utc_days();
    let t = (jd_utc - JD_J2000) / DAYS_PER_JULIAN_CENTURY;

    // CIP coordinates in the GCRS, polynomial part only (~1 mas)
    let x = (-0.016617 + 2004.191898 * t - 0.4297829 * t * t - 0.19861834 * t * t * t)
        * ARCSEC_TO_RAD;
    let y = (-0.006951 - 0.025896 * t - 22.4072747 * t * t + 0.00190059 * t * t * t)
        * ARCSEC_TO_RAD;
    let s = (-0.0015506 + (-0.0001729 - 0.000000127 * t) * t) * ARCSEC_TO_RAD - x * y / 2.0;

    // Celestial to intermediate
    let a = 1.0 / (1.0 + (1.0 - x * x - y * y).sqrt());
    let bias_precession_nutation = na::Matrix3::new(
        1.0 - a * x * x,
        -a * x * y,
        -x,
        -a * x * y,
        1.0 - a * y * y,
        -y,
        x,
        y,
        1.0 - a * (x * x + y * y),
    );
    let cio_locator = na::Rotation3::from_axis_angle(&na::Vector3::z_axis(), s);

    // Earth Rotation Angle from UT1
    let ut1_jd = jd_utc + eop.ut1_utc / SECONDS_PER_DAY;
    let era = (2.0 * PI * (0.7790572732640 + 1.00273781191135448 * (ut1_jd - JD_J2000)))
        .rem_euclid(2.0 * PI);
    let earth_rotation = na::Rotation3::from_axis_angle(&na::Vector3::z_axis(), -era);

    // Polar motion
    let xp = eop.x_pole * ARCSEC_TO_RAD;
    let yp = eop.y_pole * ARCSEC_TO_RAD;
    let polar_motion = na::Rotation3::from_axis_angle(&na::Vector3::x_axis(), yp)
        * na::Rotation3::from_axis_angle(&na::Vector3::y_axis(), xp);

    polar_motion.matrix()
        * earth_rotation.matrix()
        * cio_locator.matrix()
        * bias_precession_nutation
        * position
}
