use crate::constants::PI;
use crate::models::State;
use nalgebra as na;

/// Classical orbital elements `[a, e, i, Ω, ω, ν]` in metres and radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerianElements {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub raan: f64,
    pub arg_periapsis: f64,
    pub true_anomaly: f64,
}

impl KeplerianElements {
    pub fn from_vector(elements: &na::Vector6<f64>) -> Self {
        Self {
            semi_major_axis: elements[0],
            eccentricity: elements[1],
            inclination: elements[2],
            raan: elements[3],
            arg_periapsis: elements[4],
            true_anomaly: elements[5],
        }
    }

    /// Inertial state for a central body with gravitational parameter `mu`.
    pub fn to_state(&self, mu: f64) -> State {
        let e = self.eccentricity;
        let nu = self.true_anomaly;
        let p = self.semi_major_axis * (1.0 - e * e);
        let r_mag = p / (1.0 + e * nu.cos());

        // Perifocal frame
        let r_pqw = na::Vector3::new(r_mag * nu.cos(), r_mag * nu.sin(), 0.0);
        let v_pqw = na::Vector3::new(
            -(mu / p).sqrt() * nu.sin(),
            (mu / p).sqrt() * (e + nu.cos()),
            0.0,
        );

        let transform = na::Rotation3::from_axis_angle(&na::Vector3::z_axis(), self.raan)
            * na::Rotation3::from_axis_angle(&na::Vector3::x_axis(), self.inclination)
            * na::Rotation3::from_axis_angle(&na::Vector3::z_axis(), self.arg_periapsis);

        State::new(transform * r_pqw, transform * v_pqw)
    }

    pub fn from_state(state: &State, mu: f64) -> Self {
        let r = &state.position;
        let v = &state.velocity;

        let h = r.cross(v);
        let h_mag = h.magnitude();
        let n = na::Vector3::z().cross(&h);
        let n_mag = n.magnitude();

        let r_mag = r.magnitude();
        let v_mag = v.magnitude();
        let e_vec = ((v_mag * v_mag - mu / r_mag) * r - r.dot(v) * v) / mu;
        let e = e_vec.magnitude();

        let energy = v_mag * v_mag / 2.0 - mu / r_mag;
        let inclination = (h.z / h_mag).acos();

        let raan = if n_mag < 1e-11 { 0.0 } else { wrap_angle(n.y.atan2(n.x)) };

        let arg_periapsis = if e < 1e-11 {
            0.0
        } else if n_mag < 1e-11 {
            wrap_angle(e_vec.y.atan2(e_vec.x))
        } else {
            wrap_angle(h.dot(&n.cross(&e_vec)).atan2(n.dot(&e_vec) * h_mag))
        };

        let true_anomaly = if e < 1e-11 {
            if n_mag < 1e-11 {
                wrap_angle(r.y.atan2(r.x))
            } else {
                wrap_angle(h.dot(&n.cross(r)).atan2(n.dot(r) * h_mag))
            }
        } else {
            wrap_angle(h.dot(&e_vec.cross(r)).atan2(e_vec.dot(r) * h_mag))
        };

        Self {
            semi_major_axis: -mu / (2.0 * energy),
            eccentricity: e,
            inclination,
            raan,
            arg_periapsis,
            true_anomaly,
        }
    }

    pub fn period(&self, mu: f64) -> f64 {
        2.0 * PI * (self.semi_major_axis.powi(3) / mu).sqrt()
    }
}

fn wrap_angle(angle: f64) -> f64 {
    if angle < 0.0 {
        angle + 2.0 * PI
    } else {
        angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MU_EARTH, R_EARTH};
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test]
    fn test_circular_equatorial_state() {
        let a = R_EARTH + 400e3;
        let elements = KeplerianElements::from_vector(&na::Vector6::new(a, 0.0, 0.0, 0.0, 0.0, 0.0));
        let state = elements.to_state(MU_EARTH);

        assert_abs_diff_eq!(state.position, na::Vector3::new(a, 0.0, 0.0), epsilon = 1e-6);
        assert_abs_diff_eq!(state.velocity, na::Vector3::new(0.0, (MU_EARTH / a).sqrt(), 0.0), epsilon = 1e-9);
    }

    #[test_case(na::Vector6::new(7.0e6, 0.01, 0.9, 1.2, 0.4, 2.0); "leo")]
    #[test_case(na::Vector6::new(2.6e7, 0.7, 1.1, 4.0, 5.0, 0.3); "molniya")]
    #[test_case(na::Vector6::new(4.2164e7, 0.001, 0.05, 0.2, 1.0, 3.5); "near geo")]
    fn test_elements_survive_state_conversion(elements: na::Vector6<f64>) {
        let original = KeplerianElements::from_vector(&elements);
        let recovered = KeplerianElements::from_state(&original.to_state(MU_EARTH), MU_EARTH);

        assert_abs_diff_eq!(recovered.semi_major_axis, original.semi_major_axis, epsilon = 1e-3);
        assert_abs_diff_eq!(recovered.eccentricity, original.eccentricity, epsilon = 1e-9);
        assert_abs_diff_eq!(recovered.inclination, original.inclination, epsilon = 1e-9);
        assert_abs_diff_eq!(recovered.raan, original.raan, epsilon = 1e-9);
        assert_abs_diff_eq!(recovered.arg_periapsis, original.arg_periapsis, epsilon = 1e-7);
        assert_abs_diff_eq!(recovered.true_anomaly, original.true_anomaly, epsilon = 1e-7);
    }

    #[test]
    fn test_period() {
        let elements = KeplerianElements::from_vector(&na::Vector6::new(R_EARTH + 400e3, 0.0, 0.0, 0.0, 0.0, 0.0));
        assert_abs_diff_eq!(elements.period(MU_EARTH), 5553.6, epsilon = 1.0);
    }
}
