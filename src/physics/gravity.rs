use nalgebra as na;

/// Point-mass gravity of a body with gravitational parameter `mu`.
pub fn gravity_acceleration(position: &na::Vector3<f64>, mu: f64) -> na::Vector3<f64> {
    let r: f64 = position.magnitude();
    -mu / (r * r * r) * position
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MU_EARTH;
    use approx::assert_abs_diff_eq;
    use nalgebra as na;
    use test_case::test_case;

    #[test_case(
        na::Vector3::new(6.371e6, 0.0, 0.0), // Earth's surface
        na::Vector3::new(-9.82, 0.0, 0.0); // Expected acceleration
        "gravity at Earth's surface"
    )]
    #[test_case(
        na::Vector3::new(6.471e6, 0.0, 0.0), // 100 km altitude
        na::Vector3::new(-9.519, 0.0, 0.0);
        "gravity at 100 km altitude"
    )]
    #[test_case(
        na::Vector3::new(0.0, 0.0, -6.871e6), // 500 km altitude, south pole
        na::Vector3::new(0.0, 0.0, 8.443);
        "gravity at 500 km altitude"
    )]
    fn test_gravity_acceleration(position: na::Vector3<f64>, expected: na::Vector3<f64>) {
        let result = gravity_acceleration(&position, MU_EARTH);
        assert_abs_diff_eq!(result, expected, epsilon = 1e-2);
    }
}
