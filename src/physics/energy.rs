use crate::models::State;
use nalgebra as na;

/// Specific orbital energy `v²/2 − μ/r` [J/kg].
pub fn specific_energy(state: &State, mu: f64) -> f64 {
    let r = state.position.magnitude();
    let v = state.velocity.magnitude();

    0.5 * v * v - mu / r
}

/// Specific angular momentum `r × v` [m²/s].
pub fn specific_angular_momentum(state: &State) -> na::Vector3<f64> {
    state.position.cross(&state.velocity)
}
