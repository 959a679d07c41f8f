use crate::errors::ForceModelError;
use crate::models::State;
use nalgebra as na;

/// Post-Newtonian correction to the central body's gravity.
///
/// Not available yet: every call returns [`ForceModelError::Unimplemented`].
// TODO: fill in once a reference formulation for the central-body correction is
// selected; callers already handle the error.
pub fn relativity_accel(
    _state: &State,
    _mu: f64,
    _t: f64,
) -> Result<na::Vector3<f64>, ForceModelError> {
    Err(ForceModelError::Unimplemented("relativistic acceleration"))
}
