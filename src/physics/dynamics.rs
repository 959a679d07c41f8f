use super::gravity::gravity_acceleration;
use crate::errors::ForceModelError;
use crate::models::{Parameters, State};
use nalgebra as na;

/// A perturbing force evaluated from the simulation state.
///
/// Models are pure functions of their inputs and must be shareable across threads.
pub trait AccelerationModel: Send + Sync {
    /// Inertial acceleration [m/s²] at `t` seconds after `params.epoch`.
    fn acceleration(
        &self,
        state: &State,
        params: &Parameters,
        t: f64,
    ) -> Result<na::Vector3<f64>, ForceModelError>;

    /// Short name used in logs and output columns.
    fn name(&self) -> &'static str;
}

impl<M: AccelerationModel + ?Sized> AccelerationModel for Box<M> {
    fn acceleration(
        &self,
        state: &State,
        params: &Parameters,
        t: f64,
    ) -> Result<na::Vector3<f64>, ForceModelError> {
        self.as_ref().acceleration(state, params, t)
    }

    fn name(&self) -> &'static str {
        self.as_ref().name()
    }
}

/// Sum of the accelerations of every model.
pub fn total_acceleration<M: AccelerationModel>(
    models: &[M],
    state: &State,
    params: &Parameters,
    t: f64,
) -> Result<na::Vector3<f64>, ForceModelError> {
    let mut total = na::Vector3::zeros();
    for model in models {
        total += model.acceleration(state, params, t)?;
    }
    Ok(total)
}

pub trait EquationsOfMotion {
    type State;

    fn compute_derivative(&self, state: &Self::State, t: f64) -> Result<Self::State, ForceModelError>;
}

/// Point-mass central body plus any number of perturbations.
pub struct CentralBodyDynamics {
    mu: f64,
    params: Parameters,
    perturbations: Vec<Box<dyn AccelerationModel>>,
}

impl CentralBodyDynamics {
    pub fn new(mu: f64, params: Parameters) -> Self {
        Self {
            mu,
            params,
            perturbations: Vec::new(),
        }
    }

    pub fn with(mut self, model: Box<dyn AccelerationModel>) -> Self {
        log::debug!("Adding force model: {}", model.name());
        self.perturbations.push(model);
        self
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn perturbations(&self) -> &[Box<dyn AccelerationModel>] {
        &self.perturbations
    }

    /// Each perturbation's contribution, in insertion order.
    pub fn acceleration_breakdown(
        &self,
        state: &State,
        t: f64,
    ) -> Result<Vec<(&'static str, na::Vector3<f64>)>, ForceModelError> {
        self.perturbations
            .iter()
            .map(|model| {
                model
                    .acceleration(state, &self.params, t)
                    .map(|accel| (model.name(), accel))
            })
            .collect()
    }
}

impl EquationsOfMotion for CentralBodyDynamics {
    type State = State;

    fn compute_derivative(&self, state: &State, t: f64) -> Result<State, ForceModelError> {
        let perturbation = total_acceleration(&self.perturbations, state, &self.params, t)?;

        Ok(State {
            position: state.velocity,
            velocity: gravity_acceleration(&state.position, self.mu) + perturbation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MU_EARTH, R_EARTH};
    use approx::assert_relative_eq;
    use hifitime::Epoch;

    struct Constant(na::Vector3<f64>);

    impl AccelerationModel for Constant {
        fn acceleration(
            &self,
            _state: &State,
            _params: &Parameters,
            _t: f64,
        ) -> Result<na::Vector3<f64>, ForceModelError> {
            Ok(self.0)
        }

        fn name(&self) -> &'static str {
            "constant"
        }
    }

    struct Failing;

    impl AccelerationModel for Failing {
        fn acceleration(
            &self,
            _state: &State,
            _params: &Parameters,
            _t: f64,
        ) -> Result<na::Vector3<f64>, ForceModelError> {
            Err(ForceModelError::MissingState("ballistic_coeff"))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn leo_state() -> State {
        let r = R_EARTH + 400e3;
        State::new(na::Vector3::new(r, 0.0, 0.0), na::Vector3::new(0.0, (MU_EARTH / r).sqrt(), 0.0))
    }

    #[test]
    fn test_total_acceleration_sums_models() {
        let params = Parameters::new(Epoch::from_gregorian_utc_at_midnight(2024, 3, 15));
        let models = vec![
            Constant(na::Vector3::new(1e-6, 0.0, 0.0)),
            Constant(na::Vector3::new(0.0, 2e-6, 0.0)),
        ];
        let total = total_acceleration(&models, &leo_state(), &params, 0.0).unwrap();
        assert_eq!(total, na::Vector3::new(1e-6, 2e-6, 0.0));

        let empty: Vec<Constant> = Vec::new();
        assert_eq!(total_acceleration(&empty, &leo_state(), &params, 0.0).unwrap(), na::Vector3::zeros());
    }

    #[test]
    fn test_total_acceleration_propagates_errors() {
        let params = Parameters::new(Epoch::from_gregorian_utc_at_midnight(2024, 3, 15));
        let models: Vec<Box<dyn AccelerationModel>> =
            vec![Box::new(Constant(na::Vector3::zeros())), Box::new(Failing)];
        assert!(matches!(
            total_acceleration(&models, &leo_state(), &params, 0.0),
            Err(ForceModelError::MissingState("ballistic_coeff"))
        ));
    }

    #[test]
    fn test_central_body_derivative() {
        let params = Parameters::new(Epoch::from_gregorian_utc_at_midnight(2024, 3, 15));
        let dynamics = CentralBodyDynamics::new(MU_EARTH, params)
            .with(Box::new(Constant(na::Vector3::new(0.0, 0.0, 1e-5))));
        let state = leo_state();

        let derivative = dynamics.compute_derivative(&state, 0.0).unwrap();
        let r = state.position.magnitude();
        assert_eq!(derivative.position, state.velocity);
        assert_relative_eq!(derivative.velocity.x, -MU_EARTH / (r * r), max_relative = 1e-12);
        assert_relative_eq!(derivative.velocity.z, 1e-5, max_relative = 1e-12);

        let breakdown = dynamics.acceleration_breakdown(&state, 0.0).unwrap();
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].0, "constant");
    }
}
