use crate::errors::ForceModelError;
use crate::physics::dynamics::EquationsOfMotion;

/// Classical fixed-step fourth-order Runge-Kutta.
pub struct RK4<T: EquationsOfMotion> {
    eom: T,
}

impl<T: EquationsOfMotion> RK4<T>
where
    T::State: Clone + std::ops::Add<Output = T::State> + std::ops::Mul<f64, Output = T::State>,
{
    pub fn new(eom: T) -> Self {
        RK4 { eom }
    }

    pub fn equations(&self) -> &T {
        &self.eom
    }

    /// Advances `state` from `t` to `t + dt`.
    pub fn integrate(&self, state: &T::State, t: f64, dt: f64) -> Result<T::State, ForceModelError> {
        let k1 = self.eom.compute_derivative(state, t)?;

        let state2 = state.clone() + k1.clone() * (dt / 2.0);
        let k2 = self.eom.compute_derivative(&state2, t + dt / 2.0)?;

        let state3 = state.clone() + k2.clone() * (dt / 2.0);
        let k3 = self.eom.compute_derivative(&state3, t + dt / 2.0)?;

        let state4 = state.clone() + k3.clone() * dt;
        let k4 = self.eom.compute_derivative(&state4, t + dt)?;

        Ok(state.clone() + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    /// dy/dt = λ y
    struct Decay(f64);

    impl EquationsOfMotion for Decay {
        type State = f64;

        fn compute_derivative(&self, state: &f64, _t: f64) -> Result<f64, ForceModelError> {
            Ok(self.0 * state)
        }
    }

    /// dy/dt = t²
    struct Quadrature;

    impl EquationsOfMotion for Quadrature {
        type State = f64;

        fn compute_derivative(&self, _state: &f64, t: f64) -> Result<f64, ForceModelError> {
            Ok(t * t)
        }
    }

    #[test_case(-1.0, 0.1; "decay")]
    #[test_case(0.5, 0.05; "growth")]
    fn test_exponential(lambda: f64, dt: f64) {
        let rk4 = RK4::new(Decay(lambda));
        let mut y = 1.0;
        let mut t = 0.0;
        while t < 1.0 - 1e-12 {
            y = rk4.integrate(&y, t, dt).unwrap();
            t += dt;
        }
        assert_abs_diff_eq!(y, lambda.exp(), epsilon = 1e-6);
    }

    #[test]
    fn test_time_dependent_derivative_is_exact_for_cubic() {
        let rk4 = RK4::new(Quadrature);
        let y = rk4.integrate(&0.0, 1.0, 2.0).unwrap();
        // ∫₁³ t² dt
        assert_abs_diff_eq!(y, 26.0 / 3.0, epsilon = 1e-12);
    }
}
