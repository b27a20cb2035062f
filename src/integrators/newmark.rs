//! Newmark-beta predictor/corrector
//!
//! Implicit single-step scheme. With γ = 1/2 the average-acceleration
//! variant (β = 1/4) is unconditionally stable; the linear-acceleration
//! variant (β = 1/6) needs `ω·dT < 3.46`, which is left to the caller.

use serde::{Deserialize, Serialize};

use crate::error::{invalid, SpectrumResult};
use crate::results::{Extremes, SdofState};
use crate::sdof::{InitialConditions, SdofSystem};

use super::{drive, validate_inputs};

/// Newmark velocity (γ) and acceleration (β) coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewmarkParameters {
    pub gamma: f64,
    pub beta: f64,
}

impl NewmarkParameters {
    pub fn new(gamma: f64, beta: f64) -> Self {
        Self { gamma, beta }
    }

    /// Constant average acceleration (trapezoidal rule)
    pub fn average_acceleration() -> Self {
        Self::new(0.5, 0.25)
    }

    /// Linear acceleration over the step
    pub fn linear_acceleration() -> Self {
        Self::new(0.5, 1.0 / 6.0)
    }
}

impl Default for NewmarkParameters {
    fn default() -> Self {
        Self::average_acceleration()
    }
}

/// Stepping iterator for the Newmark-beta method
#[derive(Debug, Clone)]
pub struct Newmark<'a> {
    system: SdofSystem,
    params: NewmarkParameters,
    force: &'a [f64],
    time_step: f64,
    k_hat: f64,
    index: usize,
    state: SdofState,
}

impl<'a> Newmark<'a> {
    pub fn new(
        system: &SdofSystem,
        initial: InitialConditions,
        params: NewmarkParameters,
        time_step: f64,
        force: &'a [f64],
    ) -> SpectrumResult<Self> {
        validate_inputs(system, time_step, force)?;
        if !(params.beta.is_finite() && params.beta > 0.0) {
            return Err(invalid(format!(
                "Newmark beta must be positive, got {}",
                params.beta
            )));
        }
        if !params.gamma.is_finite() {
            return Err(invalid("Newmark gamma must be finite"));
        }

        let NewmarkParameters { gamma, beta } = params;
        let SdofSystem {
            mass,
            damping,
            stiffness,
        } = *system;

        let k_hat = stiffness
            + gamma * damping / (beta * time_step)
            + mass / (beta * time_step * time_step);

        let accel_init =
            (force[0] - damping * initial.velocity - stiffness * initial.displacement) / mass;

        Ok(Self {
            system: *system,
            params,
            force,
            time_step,
            k_hat,
            index: 0,
            state: SdofState::new(initial.displacement, initial.velocity, accel_init),
        })
    }

    /// Effective stiffness `k + γ·c/(β·dT) + m/(β·dT²)`
    pub fn effective_stiffness(&self) -> f64 {
        self.k_hat
    }
}

impl Iterator for Newmark<'_> {
    type Item = SdofState;

    fn next(&mut self) -> Option<SdofState> {
        if self.index == 0 {
            self.index = 1;
            return Some(self.state);
        }
        let force = *self.force.get(self.index)?;

        let NewmarkParameters { gamma, beta } = self.params;
        let SdofSystem {
            mass,
            damping,
            stiffness,
        } = self.system;
        let dt = self.time_step;
        let prev = self.state;

        // Predictor
        let disp = prev.displacement;
        let vel = (1.0 - gamma / beta) * prev.velocity
            + dt * (1.0 - gamma / (2.0 * beta)) * prev.acceleration;
        let accel = (-1.0 / (beta * dt)) * prev.velocity + (1.0 - 1.0 / (2.0 * beta)) * prev.acceleration;

        // Corrector
        let d_disp = (force - mass * accel - damping * vel - stiffness * disp) / self.k_hat;

        self.state = SdofState {
            displacement: disp + d_disp,
            velocity: vel + gamma * d_disp / (beta * dt),
            acceleration: accel + d_disp / (beta * dt * dt),
        };
        self.index += 1;
        Some(self.state)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.force.len() - self.index;
        (remaining, Some(remaining))
    }
}

/// Newmark-beta response of a linear SDOF system.
///
/// Returns the displacement extremes; `disps`, when given, receives the
/// displacement history resized to `force.len()`.
pub fn newmark(
    system: &SdofSystem,
    initial: InitialConditions,
    params: NewmarkParameters,
    time_step: f64,
    force: &[f64],
    disps: Option<&mut Vec<f64>>,
) -> SpectrumResult<Extremes> {
    let steps = Newmark::new(system, initial, params, time_step, force)?;
    Ok(drive(steps, force.len(), disps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_effective_stiffness() {
        let sys = SdofSystem::new(2.0, 0.3, 50.0);
        let force = [0.0; 4];
        let steps = Newmark::new(
            &sys,
            InitialConditions::at_rest(),
            NewmarkParameters::average_acceleration(),
            0.1,
            &force,
        )
        .unwrap();
        let expected = 50.0 + 0.5 * 0.3 / (0.25 * 0.1) + 2.0 / (0.25 * 0.01);
        assert_relative_eq!(steps.effective_stiffness(), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_first_state_is_initial() {
        let sys = SdofSystem::from_period(0.5, 0.02).unwrap();
        let force = [3.0, 0.0, 0.0];
        let first = Newmark::new(
            &sys,
            InitialConditions::new(0.1, 0.4),
            NewmarkParameters::linear_acceleration(),
            0.01,
            &force,
        )
        .unwrap()
        .next()
        .unwrap();
        assert_eq!(first.displacement, 0.1);
        assert_eq!(first.velocity, 0.4);
        assert_relative_eq!(
            first.acceleration,
            3.0 - sys.damping * 0.4 - sys.stiffness * 0.1,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_undamped_free_vibration_conserves_amplitude() {
        let sys = SdofSystem::from_period(1.0, 0.0).unwrap();
        let force = vec![0.0; 500];
        for params in [
            NewmarkParameters::average_acceleration(),
            NewmarkParameters::linear_acceleration(),
        ] {
            let peak = newmark(&sys, InitialConditions::new(1.0, 0.0), params, 0.01, &force, None)
                .unwrap();
            assert_abs_diff_eq!(peak.max, 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(peak.min, -1.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_average_acceleration_stable_at_large_step() {
        // ω·dT ≈ 31, far beyond any explicit limit
        let sys = SdofSystem::from_period(0.1, 0.0).unwrap();
        let force = vec![0.0; 1000];
        let peak = newmark(
            &sys,
            InitialConditions::new(1.0, 0.0),
            NewmarkParameters::average_acceleration(),
            0.5,
            &force,
            None,
        )
        .unwrap();
        assert!(peak.abs_max() <= 1.0 + 1e-9);
    }

    #[test]
    fn test_static_load_settles_to_static_displacement() {
        let sys = SdofSystem::from_period(0.2, 0.2).unwrap();
        let force = vec![10.0; 2000];
        let mut disps = Vec::new();
        newmark(
            &sys,
            InitialConditions::at_rest(),
            NewmarkParameters::average_acceleration(),
            0.005,
            &force,
            Some(&mut disps),
        )
        .unwrap();
        let last = *disps.last().unwrap();
        assert_relative_eq!(last, 10.0 / sys.stiffness, max_relative = 1e-4);
    }

    #[test]
    fn test_rejects_non_positive_beta() {
        let sys = SdofSystem::default();
        let result = newmark(
            &sys,
            InitialConditions::at_rest(),
            NewmarkParameters::new(0.5, 0.0),
            0.01,
            &[1.0],
            None,
        );
        assert!(result.is_err());
    }
}
