//! Central difference method
//!
//! Explicit two-step recurrence, conditionally stable for `ω·dT < 2`.
//!
//! ```text
//! k̂ = m/dT² + c/(2·dT)
//! a = m/dT² − c/(2·dT)
//! b = k − 2·m/dT²
//! d[i+1] = (f[i] − a·d[i−1] − b·d[i]) / k̂
//! ```
//!
//! The recurrence is seeded with a fictitious sample `d[−1]` obtained from
//! the initial acceleration. Producing the state at sample `i` needs the
//! lookahead `d[i+1]`; for the last sample that lookahead is `d[n]`, which is
//! computed from `f[n−1]` to close the velocity/acceleration estimate but is
//! never emitted. Outputs are therefore exactly `n` samples long.

use crate::error::{SpectrumError, SpectrumResult};
use crate::results::{Extremes, SdofState};
use crate::sdof::{InitialConditions, SdofSystem};

use super::{drive, validate_inputs};

/// Stepping iterator for the central difference method
#[derive(Debug, Clone)]
pub struct CentralDifference<'a> {
    force: &'a [f64],
    time_step: f64,
    k_hat: f64,
    a_coeff: f64,
    b_coeff: f64,
    index: usize,
    /// d[i−1]
    previous: f64,
    /// d[i]
    current: f64,
}

impl<'a> CentralDifference<'a> {
    pub fn new(
        system: &SdofSystem,
        initial: InitialConditions,
        time_step: f64,
        force: &'a [f64],
    ) -> SpectrumResult<Self> {
        validate_inputs(system, time_step, force)?;

        let SdofSystem {
            mass,
            damping,
            stiffness,
        } = *system;
        let dt2 = time_step * time_step;

        let k_hat = mass / dt2 + damping / (2.0 * time_step);
        if k_hat == 0.0 || !k_hat.is_finite() {
            return Err(SpectrumError::NumericalDegeneracy(format!(
                "central difference effective stiffness is {k_hat}"
            )));
        }
        let a_coeff = mass / dt2 - damping / (2.0 * time_step);
        let b_coeff = stiffness - 2.0 * mass / dt2;

        let disp_init = initial.displacement;
        let vel_init = initial.velocity;
        let accel_init = (force[0] - damping * vel_init - stiffness * disp_init) / mass;
        let disp_before = disp_init - time_step * vel_init + dt2 * accel_init / 2.0;

        Ok(Self {
            force,
            time_step,
            k_hat,
            a_coeff,
            b_coeff,
            index: 0,
            previous: disp_before,
            current: disp_init,
        })
    }
}

impl Iterator for CentralDifference<'_> {
    type Item = SdofState;

    fn next(&mut self) -> Option<SdofState> {
        let force = *self.force.get(self.index)?;
        let dt = self.time_step;

        let next = (force - self.a_coeff * self.previous - self.b_coeff * self.current) / self.k_hat;
        let state = SdofState {
            displacement: self.current,
            velocity: (next - self.previous) / (2.0 * dt),
            acceleration: (next - 2.0 * self.current + self.previous) / (dt * dt),
        };

        self.previous = self.current;
        self.current = next;
        self.index += 1;
        Some(state)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.force.len() - self.index;
        (remaining, Some(remaining))
    }
}

/// Central difference response of a linear SDOF system.
///
/// Returns the displacement extremes; `disps`, when given, receives the
/// displacement history resized to `force.len()`.
pub fn central_difference(
    system: &SdofSystem,
    initial: InitialConditions,
    time_step: f64,
    force: &[f64],
    disps: Option<&mut Vec<f64>>,
) -> SpectrumResult<Extremes> {
    let steps = CentralDifference::new(system, initial, time_step, force)?;
    Ok(drive(steps, force.len(), disps))
}
