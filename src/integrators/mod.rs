//! Step-by-step integrators for the linear SDOF equation of motion
//!
//! Every scheme is exposed twice: as a stepping iterator that yields one
//! [`SdofState`] per force sample without keeping any history, and as a
//! free function that drives the iterator, tracks the running extremes of
//! displacement and optionally writes the displacement history into a
//! caller-owned buffer.

mod central_difference;
mod linear_interpolation;
mod newmark;

pub use central_difference::{central_difference, CentralDifference};
pub use linear_interpolation::{
    linear_interpolation, Coefficients as LinearInterpolationCoefficients, LinearInterpolation,
};
pub use newmark::{newmark, Newmark, NewmarkParameters};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{invalid, SpectrumError, SpectrumResult};
use crate::results::{Extremes, ResponseHistory, SdofState};
use crate::sdof::{InitialConditions, SdofSystem};

/// The closed set of supported integration schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Integrator {
    /// Explicit central finite differences
    CentralDifference,
    /// Newmark-beta with γ = 1/2, β = 1/4
    NewmarkAverageAccel,
    /// Newmark-beta with γ = 1/2, β = 1/6
    NewmarkLinearAccel,
    /// Exact solution for piecewise-linear forcing
    LinearInterpolation,
}

impl Integrator {
    pub const ALL: [Integrator; 4] = [
        Integrator::CentralDifference,
        Integrator::NewmarkAverageAccel,
        Integrator::NewmarkLinearAccel,
        Integrator::LinearInterpolation,
    ];

    /// Identifier used in requests and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Integrator::CentralDifference => "CentralDifference",
            Integrator::NewmarkAverageAccel => "NewmarkAverageAccel",
            Integrator::NewmarkLinearAccel => "NewmarkLinearAccel",
            Integrator::LinearInterpolation => "LinearInterpolation",
        }
    }

    /// Build the stepping iterator for this scheme
    pub fn stepper<'a>(
        &self,
        system: &SdofSystem,
        initial: InitialConditions,
        dt: f64,
        force: &'a [f64],
    ) -> SpectrumResult<Stepper<'a>> {
        let stepper = match self {
            Integrator::CentralDifference => {
                Stepper::CentralDifference(CentralDifference::new(system, initial, dt, force)?)
            }
            Integrator::NewmarkAverageAccel => Stepper::Newmark(Newmark::new(
                system,
                initial,
                NewmarkParameters::average_acceleration(),
                dt,
                force,
            )?),
            Integrator::NewmarkLinearAccel => Stepper::Newmark(Newmark::new(
                system,
                initial,
                NewmarkParameters::linear_acceleration(),
                dt,
                force,
            )?),
            Integrator::LinearInterpolation => Stepper::LinearInterpolation(
                LinearInterpolation::new(system, initial, dt, force)?,
            ),
        };
        Ok(stepper)
    }

    /// Integrate and return the displacement extremes, optionally filling `disps`
    pub fn integrate(
        &self,
        system: &SdofSystem,
        initial: InitialConditions,
        dt: f64,
        force: &[f64],
        disps: Option<&mut Vec<f64>>,
    ) -> SpectrumResult<Extremes> {
        let stepper = self.stepper(system, initial, dt, force)?;
        Ok(drive(stepper, force.len(), disps))
    }

    /// Integrate without retaining any history
    pub fn peak(
        &self,
        system: &SdofSystem,
        initial: InitialConditions,
        dt: f64,
        force: &[f64],
    ) -> SpectrumResult<Extremes> {
        self.integrate(system, initial, dt, force, None)
    }

    /// Integrate and keep displacement, velocity and acceleration histories
    pub fn response_history(
        &self,
        system: &SdofSystem,
        initial: InitialConditions,
        dt: f64,
        force: &[f64],
    ) -> SpectrumResult<ResponseHistory> {
        let stepper = self.stepper(system, initial, dt, force)?;
        Ok(ResponseHistory::collect(stepper, dt, force.len()))
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::LinearInterpolation
    }
}

impl fmt::Display for Integrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Integrator {
    type Err = SpectrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Integrator::ALL
            .iter()
            .copied()
            .find(|integrator| integrator.as_str() == s)
            .ok_or_else(|| SpectrumError::UnsupportedIntegrator(s.to_string()))
    }
}

/// Stepping iterator of any supported scheme
pub enum Stepper<'a> {
    CentralDifference(CentralDifference<'a>),
    Newmark(Newmark<'a>),
    LinearInterpolation(LinearInterpolation<'a>),
}

impl Iterator for Stepper<'_> {
    type Item = SdofState;

    fn next(&mut self) -> Option<SdofState> {
        match self {
            Stepper::CentralDifference(s) => s.next(),
            Stepper::Newmark(s) => s.next(),
            Stepper::LinearInterpolation(s) => s.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Stepper::CentralDifference(s) => s.size_hint(),
            Stepper::Newmark(s) => s.size_hint(),
            Stepper::LinearInterpolation(s) => s.size_hint(),
        }
    }
}

/// Preconditions shared by every scheme
pub(crate) fn validate_inputs(system: &SdofSystem, dt: f64, force: &[f64]) -> SpectrumResult<()> {
    if force.is_empty() {
        return Err(invalid("force history is empty"));
    }
    if !(dt.is_finite() && dt > 0.0) {
        return Err(invalid(format!("time step must be positive, got {dt}")));
    }
    system.validate()
}

/// Run a stepper to completion, tracking displacement extremes inline.
///
/// When `disps` is given it is resized to exactly `num_steps` before the
/// loop and overwritten in place.
pub(crate) fn drive<I>(states: I, num_steps: usize, disps: Option<&mut Vec<f64>>) -> Extremes
where
    I: Iterator<Item = SdofState>,
{
    let mut extremes = Extremes::new();
    match disps {
        Some(out) => {
            out.clear();
            out.resize(num_steps, 0.0);
            for (slot, state) in out.iter_mut().zip(states) {
                *slot = state.displacement;
                extremes.update(state.displacement);
            }
        }
        None => {
            for state in states.take(num_steps) {
                extremes.update(state.displacement);
            }
        }
    }
    extremes
}
