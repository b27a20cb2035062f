//! Piecewise-linear excitation (exact) method
//!
//! Closed-form solution of the damped SDOF equation when the force varies
//! linearly between samples. Unconditionally stable and exact for that
//! forcing at any step; restricted to sub-critical damping `0 ≤ ζ < 1`.

use crate::error::{invalid, SpectrumResult};
use crate::results::{Extremes, SdofState};
use crate::sdof::{InitialConditions, SdofSystem};

use super::{drive, validate_inputs};

/// Damping ratios this close to 1 are treated as critical
const CRITICAL_TOLERANCE: f64 = 1e-9;

/// Recurrence coefficients for displacement (`a..d`) and velocity (`a_p..d_p`)
///
/// ```text
/// d[i] = A·d[i−1] + B·v[i−1] + C·f[i−1] + D·f[i]
/// v[i] = A′·d[i−1] + B′·v[i−1] + C′·f[i−1] + D′·f[i]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub a_p: f64,
    pub b_p: f64,
    pub c_p: f64,
    pub d_p: f64,
}

impl Coefficients {
    pub fn new(natural_freq: f64, damping_ratio: f64, stiffness: f64, time_step: f64) -> Self {
        let w = natural_freq;
        let z = damping_ratio;
        let dt = time_step;

        let root = (1.0 - z * z).sqrt();
        let damped_freq = w * root;
        let e_pow = (-z * w * dt).exp();
        let (sin_freq, cos_freq) = (damped_freq * dt).sin_cos();

        let a = e_pow * (z / root * sin_freq + cos_freq);
        let b = e_pow * sin_freq / damped_freq;
        let c = (2.0 * z / (w * dt)
            + e_pow
                * (((1.0 - 2.0 * z * z) / (damped_freq * dt) - z / root) * sin_freq
                    - (1.0 + 2.0 * z / (w * dt)) * cos_freq))
            / stiffness;
        let d = (1.0 - 2.0 * z / (w * dt)
            + e_pow
                * ((2.0 * z * z - 1.0) / (damped_freq * dt) * sin_freq
                    + 2.0 * z / (w * dt) * cos_freq))
            / stiffness;

        let a_p = -e_pow * (w * sin_freq / root);
        let b_p = e_pow * (cos_freq - z * sin_freq / root);
        let c_p = (-1.0 / dt
            + e_pow * ((w / root + z / (dt * root)) * sin_freq + cos_freq / dt))
            / stiffness;
        let d_p = (1.0 - e_pow * (z * sin_freq / root + cos_freq)) / (stiffness * dt);

        Self {
            a,
            b,
            c,
            d,
            a_p,
            b_p,
            c_p,
            d_p,
        }
    }
}

/// Stepping iterator for the piecewise-linear excitation method
#[derive(Debug, Clone)]
pub struct LinearInterpolation<'a> {
    system: SdofSystem,
    coeffs: Coefficients,
    force: &'a [f64],
    index: usize,
    displacement: f64,
    velocity: f64,
}

impl<'a> LinearInterpolation<'a> {
    /// Stepper for `system` from `initial`.
    ///
    /// Needs positive stiffness and a damping ratio in `[0, 1 - 1e-9)`:
    /// ratios within `1e-9` of critical are rejected along with `ζ ≥ 1`.
    pub fn new(
        system: &SdofSystem,
        initial: InitialConditions,
        time_step: f64,
        force: &'a [f64],
    ) -> SpectrumResult<Self> {
        validate_inputs(system, time_step, force)?;
        if !(system.stiffness.is_finite() && system.stiffness > 0.0) {
            return Err(invalid(format!(
                "linear interpolation needs positive stiffness, got {}",
                system.stiffness
            )));
        }

        let damping_ratio = system.damping_ratio();
        if !(0.0..1.0 - CRITICAL_TOLERANCE).contains(&damping_ratio) {
            return Err(invalid(format!(
                "linear interpolation needs damping ratio in [0, 1), got {damping_ratio}"
            )));
        }

        let coeffs = Coefficients::new(
            system.natural_frequency(),
            damping_ratio,
            system.stiffness,
            time_step,
        );

        Ok(Self {
            system: *system,
            coeffs,
            force,
            index: 0,
            displacement: initial.displacement,
            velocity: initial.velocity,
        })
    }

    pub fn coefficients(&self) -> &Coefficients {
        &self.coeffs
    }

    fn state(&self, force: f64) -> SdofState {
        let SdofSystem {
            mass,
            damping,
            stiffness,
        } = self.system;
        SdofState {
            displacement: self.displacement,
            velocity: self.velocity,
            acceleration: (force - damping * self.velocity - stiffness * self.displacement) / mass,
        }
    }
}

impl Iterator for LinearInterpolation<'_> {
    type Item = SdofState;

    fn next(&mut self) -> Option<SdofState> {
        let force = *self.force.get(self.index)?;
        if self.index > 0 {
            let k = &self.coeffs;
            let prev_force = self.force[self.index - 1];
            let (d, v) = (self.displacement, self.velocity);
            self.displacement = k.a * d + k.b * v + k.c * prev_force + k.d * force;
            self.velocity = k.a_p * d + k.b_p * v + k.c_p * prev_force + k.d_p * force;
        }
        self.index += 1;
        Some(self.state(force))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.force.len() - self.index;
        (remaining, Some(remaining))
    }
}

/// Piecewise-linear excitation response of a linear SDOF system.
///
/// Natural frequency and damping ratio are derived from `system`. Returns
/// the displacement extremes; `disps`, when given, receives the displacement
/// history resized to `force.len()`.
pub fn linear_interpolation(
    system: &SdofSystem,
    initial: InitialConditions,
    time_step: f64,
    force: &[f64],
    disps: Option<&mut Vec<f64>>,
) -> SpectrumResult<Extremes> {
    let steps = LinearInterpolation::new(system, initial, time_step, force)?;
    Ok(drive(steps, force.len(), disps))
}
