//! Spectrum analysis options and period sweeps

use serde::{Deserialize, Serialize};

use crate::error::{invalid, SpectrumResult};
use crate::ground_motion::GRAVITY;
use crate::integrators::Integrator;

/// Options for a response spectrum sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectrumOptions {
    /// Fraction of critical damping shared by every oscillator
    pub damping_ratio: f64,
    /// Time integration scheme
    pub integrator: Integrator,
    /// Gravitational acceleration used to express pseudo-acceleration in g
    pub gravity: f64,
    /// Evaluate periods on the rayon thread pool
    pub parallel: bool,
}

impl Default for SpectrumOptions {
    fn default() -> Self {
        Self {
            damping_ratio: 0.05,
            integrator: Integrator::LinearInterpolation,
            gravity: GRAVITY,
            parallel: false,
        }
    }
}

impl SpectrumOptions {
    /// Options for the given damping ratio and scheme
    pub fn new(damping_ratio: f64, integrator: Integrator) -> Self {
        Self {
            damping_ratio,
            integrator,
            ..Self::default()
        }
    }

    /// Set the integration scheme
    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    /// Set the damping ratio
    pub fn with_damping_ratio(mut self, damping_ratio: f64) -> Self {
        self.damping_ratio = damping_ratio;
        self
    }

    /// Set gravitational acceleration
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Sweep periods in parallel
    pub fn parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    /// Reject damping ratios the selected scheme cannot handle
    pub fn validate(&self) -> SpectrumResult<()> {
        let z = self.damping_ratio;
        if !z.is_finite() || z < 0.0 {
            return Err(invalid(format!("damping ratio must be non-negative, got {z}")));
        }
        if self.integrator == Integrator::LinearInterpolation && z >= 1.0 {
            return Err(invalid(format!(
                "LinearInterpolation needs damping ratio below 1, got {z}"
            )));
        }
        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            return Err(invalid(format!("gravity must be positive, got {}", self.gravity)));
        }
        Ok(())
    }
}

/// How periods are distributed between the ends of a range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodSpacing {
    #[default]
    Linear,
    Logarithmic,
}

/// Period sweep described by its end points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodRange {
    pub start: f64,
    pub end: f64,
    pub count: usize,
    #[serde(default)]
    pub spacing: PeriodSpacing,
}

impl PeriodRange {
    pub fn linear(start: f64, end: f64, count: usize) -> Self {
        Self {
            start,
            end,
            count,
            spacing: PeriodSpacing::Linear,
        }
    }

    pub fn logarithmic(start: f64, end: f64, count: usize) -> Self {
        Self {
            start,
            end,
            count,
            spacing: PeriodSpacing::Logarithmic,
        }
    }

    /// Expand to the ordered list of periods, both ends included
    pub fn periods(&self) -> SpectrumResult<Vec<f64>> {
        if self.count == 0 {
            return Err(invalid("period range must contain at least one period"));
        }
        if !(self.start.is_finite() && self.start > 0.0 && self.end.is_finite() && self.end > 0.0) {
            return Err(invalid(format!(
                "period range bounds must be positive, got [{}, {}]",
                self.start, self.end
            )));
        }
        if self.count == 1 {
            return Ok(vec![self.start]);
        }

        let last = (self.count - 1) as f64;
        let periods = match self.spacing {
            PeriodSpacing::Linear => {
                let step = (self.end - self.start) / last;
                (0..self.count)
                    .map(|i| self.start + i as f64 * step)
                    .collect()
            }
            PeriodSpacing::Logarithmic => {
                let (lo, hi) = (self.start.ln(), self.end.ln());
                let step = (hi - lo) / last;
                (0..self.count)
                    .map(|i| (lo + i as f64 * step).exp())
                    .collect()
            }
        };
        Ok(periods)
    }
}
