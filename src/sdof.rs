//! Single-degree-of-freedom system parameters

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{invalid, SpectrumResult};

/// Linear mass-spring-damper oscillator `m·a + c·v + k·d = f`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SdofSystem {
    /// Mass
    pub mass: f64,
    /// Viscous damping coefficient
    pub damping: f64,
    /// Linear stiffness
    pub stiffness: f64,
}

impl SdofSystem {
    /// Create a system from its physical coefficients
    pub fn new(mass: f64, damping: f64, stiffness: f64) -> Self {
        Self {
            mass,
            damping,
            stiffness,
        }
    }

    /// Unit-mass oscillator with the given natural period and damping ratio
    pub fn from_period(period: f64, damping_ratio: f64) -> SpectrumResult<Self> {
        Self::from_period_with_mass(period, damping_ratio, 1.0)
    }

    /// Oscillator with the given natural period, damping ratio and mass
    ///
    /// `ω = 2π/T`, `k = m·ω²`, `c = 2·m·ω·ζ`
    pub fn from_period_with_mass(
        period: f64,
        damping_ratio: f64,
        mass: f64,
    ) -> SpectrumResult<Self> {
        if !(period.is_finite() && period > 0.0) {
            return Err(invalid(format!("period must be positive, got {period}")));
        }
        if !damping_ratio.is_finite() || damping_ratio < 0.0 {
            return Err(invalid(format!(
                "damping ratio must be non-negative, got {damping_ratio}"
            )));
        }

        let omega = 2.0 * PI / period;
        let system = Self {
            mass,
            damping: 2.0 * mass * omega * damping_ratio,
            stiffness: mass * omega * omega,
        };
        system.validate()?;
        Ok(system)
    }

    /// Undamped natural circular frequency `sqrt(k/m)` in rad/s
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Undamped natural period in seconds
    pub fn natural_period(&self) -> f64 {
        2.0 * PI / self.natural_frequency()
    }

    /// Critical damping coefficient `2·sqrt(k·m)`
    pub fn critical_damping(&self) -> f64 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Fraction of critical damping
    pub fn damping_ratio(&self) -> f64 {
        self.damping / self.critical_damping()
    }

    /// Check that the system can be integrated at all
    pub fn validate(&self) -> SpectrumResult<()> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(invalid(format!("mass must be positive, got {}", self.mass)));
        }
        Ok(())
    }
}

impl Default for SdofSystem {
    /// Unit mass, 1 s period, 5% damping
    fn default() -> Self {
        let omega = 2.0 * PI;
        Self {
            mass: 1.0,
            damping: 2.0 * omega * 0.05,
            stiffness: omega * omega,
        }
    }
}

/// State of the oscillator at `t = 0`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InitialConditions {
    pub displacement: f64,
    pub velocity: f64,
}

impl InitialConditions {
    pub fn new(displacement: f64, velocity: f64) -> Self {
        Self {
            displacement,
            velocity,
        }
    }

    /// System starting from rest
    pub fn at_rest() -> Self {
        Self::default()
    }
}
