//! Ground motion records
//!
//! A uniformly sampled acceleration history in consistent units, plus the
//! serde record used to read "Value" time series out of event files.

use serde::{Deserialize, Serialize};

use crate::error::{invalid, SpectrumError, SpectrumResult};
use crate::results::Extremes;

/// Standard gravitational acceleration in m/s²
pub const GRAVITY: f64 = 9.81;

/// Units a recorded acceleration history may be expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccelerationUnit {
    #[serde(rename = "g")]
    G,
    #[serde(rename = "m/s^2", alias = "mps2")]
    MetersPerSecondSquared,
    #[serde(rename = "cm/s^2", alias = "cmps2", alias = "gal")]
    CentimetersPerSecondSquared,
    #[serde(rename = "in/s^2", alias = "inps2")]
    InchesPerSecondSquared,
    #[serde(rename = "ft/s^2", alias = "ftps2")]
    FeetPerSecondSquared,
}

impl AccelerationUnit {
    /// Multiplier converting this unit to m/s²
    pub fn to_mps2_factor(&self, gravity: f64) -> f64 {
        match self {
            AccelerationUnit::G => gravity,
            AccelerationUnit::MetersPerSecondSquared => 1.0,
            AccelerationUnit::CentimetersPerSecondSquared => 0.01,
            AccelerationUnit::InchesPerSecondSquared => 0.0254,
            AccelerationUnit::FeetPerSecondSquared => 0.3048,
        }
    }
}

impl Default for AccelerationUnit {
    /// Records without units are taken to be in g
    fn default() -> Self {
        Self::G
    }
}

/// A "Value" time series as stored in an event file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeriesRecord {
    #[serde(default)]
    pub name: String,
    /// Sampling interval in seconds
    #[serde(rename = "dT")]
    pub dt: f64,
    pub data: Vec<f64>,
    /// Scale factor applied to every sample
    #[serde(default = "default_factor")]
    pub factor: f64,
    #[serde(default)]
    pub units: Option<AccelerationUnit>,
}

fn default_factor() -> f64 {
    1.0
}

/// Ground acceleration history sampled at a uniform step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundMotion {
    /// Time step in seconds
    pub dt: f64,
    /// Acceleration samples
    pub accelerations: Vec<f64>,
}

impl GroundMotion {
    /// Create a record, rejecting empty histories and non-positive steps
    pub fn new(dt: f64, accelerations: Vec<f64>) -> SpectrumResult<Self> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(invalid(format!("time step must be positive, got {dt}")));
        }
        if accelerations.is_empty() {
            return Err(invalid("ground motion has no samples"));
        }
        Ok(Self { dt, accelerations })
    }

    /// Convert an event-file series to m/s²
    pub fn from_record(record: &TimeSeriesRecord, gravity: f64) -> SpectrumResult<Self> {
        if !record.factor.is_finite() {
            return Err(SpectrumError::InvalidInput(format!(
                "series '{}' has a non-finite factor",
                record.name
            )));
        }
        let units = record.units.unwrap_or_else(|| {
            log::warn!(
                "series '{}' has no units, assuming acceleration in g",
                record.name
            );
            AccelerationUnit::G
        });
        let scale = record.factor * units.to_mps2_factor(gravity);
        let accelerations = record.data.iter().map(|a| a * scale).collect();
        Self::new(record.dt, accelerations)
    }

    pub fn num_steps(&self) -> usize {
        self.accelerations.len()
    }

    /// Time of the last sample
    pub fn duration(&self) -> f64 {
        self.num_steps().saturating_sub(1) as f64 * self.dt
    }

    /// Sample times `i·dT`
    pub fn times(&self) -> Vec<f64> {
        (0..self.num_steps()).map(|i| i as f64 * self.dt).collect()
    }

    /// Range of the acceleration samples
    pub fn extremes(&self) -> Extremes {
        Extremes::from_slice(&self.accelerations)
    }

    /// Peak ground acceleration (absolute)
    pub fn pga(&self) -> f64 {
        self.extremes().abs_max()
    }

    /// Copy with every sample multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            dt: self.dt,
            accelerations: self.accelerations.iter().map(|a| a * factor).collect(),
        }
    }
}
