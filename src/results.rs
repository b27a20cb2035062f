//! Result types for time integration and response spectra

use serde::{Deserialize, Serialize};

/// Running minimum and maximum of a sampled signal
///
/// Updated inline while a history is generated so that the peak of a
/// response is known without retaining the history itself. A NaN sample
/// poisons the accumulator: every later query reports NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extremes {
    pub min: f64,
    pub max: f64,
}

impl Extremes {
    /// Empty accumulator
    pub fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Accumulate a slice of values
    pub fn from_slice(values: &[f64]) -> Self {
        let mut extremes = Self::new();
        for &value in values {
            extremes.update(value);
        }
        extremes
    }

    /// Fold one sample into the accumulator
    #[inline]
    pub fn update(&mut self, value: f64) {
        if value.is_nan() || self.min.is_nan() {
            self.min = f64::NAN;
            self.max = f64::NAN;
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// True until the first sample is seen
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Peak magnitude `max(|min|, |max|)`, zero when empty
    pub fn abs_max(&self) -> f64 {
        if self.min.is_nan() {
            return f64::NAN;
        }
        if self.is_empty() {
            return 0.0;
        }
        self.min.abs().max(self.max.abs())
    }

    /// Whether every accumulated sample was finite
    pub fn is_finite(&self) -> bool {
        self.is_empty() || (self.min.is_finite() && self.max.is_finite())
    }

    /// Widen to cover another accumulator
    pub fn merge(&mut self, other: &Extremes) {
        if other.is_empty() {
            return;
        }
        self.update(other.min);
        self.update(other.max);
    }
}

impl Default for Extremes {
    fn default() -> Self {
        Self::new()
    }
}

/// Displacement, velocity and acceleration of the oscillator at one sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SdofState {
    pub displacement: f64,
    pub velocity: f64,
    pub acceleration: f64,
}

impl SdofState {
    pub fn new(displacement: f64, velocity: f64, acceleration: f64) -> Self {
        Self {
            displacement,
            velocity,
            acceleration,
        }
    }
}

/// Full response histories of a single integration, one entry per force sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseHistory {
    /// Sample times `i·dT`
    pub time: Vec<f64>,
    pub displacement: Vec<f64>,
    pub velocity: Vec<f64>,
    pub acceleration: Vec<f64>,
    pub displacement_extremes: Extremes,
    pub velocity_extremes: Extremes,
    pub acceleration_extremes: Extremes,
}

impl ResponseHistory {
    /// Collect a history from a stream of states
    pub fn collect<I>(states: I, dt: f64, num_steps: usize) -> Self
    where
        I: Iterator<Item = SdofState>,
    {
        let mut history = Self {
            time: Vec::with_capacity(num_steps),
            displacement: Vec::with_capacity(num_steps),
            velocity: Vec::with_capacity(num_steps),
            acceleration: Vec::with_capacity(num_steps),
            displacement_extremes: Extremes::new(),
            velocity_extremes: Extremes::new(),
            acceleration_extremes: Extremes::new(),
        };

        for (i, state) in states.take(num_steps).enumerate() {
            history.time.push(i as f64 * dt);
            history.displacement.push(state.displacement);
            history.velocity.push(state.velocity);
            history.acceleration.push(state.acceleration);
            history.displacement_extremes.update(state.displacement);
            history.velocity_extremes.update(state.velocity);
            history.acceleration_extremes.update(state.acceleration);
        }

        history
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.displacement.len()
    }

    pub fn is_empty(&self) -> bool {
        self.displacement.is_empty()
    }

    /// Peak absolute displacement
    pub fn peak_displacement(&self) -> f64 {
        self.displacement_extremes.abs_max()
    }

    /// Time axis bounds `(0, duration)`
    pub fn time_bounds(&self) -> (f64, f64) {
        (0.0, self.time.last().copied().unwrap_or(0.0))
    }
}

/// One ordinate of a response spectrum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectrumPoint {
    /// Natural period in seconds
    pub period: f64,
    /// Peak absolute relative displacement
    pub displacement: f64,
    /// Pseudo-acceleration in g
    pub acceleration: f64,
}
