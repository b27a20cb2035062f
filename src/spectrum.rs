//! Response spectrum generator
//!
//! Sweeps a unit-mass oscillator over a list of natural periods, integrates
//! the ground motion once per period and keeps only the peak displacement
//! and the derived pseudo-acceleration. Periods are independent, so the
//! sweep can run on the rayon pool; outputs stay index-aligned with the
//! input periods either way, and the first failing period aborts the whole
//! sweep.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::analysis::SpectrumOptions;
use crate::error::{invalid, SpectrumResult};
use crate::ground_motion::GroundMotion;
use crate::integrators::Integrator;
use crate::results::{Extremes, SpectrumPoint};
use crate::sdof::{InitialConditions, SdofSystem};

/// Displacement and pseudo-acceleration spectra of one ground motion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSpectrum {
    /// Natural periods in seconds, in caller order
    pub periods: Vec<f64>,
    /// Peak absolute displacement per period
    pub displacement: Vec<f64>,
    /// Pseudo-acceleration `dmax·ω²/g` per period
    pub acceleration: Vec<f64>,
    pub damping_ratio: f64,
    pub integrator: Integrator,
    /// Axis bounds, accumulated while the spectrum is assembled
    pub period_extremes: Extremes,
    pub displacement_extremes: Extremes,
    pub acceleration_extremes: Extremes,
}

impl ResponseSpectrum {
    /// Compute the spectrum of `motion` over `periods`
    pub fn compute(
        periods: &[f64],
        motion: &GroundMotion,
        options: &SpectrumOptions,
    ) -> SpectrumResult<Self> {
        sweep(periods, &motion.accelerations, motion.dt, options)
    }

    /// Number of periods
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Spectrum ordinates in period order
    pub fn points(&self) -> impl Iterator<Item = SpectrumPoint> + '_ {
        self.periods
            .iter()
            .zip(&self.displacement)
            .zip(&self.acceleration)
            .map(|((&period, &displacement), &acceleration)| SpectrumPoint {
                period,
                displacement,
                acceleration,
            })
    }

    /// Ordinate with the largest pseudo-acceleration
    ///
    /// Compared with `f64::total_cmp`, so an infinite or positive NaN
    /// ordinate from an unstable integration wins over every finite one.
    pub fn peak_acceleration(&self) -> Option<SpectrumPoint> {
        self.points()
            .max_by(|a, b| a.acceleration.total_cmp(&b.acceleration))
    }
}

/// Response spectrum of `ground_motion` for the given periods.
///
/// Oscillators have unit mass and start at rest. Returns displacement and
/// pseudo-acceleration spectra index-aligned with `periods`.
pub fn calc_response_spectrum(
    periods: &[f64],
    damping_ratio: f64,
    integrator: Integrator,
    ground_motion: &[f64],
    dt: f64,
) -> SpectrumResult<ResponseSpectrum> {
    let options = SpectrumOptions::new(damping_ratio, integrator);
    sweep(periods, ground_motion, dt, &options)
}

/// Same as [`calc_response_spectrum`] with the scheme given by identifier.
///
/// Unknown identifiers fail before any integration is done.
pub fn calc_response_spectrum_by_name(
    periods: &[f64],
    damping_ratio: f64,
    integrator: &str,
    ground_motion: &[f64],
    dt: f64,
) -> SpectrumResult<ResponseSpectrum> {
    let integrator: Integrator = integrator.parse()?;
    calc_response_spectrum(periods, damping_ratio, integrator, ground_motion, dt)
}

/// Peak response of one oscillator
pub fn spectrum_point(
    period: f64,
    ground_motion: &[f64],
    dt: f64,
    options: &SpectrumOptions,
) -> SpectrumResult<SpectrumPoint> {
    let system = SdofSystem::from_period(period, options.damping_ratio)?;
    let omega = 2.0 * PI / period;

    let peak = options
        .integrator
        .peak(&system, InitialConditions::at_rest(), dt, ground_motion)?;
    let displacement = peak.abs_max();
    let acceleration = displacement * omega * omega / options.gravity;

    log::trace!(
        "T = {period:.4} s: dmax = {displacement:.6e}, Sa = {acceleration:.6e} g"
    );

    Ok(SpectrumPoint {
        period,
        displacement,
        acceleration,
    })
}

fn sweep(
    periods: &[f64],
    ground_motion: &[f64],
    dt: f64,
    options: &SpectrumOptions,
) -> SpectrumResult<ResponseSpectrum> {
    if periods.is_empty() {
        return Err(invalid("no periods to evaluate"));
    }
    if ground_motion.is_empty() {
        return Err(invalid("ground motion has no samples"));
    }
    if !(dt.is_finite() && dt > 0.0) {
        return Err(invalid(format!("time step must be positive, got {dt}")));
    }
    options.validate()?;

    log::debug!(
        "Computing {} spectrum ordinates with {} (zeta = {}, {} steps, parallel = {})",
        periods.len(),
        options.integrator,
        options.damping_ratio,
        ground_motion.len(),
        options.parallel
    );

    let points: Vec<SpectrumPoint> = if options.parallel {
        periods
            .par_iter()
            .map(|&period| spectrum_point(period, ground_motion, dt, options))
            .collect::<SpectrumResult<_>>()?
    } else {
        periods
            .iter()
            .map(|&period| spectrum_point(period, ground_motion, dt, options))
            .collect::<SpectrumResult<_>>()?
    };

    let num_periods = periods.len();
    let mut spectrum = ResponseSpectrum {
        periods: periods.to_vec(),
        displacement: vec![0.0; num_periods],
        acceleration: vec![0.0; num_periods],
        damping_ratio: options.damping_ratio,
        integrator: options.integrator,
        period_extremes: Extremes::new(),
        displacement_extremes: Extremes::new(),
        acceleration_extremes: Extremes::new(),
    };

    for (i, point) in points.into_iter().enumerate() {
        spectrum.displacement[i] = point.displacement;
        spectrum.acceleration[i] = point.acceleration;
        spectrum.period_extremes.update(point.period);
        spectrum.displacement_extremes.update(point.displacement);
        spectrum.acceleration_extremes.update(point.acceleration);
    }

    Ok(spectrum)
}
