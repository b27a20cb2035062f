//! SDOF Spectrum - single-degree-of-freedom response and response spectra
//!
//! This library provides the numerical core used to characterise earthquake
//! ground motions through the response of linear oscillators:
//! - Central difference time integration
//! - Newmark-beta (average and linear acceleration) time integration
//! - Exact integration for piecewise-linear excitation
//! - Displacement and pseudo-acceleration response spectra
//!
//! ## Example
//! ```rust
//! use sdof_spectrum::prelude::*;
//!
//! // 2 s of a 2 Hz sine at 0.3 g, sampled at 100 Hz
//! let accel: Vec<f64> = (0..200)
//!     .map(|i| 0.3 * 9.81 * (2.0 * std::f64::consts::PI * 2.0 * i as f64 * 0.01).sin())
//!     .collect();
//! let motion = GroundMotion::new(0.01, accel).unwrap();
//!
//! let periods = PeriodRange::logarithmic(0.05, 3.0, 40).periods().unwrap();
//! let options = SpectrumOptions::new(0.05, Integrator::LinearInterpolation);
//!
//! let spectrum = ResponseSpectrum::compute(&periods, &motion, &options).unwrap();
//! assert_eq!(spectrum.len(), 40);
//! ```

pub mod analysis;
pub mod error;
pub mod ground_motion;
pub mod integrators;
pub mod request;
pub mod results;
pub mod sdof;
pub mod spectrum;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{PeriodRange, PeriodSpacing, SpectrumOptions};
    pub use crate::error::{SpectrumError, SpectrumResult};
    pub use crate::ground_motion::{AccelerationUnit, GroundMotion, TimeSeriesRecord, GRAVITY};
    pub use crate::integrators::{
        central_difference, linear_interpolation, newmark, Integrator, NewmarkParameters,
    };
    pub use crate::results::{Extremes, ResponseHistory, SdofState, SpectrumPoint};
    pub use crate::sdof::{InitialConditions, SdofSystem};
    pub use crate::spectrum::{
        calc_response_spectrum, calc_response_spectrum_by_name, ResponseSpectrum,
    };
}

#[cfg(feature = "wasm")]
pub mod wasm;
