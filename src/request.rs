//! JSON request/response types shared by the HTTP server and WASM binding

use serde::{Deserialize, Serialize};

use crate::analysis::{PeriodRange, SpectrumOptions};
use crate::error::{SpectrumError, SpectrumResult};
use crate::ground_motion::{GroundMotion, TimeSeriesRecord, GRAVITY};
use crate::integrators::Integrator;
use crate::spectrum::ResponseSpectrum;

#[derive(Debug, Deserialize)]
pub struct SpectrumRequest {
    pub ground_motion: TimeSeriesRecord,
    /// Explicit periods; takes precedence over `period_range`
    #[serde(default)]
    pub periods: Option<Vec<f64>>,
    #[serde(default)]
    pub period_range: Option<PeriodRange>,
    #[serde(default = "default_damping_ratio")]
    pub damping_ratio: f64,
    #[serde(default = "default_integrator")]
    pub integrator: String,
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    #[serde(default)]
    pub parallel: bool,
}

impl SpectrumRequest {
    /// Parse a request body
    pub fn from_json(json: &str) -> SpectrumResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn default_damping_ratio() -> f64 {
    0.05
}

fn default_integrator() -> String {
    Integrator::default().to_string()
}

fn default_gravity() -> f64 {
    GRAVITY
}

#[derive(Debug, Serialize)]
pub struct SpectrumResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<ResponseSpectrum>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ms_elapsed: Option<f64>,
}

impl SpectrumResponse {
    pub fn from_result(result: SpectrumResult<ResponseSpectrum>, ms_elapsed: Option<f64>) -> Self {
        match result {
            Ok(spectrum) => Self {
                success: true,
                error: None,
                results: Some(spectrum),
                ms_elapsed,
            },
            Err(e) => Self::failure(e.to_string(), ms_elapsed),
        }
    }

    pub fn failure(error: String, ms_elapsed: Option<f64>) -> Self {
        Self {
            success: false,
            error: Some(error),
            results: None,
            ms_elapsed,
        }
    }
}

/// Resolve a request into options and run the sweep
pub fn run_request(request: &SpectrumRequest) -> SpectrumResult<ResponseSpectrum> {
    // Fail on the scheme name before touching any data
    let integrator: Integrator = request.integrator.parse()?;

    let periods = match (&request.periods, &request.period_range) {
        (Some(periods), _) => periods.clone(),
        (None, Some(range)) => range.periods()?,
        (None, None) => {
            return Err(SpectrumError::InvalidInput(
                "request needs either periods or period_range".to_string(),
            ))
        }
    };

    let motion = GroundMotion::from_record(&request.ground_motion, request.gravity)?;

    let mut options = SpectrumOptions::new(request.damping_ratio, integrator)
        .with_gravity(request.gravity);
    if request.parallel {
        options = options.parallel();
    }

    ResponseSpectrum::compute(&periods, &motion, &options)
}
