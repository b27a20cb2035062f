use approx::{assert_abs_diff_eq, assert_relative_eq};
use sdof_spectrum::prelude::*;
use std::f64::consts::PI;

/// One full cycle of a 1 Hz sine at 3 m/s², then 9 s of silence
fn sine_pulse(dt: f64) -> Vec<f64> {
    (0..=1000)
        .map(|i| {
            let t = i as f64 * dt;
            if t <= 1.0 + 1e-9 {
                3.0 * (2.0 * PI * t).sin()
            } else {
                0.0
            }
        })
        .collect()
}

fn bits(values: &[f64]) -> Vec<u64> {
    values.iter().map(|v| v.to_bits()).collect()
}

/// Peak ground displacement by trapezoidal double integration
fn peak_ground_displacement(accel: &[f64], dt: f64) -> f64 {
    let (mut vel, mut disp, mut peak) = (0.0_f64, 0.0_f64, 0.0_f64);
    for pair in accel.windows(2) {
        vel += 0.5 * (pair[0] + pair[1]) * dt;
        disp += vel * dt;
        peak = peak.max(disp.abs());
    }
    peak
}

#[test]
fn test_index_alignment_for_every_integrator() {
    let dt = 0.01;
    let gm = sine_pulse(dt);
    for integrator in Integrator::ALL {
        let spectrum = calc_response_spectrum(&[0.2, 1.0, 0.5], 0.05, integrator, &gm, dt).unwrap();
        assert_eq!(spectrum.periods, vec![0.2, 1.0, 0.5]);
        assert_eq!(spectrum.displacement.len(), 3);
        assert_eq!(spectrum.acceleration.len(), 3);

        let single = calc_response_spectrum(&[1.0], 0.05, integrator, &gm, dt).unwrap();
        assert_eq!(spectrum.displacement[1], single.displacement[0]);
    }
}

#[test]
fn test_determinism() {
    let dt = 0.01;
    let gm = sine_pulse(dt);
    let periods = PeriodRange::linear(0.05, 3.0, 30).periods().unwrap();
    for integrator in Integrator::ALL {
        let a = calc_response_spectrum(&periods, 0.05, integrator, &gm, dt).unwrap();
        let b = calc_response_spectrum(&periods, 0.05, integrator, &gm, dt).unwrap();
        assert_eq!(a.displacement, b.displacement);
        assert_eq!(a.acceleration, b.acceleration);
    }
}

#[test]
fn test_parallel_sweep_matches_serial() {
    let dt = 0.01;
    let motion = GroundMotion::new(dt, sine_pulse(dt)).unwrap();
    let periods = PeriodRange::logarithmic(0.02, 5.0, 64).periods().unwrap();
    for integrator in Integrator::ALL {
        let serial = SpectrumOptions::new(0.05, integrator);
        let parallel = serial.clone().parallel();
        let a = ResponseSpectrum::compute(&periods, &motion, &serial).unwrap();
        let b = ResponseSpectrum::compute(&periods, &motion, &parallel).unwrap();
        // Unstable central difference ordinates are NaN, so compare bits
        assert_eq!(bits(&a.displacement), bits(&b.displacement), "{integrator}");
        assert_eq!(bits(&a.acceleration), bits(&b.acceleration), "{integrator}");
        assert_eq!(
            bits(&[a.acceleration_extremes.min, a.acceleration_extremes.max]),
            bits(&[b.acceleration_extremes.min, b.acceleration_extremes.max]),
        );
    }
}

#[test]
fn test_unstable_ordinate_reaches_spectrum_extremes() {
    // T = 0.002 s is far past the central difference limit T > π·dT
    let dt = 0.01;
    let gm = sine_pulse(dt);
    let spectrum =
        calc_response_spectrum(&[0.002, 0.5, 1.0], 0.05, Integrator::CentralDifference, &gm, dt)
            .unwrap();

    assert!(!spectrum.displacement[0].is_finite());
    assert!(spectrum.displacement[1..].iter().all(|d| d.is_finite()));
    assert!(!spectrum.acceleration_extremes.is_finite());
    assert!(!spectrum.displacement_extremes.is_finite());

    let peak = spectrum.peak_acceleration().unwrap();
    assert_eq!(peak.period, 0.002);
    assert!(!peak.acceleration.is_finite());
}

#[test]
fn test_zero_motion_gives_zero_spectrum() {
    let gm = vec![0.0; 300];
    for integrator in Integrator::ALL {
        let spectrum = calc_response_spectrum(&[0.1, 0.5, 2.0], 0.05, integrator, &gm, 0.01).unwrap();
        assert!(spectrum.displacement.iter().all(|&d| d == 0.0));
        assert!(spectrum.acceleration.iter().all(|&a| a == 0.0));
    }
}

#[test]
fn test_rigid_oscillator_follows_ground() {
    let dt = 0.01;
    let gm = sine_pulse(dt);
    let pga_in_g = 3.0 / 9.81;
    for integrator in [Integrator::LinearInterpolation, Integrator::NewmarkAverageAccel] {
        let spectrum = calc_response_spectrum(&[0.001, 0.005], 0.05, integrator, &gm, dt).unwrap();
        assert!(spectrum.displacement[0] < 1e-6);
        assert_relative_eq!(spectrum.acceleration[0], pga_in_g, max_relative = 0.01);
        assert_relative_eq!(spectrum.acceleration[1], pga_in_g, max_relative = 0.01);
    }
}

#[test]
fn test_flexible_oscillator_follows_ground_displacement() {
    let dt = 0.01;
    let gm = sine_pulse(dt);
    let pgd = peak_ground_displacement(&gm, dt);
    for integrator in Integrator::ALL {
        let spectrum = calc_response_spectrum(&[1000.0], 0.05, integrator, &gm, dt).unwrap();
        assert_relative_eq!(spectrum.displacement[0], pgd, max_relative = 0.01);
        assert!(spectrum.acceleration[0] < 1e-5);
    }
}

#[test]
fn test_impulse_response_envelope() {
    // T = 1 s, 5% damping, unit impulse at the first sample
    let dt = 0.02;
    let zeta = 0.05;
    let system = SdofSystem::from_period(1.0, zeta).unwrap();
    let mut force = vec![0.0; 501];
    force[0] = 1.0;

    let mut disps = Vec::new();
    let peak = newmark(
        &system,
        InitialConditions::at_rest(),
        NewmarkParameters::average_acceleration(),
        dt,
        &force,
        Some(&mut disps),
    )
    .unwrap();

    // Peak inside the first half cycle, near T/4
    let peak_index = disps
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
        .map(|(i, _)| i)
        .unwrap();
    assert!((10..=16).contains(&peak_index), "peak at sample {peak_index}");

    // Successive positive peaks decay monotonically
    let crests: Vec<f64> = disps
        .windows(3)
        .filter(|w| w[1] > w[0] && w[1] >= w[2] && w[1] > 0.0)
        .map(|w| w[1])
        .collect();
    assert!(crests.len() >= 8);
    assert!(crests.windows(2).all(|pair| pair[1] < pair[0]));

    // The first sample's acceleration acts over half a step under the
    // trapezoidal rule: an initial velocity of f0·dT/(2m)
    let omega = 2.0 * PI;
    let omega_d = omega * (1.0 - zeta * zeta).sqrt();
    let v_eff = dt / 2.0;
    let closed_form = (0..10_000)
        .map(|i| {
            let t = i as f64 * 1e-4;
            v_eff / omega_d * (-zeta * omega * t).exp() * (omega_d * t).sin()
        })
        .fold(0.0_f64, f64::max);
    assert_relative_eq!(peak.abs_max(), closed_form, max_relative = 0.01);

    let spectrum =
        calc_response_spectrum(&[1.0], zeta, Integrator::NewmarkAverageAccel, &force, dt).unwrap();
    assert_eq!(spectrum.displacement[0], peak.abs_max());
}

#[test]
fn test_critical_damping_rejected_for_linear_interpolation() {
    let gm = sine_pulse(0.01);
    let err = calc_response_spectrum(&[0.5, 1.0], 1.0, Integrator::LinearInterpolation, &gm, 0.01)
        .unwrap_err();
    assert!(matches!(err, SpectrumError::InvalidParameter(_)));

    let name = calc_response_spectrum_by_name(&[0.5], 1.0, "LinearInterpolation", &gm, 0.01);
    assert!(matches!(name, Err(SpectrumError::InvalidParameter(_))));

    // Other schemes handle critical damping
    let ok = calc_response_spectrum(&[0.5], 1.0, Integrator::NewmarkAverageAccel, &gm, 0.01);
    assert!(ok.is_ok());
}

#[test]
fn test_unsupported_integrator() {
    let gm = sine_pulse(0.01);
    let err = calc_response_spectrum_by_name(&[1.0], 0.05, "Wilson-theta", &gm, 0.01).unwrap_err();
    assert!(matches!(err, SpectrumError::UnsupportedIntegrator(ref name) if name == "Wilson-theta"));
}

#[test]
fn test_integrators_agree_on_smooth_motion() {
    let dt = 0.005;
    let gm: Vec<f64> = (0..2000)
        .map(|i| (2.0 * PI * 1.3 * i as f64 * dt).sin() * (-(i as f64) * dt / 4.0).exp())
        .collect();
    let periods = [0.3, 0.8, 2.0];
    let reference =
        calc_response_spectrum(&periods, 0.05, Integrator::LinearInterpolation, &gm, dt).unwrap();
    for integrator in [
        Integrator::CentralDifference,
        Integrator::NewmarkAverageAccel,
        Integrator::NewmarkLinearAccel,
    ] {
        let spectrum = calc_response_spectrum(&periods, 0.05, integrator, &gm, dt).unwrap();
        for (a, b) in spectrum.displacement.iter().zip(&reference.displacement) {
            assert_relative_eq!(*a, *b, max_relative = 0.02);
        }
    }
}

#[test]
fn test_free_vibration_history_for_all_schemes() {
    let system = SdofSystem::from_period(1.0, 0.0).unwrap();
    let force = vec![0.0; 500];
    for integrator in Integrator::ALL {
        let history = integrator
            .response_history(&system, InitialConditions::new(1.0, 0.0), 0.01, &force)
            .unwrap();
        assert_eq!(history.len(), 500);
        assert_abs_diff_eq!(history.displacement_extremes.max, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(history.displacement_extremes.min, -1.0, epsilon = 1e-3);
        // |v| peaks at ω·d0
        assert_relative_eq!(history.velocity_extremes.max, 2.0 * PI, max_relative = 1e-2);
    }
}
