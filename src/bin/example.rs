//! Spectrum Example - synthetic ground motion swept with every integrator

use sdof_spectrum::prelude::*;
use std::f64::consts::PI;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== SDOF Spectrum Example ===\n");

    // Decaying 2.5 Hz sine, 0.35 g peak, 20 s at 200 Hz
    let dt = 0.005;
    let record = TimeSeriesRecord {
        name: "synthetic".to_string(),
        dt,
        data: (0..4000)
            .map(|i| {
                let t = i as f64 * dt;
                0.35 * (-0.3 * t).exp() * (2.0 * PI * 2.5 * t).sin()
            })
            .collect(),
        factor: 1.0,
        units: Some(AccelerationUnit::G),
    };
    let motion = GroundMotion::from_record(&record, GRAVITY)?;

    println!("Ground motion:");
    println!("  Steps:    {}", motion.num_steps());
    println!("  Duration: {:.2} s", motion.duration());
    println!("  PGA:      {:.3} g\n", motion.pga() / GRAVITY);

    let periods = PeriodRange::logarithmic(0.05, 4.0, 25).periods()?;

    for integrator in Integrator::ALL {
        let options = SpectrumOptions::new(0.05, integrator).parallel();
        let spectrum = ResponseSpectrum::compute(&periods, &motion, &options)?;

        println!("--- {} ---", integrator);
        println!("{:>10} {:>14} {:>12}", "T (s)", "Sd (m)", "Sa (g)");
        for point in spectrum.points().step_by(4) {
            println!(
                "{:>10.3} {:>14.6} {:>12.4}",
                point.period, point.displacement, point.acceleration
            );
        }
        if let Some(peak) = spectrum.peak_acceleration() {
            println!(
                "Peak Sa = {:.4} g at T = {:.3} s\n",
                peak.acceleration, peak.period
            );
        }
    }

    // Time history of a single oscillator
    let system = SdofSystem::from_period(0.4, 0.05)?;
    let history = Integrator::NewmarkAverageAccel.response_history(
        &system,
        InitialConditions::at_rest(),
        motion.dt,
        &motion.accelerations,
    )?;
    let (t0, t1) = history.time_bounds();
    println!("T = 0.4 s oscillator, {:.1}-{:.1} s:", t0, t1);
    println!(
        "  displacement in [{:.6}, {:.6}] m",
        history.displacement_extremes.min, history.displacement_extremes.max
    );
    println!(
        "  velocity     in [{:.6}, {:.6}] m/s",
        history.velocity_extremes.min, history.velocity_extremes.max
    );

    Ok(())
}
