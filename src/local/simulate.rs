use colored::Colorize;
use rand::Rng;
use std::f64::consts::TAU;

use crate::processing::rotation_detector::RotationDetector;
use crate::processing::{Indicator, MagSample};

const SAMPLE_PERIOD: f64 = 0.5;
const NOISE_AMPLITUDE: f64 = 0.4;

// Pump stroke: ~12 strokes per minute on the fast window's timescale.
const STROKE_AMPLITUDE: f64 = 25.0;
const STROKE_PERIOD: f64 = 5.0;

// Rod rotation: a slow, large swing of the ambient field per axis.
const ROTATION_AMPLITUDE: f64 = 60.0;
const ROTATION_PERIOD: f64 = 900.0;

const IDLE_UNTIL: f64 = 400.0;
const ROTATION_FROM: f64 = 2000.0;
const SIM_END: f64 = 4800.0;

fn colorize(indicator: Indicator) -> colored::ColoredString {
    match indicator {
        Indicator::Undetermined => "undetermined".white(),
        Indicator::No => "no".red(),
        Indicator::Yes => "yes".green(),
    }
}

/// Synthesizes a full day-in-the-life stream (idle, then pumping, then
/// pumping with the rod turning) and replays it through the detector,
/// printing each indicator change. A quick end-to-end sanity check without
/// field data.
pub fn run() {
    let mut rng = rand::thread_rng();
    let mut detector = RotationDetector::with_defaults();

    let mut last_state = (Indicator::Undetermined, Indicator::Undetermined);
    let mut t = 0.0;
    while t <= SIM_END {
        let stroke = if t > IDLE_UNTIL {
            STROKE_AMPLITUDE * (TAU * t / STROKE_PERIOD).sin()
        } else {
            0.0
        };
        let rotation = if t > ROTATION_FROM {
            ROTATION_AMPLITUDE * (TAU * t / ROTATION_PERIOD).sin()
        } else {
            0.0
        };

        let sample = MagSample::new(
            stroke + rotation + rng.gen_range(-NOISE_AMPLITUDE..NOISE_AMPLITUDE),
            0.6 * stroke - 0.8 * rotation + rng.gen_range(-NOISE_AMPLITUDE..NOISE_AMPLITUDE),
            -0.3 * stroke + 0.2 * rotation + rng.gen_range(-NOISE_AMPLITUDE..NOISE_AMPLITUDE),
            t,
        );
        detector.process(&sample);

        let state = (detector.moving(), detector.rotating());
        if state != last_state {
            println!(
                "t={:>7.1}s  moving: {:<12}  rotating: {}",
                t,
                colorize(state.0),
                colorize(state.1)
            );
            last_state = state;
        }

        t += SAMPLE_PERIOD;
    }

    println!(
        "simulation done   moving: {:<12}  rotating: {}",
        colorize(detector.moving()),
        colorize(detector.rotating())
    );
}
