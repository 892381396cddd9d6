use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::{NaiveTime, Timelike};
use colored::Colorize;

use crate::config::{self, DetectorSettings};
use crate::processing::rotation_detector::RotationDetector;
use crate::processing::{Indicator, MagSample};
use crate::utils::log::log_to_file;

/// Parses one pump log line of the form
/// `magnetometer, HH:MM:SS:frac, x, y, z`. Lines for other instruments
/// (position, load, ...) and malformed lines yield None.
fn parse_log_line(line: &str) -> Option<MagSample> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 5 || !fields[0].contains("magnetometer") {
        return None;
    }
    let timestamp = parse_time_of_day(fields[1])?;
    let mag_x: f64 = fields[2].parse().ok()?;
    let mag_y: f64 = fields[3].parse().ok()?;
    let mag_z: f64 = fields[4].parse().ok()?;
    Some(MagSample::new(mag_x, mag_y, mag_z, timestamp))
}

/// Converts an `HH:MM:SS:frac` stamp to seconds since midnight. The loggers
/// only record time of day, so a session is assumed to stay within one
/// calendar day; rollover behavior is undefined upstream.
fn parse_time_of_day(stamp: &str) -> Option<f64> {
    let (hms, frac) = stamp.rsplit_once(':')?;
    let time = NaiveTime::parse_from_str(hms, "%H:%M:%S").ok()?;
    if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let frac_seconds: f64 = format!("0.{}", frac).parse().ok()?;
    Some(f64::from(time.num_seconds_from_midnight()) + frac_seconds)
}

fn colorize(indicator: Indicator) -> colored::ColoredString {
    match indicator {
        Indicator::Undetermined => "undetermined".white(),
        Indicator::No => "no".red(),
        Indicator::Yes => "yes".green(),
    }
}

/// Replays a pump log file through the detector, appending every indicator
/// change to `indicators.csv` and printing a colored summary.
pub fn run(log_path: &str, settings_path: Option<&str>) -> Result<(), Box<dyn Error>> {
    if !Path::new(log_path).exists() {
        return Err(format!("Log file not found at path: {}", log_path).into());
    }

    let settings = match settings_path {
        Some(path) => config::load_settings(path)?,
        None => DetectorSettings::default(),
    };
    let mut detector = RotationDetector::new(settings);

    let mut writer = csv::Writer::from_path("indicators.csv")?;
    writer.write_record(["timestamp_s", "moving", "rotating"])?;

    let file = File::open(log_path)?;
    let reader = BufReader::new(file);

    let mut samples_fed: usize = 0;
    let mut skipped: usize = 0;
    let mut last_state = (Indicator::Undetermined, Indicator::Undetermined);

    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        let sample = match parse_log_line(&line) {
            Some(sample) => sample,
            None => {
                if line.contains("magnetometer") {
                    skipped += 1;
                    eprintln!(
                        "{}",
                        format!("skipping malformed magnetometer line {}", line_number + 1)
                            .yellow()
                    );
                }
                continue;
            }
        };

        detector.process(&sample);
        samples_fed += 1;

        let state = (detector.moving(), detector.rotating());
        if state != last_state {
            writer.write_record([
                format!("{:.3}", sample.timestamp),
                state.0.to_string(),
                state.1.to_string(),
            ])?;
            let message = format!(
                "t={:.1}s moving={} rotating={}",
                sample.timestamp, state.0, state.1
            );
            log_to_file("indicator_changes.log", &message)?;
            println!(
                "t={:>9.1}s  moving: {:<12}  rotating: {}",
                sample.timestamp,
                colorize(state.0),
                colorize(state.1)
            );
            last_state = state;
        }
    }
    writer.flush()?;

    println!(
        "{} samples processed, {} malformed lines skipped",
        samples_fed, skipped
    );
    println!(
        "final state   moving: {:<12}  rotating: {}",
        colorize(detector.moving()),
        colorize(detector.rotating())
    );

    Ok(())
}
