use crate::config::DetectorSettings;
use crate::processing::rotation_detector::RotationDetector;
use crate::processing::{Indicator, MagSample};

use pyo3::prelude::*;

// Indicator codes the field tooling expects:
// 1 = undetermined, 2 = no, 3 = yes.
fn indicator_code(indicator: Indicator) -> u8 {
    match indicator {
        Indicator::Undetermined => 1,
        Indicator::No => 2,
        Indicator::Yes => 3,
    }
}

#[pyclass]
pub struct PyRotationDetector {
    detector: RotationDetector,
}

#[pymethods]
impl PyRotationDetector {
    #[new]
    #[pyo3(signature = (
        thresh_samples = 10,
        num_thresh_checks = 20,
        moving_check_seconds = 60.0,
        moving_history_capacity = 5,
        moving_thresh_mult = 5.0,
        rotating_check_seconds = 1200.0,
        rotating_check_mult = 2.0
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        thresh_samples: usize,
        num_thresh_checks: usize,
        moving_check_seconds: f64,
        moving_history_capacity: usize,
        moving_thresh_mult: f64,
        rotating_check_seconds: f64,
        rotating_check_mult: f64,
    ) -> Self {
        let settings = DetectorSettings {
            thresh_samples,
            num_thresh_checks,
            moving_check_seconds,
            moving_history_capacity,
            moving_thresh_mult,
            rotating_check_seconds,
            rotating_check_mult,
        };
        PyRotationDetector {
            detector: RotationDetector::new(settings),
        }
    }

    /// Feed one magnetometer sample; timestamp in seconds.
    pub fn process(&mut self, mag_x: f64, mag_y: f64, mag_z: f64, timestamp: f64) {
        self.detector
            .process(&MagSample::new(mag_x, mag_y, mag_z, timestamp));
    }

    /// 1 = undetermined, 2 = no, 3 = yes.
    pub fn moving(&self) -> u8 {
        indicator_code(self.detector.moving())
    }

    /// 1 = undetermined, 2 = no, 3 = yes.
    pub fn rotating(&self) -> u8 {
        indicator_code(self.detector.rotating())
    }

    pub fn is_calibrated(&self) -> bool {
        self.detector.is_calibrated()
    }

    pub fn reset(&mut self) {
        self.detector.reset();
    }
}
