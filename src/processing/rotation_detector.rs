use crate::config::DetectorSettings;

use super::calibration::NoiseThresholdCalibrator;
use super::search::{RingBuffer, TimedSearch};
use super::{Indicator, MagSample};

// ROTATION DETECTOR -----------------------------------------------------------

/// Detects, from a magnetometer stream alone, whether a pump unit is moving
/// and whether its rod is rotating.
///
/// Two checks run at different speeds. A fast check (60 s windows by default)
/// compares each window's extrema diff sum against the calibrated noise
/// threshold to decide "moving", and feeds a rolling history of fast diff
/// sums. A slow check (20 min windows) runs only while moving and decides
/// "rotating" when its diff sum is sufficiently larger than the history
/// average: the slow undulations of the pump stroke are superimposed on much
/// larger per-axis field swings when the rod turns.
///
/// One instance per pump unit; single writer, no internal locking. Feed
/// samples in timestamp order through `process` and poll the latched
/// indicators at any time.
pub struct RotationDetector {
    settings: DetectorSettings,
    calibrator: NoiseThresholdCalibrator,
    moving_search: TimedSearch,
    rotating_search: TimedSearch,
    moving_history: RingBuffer,
    moving: Indicator,
    rotating: Indicator,
}

impl RotationDetector {
    pub fn new(settings: DetectorSettings) -> Self {
        let calibrator = NoiseThresholdCalibrator::new(
            settings.thresh_samples,
            settings.num_thresh_checks,
            settings.moving_thresh_mult,
        );
        let moving_search = TimedSearch::new(settings.moving_check_seconds);
        let rotating_search = TimedSearch::new(settings.rotating_check_seconds);
        let moving_history = RingBuffer::new(settings.moving_history_capacity);
        Self {
            settings,
            calibrator,
            moving_search,
            rotating_search,
            moving_history,
            moving: Indicator::Undetermined,
            rotating: Indicator::Undetermined,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DetectorSettings::default())
    }

    /// Routes one sample through calibration, the fast moving check and,
    /// while moving, the slow rotating check. Call once per sample in
    /// arrival order; timestamps must be non-decreasing.
    pub fn process(&mut self, sample: &MagSample) {
        let threshold = match self.calibrator.threshold() {
            Some(threshold) => threshold,
            None => {
                self.calibrator.feed(sample);
                return;
            }
        };

        if let Some(diff_sum) = self.moving_search.feed(sample) {
            if diff_sum > threshold {
                self.moving = Indicator::Yes;
                self.moving_history.push(diff_sum);
            } else {
                self.moving = Indicator::No;
                self.moving_history.clear();
                // Not moving, so the rod cannot be rotating.
                self.rotating = Indicator::No;
                self.rotating_search.rearm();
            }
        }

        // Gated on the latched indicator: the sample that just latched
        // "moving" also arms the slow window.
        if self.moving == Indicator::Yes {
            if let Some(slow_diff_sum) = self.rotating_search.feed(sample) {
                let rotating = apparent_rotation(
                    slow_diff_sum,
                    &self.moving_history,
                    self.settings.rotating_check_mult,
                );
                self.rotating = if rotating { Indicator::Yes } else { Indicator::No };
            }
        }
    }

    pub fn moving(&self) -> Indicator {
        self.moving
    }

    pub fn rotating(&self) -> Indicator {
        self.rotating
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibrator.is_calibrated()
    }

    /// The calibrated noise-to-motion threshold, once set.
    pub fn threshold(&self) -> Option<f64> {
        self.calibrator.threshold()
    }

    /// Returns the detector to its freshly constructed state so an
    /// independent stream can be analyzed, calibration included.
    pub fn reset(&mut self) {
        *self = Self::new(self.settings.clone());
    }
}

/// Slow-window decision. Scaling the slow side by the history fill count
/// instead of dividing the fast side avoids the average; with an empty
/// history both sides are zero and the answer is No until at least one fast
/// window has landed.
fn apparent_rotation(slow_diff_sum: f64, history: &RingBuffer, check_mult: f64) -> bool {
    let compare_val: f64 = history.iter().sum();
    let count = history.len() as f64;
    slow_diff_sum * count > check_mult * compare_val
}
