use super::search::ExtremaSearch;
use super::MagSample;

/// Establishes the noise-to-motion threshold from the opening stretch of the
/// stream, which the caller must ensure is representative of an idle unit.
///
/// Consumes `num_thresh_checks` consecutive windows of `thresh_samples`
/// samples each, takes the per-window extrema diff sum, averages across the
/// windows and scales by `thresh_mult`. The threshold is immutable once set;
/// samples fed after that point are ignored.
pub struct NoiseThresholdCalibrator {
    thresh_samples: usize,
    num_thresh_checks: usize,
    thresh_mult: f64,
    extrema: ExtremaSearch,
    samples_into_check: usize,
    checks_done: usize,
    accumulated: f64,
    threshold: Option<f64>,
}

impl NoiseThresholdCalibrator {
    pub fn new(thresh_samples: usize, num_thresh_checks: usize, thresh_mult: f64) -> Self {
        Self {
            thresh_samples,
            num_thresh_checks,
            thresh_mult,
            extrema: ExtremaSearch::new(),
            samples_into_check: 0,
            checks_done: 0,
            accumulated: 0.0,
            threshold: None,
        }
    }

    pub fn is_calibrated(&self) -> bool {
        self.threshold.is_some()
    }

    /// The fixed threshold, once calibration has completed.
    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    pub fn feed(&mut self, sample: &MagSample) {
        if self.threshold.is_some() {
            return;
        }
        self.extrema.update(sample);
        self.samples_into_check += 1;
        if self.samples_into_check == self.thresh_samples {
            self.samples_into_check = 0;
            self.accumulated += self.extrema.diff_sum();
            self.extrema.reset();
            self.checks_done += 1;
            if self.checks_done == self.num_thresh_checks {
                // Noise average up to here; the multiplier turns it into the
                // motion threshold.
                let noise_avg = self.accumulated / self.num_thresh_checks as f64;
                self.threshold = Some(noise_avg * self.thresh_mult);
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.thresh_samples, self.num_thresh_checks, self.thresh_mult);
    }
}
