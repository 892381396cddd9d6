use super::MagSample;

// Sentinel extrema: any plausible field reading beats these.
const INIT_MAX_SEARCH: f64 = -1e6;
const INIT_MIN_SEARCH: f64 = 1e6;

// EXTREMA SEARCH --------------------------------------------------------------

/// Per-axis running max/min over the samples seen since the last reset.
#[derive(Debug, Clone, Copy)]
pub struct ExtremaSearch {
    x_max: f64,
    x_min: f64,
    y_max: f64,
    y_min: f64,
    z_max: f64,
    z_min: f64,
}

impl ExtremaSearch {
    pub fn new() -> Self {
        Self {
            x_max: INIT_MAX_SEARCH,
            x_min: INIT_MIN_SEARCH,
            y_max: INIT_MAX_SEARCH,
            y_min: INIT_MIN_SEARCH,
            z_max: INIT_MAX_SEARCH,
            z_min: INIT_MIN_SEARCH,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Folds one sample into the extrema. Plain comparisons are deliberate:
    /// a NaN reading fails both and leaves that axis untouched, matching the
    /// deployed behavior.
    pub fn update(&mut self, sample: &MagSample) {
        if sample.mag_x > self.x_max {
            self.x_max = sample.mag_x;
        }
        if sample.mag_x < self.x_min {
            self.x_min = sample.mag_x;
        }
        if sample.mag_y > self.y_max {
            self.y_max = sample.mag_y;
        }
        if sample.mag_y < self.y_min {
            self.y_min = sample.mag_y;
        }
        if sample.mag_z > self.z_max {
            self.z_max = sample.mag_z;
        }
        if sample.mag_z < self.z_min {
            self.z_min = sample.mag_z;
        }
    }

    /// Sum over the three axes of (max - min) since the last reset.
    pub fn diff_sum(&self) -> f64 {
        (self.x_max + self.y_max + self.z_max) - (self.x_min + self.y_min + self.z_min)
    }
}

// TIMED SEARCH ----------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchStatus {
    NeedsInit,
    Updating,
}

/// One time-windowed extrema search. Both the fast (moving) and slow
/// (rotating) checks are instances of this machine; only the window length
/// and what the caller does with the closing diff sum differ.
///
/// Windowing is driven entirely by sample timestamps, never wall clock.
#[derive(Debug, Clone)]
pub struct TimedSearch {
    window_seconds: f64,
    status: SearchStatus,
    end_time: f64,
    extrema: ExtremaSearch,
}

impl TimedSearch {
    pub fn new(window_seconds: f64) -> Self {
        Self {
            window_seconds,
            status: SearchStatus::NeedsInit,
            end_time: 0.0,
            extrema: ExtremaSearch::new(),
        }
    }

    /// Advances the machine by one sample.
    ///
    /// The sample that arms a fresh window only sets the window end; extrema
    /// tracking starts with the next sample. A window closes when a sample
    /// lands strictly past the window end (that sample is still folded in
    /// first), and the machine re-arms on the following call. Returns the
    /// window's diff sum at close.
    pub fn feed(&mut self, sample: &MagSample) -> Option<f64> {
        match self.status {
            SearchStatus::NeedsInit => {
                self.extrema.reset();
                self.end_time = sample.timestamp + self.window_seconds;
                self.status = SearchStatus::Updating;
                None
            }
            SearchStatus::Updating => {
                self.extrema.update(sample);
                if sample.timestamp > self.end_time {
                    self.status = SearchStatus::NeedsInit;
                    Some(self.extrema.diff_sum())
                } else {
                    None
                }
            }
        }
    }

    /// Abandons the current window; the next feed starts a fresh one.
    pub fn rearm(&mut self) {
        self.status = SearchStatus::NeedsInit;
    }
}

// HISTORY BUFFER --------------------------------------------------------------

/// Bounded ring of recent fast-window diff sums. Once full, each push
/// overwrites the oldest entry; `iter` visits only filled slots.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    buffer: Vec<f64>,
    capacity: usize,
    next: usize,
    filled: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity],
            capacity,
            next: 0,
            filled: 0,
        }
    }

    pub fn push(&mut self, value: f64) {
        self.buffer[self.next] = value;
        self.next = (self.next + 1) % self.capacity;
        if self.filled < self.capacity {
            self.filled += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    pub fn clear(&mut self) {
        self.next = 0;
        self.filled = 0;
    }

    /// Iterates the filled entries, oldest-first order not guaranteed.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.buffer[..self.filled].iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: f64, y: f64, z: f64, t: f64) -> MagSample {
        MagSample::new(x, y, z, t)
    }

    #[test]
    fn extrema_diff_sum_spans_all_axes() {
        let mut search = ExtremaSearch::new();
        search.update(&sample(1.0, -2.0, 5.0, 0.0));
        search.update(&sample(3.0, 4.0, 5.0, 1.0));
        // x: 3-1, y: 4-(-2), z: 5-5
        assert_eq!(search.diff_sum(), 2.0 + 6.0 + 0.0);
    }

    #[test]
    fn nan_reading_does_not_update_extrema() {
        let mut search = ExtremaSearch::new();
        search.update(&sample(1.0, 1.0, 1.0, 0.0));
        search.update(&sample(f64::NAN, 2.0, 1.0, 1.0));
        // The NaN on x is ignored; y still widens.
        assert_eq!(search.diff_sum(), 0.0 + 1.0 + 0.0);
    }

    #[test]
    fn window_opens_on_first_sample_without_tracking_it() {
        let mut search = TimedSearch::new(60.0);
        assert_eq!(search.feed(&sample(100.0, 0.0, 0.0, 0.0)), None);
        assert_eq!(search.feed(&sample(0.0, 0.0, 0.0, 1.0)), None);
        assert_eq!(search.feed(&sample(2.0, 0.0, 0.0, 2.0)), None);
        // Closes at t > 60; the arming sample's 100.0 never entered the extrema.
        assert_eq!(search.feed(&sample(0.0, 0.0, 0.0, 61.0)), Some(2.0));
    }

    #[test]
    fn window_closes_strictly_after_end_never_on_equal() {
        let mut search = TimedSearch::new(60.0);
        search.feed(&sample(0.0, 0.0, 0.0, 10.0)); // arms, end = 70
        assert_eq!(search.feed(&sample(5.0, 0.0, 0.0, 70.0)), None);
        assert_eq!(search.feed(&sample(0.0, 0.0, 0.0, 70.1)), Some(5.0));
    }

    #[test]
    fn rearm_discards_current_window() {
        let mut search = TimedSearch::new(60.0);
        search.feed(&sample(0.0, 0.0, 0.0, 0.0));
        search.feed(&sample(9.0, 0.0, 0.0, 1.0));
        search.rearm();
        // Fresh window: previous extrema are gone.
        search.feed(&sample(0.0, 0.0, 0.0, 2.0));
        search.feed(&sample(1.0, 0.0, 0.0, 3.0));
        assert_eq!(search.feed(&sample(1.0, 0.0, 0.0, 63.0)), Some(0.0));
    }

    #[test]
    fn ring_buffer_caps_len_and_overwrites_oldest() {
        let mut ring = RingBuffer::new(5);
        for v in 1..=7 {
            ring.push(v as f64);
            assert!(ring.len() <= 5);
        }
        assert_eq!(ring.len(), 5);
        // 1.0 and 2.0 were overwritten by 6.0 and 7.0.
        let sum: f64 = ring.iter().sum();
        assert_eq!(sum, 3.0 + 4.0 + 5.0 + 6.0 + 7.0);
    }

    #[test]
    fn ring_buffer_clear_empties_it() {
        let mut ring = RingBuffer::new(5);
        ring.push(1.0);
        ring.push(2.0);
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.iter().count(), 0);
        ring.push(3.0);
        assert_eq!(ring.len(), 1);
    }
}
