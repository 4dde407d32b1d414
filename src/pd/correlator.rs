use alloc::{boxed::Box, vec};

use crate::common::History;

/// Maintains running sums of lagged products of a sliding window of the
/// conditioned signal, so that a normalized correlation profile can be
/// produced at any sample in O(lag count) time.
///
/// For each lag `t` in `min_lag..=max_lag`, `sums[t]` holds
/// `sum(y[k] * y[k - t])` for `k` in the last `window_size` samples. The
/// energy of the window ending at each sample is kept in a history parallel
/// to the samples, which makes the energy of the window delayed by `t`
/// available without additional sums.
pub(crate) struct Correlator {
    min_lag: usize,
    window_size: usize,
    samples: History<f32>,
    energies: History<f64>,
    energy: f64,
    sums: Box<[f64]>,
    /// Windows with less energy than this have zero similarity.
    min_energy: f64,
    /// Number of pushed samples, saturating at the history capacity.
    pushed_count: usize,
}

impl Correlator {
    pub(crate) fn new(min_lag: usize, max_lag: usize, window_size: usize, min_energy: f64) -> Self {
        assert!(min_lag >= 1 && min_lag <= max_lag);
        let capacity = window_size + max_lag + 1;
        Correlator {
            min_lag,
            window_size,
            samples: History::new(capacity),
            energies: History::new(capacity),
            energy: 0.0,
            sums: vec![0.0; max_lag - min_lag + 1].into_boxed_slice(),
            min_energy,
            pushed_count: 0,
        }
    }

    pub(crate) fn min_lag(&self) -> usize {
        self.min_lag
    }

    pub(crate) fn max_lag(&self) -> usize {
        self.min_lag + self.sums.len() - 1
    }

    pub(crate) fn lag_count(&self) -> usize {
        self.sums.len()
    }

    pub(crate) fn window_size(&self) -> usize {
        self.window_size
    }

    /// Sum of squares of the most recent `window_size` samples.
    pub(crate) fn energy(&self) -> f64 {
        self.energy
    }

    /// True once every sample the sums depend on has been pushed.
    pub(crate) fn is_primed(&self) -> bool {
        self.pushed_count >= self.samples.capacity()
    }

    pub(crate) fn push(&mut self, sample: f32) {
        self.samples.push(sample);

        let window_size = self.window_size;
        let x = sample as f64;
        let expired = self.samples.ago(window_size) as f64;

        self.energy += x * x - expired * expired;
        if self.energy < 0.0 {
            self.energy = 0.0;
        }
        self.energies.push(self.energy);

        let samples = &self.samples;
        for (offset, sum) in self.sums.iter_mut().enumerate() {
            let lag = self.min_lag + offset;
            let entering = x * samples.ago(lag) as f64;
            let leaving = expired * samples.ago(window_size + lag) as f64;
            *sum += entering - leaving;
        }

        if self.pushed_count < self.samples.capacity() {
            self.pushed_count += 1;
        }
    }

    /// Writes the similarity of the current window and the window delayed by
    /// each lag to `profile`, where index 0 corresponds to `min_lag`.
    /// Similarity is `(1 + r) / 2`, where `r` is the normalized correlation.
    pub(crate) fn compute_profile(&self, profile: &mut [f32]) {
        assert_eq!(profile.len(), self.sums.len());
        let current = self.energy;
        for (offset, (value, sum)) in profile.iter_mut().zip(self.sums.iter()).enumerate() {
            let delayed = self.energies.ago(self.min_lag + offset);
            *value = if current < self.min_energy || delayed < self.min_energy {
                0.0
            } else {
                let r = sum / libm::sqrt(current * delayed);
                (0.5 * (1.0 + r)).max(0.0).min(1.0) as f32
            };
        }
    }

    /// Polarity similarity of the current window and the window delayed by a
    /// fractional `lag`, in [0, 1]. Each sample is weighted by the sign of
    /// its counterpart in the other window:
    ///
    /// `(1 + sum(a sgn(b) + b sgn(a)) / sum(|a| + |b|)) / 2`
    ///
    /// Unlike the profile, this depends on where the zero crossings of the
    /// two windows fall, not only on how their energy is spread over
    /// harmonics. The delayed window is linearly interpolated.
    pub(crate) fn polarity_similarity(&self, lag: f32) -> f32 {
        assert!(lag >= 0.0 && lag < self.max_lag() as f32);
        if self.energy < self.min_energy {
            return 0.0;
        }
        let whole = lag as usize;
        let fraction = lag - whole as f32;

        let mut correlation = 0.0;
        let mut magnitude = 0.0;
        for k in 0..self.window_size {
            let a = self.samples.ago(k);
            let b = (1.0 - fraction) * self.samples.ago(k + whole)
                + fraction * self.samples.ago(k + whole + 1);
            correlation += (a * signum(b) + b * signum(a)) as f64;
            magnitude += (a.abs() + b.abs()) as f64;
        }
        if magnitude <= 0.0 {
            return 0.0;
        }
        (0.5 * (1.0 + correlation / magnitude)).max(0.0).min(1.0) as f32
    }

    pub(crate) fn reset(&mut self) {
        self.samples.clear();
        self.energies.clear();
        self.energy = 0.0;
        for sum in self.sums.iter_mut() {
            *sum = 0.0;
        }
        self.pushed_count = 0;
    }
}

/// Like `f32::signum`, but 0 for 0.
fn signum(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Detects cycle boundaries, i.e. positive going crossings of the band
/// `[-gate, gate]`. A boundary requires that the signal was last seen below
/// `-gate` and is now above `gate`, so signals that never leave the band
/// produce no boundaries.
pub(crate) struct Hysteresis {
    gate: f32,
    /// -1 below the band, 1 above it, 0 before the band is first left.
    state: i8,
}

impl Hysteresis {
    pub(crate) fn new(gate: f32) -> Self {
        Hysteresis { gate, state: 0 }
    }

    /// Returns true if `sample` completes a cycle.
    pub(crate) fn update(&mut self, sample: f32) -> bool {
        if sample > self.gate {
            let is_boundary = self.state == -1;
            self.state = 1;
            is_boundary
        } else {
            if sample < -self.gate {
                self.state = -1;
            }
            false
        }
    }

    pub(crate) fn output(&self) -> f32 {
        self.state as f32
    }

    pub(crate) fn reset(&mut self) {
        self.state = 0;
    }
}
