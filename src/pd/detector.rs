use alloc::{boxed::Box, vec};
use log::{debug, trace, warn};

use super::candidate::{select_candidates, Candidate};
use super::conditioner::Conditioner;
use super::config::{Config, Tuning};
use super::correlator::{Correlator, Hysteresis};
use super::latch::{Latch, LatchState};
use super::peak::{find_peaks, max_peak_count, Peak};
use crate::common::{db_to_amplitude, energy_to_db};
use crate::error::Result;

/// Estimates the period of a monophonic signal, one sample at a time.
///
/// The input is high pass filtered to remove DC, after which running sums of
/// lagged products over a window of one maximum period are kept up to date
/// for every admissible lag. Each time the filtered signal completes a cycle
/// (a positive going crossing of a hysteresis band set by the sensitivity
/// threshold), the sums are normalized into a similarity profile, its peaks
/// are located and a principal and a secondary candidate are latched. The
/// secondary (octave) candidate must also resemble the current cycle in
/// polarity, so a phase shifted second harmonic is not mistaken for one.
pub struct PeriodDetector {
    config: Config,
    tuning: Tuning,
    conditioner: Conditioner,
    correlator: Correlator,
    hysteresis: Hysteresis,
    /// Similarity for lags `min_lag..=max_lag`, computed at the last boundary.
    profile: Box<[f32]>,
    peaks: Box<[Peak]>,
    peak_count: usize,
    latch: Latch,
}

impl PeriodDetector {
    /// Creates a detector for frequencies between `lowest_frequency` and
    /// `highest_frequency` Hz, ignoring signals below `threshold_db` dBFS.
    pub fn new(
        lowest_frequency: f32,
        highest_frequency: f32,
        sample_rate: f32,
        threshold_db: f32,
    ) -> Result<Self> {
        PeriodDetector::from_config(
            Config::new(lowest_frequency, highest_frequency, sample_rate, threshold_db),
            Tuning::default(),
        )
    }

    pub fn from_config(config: Config, tuning: Tuning) -> Result<Self> {
        if let Err(error) = config.validate().and_then(|_| tuning.validate()) {
            warn!("Rejected period detector configuration {:?}: {}", config, error);
            return Err(error);
        }

        // One guard lag on each side of the period range, so that peaks at
        // the range limits have neighbors.
        let min_lag = (libm::floor(config.min_period()) as usize)
            .saturating_sub(1)
            .max(1);
        let max_period = libm::ceil(config.max_period()) as usize;
        let max_lag = max_period + 1;
        let window_size = max_period + 1;

        let gate = db_to_amplitude(config.threshold_db);
        let min_energy = (gate as f64) * (gate as f64) * (window_size as f64);
        let correlator = Correlator::new(min_lag, max_lag, window_size, min_energy);
        let lag_count = correlator.lag_count();

        debug!(
            "Period detector lags {}..={}, window {} samples, gate {}",
            min_lag, max_lag, window_size, gate
        );

        Ok(PeriodDetector {
            config,
            tuning,
            conditioner: Conditioner::new(config.sample_rate, config.lowest_frequency),
            correlator,
            hysteresis: Hysteresis::new(gate),
            profile: vec![0.0; lag_count].into_boxed_slice(),
            peaks: vec![Peak::new(); max_peak_count(lag_count)].into_boxed_slice(),
            peak_count: 0,
            latch: Latch::new(),
        })
    }

    /// Processes a single input sample. Returns which side of the hysteresis
    /// band the filtered signal was last seen on (-1 or 1, 0 before the band
    /// was first left), which is useful for visualization.
    pub fn process(&mut self, sample: f32) -> f32 {
        self.latch.advance();

        let filtered = self.conditioner.process(sample);
        self.correlator.push(filtered);
        let is_boundary = self.hysteresis.update(filtered);

        if is_boundary && self.correlator.is_primed() {
            self.analyze();
        }

        self.hysteresis.output()
    }

    fn analyze(&mut self) {
        let first_lag = self.correlator.min_lag();
        self.correlator.compute_profile(&mut self.profile);
        self.peak_count = find_peaks(&self.profile, first_lag, &mut self.peaks);

        let correlator = &self.correlator;
        let (first, second) = select_candidates(
            &self.peaks[..self.peak_count],
            &self.tuning,
            |lag| correlator.polarity_similarity(lag),
        );
        trace!(
            "Latched {:?} {:?} from {} peaks",
            first,
            second,
            self.peak_count
        );
        self.latch.latch(first, second);
    }

    /// True if the most recent call to `process` latched a new candidate pair.
    pub fn is_ready(&self) -> bool {
        self.latch.state() == LatchState::Ready
    }

    pub fn state(&self) -> LatchState {
        self.latch.state()
    }

    /// The most recently latched principal candidate.
    pub fn first(&self) -> Candidate {
        self.latch.first()
    }

    /// The most recently latched secondary (octave) candidate.
    pub fn second(&self) -> Candidate {
        self.latch.second()
    }

    /// The similarity profile computed at the most recent cycle boundary.
    /// Index 0 corresponds to a lag of `min_lag()` samples.
    pub fn profile(&self) -> &[f32] {
        &self.profile
    }

    /// The profile peaks found at the most recent cycle boundary, ordered
    /// by increasing lag.
    pub fn peaks(&self) -> &[Peak] {
        &self.peaks[..self.peak_count]
    }

    pub fn min_lag(&self) -> usize {
        self.correlator.min_lag()
    }

    pub fn max_lag(&self) -> usize {
        self.correlator.max_lag()
    }

    /// The shortest detectable period in samples.
    pub fn min_period(&self) -> f32 {
        self.config.min_period() as f32
    }

    /// The longest detectable period in samples.
    pub fn max_period(&self) -> f32 {
        self.config.max_period() as f32
    }

    /// The RMS level of the analysis window, in dBFS.
    pub fn level_db(&self) -> f32 {
        energy_to_db(self.correlator.energy(), self.correlator.window_size())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn sample_rate(&self) -> f32 {
        self.config.sample_rate
    }

    /// Restores the state of a newly created detector.
    pub fn reset(&mut self) {
        self.conditioner.reset();
        self.correlator.reset();
        self.hysteresis.reset();
        self.latch.reset();
        for value in self.profile.iter_mut() {
            *value = 0.0;
        }
        self.peak_count = 0;
    }
}
