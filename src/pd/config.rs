use crate::error::{Error, Result};

/// Session parameters of a [`PeriodDetector`](super::PeriodDetector).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// The lowest detectable frequency in Hz. Determines the longest detectable period.
    pub lowest_frequency: f32,
    /// The highest detectable frequency in Hz. Determines the shortest detectable period.
    pub highest_frequency: f32,
    /// The sample rate in Hz.
    pub sample_rate: f32,
    /// Signals below this level, in dB relative to full scale, are ignored.
    pub threshold_db: f32,
}

impl Config {
    pub fn new(
        lowest_frequency: f32,
        highest_frequency: f32,
        sample_rate: f32,
        threshold_db: f32,
    ) -> Self {
        Config {
            lowest_frequency,
            highest_frequency,
            sample_rate,
            threshold_db,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(Error::InvalidSampleRate(self.sample_rate));
        }
        for frequency in [self.lowest_frequency, self.highest_frequency].iter() {
            if !(frequency.is_finite() && *frequency > 0.0) {
                return Err(Error::InvalidFrequency(*frequency));
            }
        }
        if self.lowest_frequency >= self.highest_frequency {
            return Err(Error::InvertedFrequencyRange {
                lowest: self.lowest_frequency,
                highest: self.highest_frequency,
            });
        }
        let nyquist = 0.5 * self.sample_rate;
        if self.highest_frequency > nyquist {
            return Err(Error::AboveNyquist {
                highest: self.highest_frequency,
                nyquist,
            });
        }
        if !self.threshold_db.is_finite() {
            return Err(Error::InvalidThreshold(self.threshold_db));
        }
        Ok(())
    }

    /// The shortest detectable period in samples.
    pub fn min_period(&self) -> f64 {
        self.sample_rate as f64 / self.highest_frequency as f64
    }

    /// The longest detectable period in samples.
    pub fn max_period(&self) -> f64 {
        self.sample_rate as f64 / self.lowest_frequency as f64
    }
}

/// Constants controlling how candidates are picked from the correlation
/// profile. The defaults work well for musical signals.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Tuning {
    /// Peaks weaker than this are never principal candidates.
    pub min_periodicity: f32,
    /// Peaks within this distance of the strongest peak are considered equally strong.
    pub tolerance: f32,
    /// Relative tolerance used when testing if one period is an integer
    /// multiple of another, and when snapping the secondary candidate to
    /// half the principal period.
    pub harmonic_tolerance: f32,
    /// Peaks that rise less than this above the lower of their neighboring
    /// minima are ignored.
    pub min_prominence: f32,
    /// Secondary candidates with a lower polarity similarity are rejected.
    pub secondary_periodicity: f32,
    /// Secondary candidates are searched for in the period range
    /// `[min_secondary_ratio, max_secondary_ratio] * principal period`.
    pub min_secondary_ratio: f32,
    pub max_secondary_ratio: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            min_periodicity: 0.8,
            tolerance: 0.005,
            harmonic_tolerance: 0.05,
            min_prominence: 0.05,
            secondary_periodicity: 0.8,
            min_secondary_ratio: 0.4,
            max_secondary_ratio: 0.6,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<()> {
        let in_unit_range = |value: f32| (0.0..=1.0).contains(&value);
        if !in_unit_range(self.min_periodicity) {
            return Err(Error::InvalidTuning("min_periodicity must be in [0, 1]"));
        }
        if !in_unit_range(self.secondary_periodicity) {
            return Err(Error::InvalidTuning("secondary_periodicity must be in [0, 1]"));
        }
        if !in_unit_range(self.min_prominence) {
            return Err(Error::InvalidTuning("min_prominence must be in [0, 1]"));
        }
        if !in_unit_range(self.tolerance) {
            return Err(Error::InvalidTuning("tolerance must be in [0, 1]"));
        }
        if !(self.harmonic_tolerance >= 0.0 && self.harmonic_tolerance < 0.5) {
            return Err(Error::InvalidTuning("harmonic_tolerance must be in [0, 0.5)"));
        }
        if !(self.min_secondary_ratio > 0.0
            && self.min_secondary_ratio < self.max_secondary_ratio
            && self.max_secondary_ratio < 1.0)
        {
            return Err(Error::InvalidTuning(
                "secondary ratios must satisfy 0 < min < max < 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = Config::new(100.0, 400.0, 44100.0, -60.0);
        assert_eq!(config.validate(), Ok(()));
        assert!((config.min_period() - 110.25).abs() < 1e-9);
        assert!((config.max_period() - 441.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_sample_rate() {
        for sample_rate in [0.0, -44100.0, f32::NAN, f32::INFINITY].iter() {
            let config = Config::new(100.0, 400.0, *sample_rate, -60.0);
            assert!(matches!(config.validate(), Err(Error::InvalidSampleRate(_))));
        }
    }

    #[test]
    fn test_invalid_frequencies() {
        let config = Config::new(0.0, 400.0, 44100.0, -60.0);
        assert_eq!(config.validate(), Err(Error::InvalidFrequency(0.0)));
        let config = Config::new(100.0, f32::INFINITY, 44100.0, -60.0);
        assert_eq!(config.validate(), Err(Error::InvalidFrequency(f32::INFINITY)));
        let config = Config::new(400.0, 400.0, 44100.0, -60.0);
        assert_eq!(
            config.validate(),
            Err(Error::InvertedFrequencyRange {
                lowest: 400.0,
                highest: 400.0
            })
        );
        let config = Config::new(100.0, 30000.0, 44100.0, -60.0);
        assert_eq!(
            config.validate(),
            Err(Error::AboveNyquist {
                highest: 30000.0,
                nyquist: 22050.0
            })
        );
    }

    #[test]
    fn test_invalid_threshold() {
        let config = Config::new(100.0, 400.0, 44100.0, f32::NEG_INFINITY);
        assert!(matches!(config.validate(), Err(Error::InvalidThreshold(_))));
        assert!(config.validate().unwrap_err().is_config_error());
    }

    #[test]
    fn test_tuning_validation() {
        assert_eq!(Tuning::default().validate(), Ok(()));

        let tuning = Tuning {
            min_periodicity: 1.5,
            ..Tuning::default()
        };
        assert!(matches!(tuning.validate(), Err(Error::InvalidTuning(_))));
        assert!(!tuning.validate().unwrap_err().is_config_error());

        let tuning = Tuning {
            min_prominence: -0.1,
            ..Tuning::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(Error::InvalidTuning("min_prominence must be in [0, 1]"))
        );

        let tuning = Tuning {
            min_secondary_ratio: 0.6,
            max_secondary_ratio: 0.4,
            ..Tuning::default()
        };
        assert!(matches!(tuning.validate(), Err(Error::InvalidTuning(_))));
    }
}
