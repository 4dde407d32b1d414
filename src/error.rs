use thiserror::Error;

/// Errors reported when constructing a [`PeriodDetector`](crate::PeriodDetector).
/// Processing itself never fails.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("sample rate must be finite and positive, got {0}")]
    InvalidSampleRate(f32),

    #[error("frequency bounds must be finite and positive, got {0} Hz")]
    InvalidFrequency(f32),

    #[error("lowest frequency {lowest} Hz must be below highest frequency {highest} Hz")]
    InvertedFrequencyRange { lowest: f32, highest: f32 },

    #[error("highest frequency {highest} Hz is above the Nyquist frequency {nyquist} Hz")]
    AboveNyquist { highest: f32, nyquist: f32 },

    #[error("sensitivity threshold must be finite, got {0} dB")]
    InvalidThreshold(f32),

    #[error("invalid tuning: {0}")]
    InvalidTuning(&'static str),
}

impl Error {
    /// Returns true for errors caused by the session parameters in
    /// [`Config`](crate::Config), as opposed to the selection constants in
    /// [`Tuning`](crate::Tuning).
    pub fn is_config_error(&self) -> bool {
        !matches!(self, Error::InvalidTuning(_))
    }
}

pub type Result<T> = core::result::Result<T, Error>;
