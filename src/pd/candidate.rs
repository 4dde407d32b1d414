use super::config::Tuning;
use super::peak::Peak;
use crate::common::freq_to_midi_note;

/// A period estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// The period in samples, or -1 if there is no candidate.
    pub period: f32,
    /// How periodic the signal is at `period`, in the range [0, 1], or -1 if
    /// there is no candidate.
    pub periodicity: f32,
}

impl Candidate {
    /// The sentinel value meaning that no candidate qualified.
    pub const NONE: Candidate = Candidate {
        period: -1.0,
        periodicity: -1.0,
    };

    pub fn is_valid(&self) -> bool {
        self.period > 0.0
    }

    /// The frequency in Hz corresponding to the period, or `None` for the
    /// sentinel.
    pub fn frequency(&self, sample_rate: f32) -> Option<f32> {
        if self.is_valid() {
            Some(sample_rate / self.period)
        } else {
            None
        }
    }

    /// The MIDI note number corresponding to the period.
    pub fn midi_note(&self, sample_rate: f32) -> Option<f32> {
        self.frequency(sample_rate).map(freq_to_midi_note)
    }
}

impl Default for Candidate {
    fn default() -> Self {
        Candidate::NONE
    }
}

impl From<&Peak> for Candidate {
    fn from(peak: &Peak) -> Self {
        Candidate {
            period: peak.lag,
            periodicity: peak.strength,
        }
    }
}

/// Picks the principal and secondary candidates among the profile peaks.
/// `polarity` evaluates the polarity similarity at a fractional lag and is
/// only called for a secondary candidate.
pub(crate) fn select_candidates<F>(
    peaks: &[Peak],
    tuning: &Tuning,
    polarity: F,
) -> (Candidate, Candidate)
where
    F: Fn(f32) -> f32,
{
    match select_principal(peaks, tuning) {
        Some(principal) => {
            let secondary =
                select_secondary(peaks, principal, tuning, polarity).unwrap_or(Candidate::NONE);
            (principal.into(), secondary)
        }
        None => (Candidate::NONE, Candidate::NONE),
    }
}

/// True if `long` is within tolerance of an integer multiple (2 or more)
/// of `short`.
fn is_harmonic_multiple(long: f32, short: f32, tolerance: f32) -> bool {
    let ratio = long / short;
    let multiple = libm::roundf(ratio);
    multiple >= 2.0 && libm::fabsf(ratio - multiple) <= tolerance * multiple
}

fn select_principal<'a>(peaks: &'a [Peak], tuning: &Tuning) -> Option<&'a Peak> {
    let accepted = |peak: &Peak| {
        peak.strength >= tuning.min_periodicity && peak.prominence >= tuning.min_prominence
    };
    let strongest = peaks
        .iter()
        .filter(|peak| accepted(*peak))
        .map(|peak| peak.strength)
        .fold(None, |max: Option<f32>, strength| match max {
            Some(max) if max >= strength => Some(max),
            _ => Some(strength),
        })?;

    let floor = strongest - tuning.tolerance;
    let qualifies = |peak: &Peak| accepted(peak) && peak.strength >= floor;

    // Peaks are ordered by increasing lag. Prefer the longest qualifying lag
    // unless it repeats a shorter qualifying one.
    peaks
        .iter()
        .filter(|peak| qualifies(*peak))
        .filter(|peak| {
            !peaks.iter().any(|shorter| {
                shorter.lag < peak.lag
                    && qualifies(shorter)
                    && is_harmonic_multiple(peak.lag, shorter.lag, tuning.harmonic_tolerance)
            })
        })
        .last()
}

/// The secondary candidate is located using the profile, which only tells
/// how the signal power is distributed over harmonics, and is then confirmed
/// using the polarity similarity, which also depends on the relative phase
/// of the harmonics.
fn select_secondary<F>(
    peaks: &[Peak],
    principal: &Peak,
    tuning: &Tuning,
    polarity: F,
) -> Option<Candidate>
where
    F: Fn(f32) -> f32,
{
    let lower = tuning.min_secondary_ratio * principal.lag;
    let upper = tuning.max_secondary_ratio * principal.lag;
    // Strongest peak in range, the shorter lag wins ties.
    let best = peaks
        .iter()
        .filter(|peak| {
            peak.lag >= lower && peak.lag <= upper && peak.prominence >= tuning.min_prominence
        })
        .fold(None, |best: Option<&Peak>, peak| match best {
            Some(best) if best.strength >= peak.strength => Some(best),
            _ => Some(peak),
        })?;

    // An octave is reported at exactly half the principal period.
    let half_period = 0.5 * principal.lag;
    let is_octave =
        libm::fabsf(best.lag - half_period) <= tuning.harmonic_tolerance * half_period;
    let period = if is_octave { half_period } else { best.lag };

    let periodicity = polarity(period);
    if periodicity >= tuning.secondary_periodicity {
        Some(Candidate {
            period,
            periodicity,
        })
    } else {
        None
    }
}
