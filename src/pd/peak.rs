/// A local maximum of the correlation profile. The corresponding lag may or
/// may not be the period of the signal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Peak {
    /// The integer lag, in samples, of the profile maximum.
    pub lag_index: usize,
    /// The lag, in samples, approximated using parabolic interpolation.
    pub lag: f32,
    /// The similarity at `lag`, approximated using parabolic interpolation
    /// and clamped to [0, 1].
    pub strength: f32,
    /// How far `strength` rises above the lower of the two minima on either
    /// side of the peak. A minimum is found by descending from the peak until
    /// the profile rises again or ends.
    pub prominence: f32,
}

impl Peak {
    pub(crate) fn new() -> Self {
        Peak {
            lag_index: 0,
            lag: 0.0,
            strength: 0.0,
            prominence: 0.0,
        }
    }

    /// Refines the maximum at `profile[index]`, which corresponds to the lag
    /// `first_lag + index`. `index` must not be the first or last index.
    pub(crate) fn set(&mut self, profile: &[f32], first_lag: usize, index: usize) {
        let left = profile[index - 1];
        let center = profile[index];
        let right = profile[index + 1];

        // Coefficients of the parabola ax^2 + bx + c passing through
        // (-1, left), (0, center), (1, right)
        let a = 0.5 * (right - 2.0 * center + left);
        let b = 0.5 * (right - left);
        let x_max = if a != 0.0 { -b / (2.0 * a) } else { 0.0 };
        let strength = a * x_max * x_max + b * x_max + center;

        self.lag_index = first_lag + index;
        self.lag = (self.lag_index as f32) + x_max;
        self.strength = strength.max(0.0).min(1.0);
        self.prominence = (self.strength - lower_neighboring_minimum(profile, index)).max(0.0);
    }
}

fn lower_neighboring_minimum(profile: &[f32], index: usize) -> f32 {
    let mut left = index;
    while left > 0 && profile[left - 1] <= profile[left] {
        left -= 1;
    }
    let mut right = index;
    while right < profile.len() - 1 && profile[right + 1] <= profile[right] {
        right += 1;
    }
    profile[left].min(profile[right])
}

/// Finds the interior local maxima of `profile` in order of increasing lag,
/// stopping when `peaks` is full. A maximum is a value strictly greater than
/// its left neighbor and not less than its right neighbor, so a two sample
/// plateau yields a single peak interpolated to its midpoint.
/// Returns the number of peaks found.
pub(crate) fn find_peaks(profile: &[f32], first_lag: usize, peaks: &mut [Peak]) -> usize {
    let mut peak_count = 0;
    if profile.len() < 3 {
        return 0;
    }
    for index in 1..(profile.len() - 1) {
        if peak_count == peaks.len() {
            break;
        }
        let value = profile[index];
        if value > profile[index - 1] && value >= profile[index + 1] {
            peaks[peak_count].set(profile, first_lag, index);
            peak_count += 1;
        }
    }
    peak_count
}

/// The largest possible number of peaks in a profile of the given length.
pub(crate) fn max_peak_count(profile_len: usize) -> usize {
    profile_len / 2 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{vec, vec::Vec};

    #[test]
    fn test_peak_interpolation() {
        {
            let profile: [f32; 5] = [0.2, 0.5, 0.9, 0.5, 0.2];
            let mut peak = Peak::new();
            peak.set(&profile, 10, 2);
            assert_eq!(peak.lag_index, 12);
            assert!((peak.lag - 12.0).abs() <= f32::EPSILON);
            assert!((peak.strength - 0.9).abs() <= f32::EPSILON);
        }

        {
            let profile: [f32; 3] = [0.4, 0.6, 0.5];
            let mut peak = Peak::new();
            peak.set(&profile, 10, 1);
            assert!((peak.lag - 11.1666667).abs() <= 1e-5);
            assert!((peak.strength - 0.6041667).abs() <= 1e-5);
        }
    }

    #[test]
    fn test_prominence() {
        // Two ripples on top of a broad maximum and a small bump on a slope
        let profile: [f32; 12] = [
            0.9, 0.2, 0.6, 0.69, 0.68, 0.69, 0.6, 0.3, 0.35, 0.34, 0.5, 0.1,
        ];
        let mut peaks = vec![Peak::new(); max_peak_count(profile.len())];
        let peak_count = find_peaks(&profile, 0, &mut peaks);
        assert_eq!(peak_count, 4);

        let lag_indices: Vec<usize> = peaks[..peak_count]
            .iter()
            .map(|peak| peak.lag_index)
            .collect();
        assert_eq!(lag_indices, [3, 5, 8, 10]);

        // The ripples are measured from the valley at index 1 or index 7
        assert!((peaks[0].prominence - (peaks[0].strength - 0.2)).abs() < 1e-6);
        assert!((peaks[1].prominence - (peaks[1].strength - 0.3)).abs() < 1e-6);
        // The bump descends to 0.3 on its left and 0.34 on its right
        assert!((peaks[2].prominence - (peaks[2].strength - 0.3)).abs() < 1e-6);
        // Descending to the end of the profile counts as a minimum
        assert!((peaks[3].prominence - (peaks[3].strength - 0.1)).abs() < 1e-6);
    }

    #[test]
    fn test_interpolated_strength_is_clamped() {
        let profile: [f32; 3] = [0.9, 1.0, 0.99];
        let mut peak = Peak::new();
        peak.set(&profile, 0, 1);
        assert!(peak.strength <= 1.0);
        assert!(peak.lag > 1.0);
    }

    #[test]
    fn test_plateau_midpoint() {
        let profile: [f32; 5] = [0.1, 0.7, 0.7, 0.2, 0.1];
        let mut peaks = vec![Peak::new(); 4];
        let peak_count = find_peaks(&profile, 100, &mut peaks);
        assert_eq!(peak_count, 1);
        assert_eq!(peaks[0].lag_index, 101);
        assert!((peaks[0].lag - 101.5).abs() <= 1e-5);
    }

    #[test]
    fn test_edges_are_not_peaks() {
        let rising: [f32; 4] = [0.1, 0.2, 0.3, 0.4];
        let falling: [f32; 4] = [0.4, 0.3, 0.2, 0.1];
        let mut peaks = vec![Peak::new(); 4];
        assert_eq!(find_peaks(&rising, 1, &mut peaks), 0);
        assert_eq!(find_peaks(&falling, 1, &mut peaks), 0);
        assert_eq!(find_peaks(&rising[..2], 1, &mut peaks), 0);
    }

    #[test]
    fn test_peak_capacity() {
        let profile: [f32; 9] = [0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0];
        let mut peaks = vec![Peak::new(); max_peak_count(profile.len())];
        assert_eq!(find_peaks(&profile, 1, &mut peaks), 4);

        let mut peaks = vec![Peak::new(); 2];
        assert_eq!(find_peaks(&profile, 1, &mut peaks), 2);
        assert_eq!(peaks[1].lag_index, 4);
    }
}
