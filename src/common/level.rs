use micromath::F32Ext;

/// Converts a level in dB relative to full scale to a linear amplitude.
pub fn db_to_amplitude(db: f32) -> f32 {
    libm::powf(10.0, db / 20.0)
}

/// Converts a linear amplitude to a level in dB relative to full scale.
/// Non-positive amplitudes map to negative infinity.
pub fn amplitude_to_db(amplitude: f32) -> f32 {
    if amplitude <= 0.0 {
        return f32::NEG_INFINITY;
    }
    20.0 * F32Ext::log10(amplitude)
}

/// Returns the RMS level in dBFS of a window of `len` samples with the
/// given sum of squares.
pub fn energy_to_db(energy: f64, len: usize) -> f32 {
    if energy <= 0.0 || len == 0 {
        return f32::NEG_INFINITY;
    }
    let mean_square = (energy / len as f64) as f32;
    10.0 * F32Ext::log10(mean_square)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_to_amplitude() {
        assert!((db_to_amplitude(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_amplitude(-20.0) - 0.1).abs() < 1e-6);
        assert!((db_to_amplitude(-60.0) - 0.001).abs() < 1e-8);
    }

    #[test]
    fn test_amplitude_to_db() {
        assert!(amplitude_to_db(1.0).abs() < 0.05);
        assert!((amplitude_to_db(0.5) + 6.02).abs() < 0.1);
        assert_eq!(amplitude_to_db(0.0), f32::NEG_INFINITY);
    }

    #[test]
    fn test_energy_to_db() {
        // Full scale sine, mean square 0.5
        assert!((energy_to_db(50.0, 100) + 3.01).abs() < 0.1);
        assert_eq!(energy_to_db(0.0, 100), f32::NEG_INFINITY);
    }
}
