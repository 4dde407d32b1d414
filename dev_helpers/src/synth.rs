use std::f32::consts::PI;

/// Parameters of a test signal made of three sinusoids. Partial `i` has
/// frequency `multiples[i] * f`, amplitude `levels[i]` and a phase offset of
/// `offsets[i]` fundamental cycles.
#[derive(Debug, Clone, Copy)]
pub struct Harmonics {
    pub multiples: [f32; 3],
    pub levels: [f32; 3],
    pub offsets: [f32; 3],
}

impl Default for Harmonics {
    fn default() -> Self {
        Harmonics {
            multiples: [1.0, 2.0, 3.0],
            levels: [0.3, 0.4, 0.3],
            offsets: [0.0; 3],
        }
    }
}

impl Harmonics {
    /// A pure sinusoid.
    pub fn pure() -> Self {
        Harmonics::with_levels(1.0, 0.0, 0.0)
    }

    /// The first three harmonics with the given levels.
    pub fn with_levels(first: f32, second: f32, third: f32) -> Self {
        Harmonics {
            levels: [first, second, third],
            ..Harmonics::default()
        }
    }

    pub fn with_offsets(self, offsets: [f32; 3]) -> Self {
        Harmonics { offsets, ..self }
    }

    pub fn with_multiples(self, multiples: [f32; 3]) -> Self {
        Harmonics { multiples, ..self }
    }

    /// Generates `duration` seconds of the signal with fundamental frequency `frequency`.
    pub fn generate(&self, frequency: f32, sample_rate: f32, duration: f32) -> Vec<f32> {
        let sample_count = (sample_rate * duration) as usize;
        let period = sample_rate / frequency;
        (0..sample_count)
            .map(|i| {
                let phase = (i as f32) / period;
                let mut value = 0.0;
                for partial in 0..3 {
                    let angle = self.multiples[partial] * 2.0 * PI * (phase + self.offsets[partial]);
                    value += self.levels[partial] * angle.sin();
                }
                value
            })
            .collect()
    }

    /// Generates a 30 ms buffer.
    pub fn generate_buffer(&self, frequency: f32, sample_rate: f32) -> Vec<f32> {
        self.generate(frequency, sample_rate, 0.03)
    }
}

/// Uniformly distributed noise in `[-amplitude, amplitude]` from a xorshift
/// generator, reproducible for a given seed.
pub fn noise(seed: u32, amplitude: f32, sample_count: usize) -> Vec<f32> {
    let mut state = seed.max(1);
    (0..sample_count)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let unit = (state as f64 / u32::MAX as f64) as f32;
            amplitude * (2.0 * unit - 1.0)
        })
        .collect()
}
