use core::f32::consts::PI;

/// The corner frequency of the DC blocker is the lowest detectable
/// frequency divided by this value.
const CORNER_DIVISOR: f32 = 20.0;

/// A one pole DC blocking high pass filter,
/// `y[n] = x[n] - x[n - 1] + r * y[n - 1]`.
pub(crate) struct Conditioner {
    r: f32,
    prev_input: f32,
    prev_output: f32,
}

impl Conditioner {
    pub(crate) fn new(sample_rate: f32, lowest_frequency: f32) -> Self {
        let corner_frequency = lowest_frequency / CORNER_DIVISOR;
        let r = 1.0 - 2.0 * PI * corner_frequency / sample_rate;
        Conditioner {
            r: r.max(0.0),
            prev_input: 0.0,
            prev_output: 0.0,
        }
    }

    pub(crate) fn process(&mut self, input: f32) -> f32 {
        let output = input - self.prev_input + self.r * self.prev_output;
        self.prev_input = input;
        self.prev_output = output;
        output
    }

    pub(crate) fn reset(&mut self) {
        self.prev_input = 0.0;
        self.prev_output = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dc_is_removed() {
        let mut conditioner = Conditioner::new(44100.0, 100.0);
        let mut output = 0.0;
        for _ in 0..20000 {
            output = conditioner.process(0.5);
        }
        assert!(output.abs() < 1e-3);
    }

    #[test]
    fn test_passband_is_preserved() {
        let sample_rate = 44100.0;
        let mut conditioner = Conditioner::new(sample_rate, 100.0);
        let mut max_output: f32 = 0.0;
        for i in 0..22050 {
            let x = 0.3 + (2.0 * PI * 200.0 * (i as f32) / sample_rate).sin();
            let y = conditioner.process(x);
            if i >= 22050 - 441 {
                max_output = max_output.max(y.abs());
            }
        }
        assert!((max_output - 1.0).abs() < 0.02);
    }

    #[test]
    fn test_reset() {
        let mut conditioner = Conditioner::new(44100.0, 100.0);
        let first = conditioner.process(1.0);
        conditioner.process(-0.4);
        conditioner.reset();
        assert_eq!(conditioner.process(1.0), first);
    }
}
