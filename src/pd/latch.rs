use super::candidate::Candidate;

/// The state of the result latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchState {
    /// Waiting for the next cycle boundary.
    Accumulating,
    /// A new candidate pair was latched by the most recent sample.
    Ready,
}

/// Holds the most recently latched candidate pair. The pair is replaced
/// as a whole and stays readable until the next latch.
pub(crate) struct Latch {
    state: LatchState,
    first: Candidate,
    second: Candidate,
}

impl Latch {
    pub(crate) fn new() -> Self {
        Latch {
            state: LatchState::Accumulating,
            first: Candidate::NONE,
            second: Candidate::NONE,
        }
    }

    /// Called once per sample, before any latch for that sample.
    pub(crate) fn advance(&mut self) {
        self.state = LatchState::Accumulating;
    }

    pub(crate) fn latch(&mut self, first: Candidate, second: Candidate) {
        self.first = first;
        self.second = second;
        self.state = LatchState::Ready;
    }

    pub(crate) fn state(&self) -> LatchState {
        self.state
    }

    pub(crate) fn first(&self) -> Candidate {
        self.first
    }

    pub(crate) fn second(&self) -> Candidate {
        self.second
    }

    pub(crate) fn reset(&mut self) {
        *self = Latch::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_transitions() {
        let mut latch = Latch::new();
        assert_eq!(latch.state(), LatchState::Accumulating);
        assert_eq!(latch.first(), Candidate::NONE);
        assert_eq!(latch.second(), Candidate::NONE);

        let first = Candidate {
            period: 441.0,
            periodicity: 0.99,
        };
        latch.advance();
        latch.latch(first, Candidate::NONE);
        assert_eq!(latch.state(), LatchState::Ready);

        // Values persist after the ready state is cleared
        latch.advance();
        assert_eq!(latch.state(), LatchState::Accumulating);
        assert_eq!(latch.first(), first);
        assert_eq!(latch.second(), Candidate::NONE);

        latch.reset();
        assert_eq!(latch.first(), Candidate::NONE);
    }
}
