//! Period detection with octave aware candidate selection.
//!
//! The processing chain is
//! conditioner (DC blocker) -> correlator (running lagged sums) ->
//! peak picking and candidate selection (once per cycle) -> latch.

mod candidate;
mod conditioner;
mod config;
mod correlator;
mod detector;
mod latch;
mod peak;

pub use candidate::Candidate;
pub use config::{Config, Tuning};
pub use detector::PeriodDetector;
pub use latch::LatchState;
pub use peak::Peak;
