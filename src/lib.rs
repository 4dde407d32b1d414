//! A real-time period detector for quasi-periodic monophonic audio, such as
//! a sung or played note.
//!
//! Samples are fed one at a time. Once per detected cycle the detector latches
//! two candidates:
//! * the _principal_ candidate, the period (in samples) most likely to be the
//!   fundamental period of the signal,
//! * the _secondary_ candidate, a period of roughly half the principal one,
//!   reported when strong second harmonic (octave) energy is present and the
//!   waveform lines up with itself at that period.
//!
//! Each candidate carries a periodicity in the range [0, 1] describing how
//! self-similar the signal is at that period. Candidates with period and
//! periodicity -1 mean that no candidate qualified.
//!
//! Features
//! * Single pass, constant latency processing.
//! * No allocations after construction, suitable for real time audio use.
//! * `no_std` compatible.
//!
//! # Examples
//!
//! ```
//! use micro_period::PeriodDetector;
//!
//! let sample_rate = 44100.0;
//! // Detect periods of frequencies between 100 and 400 Hz at levels above -60 dBFS.
//! let mut detector = PeriodDetector::new(100.0, 400.0, sample_rate, -60.0).unwrap();
//!
//! let mut latest = None;
//! for i in 0..8820 {
//!     let t = i as f32 / sample_rate;
//!     let sample = (2.0 * core::f32::consts::PI * 200.0 * t).sin();
//!     detector.process(sample);
//!     // is_ready is true for exactly one sample per detected cycle.
//!     if detector.is_ready() {
//!         latest = Some((detector.first(), detector.second()));
//!     }
//! }
//!
//! let (first, second) = latest.unwrap();
//! assert!((first.period - 220.5).abs() < 1.0);
//! assert!(first.periodicity > 0.99);
//! assert!(!second.is_valid());
//! ```
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod common;
mod error;
pub mod pd;

pub use error::{Error, Result};
pub use pd::{Candidate, Config, LatchState, Peak, PeriodDetector, Tuning};
