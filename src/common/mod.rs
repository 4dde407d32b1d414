//! Common algorithms and utilities.

mod history;
mod level;
mod midi;

pub use history::History;
pub use level::{amplitude_to_db, db_to_amplitude, energy_to_db};
pub use midi::freq_to_midi_note;
