//! Runs the period detector on synthetic harmonic signals, or on the first
//! channel of a 16 bit WAV file passed as the only argument.
//!
//! For each synthetic signal, a two channel WAV file with the input and the
//! detector's hysteresis output is written to `results/pd_<name>.wav`.

use std::fs;

use dev_helpers::{note_number_to_string, read_wav, write_wav, Harmonics};
use micro_period::{Candidate, PeriodDetector};

const LOWEST_FREQUENCY: f32 = 100.0;
const HIGHEST_FREQUENCY: f32 = 400.0;
const THRESHOLD_DB: f32 = -60.0;

struct Latched {
    sample_index: usize,
    first: Candidate,
    second: Candidate,
}

fn analyze(signal: &[f32], sample_rate: f32) -> micro_period::Result<(Vec<Latched>, Vec<f32>)> {
    let mut detector =
        PeriodDetector::new(LOWEST_FREQUENCY, HIGHEST_FREQUENCY, sample_rate, THRESHOLD_DB)?;
    let mut latched = Vec::new();
    let mut output = Vec::with_capacity(signal.len());
    for (sample_index, sample) in signal.iter().enumerate() {
        output.push(0.8 * detector.process(*sample));
        if detector.is_ready() {
            latched.push(Latched {
                sample_index,
                first: detector.first(),
                second: detector.second(),
            });
        }
    }
    Ok((latched, output))
}

fn describe(candidate: &Candidate, sample_rate: f32) -> String {
    match candidate.midi_note(sample_rate) {
        Some(note) => format!(
            "{:8.3} samples ({:.3}) {}",
            candidate.period,
            candidate.periodicity,
            note_number_to_string(note)
        ),
        None => String::from("        -"),
    }
}

fn print_summary(name: &str, latched: &[Latched], sample_rate: f32) {
    println!("{}: {} cycles", name, latched.len());
    if let Some(last) = latched.last() {
        println!("  sample {}", last.sample_index);
        println!("  first  {}", describe(&last.first, sample_rate));
        println!("  second {}", describe(&last.second, sample_rate));
    }
}

#[cfg(feature = "serialization")]
fn write_json(name: &str, latched: &[Latched]) -> std::io::Result<()> {
    let rows: Vec<(usize, Candidate, Candidate)> = latched
        .iter()
        .map(|result| (result.sample_index, result.first, result.second))
        .collect();
    let json = serde_json::to_string_pretty(&rows)?;
    fs::write(format!("results/pd_{}.json", name), json)
}

fn run_scenarios() -> Result<(), Box<dyn std::error::Error>> {
    let sample_rate = 44100.0;
    let scenarios = [
        ("pure_100", Harmonics::pure(), 100.0),
        ("pure_200", Harmonics::pure(), 200.0),
        ("pure_300", Harmonics::pure(), 300.0),
        ("pure_400", Harmonics::pure(), 400.0),
        ("mix_100", Harmonics::default(), 100.0),
        ("mix_250", Harmonics::default(), 250.0),
        ("octave_100", Harmonics::with_levels(0.2, 0.8, 0.0), 100.0),
        ("third_100", Harmonics::with_levels(0.4, 0.0, 0.6), 100.0),
        ("missing_fundamental_100", Harmonics::with_levels(0.0, 0.6, 0.4), 100.0),
        (
            "shifted_second_100",
            Harmonics::with_levels(0.4, 0.6, 0.0).with_offsets([0.0, 0.15, 0.0]),
            100.0,
        ),
        (
            "fourth_100",
            Harmonics::with_levels(0.5, 0.0, 0.5).with_multiples([1.0, 2.0, 4.0]),
            100.0,
        ),
    ];

    fs::create_dir_all("results")?;
    for (name, harmonics, frequency) in scenarios.iter() {
        let signal = harmonics.generate(*frequency, sample_rate, 0.25);
        let (latched, output) = analyze(&signal, sample_rate)?;
        print_summary(name, &latched, sample_rate);
        write_wav(
            format!("results/pd_{}.wav", name),
            sample_rate as u32,
            &[&signal[..], &output[..]],
        )?;
        #[cfg(feature = "serialization")]
        write_json(name, &latched)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let (channel_count, sample_rate, samples) = read_wav(&path)?;
            let first_channel: Vec<f32> = samples
                .iter()
                .step_by(channel_count.max(1) as usize)
                .copied()
                .collect();
            let (latched, _) = analyze(&first_channel, sample_rate as f32)?;
            print_summary(&path, &latched, sample_rate as f32);
            Ok(())
        }
        None => run_scenarios(),
    }
}
