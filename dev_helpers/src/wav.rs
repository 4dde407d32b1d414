use std::path::Path;

/// Reads a 16 bit integer WAV file. Returns the channel count, the sample rate
/// and the interleaved samples scaled to [-1, 1].
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(u16, u32, Vec<f32>), hound::Error> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let scale = 1. / (i16::MAX as f32);
    let samples = reader
        .samples::<i16>()
        .map(|sample| sample.map(|value| (value as f32) * scale))
        .collect::<Result<Vec<f32>, hound::Error>>()?;
    Ok((spec.channels, spec.sample_rate, samples))
}

/// Writes channels of equal length as an interleaved 16 bit integer WAV
/// file. Samples are clamped to [-1, 1].
pub fn write_wav<P: AsRef<Path>>(
    path: P,
    sample_rate: u32,
    channels: &[&[f32]],
) -> Result<(), hound::Error> {
    let spec = hound::WavSpec {
        channels: channels.len() as u16,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let frame_count = channels.iter().map(|channel| channel.len()).min().unwrap_or(0);

    let mut writer = hound::WavWriter::create(path, spec)?;
    for i in 0..frame_count {
        for channel in channels.iter() {
            let clamped_sample = channel[i].max(-1.0).min(1.0);
            writer.write_sample((clamped_sample * i16::MAX as f32) as i16)?;
        }
    }
    writer.finalize()
}
