//! WAV container reading and writing.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::{CliError, Result};

/// Write mono 16-bit PCM to a standard uncompressed WAV file.
pub fn write_wav(path: &Path, pcm: &[i16], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for &sample in pcm {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Read a WAV file as normalized mono float samples plus its sample rate.
///
/// Accepts 16-bit integer or 32-bit float content; multi-channel input is
/// downmixed by keeping the first channel.
pub fn read_wav_mono(path: &Path) -> Result<(Vec<f32>, u32)> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();

    let interleaved: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / 32768.0))
            .collect::<std::result::Result<_, _>>()?,
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .collect::<std::result::Result<_, _>>()?,
        (format, bits) => {
            return Err(CliError::UnsupportedWav(format!(
                "{bits}-bit {format:?} (expected 16-bit int or 32-bit float)"
            )))
        }
    };

    let samples = first_channel(&interleaved, spec.channels as usize);
    Ok((samples, spec.sample_rate))
}

/// Keep the first channel of interleaved audio.
fn first_channel(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved.iter().step_by(channels).copied().collect()
}
