//! Tone synthesis: frequency sequence to 16-bit PCM.

use std::f64::consts::PI;

use crate::config::ModemConfig;

/// Renders a sequence of tones as mono signed 16-bit PCM.
///
/// Each frequency gets `tone_samples` samples of a pure sine starting at
/// phase zero; tones are concatenated with no cross-fade. The abrupt jump
/// between tones is intentional: the decoder windows each tone separately
/// and never looks at phase.
pub struct ToneSynthesizer {
    config: ModemConfig,
}

impl ToneSynthesizer {
    pub fn new(config: ModemConfig) -> Self {
        Self { config }
    }

    /// PCM samples produced per tone.
    pub fn samples_per_tone(&self) -> usize {
        self.config.tone_samples()
    }

    /// Render the tone sequence, quantized by scaling to the maximum
    /// representable amplitude and truncating.
    pub fn render(&self, freqs: &[f32]) -> Vec<i16> {
        let n = self.config.tone_samples();
        let sample_rate = self.config.sample_rate as f64;

        let mut pcm = Vec::with_capacity(freqs.len() * n);
        for &freq in freqs {
            let step = 2.0 * PI * freq as f64 / sample_rate;
            for i in 0..n {
                let sample = (step * i as f64).sin();
                pcm.push((sample * i16::MAX as f64) as i16);
            }
        }
        pcm
    }
}
