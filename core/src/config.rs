use crate::error::{ModemError, Result};
use crate::freq::FREQ_TOLERANCE_HZ;

/// Analysis windows per transmitted tone.
///
/// The decoder samples the spectrum twice per tone so that at least one
/// window falls fully inside each tone even when capture is not aligned
/// with tone boundaries. The packet framer derives its observation stride
/// from this ratio; `validate` rejects configurations where the windows do
/// not tile the tone exactly.
pub const DECODE_OVERSAMPLE: usize = 2;

/// Tuning constants shared by the encode and decode paths.
///
/// Both sides must be constructed from the same value or decoding fails;
/// passing one immutable config into [`crate::Encoder`] and
/// [`crate::Decoder`] keeps them from drifting apart.
#[derive(Debug, Clone, PartialEq)]
pub struct ModemConfig {
    /// Reserved tone marking packet start.
    pub handshake_start_hz: f32,
    /// Reserved tone marking packet end.
    pub handshake_end_hz: f32,
    /// Frequency of symbol 0.
    pub start_hz: f32,
    /// Spacing between adjacent symbol frequencies.
    pub step_hz: f32,
    /// Bits per symbol; must divide 8.
    pub bits: u32,
    /// Reed-Solomon redundancy bytes appended per packet.
    pub fec_bytes: usize,
    /// PCM sample rate in Hz.
    pub sample_rate: u32,
    /// Duration of one tone in seconds.
    pub tone_duration: f32,
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            handshake_start_hz: 8192.0,
            handshake_end_hz: 8192.0 + 512.0,
            start_hz: 1024.0,
            step_hz: 300.0,
            bits: 4,
            fec_bytes: 4,
            sample_rate: 44100,
            tone_duration: 0.1,
        }
    }
}

impl ModemConfig {
    /// Number of distinct payload symbols, `2^bits`.
    pub fn symbol_count(&self) -> u32 {
        1 << self.bits
    }

    /// Highest frequency in the payload band.
    pub fn payload_top_hz(&self) -> f32 {
        self.start_hz + self.step_hz * (self.symbol_count() - 1) as f32
    }

    /// PCM samples per transmitted tone.
    pub fn tone_samples(&self) -> usize {
        (self.tone_duration * self.sample_rate as f32).round() as usize
    }

    /// PCM samples per decode analysis window.
    pub fn window_samples(&self) -> usize {
        self.tone_samples() / DECODE_OVERSAMPLE
    }

    /// Dominant-frequency observations produced per transmitted tone.
    pub fn observations_per_tone(&self) -> usize {
        self.tone_samples() / self.window_samples()
    }

    /// Largest payload that fits one Reed-Solomon block.
    pub fn max_payload(&self) -> usize {
        255 - self.fec_bytes
    }

    /// Check the internal consistency every other component relies on.
    pub fn validate(&self) -> Result<()> {
        if self.bits == 0 || self.bits > 8 || 8 % self.bits != 0 {
            return Err(ModemError::InvalidConfig(format!(
                "bits must be 1, 2, 4 or 8, got {}",
                self.bits
            )));
        }
        if self.fec_bytes == 0 || self.fec_bytes > 64 {
            return Err(ModemError::InvalidConfig(format!(
                "fec_bytes must be in 1..=64, got {}",
                self.fec_bytes
            )));
        }
        if self.step_hz <= 0.0 || self.tone_duration <= 0.0 || self.sample_rate == 0 {
            return Err(ModemError::InvalidConfig(
                "step_hz, tone_duration and sample_rate must be positive".into(),
            ));
        }

        // Handshake tones must stay clear of the payload band by more than
        // the decoder's matching tolerance, or payload symbols would be
        // taken for packet boundaries.
        let top = self.payload_top_hz();
        for hs in [self.handshake_start_hz, self.handshake_end_hz] {
            let outside =
                hs > top + FREQ_TOLERANCE_HZ || hs < self.start_hz - FREQ_TOLERANCE_HZ;
            if !outside {
                return Err(ModemError::InvalidConfig(format!(
                    "handshake tone {hs} Hz overlaps the payload band \
                     {}..{top} Hz within the {FREQ_TOLERANCE_HZ} Hz tolerance",
                    self.start_hz
                )));
            }
        }
        if (self.handshake_start_hz - self.handshake_end_hz).abs() < 2.0 * FREQ_TOLERANCE_HZ {
            return Err(ModemError::InvalidConfig(
                "start and end handshake tones are too close to distinguish".into(),
            ));
        }

        let nyquist = self.sample_rate as f32 / 2.0;
        let top_tone = top
            .max(self.handshake_start_hz)
            .max(self.handshake_end_hz);
        if top_tone >= nyquist {
            return Err(ModemError::InvalidConfig(format!(
                "tone at {top_tone} Hz is above the Nyquist limit {nyquist} Hz"
            )));
        }

        // The framer's stride-based symbol extraction assumes analysis
        // windows tile each tone exactly.
        if self.tone_samples() % DECODE_OVERSAMPLE != 0 {
            return Err(ModemError::InvalidConfig(format!(
                "tone length of {} samples is not divisible into {} analysis windows",
                self.tone_samples(),
                DECODE_OVERSAMPLE
            )));
        }

        Ok(())
    }
}
