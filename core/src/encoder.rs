//! Encode path: text to handshake-delimited tones.

use log::debug;

use crate::chunks;
use crate::config::ModemConfig;
use crate::error::Result;
use crate::fec::FecEncoder;
use crate::freq::symbol_to_freq;
use crate::synth::ToneSynthesizer;

/// Turns a text message into a frequency sequence or PCM samples.
///
/// Stateless per call; the same encoder can encode any number of messages.
pub struct Encoder {
    config: ModemConfig,
    fec: FecEncoder,
    synth: ToneSynthesizer,
}

impl Encoder {
    pub fn new(config: ModemConfig) -> Result<Self> {
        config.validate()?;
        let fec = FecEncoder::new(config.fec_bytes);
        let synth = ToneSynthesizer::new(config.clone());
        Ok(Self { config, fec, synth })
    }

    pub fn config(&self) -> &ModemConfig {
        &self.config
    }

    /// The full tone sequence for one packet: start handshake, one tone
    /// per payload symbol, end handshake.
    pub fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let encoded = self.fec.encode(text.as_bytes())?;
        let symbols = chunks::pack(&encoded, self.config.bits);
        debug!(
            "encoding {} payload bytes as {} tones",
            text.len(),
            symbols.len() + 2
        );

        let mut freqs = Vec::with_capacity(symbols.len() + 2);
        freqs.push(self.config.handshake_start_hz);
        freqs.extend(
            symbols
                .iter()
                .map(|&symbol| symbol_to_freq(&self.config, symbol)),
        );
        freqs.push(self.config.handshake_end_hz);
        Ok(freqs)
    }

    /// Render one packet straight to mono 16-bit PCM, ready for a WAV
    /// container or an audio device.
    pub fn encode_to_pcm(&self, text: &str) -> Result<Vec<i16>> {
        let freqs = self.encode(text)?;
        Ok(self.synth.render(&freqs))
    }
}
