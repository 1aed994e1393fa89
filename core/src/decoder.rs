//! Decode path: audio windows to messages.

use crate::config::ModemConfig;
use crate::error::Result;
use crate::framer::{Message, PacketFramer};
use crate::spectrum::SpectralAnalyzer;

/// Streaming decoder: spectral analysis per capture window feeding the
/// packet framer.
///
/// Windows must be pushed strictly in arrival order because packet framing
/// is order-dependent. One decoder per audio stream; it owns its framer
/// and analysis buffers exclusively.
pub struct Decoder {
    config: ModemConfig,
    analyzer: SpectralAnalyzer,
    framer: PacketFramer,
}

impl Decoder {
    pub fn new(config: ModemConfig) -> Result<Self> {
        config.validate()?;
        let analyzer = SpectralAnalyzer::new(config.sample_rate, config.window_samples());
        let framer = PacketFramer::new(config.clone())?;
        Ok(Self {
            config,
            analyzer,
            framer,
        })
    }

    pub fn config(&self) -> &ModemConfig {
        &self.config
    }

    /// Samples the capture source must deliver per window. This is the
    /// length the analyzer planned its FFT for.
    pub fn window_samples(&self) -> usize {
        self.analyzer.window_len()
    }

    /// Feed one capture window of mono float samples. Returns a result
    /// when this window's end handshake completed a packet. Decode
    /// failures are per-packet results, never terminal: keep pushing.
    pub fn push_window(&mut self, samples: &[f32]) -> Option<Result<Message>> {
        if samples.is_empty() {
            return None;
        }
        let dominant = self.analyzer.dominant_frequency(samples);
        self.framer.feed(dominant)
    }

    /// Decode a complete recording, returning one entry per detected
    /// packet in stream order.
    pub fn decode(&mut self, samples: &[f32]) -> Vec<Result<Message>> {
        let window = self.window_samples();
        samples
            .chunks(window)
            .filter_map(|chunk| self.push_window(chunk))
            .collect()
    }
}
