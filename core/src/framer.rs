//! Handshake-delimited packet framing over a dominant-frequency stream.

use log::{debug, warn};

use crate::chunks;
use crate::config::ModemConfig;
use crate::error::Result;
use crate::fec::FecDecoder;
use crate::freq::{self, freqs_match};

/// A successfully corrected packet payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Payload decoded as UTF-8 text.
    Text(String),
    /// Corrected payload that was not valid UTF-8, kept for display as a
    /// byte dump. Not a transmission failure.
    Binary(Vec<u8>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FramerState {
    Idle,
    InPacket,
}

/// Consumes per-window dominant-frequency observations, detects the
/// handshake-delimited packet boundary and assembles received messages.
///
/// Observations must arrive strictly in capture order. The framer owns its
/// accumulator exclusively; one framer per audio stream.
pub struct PacketFramer {
    config: ModemConfig,
    fec: FecDecoder,
    state: FramerState,
    buffer: Vec<f32>,
    /// Observation stride per tone, derived from the window/tone ratio.
    stride: usize,
}

impl PacketFramer {
    pub fn new(config: ModemConfig) -> Result<Self> {
        config.validate()?;
        let fec = FecDecoder::new(config.fec_bytes);
        let stride = config.observations_per_tone();
        Ok(Self {
            config,
            fec,
            state: FramerState::Idle,
            buffer: Vec::new(),
            stride,
        })
    }

    /// Feed one observation. Returns a decode result when an end handshake
    /// closes a packet; the machine then resets to idle regardless of
    /// decode success, ready for the next start handshake.
    pub fn feed(&mut self, observed_hz: f32) -> Option<Result<Message>> {
        match self.state {
            FramerState::Idle => {
                if freqs_match(observed_hz, self.config.handshake_start_hz) {
                    debug!("start handshake at {observed_hz:.0} Hz, opening packet");
                    self.state = FramerState::InPacket;
                    self.buffer.clear();
                }
                None
            }
            FramerState::InPacket => {
                if freqs_match(observed_hz, self.config.handshake_end_hz) {
                    debug!(
                        "end handshake at {observed_hz:.0} Hz after {} observations",
                        self.buffer.len()
                    );
                    let result = self.decode_packet();
                    if let Err(err) = &result {
                        warn!("dropping packet: {err}");
                    }
                    self.buffer.clear();
                    self.state = FramerState::Idle;
                    Some(result)
                } else {
                    self.buffer.push(observed_hz);
                    None
                }
            }
        }
    }

    /// Whether a start handshake has been seen without a matching end.
    pub fn in_packet(&self) -> bool {
        self.state == FramerState::InPacket
    }

    fn decode_packet(&self) -> Result<Message> {
        // Each tone spans `stride` analysis windows, so every stride-th
        // observation is one tone. The stray observations this keeps (the
        // tail of the start handshake at index 0) sit outside the payload
        // band and drop out in freq_to_symbol.
        let symbols: Vec<u8> = self
            .buffer
            .iter()
            .step_by(self.stride)
            .filter_map(|&f| freq::freq_to_symbol(&self.config, f))
            .collect();

        let encoded = chunks::unpack(&symbols, self.config.bits);
        let payload = self.fec.decode(&encoded)?;
        match String::from_utf8(payload) {
            Ok(text) => Ok(Message::Text(text)),
            Err(not_utf8) => Ok(Message::Binary(not_utf8.into_bytes())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fec::FecEncoder;
    use crate::freq::symbol_to_freq;
    use crate::ModemError;

    /// Observations the analyzer would produce for an aligned packet:
    /// two windows per tone, with the framer consuming the first start
    /// handshake window before the buffer starts filling.
    fn observations_for(payload: &[u8], config: &ModemConfig) -> Vec<f32> {
        let encoded = FecEncoder::new(config.fec_bytes).encode(payload).unwrap();
        let symbols = chunks::pack(&encoded, config.bits);

        let mut obs = vec![config.handshake_start_hz; 2];
        for &symbol in &symbols {
            let f = symbol_to_freq(config, symbol);
            obs.extend([f, f]);
        }
        obs.extend([config.handshake_end_hz; 2]);
        obs
    }

    fn feed_all(framer: &mut PacketFramer, obs: &[f32]) -> Vec<Result<Message>> {
        obs.iter().filter_map(|&f| framer.feed(f)).collect()
    }

    #[test]
    fn test_decodes_aligned_packet() {
        let config = ModemConfig::default();
        let mut framer = PacketFramer::new(config.clone()).unwrap();

        let results = feed_all(&mut framer, &observations_for(b"hi", &config));
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].as_ref().unwrap(),
            &Message::Text("hi".to_string())
        );
        assert!(!framer.in_packet());
    }

    #[test]
    fn test_idle_ignores_payload_and_end_tones() {
        let config = ModemConfig::default();
        let mut framer = PacketFramer::new(config.clone()).unwrap();

        assert!(framer.feed(1324.0).is_none());
        assert!(framer.feed(config.handshake_end_hz).is_none());
        assert!(!framer.in_packet());
    }

    #[test]
    fn test_matches_drifted_handshake() {
        let config = ModemConfig::default();
        let mut framer = PacketFramer::new(config.clone()).unwrap();

        framer.feed(config.handshake_start_hz + 12.0);
        assert!(framer.in_packet());
    }

    #[test]
    fn test_out_of_band_noise_filtered_inside_packet() {
        let config = ModemConfig::default();
        let mut framer = PacketFramer::new(config.clone()).unwrap();

        let mut obs = observations_for(b"ok", &config);
        // Splice a pair of wild observations before the end handshake;
        // stride keeps one of them, the band filter then drops it.
        let end = obs.len() - 2;
        obs.splice(end..end, [15000.0, 15000.0]);

        let results = feed_all(&mut framer, &obs);
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].as_ref().unwrap(),
            &Message::Text("ok".to_string())
        );
    }

    #[test]
    fn test_uncorrectable_packet_surfaces_raw_bytes() {
        let config = ModemConfig::default();
        let mut framer = PacketFramer::new(config.clone()).unwrap();

        // A packet of arbitrary in-band tones is near-certain garbage
        framer.feed(config.handshake_start_hz);
        framer.feed(config.handshake_start_hz);
        for _ in 0..12 {
            let f = symbol_to_freq(&config, 7);
            framer.feed(f);
            framer.feed(f);
        }
        let result = framer.feed(config.handshake_end_hz).unwrap();
        match result {
            Err(ModemError::Uncorrectable { raw }) => assert_eq!(raw.len(), 6),
            other => panic!("expected Uncorrectable, got {other:?}"),
        }
        assert!(!framer.in_packet());
    }

    #[test]
    fn test_resets_cleanly_between_packets() {
        let config = ModemConfig::default();
        let mut framer = PacketFramer::new(config.clone()).unwrap();

        // First packet fails FEC, second must decode from a fresh buffer
        framer.feed(config.handshake_start_hz);
        framer.feed(symbol_to_freq(&config, 3));
        let first = framer.feed(config.handshake_end_hz).unwrap();
        assert!(first.is_err());

        let results = feed_all(&mut framer, &observations_for(b"second", &config));
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].as_ref().unwrap(),
            &Message::Text("second".to_string())
        );
    }

    #[test]
    fn test_two_consecutive_packets() {
        let config = ModemConfig::default();
        let mut framer = PacketFramer::new(config.clone()).unwrap();

        let mut obs = observations_for(b"one", &config);
        obs.extend(observations_for(b"two", &config));

        let results = feed_all(&mut framer, &obs);
        let texts: Vec<_> = results
            .into_iter()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(
            texts,
            vec![
                Message::Text("one".to_string()),
                Message::Text("two".to_string())
            ]
        );
    }

    #[test]
    fn test_non_utf8_payload_becomes_binary() {
        let config = ModemConfig::default();
        let mut framer = PacketFramer::new(config.clone()).unwrap();

        let payload = [0xFF, 0xFE, 0x01];
        let results = feed_all(&mut framer, &observations_for(&payload, &config));
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].as_ref().unwrap(),
            &Message::Binary(payload.to_vec())
        );
    }

    #[test]
    fn test_restart_handshake_mid_packet_keeps_accumulating() {
        // A start tone seen while already in a packet is just an in-band
        // anomaly: it is buffered, falls outside the payload band and is
        // filtered at extraction.
        let config = ModemConfig::default();
        let mut framer = PacketFramer::new(config.clone()).unwrap();

        let mut obs = observations_for(b"x", &config);
        let end = obs.len() - 2;
        obs.splice(end..end, [config.handshake_start_hz, config.handshake_start_hz]);

        let results = feed_all(&mut framer, &obs);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].as_ref().unwrap(), &Message::Text("x".to_string()));
    }
}
