//! Acoustic data modem for short text messages
//!
//! Single-tone FSK: each 4-bit symbol is transmitted as one sine tone, with
//! Reed-Solomon FEC and handshake tones marking packet boundaries.

pub mod chunks;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod fec;
pub mod framer;
pub mod freq;
pub mod spectrum;
pub mod synth;

pub use config::ModemConfig;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{ModemError, Result};
pub use framer::{Message, PacketFramer};
