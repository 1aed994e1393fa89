//! Reed-Solomon forward error correction over GF(256).
//!
//! The code is systematic: the encoded packet is the payload followed by
//! `fec_bytes` redundancy bytes, and up to `fec_bytes / 2` corrupted bytes
//! anywhere in the packet can be corrected.

use reed_solomon::{Decoder as RsDecoder, Encoder as RsEncoder};

use crate::error::{ModemError, Result};

/// One GF(256) Reed-Solomon block holds at most 255 bytes of payload + ecc.
const RS_BLOCK_BYTES: usize = 255;

pub struct FecEncoder {
    rs: RsEncoder,
    ecc_len: usize,
}

pub struct FecDecoder {
    rs: RsDecoder,
    ecc_len: usize,
}

impl FecEncoder {
    pub fn new(ecc_len: usize) -> Self {
        Self {
            rs: RsEncoder::new(ecc_len),
            ecc_len,
        }
    }

    /// Append `ecc_len` redundancy bytes to the payload.
    pub fn encode(&self, payload: &[u8]) -> Result<Vec<u8>> {
        let max = RS_BLOCK_BYTES - self.ecc_len;
        if payload.len() > max {
            return Err(ModemError::PayloadTooLarge {
                len: payload.len(),
                max,
            });
        }
        Ok(self.rs.encode(payload).to_vec())
    }
}

impl FecDecoder {
    pub fn new(ecc_len: usize) -> Self {
        Self {
            rs: RsDecoder::new(ecc_len),
            ecc_len,
        }
    }

    /// Correct and strip the redundancy, returning the original payload.
    ///
    /// Failure is an expected outcome on noisy channels, not a fatal one:
    /// the error carries the raw received bytes so the caller can surface
    /// a diagnostic and move on to the next packet.
    pub fn decode(&self, encoded: &[u8]) -> Result<Vec<u8>> {
        if encoded.len() <= self.ecc_len || encoded.len() > RS_BLOCK_BYTES {
            return Err(ModemError::Uncorrectable {
                raw: encoded.to_vec(),
            });
        }
        match self.rs.correct(encoded, None) {
            Ok(corrected) => Ok(corrected.data().to_vec()),
            Err(_) => Err(ModemError::Uncorrectable {
                raw: encoded.to_vec(),
            }),
        }
    }
}
