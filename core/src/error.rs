use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModemError {
    /// The packet's redundancy could not correct the observed corruption.
    /// Carries the raw received bytes for diagnostic display.
    #[error("Reed-Solomon correction failed for {} received bytes", raw.len())]
    Uncorrectable { raw: Vec<u8> },

    #[error("payload of {len} bytes exceeds the {max} byte packet limit")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("invalid modem configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ModemError>;
