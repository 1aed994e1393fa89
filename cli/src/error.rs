use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Modem(#[from] tonecast_core::ModemError),

    #[error("WAV container error: {0}")]
    Wav(#[from] hound::Error),

    #[error("unsupported WAV format: {0}")]
    UnsupportedWav(String),

    #[error("no default audio input device available")]
    NoInputDevice,

    #[error("failed to open capture stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start capture stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("capture stream fault: {0}")]
    Stream(#[from] cpal::StreamError),

    #[error("failed to launch transmitter {binary:?}: {source}")]
    TransmitterSpawn {
        binary: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
