mod audio;
mod error;
mod listen;
mod transmit;

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{info, warn};
use tonecast_core::{Decoder, Encoder, ModemConfig};

use crate::error::Result;

#[derive(Parser)]
#[command(name = "tonecast")]
#[command(about = "Acoustic data modem: send short text messages as audio tones")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text to a WAV file, optionally handing it to an FM transmitter
    Encode {
        /// Text to encode; reads stdin when omitted
        text: Option<String>,

        /// Output WAV file
        #[arg(short, long, value_name = "OUTPUT.WAV")]
        output: PathBuf,

        /// Transmit frequency in MHz (76-108); omit to only save the WAV
        #[arg(long, value_name = "MHZ")]
        transmit: Option<f32>,

        /// External transmitter binary
        #[arg(long, default_value = "pi_fm_rds", value_name = "BIN")]
        transmitter: PathBuf,
    },

    /// Decode every packet found in a recorded WAV file
    Decode {
        /// Input WAV file
        #[arg(value_name = "INPUT.WAV")]
        input: PathBuf,
    },

    /// Decode packets live from the default microphone
    Listen,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = ModemConfig::default();

    match cli.command {
        Commands::Encode {
            text,
            output,
            transmit,
            transmitter,
        } => encode_command(config, text, &output, transmit, &transmitter),
        Commands::Decode { input } => decode_command(config, &input),
        Commands::Listen => listen::run(config),
    }
}

fn encode_command(
    config: ModemConfig,
    text: Option<String>,
    output: &PathBuf,
    transmit: Option<f32>,
    transmitter: &PathBuf,
) -> Result<()> {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf.trim_end_matches('\n').to_string()
        }
    };

    let encoder = Encoder::new(config.clone())?;
    let pcm = encoder.encode_to_pcm(&text)?;
    audio::write_wav(output, &pcm, config.sample_rate)?;
    info!(
        "encoded {} bytes as {} samples into {}",
        text.len(),
        pcm.len(),
        output.display()
    );
    println!("Saved {}", output.display());

    if let Some(freq_mhz) = transmit {
        transmit::run_until_enter(transmitter, freq_mhz, output)?;
    }
    Ok(())
}

fn decode_command(config: ModemConfig, input: &PathBuf) -> Result<()> {
    let (samples, sample_rate) = audio::read_wav_mono(input)?;
    if sample_rate != config.sample_rate {
        warn!(
            "{} is {sample_rate} Hz but the modem expects {} Hz; decoding may fail",
            input.display(),
            config.sample_rate
        );
    }
    info!("read {} samples from {}", samples.len(), input.display());

    let mut decoder = Decoder::new(config)?;
    let results = decoder.decode(&samples);
    if results.is_empty() {
        println!("No packets detected.");
        return Ok(());
    }
    for result in results {
        listen::report(result);
    }
    Ok(())
}
