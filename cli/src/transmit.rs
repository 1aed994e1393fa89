//! Optional external FM transmitter hand-off.
//!
//! The modem's only obligation is the WAV file; the transmitter is an
//! external process (pi_fm_rds-compatible: `-freq <MHz> -audio <wav>`)
//! that radiates it until stopped.

use std::io::BufRead;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use log::info;

use crate::error::{CliError, Result};

pub fn spawn(binary: &Path, freq_mhz: f32, wav: &Path) -> Result<Child> {
    info!(
        "starting {} at {freq_mhz} MHz with {}",
        binary.display(),
        wav.display()
    );
    Command::new(binary)
        .arg("-freq")
        .arg(freq_mhz.to_string())
        .arg("-audio")
        .arg(wav)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| CliError::TransmitterSpawn {
            binary: binary.to_path_buf(),
            source,
        })
}

/// Transmit until the user presses Enter, then stop the process.
pub fn run_until_enter(binary: &Path, freq_mhz: f32, wav: &Path) -> Result<()> {
    let mut child = spawn(binary, freq_mhz, wav)?;
    println!("Transmitting at {freq_mhz} MHz. Press Enter to stop.");

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    child.kill()?;
    child.wait()?;
    Ok(())
}
