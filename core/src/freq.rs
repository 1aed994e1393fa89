//! Symbol/frequency mapping and handshake tone matching.

use crate::config::ModemConfig;

/// Absolute matching tolerance for handshake detection, in Hz.
///
/// Wider than expected oscillator drift, narrower than the payload band
/// step so a payload tone can never match a handshake.
pub const FREQ_TOLERANCE_HZ: f32 = 20.0;

/// Frequency carrying the given payload symbol.
pub fn symbol_to_freq(config: &ModemConfig, symbol: u8) -> f32 {
    config.start_hz + config.step_hz * symbol as f32
}

/// Inverse mapping. Returns `None` for observations outside the payload
/// band: those are spurious readings (residual handshake tone, room
/// noise) and are dropped from the symbol stream rather than reported as
/// decode errors.
pub fn freq_to_symbol(config: &ModemConfig, freq: f32) -> Option<u8> {
    let slot = ((freq - config.start_hz) / config.step_hz).round();
    if slot < 0.0 || slot >= config.symbol_count() as f32 {
        return None;
    }
    Some(slot as u8)
}

/// Two observed frequencies count as the same tone within the fixed
/// absolute tolerance.
pub fn freqs_match(a: f32, b: f32) -> bool {
    (a - b).abs() < FREQ_TOLERANCE_HZ
}
