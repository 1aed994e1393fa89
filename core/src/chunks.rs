//! Bit-chunk packing: bytes to fixed-width symbols and back.

/// Split each byte into big-endian chunks of `chunk_bits` bits, most
/// significant chunk first. `chunk_bits` must divide 8; the reference
/// configuration uses 4, yielding two symbols per byte.
pub fn pack(bytes: &[u8], chunk_bits: u32) -> Vec<u8> {
    debug_assert!(chunk_bits >= 1 && chunk_bits <= 8 && 8 % chunk_bits == 0);
    let mask = ((1u16 << chunk_bits) - 1) as u8;
    let per_byte = (8 / chunk_bits) as usize;

    let mut symbols = Vec::with_capacity(bytes.len() * per_byte);
    for &byte in bytes {
        for k in 0..per_byte as u32 {
            let shift = 8 - chunk_bits * (k + 1);
            symbols.push((byte >> shift) & mask);
        }
    }
    symbols
}

/// Reassemble bytes from `chunk_bits`-wide symbols, most significant chunk
/// first. A trailing group that does not complete a byte is silently
/// discarded so a truncated packet still yields its whole bytes.
pub fn unpack(symbols: &[u8], chunk_bits: u32) -> Vec<u8> {
    debug_assert!(chunk_bits >= 1 && chunk_bits <= 8 && 8 % chunk_bits == 0);
    let mask = (1u16 << chunk_bits) - 1;

    let mut bytes = Vec::with_capacity(symbols.len() * chunk_bits as usize / 8);
    let mut acc: u16 = 0;
    let mut bits = 0;
    for &symbol in symbols {
        acc = (acc << chunk_bits) | (symbol as u16 & mask);
        bits += chunk_bits;
        if bits >= 8 {
            bits -= 8;
            bytes.push((acc >> bits) as u8);
        }
    }
    bytes
}
