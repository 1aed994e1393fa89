use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tonecast_core::{Decoder, Encoder, Message, ModemConfig, ModemError};

fn to_float(pcm: &[i16]) -> Vec<f32> {
    pcm.iter().map(|&s| s as f32 / 32768.0).collect()
}

fn encode_to_float(encoder: &Encoder, text: &str) -> Vec<f32> {
    to_float(&encoder.encode_to_pcm(text).expect("encode failed"))
}

fn decode_single_text(decoder: &mut Decoder, samples: &[f32]) -> String {
    let mut results = decoder.decode(samples);
    assert_eq!(results.len(), 1, "expected exactly one packet");
    match results.remove(0).expect("packet failed to decode") {
        Message::Text(text) => text,
        Message::Binary(bytes) => panic!("expected text, got bytes {bytes:02X?}"),
    }
}

#[test]
fn test_text_round_trip() {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = ModemConfig::default();
    let encoder = Encoder::new(config.clone()).unwrap();
    let mut decoder = Decoder::new(config).unwrap();

    for text in ["hi", "hello world", "tonecast 1.0", "ünïcødé ok"] {
        let samples = encode_to_float(&encoder, text);
        assert_eq!(decode_single_text(&mut decoder, &samples), text);
    }
}

#[test]
fn test_round_trip_with_gaussian_noise() {
    let config = ModemConfig::default();
    let encoder = Encoder::new(config.clone()).unwrap();
    let mut decoder = Decoder::new(config).unwrap();

    let mut samples = encode_to_float(&encoder, "noisy channel");
    let mut rng = StdRng::seed_from_u64(7);
    let noise = Normal::new(0.0f32, 0.05).unwrap();
    for sample in samples.iter_mut() {
        *sample += noise.sample(&mut rng);
    }

    assert_eq!(decode_single_text(&mut decoder, &samples), "noisy channel");
}

#[test]
fn test_round_trip_with_surrounding_silence() {
    let config = ModemConfig::default();
    let encoder = Encoder::new(config.clone()).unwrap();
    let mut decoder = Decoder::new(config.clone()).unwrap();

    // Whole windows of silence keep the capture aligned with tones
    let pad = vec![0.0f32; config.window_samples() * 10];
    let mut samples = pad.clone();
    samples.extend(encode_to_float(&encoder, "padded"));
    samples.extend(pad);

    assert_eq!(decode_single_text(&mut decoder, &samples), "padded");
}

#[test]
fn test_two_packets_in_one_stream() {
    let config = ModemConfig::default();
    let encoder = Encoder::new(config.clone()).unwrap();
    let mut decoder = Decoder::new(config.clone()).unwrap();

    let mut samples = encode_to_float(&encoder, "first");
    samples.extend(vec![0.0f32; config.window_samples() * 4]);
    samples.extend(encode_to_float(&encoder, "second"));

    let results = decoder.decode(&samples);
    let texts: Vec<_> = results
        .into_iter()
        .map(|r| match r.unwrap() {
            Message::Text(text) => text,
            Message::Binary(bytes) => panic!("unexpected binary packet {bytes:02X?}"),
        })
        .collect();
    assert_eq!(texts, vec!["first", "second"]);
}

#[test]
fn test_corrupted_packet_reported_then_next_decodes() {
    let config = ModemConfig::default();
    let encoder = Encoder::new(config.clone()).unwrap();
    let mut decoder = Decoder::new(config.clone()).unwrap();

    let tone = config.tone_samples();
    let mut samples = encode_to_float(&encoder, "garbled");
    // Wipe out four payload tones, far beyond the 2-byte correction
    // capacity, while leaving the handshakes intact
    for sample in samples[tone * 3..tone * 7].iter_mut() {
        *sample = 0.0;
    }
    samples.extend(encode_to_float(&encoder, "clean"));

    let results = decoder.decode(&samples);
    assert_eq!(results.len(), 2);
    assert!(
        matches!(results[0], Err(ModemError::Uncorrectable { .. })),
        "first packet should fail FEC, got {:?}",
        results[0]
    );
    assert_eq!(
        results[1].as_ref().unwrap(),
        &Message::Text("clean".to_string())
    );
}

#[test]
fn test_random_printable_payload_round_trip() {
    let config = ModemConfig::default();
    let encoder = Encoder::new(config.clone()).unwrap();
    let mut decoder = Decoder::new(config.clone()).unwrap();

    let mut rng = StdRng::seed_from_u64(42);
    let text: String = (0..32)
        .map(|_| rng.gen_range(b' '..=b'~') as char)
        .collect();
    let samples = encode_to_float(&encoder, &text);
    assert_eq!(decode_single_text(&mut decoder, &samples), text);
}

#[test]
fn test_longer_message_round_trip() {
    let config = ModemConfig::default();
    let encoder = Encoder::new(config.clone()).unwrap();
    let mut decoder = Decoder::new(config).unwrap();

    let text = "the quick brown fox jumps over the lazy dog 0123456789";
    let samples = encode_to_float(&encoder, text);
    assert_eq!(decode_single_text(&mut decoder, &samples), text);
}

#[test]
fn test_shared_config_variant_round_trip() {
    // A non-default but valid tuning: coarser symbols, lower band
    let config = ModemConfig {
        handshake_start_hz: 9000.0,
        handshake_end_hz: 9600.0,
        start_hz: 800.0,
        step_hz: 400.0,
        bits: 2,
        fec_bytes: 8,
        sample_rate: 48000,
        tone_duration: 0.05,
    };
    config.validate().unwrap();

    let encoder = Encoder::new(config.clone()).unwrap();
    let mut decoder = Decoder::new(config).unwrap();
    let samples = encode_to_float(&encoder, "retuned");
    assert_eq!(decode_single_text(&mut decoder, &samples), "retuned");
}
