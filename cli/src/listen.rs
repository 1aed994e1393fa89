//! Live capture: microphone windows into the streaming decoder.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{Receiver, Sender};
use log::info;
use tonecast_core::{Decoder, Message, ModemConfig};

use crate::error::{CliError, Result};

/// Spare capture buffers kept circulating between the consumer and the
/// callback. If the consumer stalls long enough to exhaust the pool, the
/// callback falls back to a fresh allocation rather than dropping audio.
const BUFFER_POOL: usize = 8;

/// What the capture callback hands to the consumer thread.
enum CaptureEvent {
    /// One filled analysis window.
    Window(Vec<f32>),
    /// The device reported a fault; terminal for this stream.
    Fault(cpal::StreamError),
}

/// Capture from the default input device and print decoded packets until
/// interrupted or the device faults.
///
/// The audio callback only fills recycled fixed-size window buffers and
/// hands completed windows over a channel; spectral analysis, FEC decode
/// and display all run on this thread so the capture callback never
/// blocks. A stream fault is forwarded over the same channel and ends the
/// run with an error.
pub fn run(config: ModemConfig) -> Result<()> {
    let mut decoder = Decoder::new(config.clone())?;
    let window = config.window_samples();

    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or(CliError::NoInputDevice)?;
    if let Ok(name) = device.name() {
        info!("capturing from {name}");
    }

    let stream_config = cpal::StreamConfig {
        channels: 1,
        sample_rate: cpal::SampleRate(config.sample_rate),
        buffer_size: cpal::BufferSize::Default,
    };

    let (tx, rx) = crossbeam_channel::unbounded::<CaptureEvent>();
    let (recycle_tx, recycle_rx) = crossbeam_channel::bounded::<Vec<f32>>(BUFFER_POOL);
    for _ in 0..BUFFER_POOL {
        let _ = recycle_tx.send(Vec::with_capacity(window));
    }

    let fault_tx = tx.clone();
    let mut pending = Vec::with_capacity(window);
    let stream = device.build_input_stream(
        &stream_config,
        move |data: &[f32], _: &cpal::InputCallbackInfo| {
            for &sample in data {
                pending.push(sample);
                if pending.len() == window {
                    let next = recycle_rx.try_recv().unwrap_or_default();
                    let full = std::mem::replace(&mut pending, next);
                    let _ = tx.send(CaptureEvent::Window(full));
                }
            }
        },
        move |err| {
            let _ = fault_tx.send(CaptureEvent::Fault(err));
        },
        None,
    )?;
    stream.play()?;

    println!("Listening... press Ctrl+C to stop.");
    consume(&rx, &recycle_tx, &mut decoder)
}

/// Drain capture events until the stream faults or every sender is gone.
///
/// Drained window buffers go back to the callback through the recycle
/// channel. A device fault ends the stream: no further windows can be
/// produced, so it surfaces as the terminal error of this run.
fn consume(
    rx: &Receiver<CaptureEvent>,
    recycle_tx: &Sender<Vec<f32>>,
    decoder: &mut Decoder,
) -> Result<()> {
    for event in rx.iter() {
        match event {
            CaptureEvent::Window(mut samples) => {
                if let Some(result) = decoder.push_window(&samples) {
                    report(result);
                }
                samples.clear();
                let _ = recycle_tx.try_send(samples);
            }
            CaptureEvent::Fault(err) => return Err(CliError::Stream(err)),
        }
    }
    Ok(())
}

/// Print one packet outcome.
pub fn report(result: tonecast_core::Result<Message>) {
    match result {
        Ok(Message::Text(text)) => println!("{text}"),
        Ok(Message::Binary(bytes)) => println!("(non-text payload) {bytes:02X?}"),
        Err(err) => eprintln!("packet dropped: {err}"),
    }
}
