//! Spectral peak extraction for the decode path.

use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

/// Finds the dominant frequency in fixed-size analysis windows.
///
/// The FFT is planned once for the nominal window length and the work
/// buffers are reused, so feeding windows from a real-time capture
/// callback does not allocate on the hot path.
pub struct SpectralAnalyzer {
    sample_rate: u32,
    window_len: usize,
    planner: FftPlanner<f32>,
    fft: Arc<dyn Fft<f32>>,
    buf: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl SpectralAnalyzer {
    pub fn new(sample_rate: u32, window_len: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(window_len);
        let scratch = vec![Complex::default(); fft.get_inplace_scratch_len()];
        Self {
            sample_rate,
            window_len,
            planner,
            fft,
            buf: Vec::with_capacity(window_len),
            scratch,
        }
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// The single strongest spectral component of the window, in Hz.
    ///
    /// No smoothing or denoising is applied; the modem assumes one tone
    /// per window and takes the loudest bin. A short trailing window (end
    /// of a recording) is analyzed at its own length.
    pub fn dominant_frequency(&mut self, samples: &[f32]) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }

        let fft = if samples.len() == self.window_len {
            Arc::clone(&self.fft)
        } else {
            let fft = self.planner.plan_fft_forward(samples.len());
            if self.scratch.len() < fft.get_inplace_scratch_len() {
                self.scratch
                    .resize(fft.get_inplace_scratch_len(), Complex::default());
            }
            fft
        };

        self.buf.clear();
        self.buf
            .extend(samples.iter().map(|&s| Complex::new(s, 0.0)));
        fft.process_with_scratch(&mut self.buf, &mut self.scratch);

        let mut peak_bin = 0;
        let mut peak_power = 0.0f32;
        for (bin, value) in self.buf.iter().enumerate() {
            let power = value.norm_sqr();
            if power > peak_power {
                peak_power = power;
                peak_bin = bin;
            }
        }

        let freq = peak_bin as f32 / self.buf.len() as f32 * self.sample_rate as f32;
        let nyquist = self.sample_rate as f32 / 2.0;
        // Bins above Nyquist are the negative-frequency image of the
        // real input; fold them back.
        if freq > nyquist {
            self.sample_rate as f32 - freq
        } else {
            freq
        }
    }
}
