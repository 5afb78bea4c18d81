//! In-place radix-2 FFT over fixed-size `f64` buffers.
//!
//! The twiddle table is computed once in [`Radix2Fft::new`]; [`forward`]
//! touches only the caller's buffers, so a transform costs the same every
//! block and never allocates.
//!
//! [`forward`]: Radix2Fft::forward

use core::f64::consts::PI;

use crate::constants::AUDIO_BLOCK_SAMPLES;

const N: usize = AUDIO_BLOCK_SAMPLES;
const HALF: usize = N / 2;

/// Forward FFT of length [`AUDIO_BLOCK_SAMPLES`].
pub struct Radix2Fft {
    /// `cos(2πk/N)` for `k` in `0..N/2`.
    twiddle_re: [f64; HALF],
    /// `-sin(2πk/N)` for `k` in `0..N/2`.
    twiddle_im: [f64; HALF],
}

impl Radix2Fft {
    pub fn new() -> Self {
        let mut twiddle_re = [0.0; HALF];
        let mut twiddle_im = [0.0; HALF];
        for k in 0..HALF {
            let angle = 2.0 * PI * k as f64 / N as f64;
            twiddle_re[k] = libm::cos(angle);
            twiddle_im[k] = -libm::sin(angle);
        }
        Radix2Fft { twiddle_re, twiddle_im }
    }

    /// Transform `(re, im)` in place into the frequency domain (unscaled).
    pub fn forward(&self, re: &mut [f64; N], im: &mut [f64; N]) {
        bit_reverse_permute(re, im);

        let mut len = 2;
        while len <= N {
            let half = len / 2;
            let stride = N / len;
            let mut start = 0;
            while start < N {
                for k in 0..half {
                    let wr = self.twiddle_re[k * stride];
                    let wi = self.twiddle_im[k * stride];
                    let a = start + k;
                    let b = a + half;
                    let tr = wr * re[b] - wi * im[b];
                    let ti = wr * im[b] + wi * re[b];
                    re[b] = re[a] - tr;
                    im[b] = im[a] - ti;
                    re[a] += tr;
                    im[a] += ti;
                }
                start += len;
            }
            len <<= 1;
        }
    }
}

impl Default for Radix2Fft {
    fn default() -> Self {
        Self::new()
    }
}

fn bit_reverse_permute(re: &mut [f64; N], im: &mut [f64; N]) {
    let bits = N.trailing_zeros();
    if bits == 0 {
        return;
    }
    for i in 0..N {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        if j > i {
            re.swap(i, j);
            im.swap(i, j);
        }
    }
}

/// Replace each bin of `re` with `|re + j·im|`.
pub fn complex_to_magnitude(re: &mut [f64; N], im: &[f64; N]) {
    for (r, &i) in re.iter_mut().zip(im.iter()) {
        *r = libm::sqrt(*r * *r + i * i);
    }
}
