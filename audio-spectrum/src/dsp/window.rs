//! Hamming window.

use core::f64::consts::PI;

/// Fill `table` with a symmetric Hamming window:
/// `w[i] = 0.54 - 0.46 * cos(2πi / (n - 1))`.
///
/// A single-element table is set to `1.0`.
pub fn hamming(table: &mut [f64]) {
    let n = table.len();
    if n == 1 {
        table[0] = 1.0;
        return;
    }
    let denom = (n - 1) as f64;
    for (i, w) in table.iter_mut().enumerate() {
        *w = 0.54 - 0.46 * libm::cos(2.0 * PI * i as f64 / denom);
    }
}
