//! Locally weighted linear regression (LOESS) along the sample index axis.
//!
//! Every output point is the value at `x = i` of a weighted least-squares line
//! fitted to the whole input, with Gaussian weights centered on `i`:
//!
//! ```text
//! w[j] = exp(-(j - i)² / (2c))
//! ```
//!
//! The kernel lives on the index axis, not the value axis, so it depends only
//! on `|j - i|`. It is tabulated once per pass and truncated where it
//! underflows to exactly `0.0`; those terms contribute nothing to any sum, so
//! the output is identical to evaluating all `n²` pairs.
//!
//! # Numerics
//!
//! The fit is computed in offsets relative to the output point
//! (`dx = j - i`, `dy = y[j] - y[i]`) with centered weighted moments. A
//! constant signal is reproduced exactly and a straight line is reproduced up
//! to rounding.
//!
//! # Example
//!
//! ```
//! use repcount::Loess;
//!
//! let loess = Loess::new(10.0).unwrap();
//! let line: Vec<f64> = (0..50).map(|i| 0.5 * i as f64 + 1.0).collect();
//! let smoothed = loess.smooth(&line).unwrap();
//!
//! assert_eq!(smoothed.len(), line.len());
//! assert!((smoothed[25] - line[25]).abs() < 1e-9);
//! ```

use alloc::vec::Vec;

use crate::error::{ConfigError, NumericError};

/// Gaussian-kernel local linear smoother.
///
/// # Performance
/// O(n · k) per pass where `k` is the kernel reach (bounded by `n`), so O(n²)
/// in the worst case. For `c = 10` the kernel underflows beyond ~122 samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Loess {
    bandwidth: f64,
}

impl Loess {
    /// Creates a smoother with bandwidth constant `c`.
    ///
    /// # Errors
    /// [`ConfigError::InvalidFilterConstant`] unless `c` is finite and > 0.
    pub fn new(bandwidth: f64) -> Result<Self, ConfigError> {
        if !(bandwidth > 0.0 && bandwidth.is_finite()) {
            return Err(ConfigError::InvalidFilterConstant(bandwidth));
        }
        Ok(Self { bandwidth })
    }

    /// Returns the bandwidth constant.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Kernel weight for a sample `offset` positions away from the fit point.
    pub fn weight(&self, offset: usize) -> f64 {
        let d = offset as f64;
        libm::exp(-(d * d) / (2.0 * self.bandwidth))
    }

    /// Smooths `y` into a newly allocated vector of the same length.
    ///
    /// # Errors
    /// See [`Loess::smooth_into`].
    pub fn smooth(&self, y: &[f64]) -> Result<Vec<f64>, NumericError> {
        let mut out = Vec::with_capacity(y.len());
        self.smooth_into(y, &mut out)?;
        Ok(out)
    }

    /// Smooths `y` into `out`, replacing its contents.
    ///
    /// On error `out` is left empty.
    ///
    /// # Errors
    /// - [`NumericError::NonFiniteInput`] if `y` holds a NaN or infinity
    /// - [`NumericError::DegenerateFit`] if the weighted variance of the
    ///   abscissa is zero at some point (a single sample, or a bandwidth so
    ///   small that every neighbour weight underflows)
    /// - [`NumericError::Overflow`] if finite samples are so far apart that
    ///   `y[j] - y[i]` or the fitted value leaves the `f64` range
    pub fn smooth_into(&self, y: &[f64], out: &mut Vec<f64>) -> Result<(), NumericError> {
        out.clear();
        if let Some(index) = y.iter().position(|v| !v.is_finite()) {
            return Err(NumericError::NonFiniteInput { index });
        }

        let n = y.len();
        if n == 0 {
            return Ok(());
        }

        let kernel = self.kernel(n);
        let reach = kernel.len() - 1;
        out.reserve(n);

        for i in 0..n {
            let lo = i.saturating_sub(reach);
            let hi = (i + reach).min(n - 1);
            let yi = y[i];

            let mut sw = 0.0;
            let mut sdx = 0.0;
            let mut sdy = 0.0;
            for (j, &yj) in y.iter().enumerate().take(hi + 1).skip(lo) {
                let w = kernel[j.abs_diff(i)];
                sw += w;
                sdx += w * (j as f64 - i as f64);
                sdy += w * (yj - yi);
            }
            let mean_dx = sdx / sw;
            let mean_dy = sdy / sw;

            let mut sxx = 0.0;
            let mut sxy = 0.0;
            for (j, &yj) in y.iter().enumerate().take(hi + 1).skip(lo) {
                let w = kernel[j.abs_diff(i)];
                let cx = (j as f64 - i as f64) - mean_dx;
                sxx += w * cx * cx;
                sxy += w * cx * ((yj - yi) - mean_dy);
            }

            if !(sxx > 0.0 && sxx.is_finite()) {
                out.clear();
                return Err(NumericError::DegenerateFit { index: i });
            }

            let slope = sxy / sxx;
            let value = yi + mean_dy - slope * mean_dx;
            if !value.is_finite() {
                out.clear();
                return Err(NumericError::Overflow { index: i });
            }
            out.push(value);
        }

        Ok(())
    }

    /// Weights for offsets `0..n`, cut at the first exact zero.
    fn kernel(&self, n: usize) -> Vec<f64> {
        let mut kernel = Vec::new();
        for offset in 0..n {
            let w = self.weight(offset);
            if w == 0.0 {
                break;
            }
            kernel.push(w);
        }
        kernel
    }
}
