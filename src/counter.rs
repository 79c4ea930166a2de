//! Streaming repetition counter.
//!
//! [`RepCounter`] accumulates one amplitude sample per call (for example the
//! vertical position of a tracked body landmark) and re-estimates how many
//! oscillation cycles the whole history contains.
//!
//! # Algorithm
//!
//! Each call to [`RepCounter::count`] appends the sample, then:
//! 1. Returns the previous count until `min_buffer_size` samples are buffered.
//! 2. Recomputes only on frames where `frame_count % max(distance / 2, 1) == 0`.
//! 3. On a recompute frame, optionally smooths the entire buffer with
//!    [`Loess`], then runs [`find_peaks`] over it from index 0.
//! 4. The number of peaks is the new rep count.
//!
//! Every pass restarts from scratch over the full history, so a pass costs
//! O(n²) in the buffer length; the recompute throttle bounds how often that
//! cost is paid.
//!
//! # Example
//!
//! ```
//! use repcount::{RepCounter, RepCounterConfig};
//!
//! let config = RepCounterConfig::default().with_use_filter(false);
//! let mut counter = RepCounter::new(config).unwrap();
//!
//! let mut reps = 0;
//! for i in 0..200 {
//!     let x = libm::sin(2.0 * core::f64::consts::PI * i as f64 / 40.0);
//!     reps = counter.count(x).unwrap();
//! }
//! assert_eq!(reps, 5);
//! ```

use alloc::vec::Vec;
use core::mem;

use crate::error::{ConfigError, NumericError};
use crate::loess::Loess;
use crate::peaks::find_peaks;

/// Configuration for a [`RepCounter`].
///
/// Immutable once the counter is built.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RepCounterConfig {
    /// Declared buffer capacity. Stored but not enforced: the buffer grows
    /// until [`RepCounter::reset`].
    pub max_buffer_size: usize,

    /// Samples required before any peak search is attempted
    pub min_buffer_size: usize,

    /// Minimum index separation between accepted peaks; also sets the
    /// recompute interval to `distance / 2`
    pub distance: usize,

    /// Minimum peak prominence (0.0 = no minimum)
    pub prominence: f64,

    /// LOESS bandwidth constant, must be > 0 when `use_filter` is set
    pub filter_constant: f64,

    /// Smooth the buffer before peak search
    pub use_filter: bool,
}

impl Default for RepCounterConfig {
    fn default() -> Self {
        Self {
            max_buffer_size: 1000,
            min_buffer_size: 20,
            distance: 10,
            prominence: 0.0,
            filter_constant: 10.0,
            use_filter: true,
        }
    }
}

impl RepCounterConfig {
    /// Checks the configuration without building a counter.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidDistance`] if `distance == 0`
    /// - [`ConfigError::InvalidProminence`] if `prominence` is negative or NaN
    /// - [`ConfigError::InvalidFilterConstant`] if filtering is enabled and
    ///   `filter_constant` is not a finite positive number
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.distance == 0 {
            return Err(ConfigError::InvalidDistance);
        }
        if self.prominence.is_nan() || self.prominence < 0.0 {
            return Err(ConfigError::InvalidProminence(self.prominence));
        }
        if self.use_filter {
            Loess::new(self.filter_constant)?;
        }
        Ok(())
    }

    pub fn with_max_buffer_size(mut self, max_buffer_size: usize) -> Self {
        self.max_buffer_size = max_buffer_size;
        self
    }

    pub fn with_min_buffer_size(mut self, min_buffer_size: usize) -> Self {
        self.min_buffer_size = min_buffer_size;
        self
    }

    pub fn with_distance(mut self, distance: usize) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_prominence(mut self, prominence: f64) -> Self {
        self.prominence = prominence;
        self
    }

    pub fn with_filter_constant(mut self, filter_constant: f64) -> Self {
        self.filter_constant = filter_constant;
        self
    }

    pub fn with_use_filter(mut self, use_filter: bool) -> Self {
        self.use_filter = use_filter;
        self
    }
}

/// Online repetition counter over a scalar sample stream.
///
/// Owns its buffers exclusively; there is no internal locking, so share it
/// across threads only behind external synchronization.
///
/// # Invariants
/// - `buffer().len() == frame_count()`
/// - `rep_count()` is the peak count of the last completed pass, or 0
/// - `smoothed()` is empty or as long as the buffer was at its last
///   successful pass
#[derive(Debug, Clone)]
pub struct RepCounter {
    config: RepCounterConfig,
    smoother: Option<Loess>,
    recompute_interval: usize,
    buffer: Vec<f64>,
    smoothed: Vec<f64>,
    scratch: Vec<f64>,
    frame_count: usize,
    rep_count: usize,
}

impl RepCounter {
    /// Builds an empty counter.
    ///
    /// # Errors
    /// Any [`ConfigError`] reported by [`RepCounterConfig::validate`].
    pub fn new(config: RepCounterConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let smoother = if config.use_filter {
            Some(Loess::new(config.filter_constant)?)
        } else {
            None
        };

        Ok(Self {
            config,
            smoother,
            recompute_interval: (config.distance / 2).max(1),
            buffer: Vec::new(),
            smoothed: Vec::new(),
            scratch: Vec::new(),
            frame_count: 0,
            rep_count: 0,
        })
    }

    /// Feeds one sample and returns the current rep count.
    ///
    /// A finite sample is always appended. If the recompute pass it triggers
    /// fails, the error is returned and the previous count and smoothed
    /// buffer are kept; the next recompute frame retries with the longer
    /// buffer.
    ///
    /// # Count can drop
    /// Each pass recounts the whole buffer, so the returned value is not
    /// guaranteed to be non-decreasing within a reset epoch. On clean traces
    /// it is, but on noisy ones it can fall for a few frames:
    /// - a new, taller local maximum near the end of the buffer suppresses an
    ///   earlier peak within `distance`, then stops counting itself because
    ///   a later sample climbs past it or the prominence check rejects it
    /// - a smoothed peak near the end of the buffer flattens out once later
    ///   samples pull the local fit through it
    ///
    /// A nonzero `prominence` above the noise level avoids both in practice.
    ///
    /// # Errors
    /// - [`NumericError::NonFiniteSample`] if `x` is NaN or infinite; the
    ///   sample is discarded and no state changes
    /// - [`NumericError::DegenerateFit`] or [`NumericError::Overflow`] if
    ///   smoothing fails on this frame
    pub fn count(&mut self, x: f64) -> Result<usize, NumericError> {
        if !x.is_finite() {
            tracing::warn!(value = x, frame = self.frame_count, "rejected non-finite sample");
            return Err(NumericError::NonFiniteSample { value: x });
        }

        self.buffer.push(x);
        self.frame_count += 1;

        if self.frame_count < self.config.min_buffer_size {
            return Ok(self.rep_count);
        }

        if !self.is_recompute_frame(self.frame_count) {
            tracing::trace!(frame = self.frame_count, "throttled frame");
            return Ok(self.rep_count);
        }

        self.recompute()
    }

    /// Feeds every sample in order and returns the count after the last one.
    ///
    /// # Errors
    /// Stops at the first sample whose [`RepCounter::count`] fails.
    pub fn count_batch(&mut self, samples: &[f64]) -> Result<usize, NumericError> {
        for &x in samples {
            self.count(x)?;
        }
        Ok(self.rep_count)
    }

    /// Clears all samples and counts.
    pub fn reset(&mut self) {
        tracing::debug!(frames = self.frame_count, reps = self.rep_count, "counter reset");
        self.buffer.clear();
        self.smoothed.clear();
        self.scratch.clear();
        self.frame_count = 0;
        self.rep_count = 0;
    }

    /// Whether a peak search runs when the buffer holds `frame` samples
    /// (ignoring `min_buffer_size`).
    pub fn is_recompute_frame(&self, frame: usize) -> bool {
        frame % self.recompute_interval == 0
    }

    /// Frames between two peak searches: `max(distance / 2, 1)`.
    pub fn recompute_interval(&self) -> usize {
        self.recompute_interval
    }

    pub fn config(&self) -> &RepCounterConfig {
        &self.config
    }

    /// Count produced by the last completed pass.
    pub fn rep_count(&self) -> usize {
        self.rep_count
    }

    /// Samples received since construction or the last reset.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Every sample received since construction or the last reset.
    pub fn buffer(&self) -> &[f64] {
        &self.buffer
    }

    /// Smoothed buffer from the last successful pass (empty when filtering is
    /// disabled or no pass has run yet).
    pub fn smoothed(&self) -> &[f64] {
        &self.smoothed
    }

    fn recompute(&mut self) -> Result<usize, NumericError> {
        let peaks = match &self.smoother {
            Some(loess) => {
                if let Err(err) = loess.smooth_into(&self.buffer, &mut self.scratch) {
                    tracing::warn!(
                        frame = self.frame_count,
                        error = %err,
                        "smoothing pass failed, keeping previous count"
                    );
                    return Err(err);
                }
                mem::swap(&mut self.smoothed, &mut self.scratch);
                find_peaks(&self.smoothed, self.config.distance, self.config.prominence)
            }
            None => find_peaks(&self.buffer, self.config.distance, self.config.prominence),
        };

        self.rep_count = peaks.len();
        tracing::debug!(
            frame = self.frame_count,
            samples = self.buffer.len(),
            reps = self.rep_count,
            "peak search complete"
        );
        Ok(self.rep_count)
    }
}
