//! Error types for counter construction and numeric passes.

/// Errors raised while validating a [`RepCounterConfig`](crate::RepCounterConfig).
///
/// These surface from [`RepCounter::new`](crate::RepCounter::new) before any
/// sample is processed and are not recoverable by retrying.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// LOESS bandwidth is zero, negative or not finite while filtering is enabled
    #[error("filter constant must be greater than zero, got {0}")]
    InvalidFilterConstant(f64),

    /// Minimum peak distance is zero
    #[error("peak distance must be at least 1")]
    InvalidDistance,

    /// Minimum prominence is negative or NaN
    #[error("prominence must be a non-negative number, got {0}")]
    InvalidProminence(f64),
}

/// Errors raised while smoothing or while accepting a sample.
///
/// A numeric error only affects the call that produced it: the counter keeps
/// its last good smoothed buffer and rep count.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum NumericError {
    /// Sample handed to the counter was NaN or infinite
    #[error("sample is not finite: {value}")]
    NonFiniteSample { value: f64 },

    /// Input to the smoother contained a NaN or infinite value
    #[error("non-finite value at index {index}")]
    NonFiniteInput { index: usize },

    /// Weighted variance of the regression abscissa vanished or overflowed
    #[error("degenerate local regression at index {index}")]
    DegenerateFit { index: usize },

    /// Finite inputs too far apart for `f64`: a sample difference or the
    /// fitted value overflowed
    #[error("local regression overflowed at index {index}")]
    Overflow { index: usize },
}
