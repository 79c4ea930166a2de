//! Online repetition counting for scalar amplitude streams.
//!
//! Feed one sample per time step (for example the vertical position of a
//! tracked body landmark) and read back how many oscillation cycles have
//! occurred so far. The counter smooths its history with a Gaussian-kernel
//! LOESS and counts peaks that satisfy distance and prominence constraints.
//!
//! # Example
//!
//! ```
//! use repcount::{RepCounter, RepCounterConfig};
//!
//! let mut counter = RepCounter::new(RepCounterConfig::default()).unwrap();
//! for i in 0..200 {
//!     let y = libm::sin(2.0 * core::f64::consts::PI * i as f64 / 40.0);
//!     counter.count(y).unwrap();
//! }
//! assert_eq!(counter.rep_count(), 5);
//! ```

#![no_std]

extern crate alloc;

mod counter;
mod error;
mod loess;
pub mod peaks;

pub use counter::{RepCounter, RepCounterConfig};
pub use error::{ConfigError, NumericError};
pub use loess::Loess;
pub use peaks::find_peaks;
