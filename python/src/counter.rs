//! Python bindings for the streaming repetition counter.

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::{PyArithmeticError, PyValueError};
use pyo3::prelude::*;
use repcount::{
    ConfigError, NumericError, RepCounter as RcRepCounter, RepCounterConfig,
};

pub(crate) fn config_err(e: ConfigError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

pub(crate) fn numeric_err(e: NumericError) -> PyErr {
    PyArithmeticError::new_err(e.to_string())
}

/// Online repetition counter for a 1D amplitude stream.
///
/// Call `count()` once per time step with the current amplitude (for example
/// the y-position of a tracked landmark). The return value is the number of
/// cycles detected in the stream so far.
///
/// # Example
/// ```python
/// import pyrepcount as rc
///
/// counter = rc.RepCounter(filter_constant=1.0)
/// for y in landmark_heights:
///     reps = counter.count(y)
/// print("number of reps:", reps)
/// ```
#[pyclass]
pub struct RepCounter {
    inner: RcRepCounter,
}

#[pymethods]
impl RepCounter {
    /// Create a new counter.
    ///
    /// Args:
    ///     max_buffer_size (int): Declared buffer capacity (not enforced).
    ///     min_buffer_size (int): Samples required before the first peak search.
    ///     distance (int): Minimum sample distance between two peaks (>= 1).
    ///     prominence (float): Minimum peak prominence (0.0 = no minimum).
    ///     filter_constant (float): LOESS bandwidth, must be > 0 when filtering.
    ///     use_filter (bool): Smooth the buffer before peak search.
    ///
    /// Raises:
    ///     ValueError: If the configuration is invalid.
    #[new]
    #[pyo3(signature = (
        max_buffer_size=1000,
        min_buffer_size=20,
        distance=10,
        prominence=0.0,
        filter_constant=10.0,
        use_filter=true
    ))]
    fn new(
        max_buffer_size: usize,
        min_buffer_size: usize,
        distance: usize,
        prominence: f64,
        filter_constant: f64,
        use_filter: bool,
    ) -> PyResult<Self> {
        let config = RepCounterConfig {
            max_buffer_size,
            min_buffer_size,
            distance,
            prominence,
            filter_constant,
            use_filter,
        };
        let inner = RcRepCounter::new(config).map_err(config_err)?;
        Ok(Self { inner })
    }

    /// Feed one sample and return the current rep count.
    ///
    /// Args:
    ///     x (float): Amplitude at this time step.
    ///
    /// Returns:
    ///     int: Number of cycles detected so far.
    ///
    /// Raises:
    ///     ArithmeticError: If `x` is not finite (the sample is dropped) or
    ///         the smoothing pass on this frame failed (the sample is kept).
    fn count(&mut self, x: f64) -> PyResult<usize> {
        self.inner.count(x).map_err(numeric_err)
    }

    /// Feed an array of samples and return the rep count after each one.
    ///
    /// Args:
    ///     samples (np.ndarray): 1D float64 array.
    ///
    /// Returns:
    ///     np.ndarray: 1D uint64 array of per-sample rep counts.
    fn count_batch<'py>(
        &mut self,
        py: Python<'py>,
        samples: PyReadonlyArray1<f64>,
    ) -> PyResult<Bound<'py, PyArray1<u64>>> {
        let slice = samples.as_slice()?;
        let mut output = Vec::with_capacity(slice.len());

        for &x in slice {
            let reps = self.inner.count(x).map_err(numeric_err)?;
            output.push(reps as u64);
        }

        Ok(PyArray1::from_vec(py, output))
    }

    /// Clear the buffer and the rep count.
    fn reset(&mut self) {
        self.inner.reset();
    }

    /// Rep count from the last completed peak search.
    #[getter]
    fn rep_count(&self) -> usize {
        self.inner.rep_count()
    }

    /// Samples received since construction or the last reset.
    #[getter]
    fn frame_count(&self) -> usize {
        self.inner.frame_count()
    }

    /// Copy of the raw sample buffer.
    #[getter]
    fn buffer<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice(py, self.inner.buffer())
    }

    /// Copy of the smoothed buffer from the last successful pass.
    #[getter]
    fn smoothed<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice(py, self.inner.smoothed())
    }

    fn __repr__(&self) -> String {
        let config = self.inner.config();
        format!(
            "RepCounter(distance={}, min_buffer_size={}, use_filter={}, reps={})",
            config.distance,
            config.min_buffer_size,
            config.use_filter,
            self.inner.rep_count()
        )
    }
}
