//! Python bindings for the stateless smoothing and peak primitives.

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use repcount::{peaks, Loess};

use crate::counter::{config_err, numeric_err};

/// Find peaks in a 1D signal.
///
/// Args:
///     signal (np.ndarray): 1D float64 array.
///     distance (int): Minimum sample distance between peaks.
///     prominence (float): Minimum prominence (0.0 = no minimum).
///
/// Returns:
///     np.ndarray: Peak indices (int64), ascending.
///
/// Example:
///     >>> find_peaks(np.array([0.0, 1.0, 0.0, 3.0, 0.0]), distance=1)
///     array([1, 3])
#[pyfunction]
#[pyo3(signature = (signal, distance=1, prominence=0.0))]
pub fn find_peaks<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    distance: usize,
    prominence: f64,
) -> PyResult<Bound<'py, PyArray1<i64>>> {
    if prominence.is_nan() || prominence < 0.0 {
        return Err(PyValueError::new_err("prominence must be non-negative"));
    }

    let slice = signal.as_slice()?;
    let found: Vec<i64> = peaks::find_peaks(slice, distance, prominence)
        .into_iter()
        .map(|p| p as i64)
        .collect();

    Ok(PyArray1::from_vec(py, found))
}

/// Prominence of each given peak.
///
/// Args:
///     signal (np.ndarray): 1D float64 array.
///     peaks (list[int]): Peak indices into `signal`.
///
/// Returns:
///     np.ndarray: Prominence per peak (float64).
#[pyfunction]
pub fn peak_prominences<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    peaks: Vec<usize>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let slice = signal.as_slice()?;
    if let Some(&bad) = peaks.iter().find(|&&p| p >= slice.len()) {
        return Err(PyValueError::new_err(format!(
            "peak index {} out of bounds for signal of length {}",
            bad,
            slice.len()
        )));
    }

    let prominences: Vec<f64> = peaks
        .iter()
        .map(|&p| repcount::peaks::peak_prominence(slice, p))
        .collect();

    Ok(PyArray1::from_vec(py, prominences))
}

/// LOESS-smooth a 1D signal with a Gaussian kernel on the index axis.
///
/// Args:
///     signal (np.ndarray): 1D float64 array.
///     c (float): Bandwidth constant (> 0).
///
/// Returns:
///     np.ndarray: Smoothed signal, same length as the input.
///
/// Raises:
///     ValueError: If `c` is not positive.
///     ArithmeticError: If the signal holds NaN/inf, the fit is degenerate,
///         or the samples are large enough to overflow.
#[pyfunction]
pub fn loess<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    c: f64,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let smoother = Loess::new(c).map_err(config_err)?;
    let smoothed = smoother
        .smooth(signal.as_slice()?)
        .map_err(numeric_err)?;
    Ok(PyArray1::from_vec(py, smoothed))
}
