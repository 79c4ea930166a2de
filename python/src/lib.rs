use pyo3::prelude::*;

mod counter;
mod detection;

use counter::RepCounter;

/// pyrepcount: online repetition counting for pose-tracking pipelines.
///
/// Feed one landmark coordinate per frame to `RepCounter.count()` and read
/// back the number of completed cycles.
#[pymodule]
fn pyrepcount(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<RepCounter>()?;
    m.add_function(wrap_pyfunction!(detection::find_peaks, m)?)?;
    m.add_function(wrap_pyfunction!(detection::peak_prominences, m)?)?;
    m.add_function(wrap_pyfunction!(detection::loess, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
