//! Peak detection with minimum-distance and prominence constraints.
//!
//! Detection runs in three stages, in this order:
//!
//! 1. [`local_maxima`] - samples strictly higher than their neighbours. A flat
//!    top counts once, at its midpoint `(left + right) / 2` (integer division,
//!    so even-width plateaus report the left-middle sample). The first and
//!    last samples are never peaks.
//! 2. [`select_by_distance`] - candidates are ranked by height (ties by
//!    earlier index) and each kept peak suppresses every remaining candidate
//!    closer than `distance` samples.
//! 3. Prominence filter - peaks whose [`peak_prominence`] is below the
//!    minimum are dropped.
//!
//! # Example
//!
//! ```
//! use repcount::peaks::find_peaks;
//!
//! let signal = [0.0, 1.0, 0.0, 3.0, 0.0, 2.0, 0.0];
//! assert_eq!(find_peaks(&signal, 1, 0.0), vec![1, 3, 5]);
//! assert_eq!(find_peaks(&signal, 3, 0.0), vec![3]);
//! ```

use alloc::vec;
use alloc::vec::Vec;

/// Finds peaks in `signal` that are at least `distance` samples apart and at
/// least `min_prominence` high relative to their surroundings.
///
/// `distance <= 1` disables distance selection; `min_prominence <= 0.0`
/// disables the prominence filter.
pub fn find_peaks(signal: &[f64], distance: usize, min_prominence: f64) -> Vec<usize> {
    let maxima = local_maxima(signal);
    let mut peaks = select_by_distance(signal, &maxima, distance);

    if min_prominence > 0.0 {
        peaks.retain(|&peak| peak_prominence(signal, peak) >= min_prominence);
    }

    peaks
}

/// Returns the indices of all local maxima, in ascending order.
pub fn local_maxima(signal: &[f64]) -> Vec<usize> {
    let mut maxima = Vec::new();
    if signal.len() < 3 {
        return maxima;
    }

    let last = signal.len() - 1;
    let mut i = 1;
    while i < last {
        if signal[i - 1] < signal[i] {
            // Walk across a possible plateau
            let mut ahead = i + 1;
            while ahead < last && signal[ahead] == signal[i] {
                ahead += 1;
            }

            if signal[ahead] < signal[i] {
                maxima.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }

    maxima
}

/// Keeps the highest peaks such that no two are closer than `distance`.
///
/// `peaks` must be sorted ascending (as returned by [`local_maxima`]). The
/// result is sorted ascending.
pub fn select_by_distance(signal: &[f64], peaks: &[usize], distance: usize) -> Vec<usize> {
    if distance <= 1 || peaks.len() < 2 {
        return peaks.to_vec();
    }

    // Highest first; stable sort keeps earlier indices ahead on ties
    let mut order: Vec<usize> = (0..peaks.len()).collect();
    order.sort_by(|&a, &b| signal[peaks[b]].total_cmp(&signal[peaks[a]]));

    let mut keep = vec![true; peaks.len()];
    for &k in &order {
        if !keep[k] {
            continue;
        }

        let mut j = k;
        while j > 0 && peaks[k] - peaks[j - 1] < distance {
            j -= 1;
            keep[j] = false;
        }

        let mut j = k + 1;
        while j < peaks.len() && peaks[j] - peaks[k] < distance {
            keep[j] = false;
            j += 1;
        }
    }

    peaks
        .iter()
        .zip(keep)
        .filter_map(|(&peak, kept)| kept.then_some(peak))
        .collect()
}

/// Height of `signal[peak]` above the higher of its two bases.
///
/// Each base is the lowest sample reached when walking away from the peak
/// until the signal rises above the peak height or the slice ends.
///
/// # Panics
/// If `peak` is out of bounds.
pub fn peak_prominence(signal: &[f64], peak: usize) -> f64 {
    let height = signal[peak];

    let mut left_base = height;
    for &v in signal[..peak].iter().rev() {
        if v > height {
            break;
        }
        left_base = left_base.min(v);
    }

    let mut right_base = height;
    for &v in &signal[peak + 1..] {
        if v > height {
            break;
        }
        right_base = right_base.min(v);
    }

    height - left_base.max(right_base)
}
