/// Linearly rescales `values` so the smallest maps to -1 and the largest to 1.
///
/// A constant (or single-element) slice has no range to stretch and maps to
/// all zeros.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if !(range > 0.0) {
        return vec![0.0; values.len()];
    }

    values.iter()
        .map(|v| (v - min) / (range / 2.0) - 1.0)
        .collect()
}
