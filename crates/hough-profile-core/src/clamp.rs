/// Default number of standard deviations above the mean kept by [`clamp_peaks`].
pub const DEFAULT_CLAMP_FACTOR: f64 = 1.5;

/// Cap every value at `mean + factor * std` (population std-dev).
///
/// Keeps one dominant angle from flattening the rest of a plotted profile.
/// The output has the input's length and no value grows; a constant input is
/// returned unchanged.
pub fn clamp_peaks(values: &[f64], factor: f64) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    let max_allowed = mean + factor * var.sqrt();

    values
        .iter()
        .map(|&v| if v > max_allowed { max_allowed } else { v })
        .collect()
}
