use itertools::Itertools;

/// Discrete first derivative of uniformly spaced samples.
///
/// Central differences inside, one-sided differences at the two ends; the result has
/// the same length as the input. A single sample has zero slope.
pub fn first_derivative(values: &[f64], spacing: f64) -> Vec<f64> {
    let n = values.len();
    if n < 2 {
        return vec![0.0; n];
    }

    let mut slopes = Vec::with_capacity(n);
    slopes.push((values[1] - values[0]) / spacing);
    slopes.extend(
        values
            .iter()
            .tuple_windows()
            .map(|(before, _, after)| (after - before) / (2.0 * spacing)),
    );
    slopes.push((values[n - 1] - values[n - 2]) / spacing);
    slopes
}

/// Applies [`first_derivative`] `order` times; order zero returns the input unchanged.
pub fn derivative(values: Vec<f64>, spacing: f64, order: u32) -> Vec<f64> {
    (0..order).fold(values, |current, _| first_derivative(&current, spacing))
}
