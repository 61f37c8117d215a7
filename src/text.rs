use itertools::Itertools;

/// Space-separated plain decimal rendering of `values`.
///
/// Uses the shortest representation that reads back to the same
/// `f64`, so equal values always render identically.
pub fn render_values(values: &[f64]) -> String {
    values.iter().join(" ")
}
