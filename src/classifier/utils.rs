use ndarray::Array1;

/// Plain Euclidean (L2) distance between two equal-length vectors.
pub(crate) fn euclidean_distance(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

/// Length-normalized (root-mean-square) distance. Comparable across
/// descriptor variants of different lengths, used by the centroid engine's
/// fixed acceptance threshold.
pub(crate) fn rms_distance(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let sum: f32 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum();
    (sum / a.len() as f32).sqrt()
}
