//! Slice-level vector helpers over `f64`.
//!
//! Matrix work (eigen-decomposition, Cholesky) goes through `nalgebra` in
//! the discovery layer; these cover the per-vector hot paths. When compiled
//! with the `simd` feature, the dot product uses SIMD-accelerated kernels.

/// Dot product of two equal-length slices.
#[cfg(feature = "simd")]
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    use simsimd::SpatialSimilarity;
    f64::dot(a, b).unwrap_or(0.0)
}

#[cfg(not(feature = "simd"))]
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// L2 norm.
#[inline]
pub fn norm(v: &[f64]) -> f64 {
    dot(v, v).sqrt()
}

/// Squared Euclidean distance.
#[inline]
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// `y += alpha * x`
#[inline]
pub fn axpy(alpha: f64, x: &[f64], y: &mut [f64]) {
    for (yi, xi) in y.iter_mut().zip(x.iter()) {
        *yi += alpha * xi;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_and_norm() {
        assert!((dot(&[1.0, 2.0, 3.0], &[4.0, -5.0, 6.0]) - 12.0).abs() < 1e-12);
        assert!((norm(&[3.0, 4.0]) - 5.0).abs() < 1e-12);
        assert!((squared_distance(&[0.0, 0.0], &[3.0, 4.0]) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_axpy() {
        let mut y = vec![1.0, 1.0];
        axpy(2.0, &[1.0, -1.0], &mut y);
        assert_eq!(y, vec![3.0, -1.0]);
    }
}
