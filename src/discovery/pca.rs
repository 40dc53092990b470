//! Batch principal component analysis.
//!
//! The data is mean-centred and the covariance is normalised by `N − 1`.
//! Whichever of the two equivalent symmetric problems is smaller gets
//! diagonalised with `nalgebra`'s [`SymmetricEigen`]:
//!
//! - `N ≥ D`: the `D × D` covariance `XᵀX / (N−1)`; eigenvectors are the
//!   components directly.
//! - `N < D`: the `N × N` Gram matrix `XXᵀ / (N−1)`; an eigenvector `u`
//!   maps back to the component `Xᵀu / ‖Xᵀu‖`.
//!
//! Components are unit-norm, ordered by descending variance, and
//! sign-normalised so their largest-magnitude coordinate is positive, which
//! makes results reproducible across solvers.

use crate::error::{FaceForgeError, Result};
use crate::kernel::linalg::{axpy, dot, norm};
use nalgebra::{DMatrix, SymmetricEigen};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Eigenvalues below this fraction of the total variance are treated as
/// exact zeros on the Gram path.
const NULL_VARIANCE_RATIO: f64 = 1e-10;

/// Eigen-solver parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PcaConfig {
    /// Convergence threshold for the off-diagonal entries.
    pub epsilon: f64,
    /// Iteration cap for the eigen-solver; `0` means no cap.
    pub max_iterations: usize,
}

impl Default for PcaConfig {
    fn default() -> Self {
        Self {
            epsilon: f64::EPSILON,
            max_iterations: 0,
        }
    }
}

/// Result of a PCA fit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PcaDirections {
    /// `k` unit-norm components, each of length `D`.
    pub components: Vec<Vec<f64>>,
    /// Variance along each component.
    pub explained_variance: Vec<f64>,
    /// Fraction of total variance along each component, non-increasing.
    pub explained_variance_ratio: Vec<f64>,
    /// Column means subtracted before the decomposition.
    pub mean: Vec<f64>,
}

impl PcaDirections {
    pub fn n_components(&self) -> usize {
        self.components.len()
    }

    /// Coordinates of `x` in the component basis.
    pub fn project(&self, x: &[f64]) -> Result<Vec<f64>> {
        if x.len() != self.mean.len() {
            return Err(FaceForgeError::DimensionMismatch {
                expected: self.mean.len(),
                got: x.len(),
            });
        }
        let centred: Vec<f64> = x.iter().zip(&self.mean).map(|(xi, mi)| xi - mi).collect();
        Ok(self.components.iter().map(|c| dot(c, &centred)).collect())
    }
}

/// Fit `n_components` principal directions of the row-major `rows × dim`
/// matrix `data`.
pub fn fit_pca(data: &[f64], rows: usize, dim: usize, n_components: usize, config: &PcaConfig) -> Result<PcaDirections> {
    fit_pca_via(data, rows, dim, n_components, config, rows < dim)
}

/// `fit_pca` with the Gram/covariance choice made by the caller.
fn fit_pca_via(
    data: &[f64],
    rows: usize,
    dim: usize,
    n_components: usize,
    config: &PcaConfig,
    use_gram: bool,
) -> Result<PcaDirections> {
    let max_k = rows.min(dim);
    if n_components == 0 || n_components > max_k {
        return Err(FaceForgeError::InvalidArgument(format!(
            "n_components must be in [1, {}], got {}",
            max_k, n_components
        )));
    }

    let mut mean = vec![0.0; dim];
    for row in data.chunks_exact(dim) {
        axpy(1.0 / rows as f64, row, &mut mean);
    }
    let centred: Vec<f64> = data
        .chunks_exact(dim)
        .flat_map(|row| row.iter().zip(&mean).map(|(x, m)| x - m))
        .collect();

    let denom = rows.saturating_sub(1).max(1) as f64;
    let total_variance = centred.iter().map(|x| x * x).sum::<f64>() / denom;
    if total_variance <= 0.0 || !total_variance.is_finite() {
        return Err(FaceForgeError::DegenerateComputation(format!(
            "total variance is {} (all rows identical?)",
            total_variance
        )));
    }

    let x = DMatrix::from_row_slice(rows, dim, &centred);
    let matrix = if use_gram {
        &x * x.transpose() / denom
    } else {
        x.tr_mul(&x) / denom
    };
    let n = matrix.nrows();

    let eig = SymmetricEigen::try_new(matrix, config.epsilon, config.max_iterations).ok_or_else(|| {
        warn!(n, max_iterations = config.max_iterations, "PCA eigen-solver hit the iteration cap");
        FaceForgeError::DegenerateComputation(format!(
            "eigen-solver did not converge within {} iterations",
            config.max_iterations
        ))
    })?;

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| eig.eigenvalues[b].total_cmp(&eig.eigenvalues[a]));

    let mut components: Vec<Vec<f64>> = Vec::with_capacity(n_components);
    let mut explained_variance = Vec::with_capacity(n_components);
    for &idx in order.iter().take(n_components) {
        let value = eig.eigenvalues[idx].max(0.0);
        let u = eig.eigenvectors.column(idx);
        let mut component: Vec<f64> = if !use_gram {
            u.iter().copied().collect()
        } else if value > NULL_VARIANCE_RATIO * total_variance {
            let v = x.tr_mul(&u);
            let length = v.norm();
            v.iter().map(|c| c / length).collect()
        } else {
            // Zero-variance direction: Xᵀu vanishes, so any unit vector
            // orthogonal to the previous components will do.
            orthogonal_complement_vector(&components, dim).ok_or_else(|| {
                FaceForgeError::DegenerateComputation("could not complete component basis".into())
            })?
        };
        fix_sign(&mut component);

        components.push(component);
        explained_variance.push(value);
    }

    let explained_variance_ratio = explained_variance.iter().map(|v| v / total_variance).collect();

    debug!(rows, dim, n_components, gram = use_gram, total_variance, "fit_pca");

    Ok(PcaDirections {
        components,
        explained_variance,
        explained_variance_ratio,
        mean,
    })
}

/// Gram–Schmidt the standard basis against `basis`, returning the first
/// vector that survives.
fn orthogonal_complement_vector(basis: &[Vec<f64>], dim: usize) -> Option<Vec<f64>> {
    (0..dim).find_map(|axis| {
        let mut candidate = vec![0.0; dim];
        candidate[axis] = 1.0;
        for b in basis {
            let proj = dot(&candidate, b);
            axpy(-proj, b, &mut candidate);
        }
        let length = norm(&candidate);
        (length > 1e-6).then(|| candidate.into_iter().map(|c| c / length).collect())
    })
}

fn fix_sign(component: &mut [f64]) {
    let pivot = component
        .iter()
        .copied()
        .fold(0.0f64, |best, c| if c.abs() > best.abs() { c } else { best });
    if pivot < 0.0 {
        component.iter_mut().for_each(|c| *c = -*c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::test_support::{gaussian_rows, low_rank_rows};

    fn flat(rows: &[Vec<f64>]) -> Vec<f64> {
        rows.iter().flatten().copied().collect()
    }

    #[test]
    fn test_shape_and_ordering() {
        let rows = gaussian_rows(100, 5, 42);
        let pca = fit_pca(&flat(&rows), 100, 5, 2, &PcaConfig::default()).unwrap();

        assert_eq!(pca.components.len(), 2);
        assert!(pca.components.iter().all(|c| c.len() == 5));
        assert_eq!(pca.explained_variance_ratio.len(), 2);

        let r = &pca.explained_variance_ratio;
        assert!(r.iter().all(|&x| (0.0..=1.0).contains(&x)));
        assert!(r[0] >= r[1]);
        assert!(r.iter().sum::<f64>() <= 1.0 + 1e-12);
    }

    #[test]
    fn test_components_orthonormal() {
        let rows = gaussian_rows(60, 6, 7);
        let pca = fit_pca(&flat(&rows), 60, 6, 6, &PcaConfig::default()).unwrap();
        for i in 0..6 {
            for j in 0..6 {
                let d = dot(&pca.components[i], &pca.components[j]);
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((d - expected).abs() < 1e-9, "<c{}, c{}> = {}", i, j, d);
            }
        }
        let total: f64 = pca.explained_variance_ratio.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_recovers_dominant_axis() {
        // Variance 100 along x, 1 along y.
        let rows: Vec<Vec<f64>> = gaussian_rows(200, 2, 3)
            .into_iter()
            .map(|r| vec![10.0 * r[0], r[1]])
            .collect();
        let pca = fit_pca(&flat(&rows), 200, 2, 1, &PcaConfig::default()).unwrap();
        assert!(pca.components[0][0] > 0.99, "got {:?}", pca.components[0]);
        assert!(pca.explained_variance_ratio[0] > 0.95);
    }

    #[test]
    fn test_gram_path_variance_is_rayleigh_quotient() {
        // 8 samples in 20-D takes the Gram path.
        let rows = low_rank_rows(8, 20, 3, 11);
        let data = flat(&rows);
        let pca = fit_pca(&data, 8, 20, 3, &PcaConfig::default()).unwrap();

        // Rayleigh quotient of each component under the sample covariance
        // equals its explained variance.
        let mean = &pca.mean;
        for (c, &var) in pca.components.iter().zip(&pca.explained_variance) {
            let q: f64 = rows
                .iter()
                .map(|r| {
                    let centred: Vec<f64> = r.iter().zip(mean).map(|(x, m)| x - m).collect();
                    dot(&centred, c).powi(2)
                })
                .sum::<f64>()
                / 7.0;
            assert!((q - var).abs() < 1e-8 * var.max(1.0), "{} vs {}", q, var);
        }

        // Rank-3 data: three components explain everything.
        let total: f64 = pca.explained_variance_ratio.iter().sum();
        assert!((total - 1.0).abs() < 1e-9, "total {}", total);
    }

    #[test]
    fn test_gram_path_completes_null_space() {
        // N = 3 < D = 4: centring leaves rank 2, the third component has
        // zero variance but must still be a unit vector orthogonal to the rest.
        let data = vec![
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0,
        ];
        let pca = fit_pca(&data, 3, 4, 3, &PcaConfig::default()).unwrap();
        assert_eq!(pca.components.len(), 3);
        assert!(pca.explained_variance[2].abs() < 1e-9);
        for i in 0..3 {
            assert!((norm(&pca.components[i]) - 1.0).abs() < 1e-9);
            for j in 0..i {
                assert!(dot(&pca.components[i], &pca.components[j]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_component_count_bounds() {
        let rows = gaussian_rows(4, 3, 1);
        let data = flat(&rows);
        for k in [0, 4, 10] {
            assert!(matches!(
                fit_pca(&data, 4, 3, k, &PcaConfig::default()),
                Err(FaceForgeError::InvalidArgument(_))
            ));
        }
        assert!(fit_pca(&data, 4, 3, 3, &PcaConfig::default()).is_ok());
    }

    #[test]
    fn test_constant_rows_are_degenerate() {
        let data = vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0];
        assert!(matches!(
            fit_pca(&data, 3, 2, 1, &PcaConfig::default()),
            Err(FaceForgeError::DegenerateComputation(_))
        ));
    }

    #[test]
    fn test_sign_convention_and_projection() {
        let rows = gaussian_rows(50, 4, 9);
        let pca = fit_pca(&flat(&rows), 50, 4, 2, &PcaConfig::default()).unwrap();
        for c in &pca.components {
            let pivot = c.iter().copied().fold(0.0f64, |b, x| if x.abs() > b.abs() { x } else { b });
            assert!(pivot > 0.0);
        }
        assert_eq!(pca.project(&rows[0]).unwrap().len(), 2);
        assert!(pca.project(&[1.0]).is_err());
    }

    #[test]
    fn test_gram_and_covariance_paths_agree() {
        // Wide (N < D) and tall (N > D) batches, each decomposed both ways.
        for (rows, dim, k, seed) in [(8, 20, 5, 21), (30, 6, 4, 22)] {
            let data = flat(&gaussian_rows(rows, dim, seed));
            let config = PcaConfig::default();
            let gram = fit_pca_via(&data, rows, dim, k, &config, true).unwrap();
            let cov = fit_pca_via(&data, rows, dim, k, &config, false).unwrap();

            for i in 0..k {
                let (vg, vc) = (gram.explained_variance[i], cov.explained_variance[i]);
                assert!((vg - vc).abs() < 1e-8 * vc.max(1.0), "{}x{} variance {}: {} vs {}", rows, dim, i, vg, vc);
                let alignment = dot(&gram.components[i], &cov.components[i]).abs();
                assert!((alignment - 1.0).abs() < 1e-6, "{}x{} component {}: |cos| = {}", rows, dim, i, alignment);
            }
            assert_eq!(gram.mean, cov.mean);
        }
    }

    #[test]
    fn test_iteration_cap_is_degenerate() {
        let data = flat(&gaussian_rows(40, 6, 23));
        let capped = PcaConfig {
            max_iterations: 1,
            ..PcaConfig::default()
        };
        assert!(matches!(
            fit_pca(&data, 40, 6, 2, &capped),
            Err(FaceForgeError::DegenerateComputation(_))
        ));
        assert!(fit_pca(&data, 40, 6, 2, &PcaConfig::default()).is_ok());
    }
}
