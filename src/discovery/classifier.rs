//! Linear classifier directions via L2-regularised logistic regression.
//!
//! Minimises
//!
//! ```text
//! f(w, b) = ½‖w‖² + C · Σᵢ [ log(1 + e^{zᵢ}) − yᵢ zᵢ ],   zᵢ = w·xᵢ + b
//! ```
//!
//! with a damped Newton (IRLS) solver: each step solves `H Δ = ∇f` with
//! `nalgebra`'s Cholesky factorisation and backtracks until the Armijo
//! condition holds. The intercept is not penalised. The objective is strictly convex in `w`, so the
//! minimiser is unique and the solver starts from zero with no randomness:
//! identical input gives bit-identical output.

use crate::error::{FaceForgeError, Result};
use crate::kernel::linalg::{dot, norm};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Ridge added to the intercept's Hessian diagonal so saturated fits stay
/// positive-definite.
const INTERCEPT_RIDGE: f64 = 1e-8;

/// Solver parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Inverse regularisation strength (larger = weaker penalty).
    pub c: f64,
    /// Stop when `‖∇f‖∞ <= tolerance · max(1, ‖∇f₀‖∞)`.
    pub tolerance: f64,
    /// Newton step cap. Hitting it logs a warning and keeps the last iterate.
    pub max_iterations: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            tolerance: 1e-8,
            max_iterations: 100,
        }
    }
}

/// Fitted separator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassifierFit {
    pub weights: Vec<f64>,
    pub bias: f64,
    /// Newton steps taken.
    pub iterations: usize,
    pub converged: bool,
}

impl ClassifierFit {
    /// Signed score `w·x + b`; positive means class 1 is more likely.
    pub fn decision(&self, x: &[f64]) -> f64 {
        dot(&self.weights, x) + self.bias
    }

    /// Probability of class 1.
    pub fn probability(&self, x: &[f64]) -> f64 {
        sigmoid(self.decision(x))
    }

    /// Unit-normalised weight vector (the boundary normal, bias dropped).
    pub fn direction(&self) -> Result<Vec<f64>> {
        let length = norm(&self.weights);
        if !length.is_finite() || length <= 1e-12 {
            return Err(FaceForgeError::DegenerateComputation(format!(
                "classifier weight norm is {}",
                length
            )));
        }
        Ok(self.weights.iter().map(|w| w / length).collect())
    }
}

/// Check that `labels` has one `{0, 1}` entry per row and both classes.
pub fn validate_labels(labels: &[u8], rows: usize) -> Result<()> {
    if labels.len() != rows {
        return Err(FaceForgeError::InvalidArgument(format!(
            "expected {} labels, got {}",
            rows,
            labels.len()
        )));
    }
    if let Some(bad) = labels.iter().find(|&&l| l > 1) {
        return Err(FaceForgeError::InvalidArgument(format!(
            "labels must be 0 or 1, got {}",
            bad
        )));
    }
    let positives = labels.iter().filter(|&&l| l == 1).count();
    if positives == 0 || positives == rows {
        return Err(FaceForgeError::InvalidArgument(
            "labels must contain both classes 0 and 1".into(),
        ));
    }
    Ok(())
}

/// Fit logistic regression on the row-major `rows × dim` matrix `data`.
pub fn fit_logistic(data: &[f64], rows: usize, dim: usize, labels: &[u8], config: &ClassifierConfig) -> Result<ClassifierFit> {
    validate_labels(labels, rows)?;
    if config.c <= 0.0 || !config.c.is_finite() {
        return Err(FaceForgeError::InvalidArgument(format!(
            "regularisation C must be positive, got {}",
            config.c
        )));
    }

    let targets: Vec<f64> = labels.iter().map(|&l| f64::from(l)).collect();
    let problem = Problem {
        data,
        dim,
        targets: &targets,
        c: config.c,
    };

    let p = dim + 1;
    let mut theta = vec![0.0; p];
    let mut iterations = 0;
    let mut converged = false;
    let mut grad_scale = None;

    loop {
        let (grad, curvature) = problem.gradient(&theta);
        let grad_inf = grad.iter().fold(0.0f64, |m, g| m.max(g.abs()));
        let scale = *grad_scale.get_or_insert(grad_inf.max(1.0));
        if grad_inf <= config.tolerance * scale {
            converged = true;
            break;
        }
        if iterations == config.max_iterations {
            break;
        }

        let hessian = DMatrix::from_row_slice(p, p, &problem.hessian(&curvature));
        let step: Vec<f64> = hessian
            .cholesky()
            .ok_or_else(|| FaceForgeError::DegenerateComputation("Newton system is not positive-definite".into()))?
            .solve(&DVector::from_column_slice(&grad))
            .iter()
            .copied()
            .collect();

        // Armijo backtracking. Once the Newton decrement is below what the
        // objective can resolve, take the full step.
        let f0 = problem.objective(&theta);
        let slope = dot(&grad, &step);
        let mut t = 1.0;
        if slope > 1e-12 * (1.0 + f0.abs()) {
            while t > 1e-10 {
                let trial: Vec<f64> = theta.iter().zip(&step).map(|(th, s)| th - t * s).collect();
                if problem.objective(&trial) <= f0 - 1e-4 * t * slope {
                    break;
                }
                t *= 0.5;
            }
        }
        for (th, s) in theta.iter_mut().zip(&step) {
            *th -= t * s;
        }
        iterations += 1;
    }

    if !converged {
        warn!(
            iterations,
            max_iterations = config.max_iterations,
            "logistic regression did not converge; using last iterate"
        );
    }

    let bias = theta[dim];
    theta.truncate(dim);
    debug!(rows, dim, iterations, converged, bias, "fit_logistic");

    Ok(ClassifierFit {
        weights: theta,
        bias,
        iterations,
        converged,
    })
}

struct Problem<'a> {
    data: &'a [f64],
    dim: usize,
    targets: &'a [f64],
    c: f64,
}

impl<'a> Problem<'a> {
    fn rows(&self) -> impl Iterator<Item = (&'a [f64], f64)> {
        self.data.chunks_exact(self.dim).zip(self.targets.iter().copied())
    }

    fn logit(&self, theta: &[f64], x: &[f64]) -> f64 {
        dot(&theta[..self.dim], x) + theta[self.dim]
    }

    fn objective(&self, theta: &[f64]) -> f64 {
        let penalty = 0.5 * dot(&theta[..self.dim], &theta[..self.dim]);
        let loss: f64 = self
            .rows()
            .map(|(x, y)| {
                let z = self.logit(theta, x);
                softplus(z) - y * z
            })
            .sum();
        penalty + self.c * loss
    }

    /// Gradient, plus the per-row curvature `pᵢ(1 − pᵢ)` for the Hessian.
    fn gradient(&self, theta: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let dim = self.dim;
        let mut grad = theta.to_vec();
        grad[dim] = 0.0;
        let mut curvature = Vec::with_capacity(self.targets.len());
        for (x, y) in self.rows() {
            let prob = sigmoid(self.logit(theta, x));
            let residual = self.c * (prob - y);
            for (g, xi) in grad[..dim].iter_mut().zip(x) {
                *g += residual * xi;
            }
            grad[dim] += residual;
            curvature.push(prob * (1.0 - prob));
        }
        (grad, curvature)
    }

    fn hessian(&self, curvature: &[f64]) -> Vec<f64> {
        let dim = self.dim;
        let p = dim + 1;
        let mut h = vec![0.0; p * p];
        for i in 0..dim {
            h[i * p + i] = 1.0;
        }
        h[dim * p + dim] = INTERCEPT_RIDGE;

        for ((x, _), &s) in self.rows().zip(curvature) {
            let weight = self.c * s;
            if weight == 0.0 {
                continue;
            }
            for i in 0..dim {
                let wi = weight * x[i];
                for j in i..dim {
                    h[i * p + j] += wi * x[j];
                }
                h[i * p + dim] += wi;
            }
            h[dim * p + dim] += weight;
        }
        for i in 0..p {
            for j in 0..i {
                h[i * p + j] = h[j * p + i];
            }
        }
        h
    }
}

#[inline]
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// `log(1 + e^z)` without overflow.
#[inline]
fn softplus(z: f64) -> f64 {
    if z > 0.0 {
        z + (-z).exp().ln_1p()
    } else {
        z.exp().ln_1p()
    }
}
