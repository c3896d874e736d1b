//! Brent's bounded scalar minimization.

use crate::error::{MathError, MathResult};
use crate::optimization::{OptimizationConfig, OptimizationResult};

/// (3 - sqrt(5)) / 2
const GOLDEN_SECTION: f64 = 0.381_966_011_250_105_1;

/// Minimizes `f` on `[lower, upper]` with Brent's method.
///
/// Golden-section steps guarantee progress while parabolic interpolation
/// gives superlinear convergence near a smooth minimum. The search starts at
/// `initial` when provided (clamped into the interval), otherwise at the
/// first golden-section point.
///
/// Only a local minimum is guaranteed; for unimodal objectives on the
/// interval this is the global one.
///
/// # Arguments
///
/// * `f` - The objective to minimize
/// * `lower` - Lower bound of the search interval
/// * `upper` - Upper bound of the search interval
/// * `initial` - Optional starting point
/// * `config` - Optimization configuration
///
/// # Example
///
/// ```rust
/// use meanvar_math::optimization::{minimize_bounded, OptimizationConfig};
///
/// let f = |x: f64| (x - 0.3).powi(2);
/// let result = minimize_bounded(f, 0.0, 1.0, Some(0.5), &OptimizationConfig::default()).unwrap();
/// assert!((result.minimizer - 0.3).abs() < 1e-6);
/// ```
pub fn minimize_bounded<F>(
    f: F,
    lower: f64,
    upper: f64,
    initial: Option<f64>,
    config: &OptimizationConfig,
) -> MathResult<OptimizationResult>
where
    F: Fn(f64) -> f64,
{
    if !lower.is_finite() || !upper.is_finite() || lower > upper {
        return Err(MathError::InvalidBounds { lower, upper });
    }

    let eval = |x: f64| -> MathResult<f64> {
        let value = f(x);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(MathError::NonFiniteObjective { x })
        }
    };

    if lower == upper {
        return Ok(OptimizationResult {
            minimizer: lower,
            objective_value: eval(lower)?,
            iterations: 0,
        });
    }

    let sqrt_eps = f64::EPSILON.sqrt();
    let mut a = lower;
    let mut b = upper;

    let mut x = initial
        .filter(|x| x.is_finite())
        .map_or(a + GOLDEN_SECTION * (b - a), |x| x.clamp(a, b));
    let mut w = x;
    let mut v = x;
    let mut fx = eval(x)?;
    let mut fw = fx;
    let mut fv = fx;

    let mut d: f64 = 0.0;
    let mut e: f64 = 0.0;

    for iteration in 0..config.max_iterations {
        let xm = 0.5 * (a + b);
        let tol1 = sqrt_eps * x.abs() + config.tolerance / 3.0;
        let tol2 = 2.0 * tol1;

        if (x - xm).abs() <= tol2 - 0.5 * (b - a) {
            log::trace!("brent converged after {} iterations at x = {}", iteration, x);
            return Ok(OptimizationResult {
                minimizer: x,
                objective_value: fx,
                iterations: iteration,
            });
        }

        let mut use_golden = true;

        if e.abs() > tol1 {
            // Fit a parabola through x, w, v
            let r = (x - w) * (fx - fv);
            let mut q = (x - v) * (fx - fw);
            let mut p = (x - v) * q - (x - w) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();

            let e_prev = e;
            e = d;

            if p.abs() < (0.5 * q * e_prev).abs() && p > q * (a - x) && p < q * (b - x) {
                d = p / q;
                let u = x + d;
                if (u - a) < tol2 || (b - u) < tol2 {
                    d = tol1.copysign(xm - x);
                }
                use_golden = false;
            }
        }

        if use_golden {
            e = if x >= xm { a - x } else { b - x };
            d = GOLDEN_SECTION * e;
        }

        let step = if d.abs() >= tol1 { d } else { tol1.copysign(d) };
        let u = (x + step).clamp(lower, upper);
        let fu = eval(u)?;

        if fu <= fx {
            if u >= x {
                a = x;
            } else {
                b = x;
            }
            v = w;
            fv = fw;
            w = x;
            fw = fx;
            x = u;
            fx = fu;
        } else {
            if u < x {
                a = u;
            } else {
                b = u;
            }
            if fu <= fw || w == x {
                v = w;
                fv = fw;
                w = u;
                fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u;
                fv = fu;
            }
        }
    }

    Err(MathError::convergence_failed(config.max_iterations, b - a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quadratic_interior_minimum() {
        let f = |x: f64| (x - 0.3).powi(2) + 1.0;

        let result = minimize_bounded(f, 0.0, 1.0, None, &OptimizationConfig::default()).unwrap();

        assert_relative_eq!(result.minimizer, 0.3, epsilon = 1e-7);
        assert_relative_eq!(result.objective_value, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_starts_from_initial_guess() {
        let f = |x: f64| (x - 0.7).powi(2);

        let result =
            minimize_bounded(f, 0.0, 1.0, Some(0.5), &OptimizationConfig::default()).unwrap();

        assert_relative_eq!(result.minimizer, 0.7, epsilon = 1e-7);
    }

    #[test]
    fn test_minimum_at_boundary() {
        // Monotonically decreasing: minimum at the upper bound
        let f = |x: f64| -x;

        let result =
            minimize_bounded(f, 0.0, 1.0, Some(0.5), &OptimizationConfig::default()).unwrap();

        assert!(result.minimizer <= 1.0);
        assert!(result.minimizer > 1.0 - 1e-6);
    }

    #[test]
    fn test_non_polynomial() {
        // cos has its minimum at pi on [3, 4]
        let result =
            minimize_bounded(f64::cos, 3.0, 4.0, None, &OptimizationConfig::default()).unwrap();

        assert_relative_eq!(result.minimizer, std::f64::consts::PI, epsilon = 1e-7);
    }

    #[test]
    fn test_invalid_bounds() {
        let result = minimize_bounded(|x| x, 1.0, 0.0, None, &OptimizationConfig::default());
        assert!(matches!(result, Err(MathError::InvalidBounds { .. })));
    }

    #[test]
    fn test_degenerate_interval() {
        let result =
            minimize_bounded(|x| x * x, 0.5, 0.5, None, &OptimizationConfig::default()).unwrap();
        assert_relative_eq!(result.minimizer, 0.5);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_non_finite_objective() {
        let f = |x: f64| if x > 0.4 { f64::NAN } else { x };
        let result = minimize_bounded(f, 0.0, 1.0, Some(0.5), &OptimizationConfig::default());
        assert!(matches!(result, Err(MathError::NonFiniteObjective { .. })));
    }

    #[test]
    fn test_iteration_limit() {
        let config = OptimizationConfig::default().with_max_iterations(2);
        let result = minimize_bounded(|x: f64| (x - 0.123).powi(2), 0.0, 1.0, None, &config);
        assert!(matches!(result, Err(MathError::ConvergenceFailed { .. })));
    }
}
