//! Polynomials and the bracketing of their real roots.
//!
//! The real roots of a polynomial on an interval are isolated by splitting
//! the interval at the critical points of the polynomial. The critical
//! points are themselves roots of the derivative, so the splitting recurses
//! through the derivatives until a linear derivative is reached, which has
//! a closed-form root (the inflection point of a cubic, the jolt point of a
//! quartic). Every lower derivative is then bisected inside the monotonic
//! intervals of the derivative above it.
use crate::SolverOptions;

const MAX_ITER_BISECTION: usize = 500;
const TOL_BISECTION: f64 = 1e-12;

/// A polynomial with real coefficients in ascending order.
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial {
    coefs: Vec<f64>,
}

impl Polynomial {
    /// Create a polynomial from its coefficients in ascending order
    /// ($c_0 + c_1x + c_2x^2 + \dots$). Trailing zeros are removed.
    pub fn new(coefs: Vec<f64>) -> Self {
        let mut coefs = coefs;
        while coefs.len() > 1 && coefs.last() == Some(&0.0) {
            coefs.pop();
        }
        if coefs.is_empty() {
            coefs.push(0.0);
        }
        Self { coefs }
    }

    pub fn coefs(&self) -> &[f64] {
        &self.coefs
    }

    pub fn degree(&self) -> usize {
        self.coefs.len() - 1
    }

    /// Evaluate the polynomial using Horner's scheme.
    pub fn eval(&self, x: f64) -> f64 {
        self.coefs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    pub fn derivative(&self) -> Self {
        Self::new(
            self.coefs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, &c)| i as f64 * c)
                .collect(),
        )
    }
}

/// Find a root of `f` in `[lo, hi]` by bisection.
///
/// Returns `None` if `f` does not change its sign on the interval. The
/// iteration stops as soon as the bracket is narrower than the tolerance
/// or `f` vanishes exactly at the midpoint.
pub fn bisect<F: Fn(f64) -> f64>(f: F, lo: f64, hi: f64, options: SolverOptions) -> Option<f64> {
    let (max_iter, tol, verbosity) = options.unwrap_or(MAX_ITER_BISECTION, TOL_BISECTION);
    let (mut lo, mut hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let mut f_lo = f(lo);
    let f_hi = f(hi);
    if f_lo == 0.0 {
        return Some(lo);
    }
    if f_hi == 0.0 {
        return Some(hi);
    }
    if !(f_lo * f_hi < 0.0) {
        log_result!(
            verbosity,
            "Bisection: no sign change in [{:e}, {:e}]",
            lo,
            hi
        );
        return None;
    }

    log_iter!(verbosity, " iter |     lower     |     upper     |   residual   ");
    log_iter!(verbosity, "{:-<60}", "");
    for i in 1..=max_iter {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid);
        log_iter!(
            verbosity,
            " {:4} | {:13.6e} | {:13.6e} | {:12.4e}",
            i,
            lo,
            hi,
            f_mid
        );
        if f_mid == 0.0 || hi - lo < tol {
            return Some(mid);
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    log_result!(
        verbosity,
        "Bisection: not converged in {} iterations",
        max_iter
    );
    None
}

/// Critical points (roots of the derivative) of `p` strictly inside `(lo, hi)`
/// in ascending order.
pub fn critical_points(p: &Polynomial, lo: f64, hi: f64, options: SolverOptions) -> Vec<f64> {
    let dp = p.derivative();
    let mut points = match dp.degree() {
        0 => Vec::new(),
        1 => vec![-dp.coefs[0] / dp.coefs[1]],
        _ => monotonic_intervals(&dp, lo, hi, options)
            .into_iter()
            .filter_map(|(a, b)| bisect(|x| dp.eval(x), a, b, options))
            .collect(),
    };
    points.retain(|&x| lo < x && x < hi);
    points.dedup();
    points
}

/// Split `[lo, hi]` into the intervals on which `p` is monotonic.
pub fn monotonic_intervals(
    p: &Polynomial,
    lo: f64,
    hi: f64,
    options: SolverOptions,
) -> Vec<(f64, f64)> {
    let mut points = vec![lo];
    points.extend(critical_points(p, lo, hi, options));
    points.push(hi);
    points.windows(2).map(|w| (w[0], w[1])).collect()
}

/// Bisect `p` on each interval. Intervals without a sign change give `None`.
pub fn roots_in(
    p: &Polynomial,
    intervals: &[(f64, f64)],
    options: SolverOptions,
) -> Vec<Option<f64>> {
    intervals
        .iter()
        .map(|&(a, b)| bisect(|x| p.eval(x), a, b, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn from_roots(roots: &[f64]) -> Polynomial {
        roots.iter().fold(Polynomial::new(vec![1.0]), |p, &r| {
            let mut coefs = vec![0.0; p.coefs.len() + 1];
            for (i, &c) in p.coefs.iter().enumerate() {
                coefs[i] -= r * c;
                coefs[i + 1] += c;
            }
            Polynomial::new(coefs)
        })
    }

    #[test]
    fn evaluation_and_derivative() {
        let p = Polynomial::new(vec![1.0, -3.0, 0.0, 2.0, 0.0]);
        assert_eq!(p.degree(), 3);
        assert_eq!(p.eval(2.0), 11.0);
        assert_eq!(p.derivative().coefs(), &[-3.0, 0.0, 6.0]);
        assert_eq!(p.derivative().derivative().derivative().degree(), 0);
    }

    #[test]
    fn bisection_without_sign_change() {
        let options = SolverOptions::default();
        assert!(bisect(|x| x * x + 1.0, -1.0, 1.0, options).is_none());
        let root = bisect(|x| x * x - 2.0, 0.0, 2.0, options).unwrap();
        assert_abs_diff_eq!(root, 2f64.sqrt(), epsilon = 1e-12);
        assert_eq!(bisect(|x| x - 1.0, 1.0, 3.0, options), Some(1.0));
    }

    #[test]
    fn cubic_intervals() {
        let options = SolverOptions::default();
        let p = from_roots(&[0.1, 0.5, 0.9]);
        let intervals = monotonic_intervals(&p, 0.0, 2.0, options);
        assert_eq!(intervals.len(), 3);
        let roots = roots_in(&p, &intervals, options);
        for (root, exact) in roots.iter().zip([0.1, 0.5, 0.9]) {
            let root = root.unwrap();
            assert_abs_diff_eq!(root, exact, epsilon = 1e-11);
            assert!(p.eval(root).abs() < 1e-12);
        }
        // inflection point of the cubic
        assert!(intervals[0].1 < 0.5 && intervals[1].1 > 0.5);
    }

    #[test]
    fn quartic_intervals() {
        let options = SolverOptions::default();
        let p = from_roots(&[0.05, 0.2, 0.6, 1.5]);
        let intervals = monotonic_intervals(&p, 0.0, 3.0, options);
        assert_eq!(intervals.len(), 4);
        let roots: Vec<_> = roots_in(&p, &intervals, options)
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(roots.len(), 4);
        for (root, exact) in roots.iter().zip([0.05, 0.2, 0.6, 1.5]) {
            assert_abs_diff_eq!(*root, exact, epsilon = 1e-11);
        }
    }

    #[test]
    fn single_real_root() {
        let options = SolverOptions::default();
        // x^3 + x - 1 is strictly increasing
        let p = Polynomial::new(vec![-1.0, 1.0, 0.0, 1.0]);
        let intervals = monotonic_intervals(&p, 0.0, 1.0, options);
        assert_eq!(intervals, vec![(0.0, 1.0)]);
        let root = roots_in(&p, &intervals, options)[0].unwrap();
        assert!(p.eval(root).abs() < 1e-11);
    }
}
