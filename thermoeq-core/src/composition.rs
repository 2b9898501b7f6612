use crate::errors::{EqError, EqResult};
use ndarray::{arr1, Array1};
use serde::{Deserialize, Serialize};
use std::ops::Index;

const SUM_TOLERANCE: f64 = 1e-8;

/// Immutable vector of mole fractions.
///
/// A composition is never mutated in place. Sweeping over compositions
/// creates a new value for every sample.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Composition(Array1<f64>);

impl Composition {
    /// Create a composition without validation.
    pub fn new(molefracs: Array1<f64>) -> Self {
        Self(molefracs)
    }

    /// Create a composition and validate that all mole fractions are
    /// non-negative and sum to one.
    pub fn checked(molefracs: Array1<f64>) -> EqResult<Self> {
        if let Some(&x) = molefracs.iter().find(|&&x| !(x >= 0.0)) {
            return Err(EqError::InvalidState(
                String::from("Composition"),
                String::from("x"),
                x,
            ));
        }
        let sum = molefracs.sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(EqError::InvalidState(
                String::from("Composition"),
                String::from("sum(x)"),
                sum,
            ));
        }
        Ok(Self(molefracs))
    }

    /// Binary composition with mole fraction `x0` of the first species.
    pub fn binary(x0: f64) -> Self {
        Self(arr1(&[x0, 1.0 - x0]))
    }

    /// Composition of a pure component `i` in a system of `n` components.
    pub fn pure(n: usize, i: usize) -> Self {
        Self(Array1::from_shape_fn(n, |j| if i == j { 1.0 } else { 0.0 }))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn molefracs(&self) -> &Array1<f64> {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.0.iter()
    }
}

impl Index<usize> for Composition {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl From<Vec<f64>> for Composition {
    fn from(molefracs: Vec<f64>) -> Self {
        Self(Array1::from_vec(molefracs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn validation() {
        assert!(Composition::checked(arr1(&[0.3, 0.7])).is_ok());
        assert!(Composition::checked(arr1(&[0.3, 0.6])).is_err());
        assert!(Composition::checked(arr1(&[-0.1, 1.1])).is_err());
        assert!(Composition::checked(arr1(&[f64::NAN, 1.0])).is_err());
        // unchecked constructor keeps whatever it is given
        let sum: f64 = Composition::new(arr1(&[0.3, 0.6])).iter().sum();
        assert_relative_eq!(sum, 0.9, max_relative = 1e-15);
    }

    #[test]
    fn binary_and_pure() {
        let x = Composition::binary(0.25);
        assert_eq!(x[0], 0.25);
        assert_eq!(x[1], 0.75);
        assert_eq!(Composition::pure(3, 1).molefracs(), &arr1(&[0.0, 1.0, 0.0]));
    }
}
