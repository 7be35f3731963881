//! Rational affine forms.

use crate::expr::{PieceExpr, PieceSub};
use dashu::integer::IBig;
use dashu::rational::RBig;
use isle_space::{Error, Reordering, Result};
use isle_val::Val;
use std::fmt;

/// An affine form `c0 * x0 + .. + c(n-1) * x(n-1) + constant` with rational
/// coefficients over the columns `[params.., domain dims..]`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Aff {
    coeffs: Vec<RBig>,
    constant: RBig,
}

impl Aff {
    /// Creates an affine form.
    #[must_use]
    pub fn new(coeffs: Vec<RBig>, constant: RBig) -> Self {
        Self { coeffs, constant }
    }

    /// Creates an affine form with integer coefficients.
    #[must_use]
    pub fn from_i64(coeffs: &[i64], constant: i64) -> Self {
        Self {
            coeffs: coeffs.iter().map(|&c| RBig::from(IBig::from(c))).collect(),
            constant: RBig::from(IBig::from(constant)),
        }
    }

    /// Creates the constant form over `n_cols` columns.
    #[must_use]
    pub fn constant(n_cols: usize, value: i64) -> Self {
        Self {
            coeffs: vec![RBig::ZERO; n_cols],
            constant: RBig::from(IBig::from(value)),
        }
    }

    /// Creates the zero form over `n_cols` columns.
    #[must_use]
    pub fn zero(n_cols: usize) -> Self {
        Self::constant(n_cols, 0)
    }

    /// Returns the coefficients.
    #[must_use]
    pub fn coeffs(&self) -> &[RBig] {
        &self.coeffs
    }

    /// Returns the constant term.
    #[must_use]
    pub fn constant_term(&self) -> &RBig {
        &self.constant
    }

    /// Returns true if the form has no non-constant term.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.coeffs.iter().all(|c| *c == RBig::ZERO)
    }

    fn check_cols(&self, other: &Self) -> Result<()> {
        if self.coeffs.len() == other.coeffs.len() {
            Ok(())
        } else {
            Err(Error::invalid("affine forms have different dimensions"))
        }
    }

    fn combine(&self, other: &Self, f: impl Fn(&RBig, &RBig) -> RBig) -> Self {
        Self {
            coeffs: self
                .coeffs
                .iter()
                .zip(&other.coeffs)
                .map(|(a, b)| f(a, b))
                .collect(),
            constant: f(&self.constant, &other.constant),
        }
    }
}

impl PieceExpr for Aff {
    type Tag = ();
    const DEFAULT_IS_ZERO: bool = false;

    fn tag(&self) {}

    fn n_cols(&self) -> usize {
        self.coeffs.len()
    }

    fn is_zero(&self) -> bool {
        self.is_constant() && self.constant == RBig::ZERO
    }

    fn add(&self, other: &Self) -> Result<Self> {
        self.check_cols(other)?;
        Ok(self.combine(other, |a, b| a + b))
    }

    fn scale(&self, f: &RBig) -> Self {
        Self {
            coeffs: self.coeffs.iter().map(|c| c * f).collect(),
            constant: &self.constant * f,
        }
    }

    fn realign(&self, r: &Reordering) -> Self {
        Self {
            coeffs: r.apply(&self.coeffs, &RBig::ZERO),
            constant: self.constant.clone(),
        }
    }

    fn drop_cols(&self, first: usize, n: usize) -> Result<Self> {
        let end = first
            .checked_add(n)
            .filter(|&end| end <= self.coeffs.len())
            .ok_or_else(|| Error::invalid("position or range out of bounds"))?;
        if self.coeffs[first..end].iter().any(|c| *c != RBig::ZERO) {
            return Err(Error::invalid(
                "cannot drop dimensions the expression depends on",
            ));
        }
        let mut coeffs = self.coeffs.clone();
        coeffs.drain(first..end);
        Ok(Self {
            coeffs,
            constant: self.constant.clone(),
        })
    }

    fn eval(&self, point: &[i64]) -> Val {
        let value = self
            .coeffs
            .iter()
            .zip(point)
            .fold(self.constant.clone(), |acc, (c, &x)| {
                acc + c * &RBig::from(IBig::from(x))
            });
        Val::from_rational(value)
    }
}

impl PieceSub for Aff {
    fn sub(&self, other: &Self) -> Result<Self> {
        self.check_cols(other)?;
        Ok(self.combine(other, |a, b| a - b))
    }
}

impl fmt::Display for Aff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (i, c) in self.coeffs.iter().enumerate() {
            if *c == RBig::ZERO {
                continue;
            }
            if !first {
                f.write_str(" + ")?;
            }
            first = false;
            if *c == RBig::ONE {
                write!(f, "x{i}")?;
            } else {
                write!(f, "{c}*x{i}")?;
            }
        }
        if first {
            write!(f, "{}", self.constant)
        } else if self.constant != RBig::ZERO {
            write!(f, " + {}", self.constant)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_sub() {
        let a = Aff::from_i64(&[1, 2], 3);
        let b = Aff::from_i64(&[0, -2], 1);
        assert_eq!(a.add(&b).unwrap(), Aff::from_i64(&[1, 0], 4));
        assert_eq!(a.sub(&a).unwrap(), Aff::zero(2));
        assert!(a.sub(&a).unwrap().is_zero());
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = Aff::from_i64(&[1], 0);
        let b = Aff::from_i64(&[1, 1], 0);
        assert_eq!(
            a.add(&b).unwrap_err(),
            Error::invalid("affine forms have different dimensions")
        );
    }

    #[test]
    fn test_eval() {
        let a = Aff::from_i64(&[2, -1], 5);
        assert_eq!(a.eval(&[3, 4]), Val::int(7));
        let half = a.scale(&RBig::from_parts(IBig::ONE, 2u8.into()));
        assert_eq!(half.eval(&[3, 4]), Val::rat(7, 2));
    }

    #[test]
    fn test_drop_cols() {
        let a = Aff::from_i64(&[0, 1, 0], 2);
        assert_eq!(a.drop_cols(0, 1).unwrap(), Aff::from_i64(&[1, 0], 2));
        assert!(a.drop_cols(1, 1).unwrap_err().is_invalid());
        assert!(a.drop_cols(2, 5).unwrap_err().is_invalid());
    }

    #[test]
    fn test_display() {
        assert_eq!(Aff::from_i64(&[1, 0, 3], -2).to_string(), "x0 + 3*x2 + -2");
        assert_eq!(Aff::constant(2, 4).to_string(), "4");
    }
}
