//! Sparse polynomials with rational coefficients.
//!
//! A [`QPolynomial`] ranges over the columns `[params.., domain dims..]`.
//! Terms are stored as (exponent vector, coefficient) pairs, sorted with
//! the lexicographically largest exponent vector first.

use crate::expr::{PieceExpr, PieceSub};
use dashu::integer::IBig;
use dashu::rational::RBig;
use isle_space::{Error, Reordering, Result};
use isle_val::Val;
use std::fmt;

/// A sparse multivariate polynomial with rational coefficients.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct QPolynomial {
    /// Terms in sorted order, without zero coefficients.
    terms: Vec<(Vec<u32>, RBig)>,
    /// Number of variables.
    n_cols: usize,
}

impl QPolynomial {
    /// Creates a polynomial from terms.
    ///
    /// Terms are sorted and like terms combined.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if an exponent vector does not have
    /// `n_cols` entries.
    pub fn new(terms: Vec<(Vec<u32>, RBig)>, n_cols: usize) -> Result<Self> {
        if terms.iter().any(|(e, _)| e.len() != n_cols) {
            return Err(Error::invalid("exponent vector does not match dimension"));
        }
        Ok(Self::normalized(terms, n_cols))
    }

    fn normalized(terms: Vec<(Vec<u32>, RBig)>, n_cols: usize) -> Self {
        let mut poly = Self { terms, n_cols };
        poly.normalize();
        poly
    }

    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero(n_cols: usize) -> Self {
        Self {
            terms: Vec::new(),
            n_cols,
        }
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(c: RBig, n_cols: usize) -> Self {
        if c == RBig::ZERO {
            Self::zero(n_cols)
        } else {
            Self {
                terms: vec![(vec![0; n_cols], c)],
                n_cols,
            }
        }
    }

    /// Creates the constant polynomial `c`.
    #[must_use]
    pub fn from_i64(c: i64, n_cols: usize) -> Self {
        Self::constant(RBig::from(IBig::from(c)), n_cols)
    }

    /// Creates the single variable `x_i`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `i` is not a column.
    pub fn var(i: usize, n_cols: usize) -> Result<Self> {
        if i >= n_cols {
            return Err(Error::invalid("position or range out of bounds"));
        }
        let mut exps = vec![0; n_cols];
        exps[i] = 1;
        Ok(Self {
            terms: vec![(exps, RBig::ONE)],
            n_cols,
        })
    }

    /// Returns the number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if there are no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the terms.
    #[must_use]
    pub fn terms(&self) -> &[(Vec<u32>, RBig)] {
        &self.terms
    }

    /// Computes the total degree.
    #[must_use]
    pub fn total_degree(&self) -> u32 {
        self.terms
            .iter()
            .map(|(e, _)| e.iter().sum())
            .max()
            .unwrap_or(0)
    }

    /// Sorts terms and combines like terms.
    fn normalize(&mut self) {
        self.terms.sort_by(|a, b| b.0.cmp(&a.0));

        let mut combined: Vec<(Vec<u32>, RBig)> = Vec::with_capacity(self.terms.len());
        for (e, c) in self.terms.drain(..) {
            match combined.last_mut() {
                Some((last, acc)) if *last == e => *acc += c,
                _ => combined.push((e, c)),
            }
        }
        combined.retain(|(_, c)| *c != RBig::ZERO);
        self.terms = combined;
    }

    fn check_cols(&self, other: &Self) -> Result<()> {
        if self.n_cols == other.n_cols {
            Ok(())
        } else {
            Err(Error::invalid("polynomials have different dimensions"))
        }
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            terms: self.terms.iter().map(|(e, c)| (e.clone(), -c.clone())).collect(),
            n_cols: self.n_cols,
        }
    }

    /// Multiplies two polynomials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if the polynomials have different
    /// dimensions.
    pub fn mul(&self, other: &Self) -> Result<Self> {
        self.check_cols(other)?;
        if self.is_zero() || other.is_zero() {
            return Ok(Self::zero(self.n_cols));
        }

        let mut terms = Vec::with_capacity(self.len() * other.len());
        for (e1, c1) in &self.terms {
            for (e2, c2) in &other.terms {
                let e = e1.iter().zip(e2).map(|(a, b)| a + b).collect();
                terms.push((e, c1 * c2));
            }
        }

        Ok(Self::normalized(terms, self.n_cols))
    }
}

impl PieceExpr for QPolynomial {
    type Tag = ();
    const DEFAULT_IS_ZERO: bool = true;

    fn tag(&self) {}

    fn n_cols(&self) -> usize {
        self.n_cols
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    fn add(&self, other: &Self) -> Result<Self> {
        self.check_cols(other)?;
        let mut terms = self.terms.clone();
        terms.extend(other.terms.iter().cloned());
        Ok(Self::normalized(terms, self.n_cols))
    }

    fn scale(&self, f: &RBig) -> Self {
        if *f == RBig::ZERO {
            return Self::zero(self.n_cols);
        }
        Self {
            terms: self.terms.iter().map(|(e, c)| (e.clone(), c * f)).collect(),
            n_cols: self.n_cols,
        }
    }

    fn realign(&self, r: &Reordering) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|(e, c)| (r.apply(e, &0), c.clone()))
            .collect();
        Self::normalized(terms, r.dst_len())
    }

    fn drop_cols(&self, first: usize, n: usize) -> Result<Self> {
        let end = first
            .checked_add(n)
            .filter(|&end| end <= self.n_cols)
            .ok_or_else(|| Error::invalid("position or range out of bounds"))?;
        if self.terms.iter().any(|(e, _)| e[first..end].iter().any(|&k| k != 0)) {
            return Err(Error::invalid(
                "cannot drop dimensions the expression depends on",
            ));
        }
        let terms = self
            .terms
            .iter()
            .map(|(e, c)| {
                let mut e = e.clone();
                e.drain(first..end);
                (e, c.clone())
            })
            .collect();
        Ok(Self::normalized(terms, self.n_cols - n))
    }

    fn eval(&self, point: &[i64]) -> Val {
        let value = self.terms.iter().fold(RBig::ZERO, |acc, (e, c)| {
            let term = e
                .iter()
                .zip(point)
                .fold(IBig::ONE, |m, (&k, &x)| m * IBig::from(x).pow(k as usize));
            acc + c * &RBig::from(term)
        });
        Val::from_rational(value)
    }
}

impl PieceSub for QPolynomial {
    fn sub(&self, other: &Self) -> Result<Self> {
        self.add(&other.neg())
    }
}

impl fmt::Display for QPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let terms: Vec<_> = self
            .terms
            .iter()
            .map(|(e, c)| {
                let mon: Vec<String> = e
                    .iter()
                    .enumerate()
                    .filter(|(_, &k)| k > 0)
                    .map(|(i, &k)| if k == 1 { format!("x{i}") } else { format!("x{i}^{k}") })
                    .collect();
                if mon.is_empty() {
                    format!("{c}")
                } else {
                    format!("{c}*{}", mon.join("*"))
                }
            })
            .collect();

        write!(f, "{}", terms.join(" + "))
    }
}
