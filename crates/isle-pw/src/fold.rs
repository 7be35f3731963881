//! Folds of polynomials.

use crate::expr::PieceExpr;
use crate::qpolynomial::QPolynomial;
use dashu::rational::RBig;
use isle_space::{Error, Reordering, Result};
use isle_union::{Fold, FoldTag};
use isle_val::Val;
use std::fmt;

/// The minimum, maximum or list of a finite collection of polynomials.
///
/// The polynomials are kept sorted and deduplicated. The fold without
/// polynomials is the zero element.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QPolynomialFold {
    fold: Fold,
    qps: Vec<QPolynomial>,
    n_cols: usize,
}

impl QPolynomialFold {
    /// Creates the fold without polynomials.
    #[must_use]
    pub fn empty(fold: Fold, n_cols: usize) -> Self {
        Self {
            fold,
            qps: Vec::new(),
            n_cols,
        }
    }

    /// Creates a fold of the given polynomials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if a polynomial does not have `n_cols`
    /// columns.
    pub fn new(fold: Fold, qps: Vec<QPolynomial>, n_cols: usize) -> Result<Self> {
        if qps.iter().any(|qp| qp.n_cols() != n_cols) {
            return Err(Error::invalid("polynomials have different dimensions"));
        }
        Ok(Self::normalized(fold, qps, n_cols))
    }

    /// Creates the fold of a single polynomial.
    #[must_use]
    pub fn from_qpolynomial(fold: Fold, qp: QPolynomial) -> Self {
        let n_cols = qp.n_cols();
        Self::normalized(fold, vec![qp], n_cols)
    }

    fn normalized(fold: Fold, mut qps: Vec<QPolynomial>, n_cols: usize) -> Self {
        qps.sort();
        qps.dedup();
        Self { fold, qps, n_cols }
    }

    /// Returns the fold direction.
    #[must_use]
    pub fn fold(&self) -> Fold {
        self.fold
    }

    /// Returns the polynomials.
    #[must_use]
    pub fn qpolynomials(&self) -> &[QPolynomial] {
        &self.qps
    }

    fn check_compatible(&self, other: &Self) -> Result<()> {
        if self.fold != other.fold {
            return Err(Error::invalid("fold types don't match"));
        }
        if self.n_cols != other.n_cols {
            return Err(Error::invalid("polynomials have different dimensions"));
        }
        Ok(())
    }
}

impl PieceExpr for QPolynomialFold {
    type Tag = Fold;
    const DEFAULT_IS_ZERO: bool = true;

    fn tag(&self) -> Fold {
        self.fold
    }

    fn n_cols(&self) -> usize {
        self.n_cols
    }

    fn is_zero(&self) -> bool {
        self.qps.is_empty()
    }

    /// Sums every pair of polynomials. A zero operand leaves the other
    /// unchanged.
    fn add(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        if self.is_zero() {
            return Ok(other.clone());
        }
        if other.is_zero() {
            return Ok(self.clone());
        }
        let qps = self
            .qps
            .iter()
            .flat_map(|a| other.qps.iter().map(move |b| a.add(b)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::normalized(self.fold, qps, self.n_cols))
    }

    /// Folds both operands into one.
    fn union_combine(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        let mut qps = self.qps.clone();
        qps.extend(other.qps.iter().cloned());
        Ok(Self::normalized(self.fold, qps, self.n_cols))
    }

    fn scale(&self, f: &RBig) -> Self {
        if *f == RBig::ZERO {
            return Self::empty(self.fold, self.n_cols);
        }
        let fold = if *f < RBig::ZERO {
            self.fold.negate()
        } else {
            self.fold
        };
        let qps = self.qps.iter().map(|qp| qp.scale(f)).collect();
        Self::normalized(fold, qps, self.n_cols)
    }

    fn realign(&self, r: &Reordering) -> Self {
        let qps = self.qps.iter().map(|qp| qp.realign(r)).collect();
        Self::normalized(self.fold, qps, r.dst_len())
    }

    fn drop_cols(&self, first: usize, n: usize) -> Result<Self> {
        if first.checked_add(n).map_or(true, |end| end > self.n_cols) {
            return Err(Error::invalid("position or range out of bounds"));
        }
        let qps = self
            .qps
            .iter()
            .map(|qp| qp.drop_cols(first, n))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::normalized(self.fold, qps, self.n_cols - n))
    }

    /// Evaluates to the minimum or maximum of the polynomials. A list of
    /// more than one value has no single value and evaluates to NaN.
    fn eval(&self, point: &[i64]) -> Val {
        let values: Vec<RBig> = self
            .qps
            .iter()
            .filter_map(|qp| qp.eval(point).as_rational().cloned())
            .collect();
        let value = match self.fold {
            Fold::Min => values.into_iter().min(),
            Fold::Max => values.into_iter().max(),
            Fold::List => match values.as_slice() {
                [] => None,
                [v] => Some(v.clone()),
                _ => return Val::nan(),
            },
        };
        value.map_or_else(Val::zero, Val::from_rational)
    }
}

impl fmt::Display for QPolynomialFold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.fold)?;
        for (i, qp) in self.qps.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{qp}")?;
        }
        f.write_str(")")
    }
}
