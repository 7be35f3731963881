//! Affine constraints with integer coefficients.
//!
//! A constraint is `f(x) = 0` or `f(x) >= 0` where `f` is an affine form
//! over the columns `[params.., dims..]` of its space. Constraints are kept
//! in a canonical form so that syntactic comparison is meaningful.

use dashu::base::{Abs, Gcd};
use dashu::integer::IBig;
use isle_space::Reordering;
use std::fmt;

/// The kind of a constraint.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum ConstraintKind {
    /// `f = 0`
    Eq,
    /// `f >= 0`
    Ineq,
}

/// An affine equality or inequality.
///
/// Invariants (established by every constructor):
/// - the coefficients are primitive (their gcd is 1), unless all are zero
/// - an inequality's constant is floored after division by the gcd
/// - an equality's first non-zero coefficient is positive
/// - a constraint without variables is either `0 >= 0` or `-1 >= 0`
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Constraint {
    kind: ConstraintKind,
    coeffs: Vec<IBig>,
    constant: IBig,
}

/// Rounds `a / b` towards negative infinity, for positive `b`.
fn floor_div(a: &IBig, b: &IBig) -> IBig {
    let q = a / b;
    let r = a % b;
    if r < IBig::ZERO {
        q - IBig::ONE
    } else {
        q
    }
}

fn gcd(a: &IBig, b: &IBig) -> IBig {
    IBig::from(a.clone().gcd(b.clone()))
}

impl Constraint {
    /// Creates the constraint `coeffs · x + constant >= 0`.
    #[must_use]
    pub fn inequality(coeffs: Vec<IBig>, constant: IBig) -> Self {
        Self::normalized(ConstraintKind::Ineq, coeffs, constant)
    }

    /// Creates the constraint `coeffs · x + constant = 0`.
    #[must_use]
    pub fn equality(coeffs: Vec<IBig>, constant: IBig) -> Self {
        Self::normalized(ConstraintKind::Eq, coeffs, constant)
    }

    /// Creates an inequality from machine integers.
    #[must_use]
    pub fn ineq_i64(coeffs: &[i64], constant: i64) -> Self {
        Self::inequality(coeffs.iter().map(|&c| IBig::from(c)).collect(), IBig::from(constant))
    }

    /// Creates an equality from machine integers.
    #[must_use]
    pub fn eq_i64(coeffs: &[i64], constant: i64) -> Self {
        Self::equality(coeffs.iter().map(|&c| IBig::from(c)).collect(), IBig::from(constant))
    }

    /// The constraint `-1 >= 0` over `n` columns.
    #[must_use]
    pub fn false_constraint(n: usize) -> Self {
        Self {
            kind: ConstraintKind::Ineq,
            coeffs: vec![IBig::ZERO; n],
            constant: IBig::NEG_ONE,
        }
    }

    fn normalized(kind: ConstraintKind, mut coeffs: Vec<IBig>, mut constant: IBig) -> Self {
        let g = coeffs
            .iter()
            .filter(|c| **c != IBig::ZERO)
            .fold(None, |acc: Option<IBig>, c| {
                Some(match acc {
                    None => c.clone().abs(),
                    Some(g) => gcd(&g, c),
                })
            });

        let Some(g) = g else {
            let holds = match kind {
                ConstraintKind::Eq => constant == IBig::ZERO,
                ConstraintKind::Ineq => constant >= IBig::ZERO,
            };
            return Self {
                kind: ConstraintKind::Ineq,
                coeffs,
                constant: if holds { IBig::ZERO } else { IBig::NEG_ONE },
            };
        };

        if g != IBig::ONE {
            match kind {
                ConstraintKind::Ineq => constant = floor_div(&constant, &g),
                ConstraintKind::Eq => {
                    if &constant % &g != IBig::ZERO {
                        return Self::false_constraint(coeffs.len());
                    }
                    constant = &constant / &g;
                }
            }
            for c in &mut coeffs {
                *c = &*c / &g;
            }
        }

        if kind == ConstraintKind::Eq {
            let leading_negative = coeffs
                .iter()
                .find(|c| **c != IBig::ZERO)
                .is_some_and(|c| *c < IBig::ZERO);
            if leading_negative {
                for c in &mut coeffs {
                    *c = -c.clone();
                }
                constant = -constant;
            }
        }

        Self {
            kind,
            coeffs,
            constant,
        }
    }

    /// Returns the kind.
    #[must_use]
    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    /// Returns the coefficients.
    #[must_use]
    pub fn coeffs(&self) -> &[IBig] {
        &self.coeffs
    }

    /// Returns the constant term.
    #[must_use]
    pub fn constant(&self) -> &IBig {
        &self.constant
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.coeffs.len()
    }

    /// Returns true if no variable has a non-zero coefficient.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.coeffs.iter().all(|c| *c == IBig::ZERO)
    }

    /// Returns true for `0 >= 0`.
    #[must_use]
    pub fn is_trivially_true(&self) -> bool {
        self.is_constant() && self.constant == IBig::ZERO
    }

    /// Returns true for `-1 >= 0`.
    #[must_use]
    pub fn is_trivially_false(&self) -> bool {
        self.is_constant() && self.constant < IBig::ZERO
    }

    /// Returns true if `self` and `other` are inequalities with opposite
    /// linear parts that cannot hold together.
    #[must_use]
    pub fn opposes(&self, other: &Self) -> bool {
        match (self.kind, other.kind) {
            (ConstraintKind::Ineq, ConstraintKind::Ineq) => {
                self.coeffs.len() == other.coeffs.len()
                    && self
                        .coeffs
                        .iter()
                        .zip(&other.coeffs)
                        .all(|(a, b)| *a == -b.clone())
                    && &self.constant + &other.constant < IBig::ZERO
            }
            (ConstraintKind::Eq, ConstraintKind::Eq) => {
                self.coeffs == other.coeffs && self.constant != other.constant
            }
            _ => false,
        }
    }

    /// Returns the integer complement of the constraint as a disjunction.
    ///
    /// `f >= 0` becomes `-f - 1 >= 0`; `f = 0` becomes
    /// `f - 1 >= 0 or -f - 1 >= 0`.
    #[must_use]
    pub fn negate(&self) -> Vec<Self> {
        let neg_coeffs: Vec<IBig> = self.coeffs.iter().map(|c| -c.clone()).collect();
        let below = Self::inequality(neg_coeffs, -self.constant.clone() - IBig::ONE);
        match self.kind {
            ConstraintKind::Ineq => vec![below],
            ConstraintKind::Eq => vec![
                Self::inequality(self.coeffs.clone(), self.constant.clone() - IBig::ONE),
                below,
            ],
        }
    }

    /// Returns true if any of the `n` columns starting at `first` has a
    /// non-zero coefficient.
    #[must_use]
    pub fn involves(&self, first: usize, n: usize) -> bool {
        self.coeffs
            .iter()
            .skip(first)
            .take(n)
            .any(|c| *c != IBig::ZERO)
    }

    /// Removes `n` columns starting at `first`.
    #[must_use]
    pub fn drop_cols(&self, first: usize, n: usize) -> Self {
        let mut coeffs = self.coeffs.clone();
        let end = (first + n).min(coeffs.len());
        coeffs.drain(first.min(end)..end);
        Self::normalized(self.kind, coeffs, self.constant.clone())
    }

    /// Inserts `n` zero columns at `pos`.
    #[must_use]
    pub fn insert_cols(&self, pos: usize, n: usize) -> Self {
        let mut coeffs = self.coeffs.clone();
        let pos = pos.min(coeffs.len());
        coeffs.splice(pos..pos, std::iter::repeat(IBig::ZERO).take(n));
        Self {
            kind: self.kind,
            coeffs,
            constant: self.constant.clone(),
        }
    }

    /// Moves the columns according to `r`.
    #[must_use]
    pub fn realign(&self, r: &Reordering) -> Self {
        Self {
            kind: self.kind,
            coeffs: r.apply(&self.coeffs, &IBig::ZERO),
            constant: self.constant.clone(),
        }
    }

    /// Returns true if the constraint holds at `point`.
    #[must_use]
    pub fn holds_at(&self, point: &[i64]) -> bool {
        let value = self
            .coeffs
            .iter()
            .zip(point)
            .fold(self.constant.clone(), |acc, (c, &x)| acc + c.clone() * IBig::from(x));
        match self.kind {
            ConstraintKind::Eq => value == IBig::ZERO,
            ConstraintKind::Ineq => value >= IBig::ZERO,
        }
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constraint({self})")
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (i, c) in self.coeffs.iter().enumerate() {
            if *c == IBig::ZERO {
                continue;
            }
            if !first {
                f.write_str(" + ")?;
            }
            first = false;
            if *c == IBig::ONE {
                write!(f, "x{i}")?;
            } else {
                write!(f, "{c}*x{i}")?;
            }
        }
        if first || self.constant != IBig::ZERO {
            if !first {
                f.write_str(" + ")?;
            }
            write!(f, "{}", self.constant)?;
        }
        match self.kind {
            ConstraintKind::Eq => f.write_str(" = 0"),
            ConstraintKind::Ineq => f.write_str(" >= 0"),
        }
    }
}
