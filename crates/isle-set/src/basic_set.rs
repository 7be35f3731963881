//! Conjunctions of affine constraints.

use crate::constraint::Constraint;
use isle_space::{Error, Reordering, Result};
use std::fmt;

/// A conjunction of constraints over a fixed number of columns.
///
/// Constraints are kept sorted and deduplicated, and trivially true
/// constraints are dropped, so two basic sets built from the same
/// constraints compare equal.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BasicSet {
    n_cols: usize,
    constraints: Vec<Constraint>,
}

impl BasicSet {
    /// The basic set without constraints.
    #[must_use]
    pub fn universe(n_cols: usize) -> Self {
        Self {
            n_cols,
            constraints: Vec::new(),
        }
    }

    /// Creates a basic set from constraints over `n_cols` columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if a constraint has a different number of
    /// columns.
    pub fn from_constraints(n_cols: usize, constraints: Vec<Constraint>) -> Result<Self> {
        if let Some(c) = constraints.iter().find(|c| c.n_cols() != n_cols) {
            return Err(Error::invalid(format!(
                "constraint has {} columns, expected {n_cols}",
                c.n_cols()
            )));
        }
        Ok(Self::normalize(n_cols, constraints))
    }

    fn normalize(n_cols: usize, mut constraints: Vec<Constraint>) -> Self {
        constraints.retain(|c| !c.is_trivially_true());
        constraints.sort();
        constraints.dedup();
        if constraints.iter().any(Constraint::is_trivially_false) {
            constraints = vec![Constraint::false_constraint(n_cols)];
        }
        Self {
            n_cols,
            constraints,
        }
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Returns the constraints.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Returns true if there are no constraints.
    #[must_use]
    pub fn is_universe(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Returns true if the constraints are obviously contradictory.
    ///
    /// This is a syntactic check: a false constraint, or two constraints
    /// that oppose each other.
    #[must_use]
    pub fn plain_is_empty(&self) -> bool {
        let cs = &self.constraints;
        cs.iter().any(Constraint::is_trivially_false)
            || cs
                .iter()
                .enumerate()
                .any(|(i, a)| cs[i + 1..].iter().any(|b| a.opposes(b)))
    }

    /// Returns the conjunction of both basic sets.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let mut constraints = self.constraints.clone();
        constraints.extend(other.constraints.iter().cloned());
        Self::normalize(self.n_cols, constraints)
    }

    /// Adds a single constraint.
    #[must_use]
    pub fn add_constraint(&self, c: Constraint) -> Self {
        let mut constraints = self.constraints.clone();
        constraints.push(c);
        Self::normalize(self.n_cols, constraints)
    }

    /// Returns true if every constraint of `other` also appears in `self`,
    /// so that `self` is a subset of `other`.
    #[must_use]
    pub fn plain_is_subset(&self, other: &Self) -> bool {
        other
            .constraints
            .iter()
            .all(|c| self.constraints.binary_search(c).is_ok())
    }

    /// Returns true if the point satisfies every constraint.
    #[must_use]
    pub fn contains(&self, point: &[i64]) -> bool {
        self.constraints.iter().all(|c| c.holds_at(point))
    }

    /// Keeps the constraints for which `keep` returns true.
    #[must_use]
    pub fn filter(&self, mut keep: impl FnMut(&Constraint) -> bool) -> Self {
        Self {
            n_cols: self.n_cols,
            constraints: self.constraints.iter().filter(|c| keep(c)).cloned().collect(),
        }
    }

    /// Returns true if any constraint involves the `n` columns from `first`.
    #[must_use]
    pub fn involves(&self, first: usize, n: usize) -> bool {
        self.constraints.iter().any(|c| c.involves(first, n))
    }

    /// Removes `n` columns starting at `first`.
    #[must_use]
    pub fn drop_cols(&self, first: usize, n: usize) -> Self {
        let constraints = self
            .constraints
            .iter()
            .map(|c| c.drop_cols(first, n))
            .collect();
        Self::normalize(self.n_cols.saturating_sub(n), constraints)
    }

    /// Inserts `n` unconstrained columns at `pos`.
    #[must_use]
    pub fn insert_cols(&self, pos: usize, n: usize) -> Self {
        let constraints = self
            .constraints
            .iter()
            .map(|c| c.insert_cols(pos, n))
            .collect();
        Self::normalize(self.n_cols + n, constraints)
    }

    /// Moves the columns according to `r`.
    #[must_use]
    pub fn realign(&self, r: &Reordering) -> Self {
        let constraints = self.constraints.iter().map(|c| c.realign(r)).collect();
        Self::normalize(r.dst_len(), constraints)
    }
}

impl fmt::Debug for BasicSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BasicSet({self})")
    }
}

impl fmt::Display for BasicSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.constraints.is_empty() {
            return f.write_str("true");
        }
        for (i, c) in self.constraints.iter().enumerate() {
            if i > 0 {
                f.write_str(" and ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
