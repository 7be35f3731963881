//! Finite unions of basic sets living in one space.

use crate::basic_set::BasicSet;
use crate::constraint::Constraint;
use isle_space::{parameter_alignment, DimType, Error, Reordering, Result, Space};
use std::fmt;

/// A set of integer points in a parameter or set space, represented as a
/// finite union of [`BasicSet`]s.
///
/// Basic sets that are plainly empty are dropped, and the remaining ones are
/// kept sorted and deduplicated. The empty set has no basic sets.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Set {
    space: Space,
    basics: Vec<BasicSet>,
}

impl Set {
    fn normalize(space: Space, mut basics: Vec<BasicSet>) -> Self {
        basics.retain(|b| !b.plain_is_empty());
        basics.sort();
        basics.dedup();
        Self { space, basics }
    }

    /// The set containing every point of `space`.
    #[must_use]
    pub fn universe(space: Space) -> Self {
        let n = space.total_dim();
        Self {
            space,
            basics: vec![BasicSet::universe(n)],
        }
    }

    /// The empty set in `space`.
    #[must_use]
    pub fn empty(space: Space) -> Self {
        Self {
            space,
            basics: Vec::new(),
        }
    }

    /// Creates the set described by the conjunction of `constraints`.
    ///
    /// Each constraint has one coefficient per column of the space, laid
    /// out as `[params.., dims..]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `space` is a map space or a constraint
    /// has the wrong number of columns.
    pub fn from_constraints(space: Space, constraints: Vec<Constraint>) -> Result<Self> {
        if space.is_map() {
            return Err(Error::invalid("expecting set or parameter space"));
        }
        let basic = BasicSet::from_constraints(space.total_dim(), constraints)?;
        Ok(Self::normalize(space, vec![basic]))
    }

    /// Creates the union of the given basic sets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if a basic set has the wrong number of
    /// columns.
    pub fn from_basic_sets(space: Space, basics: Vec<BasicSet>) -> Result<Self> {
        let n = space.total_dim();
        if basics.iter().any(|b| b.n_cols() != n) {
            return Err(Error::invalid("basic set does not match space"));
        }
        Ok(Self::normalize(space, basics))
    }

    /// Returns the space.
    #[must_use]
    pub fn space(&self) -> &Space {
        &self.space
    }

    /// Returns the basic sets.
    #[must_use]
    pub fn basic_sets(&self) -> &[BasicSet] {
        &self.basics
    }

    /// Returns the number of basic sets.
    #[must_use]
    pub fn n_basic(&self) -> usize {
        self.basics.len()
    }

    /// Returns true if the set has no basic sets left.
    #[must_use]
    pub fn plain_is_empty(&self) -> bool {
        self.basics.is_empty()
    }

    /// Returns true if some basic set is unconstrained.
    #[must_use]
    pub fn plain_is_universe(&self) -> bool {
        self.basics.iter().any(BasicSet::is_universe)
    }

    /// Returns true if the set lives in a parameter space.
    #[must_use]
    pub fn is_params(&self) -> bool {
        self.space.is_params()
    }

    /// Returns true if the point belongs to the set.
    #[must_use]
    pub fn contains(&self, point: &[i64]) -> bool {
        self.basics.iter().any(|b| b.contains(point))
    }

    /// Moves the columns according to `r`; the result lives in the target
    /// space of `r`.
    #[must_use]
    pub fn realign(&self, r: &Reordering) -> Self {
        let basics = self.basics.iter().map(|b| b.realign(r)).collect();
        Self::normalize(r.space().clone(), basics)
    }

    /// Aligns the parameters with those of `model`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if either space repeats a parameter.
    pub fn align_params(&self, model: &Space) -> Result<Self> {
        if self.space.has_equal_params(model) {
            return Ok(self.clone());
        }
        let r = parameter_alignment(&self.space, model)?.extend_space(&self.space)?;
        Ok(self.realign(&r))
    }

    /// Aligns both operands on the same parameters.
    fn aligned_with(&self, other: &Self) -> Result<(Self, Self)> {
        let other = other.align_params(&self.space)?;
        let this = self.align_params(&other.space)?;
        Ok((this, other))
    }

    fn check_same_space(&self, other: &Self) -> Result<()> {
        if self.space.is_equal(&other.space) {
            Ok(())
        } else {
            Err(Error::invalid("spaces don't match"))
        }
    }

    /// Lifts a parameter set into the space of `self`, assuming both have
    /// the same parameters.
    fn lift(&self, params: &Self) -> Self {
        let n_param = self.space.n_param();
        let n_dims = self.space.n_tuple_dims();
        let basics = params
            .basics
            .iter()
            .map(|b| b.insert_cols(n_param, n_dims))
            .collect();
        Self::normalize(self.space.clone(), basics)
    }

    /// Returns the intersection of both sets.
    ///
    /// A parameter set is first lifted into the space of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if the spaces don't match after parameter
    /// alignment.
    pub fn intersect(&self, other: &Self) -> Result<Self> {
        if other.is_params() && !self.is_params() {
            return self.intersect_params(other);
        }
        let (this, other) = self.aligned_with(other)?;
        this.check_same_space(&other)?;
        let basics = this
            .basics
            .iter()
            .flat_map(|a| other.basics.iter().map(move |b| a.intersect(b)))
            .collect();
        Ok(Self::normalize(this.space, basics))
    }

    /// Intersects with constraints on the parameters only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `params` is not a parameter set.
    pub fn intersect_params(&self, params: &Self) -> Result<Self> {
        if !params.is_params() {
            return Err(Error::invalid("expecting parameter set"));
        }
        let (this, params) = self.aligned_with(params)?;
        let lifted = this.lift(&params);
        this.intersect(&lifted)
    }

    /// Returns the union of both sets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if the spaces don't match after parameter
    /// alignment.
    pub fn union(&self, other: &Self) -> Result<Self> {
        let (this, other) = self.aligned_with(other)?;
        this.check_same_space(&other)?;
        let mut basics = this.basics;
        basics.extend(other.basics);
        Ok(Self::normalize(this.space, basics))
    }

    /// Returns the points of `self` that are not in `other`.
    ///
    /// Every basic set of `other` with constraints `c1, .., ck` splits each
    /// piece of `self` into the disjoint pieces
    /// `c1 .. c(i-1), not ci` for `i = 1..k`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if the spaces don't match after parameter
    /// alignment.
    pub fn subtract(&self, other: &Self) -> Result<Self> {
        let (this, other) = self.aligned_with(other)?;
        this.check_same_space(&other)?;
        let mut pieces = this.basics;
        for b in &other.basics {
            let mut next = Vec::new();
            for a in &pieces {
                let mut prefix = a.clone();
                for c in b.constraints() {
                    for neg in c.negate() {
                        let piece = prefix.add_constraint(neg);
                        if !piece.plain_is_empty() {
                            next.push(piece);
                        }
                    }
                    prefix = prefix.add_constraint(c.clone());
                    if prefix.plain_is_empty() {
                        break;
                    }
                }
            }
            pieces = next;
        }
        Ok(Self::normalize(this.space, pieces))
    }

    /// Simplifies `self` assuming the points of `context`.
    ///
    /// Constraints that appear in every basic set of the context are
    /// removed. An empty context leaves `self` unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if the spaces don't match after parameter
    /// alignment.
    pub fn gist(&self, context: &Self) -> Result<Self> {
        if context.is_params() && !self.is_params() {
            return self.gist_params(context);
        }
        let (this, context) = self.aligned_with(context)?;
        this.check_same_space(&context)?;
        if context.basics.is_empty() {
            return Ok(this);
        }
        let basics = this
            .basics
            .iter()
            .map(|a| {
                a.filter(|c| {
                    !context
                        .basics
                        .iter()
                        .all(|b| b.constraints().binary_search(c).is_ok())
                })
            })
            .collect();
        Ok(Self::normalize(this.space, basics))
    }

    /// Simplifies `self` assuming the parameter constraints of `context`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `context` is not a parameter set.
    pub fn gist_params(&self, context: &Self) -> Result<Self> {
        if !context.is_params() {
            return Err(Error::invalid("expecting parameter set"));
        }
        let (this, context) = self.aligned_with(context)?;
        let lifted = this.lift(&context);
        this.gist(&lifted)
    }

    /// Removes basic sets that are contained in another basic set.
    #[must_use]
    pub fn coalesce(&self) -> Self {
        let basics = self
            .basics
            .iter()
            .enumerate()
            .filter(|&(i, a)| {
                !self
                    .basics
                    .iter()
                    .enumerate()
                    .any(|(j, b)| i != j && a.plain_is_subset(b))
            })
            .map(|(_, a)| a.clone())
            .collect();
        Self::normalize(self.space.clone(), basics)
    }

    /// Returns true if both sets have the same space and the same basic
    /// sets.
    #[must_use]
    pub fn plain_is_equal(&self, other: &Self) -> bool {
        self.space.is_equal(&other.space) && self.basics == other.basics
    }

    /// Removes `n` dimensions of kind `ty` starting at `first`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if the range is out of bounds or a removed
    /// dimension appears in a constraint.
    pub fn drop_dims(&self, ty: DimType, first: usize, n: usize) -> Result<Self> {
        let space = self.space.drop_dims(ty, first, n)?;
        let col = self.space.offset(ty) + first;
        if self.basics.iter().any(|b| b.involves(col, n)) {
            return Err(Error::invalid("cannot drop dimensions involved in constraints"));
        }
        let basics = self.basics.iter().map(|b| b.drop_cols(col, n)).collect();
        Ok(Self::normalize(space, basics))
    }

    /// Renames dimension `pos` of kind `ty`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `pos` is out of bounds.
    pub fn set_dim_name(&self, ty: DimType, pos: usize, name: &str) -> Result<Self> {
        Ok(Self {
            space: self.space.set_dim_name(ty, pos, name)?,
            basics: self.basics.clone(),
        })
    }

    /// Removes the user tags of all identifiers in the space.
    #[must_use]
    pub fn reset_user(&self) -> Self {
        Self {
            space: self.space.reset_user(),
            basics: self.basics.clone(),
        }
    }
}

impl fmt::Debug for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Set({self})")
    }
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : ", self.space)?;
        if self.basics.is_empty() {
            return f.write_str("false");
        }
        for (i, b) in self.basics.iter().enumerate() {
            if i > 0 {
                f.write_str(" or ")?;
            }
            write!(f, "{b}")?;
        }
        Ok(())
    }
}
