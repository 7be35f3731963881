//! Piecewise expressions.
//!
//! A [`Pw`] assigns an expression to each of a list of pairwise disjoint
//! sets in one domain space. Pieces over plainly empty sets are never
//! stored, and neither are zero expressions in families where a point
//! outside every piece evaluates to zero.

use crate::expr::{PieceExpr, PieceSub};
use dashu::integer::IBig;
use dashu::rational::RBig;
use isle_set::Set;
use isle_space::{DimType, Error, Reordering, Result, Space};
use isle_union::{FoldTag, Part, SubPart};
use isle_val::Val;
use std::fmt;
use tracing::trace;

/// A piecewise expression on the map space `D -> [1]`.
#[derive(Clone, PartialEq, Debug)]
pub struct Pw<E: PieceExpr> {
    space: Space,
    tag: E::Tag,
    pieces: Vec<(Set, E)>,
}

impl<E: PieceExpr> Pw<E> {
    /// Creates the piecewise expression equal to `expr` on `set` and
    /// undefined (or zero) elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `set` does not live in a set space or
    /// `expr` does not range over its columns.
    pub fn alloc(set: Set, expr: E) -> Result<Self> {
        let space = set.space().from_domain()?;
        let tag = expr.tag();
        Self {
            space,
            tag,
            pieces: Vec::new(),
        }
        .add_piece(set, expr)
    }

    /// Creates the expression equal to `expr` on every point of `domain`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `domain` is not a set space or `expr`
    /// does not range over its columns.
    pub fn from_expr(domain: Space, expr: E) -> Result<Self> {
        Self::alloc(Set::universe(domain), expr)
    }

    /// Returns the pieces.
    #[must_use]
    pub fn pieces(&self) -> &[(Set, E)] {
        &self.pieces
    }

    /// Returns the number of pieces.
    #[must_use]
    pub fn n_piece(&self) -> usize {
        self.pieces.len()
    }

    /// Evaluates the expression at a point given as `[params.., dims..]`.
    ///
    /// Points outside every piece evaluate to zero in families where that
    /// is the default, and to NaN otherwise.
    #[must_use]
    pub fn eval(&self, point: &[i64]) -> Val {
        match self.pieces.iter().find(|(set, _)| set.contains(point)) {
            Some((_, expr)) => expr.eval(point),
            None if E::DEFAULT_IS_ZERO => Val::zero(),
            None => Val::nan(),
        }
    }

    /// Appends a piece, skipping it if it is plainly empty or, in
    /// zero-default families, if its expression is zero.
    fn add_piece(mut self, set: Set, expr: E) -> Result<Self> {
        if !set.space().is_equal(&self.space.domain()) {
            return Err(Error::invalid("piece does not live in the domain space"));
        }
        if expr.n_cols() != set.space().total_dim() {
            return Err(Error::invalid("expression does not match the domain"));
        }
        if expr.tag() != self.tag {
            return Err(Error::invalid("fold types don't match"));
        }
        if set.plain_is_empty() || (E::DEFAULT_IS_ZERO && expr.is_zero()) {
            return Ok(self);
        }
        self.pieces.push((set, expr));
        Ok(self)
    }

    /// Creates an empty result with the space and tag of `self`, then adds
    /// the given pieces.
    fn with_pieces<I>(&self, tag: E::Tag, pieces: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Set, E)>,
    {
        let empty = Self {
            space: self.space.clone(),
            tag,
            pieces: Vec::new(),
        };
        pieces
            .into_iter()
            .try_fold(empty, |pw, (set, expr)| pw.add_piece(set, expr))
    }

    fn check_compatible(&self, other: &Self) -> Result<()> {
        if !self.space.is_equal(&other.space) {
            return Err(Error::invalid("spaces don't match"));
        }
        if self.tag != other.tag {
            return Err(Error::invalid("fold types don't match"));
        }
        Ok(())
    }

    /// Combines the pieces of both operands on their overlaps with `op`.
    fn on_shared_domain<F>(self, other: &Self, op: F) -> Result<Self>
    where
        F: Fn(&E, &E) -> Result<E>,
    {
        self.check_compatible(other)?;
        let mut pieces = Vec::new();
        for (s1, e1) in &self.pieces {
            for (s2, e2) in &other.pieces {
                let common = s1.intersect(s2)?;
                if !common.plain_is_empty() {
                    pieces.push((common, op(e1, e2)?));
                }
            }
        }
        self.with_pieces(self.tag, pieces)
    }

    /// Applies a set operation to the set of every piece.
    fn map_sets<F>(self, f: F) -> Result<Self>
    where
        F: Fn(&Set) -> Result<Set>,
    {
        let pieces = self
            .pieces
            .iter()
            .map(|(set, expr)| Ok((f(set)?, expr.clone())))
            .collect::<Result<Vec<_>>>()?;
        self.with_pieces(self.tag, pieces)
    }

    /// Multiplies every expression by the rational `f`.
    fn scale_rational(self, f: &RBig) -> Result<Self> {
        let tag = if *f < RBig::ZERO {
            self.tag.negate()
        } else {
            self.tag
        };
        let pieces = self
            .pieces
            .iter()
            .map(|(set, expr)| (set.clone(), expr.scale(f)))
            .collect::<Vec<_>>();
        self.with_pieces(tag, pieces)
    }

    /// Aligns `set` with the parameters of the piece sets.
    fn aligned(&self, set: &Set) -> Result<Set> {
        set.align_params(&self.space)
    }
}

impl<E: PieceExpr> Part for Pw<E> {
    type Tag = E::Tag;
    const DEFAULT_IS_ZERO: bool = E::DEFAULT_IS_ZERO;

    fn space(&self) -> &Space {
        &self.space
    }

    fn tag(&self) -> E::Tag {
        self.tag
    }

    fn zero(space: Space, tag: E::Tag) -> Self {
        Self {
            space,
            tag,
            pieces: Vec::new(),
        }
    }

    fn is_zero(&self) -> bool {
        self.pieces.is_empty()
    }

    fn union_add(self, other: Self) -> Result<Self> {
        self.check_compatible(&other)?;
        let dom1 = self.domain()?;
        let dom2 = other.domain()?;

        let mut pieces = Vec::new();
        for (s1, e1) in &self.pieces {
            for (s2, e2) in &other.pieces {
                let common = s1.intersect(s2)?;
                if !common.plain_is_empty() {
                    pieces.push((common, e1.union_combine(e2)?));
                }
            }
        }
        for (s1, e1) in &self.pieces {
            pieces.push((s1.subtract(&dom2)?, e1.clone()));
        }
        for (s2, e2) in &other.pieces {
            pieces.push((s2.subtract(&dom1)?, e2.clone()));
        }
        self.with_pieces(self.tag, pieces)
    }

    fn add(self, other: Self) -> Result<Self> {
        if E::DEFAULT_IS_ZERO {
            self.union_add(other)
        } else {
            self.on_shared_domain(&other, E::add)
        }
    }

    fn domain(&self) -> Result<Set> {
        self.pieces
            .iter()
            .try_fold(Set::empty(self.space.domain()), |dom, (set, _)| {
                dom.union(set)
            })
    }

    fn realign_domain(self, r: &Reordering) -> Result<Self> {
        if r.src_len() != self.space.domain().total_dim() {
            return Err(Error::invalid("reordering does not match the domain"));
        }
        let space = self.space.with_params(r.space().params().to_vec());
        let pieces = self
            .pieces
            .into_iter()
            .map(|(set, expr)| (set.realign(r), expr.realign(r)))
            .collect();
        Ok(Self {
            space,
            tag: self.tag,
            pieces,
        })
    }

    fn intersect_params(self, set: &Set) -> Result<Self> {
        if !set.is_params() {
            return Err(Error::invalid("expecting parameter set"));
        }
        let set = self.aligned(set)?;
        self.map_sets(|s| s.intersect_params(&set))
    }

    fn gist_params(self, set: &Set) -> Result<Self> {
        if !set.is_params() {
            return Err(Error::invalid("expecting parameter set"));
        }
        let set = self.aligned(set)?;
        self.map_sets(|s| s.gist_params(&set))
    }

    fn intersect_domain(self, set: &Set) -> Result<Self> {
        let set = self.aligned(set)?;
        self.map_sets(|s| s.intersect(&set))
    }

    fn gist(self, set: &Set) -> Result<Self> {
        let set = self.aligned(set)?;
        self.map_sets(|s| s.gist(&set))
    }

    fn subtract_domain(self, set: &Set) -> Result<Self> {
        let set = self.aligned(set)?;
        self.map_sets(|s| s.subtract(&set))
    }

    /// Merges pieces with equal expressions and coalesces their sets.
    fn coalesce(self) -> Result<Self> {
        let mut merged: Vec<(Set, E)> = Vec::with_capacity(self.pieces.len());
        for (set, expr) in &self.pieces {
            match merged.iter_mut().find(|(_, e)| e == expr) {
                Some((s, _)) => *s = s.union(set)?,
                None => merged.push((set.clone(), expr.clone())),
            }
        }
        if merged.len() < self.pieces.len() {
            trace!("merged {} pieces into {}", self.pieces.len(), merged.len());
        }
        let pieces = merged
            .into_iter()
            .map(|(set, expr)| (set.coalesce(), expr))
            .collect::<Vec<_>>();
        self.with_pieces(self.tag, pieces)
    }

    fn mul_int(self, v: &IBig) -> Result<Self> {
        self.scale_rational(&RBig::from(v.clone()))
    }

    fn scale_val(self, v: &Val) -> Result<Self> {
        let f = v
            .as_rational()
            .ok_or_else(|| Error::invalid("expecting rational factor"))?;
        self.scale_rational(f)
    }

    fn scale_down_val(self, v: &Val) -> Result<Self> {
        if !v.is_rat() {
            return Err(Error::invalid("expecting rational factor"));
        }
        if v.is_zero() {
            return Err(Error::invalid("cannot scale down by zero"));
        }
        self.scale_val(&v.recip())
    }

    /// Compares the pieces as a multiset.
    fn plain_is_equal(&self, other: &Self) -> bool {
        if !self.space.is_equal(&other.space)
            || self.tag != other.tag
            || self.pieces.len() != other.pieces.len()
        {
            return false;
        }
        let mut used = vec![false; other.pieces.len()];
        self.pieces.iter().all(|(s1, e1)| {
            let found = other.pieces.iter().enumerate().position(|(j, (s2, e2))| {
                !used[j] && e1 == e2 && s1.plain_is_equal(s2)
            });
            match found {
                Some(j) => {
                    used[j] = true;
                    true
                }
                None => false,
            }
        })
    }

    fn drop_dims(self, ty: DimType, first: usize, n: usize) -> Result<Self> {
        let set_ty = match ty {
            DimType::Param => DimType::Param,
            DimType::In => DimType::SET,
            DimType::Out => return Err(Error::invalid("cannot drop output dimensions")),
        };
        let space = self.space.drop_dims(ty, first, n)?;
        let col = self.space.offset(ty) + first;
        let pieces = self
            .pieces
            .iter()
            .map(|(set, expr)| Ok((set.drop_dims(set_ty, first, n)?, expr.drop_cols(col, n)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            space,
            tag: self.tag,
            pieces,
        })
    }

    fn set_dim_name(self, ty: DimType, pos: usize, name: &str) -> Result<Self> {
        let space = self.space.set_dim_name(ty, pos, name)?;
        let set_ty = match ty {
            DimType::Param => Some(DimType::Param),
            DimType::In => Some(DimType::SET),
            DimType::Out => None,
        };
        let pieces = match set_ty {
            Some(set_ty) => self
                .pieces
                .into_iter()
                .map(|(set, expr)| Ok((set.set_dim_name(set_ty, pos, name)?, expr)))
                .collect::<Result<Vec<_>>>()?,
            None => self.pieces,
        };
        Ok(Self {
            space,
            tag: self.tag,
            pieces,
        })
    }

    fn reset_user(self) -> Self {
        Self {
            space: self.space.reset_user(),
            tag: self.tag,
            pieces: self
                .pieces
                .into_iter()
                .map(|(set, expr)| (set.reset_user(), expr))
                .collect(),
        }
    }
}

impl<E: PieceSub> SubPart for Pw<E> {
    /// Subtracts `other`. Zero-default families subtract over the union of
    /// the domains, the others over their intersection.
    fn sub(self, other: Self) -> Result<Self> {
        if E::DEFAULT_IS_ZERO {
            let neg = other.scale_rational(&RBig::NEG_ONE)?;
            self.union_add(neg)
        } else {
            self.on_shared_domain(&other, E::sub)
        }
    }
}

impl<E: PieceExpr> fmt::Display for Pw<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{ ", self.space)?;
        if self.pieces.is_empty() {
            f.write_str("0")?;
        }
        for (i, (set, expr)) in self.pieces.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{expr} : {set}")?;
        }
        f.write_str(" }")
    }
}
