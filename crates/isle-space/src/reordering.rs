//! Parameter reorderings.
//!
//! A [`Reordering`] maps every dimension of a source space to a position in
//! a target space. [`parameter_alignment`] computes the reordering that
//! aligns the parameters of one space with those of a model, after which
//! [`Reordering::extend_space`] extends it to the tuple dimensions of an
//! individual expression.

use crate::error::{Error, Result};
use crate::id::Id;
use crate::space::{DimType, Space};

/// A map from source dimension positions to target dimension positions.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Reordering {
    /// The target space.
    space: Space,
    /// `pos[i]` is the target position of source dimension `i`.
    pos: Vec<usize>,
}

fn check_unique(params: &[Id]) -> Result<()> {
    for (i, p) in params.iter().enumerate() {
        if params[..i].contains(p) {
            return Err(Error::invalid(format!("duplicate parameter {p}")));
        }
    }
    Ok(())
}

/// Computes the reordering that aligns the parameters of `from` with those
/// of `model`.
///
/// The target parameters are those of `model`, followed by the parameters
/// of `from` that do not appear in `model`, in their original order.
///
/// # Errors
///
/// Returns [`Error::Invalid`] if either space repeats a parameter.
pub fn parameter_alignment(from: &Space, model: &Space) -> Result<Reordering> {
    check_unique(from.params())?;
    check_unique(model.params())?;

    let mut target: Vec<Id> = model.params().to_vec();
    for p in from.params() {
        if !target.contains(p) {
            target.push(p.clone());
        }
    }

    let pos = from
        .params()
        .iter()
        .map(|p| {
            target
                .iter()
                .position(|t| t == p)
                .ok_or_else(|| Error::internal("parameter missing from alignment target"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Reordering {
        space: Space::params_alloc(target),
        pos,
    })
}

impl Reordering {
    /// Returns the target space.
    #[must_use]
    pub fn space(&self) -> &Space {
        &self.space
    }

    /// Returns the target position of every source dimension.
    #[must_use]
    pub fn positions(&self) -> &[usize] {
        &self.pos
    }

    /// Returns the number of source dimensions.
    #[must_use]
    pub fn src_len(&self) -> usize {
        self.pos.len()
    }

    /// Returns the number of target dimensions.
    #[must_use]
    pub fn dst_len(&self) -> usize {
        self.space.total_dim()
    }

    /// Returns true if the reordering leaves every dimension in place.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.src_len() == self.dst_len() && self.pos.iter().enumerate().all(|(i, &p)| i == p)
    }

    /// Extends a parameter reordering to the tuple dimensions of `space`,
    /// which are kept in order after the target parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `space` does not have as many
    /// parameters as the source of the reordering.
    pub fn extend_space(&self, space: &Space) -> Result<Self> {
        if space.n_param() != self.pos.len() || self.space.n_tuple_dims() != 0 {
            return Err(Error::invalid("reordering cannot be extended to this space"));
        }
        let n_target = self.space.n_param();
        let n_tuple = space.dim(DimType::In) + space.dim(DimType::Out);
        let mut pos = self.pos.clone();
        pos.extend((0..n_tuple).map(|k| n_target + k));
        Ok(Self {
            space: space.with_params(self.space.params().to_vec()),
            pos,
        })
    }

    /// Rearranges a row indexed by source dimensions into one indexed by
    /// target dimensions, filling new dimensions with `fill`.
    #[must_use]
    pub fn apply<T: Clone>(&self, row: &[T], fill: &T) -> Vec<T> {
        let mut out = vec![fill.clone(); self.dst_len()];
        for (value, &p) in row.iter().zip(&self.pos) {
            out[p] = value.clone();
        }
        out
    }
}
