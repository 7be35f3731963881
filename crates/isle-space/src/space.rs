//! Spaces: parameters plus optional input and output tuples.
//!
//! Every set, expression and union lives in a [`Space`]. Parameters are
//! always named; they are matched by identifier when operands built
//! independently are aligned. Tuples are matched by their identifier and
//! dimension count only, never by dimension names.

use std::fmt;

use crate::error::{Error, Result};
use crate::id::Id;
use crate::reordering::parameter_alignment;

/// The kind of a dimension.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DimType {
    /// A parameter, shared by all tuples of a space.
    Param,
    /// An input (domain) dimension of a map space.
    In,
    /// An output (range) dimension, or a dimension of a set space.
    Out,
}

impl DimType {
    /// Set dimensions are stored as output dimensions.
    pub const SET: Self = Self::Out;
}

/// The shape of a tuple: what lookups in union containers key on.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum ShapeKey {
    /// The (absent) tuple of a parameter space.
    Params,
    /// The domain of a set space.
    Set,
    /// A tuple with an optional identifier and a dimension count.
    Tuple {
        /// The tuple identifier.
        id: Option<Id>,
        /// The number of dimensions.
        n: usize,
    },
}

/// A tuple of dimensions with an optional identifier.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Tuple {
    id: Option<Id>,
    dims: Vec<Option<Id>>,
}

impl Tuple {
    /// Creates an anonymous tuple with `n` unnamed dimensions.
    #[must_use]
    pub fn anonymous(n: usize) -> Self {
        Self {
            id: None,
            dims: vec![None; n],
        }
    }

    /// Creates a tuple named `name` with `n` unnamed dimensions.
    #[must_use]
    pub fn named(name: &str, n: usize) -> Self {
        Self {
            id: Some(Id::new(name)),
            dims: vec![None; n],
        }
    }

    /// Creates a tuple with named dimensions.
    #[must_use]
    pub fn with_dims(name: Option<&str>, dims: &[&str]) -> Self {
        Self {
            id: name.map(Id::new),
            dims: dims.iter().map(|d| Some(Id::new(d))).collect(),
        }
    }

    /// Creates a tuple from an explicit identifier and dimension ids.
    #[must_use]
    pub fn from_ids(id: Option<Id>, dims: Vec<Option<Id>>) -> Self {
        Self { id, dims }
    }

    /// Returns the tuple identifier.
    #[must_use]
    pub fn id(&self) -> Option<&Id> {
        self.id.as_ref()
    }

    /// Returns the number of dimensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dims.len()
    }

    /// Returns true if the tuple has no dimensions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    /// Returns the identifier of dimension `pos`, if it is named.
    #[must_use]
    pub fn dim_id(&self, pos: usize) -> Option<&Id> {
        self.dims.get(pos).and_then(Option::as_ref)
    }

    /// Returns the shape of this tuple.
    #[must_use]
    pub fn shape(&self) -> ShapeKey {
        ShapeKey::Tuple {
            id: self.id.clone(),
            n: self.dims.len(),
        }
    }

    fn reset_user(&self) -> Self {
        Self {
            id: self.id.as_ref().map(Id::reset_user),
            dims: self
                .dims
                .iter()
                .map(|d| d.as_ref().map(Id::reset_user))
                .collect(),
        }
    }
}

/// A space: named parameters, an optional domain tuple and an optional
/// range tuple.
///
/// - parameter space: neither tuple
/// - set space: range tuple only
/// - map space: both tuples
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Space {
    params: Vec<Id>,
    domain: Option<Tuple>,
    range: Option<Tuple>,
}

impl Space {
    /// Creates a parameter space.
    #[must_use]
    pub fn params_alloc(params: Vec<Id>) -> Self {
        Self {
            params,
            domain: None,
            range: None,
        }
    }

    /// Creates a parameter space from parameter names.
    #[must_use]
    pub fn named_params(names: &[&str]) -> Self {
        Self::params_alloc(names.iter().map(|n| Id::new(n)).collect())
    }

    /// Creates a set space.
    #[must_use]
    pub fn set(params: Vec<Id>, tuple: Tuple) -> Self {
        Self {
            params,
            domain: None,
            range: Some(tuple),
        }
    }

    /// Creates a map space.
    #[must_use]
    pub fn map(params: Vec<Id>, domain: Tuple, range: Tuple) -> Self {
        Self {
            params,
            domain: Some(domain),
            range: Some(range),
        }
    }

    /// Turns a set space into the map space from that set to an anonymous
    /// one-dimensional range, the space of scalar expressions on the set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `self` is not a set space.
    pub fn from_domain(&self) -> Result<Self> {
        match (&self.domain, &self.range) {
            (None, Some(tuple)) => Ok(Self::map(
                self.params.clone(),
                tuple.clone(),
                Tuple::anonymous(1),
            )),
            _ => Err(Error::invalid("expecting set space")),
        }
    }

    /// Returns true for parameter spaces.
    #[must_use]
    pub fn is_params(&self) -> bool {
        self.domain.is_none() && self.range.is_none()
    }

    /// Returns true for set spaces.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.domain.is_none() && self.range.is_some()
    }

    /// Returns true for map spaces.
    #[must_use]
    pub fn is_map(&self) -> bool {
        self.domain.is_some()
    }

    /// Returns the parameter identifiers.
    #[must_use]
    pub fn params(&self) -> &[Id] {
        &self.params
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn n_param(&self) -> usize {
        self.params.len()
    }

    /// Returns the tuple holding dimensions of the given kind.
    #[must_use]
    pub fn tuple(&self, ty: DimType) -> Option<&Tuple> {
        match ty {
            DimType::Param => None,
            DimType::In => self.domain.as_ref(),
            DimType::Out => self.range.as_ref(),
        }
    }

    /// Returns the number of dimensions of the given kind.
    #[must_use]
    pub fn dim(&self, ty: DimType) -> usize {
        match ty {
            DimType::Param => self.params.len(),
            _ => self.tuple(ty).map_or(0, Tuple::len),
        }
    }

    /// Returns the number of non-parameter dimensions.
    #[must_use]
    pub fn n_tuple_dims(&self) -> usize {
        self.dim(DimType::In) + self.dim(DimType::Out)
    }

    /// Returns the total number of dimensions, parameters included.
    #[must_use]
    pub fn total_dim(&self) -> usize {
        self.n_param() + self.n_tuple_dims()
    }

    /// Returns the column at which dimensions of the given kind start in a
    /// row laid out as `[params.., in.., out..]`.
    #[must_use]
    pub fn offset(&self, ty: DimType) -> usize {
        match ty {
            DimType::Param => 0,
            DimType::In => self.n_param(),
            DimType::Out => self.n_param() + self.dim(DimType::In),
        }
    }

    /// Returns the position of the dimension of the given kind named
    /// `name`, if any.
    #[must_use]
    pub fn find_dim_by_name(&self, ty: DimType, name: &str) -> Option<usize> {
        match ty {
            DimType::Param => self.params.iter().position(|p| p.name() == name),
            _ => {
                let tuple = self.tuple(ty)?;
                (0..tuple.len()).find(|&i| tuple.dim_id(i).is_some_and(|id| id.name() == name))
            }
        }
    }

    /// Returns the name of a dimension, if it has one.
    #[must_use]
    pub fn dim_name(&self, ty: DimType, pos: usize) -> Option<&str> {
        match ty {
            DimType::Param => self.params.get(pos).map(Id::name),
            _ => self.tuple(ty)?.dim_id(pos).map(Id::name),
        }
    }

    /// Returns the shape of the tuple of the given kind.
    ///
    /// Parameters, and tuples that do not exist, have shape
    /// [`ShapeKey::Params`].
    #[must_use]
    pub fn tuple_shape(&self, ty: DimType) -> ShapeKey {
        self.tuple(ty).map_or(ShapeKey::Params, Tuple::shape)
    }

    /// Returns the domain shape: the key used by union containers.
    ///
    /// All set spaces share the [`ShapeKey::Set`] domain shape.
    #[must_use]
    pub fn domain_shape(&self) -> ShapeKey {
        if self.is_set() {
            ShapeKey::Set
        } else {
            self.tuple_shape(DimType::In)
        }
    }

    /// Returns the range shape, the secondary key of union lookups and the
    /// key of sets in union sets.
    #[must_use]
    pub fn range_shape(&self) -> ShapeKey {
        self.tuple_shape(DimType::Out)
    }

    /// Returns true if tuple `t1` of `self` and tuple `t2` of `other` have
    /// the same identifier and dimension count.
    #[must_use]
    pub fn tuple_is_equal(&self, t1: DimType, other: &Self, t2: DimType) -> bool {
        if t1 == DimType::Param || t2 == DimType::Param {
            return t1 == t2 && self.has_equal_params(other);
        }
        match (self.tuple(t1), other.tuple(t2)) {
            (Some(a), Some(b)) => a.id == b.id && a.len() == b.len(),
            (None, None) => true,
            _ => false,
        }
    }

    /// Returns true if both spaces have the same parameters in the same
    /// order.
    #[must_use]
    pub fn has_equal_params(&self, other: &Self) -> bool {
        self.params == other.params
    }

    /// Returns true if both spaces have the same kind, parameters and tuple
    /// shapes.
    #[must_use]
    pub fn is_equal(&self, other: &Self) -> bool {
        self.has_equal_params(other)
            && self.domain.is_some() == other.domain.is_some()
            && self.range.is_some() == other.range.is_some()
            && self.tuple_is_equal(DimType::In, other, DimType::In)
            && self.tuple_is_equal(DimType::Out, other, DimType::Out)
    }

    /// Returns the parameter space of `self`.
    #[must_use]
    pub fn params_space(&self) -> Self {
        Self::params_alloc(self.params.clone())
    }

    /// Returns the domain of a map space as a set space.
    ///
    /// Set and parameter spaces are their own domain.
    #[must_use]
    pub fn domain(&self) -> Self {
        match &self.domain {
            Some(tuple) => Self::set(self.params.clone(), tuple.clone()),
            None => self.clone(),
        }
    }

    /// Returns the same space with the parameters replaced.
    #[must_use]
    pub fn with_params(&self, params: Vec<Id>) -> Self {
        Self {
            params,
            domain: self.domain.clone(),
            range: self.range.clone(),
        }
    }

    /// Aligns the parameters of `self` to those of `model`.
    ///
    /// The result has the parameters of `model` first, followed by those of
    /// `self` that do not appear in `model`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if either space repeats a parameter.
    pub fn align_params(&self, model: &Self) -> Result<Self> {
        if self.has_equal_params(model) {
            return Ok(self.clone());
        }
        let r = parameter_alignment(self, model)?;
        Ok(self.with_params(r.space().params().to_vec()))
    }

    fn check_range(&self, ty: DimType, first: usize, n: usize) -> Result<()> {
        if ty != DimType::Param && self.tuple(ty).is_none() {
            return Err(Error::invalid(format!("space has no {ty:?} tuple")));
        }
        match first.checked_add(n) {
            Some(end) if end <= self.dim(ty) => Ok(()),
            _ => Err(Error::invalid("position or range out of bounds")),
        }
    }

    /// Removes `n` dimensions of kind `ty` starting at `first`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if the range is out of bounds.
    pub fn drop_dims(&self, ty: DimType, first: usize, n: usize) -> Result<Self> {
        self.check_range(ty, first, n)?;
        let mut space = self.clone();
        match ty {
            DimType::Param => {
                space.params.drain(first..first + n);
            }
            DimType::In => {
                if let Some(t) = space.domain.as_mut() {
                    t.dims.drain(first..first + n);
                }
            }
            DimType::Out => {
                if let Some(t) = space.range.as_mut() {
                    t.dims.drain(first..first + n);
                }
            }
        }
        Ok(space)
    }

    /// Renames dimension `pos` of kind `ty`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `pos` is out of bounds, or if another
    /// parameter already has the name.
    pub fn set_dim_name(&self, ty: DimType, pos: usize, name: &str) -> Result<Self> {
        self.check_range(ty, pos, 1)?;
        let mut space = self.clone();
        let id = Id::new(name);
        match ty {
            DimType::Param => {
                if (0..self.params.len()).any(|i| i != pos && self.params[i] == id) {
                    return Err(Error::invalid(format!("duplicate parameter {id}")));
                }
                space.params[pos] = id;
            }
            DimType::In => {
                if let Some(t) = space.domain.as_mut() {
                    t.dims[pos] = Some(id);
                }
            }
            DimType::Out => {
                if let Some(t) = space.range.as_mut() {
                    t.dims[pos] = Some(id);
                }
            }
        }
        Ok(space)
    }

    /// Removes the user tags of all identifiers in the space.
    #[must_use]
    pub fn reset_user(&self) -> Self {
        Self {
            params: self.params.iter().map(Id::reset_user).collect(),
            domain: self.domain.as_ref().map(Tuple::reset_user),
            range: self.range.as_ref().map(Tuple::reset_user),
        }
    }
}

fn fmt_tuple(f: &mut fmt::Formatter<'_>, tuple: &Tuple) -> fmt::Result {
    if let Some(id) = &tuple.id {
        write!(f, "{id}")?;
    }
    f.write_str("[")?;
    for (i, dim) in tuple.dims.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        match dim {
            Some(id) => write!(f, "{id}")?,
            None => write!(f, "i{i}")?,
        }
    }
    f.write_str("]")
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{p}")?;
        }
        f.write_str("] -> { ")?;
        if let Some(domain) = &self.domain {
            fmt_tuple(f, domain)?;
            f.write_str(" -> ")?;
        }
        if let Some(range) = &self.range {
            fmt_tuple(f, range)?;
            f.write_str(" ")?;
        }
        f.write_str("}")
    }
}

impl fmt::Debug for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Space({self})")
    }
}
