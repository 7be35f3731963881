//! Storage and lifecycle of a union.

use crate::part::Part;
use isle_space::{DimType, Error, Result, ShapeKey, Space};
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::fmt;
use std::mem;
use std::sync::Arc;
use tracing::trace;

/// Number of slots reserved by a new, empty union.
pub(crate) const INITIAL_CAPACITY: usize = 16;

pub(crate) struct Inner<P: Part> {
    /// Parameters only.
    pub(crate) space: Space,
    pub(crate) tag: P::Tag,
    /// Parts keyed by the shape of their domain tuple.
    pub(crate) table: FxHashMap<ShapeKey, P>,
}

/// A union of parts over differently shaped domains sharing one parameter
/// space.
///
/// Invariants:
/// - every part has exactly the parameters of the union
/// - at most one part per domain shape
/// - no stored part is the zero element
///
/// Cloning is O(1) and aliases the table. Every operation that changes the
/// table first makes it exclusive, duplicating it if it is shared.
pub struct Union<P: Part> {
    pub(crate) inner: Arc<Inner<P>>,
}

impl<P: Part> Clone for Union<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: Part> Union<P> {
    pub(crate) fn alloc(space: &Space, tag: P::Tag, capacity: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                space: space.params_space(),
                tag,
                table: FxHashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
            }),
        }
    }

    /// The empty union over the parameters of `space`.
    #[must_use]
    pub fn zero(space: &Space, tag: P::Tag) -> Self {
        Self::alloc(space, tag, INITIAL_CAPACITY)
    }

    /// Creates the union holding only `part`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if the part's space repeats a parameter.
    pub fn from_part(part: P) -> Result<Self> {
        Self::zero(part.space(), part.tag()).add_part(part)
    }

    /// Returns the parameter space.
    #[must_use]
    pub fn space(&self) -> &Space {
        &self.inner.space
    }

    /// Returns the direction tag.
    #[must_use]
    pub fn tag(&self) -> P::Tag {
        self.inner.tag
    }

    /// Returns the number of parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] unless `ty` is [`DimType::Param`].
    pub fn dim(&self, ty: DimType) -> Result<usize> {
        if ty != DimType::Param {
            return Err(Error::invalid("can only reference parameters"));
        }
        Ok(self.inner.space.dim(ty))
    }

    /// Returns the position of the parameter named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] unless `ty` is [`DimType::Param`].
    pub fn find_dim_by_name(&self, ty: DimType, name: &str) -> Result<Option<usize>> {
        if ty != DimType::Param {
            return Err(Error::invalid("can only reference parameters"));
        }
        Ok(self.inner.space.find_dim_by_name(ty, name))
    }

    /// Returns the number of stored parts.
    #[must_use]
    pub fn n_part(&self) -> usize {
        self.inner.table.len()
    }

    /// Returns true if no part is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.table.is_empty()
    }

    /// Iterates over the stored parts in unspecified order.
    pub fn parts(&self) -> impl Iterator<Item = &P> {
        self.inner.table.values()
    }

    /// Calls `f` on a copy of every stored part, stopping at the first
    /// error.
    ///
    /// # Errors
    ///
    /// Returns the first error returned by `f`.
    pub fn foreach_part<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(P) -> Result<()>,
    {
        self.parts().try_for_each(|part| f(part.clone()))
    }

    /// Returns true if both unions share the same table.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns true if the table is shared with another clone.
    #[must_use]
    pub fn is_shared(&self) -> bool {
        Arc::strong_count(&self.inner) > 1
    }

    /// Makes the table exclusive, duplicating it if it is shared.
    pub(crate) fn cow(&mut self) -> Result<&mut Inner<P>> {
        if self.is_shared() {
            trace!(n_part = self.n_part(), "duplicating shared union");
            *self = self.dup()?;
        }
        Arc::get_mut(&mut self.inner)
            .ok_or_else(|| Error::internal("union still shared after copy-on-write"))
    }

    /// Builds an independent copy by reinserting every part.
    ///
    /// The insertions are disjoint: a well-formed union never holds two
    /// parts over the same domain shape.
    fn dup(&self) -> Result<Self> {
        let mut dup = Self::alloc(&self.inner.space, self.inner.tag, self.n_part());
        for part in self.parts() {
            dup = dup.add_part(part.clone())?;
        }
        Ok(dup)
    }

    /// Takes the parts out, cloning them only if the table is shared.
    pub(crate) fn into_parts(self) -> Vec<P> {
        match Arc::try_unwrap(self.inner) {
            Ok(inner) => inner.table.into_values().collect(),
            Err(shared) => shared.table.values().cloned().collect(),
        }
    }

    /// Builds a union over `space` from the results of `f` on every part.
    ///
    /// Parts for which `f` returns `None`, or the zero element, are left
    /// out. The first error discards the partial result.
    pub(crate) fn rebuild<F>(self, space: &Space, mut f: F) -> Result<Self>
    where
        F: FnMut(P) -> Result<Option<P>>,
    {
        let mut res = Self::alloc(space, self.tag(), self.n_part());
        for part in self.into_parts() {
            if let Some(part) = f(part)? {
                res = res.add_part(part)?;
            }
        }
        Ok(res)
    }

    /// Replaces every part by the result of `f`, keeping the keys.
    pub(crate) fn map_parts<F>(mut self, mut f: F) -> Result<Self>
    where
        F: FnMut(P) -> Result<P>,
    {
        let inner = self.cow()?;
        let table = mem::take(&mut inner.table);
        inner.table = table
            .into_iter()
            .map(|(key, part)| Ok((key, f(part)?)))
            .collect::<Result<_>>()?;
        Ok(self)
    }
}

impl<P: Part> fmt::Debug for Union<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.parts().map(|p| format!("{p:?}")).collect();
        parts.sort();
        f.debug_struct("Union")
            .field("space", &self.inner.space)
            .field("tag", &self.inner.tag)
            .field("parts", &parts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{domain_space, ZeroMock};

    #[test]
    fn test_zero_is_params_only() {
        let space = domain_space(&["N"], "S", 2);
        let u = Union::<ZeroMock>::zero(&space, ());
        assert!(u.space().is_params());
        assert_eq!(u.dim(DimType::Param).unwrap(), 1);
        assert!(u.dim(DimType::In).unwrap_err().is_invalid());
        assert_eq!(u.find_dim_by_name(DimType::Param, "N").unwrap(), Some(0));
        assert_eq!(u.find_dim_by_name(DimType::Param, "M").unwrap(), None);
        assert_eq!(
            u.find_dim_by_name(DimType::Out, "N").unwrap_err(),
            Error::invalid("can only reference parameters")
        );
        assert!(u.is_empty());
    }

    #[test]
    fn test_clone_aliases() {
        let u = Union::from_part(ZeroMock::constant(&["N"], "S", 3)).unwrap();
        let v = u.clone();
        assert!(u.ptr_eq(&v));
        assert!(u.is_shared());
        drop(v);
        assert!(!u.is_shared());
    }

    #[test]
    fn test_cow_duplicates_shared() {
        let u = Union::from_part(ZeroMock::constant(&["N"], "S", 3)).unwrap();
        let mut v = u.clone();
        v.cow().unwrap();
        assert!(!u.ptr_eq(&v));
        assert_eq!(v.n_part(), 1);
        assert_eq!(u.n_part(), 1);

        // exclusive unions are not copied
        let before = Arc::as_ptr(&v.inner);
        v.cow().unwrap();
        assert_eq!(before, Arc::as_ptr(&v.inner));
    }

    #[test]
    fn test_foreach_part_aborts() {
        let u = Union::from_part(ZeroMock::constant(&["N"], "S", 3))
            .unwrap()
            .add_part(ZeroMock::constant(&["N"], "T", 4))
            .unwrap();

        let mut seen = 0;
        u.foreach_part(|_| {
            seen += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, 2);

        let mut calls = 0;
        let err = u
            .foreach_part(|_| {
                calls += 1;
                Err(Error::invalid("stop"))
            })
            .unwrap_err();
        assert!(err.is_invalid());
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_debug_is_ordered() {
        let a = Union::from_part(ZeroMock::constant(&["N"], "S", 3))
            .unwrap()
            .add_part(ZeroMock::constant(&["N"], "T", 4))
            .unwrap();
        let b = Union::from_part(ZeroMock::constant(&["N"], "T", 4))
            .unwrap()
            .add_part(ZeroMock::constant(&["N"], "S", 3))
            .unwrap();
        assert_eq!(format!("{a:?}"), format!("{b:?}"));
    }
}
