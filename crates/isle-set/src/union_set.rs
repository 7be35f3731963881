//! Sets living in different spaces, sharing one parameter space.

use crate::set::Set;
use isle_space::{Error, Id, Result, ShapeKey, Space};
use rustc_hash::FxHashMap;
use std::fmt;

/// A union of sets in pairwise different spaces.
///
/// All member sets have the parameters of the union set's own parameter
/// space. Sets are keyed by the shape of their tuple, so there is at most
/// one set per tuple identifier and dimension count.
#[derive(Clone)]
pub struct UnionSet {
    space: Space,
    sets: FxHashMap<ShapeKey, Set>,
}

impl UnionSet {
    /// The empty union set over the parameters of `space`.
    #[must_use]
    pub fn empty(space: &Space) -> Self {
        Self {
            space: space.params_space(),
            sets: FxHashMap::default(),
        }
    }

    /// Creates the union set holding only `set`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if the set's space repeats a parameter.
    pub fn from_set(set: Set) -> Result<Self> {
        Self::empty(set.space()).add_set(set)
    }

    /// Adds a set, uniting it with the set already present in the same
    /// space, if any. Plainly empty sets are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `set` is a map, or if a space repeats
    /// a parameter.
    pub fn add_set(mut self, set: Set) -> Result<Self> {
        if set.space().is_map() {
            return Err(Error::invalid("expecting set or parameter space"));
        }
        if set.plain_is_empty() {
            return Ok(self);
        }
        let set = set.align_params(&self.space)?;
        if !set.space().has_equal_params(&self.space) {
            self = self.align_params(set.space())?;
        }
        let key = set.space().range_shape();
        let merged = match self.sets.remove(&key) {
            Some(prev) => prev.union(&set)?,
            None => set,
        };
        self.sets.insert(key, merged);
        Ok(self)
    }

    /// Returns the parameter space.
    #[must_use]
    pub fn space(&self) -> &Space {
        &self.space
    }

    /// Returns the parameters.
    #[must_use]
    pub fn params(&self) -> &[Id] {
        self.space.params()
    }

    /// Returns the number of member sets.
    #[must_use]
    pub fn n_set(&self) -> usize {
        self.sets.len()
    }

    /// Returns true if there are no member sets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Iterates over the member sets in unspecified order.
    pub fn sets(&self) -> impl Iterator<Item = &Set> {
        self.sets.values()
    }

    /// Returns true if the union set holds exactly one set and that set
    /// lives in a parameter space.
    #[must_use]
    pub fn is_params(&self) -> bool {
        self.sets.len() == 1 && self.sets.contains_key(&ShapeKey::Params)
    }

    /// Returns the only member set of a parameter union set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] unless [`UnionSet::is_params`] holds.
    pub fn into_set(mut self) -> Result<Set> {
        if !self.is_params() {
            return Err(Error::invalid("expecting parameter union set"));
        }
        self.sets
            .remove(&ShapeKey::Params)
            .ok_or_else(|| Error::internal("parameter set disappeared"))
    }

    /// Returns the member set whose space is equal to `space`, if any.
    ///
    /// Parameters are compared as well, so the caller is expected to have
    /// aligned `space` with the union set.
    #[must_use]
    pub fn find_set(&self, space: &Space) -> Option<&Set> {
        self.sets
            .get(&space.range_shape())
            .filter(|set| set.space().is_equal(space))
    }

    /// Returns the member set in `space`, or the empty set in that space.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `space` repeats a parameter.
    pub fn extract_set(&self, space: &Space) -> Result<Set> {
        let space = space.align_params(&self.space)?;
        Ok(self
            .find_set(&space)
            .cloned()
            .unwrap_or_else(|| Set::empty(space)))
    }

    /// Aligns the parameters with those of `model`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if either space repeats a parameter.
    pub fn align_params(self, model: &Space) -> Result<Self> {
        if self.space.has_equal_params(model) {
            return Ok(self);
        }
        let space = self.space.align_params(model)?;
        let sets: FxHashMap<ShapeKey, Set> = self
            .sets
            .into_iter()
            .map(|(key, set)| Ok((key, set.align_params(&space)?)))
            .collect::<Result<_>>()?;
        Ok(Self { space, sets })
    }

    /// Returns true if both union sets have the same members.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if a space repeats a parameter.
    pub fn plain_is_equal(&self, other: &Self) -> Result<bool> {
        if self.sets.len() != other.sets.len() {
            return Ok(false);
        }
        let other = other.clone().align_params(&self.space)?;
        let this = self.clone().align_params(&other.space)?;
        Ok(this.sets.iter().all(|(key, set)| {
            other
                .sets
                .get(key)
                .is_some_and(|o| set.plain_is_equal(o))
        }))
    }
}

impl fmt::Debug for UnionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sets: Vec<String> = self.sets.values().map(ToString::to_string).collect();
        sets.sort();
        f.debug_struct("UnionSet")
            .field("space", &self.space)
            .field("sets", &sets)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Constraint;
    use isle_space::Tuple;

    fn set(params: &[&str], name: &str, lo: i64) -> Set {
        let n = params.len();
        let mut coeffs = vec![0; n + 1];
        coeffs[n] = 1;
        Set::from_constraints(
            Space::set(params.iter().map(|p| Id::new(p)).collect(), Tuple::named(name, 1)),
            vec![Constraint::ineq_i64(&coeffs, -lo)],
        )
        .unwrap()
    }

    #[test]
    fn test_add_set_keys_by_tuple() {
        let u = UnionSet::from_set(set(&["N"], "A", 0))
            .unwrap()
            .add_set(set(&["N"], "B", 0))
            .unwrap();
        assert_eq!(u.n_set(), 2);

        let u = u.add_set(set(&["N"], "A", 5)).unwrap();
        assert_eq!(u.n_set(), 2);
        let a_space = set(&["N"], "A", 0).space().clone();
        assert_eq!(u.find_set(&a_space).unwrap().n_basic(), 2);
    }

    #[test]
    fn test_add_set_aligns_params() {
        let u = UnionSet::from_set(set(&["N"], "A", 0))
            .unwrap()
            .add_set(set(&["M"], "B", 0))
            .unwrap();
        assert_eq!(u.params(), &[Id::new("N"), Id::new("M")]);
        assert!(u.sets().all(|s| s.space().has_equal_params(u.space())));
    }

    #[test]
    fn test_empty_sets_skipped() {
        let empty = Set::empty(Space::set(vec![], Tuple::named("A", 1)));
        let u = UnionSet::from_set(empty).unwrap();
        assert!(u.is_empty());
    }

    #[test]
    fn test_is_params() {
        let p = Set::universe(Space::named_params(&["N"]));
        let u = UnionSet::from_set(p).unwrap();
        assert!(u.is_params());
        assert!(u.into_set().unwrap().is_params());

        let u = UnionSet::from_set(set(&["N"], "A", 0)).unwrap();
        assert!(!u.is_params());
        assert!(u.into_set().is_err());
    }

    #[test]
    fn test_extract_set() {
        let u = UnionSet::from_set(set(&["N"], "A", 0)).unwrap();
        let missing = Space::set(vec![], Tuple::named("B", 1));
        let extracted = u.extract_set(&missing).unwrap();
        assert!(extracted.plain_is_empty());
        assert_eq!(extracted.space().n_param(), 1);
    }

    #[test]
    fn test_plain_is_equal_ignores_param_order() {
        let a = UnionSet::from_set(set(&["N", "M"], "A", 0)).unwrap();
        let b = UnionSet::from_set(
            Set::from_constraints(
                Space::set(vec![Id::new("M"), Id::new("N")], Tuple::named("A", 1)),
                vec![Constraint::ineq_i64(&[0, 0, 1], 0)],
            )
            .unwrap(),
        )
        .unwrap();
        assert!(a.plain_is_equal(&b).unwrap());
        let c = UnionSet::from_set(set(&["N", "M"], "A", 1)).unwrap();
        assert!(!a.plain_is_equal(&c).unwrap());
    }
}
