//! Domain operations: extraction, restriction and simplification.

use crate::part::Part;
use crate::union::Union;
use isle_set::{Set, UnionSet};
use isle_space::{DimType, Result, Space};

impl<P: Part> Union<P> {
    /// Returns a copy of the part living in `space`, or the zero element
    /// over `space` if there is none.
    ///
    /// If the parameters of `space` differ from those of the union, they
    /// are replaced by the union's parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`](isle_space::Error::Invalid) if `space`
    /// repeats a parameter.
    pub fn extract_part(&self, space: &Space) -> Result<P> {
        let space = if space.has_equal_params(self.space()) {
            space.clone()
        } else {
            space
                .drop_dims(DimType::Param, 0, space.n_param())?
                .align_params(self.space())?
        };
        Ok(match self.find_part(&space) {
            Some(part) => part.clone(),
            None => P::zero(space, self.tag()),
        })
    }

    /// Applies `op` with the same set to every part.
    fn any_set_op<F>(self, set: &Set, op: F) -> Result<Self>
    where
        F: Fn(P, &Set) -> Result<P>,
    {
        let u = self.align_params(set.space())?;
        let set = set.align_params(u.space())?;
        let space = u.space().clone();
        u.rebuild(&space, |part| op(part, &set).map(Some))
    }

    /// Restricts every part to the parameter values in `set`.
    ///
    /// # Errors
    ///
    /// Returns an error if `set` is not a parameter set.
    pub fn intersect_params(self, set: &Set) -> Result<Self> {
        self.any_set_op(set, Part::intersect_params)
    }

    /// Simplifies every part assuming the parameter values in `set`.
    ///
    /// # Errors
    ///
    /// Returns an error if `set` is not a parameter set.
    pub fn gist_params(self, set: &Set) -> Result<Self> {
        self.any_set_op(set, Part::gist_params)
    }

    /// Applies `op` to every part and the set of `uset` living in its
    /// domain. Parts without such a set are dropped.
    fn match_domain_op<F>(self, uset: &UnionSet, op: F) -> Result<Self>
    where
        F: Fn(P, &Set) -> Result<P>,
    {
        let u = self.align_params(uset.space())?;
        let uset = uset.clone().align_params(u.space())?;
        let space = u.space().clone();
        u.rebuild(&space, |part| match uset.find_set(&part.space().domain()) {
            Some(set) => op(part, set).map(Some),
            None => Ok(None),
        })
    }

    /// Restricts every part to the set of `uset` in its domain.
    ///
    /// Parts whose domain has no set in `uset` are dropped. A union set
    /// holding a single parameter set restricts the parameters instead.
    ///
    /// # Errors
    ///
    /// Returns an error if parameters cannot be aligned.
    pub fn intersect_domain(self, uset: &UnionSet) -> Result<Self> {
        if uset.is_params() {
            return self.intersect_params(&uset.clone().into_set()?);
        }
        self.match_domain_op(uset, Part::intersect_domain)
    }

    /// Simplifies every part assuming the set of `uset` in its domain.
    ///
    /// Parts whose domain has no set in `uset` are dropped. A union set
    /// holding a single parameter set simplifies on the parameters instead.
    ///
    /// # Errors
    ///
    /// Returns an error if parameters cannot be aligned.
    pub fn gist(self, uset: &UnionSet) -> Result<Self> {
        if uset.is_params() {
            return self.gist_params(&uset.clone().into_set()?);
        }
        self.match_domain_op(uset, Part::gist)
    }

    /// Removes from every part the set of `uset` in its domain. Parts
    /// without such a set are kept as they are.
    ///
    /// # Errors
    ///
    /// Returns an error if parameters cannot be aligned.
    pub fn subtract_domain(self, uset: &UnionSet) -> Result<Self> {
        let u = self.align_params(uset.space())?;
        let uset = uset.clone().align_params(u.space())?;
        let space = u.space().clone();
        u.rebuild(&space, |part| {
            let set = uset.extract_set(&part.space().domain())?;
            part.subtract_domain(&set).map(Some)
        })
    }

    /// Returns the union of the domains of all parts.
    ///
    /// # Errors
    ///
    /// Returns an error if a part cannot compute its domain, or if a domain
    /// does not live in a set space.
    pub fn domain(&self) -> Result<UnionSet> {
        self.parts()
            .try_fold(UnionSet::empty(self.space()), |uset, part| {
                uset.add_set(part.domain()?)
            })
    }

    /// Simplifies the representation of every part.
    ///
    /// # Errors
    ///
    /// Returns the first error of a part; the union is then discarded.
    pub fn coalesce(self) -> Result<Self> {
        self.map_parts(Part::coalesce)
    }
}
