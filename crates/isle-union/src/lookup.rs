//! Keyed lookup and insertion of parts.

use crate::part::Part;
use crate::union::Union;
use isle_space::{DimType, Error, Result, Space};
use tracing::{debug, trace};

/// Returns an error if `stored` and `space` have different range tuples.
fn check_same_range<P: Part>(stored: &P, space: &Space) -> Result<()> {
    if stored.space().tuple_is_equal(DimType::Out, space, DimType::Out) {
        Ok(())
    } else {
        debug!("rejecting part over {} next to {}", space, stored.space());
        Err(Error::invalid(
            "union expression can only contain a single expression over a given domain",
        ))
    }
}

impl<P: Part> Union<P> {
    /// Returns the part living in `space`, if any.
    ///
    /// Parts are looked up by domain shape; a stored part over the same
    /// domain but with a different range is not returned. Parameters are
    /// ignored.
    #[must_use]
    pub fn find_part(&self, space: &Space) -> Option<&P> {
        self.inner
            .table
            .get(&space.domain_shape())
            .filter(|part| part.space().tuple_is_equal(DimType::Out, space, DimType::Out))
    }

    /// Returns the part whose domain has the same shape as that of `space`,
    /// whatever its range.
    pub(crate) fn find_by_domain(&self, space: &Space) -> Option<&P> {
        self.inner.table.get(&space.domain_shape())
    }

    /// Adds `part`, which must live on a domain that has no part yet.
    ///
    /// The zero element is not stored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if the union already holds a part over
    /// the same domain.
    pub fn add_part(self, part: P) -> Result<Self> {
        self.add_part_generic(part, true)
    }

    /// Adds `part`, summing it with the part over the same domain unless
    /// `disjoint` is set, in which case such a part is an error.
    pub(crate) fn add_part_generic(self, part: P, disjoint: bool) -> Result<Self> {
        if part.is_zero() {
            return Ok(self);
        }

        let mut u = self.align_params(part.space())?;
        let part = part.align_params(u.space())?;

        let inner = u.cow()?;
        let key = part.space().domain_shape();
        let Some(stored) = inner.table.remove(&key) else {
            inner.table.insert(key, part);
            return Ok(u);
        };

        check_same_range(&stored, part.space())?;
        if disjoint {
            debug!("rejecting second part over {}", part.space());
            return Err(Error::invalid("additional part should live on separate space"));
        }

        let sum = stored.union_add(part)?;
        if sum.is_zero() {
            trace!("dropping part that summed to zero");
        } else {
            inner.table.insert(key, sum);
        }
        Ok(u)
    }
}
