//! Sums and differences of unions.

use crate::part::{Part, SubPart};
use crate::union::Union;
use isle_space::{DimType, Error, Result};

impl<P: Part> Union<P> {
    /// Sums both unions on the union of their domains: parts over a shared
    /// domain are summed, the others are kept as they are.
    ///
    /// # Errors
    ///
    /// Returns an error if parameters cannot be aligned, or if both unions
    /// hold parts over the same domain with different ranges.
    pub fn union_add(self, other: Self) -> Result<Self> {
        let mut u1 = self.align_params(other.space())?;
        let u2 = other.align_params(u1.space())?;

        u1.cow()?;
        for part in u2.into_parts() {
            u1 = u1.add_part_generic(part, false)?;
        }
        Ok(u1)
    }

    /// Sums both unions.
    ///
    /// Families where a missing domain means zero sum over the union of the
    /// domains. The others only sum over the domains present in both.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if parts over the same domain have
    /// different ranges.
    pub fn add(self, other: Self) -> Result<Self> {
        if P::DEFAULT_IS_ZERO {
            self.union_add(other)
        } else {
            self.match_bin_op(other, Part::add)
        }
    }

    /// Applies `op` to every pair of parts over the same domain, dropping
    /// parts that have no partner.
    pub(crate) fn match_bin_op<F>(self, other: Self, op: F) -> Result<Self>
    where
        F: Fn(P, P) -> Result<P>,
    {
        let u1 = self.align_params(other.space())?;
        let u2 = other.align_params(u1.space())?;

        let space = u1.space().clone();
        u1.rebuild(&space, |part| {
            let Some(part2) = u2.find_by_domain(part.space()) else {
                return Ok(None);
            };
            if !part.space().tuple_is_equal(DimType::Out, part2.space(), DimType::Out) {
                return Err(Error::invalid("entries should have the same range space"));
            }
            op(part, part2.clone()).map(Some)
        })
    }
}

impl<P: SubPart> Union<P> {
    /// Subtracts `other` on the domains present in both unions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if parts over the same domain have
    /// different ranges.
    pub fn sub(self, other: Self) -> Result<Self> {
        self.match_bin_op(other, SubPart::sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{map_space, AffMock, ZeroMock};

    fn union<P: Part>(parts: Vec<P>) -> Union<P> {
        let mut parts = parts.into_iter();
        let first = parts.next().unwrap();
        parts.fold(Union::from_part(first).unwrap(), |u, p| u.add_part(p).unwrap())
    }

    #[test]
    fn test_zero_default_add_keeps_all_domains() {
        let a = union(vec![
            ZeroMock::constant(&["N"], "S", 1),
            ZeroMock::constant(&["N"], "T", 2),
        ]);
        let b = union(vec![
            ZeroMock::constant(&["N"], "T", 5),
            ZeroMock::constant(&["N"], "U", 7),
        ]);
        let c = a.add(b).unwrap();
        assert_eq!(c.n_part(), 3);
        let t = c.find_part(ZeroMock::constant(&["N"], "T", 0).space()).unwrap();
        assert_eq!(t.value(), 7);
    }

    #[test]
    fn test_non_zero_default_add_intersects() {
        let a = union(vec![
            AffMock::constant(&["N"], "S", 1),
            AffMock::constant(&["N"], "T", 2),
        ]);
        let b = union(vec![AffMock::constant(&["N"], "T", 5)]);
        let c = a.clone().add(b.clone()).unwrap();
        assert_eq!(c.n_part(), 1);
        assert_eq!(c.parts().next().unwrap().value(), 7);

        // union_add is available to every family
        let d = a.union_add(b).unwrap();
        assert_eq!(d.n_part(), 2);
    }

    #[test]
    fn test_sub() {
        let a = union(vec![
            ZeroMock::constant(&["N"], "S", 1),
            ZeroMock::constant(&["N"], "T", 9),
        ]);
        let b = union(vec![ZeroMock::constant(&["N"], "T", 4)]);
        let c = a.sub(b).unwrap();
        assert_eq!(c.n_part(), 1);
        assert_eq!(c.parts().next().unwrap().value(), 5);
    }

    #[test]
    fn test_sub_to_zero_drops_entry() {
        let a = union(vec![ZeroMock::constant(&["N"], "S", 3)]);
        let c = a.clone().sub(a).unwrap();
        assert!(c.is_empty());
    }

    #[test]
    fn test_range_mismatch_in_matching_op() {
        let a = union(vec![ZeroMock::constant_in(map_space(&["N"], "S", "R"), 1)]);
        let b = union(vec![ZeroMock::constant_in(map_space(&["N"], "S", "Q"), 1)]);
        let err = a.sub(b).unwrap_err();
        assert_eq!(err, Error::invalid("entries should have the same range space"));
    }

    #[test]
    fn test_add_aligns_parameters() {
        let a = union(vec![ZeroMock::constant(&["N"], "S", 1)]);
        let b = union(vec![ZeroMock::constant(&["M"], "S", 2)]);
        let c = a.add(b).unwrap();
        assert_eq!(c.space().n_param(), 2);
        assert_eq!(c.n_part(), 1);
        assert_eq!(c.parts().next().unwrap().value(), 3);
    }

    #[test]
    fn test_add_leaves_operands_untouched() {
        let a = union(vec![ZeroMock::constant(&["N"], "S", 1)]);
        let b = union(vec![ZeroMock::constant(&["N"], "S", 2)]);
        let c = a.clone().add(b.clone()).unwrap();
        assert_eq!(a.parts().next().unwrap().value(), 1);
        assert_eq!(b.parts().next().unwrap().value(), 2);
        assert_eq!(c.parts().next().unwrap().value(), 3);
    }
}
