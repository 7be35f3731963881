//! Parameter alignment of unions.

use crate::part::Part;
use crate::union::Union;
use isle_space::{parameter_alignment, Reordering, Result, Space};
use tracing::debug;

impl<P: Part> Union<P> {
    /// Aligns the parameters with those of `model`.
    ///
    /// The result has the parameters of `model` first, followed by the
    /// parameters of `self` that `model` lacks. A union that already has
    /// the parameters of `model`, in the same order, is returned as is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`](isle_space::Error::Invalid) if either
    /// space repeats a parameter.
    pub fn align_params(self, model: &Space) -> Result<Self> {
        if self.space().has_equal_params(model) {
            return Ok(self);
        }
        let r = parameter_alignment(self.space(), &model.params_space())?;
        debug!("aligning union over {} to {}", self.space(), r.space());
        self.realign_domain(&r)
    }

    /// Rebuilds the union with its parameters moved according to `r`.
    fn realign_domain(self, r: &Reordering) -> Result<Self> {
        self.rebuild(r.space(), |part| {
            let exp = r.extend_space(&part.space().domain())?;
            part.realign_domain(&exp).map(Some)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{map_space, ZeroMock};
    use isle_space::Id;

    #[test]
    fn test_align_to_same_params_is_noop() {
        let u = Union::from_part(ZeroMock::constant(&["N", "M"], "S", 1)).unwrap();
        let model = Space::named_params(&["N", "M"]);
        let v = u.clone().align_params(&model).unwrap();
        assert!(u.ptr_eq(&v));
    }

    #[test]
    fn test_align_moves_coefficients() {
        let space = map_space(&["N", "M"], "S", "R");
        let part = ZeroMock::linear_in(space, (), vec![2, 3], 1);
        let u = Union::from_part(part).unwrap();

        let model = Space::named_params(&["M", "K"]);
        let v = u.align_params(&model).unwrap();
        assert_eq!(
            v.space().params(),
            &[Id::new("M"), Id::new("K"), Id::new("N")]
        );
        let part = v.parts().next().unwrap();
        assert!(part.space().has_equal_params(v.space()));
        assert_eq!(part.param_coeff("N"), 2);
        assert_eq!(part.param_coeff("M"), 3);
        assert_eq!(part.param_coeff("K"), 0);
    }

    #[test]
    fn test_align_rejects_duplicate_params() {
        let u = Union::from_part(ZeroMock::constant(&["N"], "S", 1)).unwrap();
        let model = Space::named_params(&["M", "M"]);
        assert!(u.align_params(&model).unwrap_err().is_invalid());
    }
}
