use derive_new::new;

/// Axis-offset token: shifts a view's base by `magnitude` steps along one axis.
///
/// The axis `A` is counted from the innermost axis: `Dim::<0>` moves along the
/// last (fastest) axis of a view whatever its rank, `Dim::<{ R - 1 }>` along the
/// first. To address the `i`-th declared axis of a rank-`R` view use
/// `Dim::<{ R - 1 - i }>`, or [`View::shift`](crate::View::shift).
///
/// ```
/// use strider::{strides, Dim, ViewRef};
///
/// let v: Vec<i32> = (0..1000).collect();
/// let r = ViewRef::from_slice(&v, strides![100, 10, 1]);
/// let r2 = r + Dim::<2>(1) - Dim::<0>(2);
/// assert_eq!(unsafe { *r2.at(0).at(0).get(2) }, 100);
/// ```
#[derive(new, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dim<const A: usize>(pub isize);

impl<const A: usize> Dim<A> {
    pub const AXIS: usize = A;

    pub fn magnitude(&self) -> isize {
        self.0
    }
}

impl<const A: usize> std::ops::Neg for Dim<A> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Dim(-self.0)
    }
}

/// Rejects, at monomorphization time, a token axis that a rank-`R` view does
/// not have.
pub(crate) struct AxisInRange<const A: usize, const R: usize>;

impl<const A: usize, const R: usize> AxisInRange<A, R> {
    pub(crate) const OK: () = assert!(A < R, "axis-offset token is outside the view's rank");
}
