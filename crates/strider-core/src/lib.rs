//! Non-owning strided views over flat buffers.
//!
//! A [`View`] is a base address and one stride per axis. It addresses an
//! externally owned buffer as an `R`-dimensional array without copying,
//! allocating or bounds checking:
//!
//! ```
//! use strider::prelude::*;
//!
//! let mut v: Vec<i32> = (0..1000).collect();
//! let r = ViewMut::from_slice_mut(&mut v, strides![100, 10, 1]);
//!
//! // Axis tokens count from the innermost axis.
//! let r2 = r + Dim::<2>(1) + Dim::<1>(-4) - Dim::<0>(2);
//! assert_eq!(unsafe { *r2.at(2).at(5).get(7) }, 3 * 100 + 10 + 5);
//!
//! unsafe { *r2.at(4).at(5).get_mut(6) = -1 };
//! assert_eq!(unsafe { *r.at(5).at(1).get(4) }, -1);
//! ```
//!
//! Structural misuse is rejected at compile time. A stride vector must match
//! the view's rank:
//!
//! ```compile_fail
//! use strider::prelude::*;
//! let v = vec![0i32; 8];
//! let r: ViewRef<'_, i32, 3> = ViewRef::from_slice(&v, strides![2, 1]);
//! ```
//!
//! a transpose must name every axis:
//!
//! ```compile_fail
//! use strider::prelude::*;
//! let v = vec![0i32; 8];
//! let r = ViewRef::from_slice(&v, strides![4, 2, 1]);
//! let t = r.transpose([0, 1]);
//! ```
//!
//! an axis token must select an axis the view has:
//!
//! ```compile_fail
//! use strider::prelude::*;
//! let v = vec![0i32; 8];
//! let r = ViewRef::from_slice(&v, strides![2, 1]);
//! let s = r + Dim::<2>(1);
//! ```
//!
//! and a read-only view never hands out a mutable element, however it was
//! derived:
//!
//! ```compile_fail
//! use strider::prelude::*;
//! let v = vec![0i32; 8];
//! let r = ViewRef::from_slice(&v, strides![4, 2, 1]);
//! let mut row = r.transpose([1, 0, 2]).at(1).at(0);
//! unsafe { *row.get_mut(0) = 1 };
//! ```
mod access;
mod bounds;
mod dim;
mod enforcer;
mod strides;
mod view;

pub use access::*;
pub use dim::Dim;
pub use enforcer::*;
pub use strides::*;
pub use view::*;

/// Builds a [`Strides`] from element counts, outermost axis first.
///
/// Each value is converted with `as isize`, so any integer type is accepted.
#[macro_export]
macro_rules! strides {
    ($($x:expr),+ $(,)?) => ({
        $crate::Strides::new([$($x as isize,)+])
    });
}

pub mod prelude {
    pub use crate::{strides, Dim, Strides, View, ViewMut, ViewRef};
}
