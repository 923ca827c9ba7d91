use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::bounds::{Bounds, CHECKED};
use crate::dim::AxisInRange;
use crate::{Access, Dim, Enforcer, InvariantError, ReadOnly, ReadWrite, Strides};

/// Non-owning strided view of rank `R` over an externally owned buffer.
///
/// A view is a base address plus one stride per axis. Indexing with [`View::at`]
/// peels off the outermost axis; at rank 1, [`View::get`] and [`View::get_mut`]
/// return the element itself. Offsets ([`Dim`]), [`View::transpose`] and
/// [`View::permute`] derive new views by value and never touch the buffer.
///
/// Addresses are computed with wrapping arithmetic, so a view whose base lies
/// outside the buffer is fine to hold and to derive from. Only dereferencing an
/// element is `unsafe`: the caller guarantees the address is inside the buffer
/// and that the buffer is still alive.
pub struct View<'a, T, A: Access, const R: usize> {
    base: *mut T,
    strides: Strides<R>,
    bounds: Bounds,
    _marker: PhantomData<(&'a mut T, A)>,
}

pub type ViewRef<'a, T, const R: usize> = View<'a, T, ReadOnly, R>;
pub type ViewMut<'a, T, const R: usize> = View<'a, T, ReadWrite, R>;

unsafe impl<T: Sync, const R: usize> Send for View<'_, T, ReadOnly, R> {}
unsafe impl<T: Sync, const R: usize> Sync for View<'_, T, ReadOnly, R> {}
unsafe impl<T: Send, const R: usize> Send for View<'_, T, ReadWrite, R> {}

impl<T, A: Access, const R: usize> Clone for View<'_, T, A, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A: Access, const R: usize> Copy for View<'_, T, A, R> {}

impl<T, A: Access, const R: usize> std::fmt::Debug for View<'_, T, A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("base", &self.base)
            .field("strides", &self.strides)
            .field("writable", &A::WRITABLE)
            .finish()
    }
}

/// Two views are equal when they address the same elements: same base, same
/// strides.
impl<T, A: Access, const R: usize> PartialEq for View<'_, T, A, R> {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.strides == other.strides
    }
}

impl<T, A: Access, const R: usize> Eq for View<'_, T, A, R> {}

impl<'a, T, const R: usize> ViewRef<'a, T, R> {
    /// Read-only view whose base is the first element of `data`.
    pub fn from_slice(data: &'a [T], strides: Strides<R>) -> Self {
        Self {
            base: data.as_ptr() as *mut T,
            strides,
            bounds: Bounds::of_slice(data),
            _marker: PhantomData,
        }
    }

    /// # Safety
    /// Every element later dereferenced through this view, or any view derived
    /// from it, must be valid for reads for `'a`.
    pub unsafe fn from_raw_parts(base: *const T, strides: Strides<R>) -> Self {
        Self {
            base: base as *mut T,
            strides,
            bounds: Bounds::unknown(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T, const R: usize> ViewMut<'a, T, R> {
    /// Read-write view whose base is the first element of `data`.
    pub fn from_slice_mut(data: &'a mut [T], strides: Strides<R>) -> Self {
        Self {
            bounds: Bounds::of_slice(data),
            base: data.as_mut_ptr(),
            strides,
            _marker: PhantomData,
        }
    }

    /// # Safety
    /// Every element later dereferenced through this view, or any view derived
    /// from it, must be valid for reads and writes for `'a`.
    pub unsafe fn from_raw_parts_mut(base: *mut T, strides: Strides<R>) -> Self {
        Self {
            base,
            strides,
            bounds: Bounds::unknown(),
            _marker: PhantomData,
        }
    }

    /// Same addressing, elements readable only.
    pub fn as_read_only(&self) -> ViewRef<'a, T, R> {
        View {
            base: self.base,
            strides: self.strides,
            bounds: self.bounds,
            _marker: PhantomData,
        }
    }
}

impl<'a, T, const R: usize> From<ViewMut<'a, T, R>> for ViewRef<'a, T, R> {
    fn from(view: ViewMut<'a, T, R>) -> Self {
        view.as_read_only()
    }
}

impl<'a, T, A: Access, const R: usize> View<'a, T, A, R> {
    pub const fn rank(&self) -> usize {
        R
    }

    pub fn strides(&self) -> &Strides<R> {
        &self.strides
    }

    pub fn as_ptr(&self) -> *const T {
        self.base
    }

    #[inline]
    fn with_strides(&self, strides: Strides<R>) -> Self {
        Self { strides, ..*self }
    }

    #[inline]
    fn offset_base(&mut self, delta: isize) {
        self.base = self.base.wrapping_offset(delta);
    }

    /// Reorders the axes. `perm[i]` names, counted from the innermost axis, the
    /// source axis that becomes axis `i`: `new_strides[i] = strides[R - perm[i] - 1]`.
    ///
    /// Under this numbering the permutation that leaves a view unchanged is
    /// `[R - 1, .., 1, 0]`. `perm` must be a permutation of `0..R`; checked
    /// builds assert it.
    #[inline]
    pub fn transpose(&self, perm: [usize; R]) -> Self {
        if CHECKED {
            if let Err(e) = Enforcer::check_permutation(&perm, R) {
                panic!("invalid transpose {:?}: {}", perm, e);
            }
        }
        self.with_strides(self.strides.transpose(perm))
    }

    /// [`View::transpose`] that reports a bad permutation instead of assuming
    /// a valid one.
    pub fn try_transpose(&self, perm: [usize; R]) -> Result<Self, InvariantError> {
        Ok(self.with_strides(self.strides.try_transpose(perm)?))
    }

    /// Reorders the axes counting from the outermost one:
    /// `new_strides[i] = strides[dims[i]]`.
    #[inline]
    pub fn permute(&self, dims: [usize; R]) -> Self {
        if CHECKED {
            if let Err(e) = Enforcer::check_permutation(&dims, R) {
                panic!("invalid permutation {:?}: {}", dims, e);
            }
        }
        self.with_strides(self.strides.permute(dims))
    }

    /// Moves the base `magnitude` steps along the `dim`-th declared axis,
    /// outermost first. Same as applying `Dim::<{ R - 1 - dim }>(magnitude)`.
    #[inline]
    pub fn shift(&self, dim: usize, magnitude: isize) -> Self {
        if CHECKED {
            if let Err(e) = Enforcer::check_axis(dim, R) {
                panic!("invalid shift: {}", e);
            }
        }
        let mut shifted = *self;
        shifted.offset_base(self.strides[dim] * magnitude);
        shifted
    }

    /// Takes the base address of `src` and keeps this view's own strides.
    ///
    /// This is a rebind, not a copy: after `a.rebind(&b)`, `a` addresses the
    /// element `b` starts at but walks away from it with `a`'s geometry, even
    /// if `b` was transposed or built with different strides. Use plain
    /// assignment to copy a view entirely.
    pub fn rebind(&mut self, src: &Self) -> &mut Self {
        self.base = src.base;
        self.bounds = src.bounds;
        self
    }
}

macro_rules! impl_rank_reduction {
    ($($rank:literal => $lower:literal),* $(,)?) => {
        $(
            impl<'a, T, A: Access> View<'a, T, A, $rank> {
                /// Fixes the outermost axis at `index`, yielding a view of one
                /// rank lower.
                #[inline]
                pub fn at(&self, index: isize) -> View<'a, T, A, $lower> {
                    View {
                        base: self.base.wrapping_offset(self.strides[0] * index),
                        strides: self.strides.tail(),
                        bounds: self.bounds,
                        _marker: PhantomData,
                    }
                }
            }
        )*
    };
}

impl_rank_reduction!(2 => 1, 3 => 2, 4 => 3, 5 => 4, 6 => 5, 7 => 6, 8 => 7);

impl<'a, T, A: Access> View<'a, T, A, 1> {
    #[inline]
    fn element(&self, index: isize) -> *mut T {
        let ptr = self.base.wrapping_offset(self.strides[0] * index);
        self.bounds.check(ptr);
        ptr
    }

    /// Reads the element at `index`.
    ///
    /// # Safety
    /// The addressed element must lie inside the live buffer, and must not be
    /// written through another view while the returned reference is held.
    #[inline]
    pub unsafe fn get(&self, index: isize) -> &'a T {
        &*self.element(index)
    }
}

impl<'a, T> View<'a, T, ReadWrite, 1> {
    /// Mutable access to the element at `index`.
    ///
    /// # Safety
    /// The addressed element must lie inside the live buffer, and no other
    /// reference to it may be alive while the returned one is held.
    #[inline]
    pub unsafe fn get_mut(&mut self, index: isize) -> &'a mut T {
        &mut *self.element(index)
    }
}

impl<T, A: Access, const R: usize, const D: usize> AddAssign<Dim<D>> for View<'_, T, A, R> {
    #[inline]
    fn add_assign(&mut self, dim: Dim<D>) {
        #[allow(clippy::let_unit_value)]
        let () = AxisInRange::<D, R>::OK;
        self.offset_base(self.strides.from_end(D) * dim.0);
    }
}

impl<T, A: Access, const R: usize, const D: usize> SubAssign<Dim<D>> for View<'_, T, A, R> {
    #[inline]
    fn sub_assign(&mut self, dim: Dim<D>) {
        *self += -dim;
    }
}

impl<T, A: Access, const R: usize, const D: usize> Add<Dim<D>> for View<'_, T, A, R> {
    type Output = Self;

    #[inline]
    fn add(mut self, dim: Dim<D>) -> Self::Output {
        self += dim;
        self
    }
}

impl<T, A: Access, const R: usize, const D: usize> Sub<Dim<D>> for View<'_, T, A, R> {
    type Output = Self;

    #[inline]
    fn sub(mut self, dim: Dim<D>) -> Self::Output {
        self -= dim;
        self
    }
}
