/// Whether extents are tracked and element accesses asserted.
pub(crate) const CHECKED: bool = cfg!(any(debug_assertions, feature = "checked"));

/// Byte range of the slice a view was built from.
///
/// Only populated in checked builds; otherwise this is zero-sized and every
/// check compiles away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Bounds {
    #[cfg(any(debug_assertions, feature = "checked"))]
    extent: Option<(usize, usize)>,
}

impl Bounds {
    /// No extent known, e.g. for views built from raw pointers.
    pub(crate) fn unknown() -> Self {
        Self::default()
    }

    #[cfg(any(debug_assertions, feature = "checked"))]
    pub(crate) fn of_slice<T>(data: &[T]) -> Self {
        let start = data.as_ptr() as usize;
        Self {
            extent: Some((start, start + std::mem::size_of_val(data))),
        }
    }

    #[cfg(not(any(debug_assertions, feature = "checked")))]
    #[inline(always)]
    pub(crate) fn of_slice<T>(_data: &[T]) -> Self {
        Self::default()
    }

    /// `None` when no extent is tracked.
    #[cfg(any(debug_assertions, feature = "checked"))]
    pub(crate) fn contains<T>(&self, ptr: *const T) -> Option<bool> {
        let (start, end) = self.extent?;
        if std::mem::size_of::<T>() == 0 {
            return Some(true);
        }
        let addr = ptr as usize;
        Some(addr >= start && addr < end)
    }

    #[cfg(not(any(debug_assertions, feature = "checked")))]
    #[inline(always)]
    pub(crate) fn contains<T>(&self, _ptr: *const T) -> Option<bool> {
        None
    }

    #[inline(always)]
    pub(crate) fn check<T>(&self, ptr: *const T) {
        if CHECKED && self.contains(ptr) == Some(false) {
            panic!("element access at {:p} is outside the viewed buffer", ptr);
        }
    }
}
