use crate::{Enforcer, InvariantError};

/// Per-axis element strides, outermost axis first.
///
/// The length is part of the type, so a stride vector can only ever be paired
/// with a view of the same rank.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Strides<const R: usize>([isize; R]);

impl<const R: usize> Strides<R> {
    pub const fn new(strides: [isize; R]) -> Self {
        Self(strides)
    }

    /// Contiguous strides for `dims`, last index varying fastest.
    pub fn row_major(dims: [usize; R]) -> Self {
        let mut strides = [0; R];
        let mut stride = 1;
        for (s, size) in strides.iter_mut().zip(dims.iter()).rev() {
            *s = stride;
            stride *= *size as isize;
        }
        Self(strides)
    }

    /// Contiguous strides for `dims`, first index varying fastest.
    pub fn col_major(dims: [usize; R]) -> Self {
        let mut strides = [0; R];
        let mut stride = 1;
        for (s, size) in strides.iter_mut().zip(dims.iter()) {
            *s = stride;
            stride *= *size as isize;
        }
        Self(strides)
    }

    pub const fn rank(&self) -> usize {
        R
    }

    pub fn as_array(&self) -> &[isize; R] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<isize> {
        self.0.to_vec()
    }

    pub fn iter(&self) -> impl Iterator<Item = &isize> {
        self.0.iter()
    }

    /// Stride of the axis `axis` positions in from the innermost one.
    ///
    /// `from_end(0)` is the last stride, `from_end(R - 1)` the first.
    #[inline]
    pub fn from_end(&self, axis: usize) -> isize {
        self.0[R - axis - 1]
    }

    /// Reorders the strides with a permutation counted from the innermost axis:
    /// `out[i] = self.from_end(perm[i])`.
    #[inline]
    pub fn transpose(&self, perm: [usize; R]) -> Self {
        Self(std::array::from_fn(|i| self.from_end(perm[i])))
    }

    /// Reorders the strides with a permutation counted from the outermost axis:
    /// `out[i] = self[dims[i]]`.
    #[inline]
    pub fn permute(&self, dims: [usize; R]) -> Self {
        Self(std::array::from_fn(|i| self.0[dims[i]]))
    }

    /// Validated form of [`Strides::transpose`].
    pub fn try_transpose(&self, perm: [usize; R]) -> Result<Self, InvariantError> {
        Enforcer::check_permutation(&perm, R)?;
        Ok(self.transpose(perm))
    }

    /// The permutation that undoes `transpose(perm)`, in the same
    /// innermost-first numbering.
    pub fn inverse_permutation(perm: [usize; R]) -> [usize; R] {
        let mut inverse = [0; R];
        for (i, &p) in perm.iter().enumerate() {
            inverse[p] = i;
        }
        std::array::from_fn(|j| R - 1 - inverse[R - 1 - j])
    }
}

macro_rules! impl_tail {
    ($($rank:literal => $lower:literal),* $(,)?) => {
        $(
            impl Strides<$rank> {
                /// Drops the outermost stride.
                #[inline]
                pub fn tail(&self) -> Strides<$lower> {
                    let mut tail = [0; $lower];
                    tail.copy_from_slice(&self.0[1..]);
                    Strides(tail)
                }
            }
        )*
    };
}

impl_tail!(2 => 1, 3 => 2, 4 => 3, 5 => 4, 6 => 5, 7 => 6, 8 => 7);

impl<const R: usize> std::fmt::Debug for Strides<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut strides = format!("[{}", self.0.first().unwrap_or(&0));
        for stride in self.0.iter().skip(1) {
            strides.push_str(&format!("x{}", stride));
        }
        write!(f, "{}]", strides)
    }
}

impl<const R: usize> std::ops::Index<usize> for Strides<R> {
    type Output = isize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<const R: usize> From<[isize; R]> for Strides<R> {
    fn from(strides: [isize; R]) -> Self {
        Self(strides)
    }
}

impl<const R: usize> From<Strides<R>> for [isize; R] {
    fn from(strides: Strides<R>) -> Self {
        strides.0
    }
}
