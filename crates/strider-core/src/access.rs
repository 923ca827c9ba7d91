//! Access markers carried by a [`View`](crate::View) as a type parameter.
//!
//! A view's marker is fixed when it is constructed and inherited by every view
//! derived from it, so a read-only view never yields a mutable element.

mod sealed {
    pub trait Sealed {}
}

pub trait Access: sealed::Sealed + Copy + std::fmt::Debug {
    const WRITABLE: bool;
}

/// Elements may only be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOnly;

/// Elements may be read and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadWrite;

impl sealed::Sealed for ReadOnly {}
impl sealed::Sealed for ReadWrite {}

impl Access for ReadOnly {
    const WRITABLE: bool = false;
}

impl Access for ReadWrite {
    const WRITABLE: bool = true;
}
