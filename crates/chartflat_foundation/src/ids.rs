//! Stable identities for declarations.
//!
//! The front end assigns every [`DeclId`] once; name references carry the id
//! of the declaration they resolve to, so renaming never depends on object
//! identity or hashing of whole declarations.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Arena index of a declaration.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeclId(u32);

impl DeclId {
    /// Creates an id from a raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index of this id.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclId({})", self.0)
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out sequential [`DeclId`]s.
///
/// Used by front ends building a chart, and by the globaliser when it
/// numbers the global declaration list.
#[derive(Clone, Debug, Default)]
pub struct DeclIdAllocator {
    next: u32,
}

impl DeclIdAllocator {
    /// Creates an allocator starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next unused id.
    pub fn next_id(&mut self) -> DeclId {
        let id = DeclId(self.next);
        self.next += 1;
        id
    }

    /// Returns how many ids have been handed out.
    #[must_use]
    pub const fn allocated(&self) -> u32 {
        self.next
    }
}
