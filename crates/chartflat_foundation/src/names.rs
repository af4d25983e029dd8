//! Collision-free name allocation for mangled identifiers.
//!
//! Mangling a dotted path can produce the same identifier twice
//! (`A.b_c` and `A_b.c` both mangle to `A_b_c`). The allocator hands out each
//! base name once and resolves repeats by appending the suffix until the name
//! is unused.
//!
//! # Example
//!
//! ```
//! use chartflat_foundation::NameAllocator;
//!
//! let mut names = NameAllocator::new();
//! assert_eq!(names.allocate("Idle_count"), "Idle_count");
//! assert_eq!(names.allocate("Idle_count"), "Idle_count1");
//! assert_eq!(names.allocate("Idle_count"), "Idle_count11");
//! ```

use std::collections::HashSet;

/// Default text appended to a colliding name.
pub const DEFAULT_SUFFIX: &str = "1";

/// Deterministic allocator of unique names.
#[derive(Clone, Debug)]
pub struct NameAllocator {
    suffix: String,
    taken: HashSet<String>,
}

impl Default for NameAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl NameAllocator {
    /// Creates an allocator with the default suffix.
    #[must_use]
    pub fn new() -> Self {
        Self::with_suffix(DEFAULT_SUFFIX)
    }

    /// Creates an allocator with a custom suffix.
    ///
    /// An empty suffix would never resolve a collision, so it falls back to
    /// [`DEFAULT_SUFFIX`].
    #[must_use]
    pub fn with_suffix(suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        Self {
            suffix: if suffix.is_empty() {
                DEFAULT_SUFFIX.to_string()
            } else {
                suffix
            },
            taken: HashSet::new(),
        }
    }

    /// Marks `name` as used without allocating it.
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.taken.insert(name.into());
    }

    /// Returns true if `name` has been allocated or reserved.
    #[must_use]
    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// Allocates a unique name derived from `base`.
    pub fn allocate(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        while self.taken.contains(&candidate) {
            candidate.push_str(&self.suffix);
        }
        self.taken.insert(candidate.clone());
        candidate
    }

    /// Returns how many names are taken.
    #[must_use]
    pub fn len(&self) -> usize {
        self.taken.len()
    }

    /// Returns true if nothing has been allocated or reserved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}
