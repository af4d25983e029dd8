//! Core types shared by every chartflat layer.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with stage and transition context
//! - [`DeclId`] - Stable arena identity for declarations
//! - [`StatePath`] - Fully-qualified dotted state paths and name mangling
//! - [`NameAllocator`] - Deterministic collision-free name allocation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ids;
pub mod names;
pub mod path;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use ids::{DeclId, DeclIdAllocator};
pub use names::NameAllocator;
pub use path::StatePath;
