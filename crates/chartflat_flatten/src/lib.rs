//! Hierarchy flattening for chartflat.
//!
//! This crate provides:
//! - [`Hierarchy`] - Ancestry, leaf enumeration, default descent, and LCA
//! - [`Globaliser`] - Scope mangling into one global declaration list
//! - [`SourceExpander`] - Composite-source expansion with exit actions
//! - [`DestinationExpander`] - Composite-destination expansion with entry actions
//! - [`Finalizer`] - LCA composition and single-level output
//! - [`Flattener`] - The four stages run in order
//! - [`trace`] - Stage event recording
//!
//! # Pipeline
//!
//! ```text
//! Statechart ──▶ Globaliser ──▶ SourceExpander ──▶ DestinationExpander ──▶ Finalizer ──▶ Statechart
//!                (globalise)    (expand-source)     (expand-destination)    (finalize)
//! ```
//!
//! Each stage consumes the complete output of its predecessor and returns a
//! fresh tree.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod destination;
pub mod finalize;
pub mod globaliser;
pub mod hierarchy;
pub mod pipeline;
pub mod source;
pub mod trace;

pub use config::FlattenConfig;
pub use destination::DestinationExpander;
pub use finalize::{Composition, Finalizer};
pub use globaliser::{Association, Globaliser};
pub use hierarchy::{Hierarchy, StateId};
pub use pipeline::{Flattener, Translator, translate};
pub use source::SourceExpander;
pub use trace::{Stage, TraceEvent, Tracer, TracerConfig};
