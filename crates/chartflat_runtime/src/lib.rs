//! CLI support and serialization for chartflat.
//!
//! This crate provides:
//! - Chart serialization and deserialization (`MessagePack`)
//! - [`flatten_file`] - Load, flatten, and save in one step
//! - [`ChartSummary`] - Shape statistics printed by the CLI

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod driver;
pub mod serialize;

pub use driver::{ChartSummary, FlattenReport, default_output_path, flatten_file};
pub use serialize::{from_bytes, load_from_file, save_to_file, to_bytes};
