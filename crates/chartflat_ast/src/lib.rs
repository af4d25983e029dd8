//! Statechart syntax tree for chartflat.
//!
//! This crate provides:
//! - [`Expression`] and [`Statement`] - closed sum types for guards and actions
//! - [`Statechart`], [`State`], [`Transition`], [`Declaration`] - the chart tree
//! - [`visitor`] - read-only walks and fallible rebuilding transforms
//!
//! Trees are plain owned values. Every pipeline stage builds a new tree and
//! never mutates its input.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod chart;
pub mod visitor;

pub use ast::{BinaryOp, Expression, NameRef, Statement, UnaryOp};
pub use chart::{
    Declaration, FunctionDecl, Provenance, State, Statechart, Transition, TypeDecl,
};
