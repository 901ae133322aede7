//! Tempo IR - shared identifier and location types for the script engine.
//!
//! This crate contains the small, `Copy` building blocks every other tempo
//! crate agrees on:
//! - [`Name`]: interned identifier token (equality by underlying string)
//! - [`StringInterner`] / [`SharedInterner`]: the table that hands out names
//! - [`CodeLocation`]: line/column of the source construct an AST node came from
//! - Operator kinds ([`BinaryOp`], [`UnaryOp`], [`LogicalOp`]) shared by the
//!   tree builder and the evaluator
//!
//! Identifiers are interned once while the tree is built; every lookup the
//! evaluator performs afterwards compares `u32`s instead of strings.

mod interner;
mod location;
mod name;
mod ops;

pub use interner::{SharedInterner, StringInterner};
pub use location::CodeLocation;
pub use name::Name;
pub use ops::{BinaryOp, LogicalOp, UnaryOp};
