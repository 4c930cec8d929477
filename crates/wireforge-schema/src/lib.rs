//! Protocol schema model for Wireforge.
//!
//! This crate defines the value graph every other Wireforge crate consumes:
//!
//! - **Types** ([`Primitive`], [`TypeDescriptor`]): how a single field is
//!   laid out on the wire.
//! - **Schema** ([`Schema`], [`Category`], [`Message`], [`Field`], [`Enum`]):
//!   the ordered declarations that fix tag bytes and enum indices.
//! - **Lint** ([`SchemaWarning`]): advisory checks for declarations whose
//!   behavior is undefined (duplicates, empty categories, tag overflow).
//!
//! # Architecture
//!
//! The schema is built once, in process, and never mutated afterwards.
//! Emitters and the reference codec only ever borrow it.
//!
//! ```text
//! Schema (value graph) → Emitters (source text) → Scanner (lookup tables)
//!                      → Codec (reference bytes)
//! ```

mod lint;
mod schema;
mod types;

pub use lint::SchemaWarning;
pub use schema::{Category, Enum, Field, Message, Schema, SchemaBuilder};
pub use types::{Primitive, TypeDescriptor};

/// Largest number of messages per category, or variants per enum, that
/// still fit in a single tag byte.
pub const MAX_TAGS: usize = 256;
