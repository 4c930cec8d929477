//! Source emitters for Wireforge.
//!
//! Each emitter turns a [`Schema`](wireforge_schema::Schema) into the source
//! of one backend runtime. Both backends implement the same wire format:
//!
//! - **Backend A** ([`RustEmitter`]): one `enum` per category and per enum,
//!   with `serialize` / `deserialize` methods. Decoding reads either a byte
//!   cursor or an async byte stream ([`RustFlavor`]).
//! - **Backend B** ([`TypeScriptEmitter`]): one class per message, a
//!   dispatch function per category, and numeric enums.
//!
//! Emitters only produce the body. Primitive routines such as
//! `type_string_serialize` come from a per-backend header the caller
//! prepends.

mod emitter;
mod rust;
mod typescript;
mod writer;

pub use emitter::Emitter;
pub use rust::{RustEmitter, RustFlavor};
pub use typescript::TypeScriptEmitter;
