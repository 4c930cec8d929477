//! Reference codec for Wireforge schemas.
//!
//! Generated code is only as trustworthy as the format it implements.
//! This crate implements that format once, directly from a
//! [`Schema`](wireforge_schema::Schema), so tests (and tools that cannot
//! link generated code) can produce and check the exact bytes both
//! backends are expected to agree on.
//!
//! - **Values** ([`Value`], [`MessageValue`]): dynamically typed field data.
//! - **Codec** ([`WireCodec`]): encode, decode from a byte cursor, or
//!   decode from an async byte stream.
//! - **Errors** ([`CodecError`]): everything that can go wrong doing so.

mod codec;
mod error;
mod primitive;
mod value;

pub use codec::WireCodec;
pub use error::CodecError;
pub use value::{MessageValue, Value};
