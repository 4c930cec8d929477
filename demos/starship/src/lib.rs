//! Starship wire protocol.
//!
//! The codecs in this crate are generated at build time from
//! [`schema::protocol`]. Use the `starship-codegen` binary to write the
//! browser copies to disk.

pub mod schema;

#[allow(dead_code, clippy::all)]
mod codec {
    include!(concat!(env!("OUT_DIR"), "/codec.rs"));
}

pub use codec::{PartKind, ToClientMsg, ToServerMsg};

/// The same protocol generated with slice-and-cursor decoders, for callers
/// that already hold a whole frame.
#[allow(dead_code, clippy::all)]
pub mod cursor {
    include!(concat!(env!("OUT_DIR"), "/cursor/codec.rs"));
}

/// The generated TypeScript codec, header included.
pub const TYPESCRIPT_CODEC: &str = include_str!(concat!(env!("OUT_DIR"), "/codec.ts"));

/// Name/id lookup tables for the browser client.
pub const CODEC_MAPPINGS: &str = include_str!(concat!(env!("OUT_DIR"), "/codec_mappings.js"));
