//! # Wireforge
//!
//! Build-time wire-format code generator.
//!
//! Describe a protocol once as an in-process [`Schema`](prelude::Schema),
//! then let a [`Generator`] emit:
//!
//! - a Rust module (backend A) with one tagged `enum` per message category,
//! - a TypeScript module (backend B) with matching classes and enums,
//! - a lookup-table module mapping message names to ids, recovered by
//!   scanning the emitted Rust text.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wireforge::prelude::*;
//!
//! let schema = Schema::builder()
//!     .category(Category::new("ToServerMsg").message(
//!         Message::new("Handshake").field("client", TypeDescriptor::STRING),
//!     ))
//!     .build();
//!
//! let generator = Generator::new(GeneratorConfig::default());
//! generator.run(&schema)?;
//! # Ok::<(), GeneratorError>(())
//! ```

mod config;
mod error;
mod generator;

pub use config::{GeneratorConfig, RustOutput, TypeScriptOutput};
pub use error::GeneratorError;
pub use generator::{GeneratedSources, Generator, GeneratorBuilder, GENERATED_BANNER};

pub use wireforge_codec as codec;
pub use wireforge_emit as emit;
pub use wireforge_scan as scan;
pub use wireforge_schema as schema;

pub mod prelude {
    pub use crate::{GeneratedSources, Generator, GeneratorConfig, GeneratorError};
    pub use wireforge_emit::{Emitter, RustEmitter, RustFlavor, TypeScriptEmitter};
    pub use wireforge_scan::{MappingEmitter, MappingTarget, SourceScanner};
    pub use wireforge_schema::{Category, Enum, Field, Message, Primitive, Schema, TypeDescriptor};
}
