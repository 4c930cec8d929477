//! Name extraction from emitted source text.
//!
//! The scripting runtime never sees the schema. Instead, this crate reads
//! the Rust source that backend A emitted and recovers the order in which
//! messages and enum variants were declared. That order *is* the wire tag,
//! so the lookup tables it produces agree with the generated codecs, as
//! long as nobody edits or reformats that source by hand.
//!
//! - **State machine** ([`ScanState`]): a composable character-at-a-time
//!   automaton: anchor literal, balanced block, comment skip, name split.
//! - **Scanner** ([`SourceScanner`]): runs the automaton over a source
//!   text and returns ordered names.
//! - **Mapping** ([`MappingEmitter`]): renders name↔index lookup tables.
//!
//! ```text
//! "…pub enum ToClientMsg { A { .. }, B, }…"
//!        │ NameAnchor("pub enum ToClientMsg {")
//!        ▼
//!   BalancedBlock('{', '}') ──captured──▶ NameExtraction ──▶ ["A", "B"]
//! ```

mod error;
mod mapping;
mod scanner;
mod state;

pub use error::ScanError;
pub use mapping::{MappingEmitter, MappingTable, MappingTarget};
pub use scanner::{split_names, SourceScanner};
pub use state::{Quote, ScanState};
