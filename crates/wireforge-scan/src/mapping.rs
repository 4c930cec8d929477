//! Bidirectional name↔index lookup tables for the scripting runtime.
//!
//! For every [`MappingTarget`] the emitter scans backend-A source, then
//! renders a placeholder object per name plus two `Map`s:
//!
//! ```text
//! export const FromServer = { HandshakeAccepted:{},AddPart:{}, };
//! FromServer.to_id = new Map([ [FromServer.HandshakeAccepted,0],[FromServer.AddPart,1], ]);
//! FromServer.from_id = new Map([ [0,FromServer.HandshakeAccepted],[1,FromServer.AddPart], ]);
//! ```
//!
//! The index of a name is its position in the scanned text. Nothing checks
//! that this equals the wire tag; it does only because backend A declares
//! variants in tag order.

use serde::{Deserialize, Serialize};

use crate::{ScanError, SourceScanner};

/// Which block to scan and what to call the resulting table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingTarget {
    /// Literal ending with the block's opening brace, e.g.
    /// `"pub enum ToClientMsg {"`.
    pub anchor: String,
    /// Name of the exported table object, e.g. `"FromServer"`.
    pub export_name: String,
}

impl MappingTarget {
    pub fn new(anchor: impl Into<String>, export_name: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            export_name: export_name.into(),
        }
    }

    /// Targets the body of the enum declared as `declared`.
    ///
    /// The anchor includes the `pub enum` keyword so that a declaration
    /// whose name merely ends with `declared` (`PartMsg` for `Msg`) is
    /// never matched first.
    pub fn for_declaration(declared: &str, export_name: impl Into<String>) -> Self {
        Self::new(format!("pub enum {declared} {{"), export_name)
    }
}

/// Ordered names recovered for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    pub export_name: String,
    pub names: Vec<String>,
}

impl MappingTable {
    /// Zero-based position of `name`, i.e. its forward-table entry.
    pub fn id_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// The name at `id`, i.e. its reverse-table entry.
    pub fn name_of(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn render(&self) -> String {
        let table = &self.export_name;
        let mut out = format!("export const {table} = {{ ");
        for name in &self.names {
            out.push_str(&format!("{name}:{{}},"));
        }
        out.push_str(&format!(" }};\n{table}.to_id = new Map([ "));
        for (id, name) in self.names.iter().enumerate() {
            out.push_str(&format!("[{table}.{name},{id}],"));
        }
        out.push_str(&format!(" ]);\n{table}.from_id = new Map([ "));
        for (id, name) in self.names.iter().enumerate() {
            out.push_str(&format!("[{id},{table}.{name}],"));
        }
        out.push_str(" ]);\n\n");
        out
    }
}

/// Scans source text for each target and renders the lookup module.
#[derive(Debug, Clone, Default)]
pub struct MappingEmitter {
    targets: Vec<MappingTarget>,
}

impl MappingEmitter {
    pub fn new(targets: Vec<MappingTarget>) -> Self {
        Self { targets }
    }

    pub fn targets(&self) -> &[MappingTarget] {
        &self.targets
    }

    /// Extracts one table per target, failing on the first target that
    /// cannot be located or closed.
    pub fn extract(&self, source: &str) -> Result<Vec<MappingTable>, ScanError> {
        let scanner = SourceScanner::new(source);
        self.targets
            .iter()
            .map(|target| {
                let names = scanner.extract_ordered_names(&target.anchor)?;
                tracing::info!(
                    anchor = %target.anchor,
                    export = %target.export_name,
                    count = names.len(),
                    "extracted mapping"
                );
                Ok(MappingTable {
                    export_name: target.export_name.clone(),
                    names,
                })
            })
            .collect()
    }

    /// Renders every table into one module. Nothing is rendered unless
    /// every target was extracted.
    pub fn emit(&self, source: &str) -> Result<String, ScanError> {
        let tables = self.extract(source)?;
        Ok(tables.iter().map(MappingTable::render).collect())
    }
}
