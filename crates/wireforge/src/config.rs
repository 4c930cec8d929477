//! Generator configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wireforge_emit::RustFlavor;
use wireforge_scan::MappingTarget;

use crate::GeneratorError;

// ---------------------------------------------------------------------------
// Per-backend outputs
// ---------------------------------------------------------------------------

/// Where backend-A Rust goes and how it decodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RustOutput {
    pub path: PathBuf,
    /// Prepended verbatim. Must define the `type_<kind>_*` routines and,
    /// for the async flavor, bring `Stream` and `StreamExt` into scope.
    pub header: Option<PathBuf>,
    pub flavor: RustFlavor,
}

impl Default for RustOutput {
    fn default() -> Self {
        Self {
            path: PathBuf::from("codec.rs"),
            header: None,
            flavor: RustFlavor::default(),
        }
    }
}

/// Where backend-B TypeScript and its lookup tables go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeScriptOutput {
    pub path: PathBuf,
    /// Prepended verbatim. Must define `Box` and the `type_<kind>_*` routines.
    pub header: Option<PathBuf>,
    pub mapping_path: PathBuf,
}

impl Default for TypeScriptOutput {
    fn default() -> Self {
        Self {
            path: PathBuf::from("codec.ts"),
            header: None,
            mapping_path: PathBuf::from("codec_mappings.js"),
        }
    }
}

// ---------------------------------------------------------------------------
// GeneratorConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`Generator`](crate::Generator).
///
/// Every field has a default, so a config file only lists what it changes:
///
/// ```json
/// {
///   "rust": { "path": "src/codec.rs", "header": "codec_header.rs" },
///   "mappings": [
///     { "anchor": "pub enum ToClientMsg {", "export_name": "FromServer" },
///     { "anchor": "pub enum ToServerMsg {", "export_name": "ToServer" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub rust: RustOutput,
    pub typescript: TypeScriptOutput,
    /// Blocks to turn into lookup tables. When empty, one table per
    /// category is produced, named after the category.
    pub mappings: Vec<MappingTarget>,
}

impl GeneratorConfig {
    pub fn from_json_str(text: &str) -> Result<Self, GeneratorError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, GeneratorError> {
        let text = std::fs::read_to_string(path).map_err(GeneratorError::io("read", path))?;
        Self::from_json_str(&text)
    }

    /// Resolves every relative path in the config against `dir`.
    pub fn relative_to(mut self, dir: &Path) -> Self {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = dir.join(&*p);
            }
        };
        join(&mut self.rust.path);
        join(&mut self.typescript.path);
        join(&mut self.typescript.mapping_path);
        if let Some(header) = self.rust.header.as_mut() {
            join(header);
        }
        if let Some(header) = self.typescript.header.as_mut() {
            join(header);
        }
        self
    }

    /// Output paths in write order.
    pub fn output_paths(&self) -> [&Path; 3] {
        [
            &self.rust.path,
            &self.typescript.path,
            &self.typescript.mapping_path,
        ]
    }
}
