//! `Generator` builder and the generation run.
//!
//! A run has two phases. [`Generator::render`] does everything in memory:
//! lint, emit both backends, splice headers, scan the spliced Rust for
//! lookup tables. [`Generator::write`] then puts the three results on disk.
//! Any error in the first phase means nothing is written.

use std::path::{Path, PathBuf};

use wireforge_emit::{Emitter, RustEmitter, RustFlavor, TypeScriptEmitter};
use wireforge_scan::{MappingEmitter, MappingTarget};
use wireforge_schema::{Schema, SchemaWarning};

use crate::{GeneratorConfig, GeneratorError};

/// First line of every generated file.
pub const GENERATED_BANNER: &str = "// @generated by wireforge. Do not edit by hand.\n";

/// The three generated modules, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSources {
    pub rust: String,
    pub typescript: String,
    pub mappings: String,
    /// Lint findings for the schema the sources were generated from.
    pub warnings: Vec<SchemaWarning>,
}

/// Builder for a [`Generator`].
///
/// # Example
///
/// ```rust,no_run
/// use wireforge::prelude::*;
///
/// let generator = Generator::builder()
///     .output_dir("generated")
///     .rust_header("codec_header.rs")
///     .mapping(MappingTarget::for_declaration("ToClientMsg", "FromServer"))
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct GeneratorBuilder {
    config: GeneratorConfig,
    output_dir: Option<PathBuf>,
}

impl GeneratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing config instead of the defaults.
    pub fn config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolves every relative path against `dir` at build time.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn rust_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.rust.path = path.into();
        self
    }

    pub fn rust_header(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.rust.header = Some(path.into());
        self
    }

    pub fn flavor(mut self, flavor: RustFlavor) -> Self {
        self.config.rust.flavor = flavor;
        self
    }

    pub fn typescript_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.typescript.path = path.into();
        self
    }

    pub fn typescript_header(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.typescript.header = Some(path.into());
        self
    }

    pub fn mapping_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.typescript.mapping_path = path.into();
        self
    }

    /// Adds a lookup table. Tables are rendered in the order added.
    pub fn mapping(mut self, target: MappingTarget) -> Self {
        self.config.mappings.push(target);
        self
    }

    pub fn build(self) -> Generator {
        let config = match &self.output_dir {
            Some(dir) => self.config.relative_to(dir),
            None => self.config,
        };
        Generator::new(config)
    }
}

/// Turns a [`Schema`] into backend sources and lookup tables.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The configured targets, or one per category when none are set.
    pub fn mapping_targets(&self, schema: &Schema) -> Vec<MappingTarget> {
        if !self.config.mappings.is_empty() {
            return self.config.mappings.clone();
        }
        schema
            .categories()
            .iter()
            .map(|c| MappingTarget::for_declaration(&c.name, c.name.clone()))
            .collect()
    }

    /// Produces all three modules in memory.
    ///
    /// Lint findings are logged and returned with the sources, except
    /// [`SchemaWarning::TagOverflow`], which fails the run.
    pub fn render(&self, schema: &Schema) -> Result<GeneratedSources, GeneratorError> {
        let warnings = schema.lint();
        for warning in &warnings {
            if let SchemaWarning::TagOverflow { name, count } = warning {
                tracing::error!(%warning, "schema lint");
                return Err(GeneratorError::TagOverflow {
                    name: name.clone(),
                    count: *count,
                });
            }
            tracing::warn!(%warning, "schema lint");
        }

        let rust_header = read_header(self.config.rust.header.as_deref())?;
        let ts_header = read_header(self.config.typescript.header.as_deref())?;

        let rust_emitter = RustEmitter::new(self.config.rust.flavor);
        let rust = splice(&rust_header, &rust_emitter.emit(schema));
        tracing::info!(
            backend = rust_emitter.backend(),
            flavor = ?self.config.rust.flavor,
            bytes = rust.len(),
            "rendered"
        );

        let typescript = splice(&ts_header, &TypeScriptEmitter.emit(schema));
        tracing::info!(backend = TypeScriptEmitter.backend(), bytes = typescript.len(), "rendered");

        // Scanned after splicing, so the tables describe exactly the text
        // that lands on disk.
        let mappings = MappingEmitter::new(self.mapping_targets(schema)).emit(&rust)?;

        Ok(GeneratedSources {
            rust,
            typescript,
            mappings: format!("{GENERATED_BANNER}{mappings}"),
            warnings,
        })
    }

    /// Writes rendered sources to the configured paths.
    ///
    /// Every file is first written beside its target under a temporary
    /// name; targets are replaced only once all three temporaries exist.
    /// Files whose content is unchanged are left untouched.
    pub fn write(&self, sources: &GeneratedSources) -> Result<(), GeneratorError> {
        let [rust_path, ts_path, mapping_path] = self.config.output_paths();
        let outputs = [
            (rust_path, sources.rust.as_str()),
            (ts_path, sources.typescript.as_str()),
            (mapping_path, sources.mappings.as_str()),
        ];

        let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(outputs.len());
        for (path, contents) in outputs {
            if std::fs::read_to_string(path).is_ok_and(|existing| existing == contents) {
                tracing::debug!(path = %path.display(), "unchanged");
                continue;
            }
            match stage(path, contents) {
                Ok(temp) => staged.push((temp, path)),
                Err(e) => {
                    discard(&staged);
                    return Err(e);
                }
            }
        }

        for (index, (temp, path)) in staged.iter().enumerate() {
            if let Err(source) = std::fs::rename(temp, path) {
                discard(&staged[index..]);
                return Err(GeneratorError::Io {
                    action: "replace",
                    path: path.to_path_buf(),
                    source,
                });
            }
            tracing::info!(path = %path.display(), "wrote");
        }
        Ok(())
    }

    /// Renders and writes in one step.
    pub fn run(&self, schema: &Schema) -> Result<GeneratedSources, GeneratorError> {
        let sources = self.render(schema)?;
        self.write(&sources)?;
        Ok(sources)
    }

    /// Rebuilds lookup tables from an existing backend-A file, without a
    /// schema. Requires explicit mapping targets.
    pub fn render_mappings_from_file(&self, path: &Path) -> Result<String, GeneratorError> {
        if self.config.mappings.is_empty() {
            return Err(GeneratorError::NoMappingTargets);
        }
        let source = std::fs::read_to_string(path).map_err(GeneratorError::io("read", path))?;
        let mappings = MappingEmitter::new(self.config.mappings.clone()).emit(&source)?;
        Ok(format!("{GENERATED_BANNER}{mappings}"))
    }
}

fn read_header(path: Option<&Path>) -> Result<String, GeneratorError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(GeneratorError::io("read", path)),
        None => Ok(String::new()),
    }
}

fn splice(header: &str, body: &str) -> String {
    let mut out = String::with_capacity(GENERATED_BANNER.len() + header.len() + body.len() + 1);
    out.push_str(GENERATED_BANNER);
    out.push_str(header);
    if !header.is_empty() && !header.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(body);
    out
}

fn stage(path: &Path, contents: &str) -> Result<PathBuf, GeneratorError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(GeneratorError::io("create", parent))?;
    }
    let mut temp = path.as_os_str().to_owned();
    temp.push(".wireforge-tmp");
    let temp = PathBuf::from(temp);
    std::fs::write(&temp, contents).map_err(GeneratorError::io("write", &temp))?;
    Ok(temp)
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (temp, _) in staged {
        if let Err(e) = std::fs::remove_file(temp) {
            tracing::debug!(path = %temp.display(), error = %e, "failed to remove temporary");
        }
    }
}
