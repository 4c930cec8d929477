//! Writes the starship codecs for the browser client.
//!
//! ```text
//! starship-codegen [CONFIG]                  generate from CONFIG (default: wireforge.json)
//! starship-codegen --mappings-from CODEC_RS  print lookup tables for an existing file
//! ```
//!
//! Relative paths in the config are resolved against the config's directory.

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;
use wireforge::{Generator, GeneratorConfig};

const DEFAULT_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/wireforge.json");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args_os().skip(1);
    match args.next() {
        Some(flag) if flag == "--mappings-from" => {
            let source = args.next().ok_or("--mappings-from needs a path")?;
            let generator = Generator::new(load(Path::new(DEFAULT_CONFIG))?);
            print!("{}", generator.render_mappings_from_file(Path::new(&source))?);
        }
        Some(path) => generate(&PathBuf::from(path))?,
        None => generate(Path::new(DEFAULT_CONFIG))?,
    }
    Ok(())
}

fn load(path: &Path) -> Result<GeneratorConfig, wireforge::GeneratorError> {
    let config = GeneratorConfig::from_json_file(path)?;
    Ok(match path.parent() {
        Some(dir) => config.relative_to(dir),
        None => config,
    })
}

fn generate(config_path: &Path) -> Result<(), wireforge::GeneratorError> {
    let config = load(config_path)?;
    tracing::info!(config = %config_path.display(), "generating starship codecs");

    let sources = Generator::new(config).run(&starship::schema::protocol())?;
    if !sources.warnings.is_empty() {
        tracing::warn!(count = sources.warnings.len(), "schema has lint warnings");
    }
    Ok(())
}
