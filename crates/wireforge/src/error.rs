//! Unified error type for a generation run.

use std::path::PathBuf;

use wireforge_scan::ScanError;

/// Everything that can abort a generation run.
///
/// When any of these is returned, no output file has been written.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The mapping pass could not locate or close an anchor.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The configuration file is not valid JSON for [`GeneratorConfig`](crate::GeneratorConfig).
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    /// Reading a header or config, or writing an output, failed.
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A category or enum has more entries than one tag byte addresses.
    /// Emitting it would wrap tags past 255 onto earlier entries.
    #[error("`{name}` declares {count} entries, more than fit in one byte")]
    TagOverflow { name: String, count: usize },

    /// A standalone mapping pass was requested with no targets.
    #[error("no mapping targets configured")]
    NoMappingTargets,
}

impl GeneratorError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { action, path, source }
    }
}
