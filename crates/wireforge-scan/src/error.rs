//! Error types for source scanning.

/// Why an extraction did not produce a name list.
///
/// Any of these aborts a generation run: a mapping file built from a
/// partial scan would silently disagree with the wire tags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// The anchor literal never occurs in the source.
    #[error("anchor `{0}` not found")]
    AnchorNotFound(String),

    /// The block after the anchor is never closed.
    #[error("block after anchor `{0}` is never closed")]
    UnclosedBlock(String),

    /// The captured block ended inside a comment or a nested block.
    #[error("names end inside an unterminated {0}")]
    UnterminatedNames(&'static str),
}
