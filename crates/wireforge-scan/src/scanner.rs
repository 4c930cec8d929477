//! The extraction pipeline: anchor → balanced block → name split.

use crate::{ScanError, ScanState};

/// Extracts ordered declaration names from a source text.
///
/// ```rust
/// use wireforge_scan::SourceScanner;
///
/// let scanner = SourceScanner::new("enum Shape { Circle(f32), Square }");
/// let names = scanner.extract_ordered_names("Shape {").unwrap();
/// assert_eq!(names, ["Circle", "Square"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SourceScanner<'a> {
    source: &'a str,
}

impl<'a> SourceScanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Returns the interior of the `{ … }` block that follows the first
    /// occurrence of `anchor`. The anchor must end with the opening brace.
    pub fn capture_block(&self, anchor: &str) -> Result<String, ScanError> {
        let pipeline = ScanState::anchor(anchor, ScanState::block('{', '}', ScanState::hold()));
        match pipeline.run(self.source) {
            ScanState::HoldValue(Some(captured)) => Ok(captured),
            ScanState::NameAnchor { .. } => Err(ScanError::AnchorNotFound(anchor.to_string())),
            _ => Err(ScanError::UnclosedBlock(anchor.to_string())),
        }
    }

    /// The top-level names declared in the block after `anchor`, in
    /// source order.
    pub fn extract_ordered_names(&self, anchor: &str) -> Result<Vec<String>, ScanError> {
        let block = self.capture_block(anchor)?;
        let names = split_names(&block)?;
        tracing::debug!(anchor, count = names.len(), "extracted names");
        Ok(names)
    }
}

/// Splits a captured block into bare top-level names.
///
/// Payload blocks and comments are skipped; a final name without a
/// trailing comma is kept when non-empty.
pub fn split_names(block: &str) -> Result<Vec<String>, ScanError> {
    match ScanState::names().run(block) {
        ScanState::NameExtraction { mut names, current } => {
            if !current.is_empty() {
                names.push(current);
            }
            Ok(names)
        }
        other => Err(ScanError::UnterminatedNames(other.label())),
    }
}
