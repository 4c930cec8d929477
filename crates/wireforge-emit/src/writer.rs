//! Indentation-aware line buffer used by the emitters.

const INDENT: &str = "    ";

#[derive(Debug, Default)]
pub(crate) struct SourceWriter {
    out: String,
    depth: usize,
}

impl SourceWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    /// Writes `text` and indents the lines that follow.
    pub(crate) fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.depth += 1;
    }

    /// Dedents, then writes `text`.
    pub(crate) fn close(&mut self, text: impl AsRef<str>) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    pub(crate) fn blank(&mut self) {
        self.out.push('\n');
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_close_indent() {
        let mut w = SourceWriter::new();
        w.open("fn f() {");
        w.line("g();");
        w.close("}");
        assert_eq!(w.finish(), "fn f() {\n    g();\n}\n");
    }

    #[test]
    fn test_close_never_underflows() {
        let mut w = SourceWriter::new();
        w.close("}");
        assert_eq!(w.finish(), "}\n");
    }
}
