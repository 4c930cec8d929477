//! The emitter trait shared by every backend.

use wireforge_schema::Schema;

/// Renders a schema as the source text of one backend.
///
/// Emission cannot fail: every schema produces *some* output, and
/// malformed schemas (see [`Schema::lint`]) produce undefined output.
pub trait Emitter {
    /// Short backend name for logs, e.g. `"rust"`.
    fn backend(&self) -> &'static str;

    /// Renders the whole module body.
    fn emit(&self, schema: &Schema) -> String;
}
