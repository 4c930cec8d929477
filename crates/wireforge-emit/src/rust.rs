//! Backend A: Rust.
//!
//! For a category the emitted code looks like this (async flavor):
//!
//! ```text
//! #[derive(Debug, Clone, PartialEq)]
//! pub enum ToServerMsg {
//!     Handshake { client: String, session: Option<String> },
//!     RequestUpdate,
//! }
//!
//! impl ToServerMsg {
//!     pub fn serialize(&self, out: &mut Vec<u8>) { .. }
//!     pub async fn deserialize<S: Stream<Item = u8> + Unpin>(buf: &mut S) -> Result<Self, ()> { .. }
//! }
//! ```
//!
//! The `enum` bodies are also what the mapping pass scans to recover
//! message order, so they never contain comments and list one variant per
//! line in tag order.

use serde::{Deserialize, Serialize};
use wireforge_schema::{Category, Enum, Message, Primitive, Schema, TypeDescriptor};

use crate::writer::SourceWriter;
use crate::Emitter;

/// How generated `deserialize` routines obtain their bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RustFlavor {
    /// `deserialize(buf: &[u8], index: &mut usize)`. Every read is bounds
    /// checked and a short buffer is an `Err(())`.
    Cursor,

    /// `async fn deserialize(buf: &mut S)` over a `Stream<Item = u8>`.
    /// Each field read is awaited in declaration order and a stream that
    /// ends early is an `Err(())`.
    #[default]
    Async,
}

/// Emits backend-A Rust source.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustEmitter {
    flavor: RustFlavor,
}

impl RustEmitter {
    pub fn new(flavor: RustFlavor) -> Self {
        Self { flavor }
    }

    pub fn flavor(&self) -> RustFlavor {
        self.flavor
    }

    // -----------------------------------------------------------------------
    // Type fragments
    // -----------------------------------------------------------------------

    /// The Rust type of a field.
    pub fn signature(ty: &TypeDescriptor) -> String {
        match ty {
            TypeDescriptor::Primitive(kind) => primitive_signature(*kind).to_string(),
            TypeDescriptor::Optional(inner) => format!("Option<{}>", Self::signature(inner)),
            TypeDescriptor::EnumRef(name) => name.clone(),
        }
    }

    /// A statement appending the encoding of `expr` (a reference) to `out`.
    pub fn serialize(ty: &TypeDescriptor, expr: &str) -> String {
        match ty {
            TypeDescriptor::Primitive(kind) => {
                format!("type_{}_serialize(out, {expr});", primitive_routine(*kind))
            }
            TypeDescriptor::Optional(inner) => format!(
                "if let Some(tmp) = {expr} {{ out.push(1); {} }} else {{ out.push(0); }}",
                Self::serialize(inner, "tmp")
            ),
            TypeDescriptor::EnumRef(_) => format!("{expr}.serialize(out);"),
        }
    }

    /// An expression decoding one value, propagating failure with `?`.
    pub fn deserialize_expr(&self, ty: &TypeDescriptor) -> String {
        match (self.flavor, ty) {
            (RustFlavor::Cursor, TypeDescriptor::Primitive(kind)) => {
                format!("type_{}_deserialize(buf, index)?", primitive_routine(*kind))
            }
            (RustFlavor::Async, TypeDescriptor::Primitive(kind)) => {
                format!("type_{}_deserialize(buf).await?", primitive_routine(*kind))
            }
            (RustFlavor::Cursor, TypeDescriptor::EnumRef(name)) => {
                format!("{name}::deserialize(buf, index)?")
            }
            (RustFlavor::Async, TypeDescriptor::EnumRef(name)) => {
                format!("{name}::deserialize(buf).await?")
            }
            (RustFlavor::Cursor, TypeDescriptor::Optional(inner)) => format!(
                "{{ let present = *buf.get(*index).ok_or(())? > 0; *index += 1; if present {{ Some({}) }} else {{ None }} }}",
                self.deserialize_expr(inner)
            ),
            (RustFlavor::Async, TypeDescriptor::Optional(inner)) => format!(
                "if buf.next().await.ok_or(())? > 0 {{ Some({}) }} else {{ None }}",
                self.deserialize_expr(inner)
            ),
        }
    }

    /// A `let` statement decoding one value into `target`.
    pub fn deserialize(&self, ty: &TypeDescriptor, target: &str) -> String {
        format!("let {target} = {};", self.deserialize_expr(ty))
    }

    fn deserialize_signature(&self) -> &'static str {
        match self.flavor {
            RustFlavor::Cursor => "pub fn deserialize(buf: &[u8], index: &mut usize) -> Result<Self, ()> {",
            RustFlavor::Async => {
                "pub async fn deserialize<S: Stream<Item = u8> + Unpin>(buf: &mut S) -> Result<Self, ()> {"
            }
        }
    }

    /// Statements leaving the next byte in `tag`.
    fn read_tag(&self, w: &mut SourceWriter) {
        match self.flavor {
            RustFlavor::Cursor => {
                w.line("let tag = *buf.get(*index).ok_or(())?;");
                w.line("*index += 1;");
            }
            RustFlavor::Async => w.line("let tag = buf.next().await.ok_or(())?;"),
        }
    }

    // -----------------------------------------------------------------------
    // Declarations
    // -----------------------------------------------------------------------

    fn emit_enum(&self, w: &mut SourceWriter, declared: &Enum) {
        w.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]");
        w.open(format!("pub enum {} {{", declared.name));
        for variant in &declared.variants {
            w.line(format!("{variant},"));
        }
        w.close("}");
        w.blank();

        w.open(format!("impl {} {{", declared.name));

        w.open("pub fn val_of(&self) -> u8 {");
        w.open("match self {");
        for (index, variant) in declared.variants.iter().enumerate() {
            w.line(format!("Self::{variant} => {index},"));
        }
        w.close("}");
        w.close("}");
        w.blank();

        w.open("pub fn serialize(&self, out: &mut Vec<u8>) {");
        w.line("out.push(self.val_of());");
        w.close("}");
        w.blank();

        w.open(self.deserialize_signature());
        self.read_tag(w);
        w.open("match tag {");
        for (index, variant) in declared.variants.iter().enumerate() {
            w.line(format!("{index} => Ok(Self::{variant}),"));
        }
        w.line("_ => Err(()),");
        w.close("}");
        w.close("}");

        w.close("}");
    }

    fn emit_category(&self, w: &mut SourceWriter, category: &Category) {
        w.line("#[derive(Debug, Clone, PartialEq)]");
        w.open(format!("pub enum {} {{", category.name));
        for message in &category.messages {
            w.line(variant_declaration(message));
        }
        w.close("}");
        w.blank();

        w.open(format!("impl {} {{", category.name));

        w.open("pub fn serialize(&self, out: &mut Vec<u8>) {");
        w.open("match self {");
        for (tag, message) in category.tagged() {
            w.open(format!("{} => {{", variant_pattern(message)));
            w.line(format!("out.push({tag});"));
            for field in &message.fields {
                w.line(Self::serialize(&field.ty, &field.name));
            }
            w.close("}");
        }
        w.close("}");
        w.close("}");
        w.blank();

        w.open(self.deserialize_signature());
        self.read_tag(w);
        w.open("match tag {");
        for (tag, message) in category.tagged() {
            if message.is_unit() {
                w.line(format!("{tag} => Ok(Self::{}),", message.name));
                continue;
            }
            // One statement per field, in order: fields are variable-length
            // so nothing can be decoded ahead of its predecessor.
            w.open(format!("{tag} => {{"));
            for field in &message.fields {
                w.line(self.deserialize(&field.ty, &field.name));
            }
            w.line(format!("Ok({})", variant_pattern(message)));
            w.close("}");
        }
        w.line("_ => Err(()),");
        w.close("}");
        w.close("}");

        w.close("}");
    }
}

impl Emitter for RustEmitter {
    fn backend(&self) -> &'static str {
        "rust"
    }

    fn emit(&self, schema: &Schema) -> String {
        let mut w = SourceWriter::new();
        for declared in schema.enums() {
            w.blank();
            self.emit_enum(&mut w, declared);
            tracing::debug!(backend = "rust", name = %declared.name, variants = declared.len(), "emitted enum");
        }
        for category in schema.categories() {
            w.blank();
            self.emit_category(&mut w, category);
            tracing::debug!(
                backend = "rust",
                name = %category.name,
                messages = category.messages.len(),
                "emitted category"
            );
        }
        w.finish()
    }
}

fn primitive_signature(kind: Primitive) -> &'static str {
    match kind {
        Primitive::String => "String",
        Primitive::Float => "f32",
        Primitive::U8 => "u8",
        Primitive::U16 => "u16",
        Primitive::U32 => "u32",
        Primitive::Bool => "bool",
        Primitive::FloatPair => "(f32, f32)",
    }
}

fn primitive_routine(kind: Primitive) -> &'static str {
    match kind {
        Primitive::String => "string",
        Primitive::Float => "float",
        Primitive::U8 => "u8",
        Primitive::U16 => "u16",
        Primitive::U32 => "u32",
        Primitive::Bool => "bool",
        Primitive::FloatPair => "float_pair",
    }
}

/// `Name { a: T, b: U },` or `Name,`
fn variant_declaration(message: &Message) -> String {
    if message.is_unit() {
        return format!("{},", message.name);
    }
    let fields: Vec<String> = message
        .fields
        .iter()
        .map(|f| format!("{}: {}", f.name, RustEmitter::signature(&f.ty)))
        .collect();
    format!("{} {{ {} }},", message.name, fields.join(", "))
}

/// `Self::Name { a, b }` or `Self::Name`, usable as pattern and constructor.
fn variant_pattern(message: &Message) -> String {
    if message.is_unit() {
        return format!("Self::{}", message.name);
    }
    let names: Vec<&str> = message.fields.iter().map(|f| f.name.as_str()).collect();
    format!("Self::{} {{ {} }}", message.name, names.join(", "))
}
