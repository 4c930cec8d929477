//! Backend B: TypeScript.
//!
//! Synchronous, in-memory decoding over a `Uint8Array` with a shared
//! `Box<number>` cursor (the `Box` class comes from the header). The byte
//! layout is identical to backend A, so bytes produced by either side
//! decode on the other.

use wireforge_schema::{Category, Enum, Message, Primitive, Schema, TypeDescriptor};

use crate::writer::SourceWriter;
use crate::Emitter;

/// Emits backend-B TypeScript source.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptEmitter;

impl TypeScriptEmitter {
    /// The TypeScript type of a field.
    pub fn signature(ty: &TypeDescriptor) -> String {
        match ty {
            TypeDescriptor::Primitive(kind) => primitive_signature(*kind).to_string(),
            TypeDescriptor::Optional(inner) => format!("{} | null", Self::signature(inner)),
            TypeDescriptor::EnumRef(name) => name.clone(),
        }
    }

    /// A statement appending the encoding of `expr` to `out`.
    pub fn serialize(ty: &TypeDescriptor, expr: &str) -> String {
        match ty {
            TypeDescriptor::Primitive(kind) => {
                format!("type_{}_serialize(out, {expr});", primitive_routine(*kind))
            }
            TypeDescriptor::Optional(inner) => format!(
                "if ({expr} === null) out.push(0); else {{ out.push(1); {} }}",
                Self::serialize(inner, expr)
            ),
            TypeDescriptor::EnumRef(name) => format!("{name}.serialize(out, {expr});"),
        }
    }

    /// Statements assigning the next decoded value to `target`, which the
    /// caller has already declared.
    pub fn deserialize(ty: &TypeDescriptor, target: &str) -> String {
        match ty {
            TypeDescriptor::Primitive(kind) => {
                format!("{target} = type_{}_deserialize(buf, index);", primitive_routine(*kind))
            }
            TypeDescriptor::Optional(inner) => format!(
                "if (buf[index.v++] > 0) {{ {} }} else {{ {target} = null; }}",
                Self::deserialize(inner, target)
            ),
            TypeDescriptor::EnumRef(name) => format!("{target} = {name}.deserialize(buf, index);"),
        }
    }

    fn emit_enum(&self, w: &mut SourceWriter, declared: &Enum) {
        w.open(format!("export enum {} {{", declared.name));
        for (index, variant) in declared.variants.iter().enumerate() {
            w.line(format!("{variant} = {index},"));
        }
        w.close("}");

        w.open(format!("export namespace {} {{", declared.name));
        w.open(format!("export function serialize(out: number[], value: {}) {{", declared.name));
        w.line("out.push(value);");
        w.close("}");
        w.open(format!(
            "export function deserialize(buf: Uint8Array, index: Box<number>): {} {{",
            declared.name
        ));
        w.line("const value = buf[index.v++];");
        w.line(format!(
            "if (value === undefined || value >= {}) throw new Error(\"Invalid {} index \" + value);",
            declared.len(),
            declared.name
        ));
        w.line(format!("return value as {};", declared.name));
        w.close("}");
        w.close("}");
    }

    fn emit_message(&self, w: &mut SourceWriter, tag: u8, message: &Message) {
        w.open(format!("export class {} {{", message.name));
        w.line(format!("static readonly id = {tag};"));
        for field in &message.fields {
            w.line(format!("{}: {};", field.name, Self::signature(&field.ty)));
        }

        let params: Vec<String> = message
            .fields
            .iter()
            .map(|f| format!("{}: {}", f.name, Self::signature(&f.ty)))
            .collect();
        w.open(format!("constructor({}) {{", params.join(", ")));
        for field in &message.fields {
            w.line(format!("this.{0} = {0};", field.name));
        }
        w.close("}");

        w.open("serialize(): Uint8Array {");
        w.line(format!("const out: number[] = [{}.id];", message.name));
        for field in &message.fields {
            w.line(Self::serialize(&field.ty, &format!("this.{}", field.name)));
        }
        w.line("return new Uint8Array(out);");
        w.close("}");
        w.close("}");
    }

    fn emit_category(&self, w: &mut SourceWriter, category: &Category) {
        w.open(format!("export namespace {} {{", category.name));
        for (tag, message) in category.tagged() {
            self.emit_message(w, tag, message);
        }

        let union: Vec<&str> = category.messages.iter().map(|m| m.name.as_str()).collect();
        w.open(format!(
            "export function deserialize(buf: Uint8Array, index: Box<number>): {} {{",
            union.join(" | ")
        ));
        w.line("const tag = buf[index.v++];");
        w.open("switch (tag) {");
        for (tag, message) in category.tagged() {
            w.open(format!("case {tag}: {{"));
            for field in &message.fields {
                w.line(format!("let {}: {};", field.name, Self::signature(&field.ty)));
                w.line(Self::deserialize(&field.ty, &field.name));
            }
            let args: Vec<&str> = message.fields.iter().map(|f| f.name.as_str()).collect();
            w.line(format!("return new {}({});", message.name, args.join(", ")));
            w.close("}");
        }
        w.line(format!(
            "default: throw new Error(\"Unrecognized {} tag \" + tag);",
            category.name
        ));
        w.close("}");
        w.close("}");
        w.close("}");
    }
}

impl Emitter for TypeScriptEmitter {
    fn backend(&self) -> &'static str {
        "typescript"
    }

    fn emit(&self, schema: &Schema) -> String {
        let mut w = SourceWriter::new();
        for declared in schema.enums() {
            w.blank();
            self.emit_enum(&mut w, declared);
        }
        for category in schema.categories() {
            w.blank();
            self.emit_category(&mut w, category);
            tracing::debug!(
                backend = "typescript",
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
        Primitive::String => "string",
        Primitive::Float | Primitive::U8 | Primitive::U16 | Primitive::U32 => "number",
        Primitive::Bool => "boolean",
        Primitive::FloatPair => "[number, number]",
    }
}

fn primitive_routine(kind: Primitive) -> &'static str {
    match kind {
        Primitive::String => "string",
        Primitive::Float => "float",
        Primitive::U8 => "ubyte",
        Primitive::U16 => "ushort",
        Primitive::U32 => "uint",
        Primitive::Bool => "boolean",
        Primitive::FloatPair => "float_pair",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signatures() {
        assert_eq!(TypeScriptEmitter::signature(&TypeDescriptor::U32), "number");
        assert_eq!(
            TypeScriptEmitter::signature(&TypeDescriptor::optional(TypeDescriptor::FLOAT_PAIR)),
            "[number, number] | null"
        );
    }

    #[test]
    fn test_optional_fragments() {
        let ty = TypeDescriptor::optional(TypeDescriptor::U16);
        assert_eq!(
            TypeScriptEmitter::serialize(&ty, "this.owner"),
            "if (this.owner === null) out.push(0); else { out.push(1); type_ushort_serialize(out, this.owner); }"
        );
        assert_eq!(
            TypeScriptEmitter::deserialize(&ty, "owner"),
            "if (buf[index.v++] > 0) { owner = type_ushort_deserialize(buf, index); } else { owner = null; }"
        );
    }

    #[test]
    fn test_enum_fragments() {
        let ty = TypeDescriptor::enum_named("PartKind");
        assert_eq!(
            TypeScriptEmitter::serialize(&ty, "this.kind"),
            "PartKind.serialize(out, this.kind);"
        );
        assert_eq!(
            TypeScriptEmitter::deserialize(&ty, "kind"),
            "kind = PartKind.deserialize(buf, index);"
        );
    }

    #[test]
    fn test_enum_golden() {
        let schema = Schema::builder()
            .enumeration(Enum::new("ThrustMode", ["None", "Forward"]))
            .build();
        let expected = r#"
export enum ThrustMode {
    None = 0,
    Forward = 1,
}
export namespace ThrustMode {
    export function serialize(out: number[], value: ThrustMode) {
        out.push(value);
    }
    export function deserialize(buf: Uint8Array, index: Box<number>): ThrustMode {
        const value = buf[index.v++];
        if (value === undefined || value >= 2) throw new Error("Invalid ThrustMode index " + value);
        return value as ThrustMode;
    }
}
"#;
        assert_eq!(TypeScriptEmitter.emit(&schema), expected);
    }

    #[test]
    fn test_category_golden() {
        let schema = Schema::builder()
            .category(
                Category::new("ToClientMsg")
                    .message(Message::new("HandshakeAccepted").field("id", TypeDescriptor::U16))
                    .message(Message::new("Pong")),
            )
            .build();
        let expected = r#"
export namespace ToClientMsg {
    export class HandshakeAccepted {
        static readonly id = 0;
        id: number;
        constructor(id: number) {
            this.id = id;
        }
        serialize(): Uint8Array {
            const out: number[] = [HandshakeAccepted.id];
            type_ushort_serialize(out, this.id);
            return new Uint8Array(out);
        }
    }
    export class Pong {
        static readonly id = 1;
        constructor() {
        }
        serialize(): Uint8Array {
            const out: number[] = [Pong.id];
            return new Uint8Array(out);
        }
    }
    export function deserialize(buf: Uint8Array, index: Box<number>): HandshakeAccepted | Pong {
        const tag = buf[index.v++];
        switch (tag) {
            case 0: {
                let id: number;
                id = type_ushort_deserialize(buf, index);
                return new HandshakeAccepted(id);
            }
            case 1: {
                return new Pong();
            }
            default: throw new Error("Unrecognized ToClientMsg tag " + tag);
        }
    }
}
"#;
        assert_eq!(TypeScriptEmitter.emit(&schema), expected);
    }
}
