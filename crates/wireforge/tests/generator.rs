//! End-to-end tests for a generation run.
//!
//! These check the properties no single crate can check on its own: the
//! lookup tables scanned from emitted Rust agree with the wire tags the
//! codecs use, for both decoding flavors and for the TypeScript backend.

use wireforge::codec::{MessageValue, Value, WireCodec};
use wireforge::prelude::*;
use wireforge::scan::SourceScanner;

// =========================================================================
// Helpers
// =========================================================================

fn schema() -> Schema {
    Schema::builder()
        .enumeration(Enum::new("PartKind", ["Core", "Cargo", "LandingThruster", "Hub"]))
        .enumeration(Enum::new("ThrustMode", ["Off", "Forward", "Backward"]))
        .category(
            Category::new("ToServerMsg")
                .message(
                    Message::new("Handshake")
                        .field("client", TypeDescriptor::STRING)
                        .field("session", TypeDescriptor::optional(TypeDescriptor::STRING))
                        .field("name", TypeDescriptor::STRING),
                )
                .message(Message::new("RequestUpdate"))
                .message(Message::new("SendChatMessage").field("msg", TypeDescriptor::STRING)),
        )
        .category(
            Category::new("ToClientMsg")
                .message(Message::new("HandshakeAccepted").field("id", TypeDescriptor::U16))
                .message(
                    Message::new("AddPart")
                        .field("id", TypeDescriptor::U16)
                        .field("kind", TypeDescriptor::enum_named("PartKind")),
                )
                .message(
                    Message::new("UpdatePartMeta")
                        .field("id", TypeDescriptor::U16)
                        .field("owning_player", TypeDescriptor::optional(TypeDescriptor::U16))
                        .field("thrust_mode", TypeDescriptor::enum_named("ThrustMode")),
                )
                .message(Message::new("RemovePart").field("id", TypeDescriptor::U16))
                .message(Message::new("PostSimulationTick").field("your_power", TypeDescriptor::U32)),
        )
        .build()
}

/// Any value that fits `ty`.
fn sample(schema: &Schema, ty: &TypeDescriptor) -> Value {
    match ty {
        TypeDescriptor::Primitive(Primitive::String) => "x".into(),
        TypeDescriptor::Primitive(Primitive::Float) => 1.5f32.into(),
        TypeDescriptor::Primitive(Primitive::U8) => 7u8.into(),
        TypeDescriptor::Primitive(Primitive::U16) => 700u16.into(),
        TypeDescriptor::Primitive(Primitive::U32) => 70_000u32.into(),
        TypeDescriptor::Primitive(Primitive::Bool) => true.into(),
        TypeDescriptor::Primitive(Primitive::FloatPair) => (1.0f32, -1.0f32).into(),
        TypeDescriptor::Optional(_) => Value::none(),
        TypeDescriptor::EnumRef(name) => {
            let declared = schema.enum_named(name).unwrap();
            Value::variant(declared.variant(0).unwrap())
        }
    }
}

fn sample_message(schema: &Schema, message: &Message) -> MessageValue {
    message
        .fields
        .iter()
        .fold(MessageValue::new(&message.name), |m, f| m.with(sample(schema, &f.ty)))
}

// =========================================================================
// Tag agreement
// =========================================================================

#[test]
fn test_scanned_order_matches_wire_tags_for_both_flavors() {
    let schema = schema();
    let codec = WireCodec::new(&schema);

    for flavor in [RustFlavor::Cursor, RustFlavor::Async] {
        let sources = Generator::builder().flavor(flavor).build().render(&schema).unwrap();
        let scanner = SourceScanner::new(&sources.rust);

        for category in schema.categories() {
            let names = scanner
                .extract_ordered_names(&format!("pub enum {} {{", category.name))
                .unwrap();
            assert_eq!(names.len(), category.messages.len());

            for (id, name) in names.iter().enumerate() {
                let message = category.message_named(name).unwrap();
                let bytes = codec
                    .encode_message(&category.name, &sample_message(&schema, message))
                    .unwrap();
                assert_eq!(bytes[0] as usize, id, "{flavor:?} {}::{name}", category.name);
            }
        }

        for declared in schema.enums() {
            let names = scanner
                .extract_ordered_names(&format!("pub enum {} {{", declared.name))
                .unwrap();
            for (index, name) in names.iter().enumerate() {
                assert_eq!(codec.encode_enum(&declared.name, name).unwrap() as usize, index);
            }
        }
    }
}

#[test]
fn test_typescript_ids_match_rust_tags() {
    let schema = schema();
    let sources = Generator::default().render(&schema).unwrap();

    for category in schema.categories() {
        for (tag, message) in category.tagged() {
            let class = format!("export class {} {{", message.name);
            let start = sources.typescript.find(&class).unwrap();
            let id_line = sources.typescript[start..].lines().nth(1).unwrap();
            assert_eq!(id_line.trim(), format!("static readonly id = {tag};"));
        }
    }
}

#[test]
fn test_reordering_messages_shifts_ids() {
    let reordered = Schema::builder()
        .category(
            Category::new("ToServerMsg")
                .message(Message::new("RequestUpdate"))
                .message(Message::new("Handshake").field("name", TypeDescriptor::STRING)),
        )
        .build();
    let sources = Generator::default().render(&reordered).unwrap();
    assert!(sources.mappings.contains("[ToServerMsg.RequestUpdate,0],[ToServerMsg.Handshake,1],"));
}

// =========================================================================
// Writing
// =========================================================================

#[test]
fn test_run_writes_all_three_files() {
    let dir = tempfile::tempdir().unwrap();
    let generator = Generator::builder()
        .output_dir(dir.path())
        .mapping(MappingTarget::for_declaration("ToClientMsg", "FromServer"))
        .mapping(MappingTarget::for_declaration("ToServerMsg", "ToServer"))
        .build();

    let sources = generator.run(&schema()).unwrap();

    let rust = std::fs::read_to_string(dir.path().join("codec.rs")).unwrap();
    let typescript = std::fs::read_to_string(dir.path().join("codec.ts")).unwrap();
    let mappings = std::fs::read_to_string(dir.path().join("codec_mappings.js")).unwrap();
    assert_eq!(rust, sources.rust);
    assert_eq!(typescript, sources.typescript);
    assert_eq!(mappings, sources.mappings);

    assert!(mappings.contains(
        "export const FromServer = { HandshakeAccepted:{},AddPart:{},UpdatePartMeta:{},RemovePart:{},PostSimulationTick:{}, };"
    ));
    assert!(mappings.contains("ToServer.from_id = new Map([ [0,ToServer.Handshake],[1,ToServer.RequestUpdate],[2,ToServer.SendChatMessage], ]);"));
}

#[test]
fn test_missing_anchor_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let generator = Generator::builder()
        .output_dir(dir.path())
        .mapping(MappingTarget::for_declaration("FromClientMsg", "ToServer"))
        .build();

    let err = generator.run(&schema()).unwrap_err();
    assert!(matches!(
        err,
        GeneratorError::Scan(wireforge::scan::ScanError::AnchorNotFound(_))
    ));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_oversized_declarations_write_nothing() {
    let flood = (0..257).fold(Category::new("Flood"), |c, i| c.message(Message::new(format!("M{i}"))));
    let wide = Enum::new("Wide", (0..300).map(|i| format!("V{i}")));

    for schema in [
        Schema::builder().category(flood).build(),
        Schema::builder()
            .enumeration(wide)
            .category(Category::new("Ok").message(Message::new("Ping")))
            .build(),
    ] {
        let dir = tempfile::tempdir().unwrap();
        let err = Generator::builder().output_dir(dir.path()).build().run(&schema).unwrap_err();
        assert!(matches!(err, GeneratorError::TagOverflow { .. }), "{err}");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

#[test]
fn test_rerun_leaves_no_temporaries() {
    let dir = tempfile::tempdir().unwrap();
    let generator = Generator::builder().output_dir(dir.path().join("out")).build();

    generator.run(&schema()).unwrap();
    generator.run(&schema()).unwrap();

    let mut names: Vec<String> = std::fs::read_dir(dir.path().join("out"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, ["codec.rs", "codec.ts", "codec_mappings.js"]);
}

#[test]
fn test_headers_are_spliced_before_body() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("header.rs"), "use futures_util::stream::{Stream, StreamExt};").unwrap();
    std::fs::write(dir.path().join("header.ts"), "export class Box<T> { constructor(public v: T) {} }\n").unwrap();

    let sources = Generator::builder()
        .output_dir(dir.path())
        .rust_header("header.rs")
        .typescript_header("header.ts")
        .build()
        .render(&schema())
        .unwrap();

    let header_at = sources.rust.find("use futures_util").unwrap();
    let body_at = sources.rust.find("pub enum PartKind {").unwrap();
    assert!(header_at < body_at);
    assert!(sources.typescript.contains("export class Box<T>"));
}

#[test]
fn test_mappings_from_file_match_generated() {
    let dir = tempfile::tempdir().unwrap();
    let generator = Generator::builder()
        .output_dir(dir.path())
        .mapping(MappingTarget::for_declaration("ToServerMsg", "ToServer"))
        .build();
    let sources = generator.run(&schema()).unwrap();

    let rebuilt = generator
        .render_mappings_from_file(&dir.path().join("codec.rs"))
        .unwrap();
    assert_eq!(rebuilt, sources.mappings);
}
