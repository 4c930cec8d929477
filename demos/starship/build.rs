//! Generates the starship codecs into `OUT_DIR`.
//!
//! The Rust module is compiled into this crate in both decoding flavors;
//! the TypeScript module and its lookup tables are embedded as strings for
//! the web client.

use std::env;
use std::path::{Path, PathBuf};

use wireforge::prelude::{Generator, RustFlavor};

#[path = "src/schema.rs"]
mod schema;

fn main() {
    println!("cargo:rerun-if-changed=src/schema.rs");
    println!("cargo:rerun-if-changed=codec_header.rs");
    println!("cargo:rerun-if-changed=codec_header_cursor.rs");
    println!("cargo:rerun-if-changed=codec_header.ts");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    let protocol = schema::protocol();

    let sources = generator(&manifest_dir, &out_dir, "codec_header.rs", RustFlavor::Async)
        .run(&protocol)
        .unwrap_or_else(|e| panic!("codec generation failed: {e}"));
    for warning in &sources.warnings {
        println!("cargo:warning=schema: {warning}");
    }

    // The cursor flavor is compiled alongside so both decoders are tested
    // against the same schema.
    let cursor = generator(
        &manifest_dir,
        &out_dir.join("cursor"),
        "codec_header_cursor.rs",
        RustFlavor::Cursor,
    )
    .run(&protocol)
    .unwrap_or_else(|e| panic!("cursor codec generation failed: {e}"));
    assert_eq!(
        cursor.mappings, sources.mappings,
        "lookup tables differ between decoding flavors"
    );
}

fn generator(manifest_dir: &Path, out_dir: &Path, rust_header: &str, flavor: RustFlavor) -> Generator {
    schema::mapping_targets()
        .into_iter()
        .fold(
            Generator::builder()
                .rust_path(out_dir.join("codec.rs"))
                .rust_header(manifest_dir.join(rust_header))
                .flavor(flavor)
                .typescript_path(out_dir.join("codec.ts"))
                .typescript_header(manifest_dir.join("codec_header.ts"))
                .mapping_path(out_dir.join("codec_mappings.js")),
            |builder, target| builder.mapping(target),
        )
        .build()
}
