//! Runs the generated TypeScript codec against bytes from the Rust codec.
//!
//! The driver decodes every sample message with the TypeScript decoder,
//! re-encodes it and prints the bytes back as hex. Needs `node` plus
//! either `tsc` or a node that can run TypeScript directly; the test is
//! skipped when neither is on the path.

mod common;

use std::path::Path;
use std::process::{Command, Output};

use common::{encode_client, encode_server, from_hex, to_client_samples, to_hex, to_server_samples};
use starship::{cursor, TYPESCRIPT_CODEC};

// =========================================================================
// Helpers
// =========================================================================

fn succeeds(program: &str, args: &[&str]) -> bool {
    Command::new(program)
        .args(args)
        .output()
        .is_ok_and(|output| output.status.success())
}

fn check(output: Output, what: &str) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    assert!(
        output.status.success(),
        "{what} failed:\n{stdout}\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    stdout
}

/// Compiles or directly runs `source`, returning the driver's stdout.
/// `None` when no TypeScript toolchain is available.
fn run_typescript(dir: &Path, source: &str) -> Option<String> {
    if succeeds("tsc", &["--version"]) {
        let ts = dir.join("driver.ts");
        std::fs::write(&ts, source).unwrap();
        let compiled = Command::new("tsc")
            .args(["--target", "es2020", "--module", "commonjs", "--outDir"])
            .arg(dir)
            .arg(&ts)
            .output()
            .unwrap();
        check(compiled, "tsc");
        let ran = Command::new("node").arg(dir.join("driver.js")).output().unwrap();
        return Some(check(ran, "node"));
    }
    if succeeds("node", &["--experimental-transform-types", "--eval", ""]) {
        let ts = dir.join("driver.mts");
        std::fs::write(&ts, source).unwrap();
        let ran = Command::new("node")
            .args(["--experimental-transform-types", "--no-warnings"])
            .arg(&ts)
            .output()
            .unwrap();
        return Some(check(ran, "node"));
    }
    None
}

fn driver(cases: &[(&str, Vec<u8>)]) -> String {
    let mut source = String::from(TYPESCRIPT_CODEC);
    source.push_str("\nconst cases: [string, string][] = [\n");
    for (category, bytes) in cases {
        source.push_str(&format!("    [\"{category}\", \"{}\"],\n", to_hex(bytes)));
    }
    source.push_str(
        r#"];

function fromHex(hex: string): Uint8Array {
    const bytes = new Uint8Array(hex.length / 2);
    for (let i = 0; i < bytes.length; i++) bytes[i] = parseInt(hex.substr(i * 2, 2), 16);
    return bytes;
}

function toHex(bytes: Uint8Array): string {
    let hex = "";
    for (const byte of bytes) hex += byte.toString(16).padStart(2, "0");
    return hex;
}

for (const [category, hex] of cases) {
    const bytes = fromHex(hex);
    const index = new Box(0);
    const msg = category === "ToServerMsg"
        ? ToServerMsg.deserialize(bytes, index)
        : ToClientMsg.deserialize(bytes, index);
    if (index.v !== bytes.length) throw new Error(category + " consumed " + index.v + " of " + bytes.length);
    console.log(toHex(msg.serialize()));
}

for (const [label, decode, bytes] of [
    ["unknown-server-tag", ToServerMsg.deserialize, [8]],
    ["unknown-client-tag", ToClientMsg.deserialize, [16]],
    ["part-kind-out-of-range", ToClientMsg.deserialize, [2, 0, 1, 11]],
] as [string, (buf: Uint8Array, index: Box<number>) => unknown, number[]][]) {
    let threw = false;
    try { decode(new Uint8Array(bytes), new Box(0)); } catch { threw = true; }
    console.log(label + " " + (threw ? "rejected" : "accepted"));
}
"#,
    );
    source
}

// =========================================================================
// Cross-backend agreement
// =========================================================================

#[test]
fn test_typescript_decodes_and_reencodes_every_message() {
    let cases: Vec<(&str, Vec<u8>)> = to_server_samples()
        .iter()
        .map(|m| ("ToServerMsg", encode_server(m)))
        .chain(to_client_samples().iter().map(|m| ("ToClientMsg", encode_client(m))))
        .collect();

    let dir = tempfile::tempdir().unwrap();
    let Some(stdout) = run_typescript(dir.path(), &driver(&cases)) else {
        eprintln!("skipping: no TypeScript toolchain (tsc or node --experimental-transform-types)");
        return;
    };
    let mut lines = stdout.lines();

    for (category, bytes) in &cases {
        let reencoded = from_hex(lines.next().unwrap());
        assert_eq!(&reencoded, bytes, "{category} tag {}", bytes[0]);

        // Bytes written by the TypeScript encoder decode in Rust.
        let mut index = 0;
        let decoded = match *category {
            "ToServerMsg" => cursor::ToServerMsg::deserialize(&reencoded, &mut index).map(|m| format!("{m:?}")),
            _ => cursor::ToClientMsg::deserialize(&reencoded, &mut index).map(|m| format!("{m:?}")),
        };
        assert!(decoded.is_ok(), "{category} tag {}", bytes[0]);
        assert_eq!(index, reencoded.len());
    }

    assert_eq!(lines.next(), Some("unknown-server-tag rejected"));
    assert_eq!(lines.next(), Some("unknown-client-tag rejected"));
    assert_eq!(lines.next(), Some("part-kind-out-of-range rejected"));
}
