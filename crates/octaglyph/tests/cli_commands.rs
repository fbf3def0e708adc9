#![cfg(feature = "cli")]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

const HELLO: &str = "OCTA13 40 0/G:BI0:Q 1/A:BM2:I 2/C:CU1:G 3/F:AB0:B";

fn octaglyph(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_octaglyph"))
        .args(["--log-level", "error"])
        .args(args)
        .output()
        .expect("octaglyph should run")
}

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "octaglyph-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn encode_hello_matches_reference_vector() {
    let output = octaglyph(&["--format", "raw", "encode", "--data", "HELLO"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim_end(), HELLO);
}

#[test]
fn encode_hex_matches_data() {
    let output = octaglyph(&["--format", "raw", "encode", "--hex", "48454c4c4f"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim_end(), HELLO);
}

#[test]
fn encode_json_carries_schema_and_triplets() {
    let output = octaglyph(&["--format", "json", "encode", "--data", "HELLO"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["schema_id"]
        .as_str()
        .unwrap()
        .ends_with("encode-result.schema.json"));
    assert_eq!(json["bit_len"], 40);
    assert_eq!(json["triplet_count"], 4);
    assert_eq!(json["stream"], HELLO);
}

#[test]
fn encode_reads_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_octaglyph"))
        .args(["--format", "raw", "encode"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("encode should start");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(b"HELLO")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim_end(), HELLO);
}

#[test]
fn decode_text_stream() {
    let output = octaglyph(&["--format", "raw", "decode", "--stream", HELLO]);
    assert!(output.status.success());
    assert_eq!(output.stdout, b"HELLO");
}

#[test]
fn decode_corrupted_stream_returns_60() {
    let corrupted = HELLO.replace("1/A:BM2:I", "1/A:BM2:M");
    let output = octaglyph(&["--format", "raw", "decode", "--stream", &corrupted]);

    assert_eq!(output.status.code(), Some(60));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("checksum mismatch"));
}

#[test]
fn decode_malformed_token_returns_60() {
    let output = octaglyph(&["decode", "--stream", "OCTA13 40 0/G:BK0:Q"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn binary_wire_roundtrip_through_files() {
    let dir = unique_temp_dir("wire");
    let wire = dir.join("hello.og");
    let plain = dir.join("hello.txt");

    let encoded = octaglyph(&[
        "encode",
        "--data",
        "HELLO",
        "--wire",
        "binary",
        "--out",
        wire.to_str().unwrap(),
    ]);
    assert!(encoded.status.success());
    let bytes = std::fs::read(&wire).unwrap();
    assert_eq!(&bytes[..2], b"OG");
    assert_eq!(bytes.len(), 14 + 4 * 9);

    let decoded = octaglyph(&[
        "decode",
        "--wire",
        "binary",
        "--file",
        wire.to_str().unwrap(),
        "--out",
        plain.to_str().unwrap(),
    ]);
    assert!(decoded.status.success());
    assert_eq!(std::fs::read(&plain).unwrap(), b"HELLO");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn binary_stream_inline_is_usage_error() {
    let output = octaglyph(&["decode", "--wire", "binary", "--stream", HELLO]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn input_over_limit_returns_60() {
    let output = octaglyph(&["encode", "--data", "HELLO", "--max-input", "2"]);
    assert_eq!(output.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&output.stderr).contains("input too large"));
}

#[test]
fn file_input_over_limit_returns_60() {
    let dir = unique_temp_dir("limit");
    let path = dir.join("big.bin");
    std::fs::write(&path, vec![0x41; 4096]).unwrap();

    let output = octaglyph(&[
        "encode",
        "--file",
        path.to_str().unwrap(),
        "--max-input",
        "16",
    ]);
    assert_eq!(output.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&output.stderr).contains("input too large"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn inspect_flags_corrupt_triplet() {
    let corrupted = HELLO.replace("1/A:BM2:I", "1/A:BM2:M");
    let output = octaglyph(&["--format", "json", "inspect", "--stream", &corrupted]);
    assert_eq!(output.status.code(), Some(60));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["triplets"][0]["status"], "ok");
    assert!(json["triplets"][1]["status"]
        .as_str()
        .unwrap()
        .contains("checksum mismatch"));
    assert!(json["size"].is_null());
}

#[test]
fn inspect_clean_stream_succeeds() {
    let output = octaglyph(&["--format", "json", "inspect", "--stream", HELLO]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["size"], 5);
    assert_eq!(json["triplets"][0]["solid"], "octahedron");
}

#[test]
fn tables_json_lists_cells() {
    let output = octaglyph(&["--format", "json", "tables", "--table", "B"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let cells = json["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 529);
    assert_eq!(cells[30]["glyph"], "Na");
    assert_eq!(json["watchtower"], "water");
}

#[test]
fn tables_raw_renders_grid() {
    let output = octaglyph(&["--format", "raw", "tables", "--table", "A"]);
    assert!(output.status.success());

    let text = stdout(&output);
    let rows: Vec<_> = text.lines().collect();
    assert_eq!(rows.len(), 23);
    assert!(rows.iter().all(|row| row.chars().count() == 23));
    assert!(rows[0].starts_with("BCGDFAEMIHLPQNXORZUSTBC"));
}

#[test]
fn lookup_raw_lists_indices() {
    let output = octaglyph(&["--format", "raw", "lookup", "B", "I"]);
    assert!(output.status.success());

    let indices: Vec<u16> = stdout(&output)
        .split_whitespace()
        .map(|s| s.parse().unwrap())
        .collect();
    assert_eq!(indices.len(), 25);
    assert_eq!(&indices[..3], &[8, 29, 50]);
}

#[test]
fn doctor_passes() {
    let output = octaglyph(&["--format", "json", "doctor"]);
    assert!(output.status.success());

    let stdout = stdout(&output);
    assert!(stdout.contains("doctor-report.schema.json"));
    assert!(stdout.contains("\"overall\":\"pass\""));
}

#[test]
fn envinfo_reports_version() {
    let output = octaglyph(&["--format", "json", "envinfo"]);
    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("envinfo.schema.json"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_prints_name() {
    let output = octaglyph(&["version"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim_end(),
        format!("octaglyph {}", env!("CARGO_PKG_VERSION"))
    );
}
