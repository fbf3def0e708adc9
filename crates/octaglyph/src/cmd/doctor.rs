use serde::Serialize;

use octaglyph_cipher::{compute, decode, encode, verify, ROTATION_STEP};
use octaglyph_frame::Packet;
use octaglyph_tables::{registry, CellAddress, Glyph, TableId, ALPHABET_LEN, CELL_COUNT};

use crate::cmd::DoctorArgs;
use crate::exit::{CliResult, SELF_CHECK_FAILED, SUCCESS};
use crate::output::{print_json, schema_id, OutputFormat};

const HELLO_VECTOR: &str = "OCTA13 40 0/G:BI0:Q 1/A:BM2:I 2/C:CU1:G 3/F:AB0:B";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Pass,
    Fail,
    Info,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    name: &'static str,
    status: CheckStatus,
    detail: String,
}

impl CheckResult {
    fn from_outcome(name: &'static str, outcome: Result<String, String>) -> Self {
        match outcome {
            Ok(detail) => Self {
                name,
                status: CheckStatus::Pass,
                detail,
            },
            Err(detail) => Self {
                name,
                status: CheckStatus::Fail,
                detail,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct DoctorOutput {
    schema_id: String,
    checks: Vec<CheckResult>,
    overall: &'static str,
}

pub fn run(_args: DoctorArgs, format: OutputFormat) -> CliResult<i32> {
    let checks = vec![
        CheckResult::from_outcome("alphabet", alphabet_check()),
        CheckResult::from_outcome("table_layout", table_layout_check()),
        CheckResult::from_outcome("reverse_lookup", reverse_lookup_check()),
        CheckResult::from_outcome("packet_roundtrip", packet_roundtrip_check()),
        CheckResult::from_outcome("rotation_step", rotation_step_check()),
        CheckResult::from_outcome("checksum_bit_flips", checksum_bit_flip_check()),
        CheckResult::from_outcome("reference_vector", reference_vector_check()),
        compiled_features_check(),
    ];

    let has_fail = checks.iter().any(|c| c.status == CheckStatus::Fail);
    let output = DoctorOutput {
        schema_id: schema_id("doctor-report"),
        checks,
        overall: if has_fail { "fail" } else { "pass" },
    };

    print_doctor(&output, format);

    if has_fail {
        Ok(SELF_CHECK_FAILED)
    } else {
        Ok(SUCCESS)
    }
}

fn print_doctor(output: &DoctorOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(output),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("octaglyph doctor\n");
            for c in &output.checks {
                println!(
                    "  [{:>4}] {:<20} {}",
                    status_text(c.status),
                    c.name,
                    c.detail
                );
            }
            if output.overall == "pass" {
                println!("\n  Result: all checks passed");
            } else {
                println!("\n  Result: one or more checks failed");
            }
        }
        OutputFormat::Raw => println!("{}", output.overall),
    }
}

fn status_text(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "PASS",
        CheckStatus::Fail => "FAIL",
        CheckStatus::Info => "INFO",
    }
}

fn alphabet_check() -> Result<String, String> {
    let mut letters: Vec<char> = Glyph::ALL.iter().map(|g| g.letter()).collect();
    letters.sort_unstable();
    letters.dedup();
    if letters.len() != ALPHABET_LEN {
        return Err(format!(
            "{} distinct letters, expected {ALPHABET_LEN}",
            letters.len()
        ));
    }
    Ok(format!("{ALPHABET_LEN} glyphs, letters distinct"))
}

fn table_layout_check() -> Result<String, String> {
    for table in registry().tables() {
        if table.cells().len() != CELL_COUNT {
            return Err(format!("table {} has {} cells", table.id(), table.cells().len()));
        }
        for (index, cell) in table.cells().iter().enumerate() {
            if cell.glyph != Glyph::ALL[index % ALPHABET_LEN] || cell.index as usize != index {
                return Err(format!("table {} cell {index} is out of place", table.id()));
            }
        }
    }
    Ok(format!("4 tables × {CELL_COUNT} cells"))
}

fn reverse_lookup_check() -> Result<String, String> {
    for table in TableId::ALL {
        let total: usize = Glyph::ALL
            .iter()
            .map(|glyph| registry().reverse_lookup(table, *glyph).len())
            .sum();
        if total != CELL_COUNT {
            return Err(format!("table {table} partitions {total} cells"));
        }
    }
    Ok("every cell belongs to exactly one glyph set".to_string())
}

fn packet_roundtrip_check() -> Result<String, String> {
    let mut valid = 0usize;
    for raw in 0..(1u16 << 13) {
        if let Ok(packet) = Packet::from_raw(raw) {
            let (node, octave, payload) = packet.unpack();
            match Packet::pack(node, octave, payload as u16) {
                Ok(repacked) if repacked == packet => valid += 1,
                _ => return Err(format!("raw packet {raw:#06x} does not roundtrip")),
            }
        }
    }
    Ok(format!("{valid} valid packets roundtrip"))
}

fn rotation_step_check() -> Result<String, String> {
    let phi = (1.0 + 5f64.sqrt()) / 2.0;
    let step = (CELL_COUNT as f64 * phi).floor() as u64 % CELL_COUNT as u64;
    if step != ROTATION_STEP as u64 {
        return Err(format!("golden step {step} != {ROTATION_STEP}"));
    }
    Ok(format!("step {ROTATION_STEP}"))
}

fn checksum_bit_flip_check() -> Result<String, String> {
    let mut probes = 0usize;
    for table in TableId::ALL {
        for index in 0..CELL_COUNT as u16 {
            let address = CellAddress { table, index };
            let checksum = compute(address);
            for bit in 0..10 {
                let flipped = CellAddress {
                    table,
                    index: index ^ (1 << bit),
                };
                probes += 1;
                if verify(flipped, checksum) {
                    return Err(format!("flip of bit {bit} at {address} went undetected"));
                }
            }
        }
    }
    Ok(format!("{probes} single-bit flips detected"))
}

fn reference_vector_check() -> Result<String, String> {
    let stream = encode(b"HELLO");
    let text = stream.to_string();
    if text != HELLO_VECTOR {
        return Err(format!("HELLO encodes as {text:?}"));
    }
    match decode(&stream) {
        Ok(bytes) if bytes.as_ref() == b"HELLO" => Ok("HELLO encodes and decodes".to_string()),
        Ok(_) => Err("HELLO decodes to different bytes".to_string()),
        Err(err) => Err(format!("HELLO fails to decode: {err}")),
    }
}

fn compiled_features_check() -> CheckResult {
    let mut features = Vec::new();
    if cfg!(feature = "cli") {
        features.push("cli");
    }

    CheckResult {
        name: "compiled_features",
        status: CheckStatus::Info,
        detail: features.join(", "),
    }
}
