use serde::Serialize;
use tracing::warn;

use octaglyph_cipher::mapper::node_from_marker;
use octaglyph_cipher::{decode, decode_unit, Checksum, GlyphStream, GlyphTriplet};
use octaglyph_tables::{registry, Solid, TableId, GRID_SIDE};

use crate::cmd::input::read_stream;
use crate::cmd::InspectArgs;
use crate::exit::{CliResult, DATA_INVALID, SUCCESS};
use crate::output::{new_table, print_json, schema_id, OutputFormat};

#[derive(Debug, Serialize)]
struct TripletReport {
    seq: u32,
    token: String,
    node_type: Option<u8>,
    solid: Option<&'static str>,
    carry: Option<bool>,
    table: TableId,
    watchtower: &'static str,
    cell_index: Option<u16>,
    row: Option<usize>,
    col: Option<usize>,
    glyph: &'static str,
    rank: u8,
    checksum: Option<u8>,
    payload: Option<u8>,
    status: String,
}

#[derive(Debug, Serialize)]
struct InspectOutput {
    schema_id: String,
    bit_len: u64,
    triplet_count: usize,
    triplets: Vec<TripletReport>,
    frame: String,
    size: Option<usize>,
}

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    let stream = read_stream(&args.source)?;
    let output = inspect(&stream);
    let ok = output.size.is_some();

    print_inspect(&output, format);

    if ok {
        Ok(SUCCESS)
    } else {
        Ok(DATA_INVALID)
    }
}

fn inspect(stream: &GlyphStream) -> InspectOutput {
    let triplets: Vec<_> = stream.triplets.iter().map(report).collect();

    let (frame, size) = match decode(stream) {
        Ok(bytes) => ("ok".to_string(), Some(bytes.len())),
        Err(err) => {
            warn!(error = %err, "stream does not decode");
            (err.to_string(), None)
        }
    };

    InspectOutput {
        schema_id: schema_id("inspect-report"),
        bit_len: stream.bit_len,
        triplet_count: stream.len(),
        triplets,
        frame,
        size,
    }
}

fn report(triplet: &GlyphTriplet) -> TripletReport {
    let marker = node_from_marker(triplet.node);
    let address = registry()
        .resolve(triplet.cell.table, triplet.cell.glyph, triplet.cell.rank)
        .ok();
    let decoded = decode_unit(triplet);

    TripletReport {
        seq: triplet.seq,
        token: triplet.to_string(),
        node_type: marker.map(|(node, _)| node),
        solid: marker
            .and_then(|(node, _)| Solid::from_node_type(node))
            .map(Solid::name),
        carry: marker.map(|(_, carry)| carry),
        table: triplet.cell.table,
        watchtower: triplet.cell.table.watchtower(),
        cell_index: address.map(|a| a.index),
        row: address.map(|a| a.index as usize / GRID_SIDE),
        col: address.map(|a| a.index as usize % GRID_SIDE),
        glyph: triplet.cell.glyph.name(),
        rank: triplet.cell.rank,
        checksum: Checksum::from_glyph(triplet.checksum).map(Checksum::value),
        payload: decoded.as_ref().ok().map(|p| p.packet.payload()),
        status: match decoded {
            Ok(_) => "ok".to_string(),
            Err(err) => err.to_string(),
        },
    }
}

fn print_inspect(output: &InspectOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(output),
        OutputFormat::Table => {
            let mut table = new_table([
                "SEQ", "TOKEN", "SOLID", "TABLE", "ROW", "COL", "GLYPH", "SUM", "PAYLOAD", "STATUS",
            ]);
            for t in &output.triplets {
                table.add_row(vec![
                    t.seq.to_string(),
                    t.token.clone(),
                    opt(t.solid.map(|s| {
                        if t.carry == Some(true) {
                            format!("{s} (carry)")
                        } else {
                            s.to_string()
                        }
                    })),
                    format!("{} ({})", t.table, t.watchtower),
                    opt(t.row),
                    opt(t.col),
                    format!("{} #{}", t.glyph, t.rank),
                    opt(t.checksum),
                    opt(t.payload),
                    t.status.clone(),
                ]);
            }
            println!("{table}");
            println!("frame: {}", output.frame);
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for t in &output.triplets {
                println!(
                    "{:<16} node={} table={} cell={} glyph={} sum={} payload={} {}",
                    t.token,
                    opt(t.node_type),
                    t.table,
                    opt(t.cell_index),
                    t.glyph,
                    opt(t.checksum),
                    opt(t.payload),
                    t.status
                );
            }
            println!("frame: {}", output.frame);
        }
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
