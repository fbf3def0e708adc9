use serde::Serialize;

use octaglyph_tables::{registry, Glyph, Solid, SymbolTableRegistry, TableId};

use crate::cmd::LookupArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{new_table, print_json, schema_id, OutputFormat};

#[derive(Debug, Serialize)]
struct CellHit {
    index: u16,
    row: usize,
    col: usize,
    rank: u8,
    affinity: Solid,
}

#[derive(Debug, Serialize)]
struct LookupOutput {
    schema_id: String,
    table: TableId,
    glyph: Glyph,
    letter: char,
    count: usize,
    cells: Vec<CellHit>,
}

pub fn run(args: LookupArgs, format: OutputFormat) -> CliResult<i32> {
    let output = lookup(args.table, args.glyph);

    match format {
        OutputFormat::Json => print_json(&output),
        OutputFormat::Table => {
            let mut table = new_table(["INDEX", "ROW", "COL", "RANK", "AFFINITY"]);
            for hit in &output.cells {
                table.add_row(vec![
                    hit.index.to_string(),
                    hit.row.to_string(),
                    hit.col.to_string(),
                    hit.rank.to_string(),
                    hit.affinity.to_string(),
                ]);
            }
            println!(
                "{} ({}) in table {}: {} cells",
                output.glyph.name(),
                output.letter,
                output.table,
                output.count
            );
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for hit in &output.cells {
                println!(
                    "{}[{}] row={} col={} rank={} affinity={}",
                    output.table, hit.index, hit.row, hit.col, hit.rank, hit.affinity
                );
            }
        }
        OutputFormat::Raw => {
            let indices: Vec<_> = output.cells.iter().map(|h| h.index.to_string()).collect();
            println!("{}", indices.join(" "));
        }
    }

    Ok(SUCCESS)
}

fn lookup(table: TableId, glyph: Glyph) -> LookupOutput {
    let reg = registry();
    let cells: Vec<_> = reg
        .reverse_lookup(table, glyph)
        .into_iter()
        .filter_map(|index| reg.cell(table, index as usize).ok())
        .map(|cell| CellHit {
            index: cell.index,
            row: cell.row(),
            col: cell.col(),
            rank: SymbolTableRegistry::rank_of(cell.index),
            affinity: cell.affinity,
        })
        .collect();

    LookupOutput {
        schema_id: schema_id("lookup-result"),
        table,
        glyph,
        letter: glyph.letter(),
        count: cells.len(),
        cells,
    }
}
