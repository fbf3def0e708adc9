use serde::Serialize;

use octaglyph_tables::{registry, Cell, SymbolTable, TableId, CELL_COUNT, GRID_SIDE};

use crate::cmd::TablesArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{new_table, print_json, schema_id, OutputFormat};

#[derive(Serialize)]
struct TableSummary {
    table: TableId,
    octave: u8,
    watchtower: &'static str,
    cells: usize,
}

#[derive(Serialize)]
struct TablesOutput {
    schema_id: String,
    grid_side: usize,
    tables: Vec<TableSummary>,
}

#[derive(Serialize)]
struct TableOutput<'a> {
    schema_id: String,
    table: TableId,
    octave: u8,
    watchtower: &'static str,
    cells: &'a [Cell],
}

pub fn run(args: TablesArgs, format: OutputFormat) -> CliResult<i32> {
    match args.table {
        Some(id) => print_grid(registry().table(id), format),
        None => print_summary(format),
    }
    Ok(SUCCESS)
}

fn print_summary(format: OutputFormat) {
    let tables: Vec<_> = registry()
        .tables()
        .map(|t| TableSummary {
            table: t.id(),
            octave: t.id().octave(),
            watchtower: t.id().watchtower(),
            cells: t.cells().len(),
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&TablesOutput {
            schema_id: schema_id("tables"),
            grid_side: GRID_SIDE,
            tables,
        }),
        OutputFormat::Table => {
            let mut table = new_table(["TABLE", "OCTAVE", "WATCHTOWER", "CELLS"]);
            for t in &tables {
                table.add_row(vec![
                    t.table.to_string(),
                    t.octave.to_string(),
                    t.watchtower.to_string(),
                    t.cells.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for t in &tables {
                println!(
                    "{} octave={} watchtower={} cells={}",
                    t.table, t.octave, t.watchtower, t.cells
                );
            }
        }
    }
}

fn print_grid(table: &SymbolTable, format: OutputFormat) {
    let id = table.id();
    match format {
        OutputFormat::Json => print_json(&TableOutput {
            schema_id: schema_id("table-cells"),
            table: id,
            octave: id.octave(),
            watchtower: id.watchtower(),
            cells: table.cells(),
        }),
        OutputFormat::Table => {
            let header =
                std::iter::once(String::new()).chain((0..GRID_SIDE).map(|c| c.to_string()));
            let mut grid = new_table(header);
            for (row, cells) in table.rows().enumerate() {
                grid.add_row(
                    std::iter::once(row.to_string())
                        .chain(cells.iter().map(|cell| cell.glyph.to_string())),
                );
            }
            println!("table {id} ({} watchtower, {CELL_COUNT} cells)", id.watchtower());
            println!("{grid}");
        }
        OutputFormat::Pretty => {
            println!("table {id} ({} watchtower)", id.watchtower());
            for (row, cells) in table.rows().enumerate() {
                let letters: Vec<_> = cells.iter().map(|c| c.glyph.to_string()).collect();
                println!("{row:>3}  {}", letters.join(" "));
            }
        }
        OutputFormat::Raw => {
            for cells in table.rows() {
                let letters: String = cells.iter().map(|c| c.glyph.letter()).collect();
                println!("{letters}");
            }
        }
    }
}
