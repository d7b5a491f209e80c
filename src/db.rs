use anyhow::{Context, Result};
use rusqlite::{params, types::ValueRef, Connection};

use crate::transform::EnrichedBank;

pub const DB_PATH: &str = "Banks.db";
pub const TABLE_NAME: &str = "Largest_banks";

pub fn connect(path: &str) -> Result<Connection> {
    Connection::open(path).with_context(|| format!("failed to open {}", path))
}

pub fn create_table(conn: &Connection) -> Result<()> {
    conn.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {} (
                Name           TEXT,
                MC_USD_Billion REAL,
                MC_GBP_Billion REAL,
                MC_EUR_Billion REAL,
                MC_INR_Billion REAL
            )",
            TABLE_NAME
        ),
        [],
    )?;
    Ok(())
}

/// Append the record set as new rows. Strictly additive: running the
/// pipeline twice doubles the row count, accumulating history.
pub fn append_banks(conn: &Connection, records: &[EnrichedBank]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {}
             (Name, MC_USD_Billion, MC_GBP_Billion, MC_EUR_Billion, MC_INR_Billion)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            TABLE_NAME
        ))?;
        for r in records {
            count += stmt.execute(params![
                r.name,
                r.mc_usd_billion,
                r.mc_gbp_billion,
                r.mc_eur_billion,
                r.mc_inr_billion,
            ])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

/// Execute a read query, materialize the result set, and print it as a
/// compact aligned table on stdout.
pub fn run_query(conn: &Connection, sql: &str) -> Result<()> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

    let mut table: Vec<Vec<String>> = Vec::new();
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let mut cells = Vec::with_capacity(columns.len());
        for i in 0..columns.len() {
            cells.push(render_value(row.get_ref(i)?));
        }
        table.push(cells);
    }

    let mut widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();
    for row in &table {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    println!("{}", sql);
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:<width$}", c, width = w))
        .collect();
    let header = header.join(" | ");
    println!("{}", header);
    println!("{}", "-".repeat(header.len()));
    for row in &table {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = w))
            .collect();
        println!("{}", line.join(" | "));
    }
    println!("({} rows)\n", table.len());
    Ok(())
}

fn render_value(value: ValueRef) -> String {
    match value {
        ValueRef::Null => "-".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

// ── Tests ──
