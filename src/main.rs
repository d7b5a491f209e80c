//! Largest-banks ETL: scrape the archived market-cap table, derive
//! GBP/EUR/INR columns at fixed rates, write CSV + SQLite, run the
//! three read-back queries. Strictly sequential, one pass per run.

mod csv_sink;
mod db;
mod extract;
mod fetch;
mod progress_log;
mod transform;

use std::path::Path;

use anyhow::Result;
use tracing::info;

use progress_log::log_progress;

const DATA_URL: &str =
    "https://web.archive.org/web/20230908091635/https://en.wikipedia.org/wiki/List_of_largest_banks";
const OUTPUT_CSV_PATH: &str = "./Largest_banks_data.csv";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();

    println!("Largest Banks ETL");
    println!("=================\n");

    run_pipeline()
}

fn run_pipeline() -> Result<()> {
    log_progress("Starting data extraction...")?;
    let html = fetch::fetch_page(DATA_URL)?;
    let banks = extract::extract_banks(&html)?;
    info!("extracted {} bank rows", banks.len());
    log_progress("Data extraction completed.")?;

    log_progress("Starting data transformation...")?;
    let enriched = transform::transform(banks);
    log_progress("Data transformation completed.")?;

    log_progress("Saving data to CSV...")?;
    csv_sink::write_csv(&enriched, Path::new(OUTPUT_CSV_PATH))?;
    log_progress("Data saved to CSV.")?;

    log_progress("Loading data to database...")?;
    // Connection is owned by this scope; dropped (and so closed) on every
    // exit path, including early returns from the queries below.
    let conn = db::connect(db::DB_PATH)?;
    db::create_table(&conn)?;
    let appended = db::append_banks(&conn, &enriched)?;
    info!("appended {} rows to {}", appended, db::TABLE_NAME);
    log_progress("Data loaded to database.")?;

    log_progress("Running queries...")?;
    for sql in [
        format!("SELECT * FROM {}", db::TABLE_NAME),
        format!("SELECT AVG(MC_GBP_Billion) FROM {}", db::TABLE_NAME),
        format!("SELECT Name FROM {} LIMIT 5", db::TABLE_NAME),
    ] {
        db::run_query(&conn, &sql)?;
        log_progress(&format!("Query executed: {}", sql))?;
    }
    log_progress("Queries executed successfully.")?;

    Ok(())
}
