use std::path::Path;

use anyhow::{Context, Result};

use crate::transform::EnrichedBank;

/// Write the full record set as CSV, header row included, overwriting
/// any existing file at `path`. Null fields serialize as empty.
pub fn write_csv(records: &[EnrichedBank], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {:?}", path))?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush().context("failed to flush CSV writer")?;
    Ok(())
}

// ── Tests ──
