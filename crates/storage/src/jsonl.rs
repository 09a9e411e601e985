//! JSON-lines import and export
//!
//! One [`Row`] per line, serialized with serde. Blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use logbook_core::{Error, Result, Row};
use tracing::debug;

use crate::memory::MemoryStore;

/// Parse rows from a JSON-lines reader.
pub fn read_rows<R: BufRead>(reader: R) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::row_source(format!("line {}: {}", index + 1, e)))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row: Row = serde_json::from_str(line)
            .map_err(|e| Error::row_source(format!("line {}: {}", index + 1, e)))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Write rows as JSON lines.
pub fn write_rows<W: Write>(mut writer: W, rows: &[Row]) -> Result<()> {
    for row in rows {
        let line = serde_json::to_string(row)?;
        writeln!(writer, "{}", line).map_err(|e| Error::row_source(e.to_string()))?;
    }
    writer.flush().map_err(|e| Error::row_source(e.to_string()))
}

/// Load a JSON-lines file into a new store.
pub fn load(path: impl AsRef<Path>) -> Result<MemoryStore> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::row_source(format!("cannot open {}: {}", path.display(), e)))?;
    let rows = read_rows(BufReader::new(file))?;
    debug!(rows = rows.len(), path = %path.display(), "loaded rows");
    Ok(MemoryStore::from_rows(rows))
}

/// Write every row of `store` to a JSON-lines file.
pub fn save(store: &MemoryStore, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| Error::row_source(format!("cannot create {}: {}", path.display(), e)))?;
    write_rows(BufWriter::new(file), &store.snapshot())
}
