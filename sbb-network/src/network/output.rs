//! CSV export of the network table.
//!
//! Columns are a leading unnamed row index followed by
//! `from,arrival,departure,lat,lon,to`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use super::edges::NetworkTable;

/// Header row. The first column is the row index.
pub const HEADER: [&str; 7] = ["", "from", "arrival", "departure", "lat", "lon", "to"];

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write the table as CSV to `writer`.
pub fn write_table<W: Write>(table: &NetworkTable, writer: W) -> Result<(), OutputError> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv.write_record(HEADER)?;
    for (index, edge) in table.iter().enumerate() {
        csv.serialize((
            index,
            &edge.from,
            &edge.arrival,
            &edge.departure,
            edge.lat,
            edge.lon,
            &edge.to,
        ))?;
    }
    csv.flush()?;

    Ok(())
}

/// Write the table to a CSV file, replacing any existing file.
pub fn write_csv(table: &NetworkTable, path: impl AsRef<Path>) -> Result<(), OutputError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_table(table, BufWriter::new(file))?;

    info!(path = %path.display(), rows = table.len(), "wrote network table");
    Ok(())
}
