//! CSV output for the raw and processed tables.
//!
//! Both tables are projections of the same records through a column list:
//! the raw table uses [`RAW_COLUMNS`], the processed table
//! [`PROCESSED_COLUMNS`]. Values are written exactly as the record holds
//! them; formatting lives in [`Cell`](crate::record::Cell)'s `Display`.

use crate::error::Result;
use crate::record::{Column, ShipmentRecord, PROCESSED_COLUMNS, RAW_COLUMNS};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Bytes written per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub raw_bytes: u64,
    pub processed_bytes: u64,
}

/// Counts bytes passing through to the inner writer.
struct CountingWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// Write a header row and one row per record for the given columns.
pub fn write_table<W: Write>(out: &mut W, records: &[ShipmentRecord], columns: &[Column]) -> Result<()> {
    write_row(out, columns.iter().map(|c| c.header()))?;

    for record in records {
        write_row(out, columns.iter().map(|&c| record.cell(c)))?;
    }

    Ok(())
}

fn write_row<W, I, T>(out: &mut W, cells: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = T>,
    T: std::fmt::Display,
{
    for (i, cell) in cells.into_iter().enumerate() {
        if i > 0 {
            out.write_all(b",")?;
        }
        write!(out, "{}", cell)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Write one table to `path`, creating parent directories.
///
/// Returns the number of bytes written.
pub fn write_csv(path: &Path, records: &[ShipmentRecord], columns: &[Column]) -> Result<u64> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut out = CountingWriter {
        inner: BufWriter::new(File::create(path)?),
        written: 0,
    };
    write_table(&mut out, records, columns)?;
    out.flush()?;

    info!(
        path = %path.display(),
        rows = records.len(),
        columns = columns.len(),
        bytes = out.written,
        "wrote table"
    );
    Ok(out.written)
}

/// Write the raw and processed tables.
pub fn write_dataset(records: &[ShipmentRecord], raw_path: &Path, processed_path: &Path) -> Result<WriteSummary> {
    Ok(WriteSummary {
        raw_bytes: write_csv(raw_path, records, &RAW_COLUMNS)?,
        processed_bytes: write_csv(processed_path, records, &PROCESSED_COLUMNS)?,
    })
}
