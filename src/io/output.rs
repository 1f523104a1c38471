use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use thiserror::Error;
use tracing::debug;

use crate::models::{Cell, Table};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write CSV to {path:?}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Write `table` as CSV to `path`, creating missing parent directories.
///
/// An existing file is overwritten in place.
pub fn save_table(table: &Table, path: &Path) -> Result<(), TableError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating directory {}", parent.display());
            fs::create_dir_all(parent).map_err(|source| TableError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let file = fs::File::create(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_table(table, file).map_err(|source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

/// Serialize `table` as CSV into `writer`
///
/// The layout is that of an indexed data frame export: the header starts
/// with an empty index column name and each row with its 0-based position.
/// Text cells are always quoted, including empty and numeric-looking ones;
/// the index and number cells are written bare.
pub fn write_table<W: Write>(table: &Table, writer: W) -> csv::Result<()> {
    // quoting is decided per cell by `field`, so the writer must not add its own
    let mut csv = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    let header = std::iter::once(Cell::text("")).chain(table.columns.iter().map(Cell::text));
    csv.write_record(header.map(|cell| field(&cell)))?;

    for (index, row) in table.rows.iter().enumerate() {
        let index = Cell::Number(index.to_string());
        csv.write_record(std::iter::once(&index).chain(row).map(field))?;
    }
    csv.flush()?;

    Ok(())
}

fn field(cell: &Cell) -> String {
    match cell {
        Cell::Text(text) => format!("\"{}\"", text.replace('"', "\"\"")),
        Cell::Number(number) => number.clone(),
    }
}
