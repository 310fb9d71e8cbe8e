//! Delimited-text I/O on the data file.
//!
//! Appends go straight to the end of the file. Anything that changes existing
//! rows (new columns, edits, deletions) rewrites the whole file through a
//! synced temp file and a rename.

use crate::errors::{AppError, AppResult};
use crate::models::Entry;
use crate::store::schema::Schema;
use crate::utils::fs::{atomic_write, sync_parent};
use csv::{ByteRecord, Reader, ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{info, warn};

/// Header plus rows, as read from disk.
#[derive(Debug, Clone)]
pub struct Table {
    pub schema: Schema,
    pub rows: Vec<StringRecord>,
}

impl Table {
    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        self.rows.iter().map(|r| self.schema.entry_from(r))
    }
}

/// Create `path` with the base header if it is missing or empty.
/// Returns `true` when the file was (re)created.
pub fn ensure_file(path: &Path) -> AppResult<bool> {
    match fs::metadata(path) {
        Ok(meta) if meta.len() > 0 => return Ok(false),
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let data = encode(&Schema::base(), &[])?;
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut f) => {
            f.write_all(&data)?;
            f.sync_all()?;
            sync_parent(path);
        }
        // a zero-length file: overwrite it in place
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => atomic_write(path, &data)?,
        Err(e) => return Err(e.into()),
    }

    info!(path = %path.display(), "created data file");
    Ok(true)
}

/// Text of a raw record; invalid UTF-8 becomes U+FFFD instead of failing the file.
fn decode(record: &ByteRecord) -> StringRecord {
    record.iter().map(String::from_utf8_lossy).collect()
}

fn header_of(path: &Path, rdr: &mut Reader<File>) -> AppResult<Schema> {
    let schema = Schema::from_header(&decode(rdr.byte_headers()?));
    if schema.is_empty() {
        return Err(AppError::MissingHeader(path.display().to_string()));
    }
    Ok(schema)
}

pub fn read_schema(path: &Path) -> AppResult<Schema> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    header_of(path, &mut rdr)
}

pub fn read_table(path: &Path) -> AppResult<Table> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let schema = header_of(path, &mut rdr)?;

    let mut rows = Vec::new();
    for (i, record) in rdr.byte_records().enumerate() {
        let record = record?;
        if std::str::from_utf8(record.as_slice()).is_err() {
            warn!(path = %path.display(), row = i, "row is not valid UTF-8, decoding lossily");
        }
        rows.push(decode(&record));
    }
    Ok(Table { schema, rows })
}

/// Rewrite the whole file; every row is normalised to the header width.
pub fn write_table(path: &Path, table: &Table) -> AppResult<()> {
    let rows: Vec<StringRecord> = table
        .rows
        .iter()
        .map(|r| table.schema.normalize(r))
        .collect();
    let data = encode(&table.schema, &rows)?;
    atomic_write(path, &data)
}

/// Append one already-shaped row.
pub fn append_row(path: &Path, row: &[String]) -> AppResult<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    wtr.write_record(row)?;
    let data = wtr.into_inner().map_err(|e| e.into_error())?;

    let mut f = OpenOptions::new().read(true).append(true).open(path)?;

    // a hand-edited file may lack the final newline
    let mut prefix: &[u8] = b"";
    if f.metadata()?.len() > 0 {
        let mut last = [0u8; 1];
        f.seek(SeekFrom::End(-1))?;
        f.read_exact(&mut last)?;
        if last[0] != b'\n' {
            prefix = b"\n";
        }
    }

    let mut buf = Vec::with_capacity(prefix.len() + data.len());
    buf.extend_from_slice(prefix);
    buf.extend_from_slice(&data);
    f.write_all(&buf)?;
    f.sync_data()?;
    Ok(())
}

/// Add `columns` to the header, backfilling every existing row with empty cells.
pub fn add_columns(path: &Path, columns: &[String]) -> AppResult<Schema> {
    let mut table = read_table(path)?;
    table.schema.extend(columns);
    write_table(path, &table)?;
    info!(path = %path.display(), columns = ?columns, "extended data file header");
    Ok(table.schema)
}

/// Append `entry`, growing the header first if the entry brings new columns.
pub fn append_entry(path: &Path, entry: &Entry) -> AppResult<()> {
    ensure_file(path)?;

    let mut schema = read_schema(path)?;
    let missing = schema.missing_for(entry);
    if !missing.is_empty() {
        schema = add_columns(path, &missing)?;
    }

    append_row(path, &schema.row_for(entry))
}

/// Serialize a header and rows into an in-memory buffer.
pub fn encode(schema: &Schema, rows: &[StringRecord]) -> AppResult<Vec<u8>> {
    let mut wtr = WriterBuilder::new().from_writer(Vec::new());
    wtr.write_record(&schema.header())?;
    for row in rows {
        wtr.write_record(row)?;
    }
    Ok(wtr.into_inner().map_err(|e| e.into_error())?)
}
