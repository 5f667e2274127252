//! `csv-to-sql`: turn a catalog CSV into batched INSERT statements.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::info;

use crate::error::{IngestError, Result};
use crate::rows::{CatalogReader, CatalogRow, SeenRows};

const INSERT_PREFIX: &str =
    "INSERT INTO vehicle_catalog (year, make, model, trim, engine, transmission) VALUES";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConvertStats {
    pub written: usize,
    pub invalid: usize,
    pub duplicates: usize,
    pub statements: usize,
}

/// SQL string literal with `'` doubled.
pub fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn sql_optional(value: Option<&str>) -> String {
    value.map_or_else(|| "NULL".to_string(), sql_literal)
}

fn values_tuple(row: &CatalogRow) -> String {
    format!(
        "({}, {}, {}, {}, {}, {})",
        row.year,
        sql_literal(&row.make),
        sql_literal(&row.model),
        sql_optional(row.trim.as_deref()),
        sql_optional(row.engine.as_deref()),
        sql_optional(row.transmission.as_deref())
    )
}

fn write_batch<W: Write>(writer: &mut W, batch: &[CatalogRow]) -> Result<()> {
    let values: Vec<String> = batch.iter().map(values_tuple).collect();
    writeln!(writer, "{INSERT_PREFIX}\n  {};", values.join(",\n  "))?;
    Ok(())
}

/// Convert CSV from `reader` into SQL on `writer`, one statement per `batch_size` rows.
///
/// Each statement is written as soon as its batch fills.
pub fn convert<R: Read, W: Write>(reader: R, mut writer: W, batch_size: usize) -> Result<ConvertStats> {
    if batch_size == 0 {
        return Err(IngestError::InvalidArgs("batch size must be at least 1".into()));
    }

    let mut rows = CatalogReader::new(reader)?;
    let mut stats = ConvertStats::default();
    let mut seen = SeenRows::default();
    let mut batch = Vec::with_capacity(batch_size);

    while let Some(row) = rows.next_row()? {
        if !seen.insert(row.full_key()) {
            stats.duplicates += 1;
            continue;
        }
        batch.push(row);
        if batch.len() == batch_size {
            write_batch(&mut writer, &batch)?;
            stats.statements += 1;
            stats.written += batch.len();
            batch.clear();
        }
    }
    if !batch.is_empty() {
        write_batch(&mut writer, &batch)?;
        stats.statements += 1;
        stats.written += batch.len();
    }
    writer.flush()?;

    stats.invalid = rows.invalid();
    Ok(stats)
}

/// File-to-file wrapper around [`convert`].
pub fn run(input: &Path, output: &Path, batch_size: usize) -> Result<ConvertStats> {
    let source = File::open(input).map_err(|source| IngestError::Open {
        path: input.to_path_buf(),
        source,
    })?;
    let sink = File::create(output).map_err(|source| IngestError::Open {
        path: output.to_path_buf(),
        source,
    })?;

    let stats = convert(BufReader::new(source), BufWriter::new(sink), batch_size)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        written = stats.written,
        invalid = stats.invalid,
        duplicates = stats.duplicates,
        statements = stats.statements,
        "csv_to_sql=done"
    );
    Ok(stats)
}
