//! Catalog rows and the CSV layout shared by both subcommands.

use std::collections::HashSet;
use std::io::Read;

use serde::Serialize;
use tracing::warn;

use crate::error::{IngestError, Result};

/// Column order of every CSV this tool writes.
pub const CSV_HEADER: [&str; 6] = ["year", "make", "model", "trim", "engine", "transmission"];

/// One `vehicle_catalog` row, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogRow {
    pub year: i32,
    pub make: String,
    pub model: String,
    pub trim: Option<String>,
    pub engine: Option<String>,
    pub transmission: Option<String>,
}

impl CatalogRow {
    pub fn new(year: i32, make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            year,
            make: make.into(),
            model: model.into(),
            trim: None,
            engine: None,
            transmission: None,
        }
    }

    /// `(year, make, model)` identity used by harvest.
    pub fn model_key(&self) -> RowKey {
        RowKey(format!(
            "{}|{}|{}",
            self.year,
            self.make.to_lowercase(),
            self.model.to_lowercase()
        ))
    }

    /// Identity over all six columns used by CSV conversion.
    pub fn full_key(&self) -> RowKey {
        let opt = |v: &Option<String>| v.as_deref().unwrap_or("").to_lowercase();
        RowKey(format!(
            "{}|{}|{}|{}|{}|{}",
            self.year,
            self.make.to_lowercase(),
            self.model.to_lowercase(),
            opt(&self.trim),
            opt(&self.engine),
            opt(&self.transmission)
        ))
    }
}

/// Case-folded dedup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey(String);

/// Keys already emitted; `insert` reports whether the row is new.
#[derive(Debug, Default)]
pub struct SeenRows {
    keys: HashSet<RowKey>,
}

impl SeenRows {
    pub fn insert(&mut self, key: RowKey) -> bool {
        self.keys.insert(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Extend<RowKey> for SeenRows {
    fn extend<I: IntoIterator<Item = RowKey>>(&mut self, iter: I) {
        self.keys.extend(iter);
    }
}

/// Positions of the known columns in a CSV header.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    year: usize,
    make: usize,
    model: usize,
    trim: Option<usize>,
    engine: Option<usize>,
    transmission: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        Ok(Self {
            year: find("year").ok_or(IngestError::MissingColumn("year"))?,
            make: find("make").ok_or(IngestError::MissingColumn("make"))?,
            model: find("model").ok_or(IngestError::MissingColumn("model"))?,
            trim: find("trim"),
            engine: find("engine"),
            transmission: find("transmission"),
        })
    }

    fn parse(&self, record: &csv::StringRecord) -> Option<CatalogRow> {
        let text = |idx: usize| record.get(idx).map(str::trim).filter(|s| !s.is_empty());
        let optional = |idx: Option<usize>| idx.and_then(text).map(str::to_string);

        Some(CatalogRow {
            year: text(self.year)?.parse().ok()?,
            make: text(self.make)?.to_string(),
            model: text(self.model)?.to_string(),
            trim: optional(self.trim),
            engine: optional(self.engine),
            transmission: optional(self.transmission),
        })
    }
}

/// Streams catalog rows out of a CSV, skipping and counting bad records.
pub struct CatalogReader<R> {
    csv: csv::Reader<R>,
    columns: ColumnMap,
    record: csv::StringRecord,
    invalid: usize,
}

impl<R: Read> CatalogReader<R> {
    /// Missing required headers abort here.
    pub fn new(reader: R) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let columns = ColumnMap::from_headers(csv.headers()?)?;
        Ok(Self {
            csv,
            columns,
            record: csv::StringRecord::new(),
            invalid: 0,
        })
    }

    /// Records skipped so far: undecodable, unparsable year, or blank make/model.
    pub fn invalid(&self) -> usize {
        self.invalid
    }

    /// Next well-formed row. Only I/O failures on the underlying reader are errors.
    pub fn next_row(&mut self) -> Result<Option<CatalogRow>> {
        loop {
            match self.csv.read_record(&mut self.record) {
                Ok(false) => return Ok(None),
                Ok(true) => match self.columns.parse(&self.record) {
                    Some(row) => return Ok(Some(row)),
                    None => self.invalid += 1,
                },
                Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => return Err(err.into()),
                Err(err) => {
                    let line = err.position().map(|p| p.line());
                    warn!(line = ?line, error = %err, "csv=record_skipped");
                    self.invalid += 1;
                }
            }
        }
    }
}

/// Rows read from a catalog CSV.
#[derive(Debug, Default)]
pub struct ReadOutcome {
    pub rows: Vec<CatalogRow>,
    /// Records that were undecodable or had an unparsable year or blank make/model.
    pub invalid: usize,
}

/// Read every well-formed row. Missing required headers abort; bad rows are counted.
pub fn read_catalog_csv<R: Read>(reader: R) -> Result<ReadOutcome> {
    let mut rows = CatalogReader::new(reader)?;
    let mut outcome = ReadOutcome::default();
    while let Some(row) = rows.next_row()? {
        outcome.rows.push(row);
    }
    outcome.invalid = rows.invalid();
    Ok(outcome)
}
