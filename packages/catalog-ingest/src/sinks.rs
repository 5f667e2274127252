//! Destinations for harvested rows.

use std::fs::{File, OpenOptions};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use backend::entities::vehicle_catalog;
use sea_orm::{DatabaseConnection, EntityTrait, NotSet, QuerySelect, Set};

use crate::error::{IngestError, Result};
use crate::rows::{read_catalog_csv, CatalogRow, RowKey, CSV_HEADER};

#[async_trait]
pub trait CatalogSink: Send {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    /// Keys of rows the sink already holds, so a re-run can resume.
    async fn existing_keys(&self) -> Result<Vec<RowKey>>;

    /// Persist `rows` and return how many were written.
    async fn write_rows(&mut self, rows: &[CatalogRow]) -> Result<usize>;
}

/// Appends to a CSV file, writing the header only when the file is new or empty.
pub struct CsvSink {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl CsvSink {
    pub fn open(path: &Path) -> Result<Self> {
        let open_err = |source| IngestError::Open {
            path: path.to_path_buf(),
            source,
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(open_err)?;
        let is_empty = file.metadata().map_err(open_err)?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_empty {
            writer.write_record(CSV_HEADER)?;
            writer.flush()?;
        }

        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }
}

#[async_trait]
impl CatalogSink for CsvSink {
    fn name(&self) -> &'static str {
        "csv"
    }

    async fn existing_keys(&self) -> Result<Vec<RowKey>> {
        let file = File::open(&self.path).map_err(|source| IngestError::Open {
            path: self.path.clone(),
            source,
        })?;
        let outcome = read_catalog_csv(BufReader::new(file))?;
        Ok(outcome.rows.iter().map(CatalogRow::model_key).collect())
    }

    async fn write_rows(&mut self, rows: &[CatalogRow]) -> Result<usize> {
        for row in rows {
            self.writer.serialize(row)?;
        }
        self.writer.flush()?;
        Ok(rows.len())
    }
}

/// Inserts straight into `vehicle_catalog`.
pub struct DbSink {
    db: DatabaseConnection,
}

impl DbSink {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogSink for DbSink {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn existing_keys(&self) -> Result<Vec<RowKey>> {
        let existing: Vec<(i32, String, String)> = vehicle_catalog::Entity::find()
            .select_only()
            .column(vehicle_catalog::Column::Year)
            .column(vehicle_catalog::Column::Make)
            .column(vehicle_catalog::Column::Model)
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(existing
            .into_iter()
            .map(|(year, make, model)| CatalogRow::new(year, make, model).model_key())
            .collect())
    }

    async fn write_rows(&mut self, rows: &[CatalogRow]) -> Result<usize> {
        if rows.is_empty() {
            return Ok(0);
        }

        let models = rows.iter().map(|row| vehicle_catalog::ActiveModel {
            id: NotSet,
            year: Set(row.year),
            make: Set(row.make.clone()),
            model: Set(row.model.clone()),
            trim: Set(row.trim.clone()),
            engine: Set(row.engine.clone()),
            transmission: Set(row.transmission.clone()),
        });
        vehicle_catalog::Entity::insert_many(models)
            .exec_without_returning(&self.db)
            .await?;
        Ok(rows.len())
    }
}
