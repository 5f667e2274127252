//! `harvest`: walk vPIC year by year and make by make, appending new rows to the sinks.

use std::time::Duration;

use tracing::{info, warn};

use crate::error::{IngestError, Result};
use crate::retry::{with_retry, RetryPolicy};
use crate::rows::{CatalogRow, SeenRows};
use crate::sinks::CatalogSink;
use crate::vpic::VpicApi;

#[derive(Debug, Clone)]
pub struct HarvestOptions {
    pub from_year: i32,
    pub to_year: i32,
    /// Restrict to these manufacturers instead of asking vPIC for the list.
    pub makes: Option<Vec<String>>,
    /// Pause after every request.
    pub delay: Duration,
    pub retry: RetryPolicy,
}

impl HarvestOptions {
    pub fn validate(&self) -> Result<()> {
        if self.from_year > self.to_year {
            return Err(IngestError::InvalidArgs(format!(
                "--from-year {} is after --to-year {}",
                self.from_year, self.to_year
            )));
        }
        if self.makes.as_ref().is_some_and(Vec::is_empty) {
            return Err(IngestError::InvalidArgs("--makes is empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HarvestStats {
    pub pages: usize,
    pub failed_pages: usize,
    /// Rows delivered to every sink.
    pub written: usize,
    pub duplicates: usize,
    /// Page writes a sink rejected; the rows are lost for that sink only.
    pub failed_writes: usize,
}

/// Split a `A, B,,C` argument into trimmed, non-empty names.
pub fn parse_makes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct Harvester<'a, A: VpicApi + ?Sized> {
    api: &'a A,
    sinks: Vec<Box<dyn CatalogSink>>,
    seen: SeenRows,
    options: HarvestOptions,
}

impl<'a, A: VpicApi + ?Sized> Harvester<'a, A> {
    pub fn new(api: &'a A, sinks: Vec<Box<dyn CatalogSink>>, options: HarvestOptions) -> Self {
        Self {
            api,
            sinks,
            seen: SeenRows::default(),
            options,
        }
    }

    /// Seed the dedup set from whatever the sinks already hold.
    pub async fn load_existing(&mut self) -> Result<usize> {
        for sink in &self.sinks {
            let keys = sink.existing_keys().await?;
            info!(sink = sink.name(), rows = keys.len(), "harvest=resume");
            self.seen.extend(keys);
        }
        Ok(self.seen.len())
    }

    async fn pause(&self) {
        if !self.options.delay.is_zero() {
            tokio::time::sleep(self.options.delay).await;
        }
    }

    async fn resolve_makes(&self) -> Result<Vec<String>> {
        if let Some(makes) = &self.options.makes {
            return Ok(makes.clone());
        }
        let makes = with_retry(self.options.retry, "makes", || self.api.makes()).await?;
        self.pause().await;
        if makes.is_empty() {
            return Err(IngestError::InvalidArgs("vPIC returned no makes".into()));
        }
        Ok(makes)
    }

    pub async fn run(mut self) -> Result<HarvestStats> {
        self.options.validate()?;
        let makes = self.resolve_makes().await?;
        info!(
            from_year = self.options.from_year,
            to_year = self.options.to_year,
            makes = makes.len(),
            "harvest=start"
        );

        let mut stats = HarvestStats::default();
        for year in (self.options.from_year..=self.options.to_year).rev() {
            for make in &makes {
                let what = format!("models {make} {year}");
                let fetched =
                    with_retry(self.options.retry, &what, || self.api.models(make, year)).await;
                self.pause().await;

                let models = match fetched {
                    Ok(models) => models,
                    Err(err) => {
                        warn!(year, make = %make, error = %err, "harvest=page_skipped");
                        stats.failed_pages += 1;
                        continue;
                    }
                };
                stats.pages += 1;

                let mut fresh = Vec::new();
                for model in models {
                    let row = CatalogRow::new(year, make.as_str(), model);
                    if self.seen.insert(row.model_key()) {
                        fresh.push(row);
                    } else {
                        stats.duplicates += 1;
                    }
                }
                if fresh.is_empty() {
                    continue;
                }

                let mut delivered = true;
                for sink in &mut self.sinks {
                    if let Err(err) = sink.write_rows(&fresh).await {
                        warn!(
                            sink = sink.name(),
                            year,
                            make = %make,
                            rows = fresh.len(),
                            error = %err,
                            "harvest=write_failed"
                        );
                        stats.failed_writes += 1;
                        delivered = false;
                    }
                }
                if delivered {
                    stats.written += fresh.len();
                    info!(year, make = %make, rows = fresh.len(), "harvest=page_written");
                }
            }
        }

        info!(
            pages = stats.pages,
            failed_pages = stats.failed_pages,
            written = stats.written,
            duplicates = stats.duplicates,
            failed_writes = stats.failed_writes,
            "harvest=done"
        );
        Ok(stats)
    }
}
