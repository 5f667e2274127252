//! Client for the NHTSA vPIC vehicle API.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{IngestError, Result};

pub const DEFAULT_BASE_URL: &str = "https://vpic.nhtsa.dot.gov/api/vehicles";

/// The two vPIC lookups harvest needs. Implemented by a fake in tests.
#[async_trait]
pub trait VpicApi: Send + Sync {
    /// Manufacturer names for passenger cars.
    async fn makes(&self) -> Result<Vec<String>>;

    /// Model names for `make` in `year`.
    async fn models(&self, make: &str, year: i32) -> Result<Vec<String>>;
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(rename = "Results", default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct MakeResult {
    #[serde(rename = "MakeName")]
    make_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelResult {
    #[serde(rename = "Model_Name")]
    model_name: Option<String>,
}

fn non_blank(values: impl IntoIterator<Item = Option<String>>) -> Vec<String> {
    values
        .into_iter()
        .flatten()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

pub struct VpicClient {
    client: Client,
    base_url: Url,
}

impl VpicClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| IngestError::InvalidArgs(format!("invalid base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(IngestError::InvalidArgs(format!(
                "base URL '{base_url}' cannot take path segments"
            )));
        }
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    /// Base URL plus percent-encoded `segments` and `?format=json`.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| IngestError::InvalidArgs("base URL cannot take path segments".into()))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut().append_pair("format", "json");
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        debug!(url = %url, "vpic request");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.results)
    }
}

#[async_trait]
impl VpicApi for VpicClient {
    async fn makes(&self) -> Result<Vec<String>> {
        let url = self.endpoint(&["GetMakesForVehicleType", "car"])?;
        let results: Vec<MakeResult> = self.get_json(url).await?;
        Ok(non_blank(results.into_iter().map(|r| r.make_name)))
    }

    async fn models(&self, make: &str, year: i32) -> Result<Vec<String>> {
        let year = year.to_string();
        let url = self.endpoint(&["GetModelsForMakeYear", "make", make, "modelyear", &year])?;
        let results: Vec<ModelResult> = self.get_json(url).await?;
        Ok(non_blank(results.into_iter().map(|r| r.model_name)))
    }
}
