use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV header is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    #[error("database setup failed: {0}")]
    Setup(#[from] backend::AppError),
}

impl IngestError {
    /// Network failures, 429 and 5xx are worth retrying; everything else is final.
    pub fn is_transient(&self) -> bool {
        match self {
            IngestError::Http(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.is_request()
                    || e.status().is_some_and(|s| is_transient_status(s.as_u16()))
            }
            IngestError::Status { status, .. } => is_transient_status(*status),
            _ => false,
        }
    }
}

fn is_transient_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

pub type Result<T> = std::result::Result<T, IngestError>;
