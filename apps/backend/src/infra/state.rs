use crate::config::db::DbSettings;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
#[derive(Default)]
pub struct StateBuilder {
    db_settings: Option<DbSettings>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_db(mut self, settings: DbSettings) -> Self {
        self.db_settings = Some(settings);
        self
    }

    pub fn with_database_url(self, url: impl Into<String>) -> Result<Self, AppError> {
        Ok(self.with_db(DbSettings::for_url(url)?))
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        match self.db_settings {
            // single entrypoint: connect + migrate
            Some(settings) => Ok(AppState::new(bootstrap_db(&settings).await?)),
            None => Ok(AppState::without_db()),
        }
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
