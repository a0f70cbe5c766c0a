use crate::cms::CmsClient;
use crate::config::AppConfig;
use crate::database::{AuditLogger, Database};
use crate::revalidate::Revalidator;

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub audit: AuditLogger,
    pub revalidator: Revalidator,
    pub cms: CmsClient,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        let db = Database::new(&config.database);
        Self {
            audit: AuditLogger::new(db.clone()),
            revalidator: Revalidator::from_config(&config.revalidate),
            cms: CmsClient::from_config(&config.cms),
            db,
        }
    }
}
