use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::domain::clock::SystemClock;
use crate::infra::db::DbCodeRepository;
use crate::usecase::create_code::CreateCodeUseCase;
use crate::usecase::resolve_code::ResolveCodeUseCase;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Origin scan links are built on, without a trailing slash.
    pub public_base_url: String,
    pub storage_timeout: Duration,
}

impl AppState {
    pub fn new(db: DatabaseConnection, public_base_url: &str, storage_timeout: Duration) -> Self {
        Self {
            db,
            public_base_url: public_base_url.trim_end_matches('/').to_owned(),
            storage_timeout,
        }
    }

    pub fn code_repo(&self) -> DbCodeRepository {
        DbCodeRepository {
            db: self.db.clone(),
        }
    }

    pub fn create_code(&self) -> CreateCodeUseCase<DbCodeRepository, SystemClock> {
        CreateCodeUseCase {
            codes: self.code_repo(),
            clock: SystemClock,
            storage_timeout: self.storage_timeout,
        }
    }

    pub fn resolve_code(&self) -> ResolveCodeUseCase<DbCodeRepository, SystemClock> {
        ResolveCodeUseCase {
            codes: self.code_repo(),
            clock: SystemClock,
            storage_timeout: self.storage_timeout,
        }
    }

    /// Externally scannable URL for a code id.
    pub fn scan_url(&self, id: uuid::Uuid) -> String {
        format!("{}/scan/{}", self.public_base_url, id)
    }
}
