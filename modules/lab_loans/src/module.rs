//! Module declaration and lifecycle: init, migrate, REST registration

use crate::config::Config;
use crate::domain::{Repositories, Service};
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Lab loans module
pub struct LabLoansModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for LabLoansModule {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl LabLoansModule {
    pub fn new(config: Config) -> Self {
        Self {
            config: RwLock::new(config),
            service: RwLock::new(None),
        }
    }

    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    /// Build the domain service over SeaORM repositories
    pub fn init(&self, db: Arc<DatabaseConnection>) {
        let repos = crate::infra::storage::sea_orm_repositories(db);
        self.init_with_repositories(repos);
        tracing::info!("Lab loans module initialized");
    }

    /// Build the domain service over caller-provided repositories
    pub fn init_with_repositories(&self, repos: Repositories) {
        let service = Arc::new(Service::new(repos));
        *self.service.write() = Some(service);
    }

    pub fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// Apply pending database migrations
    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        use crate::infra::storage::migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(db, None).await?;
        tracing::info!("Lab loans migrations completed");
        Ok(())
    }

    /// Mount the REST routes onto `router`
    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;
        let config = Arc::new(self.config());

        tracing::info!("Registering lab loans REST routes");
        crate::api::rest::routes::register_routes(router, service, config)
    }
}
