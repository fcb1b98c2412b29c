use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use store::StoreHandle;
use tracing::{info, warn};

use crate::api::rest::{openapi, routes};
use crate::config::UsuariosConfig;
use crate::contract::client::UsuariosApi;
use crate::domain::repo::UsersRepository;
use crate::domain::service::Service;
use crate::gateways::local::UsuariosLocalClient;
use crate::infra::storage::{
    InMemoryUsersRepository, MongoUsersRepository, UnavailableUsersRepository,
};

/// Wiring for the usuarios module: picks a repository, owns the service and
/// exposes the REST routes plus the in-process client.
pub struct UsuariosModule {
    config: UsuariosConfig,
    service: Arc<Service>,
    // Kept for startup migrations; absent for non-Mongo repositories.
    mongo: Option<MongoUsersRepository>,
}

impl UsuariosModule {
    /// Backed by the document store.
    pub fn with_store(store: &StoreHandle, config: UsuariosConfig) -> Self {
        let repo = MongoUsersRepository::new(store, &config.collection);
        let service = Arc::new(Service::new(Arc::new(repo.clone())));
        info!(collection = %config.collection, "usuarios module using document store");
        Self {
            config,
            service,
            mongo: Some(repo),
        }
    }

    /// Backed by a process-local map; nothing survives a restart.
    pub fn in_memory(config: UsuariosConfig) -> Self {
        warn!("usuarios module running on the in-memory repository");
        Self::with_repository(Arc::new(InMemoryUsersRepository::new()), config)
    }

    /// Every operation fails with a store error until the process is restarted
    /// with a reachable store.
    pub fn unavailable(reason: impl Into<String>, config: UsuariosConfig) -> Self {
        Self::with_repository(Arc::new(UnavailableUsersRepository::new(reason)), config)
    }

    pub fn with_repository(repo: Arc<dyn UsersRepository>, config: UsuariosConfig) -> Self {
        Self {
            config,
            service: Arc::new(Service::new(repo)),
            mongo: None,
        }
    }

    /// Startup migrations: the unique `email` index.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        let Some(repo) = &self.mongo else {
            return Ok(());
        };
        if !self.config.ensure_indexes {
            info!("skipping index creation (ensure_indexes = false)");
            return Ok(());
        }
        repo.ensure_indexes()
            .await
            .context("failed to ensure the unique email index")
    }

    pub fn register_rest(&self, router: Router) -> Router {
        routes::register_routes(router, self.service.clone())
    }

    pub fn openapi(&self) -> utoipa::openapi::OpenApi {
        openapi::openapi()
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    pub fn client(&self) -> Arc<dyn UsuariosApi> {
        Arc::new(UsuariosLocalClient::new(self.service.clone()))
    }

    pub fn config(&self) -> &UsuariosConfig {
        &self.config
    }
}
