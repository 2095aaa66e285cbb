use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::{Entity, Repository, Storage};

/// Shared handles for every request, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub storage: Arc<dyn Storage>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(config: AppConfig, storage: Arc<dyn Storage>) -> Self {
        let tokens = TokenService::new(
            &config.security.jwt_secret,
            config.security.jwt_expiry_hours,
        );
        Self {
            config: Arc::new(config),
            storage,
            tokens: Arc::new(tokens),
        }
    }

    pub fn repo<T: Entity>(&self) -> Repository<T> {
        Repository::new(self.storage.clone())
    }
}
