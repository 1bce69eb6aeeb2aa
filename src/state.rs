//! Shared provider state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, CatalogService};
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::random::{RandomSource, StdRandomSource};
use crate::infrastructure::memory::{FixtureCatalog, MemoryTokenRepository, MemoryUserRepository};

pub type ProviderAuthService = AuthService<MemoryUserRepository, MemoryTokenRepository>;
pub type ProviderCatalogService = CatalogService<FixtureCatalog>;

/// Provider state.
///
/// Owns the user and token repositories; dropping the state drops every
/// account and session.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<ProviderAuthService>,
    pub catalog_service: Arc<ProviderCatalogService>,
}

impl AppState {
    /// Builds a state with empty account maps over `catalog`.
    pub fn new(
        catalog: FixtureCatalog,
        signing_secret: String,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        let auth_service = AuthService::new(
            Arc::new(MemoryUserRepository::new()),
            Arc::new(MemoryTokenRepository::new()),
            signing_secret,
        );
        let catalog_service = CatalogService::new(Arc::new(catalog), clock, random);

        Self {
            auth_service: Arc::new(auth_service),
            catalog_service: Arc::new(catalog_service),
        }
    }

    /// Sample catalog, wall clock and OS-seeded randomness.
    pub fn with_defaults(signing_secret: String) -> Self {
        Self::new(
            FixtureCatalog::sample(),
            signing_secret,
            Arc::new(SystemClock),
            Arc::new(StdRandomSource::from_os_rng()),
        )
    }
}
