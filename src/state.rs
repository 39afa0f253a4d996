use axum::extract::FromRef;
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::{TokenError, TokenService};
use crate::config::AppConfig;
use crate::database::models::{Movie, Review};
use crate::database::{
    DatabaseManager, DocumentStore, MemoryDocumentStore, MemoryUserStore, PgDocumentStore,
    PgUserStore, UserStore,
};
use crate::services::CredentialService;

/// Everything a request handler may touch, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub credentials: CredentialService,
    pub tokens: TokenService,
    pub movies: Arc<dyn DocumentStore<Movie>>,
    pub reviews: Arc<dyn DocumentStore<Review>>,
    /// Present only for the Postgres backend
    pub database: Option<DatabaseManager>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        movies: Arc<dyn DocumentStore<Movie>>,
        reviews: Arc<dyn DocumentStore<Review>>,
        database: Option<DatabaseManager>,
    ) -> Result<Self, TokenError> {
        let tokens = TokenService::new(&config.security.jwt_secret)?;
        let credentials = CredentialService::new(users, config.security.bcrypt_cost);

        Ok(Self {
            config: Arc::new(config),
            credentials,
            tokens,
            movies,
            reviews,
            database,
        })
    }

    /// State backed by process-local stores; nothing survives a restart
    pub fn in_memory(config: AppConfig) -> Result<Self, TokenError> {
        Self::new(
            config,
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryDocumentStore::<Movie>::new()),
            Arc::new(MemoryDocumentStore::<Review>::new()),
            None,
        )
    }

    /// Connect to Postgres, apply the schema if configured, and wire the stores
    pub async fn connect(config: AppConfig) -> anyhow::Result<Self> {
        let database = DatabaseManager::connect(&config.database).await?;
        if config.database.run_migrations {
            database.migrate().await?;
        }

        let pool = database.pool().clone();
        let state = Self::new(
            config,
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgDocumentStore::<Movie>::new(pool.clone())),
            Arc::new(PgDocumentStore::<Review>::new(pool)),
            Some(database),
        )?;

        info!("Using Postgres stores");
        Ok(state)
    }

    /// Pick the backend from configuration: Postgres when DB is set,
    /// memory otherwise or when forced
    pub async fn from_config(config: AppConfig, force_memory: bool) -> anyhow::Result<Self> {
        if force_memory || config.database.url.is_none() {
            warn!("Using in-memory stores; data is lost on shutdown");
            return Ok(Self::in_memory(config)?);
        }
        Self::connect(config).await
    }
}

impl FromRef<AppState> for CredentialService {
    fn from_ref(state: &AppState) -> Self {
        state.credentials.clone()
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}
