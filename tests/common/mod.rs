#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use movie_reviews_api::config::AppConfig;
use movie_reviews_api::database::models::{Movie, NewUser, Resource, Review, User};
use movie_reviews_api::database::{
    DocumentStore, MemoryDocumentStore, MemoryUserStore, StoreError, UserStore,
};
use movie_reviews_api::types::Document;
use movie_reviews_api::{app, AppState};

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.database.url = None;
    config.security.jwt_secret = "integration-secret".to_string();
    config.security.bcrypt_cost = 4;
    config.api.enable_request_logging = false;
    config
}

/// Serve an in-memory instance on a free port
pub async fn spawn_server() -> Result<TestServer> {
    let state = AppState::in_memory(test_config())?;
    spawn_with_state(state).await
}

pub async fn spawn_with_state(state: AppState) -> Result<TestServer> {
    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app(state)).await;
    });

    let server = TestServer {
        port,
        base_url,
        client: reqwest::Client::new(),
    };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}

/// Sign up and sign in, returning the Authorization header value
pub async fn login(server: &TestServer, username: &str) -> Result<String> {
    let res = server
        .client
        .post(server.url("/signup"))
        .json(&json!({ "name": "Test User", "username": username, "password": "s3cret" }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "signup failed: {}", res.status());

    let res = server
        .client
        .post(server.url("/signin"))
        .json(&json!({ "username": username, "password": "s3cret" }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "signin failed: {}", res.status());

    let body: Value = res.json().await?;
    body["token"]
        .as_str()
        .map(str::to_string)
        .context("signin response has no token")
}

/// Counts every call that reaches the wrapped user store
#[derive(Default)]
pub struct CountingUserStore {
    inner: MemoryUserStore,
    pub calls: AtomicUsize,
}

impl CountingUserStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for CountingUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(user).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_username(username).await
    }
}

/// Counts every call that reaches the wrapped document store
pub struct CountingDocumentStore<T: Resource> {
    inner: MemoryDocumentStore<T>,
    pub calls: AtomicUsize,
}

impl<T: Resource> CountingDocumentStore<T> {
    pub fn new() -> Self {
        Self {
            inner: MemoryDocumentStore::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl<T: Resource> DocumentStore<T> for CountingDocumentStore<T> {
    async fn list(&self) -> Result<Vec<Document<T>>, StoreError> {
        self.hit();
        self.inner.list().await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document<T>>, StoreError> {
        self.hit();
        self.inner.find_by_id(id).await
    }

    async fn create(&self, body: Value) -> Result<Document<T>, StoreError> {
        self.hit();
        self.inner.create(body).await
    }

    async fn update_by_id(&self, id: Uuid, patch: Value) -> Result<Option<Document<T>>, StoreError> {
        self.hit();
        self.inner.update_by_id(id, patch).await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Document<T>>, StoreError> {
        self.hit();
        self.inner.delete_by_id(id).await
    }
}

pub struct CountingStores {
    pub users: Arc<CountingUserStore>,
    pub movies: Arc<CountingDocumentStore<Movie>>,
    pub reviews: Arc<CountingDocumentStore<Review>>,
}

/// Serve an instance whose stores record how often they are touched
pub async fn spawn_counting() -> Result<(TestServer, CountingStores)> {
    let stores = CountingStores {
        users: Arc::new(CountingUserStore::default()),
        movies: Arc::new(CountingDocumentStore::new()),
        reviews: Arc::new(CountingDocumentStore::new()),
    };

    let state = AppState::new(
        test_config(),
        stores.users.clone(),
        stores.movies.clone(),
        stores.reviews.clone(),
        None,
    )?;

    let server = spawn_with_state(state).await?;
    Ok((server, stores))
}

/// Every call fails as if the database had gone away
#[derive(Default)]
pub struct UnreachableUserStore;

fn unreachable() -> StoreError {
    StoreError::Unreachable("connection refused (10.0.0.7:5432)".to_string())
}

#[async_trait]
impl UserStore for UnreachableUserStore {
    async fn insert(&self, _user: NewUser) -> Result<User, StoreError> {
        Err(unreachable())
    }

    async fn find_by_username(&self, _username: &str) -> Result<Option<User>, StoreError> {
        Err(unreachable())
    }
}

#[derive(Default)]
pub struct UnreachableDocumentStore;

#[async_trait]
impl<T: Resource> DocumentStore<T> for UnreachableDocumentStore {
    async fn list(&self) -> Result<Vec<Document<T>>, StoreError> {
        Err(unreachable())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Document<T>>, StoreError> {
        Err(unreachable())
    }

    async fn create(&self, _body: Value) -> Result<Document<T>, StoreError> {
        Err(unreachable())
    }

    async fn update_by_id(&self, _id: Uuid, _patch: Value) -> Result<Option<Document<T>>, StoreError> {
        Err(unreachable())
    }

    async fn delete_by_id(&self, _id: Uuid) -> Result<Option<Document<T>>, StoreError> {
        Err(unreachable())
    }
}

/// Body every store failure must produce; nothing internal leaks
pub fn generic_failure() -> Value {
    json!({ "success": false, "message": "Something went wrong. Please try again later." })
}

/// State whose user store is down; tokens still verify
pub fn state_without_users() -> Result<AppState> {
    Ok(AppState::new(
        test_config(),
        Arc::new(UnreachableUserStore),
        Arc::new(MemoryDocumentStore::<Movie>::new()),
        Arc::new(MemoryDocumentStore::<Review>::new()),
        None,
    )?)
}

/// Serve an instance where users work but both document stores are down
pub async fn spawn_without_documents() -> Result<TestServer> {
    let state = AppState::new(
        test_config(),
        Arc::new(MemoryUserStore::new()),
        Arc::new(UnreachableDocumentStore),
        Arc::new(UnreachableDocumentStore),
        None,
    )?;
    spawn_with_state(state).await
}
