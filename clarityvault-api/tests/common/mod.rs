//! Common test utilities for integration tests
//!
//! - In-memory `UserStore` / `FileStore`, so no database is needed
//! - A mockito server standing in for Gemini and YouTube
//! - JWT token generation
//! - Request and multipart body helpers

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use chrono::Utc;
use clarityvault_api::app::{build_router, AppState};
use clarityvault_api::config::Config;
use clarityvault_genai::gemini::{GeminiClient, GeminiConfig};
use clarityvault_genai::youtube::YouTubeClient;
use clarityvault_shared::auth::jwt::{create_token, Claims};
use clarityvault_shared::models::stored_file::{FileSummary, NewStoredFile, StoredFile};
use clarityvault_shared::models::user::{CreateUser, Role, UpdateUser, User};
use clarityvault_shared::store::{FileStore, StoreError, UserStore};
use mockito::ServerGuard;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower::Service as _;

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";
pub const GEMINI_KEY: &str = "gemini-test-key";
pub const YOUTUBE_KEY: &str = "youtube-test-key";
pub const TEST_EMAIL: &str = "tester@example.com";

/// Users keyed by email
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub async fn get(&self, email: &str) -> Option<User> {
        self.users.read().await.get(email).cloned()
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: CreateUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(StoreError::Duplicate(user.email));
        }

        let now = Utc::now();
        let row = User {
            email: user.email.clone(),
            password_hash: user.password_hash,
            full_name: user.full_name,
            avatar_url: user.avatar_url,
            role: user.role,
            verified: user.verified,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.email, row.clone());
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.get(email).await)
    }

    async fn update(&self, user: UpdateUser) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;
        let Some(row) = users.get_mut(&user.email) else {
            return Ok(None);
        };

        if let Some(hash) = user.password_hash {
            row.password_hash = hash;
        }
        row.full_name = user.full_name;
        row.avatar_url = user.avatar_url;
        row.role = user.role;
        row.verified = user.verified;
        row.updated_at = Utc::now();

        Ok(Some(row.clone()))
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|user| user.created_at);
        Ok(users)
    }

    async fn find_full_name(&self, email: &str) -> Result<Option<String>, StoreError> {
        Ok(self.get(email).await.and_then(|user| user.full_name))
    }
}

/// Files keyed by a sequential id
pub struct InMemoryFileStore {
    next_id: AtomicI64,
    files: RwLock<BTreeMap<i64, StoredFile>>,
}

impl Default for InMemoryFileStore {
    fn default() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            files: RwLock::new(BTreeMap::new()),
        }
    }
}

impl InMemoryFileStore {
    pub async fn count(&self) -> usize {
        self.files.read().await.len()
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn save(&self, file: NewStoredFile) -> Result<StoredFile, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = StoredFile {
            id,
            username: file.username,
            file_name: file.file_name,
            file_type: file.file_type,
            data: file.data,
            created_at: Utc::now(),
        };

        self.files.write().await.insert(id, row.clone());
        Ok(row)
    }

    async fn find(&self, id: i64) -> Result<Option<StoredFile>, StoreError> {
        Ok(self.files.read().await.get(&id).cloned())
    }

    async fn list_by_username(&self, username: &str) -> Result<Vec<FileSummary>, StoreError> {
        Ok(self
            .files
            .read()
            .await
            .values()
            .filter(|file| file.username == username)
            .map(|file| FileSummary {
                id: file.id,
                file_name: file.file_name.clone(),
                file_type: file.file_type.clone(),
                file_size: file.data.len() as i64,
            })
            .collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.files.write().await.remove(&id).is_some())
    }
}

/// Test context containing all necessary resources
pub struct TestContext {
    pub app: Router,
    pub server: ServerGuard,
    pub config: Config,
    pub users: Arc<InMemoryUserStore>,
    pub files: Arc<InMemoryFileStore>,
    pub jwt_token: String,
}

impl TestContext {
    pub async fn new() -> Self {
        let server = mockito::Server::new_async().await;
        let config = test_config(&server.url());

        let users = Arc::new(InMemoryUserStore::default());
        let files = Arc::new(InMemoryFileStore::default());

        let gemini = GeminiClient::new(
            GeminiConfig::new(GEMINI_KEY)
                .with_base_url(server.url())
                .with_timeout(Duration::from_secs(5)),
        )
        .unwrap();
        let youtube = YouTubeClient::new(YOUTUBE_KEY, server.url(), Duration::from_secs(5)).unwrap();

        let state = AppState::new(
            config.clone(),
            users.clone(),
            files.clone(),
            Arc::new(gemini),
            Arc::new(youtube),
        );

        Self {
            app: build_router(state),
            jwt_token: issue_token(TEST_EMAIL, Role::User),
            server,
            config,
            users,
            files,
        }
    }

    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().call(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.send(
            Request::builder()
                .uri(uri)
                .header(header::AUTHORIZATION, self.auth_header())
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: serde_json::Value) -> Response {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::AUTHORIZATION, self.auth_header())
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn send_form(&self, uri: &str, form: MultipartBody) -> Response {
        self.send(form.into_request(uri, Some(&self.auth_header()))).await
    }
}

pub fn test_config(server_url: &str) -> Config {
    let env = HashMap::from([
        ("DATABASE_URL", "postgresql://unused/clarityvault".to_string()),
        ("JWT_SECRET", JWT_SECRET.to_string()),
        ("GOOGLE_API_KEY", GEMINI_KEY.to_string()),
        ("GEMINI_BASE_URL", server_url.to_string()),
        ("YOUTUBE_API_KEY", YOUTUBE_KEY.to_string()),
        ("YOUTUBE_BASE_URL", server_url.to_string()),
    ]);

    Config::from_lookup(|key| env.get(key).cloned()).unwrap()
}

pub fn issue_token(email: &str, role: Role) -> String {
    let claims = Claims::new(email, role, chrono::Duration::hours(1));
    create_token(&claims, JWT_SECRET).unwrap()
}

/// Builder for `multipart/form-data` request bodies
pub struct MultipartBody {
    body: Vec<u8>,
}

const BOUNDARY: &str = "clarityvault-test-boundary";

impl MultipartBody {
    pub fn new() -> Self {
        Self { body: Vec::new() }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_request(mut self, uri: &str, authorization: Option<&str>) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }

        builder.body(Body::from(self.body)).unwrap()
    }
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// A Gemini `generateContent` body whose first part is `text`
pub fn gemini_text_response(text: &str) -> String {
    serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": text }], "role": "model" } }]
    })
    .to_string()
}
