/// Application state and router builder
///
/// `AppState` carries trait-object handles to the stores and the external
/// clients, so `main` wires PostgreSQL, Gemini and YouTube while tests wire
/// in-memory stores and mock servers.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use clarityvault_api::{app::AppState, config::Config};
/// use clarityvault_genai::gemini::{GeminiClient, GeminiConfig};
/// use clarityvault_genai::youtube::YouTubeClient;
/// use clarityvault_shared::db::pool::{create_pool, PoolSettings};
/// use clarityvault_shared::store::postgres::{PgFileStore, PgUserStore};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(&PoolSettings {
///     url: config.database.url.clone(),
///     ..PoolSettings::default()
/// })
/// .await?;
/// let gemini = GeminiClient::new(GeminiConfig::new(config.gemini.api_key.clone()))?;
/// let youtube = YouTubeClient::new(
///     config.youtube.api_key.clone(),
///     config.youtube.base_url.clone(),
///     Duration::from_secs(30),
/// )?;
///
/// let state = AppState::new(
///     config,
///     Arc::new(PgUserStore::new(pool.clone())),
///     Arc::new(PgFileStore::new(pool)),
///     Arc::new(gemini),
///     Arc::new(youtube),
/// );
/// let app = clarityvault_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer, routes};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use clarityvault_genai::{model::GenerativeModel, service::DocumentIntelligence, youtube::VideoSearch};
use clarityvault_shared::{
    auth::{authenticator::Authenticator, middleware::create_jwt_middleware},
    models::stored_file::UploadPolicy,
    store::{FileStore, UserStore},
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler; all fields are cheap `Arc` clones.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub files: Arc<dyn FileStore>,
    pub authenticator: Authenticator,
    pub intelligence: DocumentIntelligence,
    pub videos: Arc<dyn VideoSearch>,
    pub upload_policy: Arc<UploadPolicy>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        config: Config,
        users: Arc<dyn UserStore>,
        files: Arc<dyn FileStore>,
        model: Arc<dyn GenerativeModel>,
        videos: Arc<dyn VideoSearch>,
    ) -> Self {
        let authenticator =
            Authenticator::new(users.clone(), config.jwt.secret.clone(), config.token_lifetime());

        Self {
            users,
            files,
            authenticator,
            intelligence: DocumentIntelligence::new(model),
            videos,
            upload_policy: Arc::new(UploadPolicy::default()),
            config: Arc::new(config),
        }
    }

    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET  /health                          (public)
/// ├── POST /register                        (public)
/// ├── GET  /login                           (public)
/// ├── GET  /data/:username
/// ├── PUT  /updateRegistration
/// ├── GET  /getAllUsers
/// ├── GET  /getName
/// ├── POST /pdf_translation, /pdf_jargon_extraction, /find_Document_type,
/// │        /analyze_harmful_terms, /analyze_contract_alternatives,
/// │        /analyze_loan_document
/// ├── POST /text_translation, /analyze_text
/// ├── GET  /search
/// └── /api/files/
///     ├── POST   /save
///     ├── DELETE /delete/:id
///     ├── GET    /find/:id
///     ├── GET    /download/:id
///     └── GET    /findByUsername/:username
/// ```
///
/// Everything except the public routes requires a bearer JWT.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/register", post(routes::users::register))
        .route("/login", get(routes::users::login));

    let user_routes = Router::new()
        .route("/data/:username", get(routes::users::get_data))
        .route("/updateRegistration", put(routes::users::update_registration))
        .route("/getAllUsers", get(routes::users::get_all_users))
        .route("/getName", get(routes::users::get_name));

    let file_routes = Router::new()
        .route("/save", post(routes::files::save_file))
        .route("/delete/:id", delete(routes::files::delete_file))
        .route("/find/:id", get(routes::files::find_file))
        .route("/download/:id", get(routes::files::download_file))
        .route("/findByUsername/:username", get(routes::files::find_by_username));

    let processing_routes = Router::new()
        .route("/pdf_translation", post(routes::processing::pdf_translation))
        .route("/text_translation", post(routes::processing::text_translation))
        .route("/pdf_jargon_extraction", post(routes::processing::pdf_jargon_extraction))
        .route("/search", get(routes::processing::search_videos))
        .route("/find_Document_type", post(routes::processing::find_document_type))
        .route("/analyze_text", post(routes::processing::analyze_text))
        .route("/analyze_harmful_terms", post(routes::processing::analyze_harmful_terms))
        .route(
            "/analyze_contract_alternatives",
            post(routes::processing::analyze_contract_alternatives),
        )
        .route("/analyze_loan_document", post(routes::processing::analyze_loan_document));

    let protected_routes = Router::new()
        .merge(user_routes)
        .merge(processing_routes)
        .nest("/api/files", file_routes)
        .route_layer(axum::middleware::from_fn(create_jwt_middleware(
            state.jwt_secret().to_string(),
        )));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(state.config.api.max_request_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config.api.cors_origins))
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins.iter().filter_map(|origin| origin.parse().ok()).collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}
