use crate::auth::AuthService;
use crate::config::Config;
use crate::errors::{AppError, ResultExt};
use crate::groq_client::GroqClient;
use crate::leads::LeadService;
use crate::models::*;
use crate::store::{JsonFileStore, RecordStore};
use axum::{
    extract::{FromRequest, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Upstream text-generation client.
    pub groq: GroqClient,
    /// Lead listing/creation over the lead store.
    pub leads: LeadService,
    /// Signup/login over the user store.
    pub auth: AuthService,
}

impl AppState {
    /// State backed by the given stores.
    pub fn new(
        config: Config,
        lead_store: Arc<dyn RecordStore<Lead>>,
        user_store: Arc<dyn RecordStore<User>>,
    ) -> Self {
        Self {
            groq: GroqClient::from_config(&config),
            leads: LeadService::new(lead_store),
            auth: AuthService::new(user_store),
            config,
        }
    }

    /// State backed by `leads.json` and `users.json` under the configured data directory.
    pub fn from_config(config: Config) -> Self {
        let lead_store = Arc::new(JsonFileStore::<Lead>::new(config.leads_file()));
        let user_store = Arc::new(JsonFileStore::<User>::new(config.users_file()));
        Self::new(config, lead_store, user_store)
    }
}

/// `Json` extractor whose rejections render as `{"error": ...}` like every other failure.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "market-ai-suite",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/generate
///
/// Proxies a prompt to the text-generation API and returns its reply.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let prompt = request.prompt.unwrap_or_default();
    tracing::info!("POST /api/generate - {} prompt chars", prompt.len());

    let content = state.groq.generate(&prompt).await?;
    Ok(Json(GenerateResponse { content }))
}

/// GET /api/leads
pub async fn list_leads(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ScoredLead>>, AppError> {
    let leads = state.leads.list().await.context("GET /api/leads")?;
    Ok(Json(leads))
}

/// POST /api/leads
///
/// Creates a lead with a placeholder score and prepends it to the store.
pub async fn create_lead(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<CreateLeadRequest>,
) -> Result<Json<ScoredLead>, AppError> {
    tracing::info!("POST /api/leads - params: {:?}", request);

    let lead = state.leads.create(request).await?;
    Ok(Json(lead))
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let user = state.auth.signup(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "Signup successful".to_string(),
            user,
        }),
    ))
}

/// POST /api/auth/login
///
/// One-shot credential check; no session is created.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = state.auth.login(request).await?;
    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        user,
    }))
}

/// GET /api/debug-env
///
/// Reports whether the upstream key is present and its length. Never the key itself.
pub async fn debug_env(State(state): State<Arc<AppState>>) -> Json<DebugEnvResponse> {
    let key = state.config.groq_api_key.as_deref().unwrap_or_default();
    Json(DebugEnvResponse {
        can_see_key: state.groq.has_credential(),
        key_length: key.len(),
        port: state.config.port,
    })
}
