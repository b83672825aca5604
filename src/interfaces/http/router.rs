//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::AuthService;

use super::common::ErrorResponse;
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::{auth, health};

/// Router-wide state. Handlers pick the part they need via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub auth: AuthService,
    pub health: health::HealthState,
}

impl ApiState {
    pub fn new(auth: AuthService, db: DatabaseConnection) -> Self {
        Self {
            auth,
            health: health::HealthState {
                db,
                started_at: Arc::new(Instant::now()),
            },
        }
    }
}

impl FromRef<ApiState> for AuthService {
    fn from_ref(s: &ApiState) -> Self {
        s.auth.clone()
    }
}

impl FromRef<ApiState> for health::HealthState {
    fn from_ref(s: &ApiState) -> Self {
        s.health.clone()
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::health_check,
        auth::login,
        auth::register,
    ),
    components(
        schemas(
            ErrorResponse,
            health::MessageResponse,
            health::HealthResponse,
            health::ComponentHealth,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            auth::RegisterResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and database health"),
        (name = "Auth", description = "User registration and login"),
    ),
    info(
        title = "Auth Service API",
        version = "1.0.0",
        description = "Register users and check their credentials",
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `/metrics` is only mounted when a Prometheus recorder handle is given.
pub fn create_api_router(state: ApiState, prometheus: Option<PrometheusHandle>) -> Router {
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register));

    let mut router = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .nest("/auth", auth_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if let Some(handle) = prometheus {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
