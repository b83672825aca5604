//! Authentication API handlers

use axum::extract::State;
use axum::Json;

use super::dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::application::AuthService;
use crate::domain::DomainError;
use crate::interfaces::http::common::{ErrorResponse, ValidatedJson};

/// User login
///
/// Checks the submitted password against the stored one.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Malformed request", body = ErrorResponse)
    )
)]
pub async fn login(
    State(service): State<AuthService>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, DomainError> {
    let user = service
        .authenticate(&request.username, &request.password)
        .await?;

    Ok(Json(LoginResponse::from(user)))
}

/// User registration
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User created", body = RegisterResponse),
        (status = 400, description = "Username already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    )
)]
pub async fn register(
    State(service): State<AuthService>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<Json<RegisterResponse>, DomainError> {
    let user = service.register(request.into()).await?;

    Ok(Json(RegisterResponse::from(user)))
}
