//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{CreateUserDto, User};

/// Full user record submitted on registration.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "client_id is required"))]
    pub client_id: String,
    #[validate(length(min = 1, message = "client_secret is required"))]
    pub client_secret: String,
    #[validate(length(min = 1, message = "token_url is required"))]
    pub token_url: String,
    #[validate(length(min = 1, message = "tenant_url is required"))]
    pub tenant_url: String,
    #[validate(length(min = 1, message = "organization is required"))]
    pub organization: String,
}

impl From<RegisterRequest> for CreateUserDto {
    fn from(req: RegisterRequest) -> Self {
        CreateUserDto {
            username: req.username,
            password: req.password,
            client_id: req.client_id,
            client_secret: req.client_secret,
            token_url: req.token_url,
            tenant_url: req.tenant_url,
            organization: req.organization,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub username: String,
}

impl From<User> for RegisterResponse {
    fn from(user: User) -> Self {
        Self {
            message: "Registration Successful".to_string(),
            username: user.username,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub username: String,
}

impl From<User> for LoginResponse {
    fn from(user: User) -> Self {
        Self {
            message: "Login Successful".to_string(),
            username: user.username,
        }
    }
}
