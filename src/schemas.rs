use crate::notify::Notifier;
use axum::{http::StatusCode, response::Json};
use chrono::{DateTime, Utc};
use model::entities::user;
use sea_orm::{DatabaseConnection, DbErr};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: Arc<DatabaseConnection>,
    /// Outbound SMS/email sender for one-time codes
    pub notifier: Arc<dyn Notifier>,
}

/// Business outcome envelope returned by every endpoint.
///
/// Validation and not-found conditions report `success: false` with a
/// human-readable message over HTTP 200; only store failures become 5xx.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiOutcome<T> {
    /// Success status
    pub success: bool,
    /// Outcome message
    pub message: String,
    /// Payload, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> ApiOutcome<T> {
    pub fn ok(message: impl Into<String>, result: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            result: Some(result),
        })
    }

    pub fn fail(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: false,
            message: message.into(),
            result: None,
        })
    }
}

/// Handler result: business outcomes on the Ok side, store failures on Err.
pub type OutcomeResult<T> = Result<Json<ApiOutcome<T>>, (StatusCode, Json<ApiOutcome<T>>)>;

/// Map an unexpected store error to a generic 500 outcome.
pub fn store_error<T>(db_error: DbErr) -> (StatusCode, Json<ApiOutcome<T>>) {
    error!("Store operation failed: {}", db_error);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ApiOutcome::fail("Internal server error"),
    )
}

/// Outward user record.
///
/// Deliberately omits `password`, `otp` and `password_reset_code`; the
/// one-time codes travel out of band through the notifier, never in a
/// response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub mobile_number: String,
    pub email_address: String,
    pub active: i32,
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            mobile_number: model.mobile_number,
            email_address: model.email_address,
            active: model.active,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::auth::register,
        crate::handlers::auth::login,
        crate::handlers::auth::login_with_mobile,
        crate::handlers::auth::check_otp,
        crate::handlers::recovery::send_password_reset_code,
        crate::handlers::recovery::check_verification_code,
        crate::handlers::recovery::reset_password,
        crate::handlers::users::user_details,
        crate::handlers::users::user_update,
        crate::handlers::users::change_password,
    ),
    components(
        schemas(
            ApiOutcome<UserResponse>,
            UserResponse,
            HealthResponse,
            crate::handlers::auth::RegisterRequest,
            crate::handlers::auth::LoginRequest,
            crate::handlers::auth::MobileLoginRequest,
            crate::handlers::auth::CheckOtpRequest,
            crate::handlers::recovery::SendResetCodeRequest,
            crate::handlers::recovery::CheckVerificationCodeRequest,
            crate::handlers::recovery::ResetPasswordRequest,
            crate::handlers::users::UserUpdateRequest,
            crate::handlers::users::ChangePasswordRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration, login and OTP endpoints"),
        (name = "recovery", description = "Password reset endpoints"),
        (name = "users", description = "Profile and password management endpoints"),
    ),
    info(
        title = "User Account API",
        description = "Minimal user-account backend: registration, login, OTP verification and password recovery",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
