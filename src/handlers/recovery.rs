use crate::codes;
use crate::notify::Channel;
use crate::password;
use crate::schemas::{store_error, ApiOutcome, AppState, OutcomeResult, UserResponse};
use crate::validate::is_blank;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use model::entities::user;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

/// Request body for issuing a password-reset code
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SendResetCodeRequest {
    pub email_address: Option<String>,
}

/// Request body for verifying a password-reset code
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CheckVerificationCodeRequest {
    pub email_address: Option<String>,
    pub password_reset_code: Option<String>,
}

/// Request body for resetting a password with a verification code
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ResetPasswordRequest {
    pub email_address: Option<String>,
    pub password_reset_code: Option<String>,
    /// New password
    pub password: Option<String>,
    /// New password confirmation, must equal `password`
    #[serde(rename = "confPassword")]
    pub conf_password: Option<String>,
}

/// Issue a password-reset code to a registered email address
#[utoipa::path(
    post,
    path = "/send_password_reset_code",
    tag = "recovery",
    request_body = SendResetCodeRequest,
    responses(
        (status = 200, description = "Reset-code issuance outcome", body = ApiOutcome<UserResponse>),
        (status = 500, description = "Internal server error", body = ApiOutcome<UserResponse>)
    )
)]
#[instrument(skip(state))]
pub async fn send_password_reset_code(
    State(state): State<AppState>,
    Json(request): Json<SendResetCodeRequest>,
) -> OutcomeResult<UserResponse> {
    if is_blank(&request.email_address) {
        return Ok(ApiOutcome::fail("Please enter your email_address"));
    }
    let email_address = request.email_address.unwrap_or_default();

    let found = user::Entity::find()
        .filter(user::Column::EmailAddress.eq(&email_address))
        .one(state.db.as_ref())
        .await
        .map_err(store_error)?;

    let Some(user_model) = found else {
        warn!("Reset code requested for unknown email: {}", email_address);
        return Ok(ApiOutcome::fail("Email address not found!"));
    };

    let code = codes::generate_code();

    let mut pending: user::ActiveModel = user_model.clone().into();
    pending.password_reset_code = Set(Some(code.clone()));
    pending.update(state.db.as_ref()).await.map_err(store_error)?;

    if let Err(send_error) = state
        .notifier
        .send_code(Channel::Email, &email_address, &code)
        .await
    {
        warn!("Reset-code delivery to {} failed: {}", email_address, send_error);
    }

    info!("Password-reset code issued for user ID: {}", user_model.id);
    Ok(ApiOutcome::ok("Data found!", UserResponse::from(user_model)))
}

/// Verify a password-reset code without consuming it
#[utoipa::path(
    post,
    path = "/check_verification_code",
    tag = "recovery",
    request_body = CheckVerificationCodeRequest,
    responses(
        (status = 200, description = "Verification outcome", body = ApiOutcome<UserResponse>),
        (status = 500, description = "Internal server error", body = ApiOutcome<UserResponse>)
    )
)]
#[instrument(skip(state, request))]
pub async fn check_verification_code(
    State(state): State<AppState>,
    Json(request): Json<CheckVerificationCodeRequest>,
) -> OutcomeResult<UserResponse> {
    if is_blank(&request.email_address) {
        return Ok(ApiOutcome::fail("Please enter your email address"));
    }
    if is_blank(&request.password_reset_code) {
        return Ok(ApiOutcome::fail("Please enter verification code"));
    }
    let email_address = request.email_address.unwrap_or_default();
    let reset_code = request.password_reset_code.unwrap_or_default();

    let found = user::Entity::find()
        .filter(user::Column::EmailAddress.eq(&email_address))
        .filter(user::Column::PasswordResetCode.eq(&reset_code))
        .one(state.db.as_ref())
        .await
        .map_err(store_error)?;

    // The code stays live here; the reset step consumes it.
    match found {
        Some(user_model) => Ok(ApiOutcome::ok("Data found!", UserResponse::from(user_model))),
        None => {
            warn!("Verification code mismatch for email: {}", email_address);
            Ok(ApiOutcome::fail("Please check your verification code"))
        }
    }
}

/// Reset a password using a previously issued verification code
#[utoipa::path(
    post,
    path = "/reset_password",
    tag = "recovery",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset outcome", body = ApiOutcome<UserResponse>),
        (status = 500, description = "Internal server error", body = ApiOutcome<UserResponse>)
    )
)]
#[instrument(skip(state, request))]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> OutcomeResult<UserResponse> {
    // Confirmation mismatch fails before any store round trip.
    if request.password != request.conf_password {
        return Ok(ApiOutcome::fail("Passwords do not match"));
    }
    let email_address = request.email_address.unwrap_or_default();
    let reset_code = request.password_reset_code.unwrap_or_default();
    let raw_password = request.password.unwrap_or_default();

    let found = user::Entity::find()
        .filter(user::Column::EmailAddress.eq(&email_address))
        .filter(user::Column::PasswordResetCode.eq(&reset_code))
        .one(state.db.as_ref())
        .await
        .map_err(store_error)?;

    let Some(user_model) = found else {
        warn!("Password reset with invalid code for email: {}", email_address);
        return Ok(ApiOutcome::fail("Invalid verification code"));
    };

    let password_hash = match password::hash(&raw_password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Password hashing failed: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiOutcome::fail("Internal server error"),
            ));
        }
    };

    let mut pending: user::ActiveModel = user_model.clone().into();
    pending.password = Set(password_hash);
    pending.password_reset_code = Set(None);
    pending.update(state.db.as_ref()).await.map_err(store_error)?;

    info!("Password reset for user ID: {}", user_model.id);
    Ok(ApiOutcome::ok(
        "Password reset successfully",
        UserResponse::from(user_model),
    ))
}
