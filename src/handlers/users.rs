use crate::password;
use crate::schemas::{store_error, ApiOutcome, AppState, OutcomeResult, UserResponse};
use crate::validate::is_blank;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::user;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

/// Request body for updating profile fields
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UserUpdateRequest {
    pub name: Option<String>,
    pub mobile_number: Option<String>,
    pub email_address: Option<String>,
}

/// Request body for changing a password
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ChangePasswordRequest {
    pub old_password: Option<String>,
    /// New password
    pub password: Option<String>,
    /// New password confirmation, must equal `password`
    #[serde(rename = "confPassword")]
    pub conf_password: Option<String>,
}

/// Get a user record by ID
#[utoipa::path(
    get,
    path = "/user_details/{id}",
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "Lookup outcome", body = ApiOutcome<UserResponse>),
        (status = 500, description = "Internal server error", body = ApiOutcome<UserResponse>)
    )
)]
#[instrument(skip(state))]
pub async fn user_details(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> OutcomeResult<UserResponse> {
    let found = user::Entity::find_by_id(id)
        .one(state.db.as_ref())
        .await
        .map_err(store_error)?;

    match found {
        Some(user_model) => Ok(ApiOutcome::ok("User Found", UserResponse::from(user_model))),
        None => {
            warn!("User details requested for unknown ID: {}", id);
            Ok(ApiOutcome::fail("Invalid user"))
        }
    }
}

/// Update a user's profile fields
#[utoipa::path(
    put,
    path = "/user_update/{id}",
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID"),
    ),
    request_body = UserUpdateRequest,
    responses(
        (status = 200, description = "Update outcome", body = ApiOutcome<UserResponse>),
        (status = 500, description = "Internal server error", body = ApiOutcome<UserResponse>)
    )
)]
#[instrument(skip(state))]
pub async fn user_update(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UserUpdateRequest>,
) -> OutcomeResult<UserResponse> {
    let mut missing = Vec::new();
    if is_blank(&request.name) {
        missing.push("Name");
    }
    if is_blank(&request.mobile_number) {
        missing.push("Mobile number");
    }
    if is_blank(&request.email_address) {
        missing.push("Email address");
    }
    if !missing.is_empty() {
        warn!("Profile update rejected, missing fields: {}", missing.join(", "));
        return Ok(ApiOutcome::fail(format!(
            "The following fields are required: {}",
            missing.join(", ")
        )));
    }

    let existing = user::Entity::find_by_id(id)
        .one(state.db.as_ref())
        .await
        .map_err(store_error)?;

    let Some(user_model) = existing else {
        warn!("Profile update for unknown user ID: {}", id);
        return Ok(ApiOutcome::fail("Invalid user"));
    };

    let mut pending: user::ActiveModel = user_model.into();
    pending.name = Set(request.name.unwrap_or_default());
    pending.mobile_number = Set(request.mobile_number.unwrap_or_default());
    pending.email_address = Set(request.email_address.unwrap_or_default());

    let updated = pending.update(state.db.as_ref()).await.map_err(store_error)?;

    info!("Profile updated for user ID: {}", id);
    Ok(ApiOutcome::ok(
        "User information update successfully",
        UserResponse::from(updated),
    ))
}

/// Change a user's password after verifying the old one
#[utoipa::path(
    put,
    path = "/change_password/{id}",
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID"),
    ),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password change outcome", body = ApiOutcome<UserResponse>),
        (status = 500, description = "Internal server error", body = ApiOutcome<UserResponse>)
    )
)]
#[instrument(skip(state, request))]
pub async fn change_password(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<ChangePasswordRequest>,
) -> OutcomeResult<UserResponse> {
    if request.password != request.conf_password {
        return Ok(ApiOutcome::fail("Passwords do not match"));
    }
    let old_password = request.old_password.unwrap_or_default();
    let raw_password = request.password.unwrap_or_default();

    let found = user::Entity::find_by_id(id)
        .one(state.db.as_ref())
        .await
        .map_err(store_error)?;

    // Unknown id and wrong old password get one message, as if the lookup
    // had been keyed on the (id, password) pair.
    let Some(user_model) = found else {
        warn!("Password change for unknown user ID: {}", id);
        return Ok(ApiOutcome::fail("not match old password"));
    };
    if !password::verify(&old_password, &user_model.password) {
        warn!("Password change with wrong old password for user ID: {}", id);
        return Ok(ApiOutcome::fail("not match old password"));
    }

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
    pending.update(state.db.as_ref()).await.map_err(store_error)?;

    info!("Password changed for user ID: {}", id);
    Ok(ApiOutcome::ok(
        "Password change successfully",
        UserResponse::from(user_model),
    ))
}
