use crate::codes;
use crate::notify::Channel;
use crate::password;
use crate::schemas::{store_error, ApiOutcome, AppState, OutcomeResult, UserResponse};
use crate::validate::{is_blank, is_valid_email};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use model::entities::user;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, SqlErr};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

/// Request body for registering a new user
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    /// Display name
    pub name: Option<String>,
    /// Mobile number (must be unique)
    pub mobile_number: Option<String>,
    /// Email address (must be unique)
    pub email_address: Option<String>,
    /// Raw password
    pub password: Option<String>,
    /// Password confirmation, must equal `password`
    #[serde(rename = "confirmPassword")]
    pub confirm_password: Option<String>,
}

/// Request body for email/password login
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub email_address: Option<String>,
    pub password: Option<String>,
}

/// Request body for starting a mobile-number login
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MobileLoginRequest {
    pub mobile_number: Option<String>,
}

/// Request body for verifying a mobile-login OTP
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CheckOtpRequest {
    pub mobile_number: Option<String>,
    pub otp: Option<String>,
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registration outcome", body = ApiOutcome<UserResponse>),
        (status = 500, description = "Internal server error", body = ApiOutcome<UserResponse>)
    )
)]
#[instrument(skip(state, request))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
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
    if is_blank(&request.password) {
        missing.push("Password");
    }
    if is_blank(&request.confirm_password) {
        missing.push("Confirm password");
    }
    if !missing.is_empty() {
        warn!("Registration rejected, missing fields: {}", missing.join(", "));
        return Ok(ApiOutcome::fail(format!(
            "The following fields are required: {}",
            missing.join(", ")
        )));
    }

    let name = request.name.unwrap_or_default();
    let mobile_number = request.mobile_number.unwrap_or_default();
    let email_address = request.email_address.unwrap_or_default();
    let raw_password = request.password.unwrap_or_default();
    let confirm_password = request.confirm_password.unwrap_or_default();

    if raw_password != confirm_password {
        return Ok(ApiOutcome::fail("Passwords do not match"));
    }

    if !is_valid_email(&email_address) {
        debug!("Rejected email address format: {}", email_address);
        return Ok(ApiOutcome::fail("Invalid email address"));
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

    let new_user = user::ActiveModel {
        name: Set(name),
        mobile_number: Set(mobile_number),
        email_address: Set(email_address.clone()),
        password: Set(password_hash),
        active: Set(0),
        status: Set(1),
        ..Default::default()
    };

    // Uniqueness is the store's job: a single insert replaces the old
    // find-then-create sequence and closes its race window.
    match new_user.insert(state.db.as_ref()).await {
        Ok(user_model) => {
            info!("User registered with ID: {}, email: {}", user_model.id, email_address);
            Ok(ApiOutcome::ok(
                "User registered successfully",
                UserResponse::from(user_model),
            ))
        }
        Err(db_error) => match db_error.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                warn!("Registration conflict for email: {}", email_address);
                Ok(ApiOutcome::fail("User code already exists"))
            }
            _ => Err(store_error(db_error)),
        },
    }
}

/// Log in with email address and password
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login outcome", body = ApiOutcome<UserResponse>),
        (status = 500, description = "Internal server error", body = ApiOutcome<UserResponse>)
    )
)]
#[instrument(skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> OutcomeResult<UserResponse> {
    let email_address = request.email_address.unwrap_or_default();
    let raw_password = request.password.unwrap_or_default();

    let found = user::Entity::find()
        .filter(user::Column::EmailAddress.eq(&email_address))
        .one(state.db.as_ref())
        .await
        .map_err(store_error)?;

    // Unknown email and wrong password produce the identical message so the
    // response does not reveal which one was wrong.
    match found {
        Some(user_model) if password::verify(&raw_password, &user_model.password) => {
            info!("Login successful for user ID: {}", user_model.id);
            Ok(ApiOutcome::ok("Login successful", UserResponse::from(user_model)))
        }
        _ => {
            warn!("Failed login attempt for email: {}", email_address);
            Ok(ApiOutcome::fail("Invalid email address or password"))
        }
    }
}

/// Start a mobile-number login by issuing an OTP
#[utoipa::path(
    post,
    path = "/login_with_mobile",
    tag = "auth",
    request_body = MobileLoginRequest,
    responses(
        (status = 200, description = "OTP issuance outcome", body = ApiOutcome<UserResponse>),
        (status = 500, description = "Internal server error", body = ApiOutcome<UserResponse>)
    )
)]
#[instrument(skip(state))]
pub async fn login_with_mobile(
    State(state): State<AppState>,
    Json(request): Json<MobileLoginRequest>,
) -> OutcomeResult<UserResponse> {
    if is_blank(&request.mobile_number) {
        return Ok(ApiOutcome::fail("Please enter your mobile number"));
    }
    let mobile_number = request.mobile_number.unwrap_or_default();

    let found = user::Entity::find()
        .filter(user::Column::MobileNumber.eq(&mobile_number))
        .one(state.db.as_ref())
        .await
        .map_err(store_error)?;

    let Some(user_model) = found else {
        warn!("Mobile login for unknown number: {}", mobile_number);
        return Ok(ApiOutcome::fail("Mobile number not found!"));
    };

    let code = codes::generate_code();

    let mut pending: user::ActiveModel = user_model.clone().into();
    pending.otp = Set(Some(code.clone()));
    pending.update(state.db.as_ref()).await.map_err(store_error)?;

    // A failed send is logged but does not fail the request; the caller can
    // retry and a fresh code will overwrite this one.
    if let Err(send_error) = state
        .notifier
        .send_code(Channel::Sms, &mobile_number, &code)
        .await
    {
        warn!("OTP delivery to {} failed: {}", mobile_number, send_error);
    }

    info!("OTP issued for user ID: {}", user_model.id);
    Ok(ApiOutcome::ok("Data found!", UserResponse::from(user_model)))
}

/// Verify a mobile-login OTP
#[utoipa::path(
    post,
    path = "/check_otp",
    tag = "auth",
    request_body = CheckOtpRequest,
    responses(
        (status = 200, description = "OTP verification outcome", body = ApiOutcome<UserResponse>),
        (status = 500, description = "Internal server error", body = ApiOutcome<UserResponse>)
    )
)]
#[instrument(skip(state, request))]
pub async fn check_otp(
    State(state): State<AppState>,
    Json(request): Json<CheckOtpRequest>,
) -> OutcomeResult<UserResponse> {
    if is_blank(&request.mobile_number) {
        return Ok(ApiOutcome::fail("Please enter your mobile number"));
    }
    if is_blank(&request.otp) {
        return Ok(ApiOutcome::fail("Please enter otp code"));
    }
    let mobile_number = request.mobile_number.unwrap_or_default();
    let otp = request.otp.unwrap_or_default();

    let found = user::Entity::find()
        .filter(user::Column::MobileNumber.eq(&mobile_number))
        .filter(user::Column::Otp.eq(&otp))
        .one(state.db.as_ref())
        .await
        .map_err(store_error)?;

    let Some(user_model) = found else {
        warn!("OTP mismatch for mobile number: {}", mobile_number);
        return Ok(ApiOutcome::fail("Please check your otp"));
    };

    // The code is single-use: clear it before acknowledging the match.
    let mut consumed: user::ActiveModel = user_model.clone().into();
    consumed.otp = Set(None);
    match consumed.update(state.db.as_ref()).await {
        Ok(_) => {
            info!("OTP verified for user ID: {}", user_model.id);
            Ok(ApiOutcome::ok("Data found!", UserResponse::from(user_model)))
        }
        Err(db_error) => {
            error!("Failed to clear OTP for user ID {}: {}", user_model.id, db_error);
            Ok(ApiOutcome::fail("Database Server error!"))
        }
    }
}
