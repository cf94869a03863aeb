use crate::handlers::{
    auth::{check_otp, login, login_with_mobile, register},
    health::health_check,
    recovery::{check_verification_code, reset_password, send_password_reset_code},
    users::{change_password, user_details, user_update},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Registration and login
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/login_with_mobile", post(login_with_mobile))
        .route("/check_otp", post(check_otp))
        // Password recovery
        .route("/send_password_reset_code", post(send_password_reset_code))
        .route("/check_verification_code", post(check_verification_code))
        .route("/reset_password", post(reset_password))
        // Profile and password management
        .route("/user_details/:id", get(user_details))
        .route("/user_update/:id", put(user_update))
        .route("/change_password/:id", put(change_password))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
