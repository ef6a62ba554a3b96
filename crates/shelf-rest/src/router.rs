//! Main application router.

use crate::{
    controllers::{
        album_controller, auth_controller, book_controller, comment_controller, file_controller,
        health_controller, pet_controller, photo_controller, song_controller, team_controller,
    },
    middleware::{auth_middleware, logging_middleware, AuthMiddlewareState},
    openapi::ApiDoc,
    responses::ApiResponse,
    state::AppState,
};
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, StatusCode, Uri},
    middleware,
    response::IntoResponse,
    Json, Router,
};
use serde_json::json;
use shelf_config::ServerConfig;
use shelf_core::BizCode;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router.
///
/// Everything under `/api/v1` passes through the auth middleware; reads stay
/// public and mutating handlers demand a user through their extractor.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let auth_state = AuthMiddlewareState {
        auth_service: state.auth_service.clone(),
    };

    let api_router = Router::new()
        .nest("/albums", album_controller::router())
        .nest("/books", book_controller::router())
        .nest("/photos", photo_controller::router())
        .nest("/songs", song_controller::router())
        .nest("/teams", team_controller::router())
        .nest("/pets", pet_controller::router())
        .nest("/comments", comment_controller::router())
        .nest("/files", file_controller::router())
        .nest("/auth", auth_controller::router())
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let router = Router::new()
        .merge(health_controller::router())
        .nest("/api/v1", api_router)
        .with_state(state)
        .nest_service("/static", ServeDir::new(&server_config.static_dir))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(server_config.max_body_size))
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(create_cors_layer(server_config))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with REST endpoints and Swagger UI at /swagger-ui");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// 404 envelope for unmatched routes.
async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error(
            BizCode::NotFound,
            "Route not found".to_string(),
            Some(json!({ "path": uri.path() })),
        )),
    )
}
