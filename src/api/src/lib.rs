use std::result;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use common::error::TechdocError;
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

mod activity_api;
mod equipment_api;
mod project_api;
mod user_api;

pub(crate) type AppResult<T, E = AppError> = result::Result<T, E>;

pub(crate) struct AppError(TechdocError);

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl From<TechdocError> for AppError {
    fn from(value: TechdocError) -> Self {
        Self(value)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        let status =
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            Json(ErrorBody {
                code,
                message: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

pub async fn start(port: u16) {
    let protected = Router::new()
        .route("/api/dashboard", get(dashboard))
        .route("/api/user/me", get(user_api::me))
        .route("/api/user/password", put(user_api::password))
        .nest("/api/project", project_api::routes())
        .nest("/api/activity", activity_api::routes())
        .layer(middleware::from_fn(user_api::auth));

    let app = Router::new()
        .route("/api/user/registration", post(user_api::registration))
        .route("/api/user/login", post(user_api::login))
        .merge(protected)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let listener = TcpListener::bind(("0.0.0.0", port)).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn dashboard() -> AppResult<Json<types::project::DashboardResp>> {
    Ok(Json(projects::dashboard().await?))
}
