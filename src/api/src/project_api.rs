use axum::{
    extract::{Path, Query},
    http::header,
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use types::project::{CreateReq, ListProjectsResp, ProjectResp, RecentQueryParams};

use crate::{equipment_api, user_api::Claims, AppResult};

pub fn routes() -> Router {
    Router::new()
        .route("/", post(create_project))
        .route("/list", get(list_projects))
        .route("/recent", get(recent_projects))
        .route("/:project_id", get(read_project))
        .route("/:project_id", delete(delete_project))
        .route("/:project_id/export/csv", get(export_csv))
        .route("/:project_id/export/pdf", get(export_pdf))
        .route("/:project_id/point/list", get(list_points))
        .nest("/:project_id/equipment", equipment_api::routes())
}

#[derive(serde::Serialize)]
struct CreateProjectResp {
    id: String,
}

async fn create_project(
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateReq>,
) -> AppResult<Json<CreateProjectResp>> {
    let id = projects::create_project(&claims.sub, req).await?;
    Ok(Json(CreateProjectResp { id }))
}

async fn list_projects() -> AppResult<Json<ListProjectsResp>> {
    Ok(Json(projects::list_projects().await?))
}

async fn recent_projects(
    Query(query): Query<RecentQueryParams>,
) -> AppResult<Json<Vec<ProjectResp>>> {
    let limit = query.limit.unwrap_or(5);
    Ok(Json(projects::recent_projects(limit).await?))
}

async fn read_project(Path(project_id): Path<String>) -> AppResult<Json<ProjectResp>> {
    Ok(Json(projects::read_project(&project_id).await?))
}

async fn delete_project(Path(project_id): Path<String>) -> AppResult<()> {
    projects::delete_project(&project_id).await?;
    Ok(())
}

async fn list_points(
    Path(project_id): Path<String>,
) -> AppResult<Json<types::point::ListPointsResp>> {
    Ok(Json(projects::list_points(&project_id).await?))
}

async fn export_csv(Path(project_id): Path<String>) -> AppResult<impl IntoResponse> {
    let (filename, body) = projects::export_csv(&project_id).await?;
    Ok((
        [
            (
                header::CONTENT_TYPE,
                "text/csv; charset=utf-8".to_owned(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    ))
}

async fn export_pdf(Path(project_id): Path<String>) -> AppResult<impl IntoResponse> {
    let (filename, body) = projects::export_pdf(&project_id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    ))
}
