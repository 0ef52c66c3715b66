use axum::{
    extract::Path,
    routing::{delete, get, post},
    Json, Router,
};
use types::equipment::{CreateReq, CreateResp, ListEquipmentsResp};

use crate::AppResult;

pub fn routes() -> Router {
    Router::new()
        .route("/", post(create_equipment))
        .route("/list", get(list_equipments))
        .route("/:equipment_id/generate", post(generate_points))
        .route("/:equipment_id", delete(delete_equipment))
}

async fn create_equipment(
    Path(project_id): Path<String>,
    Json(req): Json<CreateReq>,
) -> AppResult<Json<CreateResp>> {
    Ok(Json(projects::add_equipment(&project_id, req).await?))
}

async fn list_equipments(
    Path(project_id): Path<String>,
) -> AppResult<Json<ListEquipmentsResp>> {
    Ok(Json(projects::list_equipments(&project_id).await?))
}

#[derive(serde::Serialize)]
struct GenerateResp {
    points_created: usize,
}

async fn generate_points(
    Path((project_id, equipment_id)): Path<(String, String)>,
) -> AppResult<Json<GenerateResp>> {
    let points_created = projects::regenerate_points(&project_id, &equipment_id).await?;
    Ok(Json(GenerateResp { points_created }))
}

async fn delete_equipment(
    Path((project_id, equipment_id)): Path<(String, String)>,
) -> AppResult<()> {
    projects::remove_equipment(&project_id, &equipment_id).await?;
    Ok(())
}
