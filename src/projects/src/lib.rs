//! Domain layer between the HTTP API and the storage crate: project and
//! equipment lifecycle, automatic point generation, dashboard stats and
//! export assembly.

use common::error::{TechdocError, TechdocResult};
use points::{EquipmentDesc, ExistingPoints, POINT_META, POINT_RULES};
use tracing::info;
use types::{
    activity::ActivityType,
    equipment::{self, EquipmentResp, ListEquipmentsResp},
    point::ListPointsResp,
    project::{self, ListProjectsResp, ProjectResp},
};

mod dashboard;

pub use dashboard::dashboard;

pub async fn create_project(owner: &String, req: project::CreateReq) -> TechdocResult<String> {
    let id = common::get_id();
    let name = req.name.clone();
    storage::project::insert(&id, owner, req)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?;

    info!("project {} created", name);
    events::record(
        Some(&id),
        ActivityType::ProjectCreated,
        "Projet créé",
        Some(name),
    )
    .await;

    Ok(id)
}

pub async fn read_project(id: &String) -> TechdocResult<ProjectResp> {
    storage::project::read_one(id)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?
        .ok_or_else(|| TechdocError::NotFound("projet".to_owned()))
}

pub async fn list_projects() -> TechdocResult<ListProjectsResp> {
    let data = storage::project::read_all()
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?;
    Ok(ListProjectsResp {
        total: data.len(),
        data,
    })
}

pub async fn recent_projects(limit: usize) -> TechdocResult<Vec<ProjectResp>> {
    storage::project::read_recent(limit.max(1) as i64)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))
}

pub async fn delete_project(id: &String) -> TechdocResult<()> {
    let project = read_project(id).await?;
    storage::project::delete(id)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?;

    info!("project {} deleted", id);
    events::record(
        Some(id),
        ActivityType::ProjectDeleted,
        "Projet supprimé",
        Some(project.name),
    )
    .await;

    Ok(())
}

/// Inserts the equipment, then generates and persists its missing points
/// (the project name is the tag prefix).
pub async fn add_equipment(
    project_id: &String,
    req: equipment::CreateReq,
) -> TechdocResult<equipment::CreateResp> {
    let project = read_project(project_id).await?;

    let id = common::get_id();
    storage::equipment::insert(&id, project_id, &req)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?;

    events::record(
        Some(project_id),
        ActivityType::EquipmentAdded,
        "Équipement ajouté",
        Some(format!("{} {}", req.r#type, req.model)),
    )
    .await;

    let equipment = EquipmentResp {
        id: id.clone(),
        project_id: project_id.clone(),
        r#type: req.r#type.clone(),
        room: req.room,
        model: req.model,
        qty: req.qty,
        ts: 0,
    };
    let points_created = generate_points(&project, &equipment).await?;

    Ok(equipment::CreateResp {
        id,
        r#type: req.r#type,
        points_created,
    })
}

pub async fn list_equipments(project_id: &String) -> TechdocResult<ListEquipmentsResp> {
    let data = storage::equipment::read_by_project(project_id)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?;
    Ok(ListEquipmentsResp {
        total: data.len(),
        data,
    })
}

pub async fn remove_equipment(project_id: &String, id: &String) -> TechdocResult<()> {
    let equipment = storage::equipment::read_one(id)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?
        .ok_or_else(|| TechdocError::NotFound("équipement".to_owned()))?;
    if &equipment.project_id != project_id {
        return Err(TechdocError::NotFound("équipement".to_owned()));
    }

    storage::equipment::delete(id)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?;

    events::record(
        Some(project_id),
        ActivityType::EquipmentRemoved,
        "Équipement supprimé",
        Some(format!("{} {}", equipment.r#type, equipment.model)),
    )
    .await;

    Ok(())
}

/// Re-runs the generator for an existing equipment. Idempotent: when the
/// point set is already complete the result is zero inserts.
pub async fn regenerate_points(project_id: &String, equipment_id: &String) -> TechdocResult<usize> {
    let project = read_project(project_id).await?;
    let equipment = storage::equipment::read_one(equipment_id)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?
        .ok_or_else(|| TechdocError::NotFound("équipement".to_owned()))?;
    if &equipment.project_id != project_id {
        return Err(TechdocError::NotFound("équipement".to_owned()));
    }

    generate_points(&project, &equipment).await
}

async fn generate_points(
    project: &ProjectResp,
    equipment: &EquipmentResp,
) -> TechdocResult<usize> {
    let existing: ExistingPoints = storage::point::read_existing_pairs(&equipment.id)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?
        .into_iter()
        .collect();

    let desc = EquipmentDesc {
        id: equipment.id.clone(),
        project_id: equipment.project_id.clone(),
        r#type: equipment.r#type.clone(),
        room: equipment.room.clone(),
        model: equipment.model.clone(),
        qty: equipment.qty,
    };
    let candidates = points::generate_points(&desc, &project.name, &POINT_RULES, &POINT_META, &existing);
    if candidates.is_empty() {
        return Ok(0);
    }

    let inserted = storage::point::insert_many(&candidates)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?;

    if inserted > 0 {
        events::record(
            Some(&equipment.project_id),
            ActivityType::PointsGenerated,
            "Points générés",
            Some(format!("{} points pour {}", inserted, equipment.r#type)),
        )
        .await;
    }

    Ok(inserted)
}

pub async fn list_points(project_id: &String) -> TechdocResult<ListPointsResp> {
    let data = storage::point::read_by_project(project_id)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?;
    Ok(ListPointsResp {
        total: data.len(),
        data,
    })
}

/// Loads a project with its equipments and points and renders the CSV
/// blob. Returns `(filename, body)`.
pub async fn export_csv(project_id: &String) -> TechdocResult<(String, String)> {
    let (project, equipments, points) = load_export_data(project_id).await?;
    let body = export::export_points_csv(&project, &equipments, &points)
        .map_err(|e| TechdocError::Common(e.to_string()))?;
    Ok((export::csv_filename(&project.name), body))
}

/// Same as [`export_csv`] for the PDF sheet.
pub async fn export_pdf(project_id: &String) -> TechdocResult<(String, Vec<u8>)> {
    let (project, equipments, points) = load_export_data(project_id).await?;
    let body = export::export_project_pdf(&project, &equipments, &points)
        .map_err(|e| TechdocError::Common(e.to_string()))?;
    Ok((export::pdf_filename(&project.name), body))
}

async fn load_export_data(
    project_id: &String,
) -> TechdocResult<(
    ProjectResp,
    Vec<EquipmentResp>,
    Vec<types::point::PointResp>,
)> {
    let project = read_project(project_id).await?;
    let equipments = storage::equipment::read_by_project(project_id)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?;
    let points = storage::point::read_by_project(project_id)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?;
    Ok((project, equipments, points))
}
