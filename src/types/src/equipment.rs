use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct CreateReq {
    /// Equipment category. Unknown categories are accepted and simply
    /// generate no points.
    pub r#type: String,
    pub room: String,
    pub model: String,
    #[serde(default = "default_qty")]
    pub qty: i64,
}

fn default_qty() -> i64 {
    1
}

#[derive(Serialize)]
pub struct CreateResp {
    pub id: String,
    pub r#type: String,
    pub points_created: usize,
}

#[derive(Serialize, Clone)]
pub struct EquipmentResp {
    pub id: String,
    pub project_id: String,
    pub r#type: String,
    pub room: String,
    pub model: String,
    pub qty: i64,
    pub ts: i64,
}

#[derive(Serialize)]
pub struct ListEquipmentsResp {
    pub total: usize,
    pub data: Vec<EquipmentResp>,
}
