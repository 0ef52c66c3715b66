use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct CreateReq {
    pub name: String,
    #[serde(default)]
    pub client: Option<String>,
    /// ISO date (YYYY-MM-DD).
    #[serde(default)]
    pub project_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecentQueryParams {
    pub limit: Option<usize>,
}

#[derive(Serialize, Clone)]
pub struct ProjectResp {
    pub id: String,
    pub name: String,
    pub client: Option<String>,
    pub project_date: Option<String>,
    pub ts: i64,
}

#[derive(Serialize)]
pub struct ListProjectsResp {
    pub total: usize,
    pub data: Vec<ProjectResp>,
}

#[derive(Serialize)]
pub struct DashboardResp {
    pub projects_total: usize,
    pub projects_last_week: usize,
    pub equipments_total: usize,
    pub points_total: usize,
    pub equipments_by_type: std::collections::HashMap<String, usize>,
    pub trends: Vec<TrendPoint>,
}

/// One day of the created-per-day series.
#[derive(Serialize)]
pub struct TrendPoint {
    pub x: usize,
    pub y: usize,
    pub date: String,
}
