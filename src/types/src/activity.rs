use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    ProjectCreated,
    ProjectDeleted,
    EquipmentAdded,
    EquipmentRemoved,
    PointsGenerated,
}

impl From<ActivityType> for i32 {
    fn from(value: ActivityType) -> Self {
        match value {
            ActivityType::ProjectCreated => 1,
            ActivityType::ProjectDeleted => 2,
            ActivityType::EquipmentAdded => 3,
            ActivityType::EquipmentRemoved => 4,
            ActivityType::PointsGenerated => 5,
        }
    }
}

impl TryFrom<i32> for ActivityType {
    type Error = ();

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ActivityType::ProjectCreated),
            2 => Ok(ActivityType::ProjectDeleted),
            3 => Ok(ActivityType::EquipmentAdded),
            4 => Ok(ActivityType::EquipmentRemoved),
            5 => Ok(ActivityType::PointsGenerated),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QueryParams {
    pub project_id: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityResp {
    pub id: String,
    pub project_id: Option<String>,
    pub r#type: ActivityType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    pub ts: i64,
}

#[derive(Serialize)]
pub struct ListActivitiesResp {
    pub total: usize,
    pub data: Vec<ActivityResp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_type_i32_round_trip() {
        for typ in [
            ActivityType::ProjectCreated,
            ActivityType::ProjectDeleted,
            ActivityType::EquipmentAdded,
            ActivityType::EquipmentRemoved,
            ActivityType::PointsGenerated,
        ] {
            let n: i32 = typ.into();
            assert_eq!(ActivityType::try_from(n), Ok(typ));
        }
        assert!(ActivityType::try_from(0).is_err());
    }
}
