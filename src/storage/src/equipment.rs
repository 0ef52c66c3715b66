use anyhow::Result;
use sqlx::prelude::FromRow;
use types::equipment::{CreateReq, EquipmentResp};

use super::POOL;

const TABLE_NAME: &str = "equipments";

#[derive(FromRow)]
struct DbEquipment {
    pub id: String,
    pub project_id: String,
    #[sqlx(rename = "type")]
    pub r#type: String,
    pub room: String,
    pub model: String,
    pub qty: i64,
    pub ts: i64,
}

impl DbEquipment {
    fn transfer(self) -> EquipmentResp {
        EquipmentResp {
            id: self.id,
            project_id: self.project_id,
            r#type: self.r#type,
            room: self.room,
            model: self.model,
            qty: self.qty,
            ts: self.ts,
        }
    }
}

pub(crate) fn create_table() -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {} (
    id CHAR(32) PRIMARY KEY,
    project_id CHAR(32) NOT NULL,
    type VARCHAR(64) NOT NULL,
    room VARCHAR(255) NOT NULL,
    model VARCHAR(255) NOT NULL,
    qty BIGINT NOT NULL,
    ts BIGINT NOT NULL
);
"#,
        TABLE_NAME
    )
}

pub async fn insert(id: &String, project_id: &String, req: &CreateReq) -> Result<()> {
    sqlx::query(
        format!(
            "INSERT INTO {} (id, project_id, type, room, model, qty, ts) VALUES (?, ?, ?, ?, ?, ?, ?)",
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(id)
    .bind(project_id)
    .bind(&req.r#type)
    .bind(&req.room)
    .bind(&req.model)
    .bind(req.qty)
    .bind(common::timestamp_millis())
    .execute(POOL.get().unwrap())
    .await?;

    Ok(())
}

pub async fn read_one(id: &String) -> Result<Option<EquipmentResp>> {
    let equipment = sqlx::query_as::<_, DbEquipment>(
        format!("SELECT * FROM {} WHERE id = ?", TABLE_NAME).as_str(),
    )
    .bind(id)
    .fetch_optional(POOL.get().unwrap())
    .await?;

    Ok(equipment.map(DbEquipment::transfer))
}

pub async fn read_by_project(project_id: &String) -> Result<Vec<EquipmentResp>> {
    let equipments = sqlx::query_as::<_, DbEquipment>(
        format!(
            "SELECT * FROM {} WHERE project_id = ? ORDER BY ts DESC",
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(project_id)
    .fetch_all(POOL.get().unwrap())
    .await?;

    Ok(equipments.into_iter().map(DbEquipment::transfer).collect())
}

pub async fn count() -> Result<i64> {
    let count: i64 = sqlx::query_scalar(format!("SELECT COUNT(*) FROM {}", TABLE_NAME).as_str())
        .fetch_one(POOL.get().unwrap())
        .await?;

    Ok(count)
}

pub async fn count_by_type() -> Result<Vec<(String, i64)>> {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        format!("SELECT type, COUNT(*) FROM {} GROUP BY type", TABLE_NAME).as_str(),
    )
    .fetch_all(POOL.get().unwrap())
    .await?;

    Ok(rows)
}

/// Deletes the equipment and its points in one transaction.
pub async fn delete(id: &String) -> Result<()> {
    let mut tx = POOL.get().unwrap().begin().await?;

    sqlx::query("DELETE FROM points WHERE equipment_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query(format!("DELETE FROM {} WHERE id = ?", TABLE_NAME).as_str())
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}
