use anyhow::Result;
use sqlx::prelude::FromRow;
use types::project::{CreateReq, ProjectResp};

use super::POOL;

const TABLE_NAME: &str = "projects";

#[derive(FromRow)]
struct DbProject {
    pub id: String,
    pub name: String,
    pub client: Option<String>,
    pub project_date: Option<String>,
    #[allow(dead_code)]
    pub owner: String,
    pub ts: i64,
}

impl DbProject {
    fn transfer(self) -> ProjectResp {
        ProjectResp {
            id: self.id,
            name: self.name,
            client: self.client,
            project_date: self.project_date,
            ts: self.ts,
        }
    }
}

pub(crate) fn create_table() -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {} (
    id CHAR(32) PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    client VARCHAR(255),
    project_date VARCHAR(32),
    owner CHAR(32) NOT NULL,
    ts BIGINT NOT NULL
);
"#,
        TABLE_NAME
    )
}

pub async fn insert(id: &String, owner: &String, req: CreateReq) -> Result<()> {
    sqlx::query(
        format!(
            "INSERT INTO {} (id, name, client, project_date, owner, ts) VALUES (?, ?, ?, ?, ?, ?)",
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(id)
    .bind(req.name)
    .bind(req.client)
    .bind(req.project_date)
    .bind(owner)
    .bind(common::timestamp_millis())
    .execute(POOL.get().unwrap())
    .await?;

    Ok(())
}

pub async fn read_one(id: &String) -> Result<Option<ProjectResp>> {
    let project = sqlx::query_as::<_, DbProject>(
        format!("SELECT * FROM {} WHERE id = ?", TABLE_NAME).as_str(),
    )
    .bind(id)
    .fetch_optional(POOL.get().unwrap())
    .await?;

    Ok(project.map(DbProject::transfer))
}

pub async fn read_all() -> Result<Vec<ProjectResp>> {
    let projects = sqlx::query_as::<_, DbProject>(
        format!("SELECT * FROM {} ORDER BY ts DESC", TABLE_NAME).as_str(),
    )
    .fetch_all(POOL.get().unwrap())
    .await?;

    Ok(projects.into_iter().map(DbProject::transfer).collect())
}

pub async fn read_recent(limit: i64) -> Result<Vec<ProjectResp>> {
    let projects = sqlx::query_as::<_, DbProject>(
        format!("SELECT * FROM {} ORDER BY ts DESC LIMIT ?", TABLE_NAME).as_str(),
    )
    .bind(limit)
    .fetch_all(POOL.get().unwrap())
    .await?;

    Ok(projects.into_iter().map(DbProject::transfer).collect())
}

pub async fn count() -> Result<i64> {
    let count: i64 = sqlx::query_scalar(format!("SELECT COUNT(*) FROM {}", TABLE_NAME).as_str())
        .fetch_one(POOL.get().unwrap())
        .await?;

    Ok(count)
}

pub async fn count_since(ts: i64) -> Result<i64> {
    let count: i64 =
        sqlx::query_scalar(format!("SELECT COUNT(*) FROM {} WHERE ts >= ?", TABLE_NAME).as_str())
            .bind(ts)
            .fetch_one(POOL.get().unwrap())
            .await?;

    Ok(count)
}

/// Creation timestamps since `ts`, oldest first. Day bucketing happens in
/// the domain layer.
pub async fn read_ts_since(ts: i64) -> Result<Vec<i64>> {
    let rows: Vec<i64> = sqlx::query_scalar(
        format!(
            "SELECT ts FROM {} WHERE ts >= ? ORDER BY ts ASC",
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(ts)
    .fetch_all(POOL.get().unwrap())
    .await?;

    Ok(rows)
}

/// Deletes the project with its equipments and points in one transaction.
pub async fn delete(id: &String) -> Result<()> {
    let mut tx = POOL.get().unwrap().begin().await?;

    sqlx::query("DELETE FROM points WHERE project_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM equipments WHERE project_id = ?")
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
