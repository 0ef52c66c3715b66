use anyhow::Result;
use sqlx::prelude::FromRow;
use types::activity::{ActivityResp, ActivityType, QueryParams};

use super::POOL;

const TABLE_NAME: &str = "activities";

#[derive(FromRow)]
struct DbActivity {
    pub id: String,
    pub project_id: Option<String>,
    pub typ: i32,
    pub title: String,
    pub info: Option<String>,
    pub ts: i64,
}

impl DbActivity {
    fn transfer(self) -> Result<ActivityResp> {
        Ok(ActivityResp {
            id: self.id,
            project_id: self.project_id,
            r#type: self
                .typ
                .try_into()
                .map_err(|_| anyhow::anyhow!("unknown activity type {}", self.typ))?,
            title: self.title,
            info: self.info,
            ts: self.ts,
        })
    }
}

pub(crate) fn create_table() -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {} (
    id CHAR(32) PRIMARY KEY,
    project_id CHAR(32),
    typ SMALLINT NOT NULL,
    title VARCHAR(255) NOT NULL,
    info VARCHAR(255),
    ts BIGINT NOT NULL
);
"#,
        TABLE_NAME
    )
}

pub async fn insert(
    id: &String,
    project_id: Option<&String>,
    typ: ActivityType,
    title: &str,
    info: Option<String>,
    ts: i64,
) -> Result<()> {
    sqlx::query(
        format!(
            "INSERT INTO {} (id, project_id, typ, title, info, ts) VALUES (?, ?, ?, ?, ?, ?)",
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(id)
    .bind(project_id)
    .bind(Into::<i32>::into(typ))
    .bind(title)
    .bind(info)
    .bind(ts)
    .execute(POOL.get().unwrap())
    .await?;

    Ok(())
}

pub async fn search(query: &QueryParams) -> Result<Vec<ActivityResp>> {
    let limit = query.limit.unwrap_or(20) as i64;
    let rows = match &query.project_id {
        Some(project_id) => {
            sqlx::query_as::<_, DbActivity>(
                format!(
                    "SELECT * FROM {} WHERE project_id = ? ORDER BY ts DESC LIMIT ?",
                    TABLE_NAME
                )
                .as_str(),
            )
            .bind(project_id)
            .bind(limit)
            .fetch_all(POOL.get().unwrap())
            .await?
        }
        None => {
            sqlx::query_as::<_, DbActivity>(
                format!("SELECT * FROM {} ORDER BY ts DESC LIMIT ?", TABLE_NAME).as_str(),
            )
            .bind(limit)
            .fetch_all(POOL.get().unwrap())
            .await?
        }
    };

    rows.into_iter().map(DbActivity::transfer).collect()
}
