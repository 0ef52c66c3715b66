use anyhow::Result;
use sqlx::prelude::FromRow;
use types::point::{IoClass, NewPoint, PointResp, Rw};

use super::POOL;

const TABLE_NAME: &str = "points";

#[derive(FromRow)]
struct DbPoint {
    pub id: String,
    pub project_id: String,
    pub equipment_id: String,
    pub tag: String,
    pub idx: i64,
    pub point_key: String,
    pub rw: Option<String>,
    pub io: Option<String>,
    pub unit: Option<String>,
    pub description: Option<String>,
    #[allow(dead_code)]
    pub ts: i64,
}

impl DbPoint {
    fn transfer(self) -> PointResp {
        PointResp {
            id: self.id,
            project_id: self.project_id,
            equipment_id: self.equipment_id,
            tag: self.tag,
            idx: self.idx,
            point_key: self.point_key,
            rw: self.rw.and_then(|s| Rw::try_from(s.as_str()).ok()),
            io: self.io.and_then(|s| IoClass::try_from(s.as_str()).ok()),
            unit: self.unit,
            description: self.description,
        }
    }
}

pub(crate) fn create_table() -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {} (
    id CHAR(32) PRIMARY KEY,
    project_id CHAR(32) NOT NULL,
    equipment_id CHAR(32) NOT NULL,
    tag VARCHAR(512) NOT NULL,
    idx BIGINT NOT NULL,
    point_key VARCHAR(64) NOT NULL,
    rw VARCHAR(8),
    io VARCHAR(16),
    unit VARCHAR(32),
    description VARCHAR(255),
    ts BIGINT NOT NULL,
    UNIQUE (equipment_id, idx, point_key)
);
"#,
        TABLE_NAME
    )
}

/// Batch insert of generated points inside one transaction. A row hitting
/// the `(equipment_id, idx, point_key)` uniqueness constraint is skipped,
/// so a lost read-then-write race degrades to a no-op. MySQL has no
/// `ON CONFLICT` clause, so the skip catches the unique-violation error
/// per row instead. Returns the number of rows actually inserted.
pub async fn insert_many(points: &[NewPoint]) -> Result<usize> {
    if points.is_empty() {
        return Ok(0);
    }

    let mut tx = POOL.get().unwrap().begin().await?;
    let mut inserted = 0usize;
    for point in points {
        let result = sqlx::query(
            format!(
                r#"INSERT INTO {}
(id, project_id, equipment_id, tag, idx, point_key, rw, io, unit, description, ts)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
                TABLE_NAME
            )
            .as_str(),
        )
        .bind(common::get_id())
        .bind(&point.project_id)
        .bind(&point.equipment_id)
        .bind(&point.tag)
        .bind(point.idx)
        .bind(&point.point_key)
        .bind(point.rw.map(|rw| rw.as_str()))
        .bind(point.io.map(|io| io.as_str()))
        .bind(&point.unit)
        .bind(&point.description)
        .bind(common::timestamp_millis())
        .execute(&mut *tx)
        .await;
        match result {
            Ok(done) => inserted += done.rows_affected() as usize,
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {}
            Err(e) => return Err(e.into()),
        }
    }
    tx.commit().await?;

    Ok(inserted)
}

/// `(idx, point_key)` pairs already stored for one equipment.
pub async fn read_existing_pairs(equipment_id: &String) -> Result<Vec<(i64, String)>> {
    let pairs: Vec<(i64, String)> = sqlx::query_as(
        format!(
            "SELECT idx, point_key FROM {} WHERE equipment_id = ?",
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(equipment_id)
    .fetch_all(POOL.get().unwrap())
    .await?;

    Ok(pairs)
}

/// Points of a project in generation order. Sorting on `tag` would go
/// lexicographic once the index padding widens past two digits.
pub async fn read_by_project(project_id: &String) -> Result<Vec<PointResp>> {
    let points = sqlx::query_as::<_, DbPoint>(
        format!(
            "SELECT * FROM {} WHERE project_id = ? ORDER BY equipment_id ASC, idx ASC, point_key ASC",
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(project_id)
    .fetch_all(POOL.get().unwrap())
    .await?;

    Ok(points.into_iter().map(DbPoint::transfer).collect())
}

pub async fn count() -> Result<i64> {
    let count: i64 = sqlx::query_scalar(format!("SELECT COUNT(*) FROM {}", TABLE_NAME).as_str())
        .fetch_one(POOL.get().unwrap())
        .await?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use common::config::{SqliteConfig, StorageConfig};

    use super::*;

    fn new_point(equipment_id: &str, idx: i64, key: &str) -> NewPoint {
        NewPoint {
            project_id: "p1".to_owned(),
            equipment_id: equipment_id.to_owned(),
            tag: format!("P1.R1.HVAC.M1.{:02}.{}", idx, key),
            idx,
            point_key: key.to_owned(),
            rw: None,
            io: None,
            unit: None,
            description: None,
        }
    }

    // Single test: the pool static can only be initialized once per process.
    #[tokio::test]
    async fn duplicate_rows_are_skipped_and_listings_sort_numerically() {
        let path = std::env::temp_dir().join(format!("techdoc-points-{}.db", common::get_id()));
        let config = StorageConfig::Sqlite(SqliteConfig {
            path: path.to_string_lossy().into_owned(),
        });
        crate::init(&config).await.unwrap();

        let first = insert_many(&[new_point("e1", 1, "alarm"), new_point("e1", 1, "cmdOnOff")])
            .await
            .unwrap();
        assert_eq!(first, 2);

        // Re-running with one already-stored pair inserts only the new one.
        let second = insert_many(&[new_point("e1", 1, "alarm"), new_point("e1", 2, "alarm")])
            .await
            .unwrap();
        assert_eq!(second, 1);
        assert_eq!(read_existing_pairs(&"e1".to_owned()).await.unwrap().len(), 3);

        // Unit index 100 lists after 2, not before it.
        insert_many(&[new_point("e1", 100, "alarm")]).await.unwrap();
        let points = read_by_project(&"p1".to_owned()).await.unwrap();
        let idxs: Vec<i64> = points.iter().map(|p| p.idx).collect();
        assert_eq!(idxs, vec![1, 1, 2, 100]);

        let _ = std::fs::remove_file(path);
    }
}
