use anyhow::Result;
use sqlx::prelude::FromRow;

use super::POOL;

const TABLE_NAME: &str = "users";

#[derive(FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub ts: i64,
}

pub(crate) fn create_table() -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {} (
    id CHAR(32) PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    password VARCHAR(255) NOT NULL,
    ts BIGINT NOT NULL
);
"#,
        TABLE_NAME
    )
}

pub async fn insert(id: &String, name: String, email: String, password_hash: String) -> Result<()> {
    sqlx::query(
        format!(
            "INSERT INTO {} (id, name, email, password, ts) VALUES (?, ?, ?, ?, ?)",
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(common::timestamp_millis())
    .execute(POOL.get().unwrap())
    .await?;

    Ok(())
}

pub async fn read_by_email(email: &String) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        format!("SELECT * FROM {} WHERE email = ?", TABLE_NAME).as_str(),
    )
    .bind(email)
    .fetch_optional(POOL.get().unwrap())
    .await?;

    Ok(user)
}

pub async fn read_by_id(id: &String) -> Result<Option<User>> {
    let user =
        sqlx::query_as::<_, User>(format!("SELECT * FROM {} WHERE id = ?", TABLE_NAME).as_str())
            .bind(id)
            .fetch_optional(POOL.get().unwrap())
            .await?;

    Ok(user)
}

pub async fn update_password(id: &String, password_hash: String) -> Result<()> {
    sqlx::query(format!("UPDATE {} SET password = ? WHERE id = ?", TABLE_NAME).as_str())
        .bind(password_hash)
        .bind(id)
        .execute(POOL.get().unwrap())
        .await?;

    Ok(())
}
