use std::{fs::File, path::Path, str::FromStr, sync::LazyLock};

use anyhow::Result;
use sqlx::{any::AnyConnectOptions, AnyPool, ConnectOptions as _};
use tokio::sync::OnceCell;

use common::config::StorageConfig;

static POOL: LazyLock<OnceCell<AnyPool>> = LazyLock::new(OnceCell::new);

pub mod activity;
pub mod equipment;
pub mod point;
pub mod project;
pub mod user;

pub async fn init(config: &StorageConfig) -> Result<()> {
    sqlx::any::install_default_drivers();
    let opt = match config {
        StorageConfig::Sqlite(sqlite) => {
            let path = Path::new(&sqlite.path);
            if !path.exists() {
                File::create(&sqlite.path)?;
            }
            AnyConnectOptions::from_str(format!("sqlite://{}", sqlite.path).as_str())?
                .disable_statement_logging()
        }
        StorageConfig::Mysql(mysql) => AnyConnectOptions::from_str(
            format!(
                "mysql://{}:{}@{}:{}/{}",
                mysql.username, mysql.password, mysql.host, mysql.port, mysql.db_name
            )
            .as_str(),
        )?
        .disable_statement_logging(),
    };

    let pool = AnyPool::connect_with(opt).await?;
    POOL.set(pool).unwrap();

    sqlx::query(&user::create_table())
        .execute(POOL.get().unwrap())
        .await?;
    sqlx::query(&project::create_table())
        .execute(POOL.get().unwrap())
        .await?;
    sqlx::query(&equipment::create_table())
        .execute(POOL.get().unwrap())
        .await?;
    sqlx::query(&point::create_table())
        .execute(POOL.get().unwrap())
        .await?;
    sqlx::query(&activity::create_table())
        .execute(POOL.get().unwrap())
        .await?;

    Ok(())
}
