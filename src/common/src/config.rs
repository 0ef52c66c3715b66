use std::{fs, path::Path};

use anyhow::Result;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    pub storage: StorageConfig,
}

fn default_port() -> u16 {
    13000
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageConfig {
    Sqlite(SqliteConfig),
    Mysql(MysqlConfig),
}

#[derive(Deserialize)]
pub struct SqliteConfig {
    pub path: String,
}

#[derive(Deserialize)]
pub struct MysqlConfig {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub db_name: String,
}

pub fn load(path: impl AsRef<Path>) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            storage: StorageConfig::Sqlite(SqliteConfig {
                path: "techdoc.db".to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sqlite_config() {
        let config: Config = toml::from_str(
            r#"
port = 14000

[storage.sqlite]
path = "data.db"
"#,
        )
        .unwrap();
        assert_eq!(config.port, 14000);
        match config.storage {
            StorageConfig::Sqlite(sqlite) => assert_eq!(sqlite.path, "data.db"),
            _ => panic!("expected sqlite storage"),
        }
    }
}
