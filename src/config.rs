use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
    pub max_body_size: usize,  // in bytes
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
    Redis,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: PathBuf,
    pub redis_url: String,
    pub namespace: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HasherKind {
    Legacy,
    Bcrypt,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub hasher: HasherKind,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 3000,
                static_dir: "static".into(),
                max_body_size: 64 * 1024,
            },
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                path: PathBuf::from("data/taskly.json"),
                redis_url: "redis://127.0.0.1/".into(),
                namespace: "taskly".into(),
            },
            auth: AuthConfig {
                hasher: HasherKind::Legacy,
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
        }
    }
}
