use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8081, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the JSON snapshot files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Directory of the static dashboard bundle served at `/`.
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir(), frontend_dir: default_frontend_dir() }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CatalogConfig {
    /// Artificial delay applied before catalog reads, in milliseconds.
    /// The dashboard was built against a backend that simulated network
    /// latency on fetches; 0 disables it.
    #[serde(default)]
    pub simulated_latency_ms: u64,
}

fn default_data_dir() -> String { "data".to_string() }
fn default_frontend_dir() -> String { "frontend".to_string() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.normalize_from_env();
        self.storage.validate()?;
        self.catalog.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        // TOML wins; env vars fill in blanks.
        if self.data_dir.trim().is_empty() {
            self.data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| default_data_dir());
        }
        if self.frontend_dir.trim().is_empty() {
            self.frontend_dir =
                std::env::var("FRONTEND_DIR").unwrap_or_else(|_| default_frontend_dir());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir is empty"));
        }
        Ok(())
    }
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<()> {
        // A delay past a minute means a typo in units, not a slow network.
        if self.simulated_latency_ms > 60_000 {
            return Err(anyhow!("catalog.simulated_latency_ms must be <= 60000"));
        }
        Ok(())
    }
}
