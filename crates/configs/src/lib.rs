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
    pub contacts: ContactsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

/// Where accepted contacts live. Without `data_file` the store is in-memory.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub data_file: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ContactsConfig {
    /// Cap on the number of contacts returned by the listing, newest first.
    #[serde(default)]
    pub list_limit: Option<usize>,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }

fn is_missing_file(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound)
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config file at `CONFIG_PATH` first; env vars only when that file does not exist.
    pub fn load_or_env() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_or_env_from(&path)
    }

    /// A present but invalid file is an error, never replaced by env defaults.
    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => Self::from_env(),
            Err(e) => return Err(e.context(format!("invalid config file {path}"))),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Build a config purely from `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`,
    /// `CONTACTS_DATA_FILE` and `CONTACTS_LIST_LIMIT`.
    pub fn from_env() -> Self {
        let var = |k: &str| std::env::var(k).ok().filter(|v| !v.trim().is_empty());
        Self {
            server: ServerConfig {
                host: var("SERVER_HOST").unwrap_or_else(default_host),
                port: var("SERVER_PORT").and_then(|p| p.parse().ok()).unwrap_or_else(default_port),
                worker_threads: var("TOKIO_WORKER_THREADS").and_then(|v| v.parse().ok()),
            },
            storage: StorageConfig { data_file: var("CONTACTS_DATA_FILE") },
            contacts: ContactsConfig {
                list_limit: var("CONTACTS_LIST_LIMIT").and_then(|v| v.parse().ok()),
            },
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        self.contacts.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        // 0 或未配置都回退为 4 个工作线程
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl StorageConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.data_file {
            if path.trim().is_empty() {
                return Err(anyhow!("storage.data_file must not be blank; omit it for in-memory storage"));
            }
        }
        Ok(())
    }
}

impl ContactsConfig {
    fn validate(&self) -> Result<()> {
        if self.list_limit == Some(0) {
            return Err(anyhow!("contacts.list_limit must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let mut cfg = load_from_str("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert!(cfg.storage.data_file.is_none());
        assert!(cfg.contacts.list_limit.is_none());
    }

    #[test]
    fn parses_all_sections() {
        let cfg = load_from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 3000
            worker_threads = 2

            [storage]
            data_file = "data/contacts.json"

            [contacts]
            list_limit = 50
            "#,
        )
        .unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:3000");
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.storage.data_file.as_deref(), Some("data/contacts.json"));
        assert_eq!(cfg.contacts.list_limit, Some(50));
    }

    #[test]
    fn normalize_fixes_blank_host_and_zero_threads() {
        let mut cfg = load_from_str("[server]\nhost = \"  \"\nport = 9000\nworker_threads = 0\n").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn rejects_invalid_values() {
        let mut zero_port = load_from_str("[server]\nport = 0\n").unwrap();
        assert!(zero_port.normalize_and_validate().is_err());

        let mut blank_file = load_from_str("[storage]\ndata_file = \" \"\n").unwrap();
        assert!(blank_file.normalize_and_validate().is_err());

        let mut zero_limit = load_from_str("[contacts]\nlist_limit = 0\n").unwrap();
        assert!(zero_limit.normalize_and_validate().is_err());
    }

    fn write_temp_config(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("contact_cfg_{}_{name}.toml", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn invalid_config_file_is_not_replaced_by_env() {
        let path = write_temp_config(
            "invalid_value",
            "[server]\nport = 9000\n[storage]\ndata_file = \"data/contacts.json\"\n[contacts]\nlist_limit = 0\n",
        );
        let res = AppConfig::load_or_env_from(path.to_str().unwrap());
        let _ = std::fs::remove_file(&path);
        assert!(res.is_err());
    }

    #[test]
    fn unparseable_config_file_is_an_error() {
        let path = write_temp_config("unparseable", "[server\nport = \"nope\"\n");
        let res = AppConfig::load_or_env_from(path.to_str().unwrap());
        let _ = std::fs::remove_file(&path);
        assert!(res.is_err());
    }

    #[test]
    fn valid_config_file_wins_over_env() {
        let path = write_temp_config(
            "valid",
            "[server]\nport = 9000\n[storage]\ndata_file = \"data/contacts.json\"\n",
        );
        let cfg = AppConfig::load_or_env_from(path.to_str().unwrap()).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.storage.data_file.as_deref(), Some("data/contacts.json"));
    }

    #[test]
    fn missing_config_file_falls_back_to_env() {
        let cfg = AppConfig::load_or_env_from("/nonexistent/contact-form-config.toml").unwrap();
        assert!(cfg.server.port > 0);
        assert_eq!(cfg.server.worker_threads.map(|w| w > 0), Some(true));
    }

    #[test]
    fn env_port_defaults_to_8080() {
        assert_eq!(default_port(), 8080);
        if std::env::var("SERVER_PORT").is_err() {
            assert_eq!(AppConfig::from_env().server.port, 8080);
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_from_file("/nonexistent/contact-form-config.toml").is_err());
    }
}
