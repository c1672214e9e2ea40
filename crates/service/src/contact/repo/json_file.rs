use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::{fs, sync::RwLock};
use tracing::{debug, warn};

use crate::contact::domain::{Contact, ContactLog, ValidInput};
use crate::contact::repository::ContactRepository;
use crate::errors::ServiceError;

/// Durable repository: the whole log is kept in memory and mirrored to a
/// JSON array on disk after every insert.
#[derive(Debug)]
pub struct JsonFileContactRepository {
    log: RwLock<ContactLog>,
    file_path: PathBuf,
}

impl JsonFileContactRepository {
    /// Load the file, creating it (and its parent dir) with an empty array if missing.
    /// A file that exists but cannot be parsed is an error, never silently reset.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
        }

        let records: Vec<Contact> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Storage(format!("{}: {e}", file_path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                fs::write(&file_path, b"[]").await.map_err(ServiceError::storage)?;
                Vec::new()
            }
            Err(e) => return Err(ServiceError::storage(e)),
        };

        let log = ContactLog::from_records(records).map_err(ServiceError::Storage)?;
        debug!(path = %file_path.display(), count = log.len(), "contact file loaded");
        Ok(Self { log: RwLock::new(log), file_path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    // 先写临时文件再 rename，避免写到一半的文件覆盖旧数据
    async fn persist(&self, log: &ContactLog) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(log.records()).map_err(ServiceError::storage)?;
        let mut tmp = self.file_path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, data).await.map_err(ServiceError::storage)?;
        fs::rename(&tmp, &self.file_path).await.map_err(ServiceError::storage)?;
        Ok(())
    }
}

#[async_trait]
impl ContactRepository for JsonFileContactRepository {
    async fn insert(&self, input: ValidInput) -> Result<Contact, ServiceError> {
        // write lock held across persist so file writes are serialized too
        let mut log = self.log.write().await;
        let contact = log.append(input, Utc::now());
        if let Err(e) = self.persist(&log).await {
            log.pop_last();
            warn!(path = %self.file_path.display(), error = %e, "contact persist failed; rolled back");
            return Err(e);
        }
        Ok(contact)
    }

    async fn list_all(&self) -> Result<Vec<Contact>, ServiceError> {
        let log = self.log.read().await;
        Ok(log.newest_first())
    }
}
