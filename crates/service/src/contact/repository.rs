use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::domain::{Contact, ContactLog, ValidInput};
use crate::errors::ServiceError;

/// Ordered, append-only store of accepted contacts.
///
/// `insert` must make id generation and append one atomic step; `list_all`
/// must return a consistent snapshot sorted newest first.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn insert(&self, input: ValidInput) -> Result<Contact, ServiceError>;
    async fn list_all(&self) -> Result<Vec<Contact>, ServiceError>;
}

/// Process-local repository; contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryContactRepository {
    log: RwLock<ContactLog>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.log.read().await.len()
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn insert(&self, input: ValidInput) -> Result<Contact, ServiceError> {
        let mut log = self.log.write().await;
        Ok(log.append(input, Utc::now()))
    }

    async fn list_all(&self) -> Result<Vec<Contact>, ServiceError> {
        let log = self.log.read().await;
        Ok(log.newest_first())
    }
}
