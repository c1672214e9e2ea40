use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use super::domain::{Contact, ContactSubmission};
use super::repository::ContactRepository;
use crate::errors::ServiceError;

/// Contact service configuration
#[derive(Clone, Debug, Default)]
pub struct ContactServiceConfig {
    /// Keep only the newest `n` contacts in listings; `None` lists everything.
    pub list_limit: Option<usize>,
}

/// Result of an accepted submission.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Contact intake and listing, independent of the web framework.
pub struct ContactService<R: ContactRepository + ?Sized> {
    repo: Arc<R>,
    cfg: ContactServiceConfig,
}

/// Service over a runtime-selected repository, as held by the HTTP layer.
pub type DynContactService = ContactService<dyn ContactRepository>;

impl<R: ContactRepository + ?Sized> ContactService<R> {
    pub fn new(repo: Arc<R>, cfg: ContactServiceConfig) -> Self { Self { repo, cfg } }

    /// Validate a submission and persist it. Rejected input stores nothing.
    ///
    /// # Examples
    /// ```
    /// use service::contact::{ContactService, ContactServiceConfig, ContactSubmission, InMemoryContactRepository};
    /// use std::sync::Arc;
    /// let svc = ContactService::new(Arc::new(InMemoryContactRepository::new()), ContactServiceConfig::default());
    /// let input = ContactSubmission {
    ///     name: Some("Ada".into()),
    ///     email: Some("ada@example.com".into()),
    ///     message: Some("Hello".into()),
    /// };
    /// let receipt = tokio_test::block_on(svc.submit(input)).unwrap();
    /// let listed = tokio_test::block_on(svc.list_contacts()).unwrap();
    /// assert_eq!(listed[0].id, receipt.id);
    /// ```
    #[instrument(skip(self, input))]
    pub async fn submit(&self, input: ContactSubmission) -> Result<SubmitReceipt, ServiceError> {
        let valid = match input.validate() {
            Ok(v) => v,
            Err(e) => {
                warn!(reason = %e, "contact_rejected");
                return Err(e.into());
            }
        };

        let contact = self.repo.insert(valid).await.inspect_err(|e| {
            error!(error = %e, "contact_insert_failed");
        })?;
        info!(contact_id = %contact.id, "contact_accepted");
        Ok(SubmitReceipt { id: contact.id, created_at: contact.created_at })
    }

    /// All contacts, newest first, capped by `list_limit` when configured.
    #[instrument(skip(self))]
    pub async fn list_contacts(&self) -> Result<Vec<Contact>, ServiceError> {
        let mut contacts = self.repo.list_all().await.inspect_err(|e| {
            error!(error = %e, "contact_list_failed");
        })?;
        if let Some(limit) = self.cfg.list_limit {
            contacts.truncate(limit);
        }
        debug!(count = contacts.len(), "contacts_listed");
        Ok(contacts)
    }
}
