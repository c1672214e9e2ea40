//! Concrete `ContactRepository` backends beyond the in-memory one.

pub mod json_file;

use std::sync::Arc;

use super::repository::{ContactRepository, InMemoryContactRepository};
use crate::errors::ServiceError;

/// Pick the backend: JSON file when a path is given, in-memory otherwise.
pub async fn open_repository(
    data_file: Option<&str>,
) -> Result<Arc<dyn ContactRepository>, ServiceError> {
    let repo: Arc<dyn ContactRepository> = match data_file {
        Some(path) => Arc::new(json_file::JsonFileContactRepository::open(path).await?),
        None => Arc::new(InMemoryContactRepository::new()),
    };
    Ok(repo)
}
