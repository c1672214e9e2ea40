//! Contact intake: three layers (validation, repository, service).

pub mod domain;
pub mod validation;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{Contact, ContactStatus, ContactSubmission, ValidInput};
pub use repository::{ContactRepository, InMemoryContactRepository};
pub use repo::json_file::JsonFileContactRepository;
pub use service::{ContactService, ContactServiceConfig, DynContactService, SubmitReceipt};
