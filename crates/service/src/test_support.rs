#![cfg(test)]
use std::path::PathBuf;

use crate::contact::domain::{ContactSubmission, ValidInput};

/// Unique JSON file path under the system temp dir; callers clean up.
pub fn temp_data_file(prefix: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("{prefix}_{}", uuid::Uuid::new_v4()))
        .join("contacts.json")
}

pub fn submission(name: &str, email: &str, message: &str) -> ContactSubmission {
    ContactSubmission {
        name: Some(name.into()),
        email: Some(email.into()),
        message: Some(message.into()),
    }
}

pub fn valid_input(n: usize) -> ValidInput {
    ValidInput {
        name: format!("Visitor {n}"),
        email: format!("visitor{n}@example.com"),
        message: format!("message #{n}"),
    }
}
