//! Service layer for the contact form backend.
//! - `contact::validation` is the pure field/shape check.
//! - `contact::repository` abstracts the ordered, append-only contact store.
//! - `contact::service` orchestrates both and is what the HTTP layer calls.

pub mod errors;
pub mod contact;
#[cfg(test)]
pub mod test_support;
