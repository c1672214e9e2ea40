use std::collections::HashSet;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw submission as posted by a visitor; any field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Submission that passed validation, fields kept as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidInput {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    New,
}

/// Stored contact record. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: ContactStatus,
    #[serde(with = "rfc3339_millis")]
    pub created_at: DateTime<Utc>,
}

/// `createdAt` on the wire: RFC 3339, UTC, always three fractional digits,
/// so string order and time order agree.
pub mod rfc3339_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Append-only log of contacts in insertion order.
///
/// Both repository implementations keep one of these behind their lock; the
/// log owns id uniqueness and the non-decreasing `created_at` rule.
#[derive(Debug, Default)]
pub struct ContactLog {
    records: Vec<Contact>,
    ids: HashSet<Uuid>,
    latest: Option<DateTime<Utc>>,
}

impl ContactLog {
    /// Rebuild a log from previously persisted records; duplicate ids are rejected.
    pub fn from_records(records: Vec<Contact>) -> Result<Self, String> {
        let mut ids = HashSet::with_capacity(records.len());
        for c in &records {
            if !ids.insert(c.id) {
                return Err(format!("duplicate contact id {}", c.id));
            }
        }
        let latest = records.iter().map(|c| c.created_at).max();
        Ok(Self { records, ids, latest })
    }

    /// Create and append a record stamped at `now` (millisecond resolution).
    /// If `now` is not after the latest stamp, the latest stamp is reused.
    pub fn append(&mut self, input: ValidInput, now: DateTime<Utc>) -> Contact {
        let mut id = Uuid::new_v4();
        while self.ids.contains(&id) {
            id = Uuid::new_v4();
        }
        let now = now.trunc_subsecs(3);
        let created_at = match self.latest {
            Some(prev) if prev > now => prev,
            _ => now,
        };

        let contact = Contact {
            id,
            name: input.name,
            email: input.email,
            message: input.message,
            status: ContactStatus::New,
            created_at,
        };
        self.ids.insert(id);
        self.latest = Some(created_at);
        self.records.push(contact.clone());
        contact
    }

    /// Undo the most recent append (used when persisting it failed).
    pub fn pop_last(&mut self) -> Option<Contact> {
        let last = self.records.pop()?;
        self.ids.remove(&last.id);
        self.latest = self.records.iter().map(|c| c.created_at).max();
        Some(last)
    }

    pub fn records(&self) -> &[Contact] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, `created_at` descending; equal stamps keep last-inserted-first.
    pub fn newest_first(&self) -> Vec<Contact> {
        let mut out: Vec<Contact> = self.records.iter().rev().cloned().collect();
        // stable sort: reverse insertion order survives for ties
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }
}
