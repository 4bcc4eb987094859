//! Directory records and drafts.
//!
//! # Design
//! The service may omit fields, send them as `null`, or send extras
//! (`address`, `geo`, ...). Every editable field decodes a missing or `null`
//! value as empty, so a decoded record is always fully populated and a form
//! built from it never has a hole; unknown fields are dropped.

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned record identifier.
pub type RecordId = u64;

/// `null` decodes like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Company {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// A single directory entry as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: Company,
}

impl Record {
    /// Attach an id to a draft, producing the body of an update.
    pub fn from_draft(id: RecordId, draft: RecordDraft) -> Self {
        Self {
            id,
            name: draft.name,
            username: draft.username,
            email: draft.email,
            phone: draft.phone,
            website: draft.website,
            company: draft.company,
        }
    }
}

/// The operator-editable part of a record. Sent as-is on create.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordDraft {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: Company,
}

impl From<&Record> for RecordDraft {
    fn from(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            username: record.username.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            website: record.website.clone(),
            company: record.company.clone(),
        }
    }
}
