//! Addressing editable leaves of a draft.
//!
//! # Design
//! A path is either a top-level field or one parent/child pair; there is no
//! way to spell a deeper path with the typed API. `FromStr` accepts the
//! textual form form inputs are named with (`"company.name"`) and rejects
//! anything that does not name a leaf.

use std::fmt;
use std::str::FromStr;

use crate::error::FieldPathError;
use crate::types::RecordDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopField {
    Name,
    Username,
    Email,
    Phone,
    Website,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentField {
    Company,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildField {
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Top(TopField),
    Nested(ParentField, ChildField),
}

impl FieldPath {
    pub const COMPANY_NAME: FieldPath = FieldPath::Nested(ParentField::Company, ChildField::Name);

    /// Every editable leaf, in form order.
    pub const ALL: [FieldPath; 6] = [
        FieldPath::Top(TopField::Name),
        FieldPath::Top(TopField::Username),
        FieldPath::Top(TopField::Email),
        FieldPath::Top(TopField::Phone),
        FieldPath::Top(TopField::Website),
        FieldPath::COMPANY_NAME,
    ];
}

impl TopField {
    fn as_str(self) -> &'static str {
        match self {
            TopField::Name => "name",
            TopField::Username => "username",
            TopField::Email => "email",
            TopField::Phone => "phone",
            TopField::Website => "website",
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Top(field) => f.write_str(field.as_str()),
            FieldPath::Nested(ParentField::Company, ChildField::Name) => f.write_str("company.name"),
        }
    }
}

impl FromStr for FieldPath {
    type Err = FieldPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('.').collect();
        match segments.as_slice() {
            ["name"] => Ok(FieldPath::Top(TopField::Name)),
            ["username"] => Ok(FieldPath::Top(TopField::Username)),
            ["email"] => Ok(FieldPath::Top(TopField::Email)),
            ["phone"] => Ok(FieldPath::Top(TopField::Phone)),
            ["website"] => Ok(FieldPath::Top(TopField::Website)),
            ["company", "name"] => Ok(FieldPath::COMPANY_NAME),
            [_, _, _, ..] => Err(FieldPathError::TooDeep(s.to_string())),
            _ => Err(FieldPathError::Unknown(s.to_string())),
        }
    }
}

impl RecordDraft {
    pub fn field(&self, path: FieldPath) -> &str {
        match path {
            FieldPath::Top(TopField::Name) => &self.name,
            FieldPath::Top(TopField::Username) => &self.username,
            FieldPath::Top(TopField::Email) => &self.email,
            FieldPath::Top(TopField::Phone) => &self.phone,
            FieldPath::Top(TopField::Website) => &self.website,
            FieldPath::Nested(ParentField::Company, ChildField::Name) => &self.company.name,
        }
    }

    /// A copy of the draft with only the leaf at `path` replaced.
    pub fn with_field(&self, path: FieldPath, value: impl Into<String>) -> RecordDraft {
        let mut next = self.clone();
        let slot = match path {
            FieldPath::Top(TopField::Name) => &mut next.name,
            FieldPath::Top(TopField::Username) => &mut next.username,
            FieldPath::Top(TopField::Email) => &mut next.email,
            FieldPath::Top(TopField::Phone) => &mut next.phone,
            FieldPath::Top(TopField::Website) => &mut next.website,
            FieldPath::Nested(ParentField::Company, ChildField::Name) => &mut next.company.name,
        };
        *slot = value.into();
        next
    }
}
