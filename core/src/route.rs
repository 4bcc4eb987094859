//! The four directory views and their paths.

use std::fmt;
use std::str::FromStr;

use crate::error::RouteError;
use crate::types::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    List,
    /// `/create`
    Create,
    /// `/edit/{id}`
    Edit(RecordId),
    /// `/user/{id}`
    Detail(RecordId),
}

impl Route {
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        if !path.is_empty() && !path.starts_with('/') {
            return Err(RouteError::UnknownPath(path.to_string()));
        }
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();
        match segments.as_slice() {
            [] => Ok(Route::List),
            ["create"] => Ok(Route::Create),
            ["edit", id] => parse_id(id).map(Route::Edit),
            ["user", id] => parse_id(id).map(Route::Detail),
            _ => Err(RouteError::UnknownPath(path.to_string())),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Create => "/create".to_string(),
            Route::Edit(id) => format!("/edit/{id}"),
            Route::Detail(id) => format!("/user/{id}"),
        }
    }
}

/// Plain decimal digits: no sign, no whitespace.
fn parse_id(raw: &str) -> Result<RecordId, RouteError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RouteError::InvalidId(raw.to_string()));
    }
    raw.parse().map_err(|_| RouteError::InvalidId(raw.to_string()))
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
