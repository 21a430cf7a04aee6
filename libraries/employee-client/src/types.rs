//! Types for employee API requests and responses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::time::Duration;

/// Configuration for connecting to an employee backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend (e.g., "http://localhost:8080")
    pub url: String,
    /// Overall request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
    /// Connection timeout. `None` leaves the transport default in place.
    pub connect_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a new config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
            connect_timeout: None,
        }
    }

    /// Set an overall request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(crate::routes::DEFAULT_BASE_URL)
    }
}

// =============================================================================
// Records
// =============================================================================

/// Field names probed, in order, for a record's identifier.
pub const ID_FIELDS: [&str; 3] = ["id", "_id", "userId"];

/// Normalized record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Build an identifier from raw input. Blank input is not an identifier.
    pub fn parse(raw: impl AsRef<str>) -> Option<Self> {
        let raw = raw.as_ref();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An employee as returned by the backend.
///
/// The backend does not commit to a schema, so the record keeps every field
/// it was given and exposes the known ones through accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Wrap a JSON value. Anything other than an object is rejected.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Raw field access.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Resolve the identifier by probing `id`, `_id` and `userId`.
    ///
    /// The first non-null field wins, even if its value turns out unusable.
    pub fn id(&self) -> Option<RecordId> {
        let raw = ID_FIELDS
            .iter()
            .find_map(|key| self.fields.get(*key).filter(|v| !v.is_null()))?;

        match raw {
            Value::String(s) => RecordId::parse(s),
            Value::Number(n) => RecordId::parse(n.to_string()),
            _ => None,
        }
    }

    /// Display name, falling back to `fullName`.
    pub fn name(&self) -> Option<&str> {
        self.text("name").or_else(|| self.text("fullName"))
    }

    pub fn email(&self) -> Option<&str> {
        self.text("email")
    }

    /// Whether the record carries anything worth showing.
    pub fn is_usable(&self) -> bool {
        self.email().is_some() || self.name().is_some()
    }

    /// Overwrite fields with the values of a patch.
    pub fn apply(&mut self, patch: &EmployeePatch) {
        self.fields
            .insert("name".to_string(), Value::String(patch.name.clone()));
        self.fields
            .insert("email".to_string(), Value::String(patch.email.clone()));
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

// =============================================================================
// Request bodies
// =============================================================================

/// Fields sent by an update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePatch {
    pub name: String,
    pub email: String,
}

/// Fields sent when creating or registering an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewEmployee {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

// =============================================================================
// Operation outcomes
// =============================================================================

/// Result of a successful create.
#[derive(Debug, Clone, PartialEq)]
pub enum Created {
    /// The response contained the created record.
    Record(Record),
    /// The response was unusable, so the full list was fetched instead.
    Reloaded(Vec<Record>),
}

/// Result of a find-by-email.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(Record),
    NotFound,
    /// Empty input: no search was performed and the full list was reloaded.
    Cleared(Vec<Record>),
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Deleted,
    /// The user declined the confirmation prompt.
    Declined,
}

/// Search state as held by the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchResult {
    /// No search performed.
    #[default]
    Absent,
    Found(Record),
    NotFound,
}

/// Response from a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Server message, "Success" when the server sent none.
    pub message: String,
    pub display_name: Option<String>,
}

impl fmt::Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display_name {
            Some(name) => write!(f, "{} | Welcome {}", self.message, name),
            None => f.write_str(&self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn test_id_probes_fields_in_order() {
        assert_eq!(
            record(json!({"id": 7, "_id": "x"})).id(),
            RecordId::parse("7")
        );
        assert_eq!(
            record(json!({"_id": "abc", "userId": 3})).id(),
            RecordId::parse("abc")
        );
        assert_eq!(record(json!({"userId": 3})).id(), RecordId::parse("3"));
        assert_eq!(
            record(json!({"id": null, "userId": 9})).id(),
            RecordId::parse("9")
        );
    }

    #[test]
    fn test_id_missing_or_unusable() {
        assert_eq!(record(json!({"name": "Ann"})).id(), None);
        assert_eq!(record(json!({"id": ""})).id(), None);
        assert_eq!(record(json!({"id": false})).id(), None);
        assert_eq!(record(json!({"id": {"oid": 1}})).id(), None);
    }

    #[test]
    fn test_name_falls_back_to_full_name() {
        assert_eq!(record(json!({"fullName": "Ann Lee"})).name(), Some("Ann Lee"));
        assert_eq!(
            record(json!({"name": "Ann", "fullName": "Ann Lee"})).name(),
            Some("Ann")
        );
        assert_eq!(record(json!({"name": ""})).name(), None);
    }

    #[test]
    fn test_usable() {
        assert!(record(json!({"email": "a@x.com"})).is_usable());
        assert!(record(json!({"fullName": "Ann"})).is_usable());
        assert!(!record(json!({"id": 1})).is_usable());
        assert!(!record(json!({"message": "ok"})).is_usable());
    }

    #[test]
    fn test_apply_patch_keeps_other_fields() {
        let mut r = record(json!({"id": 1, "name": "Ann", "email": "a@x.com", "role": "dev"}));
        r.apply(&EmployeePatch {
            name: "Anne".into(),
            email: "anne@x.com".into(),
        });
        assert_eq!(r.name(), Some("Anne"));
        assert_eq!(r.email(), Some("anne@x.com"));
        assert_eq!(r.get("role"), Some(&json!("dev")));
        assert_eq!(r.id(), RecordId::parse("1"));
    }

    #[test]
    fn test_registration_display() {
        let reg = Registration {
            message: "Registered".into(),
            display_name: Some("Ann".into()),
        };
        assert_eq!(reg.to_string(), "Registered | Welcome Ann");
    }
}
