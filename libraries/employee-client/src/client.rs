//! Main employee backend client.

use crate::confirm::{Confirm, DELETE_PROMPT};
use crate::envelope::{parse_lenient, unwrap_list, unwrap_record};
use crate::error::{ClientError, Result};
use crate::fallback::{Candidate, FallbackChain, FallbackExecutor, Outcome};
use crate::routes;
use crate::types::{
    ClientConfig, Created, EmployeePatch, Lookup, NewEmployee, Record, RecordId, Registration,
    Removal,
};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

/// Client for an employee backend whose route shape is not fixed.
///
/// Every operation returns a value and leaves local state to the caller.
/// Mutations that have several plausible endpoints go through a
/// [`FallbackChain`] and report the last failure if none of them answer.
///
/// # Example
///
/// ```ignore
/// use employee_client::{ClientConfig, EmployeeClient, EmployeePatch};
///
/// let client = EmployeeClient::new(ClientConfig::new("http://localhost:8080"))?;
///
/// let records = client.list_all().await?;
/// println!("Found {} employees", records.len());
///
/// let patch = EmployeePatch { name: "Ann".into(), email: "ann@example.com".into() };
/// client.update("1", &patch).await?;
/// ```
#[derive(Debug, Clone)]
pub struct EmployeeClient {
    http: Client,
    base_url: Url,
}

impl EmployeeClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/');
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let base_url = Url::parse(url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let mut builder = Client::builder().user_agent(format!(
            "EmployeeClient/{}",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::Request)?;

        Ok(Self { http, base_url })
    }

    /// Get the backend URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn executor(&self) -> FallbackExecutor<'_> {
        FallbackExecutor::new(&self.http, &self.base_url)
    }

    async fn send_one<B>(&self, candidate: Candidate, body: Option<&B>) -> Result<Outcome>
    where
        B: Serialize + ?Sized,
    {
        self.executor()
            .first_success(&FallbackChain::single(candidate), body)
            .await
    }

    /// Fetch every record.
    pub async fn list_all(&self) -> Result<Vec<Record>> {
        debug!("Fetching all employees");

        match self.send_one(routes::list(), None::<&()>).await? {
            Outcome::Hit { response, .. } => {
                let status = response.status().as_u16();
                let text = response.text().await?;
                let value: Value = serde_json::from_str(&text).map_err(|e| {
                    ClientError::ListFailed {
                        status,
                        body: format!("Failed to parse list response: {}", e),
                    }
                })?;

                let records = unwrap_list(value);
                debug!(count = records.len(), "Fetched employees");
                Ok(records)
            }
            Outcome::Exhausted { status, body } => Err(ClientError::ListFailed { status, body }),
        }
    }

    /// Update the record with the given id.
    ///
    /// Returns the patch that was sent so the caller can merge it locally.
    pub async fn update(&self, id: &str, patch: &EmployeePatch) -> Result<EmployeePatch> {
        let id = RecordId::parse(id).ok_or(ClientError::MissingIdentifier)?;
        debug!(id = %id, "Updating employee");

        match self.executor().first_success(&routes::update(&id), Some(patch)).await? {
            Outcome::Hit { index, .. } => {
                info!(id = %id, candidate = index, "Employee updated");
                Ok(patch.clone())
            }
            Outcome::Exhausted { status, body } => {
                Err(ClientError::UpdateFailed { status, body })
            }
        }
    }

    /// Update a record, resolving its identifier first.
    pub async fn update_record(&self, record: &Record, patch: &EmployeePatch) -> Result<EmployeePatch> {
        let id = record.id().ok_or(ClientError::MissingIdentifier)?;
        self.update(id.as_str(), patch).await
    }

    /// Delete the record with the given id after the user confirms.
    pub async fn remove(&self, id: &str, confirm: &dyn Confirm) -> Result<Removal> {
        let id = RecordId::parse(id).ok_or(ClientError::MissingIdentifier)?;

        if !confirm.confirm(DELETE_PROMPT) {
            debug!(id = %id, "Delete declined");
            return Ok(Removal::Declined);
        }

        debug!(id = %id, "Deleting employee");

        match self
            .executor()
            .first_success(&routes::delete(&id), None::<&()>)
            .await?
        {
            Outcome::Hit { index, .. } => {
                info!(id = %id, candidate = index, "Employee deleted");
                Ok(Removal::Deleted)
            }
            Outcome::Exhausted { status, body } => {
                Err(ClientError::DeleteFailed { status, body })
            }
        }
    }

    /// Delete a record, resolving its identifier first.
    pub async fn remove_record(&self, record: &Record, confirm: &dyn Confirm) -> Result<Removal> {
        let id = record.id().ok_or(ClientError::MissingIdentifier)?;
        self.remove(id.as_str(), confirm).await
    }

    /// Create an employee.
    ///
    /// If the response does not contain a usable record the full list is
    /// fetched instead of trusting it.
    pub async fn create(&self, fields: &NewEmployee) -> Result<Created> {
        let payload = NewEmployee {
            name: fields.name.trim().to_string(),
            email: fields.email.trim().to_string(),
            password: fields.password.clone(),
        };

        if payload.name.is_empty() || payload.email.is_empty() || payload.password.trim().is_empty()
        {
            return Err(ClientError::ValidationFailed(
                "Please fill name, email, and password".into(),
            ));
        }

        debug!(email = %payload.email, "Creating employee");

        match self.send_one(routes::register(), Some(&payload)).await? {
            Outcome::Hit { response, .. } => {
                let text = response.text().await?;
                match unwrap_record(parse_lenient(&text)) {
                    Some(record) => {
                        info!(email = %payload.email, "Employee created");
                        Ok(Created::Record(record))
                    }
                    None => {
                        debug!("Create response had no usable record, reloading");
                        Ok(Created::Reloaded(self.list_all().await?))
                    }
                }
            }
            Outcome::Exhausted { status, body } => {
                Err(ClientError::CreateFailed { status, body })
            }
        }
    }

    /// Look up a record by email.
    ///
    /// Blank input performs no search and reloads the full list instead.
    /// A 404 is an ordinary not-found result.
    pub async fn find_by_email(&self, email: &str) -> Result<Lookup> {
        let email = email.trim();
        if email.is_empty() {
            debug!("Empty search, reloading all employees");
            return Ok(Lookup::Cleared(self.list_all().await?));
        }

        debug!(email = %email, "Searching employee");

        match self.send_one(routes::find_by_email(email), None::<&()>).await? {
            Outcome::Hit { response, .. } => {
                let status = response.status().as_u16();
                let text = response.text().await?;
                let value: Value = match serde_json::from_str(&text) {
                    Ok(value) => value,
                    Err(_) => return Err(ClientError::SearchFailed { status, body: text }),
                };

                Ok(unwrap_record(value).map_or(Lookup::NotFound, Lookup::Found))
            }
            Outcome::Exhausted { status, .. } if status == StatusCode::NOT_FOUND.as_u16() => {
                Ok(Lookup::NotFound)
            }
            Outcome::Exhausted { status, body } => {
                Err(ClientError::SearchFailed { status, body })
            }
        }
    }

    /// Load the profile of the employee with the given email.
    ///
    /// Unlike [`find_by_email`](Self::find_by_email), any non-success status
    /// is an error. Returns `None` when the body holds no usable record.
    pub async fn profile(&self, email: &str) -> Result<Option<Record>> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ClientError::ValidationFailed("Missing email".into()));
        }

        debug!(email = %email, "Loading profile");

        match self.send_one(routes::find_by_email(email), None::<&()>).await? {
            Outcome::Hit { response, .. } => {
                let text = response.text().await?;
                Ok(unwrap_record(parse_lenient(&text)))
            }
            Outcome::Exhausted { status, body } => {
                Err(ClientError::ProfileFailed { status, body })
            }
        }
    }

    /// Self-service registration.
    ///
    /// Stricter than [`create`](Self::create) about the password, and reports
    /// the server's own message on both success and failure.
    pub async fn register(&self, fields: &NewEmployee) -> Result<Registration> {
        if fields.name.trim().is_empty()
            || fields.email.trim().is_empty()
            || fields.password.trim().is_empty()
        {
            return Err(ClientError::ValidationFailed(
                "All fields are required".into(),
            ));
        }

        debug!(email = %fields.email, "Registering");

        match self.send_one(routes::register(), Some(fields)).await? {
            Outcome::Hit { response, .. } => {
                let text = response.text().await?;
                let value = parse_lenient(&text);

                let registration = Registration {
                    message: message_of(&value).unwrap_or_else(|| "Success".to_string()),
                    display_name: display_name_of(&value),
                };

                info!(email = %fields.email, "Registration successful");
                Ok(registration)
            }
            Outcome::Exhausted { status, body } => {
                warn!(status, "Registration rejected");
                let message = message_of(&parse_lenient(&body))
                    .unwrap_or_else(|| "Registration failed".to_string());
                Err(ClientError::RegisterFailed { status, message })
            }
        }
    }
}

fn message_of(value: &Value) -> Option<String> {
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn display_name_of(value: &Value) -> Option<String> {
    value
        .get("user")
        .and_then(|u| u.get("name"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            value
                .get("name")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_validation() {
        // Valid URLs
        assert!(EmployeeClient::new(ClientConfig::new("https://example.com")).is_ok());
        assert!(EmployeeClient::new(ClientConfig::new("http://localhost:8080")).is_ok());

        // Invalid URLs
        assert!(EmployeeClient::new(ClientConfig::new("")).is_err());
        assert!(EmployeeClient::new(ClientConfig::new("not-a-url")).is_err());
        assert!(EmployeeClient::new(ClientConfig::new("ftp://example.com")).is_err());
    }

    #[test]
    fn test_url_normalization() {
        let client =
            EmployeeClient::new(ClientConfig::new("https://example.com/")).expect("valid url");
        assert_eq!(client.base_url().as_str(), "https://example.com/");
    }

    #[test]
    fn test_registration_fields() {
        let value = json!({"message": "Registered", "user": {"name": "Ann"}});
        assert_eq!(message_of(&value).as_deref(), Some("Registered"));
        assert_eq!(display_name_of(&value).as_deref(), Some("Ann"));

        let value = json!({"name": "Bo"});
        assert_eq!(message_of(&value), None);
        assert_eq!(display_name_of(&value).as_deref(), Some("Bo"));
    }
}
