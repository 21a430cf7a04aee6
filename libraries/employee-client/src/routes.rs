//! Known and guessed route shapes of the employee backend.

use crate::fallback::{Candidate, FallbackChain};
use crate::types::RecordId;
use reqwest::Method;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

pub fn list() -> Candidate {
    Candidate::new(Method::GET, &["getAll"])
}

pub fn register() -> Candidate {
    Candidate::new(Method::POST, &["register"])
}

pub fn find_by_email(email: &str) -> Candidate {
    Candidate::new(Method::GET, &["findByEmail"]).with_query("email", email)
}

/// Update candidates, query-string form first.
pub fn update(id: &RecordId) -> FallbackChain {
    let id = id.as_str();
    FallbackChain::new(vec![
        Candidate::new(Method::PUT, &["update"]).with_query("id", id),
        Candidate::new(Method::PUT, &["update", id]),
        Candidate::new(Method::PUT, &["employees", id]),
        Candidate::new(Method::PUT, &["user", id]),
    ])
}

/// Delete candidates, query-string form first.
pub fn delete(id: &RecordId) -> FallbackChain {
    let id = id.as_str();
    FallbackChain::new(vec![
        Candidate::new(Method::DELETE, &["delete"]).with_query("id", id),
        Candidate::new(Method::DELETE, &["employees", id]),
        Candidate::new(Method::DELETE, &["user", id]),
        Candidate::new(Method::DELETE, &["deleteEmployee", id]),
    ])
}
