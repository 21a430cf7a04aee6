//! Employee Directory Client
//!
//! HTTP client library for an employee management backend whose exact
//! route shape is not known in advance.
//!
//! # Features
//!
//! - **Fallback chains**: mutations try an ordered list of candidate
//!   endpoints and take the first success
//! - **Envelope tolerance**: bare values or `user`/`employee`/`users`/`employees`
//!   wrappers are accepted
//! - **Dashboard state**: local record list, search result and edit draft,
//!   updated optimistically after each operation
//!
//! # Example
//!
//! ```ignore
//! use employee_client::{ClientConfig, Dashboard, EmployeeClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EmployeeClient::new(ClientConfig::new("http://localhost:8080"))?;
//!     let mut dashboard = Dashboard::new(client);
//!
//!     dashboard.reload().await;
//!     for record in dashboard.records() {
//!         println!("{:?} {:?}", record.name(), record.email());
//!     }
//!
//!     dashboard.search("ann@example.com").await;
//!     println!("{:?}", dashboard.search_result());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod confirm;
mod dashboard;
mod envelope;
mod error;
mod fallback;
pub mod routes;
mod types;

// Re-export main types
pub use client::EmployeeClient;
pub use confirm::{Confirm, DELETE_PROMPT};
pub use dashboard::{Dashboard, EditDraft};
pub use error::{ClientError, Result};
pub use fallback::{Candidate, FallbackChain, FallbackExecutor, Outcome};
pub use types::{
    ClientConfig, Created, EmployeePatch, Lookup, NewEmployee, Record, RecordId, Registration,
    Removal, SearchResult, ID_FIELDS,
};
