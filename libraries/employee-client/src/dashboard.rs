//! Local dashboard state driven by the client.
//!
//! The dashboard keeps the record list, search result, edit draft and the
//! last user-visible error. It is a cache: after a successful mutation the
//! list is patched optimistically instead of being re-read from the server.

use crate::client::EmployeeClient;
use crate::confirm::Confirm;
use crate::error::ClientError;
use crate::types::{
    Created, EmployeePatch, Lookup, NewEmployee, Record, RecordId, Removal, SearchResult,
};
use tracing::{debug, warn};

/// An in-place edit of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: Option<RecordId>,
    pub name: String,
    pub email: String,
}

impl EditDraft {
    fn patch(&self) -> EmployeePatch {
        EmployeePatch {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

pub struct Dashboard {
    client: EmployeeClient,
    records: Vec<Record>,
    search: SearchResult,
    editing: Option<EditDraft>,
    create_form: NewEmployee,
    error: Option<String>,
    loading: bool,
    searching: bool,
    creating: bool,
}

impl Dashboard {
    pub fn new(client: EmployeeClient) -> Self {
        Self {
            client,
            records: Vec::new(),
            search: SearchResult::Absent,
            editing: None,
            create_form: NewEmployee::default(),
            error: None,
            loading: false,
            searching: false,
            creating: false,
        }
    }

    pub fn client(&self) -> &EmployeeClient {
        &self.client
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn search_result(&self) -> &SearchResult {
        &self.search
    }

    pub fn editing(&self) -> Option<&EditDraft> {
        self.editing.as_ref()
    }

    /// Mutable access to the draft being edited, if any.
    pub fn edit_draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.editing.as_mut()
    }

    pub fn create_form(&self) -> &NewEmployee {
        &self.create_form
    }

    pub fn create_form_mut(&mut self) -> &mut NewEmployee {
        &mut self.create_form
    }

    /// Last error message, cleared at the start of every operation.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    fn fail(&mut self, err: &ClientError) {
        warn!(error = %err, "Dashboard operation failed");
        self.error = Some(err.to_string());
    }

    /// Replace the list with the server's. Clears any edit and search.
    pub async fn reload(&mut self) {
        self.error = None;
        self.editing = None;
        self.search = SearchResult::Absent;
        self.loading = true;

        match self.client.list_all().await {
            Ok(records) => self.records = records,
            Err(e) => {
                self.fail(&e);
                self.records.clear();
            }
        }

        self.loading = false;
    }

    pub fn begin_edit(&mut self, record: &Record) {
        self.editing = Some(EditDraft {
            id: record.id(),
            name: record.name().unwrap_or_default().to_string(),
            email: record.email().unwrap_or_default().to_string(),
        });
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Send the current draft and merge it into the local list on success.
    pub async fn save_edit(&mut self) {
        let Some(draft) = self.editing.clone() else {
            return;
        };

        self.error = None;
        self.loading = true;

        let result = match &draft.id {
            Some(id) => self.client.update(id.as_str(), &draft.patch()).await,
            None => Err(ClientError::MissingIdentifier),
        };

        match result {
            Ok(patch) => {
                if let Some(id) = &draft.id {
                    for record in self.records.iter_mut().filter(|r| r.id().as_ref() == Some(id)) {
                        record.apply(&patch);
                    }
                }
                self.editing = None;
            }
            Err(e) => self.fail(&e),
        }

        self.loading = false;
    }

    /// Delete a row after confirmation and drop it from the local list.
    pub async fn remove(&mut self, id: Option<&RecordId>, confirm: &dyn Confirm) {
        let Some(id) = id else {
            self.error = Some("Cannot delete: missing user id".to_string());
            return;
        };

        self.error = None;
        self.loading = true;

        match self.client.remove(id.as_str(), confirm).await {
            Ok(Removal::Deleted) => self.records.retain(|r| r.id().as_ref() != Some(id)),
            Ok(Removal::Declined) => {}
            Err(e) => self.fail(&e),
        }

        self.loading = false;
    }

    /// Create from the current form and insert the result at the top.
    pub async fn create(&mut self) {
        self.error = None;
        self.creating = true;

        match self.client.create(&self.create_form).await {
            Ok(Created::Record(record)) => {
                self.records.insert(0, record);
                self.create_form = NewEmployee::default();
            }
            Ok(Created::Reloaded(records)) => {
                self.records = records;
                self.editing = None;
                self.search = SearchResult::Absent;
                self.create_form = NewEmployee::default();
            }
            Err(e @ ClientError::ListFailed { .. }) => {
                // Created, but the follow-up reload failed.
                self.fail(&e);
                self.records.clear();
                self.create_form = NewEmployee::default();
            }
            Err(e) => self.fail(&e),
        }

        self.creating = false;
    }

    /// Search by email. Blank input reloads the whole list.
    pub async fn search(&mut self, email: &str) {
        self.error = None;
        self.searching = true;

        match self.client.find_by_email(email).await {
            Ok(Lookup::Found(record)) => self.search = SearchResult::Found(record),
            Ok(Lookup::NotFound) => self.search = SearchResult::NotFound,
            Ok(Lookup::Cleared(records)) => {
                debug!(count = records.len(), "Search cleared");
                self.records = records;
                self.editing = None;
                self.search = SearchResult::Absent;
            }
            Err(e @ ClientError::ListFailed { .. }) => {
                self.fail(&e);
                self.records.clear();
                self.search = SearchResult::Absent;
            }
            Err(e) => {
                self.fail(&e);
                self.search = SearchResult::Absent;
            }
        }

        self.searching = false;
    }
}
