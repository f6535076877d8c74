//! The generic list / add / edit / delete controller behind every screen.
//!
//! A [`ResourceListController`] owns one cached collection. Every
//! mutation re-syncs local state from the server's response (the created
//! or updated record is merged in, a deleted id is dropped) instead of
//! refetching the whole collection. Failures are logged and leave local
//! state exactly as it was.

use std::sync::Arc;

use dreams_core::error::CoreError;
use dreams_core::lookup::find_by_id;
use dreams_core::models::validate_draft;
use dreams_core::pagination::{self, DEFAULT_PAGE_SIZE};
use dreams_core::types::{DbId, Identified};

use crate::api::DreamsApi;
use crate::auth::{AuthToken, Session};
use crate::error::{ClientError, ClientResult};
use crate::resource::Resource;

// ---------------------------------------------------------------------------
// Form state
// ---------------------------------------------------------------------------

/// Whether the open form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(DbId),
}

/// The open add/edit form.
#[derive(Debug, Clone)]
pub struct FormState<D> {
    pub mode: FormMode,
    pub draft: D,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub struct ResourceListController<R: Resource> {
    api: DreamsApi,
    session: Arc<Session>,
    records: Vec<R::Record>,
    page_size: usize,
    current_page: usize,
    form: Option<FormState<R::Draft>>,
    pending_delete: Option<DbId>,
    viewing: Option<DbId>,
}

impl<R: Resource> ResourceListController<R> {
    pub fn new(api: DreamsApi, session: Arc<Session>) -> Self {
        Self {
            api,
            session,
            records: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 1,
            form: None,
            pending_delete: None,
            viewing: None,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    // ---- collection ----

    /// Fetch the collection, replacing local state on success.
    ///
    /// On any failure the previous records are kept and the error is
    /// logged and returned.
    pub async fn load(&mut self) -> ClientResult<()> {
        let records = fetch_collection::<R>(&self.api, &self.session).await?;
        tracing::debug!(resource = R::NAME, count = records.len(), "Loaded collection");
        self.records = records;
        Ok(())
    }

    pub fn records(&self) -> &[R::Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: DbId) -> Option<&R::Record> {
        find_by_id(&self.records, id)
    }

    // ---- pagination ----

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The `page_number`-th window of the full collection.
    pub fn page(&self, page_number: usize) -> &[R::Record] {
        pagination::page(&self.records, page_number, self.page_size)
    }

    /// The `page_number`-th window of the records matching `predicate`.
    pub fn page_where<F>(&self, page_number: usize, predicate: F) -> Vec<&R::Record>
    where
        F: Fn(&R::Record) -> bool,
    {
        let filtered = self.filtered(predicate);
        pagination::page(&filtered, page_number, self.page_size).to_vec()
    }

    pub fn filtered<F>(&self, predicate: F) -> Vec<&R::Record>
    where
        F: Fn(&R::Record) -> bool,
    {
        self.records.iter().filter(|&r| predicate(r)).collect()
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.records.len(), self.page_size)
    }

    pub fn total_pages_where<F>(&self, predicate: F) -> usize
    where
        F: Fn(&R::Record) -> bool,
    {
        pagination::total_pages(self.filtered(predicate).len(), self.page_size)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn set_page(&mut self, page_number: usize) {
        self.current_page = page_number;
    }

    pub fn current_items(&self) -> &[R::Record] {
        self.page(self.current_page)
    }

    // ---- add / edit form ----

    /// Open an empty form for a new record.
    pub fn open_create_form(&mut self) {
        self.form = Some(FormState {
            mode: FormMode::Create,
            draft: R::Draft::default(),
        });
    }

    /// Open the form pre-populated from `record`.
    pub fn open_edit_form(&mut self, record: &R::Record) {
        self.form = Some(FormState {
            mode: FormMode::Edit(record.id()),
            draft: R::Draft::from(record),
        });
    }

    /// Open the edit form for the cached record with `id`.
    pub fn open_edit_form_by_id(&mut self, id: DbId) -> ClientResult<()> {
        let draft = self
            .find(id)
            .map(|record| R::Draft::from(record))
            .ok_or(CoreError::NotFound { entity: R::NAME, id })?;
        self.form = Some(FormState {
            mode: FormMode::Edit(id),
            draft,
        });
        Ok(())
    }

    pub fn form(&self) -> Option<&FormState<R::Draft>> {
        self.form.as_ref()
    }

    /// Mutable access to the open draft, for form input.
    pub fn draft_mut(&mut self) -> Option<&mut R::Draft> {
        self.form.as_mut().map(|f| &mut f.draft)
    }

    pub fn is_form_open(&self) -> bool {
        self.form.is_some()
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Submit the open form.
    ///
    /// Creates POST the draft; edits use the resource's PUT or PATCH. On
    /// success the returned record is merged into local state and the form
    /// closes. On failure the form stays open with the draft untouched.
    pub async fn submit(&mut self) -> ClientResult<R::Record> {
        let Some(form) = self.form.as_ref() else {
            return Err(ClientError::NoOpenForm);
        };
        let mode = form.mode;

        if let Err(e) = validate_draft(&form.draft) {
            tracing::warn!(resource = R::NAME, error = %e, "Draft failed required fields");
            return Err(e.into());
        }

        let token = self.credential()?;
        let result = match mode {
            FormMode::Create => self.api.create::<R>(&token, &form.draft).await,
            FormMode::Edit(id) => self.api.update::<R>(&token, id, &form.draft).await,
        };

        match result {
            Ok(record) => {
                tracing::info!(resource = R::NAME, id = record.id(), ?mode, "Saved record");
                self.merge(mode, record.clone());
                self.form = None;
                Ok(record)
            }
            Err(e) => {
                tracing::error!(resource = R::NAME, ?mode, error = %e, "Failed to save record");
                Err(e)
            }
        }
    }

    /// Replace the edited entry, or append a created one.
    fn merge(&mut self, mode: FormMode, record: R::Record) {
        let target = match mode {
            FormMode::Create => None,
            FormMode::Edit(id) => self.records.iter().position(|r| r.id() == id),
        };
        match target {
            Some(index) => self.records[index] = record,
            None => self.records.push(record),
        }
    }

    // ---- delete ----

    /// Ask for confirmation before deleting `id`.
    pub fn remove(&mut self, id: DbId) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<DbId> {
        self.pending_delete
    }

    pub fn cancel_remove(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the record awaiting confirmation.
    ///
    /// The confirmation is dismissed whatever the outcome. Only a
    /// successful response removes the record locally. Returns the deleted
    /// id, or `None` when nothing was awaiting confirmation.
    pub async fn confirm_remove(&mut self) -> ClientResult<Option<DbId>> {
        let Some(id) = self.pending_delete.take() else {
            return Ok(None);
        };

        let token = self.credential()?;
        match self.api.delete::<R>(&token, id).await {
            Ok(()) => {
                tracing::info!(resource = R::NAME, id, "Deleted record");
                self.records.retain(|r| r.id() != id);
                if self.viewing == Some(id) {
                    self.viewing = None;
                }
                Ok(Some(id))
            }
            Err(e) => {
                tracing::error!(resource = R::NAME, id, error = %e, "Failed to delete record");
                Err(e)
            }
        }
    }

    // ---- detail view ----

    pub fn view(&mut self, id: DbId) {
        self.viewing = Some(id);
    }

    pub fn close_view(&mut self) {
        self.viewing = None;
    }

    /// The record opened in the detail view, if it is still cached.
    pub fn viewing(&self) -> Option<&R::Record> {
        self.viewing.and_then(|id| self.find(id))
    }

    fn credential(&self) -> ClientResult<AuthToken> {
        credential_for(&self.session, R::NAME)
    }
}

// ---------------------------------------------------------------------------
// Lookup collections
// ---------------------------------------------------------------------------

/// A read-only collection fetched only to resolve foreign ids to labels.
///
/// Until [`load`](Self::load) succeeds it is empty and every label
/// resolves to the caller's placeholder.
pub struct LookupCollection<R: Resource> {
    api: DreamsApi,
    session: Arc<Session>,
    records: Vec<R::Record>,
}

impl<R: Resource> LookupCollection<R> {
    pub fn new(api: DreamsApi, session: Arc<Session>) -> Self {
        Self {
            api,
            session,
            records: Vec::new(),
        }
    }

    pub async fn load(&mut self) -> ClientResult<()> {
        self.records = fetch_collection::<R>(&self.api, &self.session).await?;
        Ok(())
    }

    pub fn records(&self) -> &[R::Record] {
        &self.records
    }

    pub fn find(&self, id: DbId) -> Option<&R::Record> {
        find_by_id(&self.records, id)
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Fetch a full collection, logging any failure.
pub(crate) async fn fetch_collection<R: Resource>(
    api: &DreamsApi,
    session: &Session,
) -> ClientResult<Vec<R::Record>> {
    let token = credential_for(session, R::NAME)?;
    api.list::<R>(&token).await.inspect_err(|e| {
        tracing::error!(resource = R::NAME, error = %e, "Failed to fetch collection");
    })
}

/// The session token, logging when there is none.
pub(crate) fn credential_for(session: &Session, resource: &'static str) -> ClientResult<AuthToken> {
    session.credential().inspect_err(|e| {
        tracing::error!(resource, error = %e, "Skipping request without a token");
    })
}
