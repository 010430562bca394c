//! In-memory vendor adapter.
//!
//! Stores raw JSON records and parses them through a [`JsonFieldMapper`] on
//! every read, the way a real HTTP adapter would re-parse each response.
//! Every port call is recorded so tests can assert on call sequences.

use async_trait::async_trait;
use mockable::Clock;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::phrase::Phrasebook;
use crate::task::{
    adapters::json_mapper::JsonFieldMapper,
    domain::{
        Comment, CommentId, Task, TaskField, TaskStatus, VendorName, VendorTaskId, VendorTaskKey,
    },
    ports::{FieldMapper, VendorAdapter, VendorError, VendorResult, VendorSide},
    services::ready_listing,
};

/// A port call observed by [`InMemoryVendor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorCall {
    /// `read_task`.
    ReadTask(VendorTaskId),
    /// `read_tasks`.
    ReadTasks,
    /// `create_task`, with the id of the task being mirrored.
    CreateTask(VendorTaskId),
    /// `update_task`.
    UpdateTask(VendorTaskId),
    /// `update_task_to`.
    UpdateTaskTo(VendorTaskId, TaskStatus),
    /// `request_required_fields`.
    RequestFields(VendorTaskId, Vec<TaskField>),
    /// `add_comment`.
    AddComment(VendorTaskId, String),
    /// `read_comments`.
    ReadComments(VendorTaskId),
}

impl VendorCall {
    /// Returns whether the call writes to the vendor.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        !matches!(
            self,
            Self::ReadTask(_) | Self::ReadTasks | Self::ReadComments(_)
        )
    }
}

#[derive(Debug, Default)]
struct VendorState {
    records: BTreeMap<VendorTaskId, Value>,
    comments: BTreeMap<VendorTaskId, BTreeMap<CommentId, Comment>>,
    calls: Vec<VendorCall>,
    comment_sequence: u64,
}

#[derive(Debug, Clone, Copy)]
struct Capabilities {
    comments: bool,
    field_requests: bool,
}

/// Thread-safe in-memory vendor service.
pub struct InMemoryVendor<C: Clock + Send + Sync> {
    name: VendorName,
    side: VendorSide,
    mapper: JsonFieldMapper,
    phrases: Phrasebook,
    capabilities: Capabilities,
    clock: Arc<C>,
    state: Arc<RwLock<VendorState>>,
}

fn poisoned(err: &impl ToString) -> VendorError {
    VendorError::transport(std::io::Error::other(err.to_string()))
}

impl<C: Clock + Send + Sync> InMemoryVendor<C> {
    /// Creates an empty vendor using canonical field names and statuses.
    #[must_use]
    pub fn new(name: VendorName, side: VendorSide, clock: Arc<C>) -> Self {
        Self {
            name,
            side,
            mapper: JsonFieldMapper::default(),
            phrases: Phrasebook::default(),
            capabilities: Capabilities {
                comments: true,
                field_requests: true,
            },
            clock,
            state: Arc::new(RwLock::new(VendorState::default())),
        }
    }

    /// Uses `mapper` to parse and render raw records.
    #[must_use]
    pub fn with_mapper(mut self, mapper: JsonFieldMapper) -> Self {
        self.mapper = mapper;
        self
    }

    /// Uses `phrases` for field requests.
    #[must_use]
    pub fn with_phrasebook(mut self, phrases: Phrasebook) -> Self {
        self.phrases = phrases;
        self
    }

    /// Makes comment calls fail with [`VendorError::Unsupported`].
    #[must_use]
    pub const fn without_comments(mut self) -> Self {
        self.capabilities.comments = false;
        self
    }

    /// Makes field requests fail with [`VendorError::Unsupported`].
    #[must_use]
    pub const fn without_field_requests(mut self) -> Self {
        self.capabilities.field_requests = false;
        self
    }

    /// Stores `task` as a raw record, replacing any existing record.
    ///
    /// # Errors
    ///
    /// Returns [`VendorError::Transport`] when the state lock is poisoned.
    pub fn seed_task(&self, task: &Task) -> VendorResult<()> {
        let raw = self.mapper.from_canonical(task);
        self.write()?.records.insert(task.id().clone(), raw);
        Ok(())
    }

    /// Stores a raw vendor record as-is.
    ///
    /// # Errors
    ///
    /// Returns [`VendorError::Mapping`] when the record has no usable id.
    pub fn seed_raw(&self, raw: Value) -> VendorResult<VendorTaskId> {
        let id = self.mapper.to_canonical(&raw)?.id().clone();
        self.write()?.records.insert(id.clone(), raw);
        Ok(id)
    }

    /// Adds a comment as if a vendor user had posted it.
    ///
    /// # Errors
    ///
    /// Returns [`VendorError::Transport`] when the state lock is poisoned.
    pub fn seed_comment(&self, task_id: &VendorTaskId, comment: Comment) -> VendorResult<()> {
        self.write()?
            .comments
            .entry(task_id.clone())
            .or_default()
            .insert(comment.id().clone(), comment);
        Ok(())
    }

    /// Changes a task's status as if a vendor user had done it, bypassing
    /// the engine's transition checks.
    ///
    /// # Errors
    ///
    /// Returns [`VendorError::NotFound`] when the task does not exist.
    pub fn set_status(&self, task_id: &VendorTaskId, status: TaskStatus) -> VendorResult<()> {
        let task = self
            .stored_task(task_id)?
            .ok_or_else(|| VendorError::NotFound(self.key(task_id)))?;
        self.seed_task(&task.with_status(status))
    }

    /// Returns the parsed task, bypassing the call log.
    ///
    /// # Errors
    ///
    /// Returns [`VendorError::Mapping`] when the stored record is malformed.
    pub fn stored_task(&self, task_id: &VendorTaskId) -> VendorResult<Option<Task>> {
        let raw = self.read()?.records.get(task_id).cloned();
        raw.map(|record| self.parse(&record)).transpose()
    }

    /// Returns a task's comments, oldest first.
    #[must_use]
    pub fn comments_of(&self, task_id: &VendorTaskId) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .state
            .read()
            .map(|guard| {
                guard
                    .comments
                    .get(task_id)
                    .map(|thread| thread.values().cloned().collect())
                    .unwrap_or_default()
            })
            .unwrap_or_default();
        comments.sort_by_key(Comment::created_at);
        comments
    }

    /// Returns every call recorded so far.
    #[must_use]
    pub fn calls(&self) -> Vec<VendorCall> {
        self.state
            .read()
            .map(|guard| guard.calls.clone())
            .unwrap_or_default()
    }

    /// Returns the recorded calls that wrote to the vendor.
    #[must_use]
    pub fn mutations(&self) -> Vec<VendorCall> {
        self.calls()
            .into_iter()
            .filter(VendorCall::is_mutation)
            .collect()
    }

    /// Forgets the recorded calls.
    pub fn clear_calls(&self) {
        if let Ok(mut guard) = self.state.write() {
            guard.calls.clear();
        }
    }

    fn key(&self, task_id: &VendorTaskId) -> VendorTaskKey {
        VendorTaskKey::new(task_id.clone(), self.name.clone())
    }

    fn read(&self) -> VendorResult<RwLockReadGuard<'_, VendorState>> {
        self.state.read().map_err(|err| poisoned(&err))
    }

    fn write(&self) -> VendorResult<RwLockWriteGuard<'_, VendorState>> {
        self.state.write().map_err(|err| poisoned(&err))
    }

    fn record(&self, call: VendorCall) -> VendorResult<()> {
        self.write()?.calls.push(call);
        Ok(())
    }

    fn parse(&self, raw: &Value) -> VendorResult<Task> {
        Ok(self.mapper.to_canonical(raw)?)
    }

    fn unsupported(&self, capability: &'static str) -> VendorError {
        VendorError::Unsupported {
            vendor: self.name.clone(),
            capability,
        }
    }

    /// Writes `task` over an existing record and returns the re-parsed value.
    fn store_existing(&self, task: &Task) -> VendorResult<Task> {
        let raw = self.mapper.from_canonical(task);
        {
            let mut state = self.write()?;
            let record = state
                .records
                .get_mut(task.id())
                .ok_or_else(|| VendorError::NotFound(self.key(task.id())))?;
            *record = raw.clone();
        }
        self.parse(&raw)
    }

    fn insert_comment(&self, task_id: &VendorTaskId, message: &str) -> VendorResult<()> {
        let mut state = self.write()?;
        if !state.records.contains_key(task_id) {
            return Err(VendorError::NotFound(self.key(task_id)));
        }
        state.comment_sequence += 1;
        let id = CommentId::new(format!("{}-comment-{}", self.name, state.comment_sequence))?;
        let comment = Comment::new(id, self.clock.utc(), message);
        state
            .comments
            .entry(task_id.clone())
            .or_default()
            .insert(comment.id().clone(), comment);
        Ok(())
    }
}

#[async_trait]
impl<C: Clock + Send + Sync> VendorAdapter for InMemoryVendor<C> {
    fn name(&self) -> &VendorName {
        &self.name
    }

    fn side(&self) -> VendorSide {
        self.side
    }

    async fn read_task(&self, id: &VendorTaskId) -> VendorResult<Option<Task>> {
        self.record(VendorCall::ReadTask(id.clone()))?;
        self.stored_task(id)
    }

    async fn read_tasks(&self) -> VendorResult<BTreeMap<VendorTaskId, Option<Task>>> {
        self.record(VendorCall::ReadTasks)?;
        let parsed: Vec<(VendorTaskId, VendorResult<Task>)> = self
            .read()?
            .records
            .iter()
            .map(|(id, raw)| (id.clone(), self.parse(raw)))
            .collect();
        Ok(ready_listing(self, parsed).await)
    }

    async fn create_task(&self, task: &Task) -> VendorResult<Task> {
        self.record(VendorCall::CreateTask(task.id().clone()))?;
        if self.side == VendorSide::Employer {
            return Err(VendorError::CreateNotAllowed(self.name.clone()));
        }

        let id = VendorTaskId::new(Uuid::new_v4().simple().to_string())?;
        let mut mirrored = Task::new(task.category(), id, task.name()).with_status(TaskStatus::Posted);
        if let Some(description) = task.description() {
            mirrored = mirrored.with_description(description);
        }
        if let Some(price) = task.price() {
            mirrored = mirrored.with_price(price);
        }
        if let Some(location) = task.location() {
            mirrored = mirrored.with_location(location);
        }
        if let Some(email) = task.email() {
            mirrored = mirrored.with_email(email);
        }

        let raw = self.mapper.from_canonical(&mirrored);
        self.write()?.records.insert(mirrored.id().clone(), raw.clone());
        self.parse(&raw)
    }

    async fn update_task(&self, task: &Task) -> VendorResult<Task> {
        self.record(VendorCall::UpdateTask(task.id().clone()))?;
        self.store_existing(task)
    }

    async fn update_task_to(&self, task: &Task, status: TaskStatus) -> VendorResult<Task> {
        self.record(VendorCall::UpdateTaskTo(task.id().clone(), status))?;
        let mut advanced = task.clone();
        advanced.advance_to(status)?;
        self.store_existing(&advanced)
    }

    async fn request_required_fields(
        &self,
        task: &Task,
        missing: &[TaskField],
    ) -> VendorResult<()> {
        self.record(VendorCall::RequestFields(task.id().clone(), missing.to_vec()))?;
        if !self.capabilities.field_requests {
            return Err(self.unsupported("field requests"));
        }
        let message = self.phrases.missing_fields(missing);
        self.insert_comment(task.id(), &message)
    }

    async fn add_comment(&self, task_id: &VendorTaskId, message: &str) -> VendorResult<bool> {
        self.record(VendorCall::AddComment(task_id.clone(), message.to_owned()))?;
        if !self.capabilities.comments {
            return Err(self.unsupported("comments"));
        }
        self.insert_comment(task_id, message)?;
        Ok(true)
    }

    async fn read_comments(
        &self,
        task_id: &VendorTaskId,
    ) -> VendorResult<BTreeMap<CommentId, Comment>> {
        self.record(VendorCall::ReadComments(task_id.clone()))?;
        if !self.capabilities.comments {
            return Err(self.unsupported("comments"));
        }
        Ok(self
            .read()?
            .comments
            .get(task_id)
            .cloned()
            .unwrap_or_default())
    }
}
