//! Memory vault flows: filtered listing, creation, edits and deletion.

use crate::domain::validation::MemoryForm;
use crate::domain::{DomainError, Memory, MemoryQuery, MemoryUpdate, Pagination};
use crate::ports::MemoryPort;
use crate::store::{Action, Store};
use std::sync::Arc;
use tracing::{info, warn};

pub struct MemoryService {
    memories: Arc<dyn MemoryPort>,
    store: Arc<Store>,
}

impl MemoryService {
    pub fn new(memories: Arc<dyn MemoryPort>, store: Arc<Store>) -> Self {
        Self { memories, store }
    }

    fn fail(&self, context: &str, err: DomainError) -> DomainError {
        warn!(error = %err, "{}", context);
        self.store.dispatch(Action::SetError(err.user_message()));
        err
    }

    /// Replace the cached list with one page. Overlapping loads are not fenced:
    /// whichever response lands last wins.
    pub async fn load(&self, query: &MemoryQuery) -> Result<Pagination, DomainError> {
        self.store.dispatch(Action::SetLoading(true));
        match self.memories.list(query).await {
            Ok(page) => {
                self.store.dispatch(Action::SetMemories(page.memories));
                self.store.dispatch(Action::SetLoading(false));
                Ok(page.pagination)
            }
            Err(e) => {
                self.store.dispatch(Action::SetMemories(Vec::new()));
                Err(self.fail("fetching memories failed", e))
            }
        }
    }

    /// Open one memory; the backend bumps `last_accessed`, so the cached copy is refreshed.
    pub async fn open(&self, id: i64) -> Result<Memory, DomainError> {
        match self.memories.get(id).await {
            Ok(memory) => {
                self.store.dispatch(Action::UpdateMemory(memory.clone()));
                Ok(memory)
            }
            Err(e) => Err(self.fail("fetching memory failed", e)),
        }
    }

    pub async fn create(&self, form: MemoryForm) -> Result<Memory, DomainError> {
        let body = form.into_new_memory()?;
        self.store.dispatch(Action::ClearError);
        match self.memories.create(&body).await {
            Ok(memory) => {
                info!(memory_id = memory.id, "memory saved");
                self.store.dispatch(Action::AddMemory(memory.clone()));
                self.store
                    .dispatch(Action::SetSuccess("Memory created successfully!".into()));
                Ok(memory)
            }
            Err(e) => Err(self.fail("creating memory failed", e)),
        }
    }

    pub async fn update(&self, id: i64, changes: &MemoryUpdate) -> Result<Memory, DomainError> {
        if let Some(title) = &changes.title {
            if title.trim().is_empty() {
                return Err(DomainError::validation("title", "Title cannot be empty"));
            }
        }
        match self.memories.update(id, changes).await {
            Ok(memory) => {
                self.store.dispatch(Action::UpdateMemory(memory.clone()));
                self.store
                    .dispatch(Action::SetSuccess("Memory updated successfully!".into()));
                Ok(memory)
            }
            Err(e) => Err(self.fail("updating memory failed", e)),
        }
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        match self.memories.delete(id).await {
            Ok(()) => {
                self.store.dispatch(Action::DeleteMemory(id));
                self.store
                    .dispatch(Action::SetSuccess("Memory deleted successfully!".into()));
                Ok(())
            }
            Err(e) => Err(self.fail("deleting memory failed", e)),
        }
    }
}
