//! In-memory leave request store

use async_trait::async_trait;
use parking_lot::RwLock;

use huddle_core::{DomainError, LeaveRequest, LeaveStore, Snowflake, StoreResult};

/// Leave store backed by a submission-ordered in-memory list
#[derive(Default)]
pub struct MemoryLeaveStore {
    requests: RwLock<Vec<LeaveRequest>>,
}

impl MemoryLeaveStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeaveStore for MemoryLeaveStore {
    async fn create(&self, request: &LeaveRequest) -> StoreResult<()> {
        tracing::debug!(request_id = %request.id, user_id = %request.user_id, "Leave request stored");
        self.requests.write().push(request.clone());
        Ok(())
    }

    async fn update(&self, request: &LeaveRequest) -> StoreResult<()> {
        let mut requests = self.requests.write();
        match requests.iter_mut().find(|r| r.id == request.id) {
            Some(slot) => {
                *slot = request.clone();
                Ok(())
            }
            None => Err(DomainError::LeaveRequestNotFound(request.id)),
        }
    }

    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<LeaveRequest>> {
        Ok(self.requests.read().iter().find(|r| r.id == id).cloned())
    }

    async fn list_for_user(&self, user_id: Snowflake) -> StoreResult<Vec<LeaveRequest>> {
        Ok(self
            .requests
            .read()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_pending(&self) -> StoreResult<Vec<LeaveRequest>> {
        Ok(self
            .requests
            .read()
            .iter()
            .filter(|r| r.is_pending())
            .cloned()
            .collect())
    }
}
