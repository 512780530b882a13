//! In-memory attendance log store

use async_trait::async_trait;
use parking_lot::RwLock;

use huddle_core::{AttendanceLog, AttendanceStore, DomainError, Snowflake, StoreResult};

/// Attendance store backed by a creation-ordered in-memory list
#[derive(Default)]
pub struct MemoryAttendanceStore {
    logs: RwLock<Vec<AttendanceLog>>,
}

impl MemoryAttendanceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttendanceStore for MemoryAttendanceStore {
    async fn create(&self, log: &AttendanceLog) -> StoreResult<()> {
        tracing::debug!(log_id = %log.id, user_id = %log.user_id, "Attendance log stored");
        self.logs.write().push(log.clone());
        Ok(())
    }

    async fn update(&self, log: &AttendanceLog) -> StoreResult<()> {
        let mut logs = self.logs.write();
        match logs.iter_mut().find(|l| l.id == log.id) {
            Some(slot) => {
                *slot = log.clone();
                Ok(())
            }
            None => Err(DomainError::AttendanceLogNotFound(log.id)),
        }
    }

    async fn delete(&self, id: Snowflake) -> StoreResult<()> {
        let mut logs = self.logs.write();
        match logs.iter().position(|l| l.id == id) {
            Some(pos) => {
                logs.remove(pos);
                Ok(())
            }
            None => Err(DomainError::AttendanceLogNotFound(id)),
        }
    }

    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<AttendanceLog>> {
        Ok(self.logs.read().iter().find(|l| l.id == id).cloned())
    }

    async fn list_for_user(&self, user_id: Snowflake) -> StoreResult<Vec<AttendanceLog>> {
        Ok(self
            .logs
            .read()
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect())
    }
}
