//! In-memory channel directory

use async_trait::async_trait;
use parking_lot::RwLock;

use huddle_core::{Channel, ChannelDirectory, DomainError, Snowflake, StoreResult};

/// Channel directory backed by an insertion-ordered in-memory list
#[derive(Default)]
pub struct MemoryChannelDirectory {
    channels: RwLock<Vec<Channel>>,
}

impl MemoryChannelDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChannelDirectory for MemoryChannelDirectory {
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Channel>> {
        Ok(self.channels.read().iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, channel: &Channel) -> StoreResult<()> {
        tracing::debug!(channel_id = %channel.id, name = %channel.name, "Channel created");
        self.channels.write().push(channel.clone());
        Ok(())
    }

    async fn update(&self, channel: &Channel) -> StoreResult<()> {
        let mut channels = self.channels.write();
        match channels.iter_mut().find(|c| c.id == channel.id) {
            Some(slot) => {
                *slot = channel.clone();
                Ok(())
            }
            None => Err(DomainError::ChannelNotFound(channel.id)),
        }
    }

    async fn list(&self) -> StoreResult<Vec<Channel>> {
        Ok(self.channels.read().clone())
    }
}
