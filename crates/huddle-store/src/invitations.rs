//! In-memory invitation registry
//!
//! Expiry is enforced lazily: expired records are pruned whenever the
//! registry is touched, so a stale token can never verify or be consumed.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use huddle_core::{DomainError, InvitationRegistry, PendingInvitation, StoreResult};

/// Invitation registry backed by an issue-ordered in-memory list
#[derive(Default)]
pub struct MemoryInvitationRegistry {
    pending: RwLock<Vec<PendingInvitation>>,
}

impl MemoryInvitationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn prune_expired(pending: &mut Vec<PendingInvitation>) {
        let now = Utc::now();
        pending.retain(|inv| {
            let keep = !inv.is_expired_at(now);
            if !keep {
                tracing::debug!(email = %inv.email, "Expired invitation dropped");
            }
            keep
        });
    }
}

#[async_trait]
impl InvitationRegistry for MemoryInvitationRegistry {
    async fn create(&self, invitation: &PendingInvitation) -> StoreResult<()> {
        let mut pending = self.pending.write();
        Self::prune_expired(&mut pending);

        if pending
            .iter()
            .any(|inv| inv.email.eq_ignore_ascii_case(&invitation.email))
        {
            return Err(DomainError::InvitationAlreadyPending);
        }

        pending.push(invitation.clone());
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> StoreResult<Option<PendingInvitation>> {
        let mut pending = self.pending.write();
        Self::prune_expired(&mut pending);
        Ok(pending.iter().find(|inv| inv.token == token).cloned())
    }

    async fn email_pending(&self, email: &str) -> StoreResult<bool> {
        let mut pending = self.pending.write();
        Self::prune_expired(&mut pending);
        Ok(pending
            .iter()
            .any(|inv| inv.email.eq_ignore_ascii_case(email)))
    }

    async fn consume(&self, token: &str) -> StoreResult<Option<PendingInvitation>> {
        let mut pending = self.pending.write();
        Self::prune_expired(&mut pending);
        match pending.iter().position(|inv| inv.token == token) {
            Some(pos) => Ok(Some(pending.remove(pos))),
            None => Ok(None),
        }
    }

    async fn list_pending(&self) -> StoreResult<Vec<PendingInvitation>> {
        let mut pending = self.pending.write();
        Self::prune_expired(&mut pending);
        Ok(pending.clone())
    }
}
