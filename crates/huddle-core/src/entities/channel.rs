//! Channel entity - a named multi-member conversation

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Channel entity
///
/// Membership is a set; `member_ids` keeps insertion order because the
/// member list is shown in join order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: Snowflake,
    pub name: String,
    pub description: String,
    pub private: bool,
    pub member_ids: Vec<Snowflake>,
    pub created_by: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Channel {
    /// Create a new Channel. The creator is always the first member.
    #[must_use]
    pub fn new(
        id: Snowflake,
        name: String,
        description: String,
        private: bool,
        created_by: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            description,
            private,
            member_ids: vec![created_by],
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check membership
    #[inline]
    #[must_use]
    pub fn is_member(&self, user_id: Snowflake) -> bool {
        self.member_ids.contains(&user_id)
    }

    /// Number of members
    #[inline]
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.member_ids.len()
    }

    /// Add a member; returns false if already present
    pub fn add_member(&mut self, user_id: Snowflake) -> bool {
        if self.is_member(user_id) {
            return false;
        }
        self.member_ids.push(user_id);
        self.updated_at = Utc::now();
        true
    }

    /// Remove a member; returns false if absent or if `user_id` is the
    /// creator (the creator is always a member).
    pub fn remove_member(&mut self, user_id: Snowflake) -> bool {
        if user_id == self.created_by || !self.is_member(user_id) {
            return false;
        }
        self.member_ids.retain(|id| *id != user_id);
        self.updated_at = Utc::now();
        true
    }
}
