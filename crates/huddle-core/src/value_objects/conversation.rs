//! Conversation addressing - storage keys and the resolved active view

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::{Channel, User};
use crate::value_objects::Snowflake;

/// Canonical storage key for a conversation's message log.
///
/// A direct-message pair is normalized so both participants address the same
/// log regardless of who opened it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ConversationKey {
    /// A named multi-member channel
    Channel { channel_id: Snowflake },
    /// A direct-message pair, stored as (low, high)
    Direct {
        low: Snowflake,
        high: Snowflake,
    },
}

impl ConversationKey {
    /// Key for a channel conversation
    #[must_use]
    pub const fn channel(channel_id: Snowflake) -> Self {
        Self::Channel { channel_id }
    }

    /// Key for a direct-message pair; order of arguments does not matter
    #[must_use]
    pub fn direct(a: Snowflake, b: Snowflake) -> Self {
        if a <= b {
            Self::Direct { low: a, high: b }
        } else {
            Self::Direct { low: b, high: a }
        }
    }

    /// Check if this is a direct-message key
    #[inline]
    #[must_use]
    pub const fn is_direct(&self) -> bool {
        matches!(self, Self::Direct { .. })
    }

    /// For a direct key, the participant that is not `user_id` (a self-DM
    /// returns `user_id` itself). `None` for channel keys.
    #[must_use]
    pub fn direct_peer(&self, user_id: Snowflake) -> Option<Snowflake> {
        match self {
            Self::Direct { low, high } => {
                if *low == user_id {
                    Some(*high)
                } else if *high == user_id {
                    Some(*low)
                } else {
                    None
                }
            }
            Self::Channel { .. } => None,
        }
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channel { channel_id } => write!(f, "channel:{channel_id}"),
            Self::Direct { low, high } => write!(f, "dm:{low}:{high}"),
        }
    }
}

/// The conversation currently displayed and targeted for new messages.
///
/// Derived, never stored: recomputed whenever the selection or the
/// underlying directory changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveConversation {
    /// A channel, carrying the resolved channel record
    Channel(Channel),
    /// A direct message, carrying the resolved recipient
    Direct(User),
}

impl ActiveConversation {
    /// Display name for the conversation header
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Channel(channel) => &channel.name,
            Self::Direct(recipient) => &recipient.name,
        }
    }

    /// The storage key for this conversation, from `self_id`'s perspective
    #[must_use]
    pub fn key(&self, self_id: Snowflake) -> ConversationKey {
        match self {
            Self::Channel(channel) => ConversationKey::channel(channel.id),
            Self::Direct(recipient) => ConversationKey::direct(self_id, recipient.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_key_is_normalized() {
        let a = Snowflake::new(10);
        let b = Snowflake::new(20);
        assert_eq!(ConversationKey::direct(a, b), ConversationKey::direct(b, a));
    }

    #[test]
    fn test_direct_peer() {
        let a = Snowflake::new(10);
        let b = Snowflake::new(20);
        let key = ConversationKey::direct(a, b);
        assert_eq!(key.direct_peer(a), Some(b));
        assert_eq!(key.direct_peer(b), Some(a));
        assert_eq!(key.direct_peer(Snowflake::new(30)), None);
    }

    #[test]
    fn test_self_dm_peer() {
        let a = Snowflake::new(10);
        let key = ConversationKey::direct(a, a);
        assert_eq!(key.direct_peer(a), Some(a));
    }

    #[test]
    fn test_channel_key_display() {
        let key = ConversationKey::channel(Snowflake::new(42));
        assert_eq!(key.to_string(), "channel:42");
        assert!(!key.is_direct());
    }
}
