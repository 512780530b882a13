//! Message entity - an entry in a conversation's ordered log

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::value_objects::Snowflake;

/// Kind of an attached file, used to pick a preview widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Video,
    Document,
}

impl FileKind {
    /// Classify a MIME content type
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.starts_with("image/") {
            Self::Image
        } else if content_type.starts_with("video/") {
            Self::Video
        } else {
            Self::Document
        }
    }
}

/// File reference carried by a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub url: String,
    pub kind: FileKind,
}

impl Attachment {
    /// Create a new Attachment
    pub fn new(filename: String, url: String, kind: FileKind) -> Self {
        Self {
            filename,
            url,
            kind,
        }
    }
}

/// Message entity
///
/// `created_at` is the send time and never changes; edits only move
/// `edited_at`, so sort-by-sent-order survives edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
    pub attachment: Option<Attachment>,
    /// emoji -> reacting user ids, in reaction order; empty sets are removed
    pub reactions: BTreeMap<String, Vec<Snowflake>>,
}

impl Message {
    /// Create a new Message
    pub fn new(id: Snowflake, author_id: Snowflake, content: String) -> Self {
        Self {
            id,
            author_id,
            content,
            created_at: Utc::now(),
            edited_at: None,
            attachment: None,
            reactions: BTreeMap::new(),
        }
    }

    /// Attach a file reference
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Check if message has been edited
    #[inline]
    pub fn is_edited(&self) -> bool {
        self.edited_at.is_some()
    }

    /// Replace the content, recording the edit time
    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.edited_at = Some(Utc::now());
    }

    /// Toggle `user_id` under `emoji`; returns true if the reaction was
    /// added, false if it was removed. An emptied emoji entry is dropped.
    pub fn toggle_reaction(&mut self, emoji: &str, user_id: Snowflake) -> bool {
        let users = self.reactions.entry(emoji.to_string()).or_default();
        if let Some(pos) = users.iter().position(|id| *id == user_id) {
            users.remove(pos);
            if users.is_empty() {
                self.reactions.remove(emoji);
            }
            false
        } else {
            users.push(user_id);
            true
        }
    }

    /// Total number of reactions across all emoji
    pub fn reaction_count(&self) -> usize {
        self.reactions.values().map(Vec::len).sum()
    }

    /// Check if message content is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_message() -> Message {
        Message::new(
            Snowflake::new(1),
            Snowflake::new(100),
            "Hello, team!".to_string(),
        )
    }

    #[test]
    fn test_message_creation() {
        let msg = sample_message();
        assert!(!msg.is_edited());
        assert!(!msg.is_empty());
        assert_eq!(msg.reaction_count(), 0);
    }

    #[test]
    fn test_edit_keeps_created_at() {
        let mut msg = sample_message();
        let sent = msg.created_at;

        msg.edit("Hello, everyone!".to_string());
        assert!(msg.is_edited());
        assert_eq!(msg.content, "Hello, everyone!");
        assert_eq!(msg.created_at, sent);
    }

    #[test]
    fn test_toggle_reaction_roundtrip() {
        let mut msg = sample_message();
        let user = Snowflake::new(200);

        assert!(msg.toggle_reaction("👍", user));
        assert_eq!(msg.reactions["👍"], vec![user]);

        assert!(!msg.toggle_reaction("👍", user));
        assert!(msg.reactions.is_empty(), "emptied emoji entry is dropped");
    }

    #[test]
    fn test_toggle_reaction_multiple_users() {
        let mut msg = sample_message();
        msg.toggle_reaction("🎉", Snowflake::new(200));
        msg.toggle_reaction("🎉", Snowflake::new(300));
        msg.toggle_reaction("🎉", Snowflake::new(200));

        assert_eq!(msg.reactions["🎉"], vec![Snowflake::new(300)]);
        assert_eq!(msg.reaction_count(), 1);
    }

    #[test]
    fn test_file_kind_classification() {
        assert_eq!(FileKind::from_content_type("image/png"), FileKind::Image);
        assert_eq!(FileKind::from_content_type("video/mp4"), FileKind::Video);
        assert_eq!(
            FileKind::from_content_type("application/pdf"),
            FileKind::Document
        );
    }
}
