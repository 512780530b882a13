//! Store traits (ports) - define the interface for state access
//!
//! The domain layer defines what it needs; the store layer provides the
//! implementation. The reference system keeps all state in process memory,
//! so the in-memory implementations in `huddle-store` are the only ones
//! shipped, but a durable backend would implement these same traits.

use async_trait::async_trait;

use crate::entities::{AttendanceLog, Channel, LeaveRequest, Message, PendingInvitation, User};
use crate::error::DomainError;
use crate::value_objects::{ConversationKey, Snowflake};

/// Result type for store operations
pub type StoreResult<T> = Result<T, DomainError>;

// ============================================================================
// User Directory
// ============================================================================

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<User>>;

    /// Find user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> StoreResult<bool>;

    /// Add a new user to the directory
    async fn create(&self, user: &User) -> StoreResult<()>;

    /// Update an existing user
    async fn update(&self, user: &User) -> StoreResult<()>;

    /// All users in insertion order (snapshot)
    async fn list(&self) -> StoreResult<Vec<User>>;
}

// ============================================================================
// Channel Directory
// ============================================================================

#[async_trait]
pub trait ChannelDirectory: Send + Sync {
    /// Find channel by ID
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Channel>>;

    /// Add a new channel
    async fn create(&self, channel: &Channel) -> StoreResult<()>;

    /// Update an existing channel (membership changes land here)
    async fn update(&self, channel: &Channel) -> StoreResult<()>;

    /// All channels in insertion order (snapshot)
    async fn list(&self) -> StoreResult<Vec<Channel>>;
}

// ============================================================================
// Message Store
// ============================================================================

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append a message to the tail of a conversation's log. The log is
    /// created on first append.
    async fn append(&self, key: ConversationKey, message: Message) -> StoreResult<()>;

    /// Replace a message's content. Fails with `NotMessageAuthor` unless
    /// `caller_id` authored the message. Returns the updated message.
    async fn edit(
        &self,
        key: ConversationKey,
        message_id: Snowflake,
        caller_id: Snowflake,
        content: String,
    ) -> StoreResult<Message>;

    /// Remove a message entirely (no tombstone). Fails with
    /// `NotMessageAuthor` unless `caller_id` authored the message.
    async fn delete(
        &self,
        key: ConversationKey,
        message_id: Snowflake,
        caller_id: Snowflake,
    ) -> StoreResult<()>;

    /// Toggle `user_id` under `emoji` on a message; a second identical call
    /// reverts the first. Returns the updated message.
    async fn toggle_reaction(
        &self,
        key: ConversationKey,
        message_id: Snowflake,
        emoji: &str,
        user_id: Snowflake,
    ) -> StoreResult<Message>;

    /// Snapshot of the conversation's ordered log. Callers receive
    /// independent copies and cannot mutate store state through them.
    async fn list_for(&self, key: ConversationKey) -> StoreResult<Vec<Message>>;
}

// ============================================================================
// Invitation Registry
// ============================================================================

#[async_trait]
pub trait InvitationRegistry: Send + Sync {
    /// Record a freshly issued invitation
    async fn create(&self, invitation: &PendingInvitation) -> StoreResult<()>;

    /// Look up by token. Expired invitations are treated as absent and
    /// dropped when touched.
    async fn find_by_token(&self, token: &str) -> StoreResult<Option<PendingInvitation>>;

    /// Check whether an unexpired invitation is pending for this email
    async fn email_pending(&self, email: &str) -> StoreResult<bool>;

    /// Atomically remove and return the invitation for `token`, if present
    /// and unexpired. At most one caller can win.
    async fn consume(&self, token: &str) -> StoreResult<Option<PendingInvitation>>;

    /// All unexpired pending invitations in issue order (snapshot)
    async fn list_pending(&self) -> StoreResult<Vec<PendingInvitation>>;
}

// ============================================================================
// Attendance Store
// ============================================================================

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Persist a completed session
    async fn create(&self, log: &AttendanceLog) -> StoreResult<()>;

    /// Replace an existing log entry
    async fn update(&self, log: &AttendanceLog) -> StoreResult<()>;

    /// Remove a log entry
    async fn delete(&self, id: Snowflake) -> StoreResult<()>;

    /// Find a log entry by ID
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<AttendanceLog>>;

    /// A user's log entries in creation order (snapshot)
    async fn list_for_user(&self, user_id: Snowflake) -> StoreResult<Vec<AttendanceLog>>;
}

// ============================================================================
// Leave Store
// ============================================================================

#[async_trait]
pub trait LeaveStore: Send + Sync {
    /// Record a new request
    async fn create(&self, request: &LeaveRequest) -> StoreResult<()>;

    /// Replace an existing request (decisions land here)
    async fn update(&self, request: &LeaveRequest) -> StoreResult<()>;

    /// Find a request by ID
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<LeaveRequest>>;

    /// A user's requests in submission order (snapshot)
    async fn list_for_user(&self, user_id: Snowflake) -> StoreResult<Vec<LeaveRequest>>;

    /// All pending requests in submission order (snapshot)
    async fn list_pending(&self) -> StoreResult<Vec<LeaveRequest>>;
}
