//! # huddle-store
//!
//! State layer: in-memory implementations of the `huddle-core` store traits
//! plus local adapters for the external ports. All state is process memory
//! and is lost on restart; a durable backend would implement the same
//! traits behind the same contracts.

pub mod attendance;
pub mod channels;
pub mod external;
pub mod invitations;
pub mod leave;
pub mod messages;
pub mod users;

// Re-export commonly used types at crate root
pub use attendance::MemoryAttendanceStore;
pub use channels::MemoryChannelDirectory;
pub use external::{LocalDigestSummarizer, OfflineSummarizer, RecordingMailTransport, SentMail};
pub use invitations::MemoryInvitationRegistry;
pub use leave::MemoryLeaveStore;
pub use messages::MemoryMessageStore;
pub use users::MemoryUserDirectory;
