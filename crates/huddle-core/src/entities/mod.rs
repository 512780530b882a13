//! Domain entities - core business objects

mod attendance;
mod channel;
mod invitation;
mod leave;
mod message;
mod shift;
mod user;

pub use attendance::AttendanceLog;
pub use channel::Channel;
pub use invitation::{generate_invite_token, PendingInvitation};
pub use leave::{LeaveRequest, LeaveStatus};
pub use message::{Attachment, FileKind, Message};
pub use shift::{ShiftSession, ShiftState, ShiftSummary};
pub use user::User;
