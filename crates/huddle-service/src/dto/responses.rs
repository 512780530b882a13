//! Response DTOs handed to presentation code
//!
//! Snapshots only: every response owns its data, so UI state can never
//! alias store internals.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// User representation for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub online: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub avatar_url: String,
    pub created_at: DateTime<Utc>,
}

/// Channel representation for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub private: bool,
    pub member_ids: Vec<String>,
    pub created_by: String,
    pub member_count: usize,
    pub created_at: DateTime<Utc>,
}

/// One emoji's reactions on a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionView {
    pub emoji: String,
    pub user_ids: Vec<String>,
    pub count: usize,
    /// Whether the viewing user is among the reactors
    pub me: bool,
}

/// Attached file view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentView {
    pub filename: String,
    pub url: String,
    pub kind: String,
}

/// Message representation for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub author: UserResponse,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<AttachmentView>,
    pub reactions: Vec<ReactionView>,
}

/// Pending invitation as shown in the roster; the token itself is never
/// listed back out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvitationResponse {
    pub email: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Outcome of the mail dispatch attached to an issued invitation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum MailDeliveryStatus {
    /// Transport accepted the mail
    Sent { message_id: String },
    /// Transport failed; the join link is still usable out-of-band
    Failed { reason: String },
    /// Mail dispatch disabled by configuration
    Skipped,
}

/// Result of issuing an invitation. The join link is always present,
/// whatever the delivery outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvitationIssuedResponse {
    pub email: String,
    pub token: String,
    pub join_url: String,
    pub expires_at: DateTime<Utc>,
    pub delivery: MailDeliveryStatus,
}

/// Attendance log entry for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceLogResponse {
    pub id: String,
    pub user_id: String,
    pub clock_in: DateTime<Utc>,
    pub clock_out: DateTime<Utc>,
    pub worked_secs: u64,
    pub break_secs: u64,
    /// `HH:MM:SS` rendering of `worked_secs`
    pub worked_hms: String,
    /// `HH:MM:SS` rendering of `break_secs`
    pub break_hms: String,
    pub activity_pct: u8,
}

/// Leave request for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaveResponse {
    pub id: String,
    pub user_id: String,
    pub requested_at: DateTime<Utc>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub day_count: i64,
    pub reason: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision_reason: Option<String>,
}

/// One row of the combined people list: joined users plus outstanding
/// invitations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RosterEntry {
    Active(UserResponse),
    Invited(InvitationResponse),
}

/// Result of a summarization attempt. Unavailability is an outcome, not an
/// error: the engine never fails because the summarizer did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SummaryOutcome {
    Ready { text: String },
    Unavailable { reason: String },
}
