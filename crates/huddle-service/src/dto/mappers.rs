//! Entity-to-response mapping

use huddle_core::{format_hms, AttendanceLog, Channel, LeaveRequest, Message, Snowflake, User};

use super::responses::{
    AttachmentView, AttendanceLogResponse, ChannelResponse, LeaveResponse, MessageResponse,
    ReactionView, UserResponse,
};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
            online: user.online,
            designation: user.designation.clone(),
            phone: user.phone.clone(),
            avatar_url: user.avatar_url(),
            created_at: user.created_at,
        }
    }
}

pub(crate) fn channel_response(channel: &Channel) -> ChannelResponse {
    ChannelResponse {
        id: channel.id.to_string(),
        name: channel.name.clone(),
        description: channel.description.clone(),
        private: channel.private,
        member_ids: channel.member_ids.iter().map(ToString::to_string).collect(),
        created_by: channel.created_by.to_string(),
        member_count: channel.member_count(),
        created_at: channel.created_at,
    }
}

/// Build a message response; `viewer_id` drives the per-emoji `me` flag.
pub(crate) fn message_response(
    message: &Message,
    author: UserResponse,
    viewer_id: Snowflake,
) -> MessageResponse {
    let reactions = message
        .reactions
        .iter()
        .map(|(emoji, users)| ReactionView {
            emoji: emoji.clone(),
            user_ids: users.iter().map(ToString::to_string).collect(),
            count: users.len(),
            me: users.contains(&viewer_id),
        })
        .collect();

    MessageResponse {
        id: message.id.to_string(),
        author,
        content: message.content.clone(),
        created_at: message.created_at,
        edited_at: message.edited_at,
        attachment: message.attachment.as_ref().map(|a| AttachmentView {
            filename: a.filename.clone(),
            url: a.url.clone(),
            kind: format!("{:?}", a.kind).to_lowercase(),
        }),
        reactions,
    }
}

pub(crate) fn attendance_response(log: &AttendanceLog) -> AttendanceLogResponse {
    AttendanceLogResponse {
        id: log.id.to_string(),
        user_id: log.user_id.to_string(),
        clock_in: log.clock_in,
        clock_out: log.clock_out,
        worked_secs: log.worked_secs,
        break_secs: log.break_secs,
        worked_hms: format_hms(log.worked_secs),
        break_hms: format_hms(log.break_secs),
        activity_pct: log.activity_pct,
    }
}

pub(crate) fn leave_response(request: &LeaveRequest) -> LeaveResponse {
    LeaveResponse {
        id: request.id.to_string(),
        user_id: request.user_id.to_string(),
        requested_at: request.requested_at,
        start_date: request.start_date,
        end_date: request.end_date,
        day_count: request.day_count(),
        reason: request.reason.clone(),
        status: request.status.to_string(),
        decision_reason: request.decision_reason.clone(),
    }
}
