//! Data transfer objects crossing the service boundary

mod mappers;
mod requests;
mod responses;

pub use requests::{
    AcceptInviteRequest, AttachmentUpload, CreateChannelRequest, EditAttendanceRequest,
    EditMessageRequest, InviteRequest, LeaveRequestInput, SendMessageRequest,
    UpdateProfileRequest,
};
pub use responses::{
    AttachmentView, AttendanceLogResponse, ChannelResponse, InvitationIssuedResponse,
    InvitationResponse, LeaveResponse, MailDeliveryStatus, MessageResponse, ReactionView,
    RosterEntry, SummaryOutcome, UserResponse,
};

pub(crate) use mappers::{attendance_response, channel_response, leave_response, message_response};
