//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Channel not found: {0}")]
    ChannelNotFound(Snowflake),

    #[error("Message not found: {0}")]
    MessageNotFound(Snowflake),

    #[error("No message log for conversation: {0}")]
    ConversationNotFound(String),

    #[error("Invitation not found or expired")]
    InvitationNotFound,

    #[error("Attendance log not found: {0}")]
    AttendanceLogNotFound(Snowflake),

    #[error("Leave request not found: {0}")]
    LeaveRequestNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("End date precedes start date")]
    InvalidDateRange,

    #[error("Clock-out precedes clock-in")]
    ClockOutBeforeClockIn,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not the message author")]
    NotMessageAuthor,

    #[error("Administrator role required")]
    AdminRequired,

    #[error("Not a member of this channel")]
    NotChannelMember,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already belongs to a workspace user")]
    EmailAlreadyExists,

    #[error("An invitation for this email is already pending")]
    InvitationAlreadyPending,

    #[error("Already a member of this channel")]
    AlreadyMember,

    #[error("Leave request has already been decided")]
    LeaveAlreadyDecided,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("The channel creator cannot be removed")]
    CannotRemoveCreator,

    #[error("Invitation has expired")]
    InvitationExpired,

    #[error("Cannot {action} while {from}")]
    InvalidShiftTransition {
        from: &'static str,
        action: &'static str,
    },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for caller-facing responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::ConversationNotFound(_) => "UNKNOWN_CONVERSATION",
            Self::InvitationNotFound => "UNKNOWN_INVITATION",
            Self::AttendanceLogNotFound(_) => "UNKNOWN_ATTENDANCE_LOG",
            Self::LeaveRequestNotFound(_) => "UNKNOWN_LEAVE_REQUEST",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::ClockOutBeforeClockIn => "INVALID_CLOCK_RANGE",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Authorization
            Self::NotMessageAuthor => "NOT_MESSAGE_AUTHOR",
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::NotChannelMember => "NOT_CHANNEL_MEMBER",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::InvitationAlreadyPending => "INVITATION_ALREADY_PENDING",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::LeaveAlreadyDecided => "LEAVE_ALREADY_DECIDED",

            // Business Rules
            Self::CannotRemoveCreator => "CANNOT_REMOVE_CREATOR",
            Self::InvitationExpired => "INVITATION_EXPIRED",
            Self::InvalidShiftTransition { .. } => "INVALID_SHIFT_TRANSITION",

            // Infrastructure
            Self::StoreError(_) => "STORE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ChannelNotFound(_)
                | Self::MessageNotFound(_)
                | Self::ConversationNotFound(_)
                | Self::InvitationNotFound
                | Self::AttendanceLogNotFound(_)
                | Self::LeaveRequestNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::InvalidDateRange
                | Self::ClockOutBeforeClockIn
                | Self::ContentTooLong { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotMessageAuthor | Self::AdminRequired | Self::NotChannelMember
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::InvitationAlreadyPending
                | Self::AlreadyMember
                | Self::LeaveAlreadyDecided
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::UserNotFound(Snowflake::new(1));
        assert_eq!(err.code(), "UNKNOWN_USER");

        let err = DomainError::NotMessageAuthor;
        assert_eq!(err.code(), "NOT_MESSAGE_AUTHOR");
    }

    #[test]
    fn test_classifiers() {
        assert!(DomainError::ChannelNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::NotMessageAuthor.is_authorization());
        assert!(DomainError::EmailAlreadyExists.is_conflict());
        assert!(DomainError::InvalidDateRange.is_validation());
        assert!(!DomainError::EmailAlreadyExists.is_not_found());
    }

    #[test]
    fn test_shift_transition_display() {
        let err = DomainError::InvalidShiftTransition {
            from: "idle",
            action: "start-break",
        };
        assert_eq!(err.to_string(), "Cannot start-break while idle");
    }
}
