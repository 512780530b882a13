//! Request DTOs for service operations
//!
//! All request DTOs implement `Deserialize` and, where fields need bounds,
//! `Validate`. Validation happens at this boundary; the domain layer only
//! sees well-formed input.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Channel Requests
// ============================================================================

/// Create channel request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateChannelRequest {
    #[validate(length(min = 1, max = 100, message = "Channel name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub private: bool,

    /// Initial members besides the creator (Snowflake IDs as strings)
    #[serde(default)]
    pub member_ids: Vec<String>,
}

// ============================================================================
// Message Requests
// ============================================================================

/// File reference carried alongside a message
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AttachmentUpload {
    #[validate(length(min = 1, max = 255, message = "Filename must be 1-255 characters"))]
    pub filename: String,

    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    /// MIME content type, used to classify the preview kind
    #[serde(default)]
    pub content_type: String,
}

/// Send message request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub content: String,

    #[validate(nested)]
    pub attachment: Option<AttachmentUpload>,
}

impl SendMessageRequest {
    /// Plain text message
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            attachment: None,
        }
    }
}

/// Edit message request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EditMessageRequest {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub content: String,
}

// ============================================================================
// Invitation Requests
// ============================================================================

/// Issue invitation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InviteRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Accept invitation request - profile fields for the new user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AcceptInviteRequest {
    #[validate(length(min = 1, max = 80, message = "Name must be 1-80 characters"))]
    pub name: String,

    #[validate(length(max = 80, message = "Designation must be at most 80 characters"))]
    pub designation: Option<String>,

    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: Option<String>,
}

// ============================================================================
// Profile Requests
// ============================================================================

/// Update profile request; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 80, message = "Name must be 1-80 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 80, message = "Designation must be at most 80 characters"))]
    pub designation: Option<String>,

    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: Option<String>,

    /// Avatar reference, or None to leave unchanged
    pub avatar: Option<String>,
}

// ============================================================================
// Leave Requests
// ============================================================================

/// Submit leave request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LeaveRequestInput {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[validate(length(min = 1, max = 500, message = "Reason must be 1-500 characters"))]
    pub reason: String,
}

// ============================================================================
// Attendance Requests
// ============================================================================

/// Edit a recorded attendance log entry
#[derive(Debug, Clone, Deserialize)]
pub struct EditAttendanceRequest {
    pub clock_in: DateTime<Utc>,
    pub clock_out: DateTime<Utc>,
    pub break_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_name_bounds() {
        let request = CreateChannelRequest {
            name: String::new(),
            description: String::new(),
            private: false,
            member_ids: vec![],
        };
        assert!(request.validate().is_err());

        let request = CreateChannelRequest {
            name: "launch".to_string(),
            description: String::new(),
            private: false,
            member_ids: vec![],
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_invite_email_validation() {
        let request = InviteRequest {
            email: "not-an-email".to_string(),
        };
        assert!(request.validate().is_err());

        let request = InviteRequest {
            email: "alice@example.com".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_message_content_bounds() {
        assert!(SendMessageRequest::text("").validate().is_err());
        assert!(SendMessageRequest::text("hi").validate().is_ok());
        assert!(SendMessageRequest::text("x".repeat(2001)).validate().is_err());
    }

    #[test]
    fn test_nested_attachment_validation() {
        let request = SendMessageRequest {
            content: "see file".to_string(),
            attachment: Some(AttachmentUpload {
                filename: String::new(),
                url: "https://example.com/f.pdf".to_string(),
                content_type: "application/pdf".to_string(),
            }),
        };
        assert!(request.validate().is_err());
    }
}
