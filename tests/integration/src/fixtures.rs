//! Test fixtures and data generators

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use huddle_service::dto::{CreateChannelRequest, InviteRequest, LeaveRequestInput};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Unique invite request
pub fn invite_request() -> InviteRequest {
    InviteRequest {
        email: format!("invitee{}@example.com", unique_suffix()),
    }
}

/// Channel creation request with explicit initial members
pub fn channel_request(name: &str, member_ids: Vec<String>) -> CreateChannelRequest {
    CreateChannelRequest {
        name: name.to_string(),
        description: format!("{name} discussion"),
        private: false,
        member_ids,
    }
}

/// Three-day leave request
pub fn leave_input() -> LeaveRequestInput {
    LeaveRequestInput {
        start_date: NaiveDate::from_ymd_opt(2026, 10, 5).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 10, 7).unwrap(),
        reason: "Out of office".to_string(),
    }
}
