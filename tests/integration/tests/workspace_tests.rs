//! Workspace scenario tests
//!
//! End-to-end exercises of the facade: invitations, channels, messaging,
//! reactions, attendance, leave, and the default-selection policy.
//!
//! Run with: cargo test -p integration-tests --test workspace_tests

use chrono::{DateTime, TimeZone, Utc};
use integration_tests::{channel_request, invite_request, leave_input, TestHarness};

use huddle_core::{ActiveConversation, ConversationKey, ShiftState, Snowflake};
use huddle_service::dto::{
    AcceptInviteRequest, EditMessageRequest, InviteRequest, MailDeliveryStatus, RosterEntry,
    SendMessageRequest, SummaryOutcome,
};
use huddle_service::ConversationTarget;

fn t(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_770_000_000 + secs, 0).unwrap()
}

// ============================================================================
// Invitation Scenarios
// ============================================================================

#[tokio::test]
async fn test_invitation_lifecycle() {
    let h = TestHarness::start();
    let admin = h.sign_in("root@example.com", "Root").await;

    let issued = h
        .workspace
        .invitations()
        .invite(
            admin,
            InviteRequest {
                email: "alice@example.com".to_string(),
            },
        )
        .await
        .expect("invite failed");
    assert!(matches!(issued.delivery, MailDeliveryStatus::Sent { .. }));
    assert_eq!(h.mailer.sent().len(), 1);

    // Second issue for the same email is rejected before acceptance
    let second = h
        .workspace
        .invitations()
        .invite(
            admin,
            InviteRequest {
                email: "alice@example.com".to_string(),
            },
        )
        .await;
    assert!(second.is_err());

    let accepted = h
        .workspace
        .invitations()
        .accept(
            &issued.token,
            AcceptInviteRequest {
                name: "Alice".to_string(),
                designation: Some("Eng".to_string()),
                phone: None,
            },
        )
        .await
        .expect("accept failed");
    assert_eq!(accepted.email, "alice@example.com");
    assert_eq!(accepted.name, "Alice");

    // Directory now contains the user; the token is consumed
    let alice = h
        .workspace
        .users()
        .list_users()
        .await
        .unwrap()
        .into_iter()
        .find(|u| u.email == "alice@example.com")
        .expect("Alice not in directory");
    assert_eq!(alice.designation.as_deref(), Some("Eng"));
    assert!(h
        .workspace
        .invitations()
        .verify(&issued.token)
        .await
        .unwrap()
        .is_none());

    // A consumed token cannot be accepted again
    let replay = h
        .workspace
        .invitations()
        .accept(
            &issued.token,
            AcceptInviteRequest {
                name: "Mallory".to_string(),
                designation: None,
                phone: None,
            },
        )
        .await;
    assert!(replay.is_err());
}

#[tokio::test]
async fn test_failed_mail_does_not_roll_back_invitation() {
    let h = TestHarness::start();
    let admin = h.sign_in("root@example.com", "Root").await;

    h.mailer.fail_next();
    let issued = h
        .workspace
        .invitations()
        .invite(admin, invite_request())
        .await
        .expect("issue should survive mail failure");
    assert!(matches!(issued.delivery, MailDeliveryStatus::Failed { .. }));

    // The join link still works: verification and acceptance proceed
    assert!(h
        .workspace
        .invitations()
        .verify(&issued.token)
        .await
        .unwrap()
        .is_some());
    let accepted = h
        .workspace
        .invitations()
        .accept(
            &issued.token,
            AcceptInviteRequest {
                name: "Late Arrival".to_string(),
                designation: None,
                phone: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(accepted.email, issued.email);
}

// ============================================================================
// Channel Scenarios
// ============================================================================

#[tokio::test]
async fn test_channel_membership_lifecycle() {
    let h = TestHarness::start();
    let u1 = h.sign_in("u1@example.com", "One").await;
    h.workspace.identity_changed(None).await.unwrap();
    let u2 = h.sign_in("u2@example.com", "Two").await;

    let channel = h
        .workspace
        .channels()
        .create_channel(u1, channel_request("launch", vec![u2.to_string()]))
        .await
        .expect("channel create failed");
    let channel_id: Snowflake = channel.id.parse().unwrap();

    let listed = h.workspace.channels().list_channels().await.unwrap();
    let launch = listed.iter().find(|c| c.name == "launch").unwrap();
    assert!(launch.member_ids.contains(&u1.to_string()));
    assert!(launch.member_ids.contains(&u2.to_string()));

    let after = h
        .workspace
        .channels()
        .remove_member(channel_id, u1, u2)
        .await
        .unwrap();
    assert_eq!(after.member_ids, vec![u1.to_string()]);
}

// ============================================================================
// Message and Reaction Scenarios
// ============================================================================

#[tokio::test]
async fn test_reaction_toggle_parity() {
    let h = TestHarness::start();
    let u1 = h.sign_in("u1@example.com", "One").await;
    h.workspace.identity_changed(None).await.unwrap();
    let u2 = h.sign_in("u2@example.com", "Two").await;

    let key = ConversationKey::direct(u1, u2);
    let sent = h
        .workspace
        .messages()
        .send_message(key, u1, SendMessageRequest::text("toggle me"))
        .await
        .unwrap();
    let message_id: Snowflake = sent.id.parse().unwrap();

    let baseline = h.workspace.messages().list_messages(key, u1).await.unwrap()[0]
        .reactions
        .clone();

    for _ in 0..2 {
        h.workspace
            .reactions()
            .toggle_reaction(key, message_id, u2, "👍")
            .await
            .unwrap();
    }

    let after = h.workspace.messages().list_messages(key, u1).await.unwrap()[0]
        .reactions
        .clone();
    assert_eq!(baseline, after, "even toggle count restores the reaction map");
}

#[tokio::test]
async fn test_non_author_cannot_edit_or_delete() {
    let h = TestHarness::start();
    let u1 = h.sign_in("u1@example.com", "One").await;
    h.workspace.identity_changed(None).await.unwrap();
    let u2 = h.sign_in("u2@example.com", "Two").await;

    let key = ConversationKey::direct(u1, u2);
    let sent = h
        .workspace
        .messages()
        .send_message(key, u1, SendMessageRequest::text("hands off"))
        .await
        .unwrap();
    let message_id: Snowflake = sent.id.parse().unwrap();

    let edit = h
        .workspace
        .messages()
        .edit_message(
            key,
            message_id,
            u2,
            EditMessageRequest {
                content: "defaced".to_string(),
            },
        )
        .await;
    assert!(edit.unwrap_err().is_denied());

    let delete = h.workspace.messages().delete_message(key, message_id, u2).await;
    assert!(delete.unwrap_err().is_denied());

    // Store unchanged either way
    let listed = h.workspace.messages().list_messages(key, u1).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].content, "hands off");
    assert!(listed[0].edited_at.is_none());
}

// ============================================================================
// Default Conversation Selection
// ============================================================================

#[tokio::test]
async fn test_default_selection_prefers_self_dm() {
    let h = TestHarness::start();
    let me = h.sign_in("solo@example.com", "Solo").await;

    match h.workspace.active_conversation() {
        Some(ActiveConversation::Direct(user)) => assert_eq!(user.id, me),
        other => panic!("expected self-DM, got {other:?}"),
    }
}

#[tokio::test]
async fn test_default_selection_first_channel_without_identity() {
    let h = TestHarness::start();
    let me = h.sign_in("solo@example.com", "Solo").await;
    for name in ["first", "second"] {
        h.workspace
            .channels()
            .create_channel(me, channel_request(name, vec![]))
            .await
            .unwrap();
    }

    h.workspace.identity_changed(None).await.unwrap();
    h.workspace.select_default().await.unwrap();

    match h.workspace.active_conversation() {
        Some(ActiveConversation::Channel(channel)) => assert_eq!(channel.name, "first"),
        other => panic!("expected first channel, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_selection_is_silent_noop() {
    let h = TestHarness::start();
    h.sign_in("solo@example.com", "Solo").await;
    let before = h.workspace.active_conversation();

    h.workspace
        .set_active(ConversationTarget::Channel(Snowflake::new(999_999)))
        .await
        .unwrap();
    assert_eq!(h.workspace.active_conversation(), before);
}

// ============================================================================
// Attendance Scenarios
// ============================================================================

#[tokio::test]
async fn test_attendance_timeline_totals() {
    let h = TestHarness::start();
    let worker = h.sign_in("worker@example.com", "Worker").await;
    let attendance = h.workspace.attendance();

    attendance.clock_in_at(worker, t(0)).await.unwrap();
    for i in 1..=5 {
        attendance.tick_at(worker, t(i));
    }
    attendance.start_break_at(worker, t(5)).await.unwrap();
    for i in 6..=8 {
        attendance.tick_at(worker, t(i));
    }
    attendance.end_break_at(worker, t(8)).await.unwrap();
    for i in 9..=10 {
        attendance.tick_at(worker, t(i));
    }
    let entry = attendance.clock_out_at(worker, t(10)).await.unwrap();

    assert_eq!(entry.worked_secs, 7);
    assert_eq!(entry.break_secs, 3);
    assert_eq!(attendance.state(worker), ShiftState::ClockedOut);

    let logs = attendance.list_logs(worker).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].activity_pct, 70);
}

#[tokio::test]
async fn test_ticker_accrues_wall_clock_time() {
    let h = TestHarness::start();
    h.sign_in("worker@example.com", "Worker").await;
    let worker = h.workspace.current_user().unwrap();

    h.workspace.clock_in().await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(2500)).await;

    let (worked, _) = h.workspace.attendance().live_totals(worker);
    assert!(
        (1..=4).contains(&worked),
        "ticker should have accrued ~2s, got {worked}"
    );

    h.workspace.start_break().await.unwrap();
    let (frozen, _) = h.workspace.attendance().live_totals(worker);
    tokio::time::sleep(std::time::Duration::from_millis(1200)).await;
    let (still, _) = h.workspace.attendance().live_totals(worker);
    assert_eq!(frozen, still, "no accrual while on break");

    let entry = h.workspace.clock_out().await.unwrap();
    assert!(entry.break_secs >= 1);
}

// ============================================================================
// Leave Scenarios
// ============================================================================

#[tokio::test]
async fn test_leave_request_decision_flow() {
    let h = TestHarness::start();
    // First sign-in is the admin
    let admin = h.sign_in("boss@example.com", "Boss").await;
    h.workspace.identity_changed(None).await.unwrap();
    let member = h.sign_in("member@example.com", "Member").await;

    let submitted = h
        .workspace
        .leave()
        .submit(member, leave_input())
        .await
        .unwrap();
    assert_eq!(submitted.status, "pending");
    assert_eq!(submitted.day_count, 3);
    let request_id: Snowflake = submitted.id.parse().unwrap();

    // Member cannot decide their own request
    assert!(h
        .workspace
        .leave()
        .decide(member, request_id, true, None)
        .await
        .unwrap_err()
        .is_denied());

    let decided = h
        .workspace
        .leave()
        .decide(admin, request_id, false, Some("release week".to_string()))
        .await
        .unwrap();
    assert_eq!(decided.status, "rejected");
    assert_eq!(decided.decision_reason.as_deref(), Some("release week"));

    // Terminal: no second decision
    assert!(h
        .workspace
        .leave()
        .decide(admin, request_id, true, None)
        .await
        .is_err());
}

// ============================================================================
// Roster and Summary
// ============================================================================

#[tokio::test]
async fn test_roster_lists_users_then_invitees() {
    let h = TestHarness::start();
    let admin = h.sign_in("root@example.com", "Root").await;
    h.workspace
        .invitations()
        .invite(admin, invite_request())
        .await
        .unwrap();

    let roster = h.workspace.roster().await.unwrap();
    assert_eq!(roster.len(), 2);
    assert!(matches!(&roster[0], RosterEntry::Active(u) if u.email == "root@example.com"));
    assert!(matches!(&roster[1], RosterEntry::Invited(_)));
}

#[tokio::test]
async fn test_summary_of_active_conversation() {
    let h = TestHarness::start();
    h.sign_in("ana@example.com", "Ana").await;

    h.workspace
        .send_to_active(SendMessageRequest::text("remember the milk"))
        .await
        .unwrap();
    let outcome = h.workspace.summarize_active().await.unwrap();
    match outcome {
        SummaryOutcome::Ready { text } => assert!(text.contains("remember the milk")),
        SummaryOutcome::Unavailable { .. } => panic!("summarizer should be available"),
    }
}

#[tokio::test]
async fn test_summary_degrades_when_summarizer_down() {
    let h = TestHarness::start_with_offline_summarizer();
    h.sign_in("ana@example.com", "Ana").await;

    h.workspace
        .send_to_active(SendMessageRequest::text("still here"))
        .await
        .unwrap();
    let outcome = h.workspace.summarize_active().await.unwrap();
    assert!(matches!(outcome, SummaryOutcome::Unavailable { .. }));

    // Local state intact after the failure
    let visible = h.workspace.visible_messages().await.unwrap();
    assert_eq!(visible.len(), 1);
}
