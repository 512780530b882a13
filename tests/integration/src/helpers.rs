//! Test helpers for integration tests
//!
//! Builds a workspace over the in-memory stores with inspectable port
//! adapters, and shortcuts for the common sign-in flow.

use std::sync::Arc;

use huddle_common::AppConfig;
use huddle_core::{AuthenticatedIdentity, Snowflake, Summarizer};
use huddle_service::{ServiceContext, Workspace};
use huddle_store::{
    LocalDigestSummarizer, MemoryAttendanceStore, MemoryChannelDirectory,
    MemoryInvitationRegistry, MemoryLeaveStore, MemoryMessageStore, MemoryUserDirectory,
    OfflineSummarizer, RecordingMailTransport,
};

/// A wired-up workspace plus handles to the local port adapters
pub struct TestHarness {
    pub workspace: Workspace,
    pub mailer: Arc<RecordingMailTransport>,
}

impl TestHarness {
    /// Workspace with the standard local adapters
    pub fn start() -> Self {
        Self::with_summarizer(Arc::new(LocalDigestSummarizer::new()))
    }

    /// Workspace whose summarizer is always unavailable
    pub fn start_with_offline_summarizer() -> Self {
        Self::with_summarizer(Arc::new(OfflineSummarizer::new()))
    }

    fn with_summarizer(summarizer: Arc<dyn Summarizer>) -> Self {
        let mailer = Arc::new(RecordingMailTransport::new());
        let ctx = ServiceContext::new(
            Arc::new(MemoryUserDirectory::new()),
            Arc::new(MemoryChannelDirectory::new()),
            Arc::new(MemoryMessageStore::new()),
            Arc::new(MemoryInvitationRegistry::new()),
            Arc::new(MemoryAttendanceStore::new()),
            Arc::new(MemoryLeaveStore::new()),
            mailer.clone(),
            summarizer,
            AppConfig::default(),
        );
        Self {
            workspace: Workspace::new(ctx),
            mailer,
        }
    }

    /// Sign a user in through the identity-changed notification and return
    /// their id. The first sign-in of a harness becomes the admin.
    pub async fn sign_in(&self, email: &str, name: &str) -> Snowflake {
        self.workspace
            .identity_changed(Some(AuthenticatedIdentity::new(
                format!("sub-{email}"),
                email,
                name,
            )))
            .await
            .expect("sign-in failed")
            .expect("identity produced no user");
        self.workspace.current_user().expect("no current user")
    }
}
