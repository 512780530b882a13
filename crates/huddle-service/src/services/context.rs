//! Service context - dependency container for services
//!
//! Holds the stores, external ports, shift sessions, ID generator, and
//! configuration shared by every service.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use huddle_common::AppConfig;
use huddle_core::{
    AttendanceStore, ChannelDirectory, InvitationRegistry, LeaveStore, MailTransport,
    MessageStore, ShiftSession, Snowflake, SnowflakeGenerator, Summarizer, UserDirectory,
};
use huddle_store::{
    LocalDigestSummarizer, MemoryAttendanceStore, MemoryChannelDirectory,
    MemoryInvitationRegistry, MemoryLeaveStore, MemoryMessageStore, MemoryUserDirectory,
    RecordingMailTransport,
};

/// Service context containing all dependencies.
///
/// Cheap to clone; every field is shared. This is the single writer of all
/// workspace state: services borrow it, the facade owns one.
#[derive(Clone)]
pub struct ServiceContext {
    user_dir: Arc<dyn UserDirectory>,
    channel_dir: Arc<dyn ChannelDirectory>,
    message_store: Arc<dyn MessageStore>,
    invitation_registry: Arc<dyn InvitationRegistry>,
    attendance_store: Arc<dyn AttendanceStore>,
    leave_store: Arc<dyn LeaveStore>,

    mailer: Arc<dyn MailTransport>,
    summarizer: Arc<dyn Summarizer>,

    /// Live shift sessions, one per clocked-in user
    shift_sessions: Arc<Mutex<HashMap<Snowflake, ShiftSession>>>,

    snowflake_generator: Arc<SnowflakeGenerator>,
    config: Arc<AppConfig>,
}

impl ServiceContext {
    /// Create a context from explicit dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_dir: Arc<dyn UserDirectory>,
        channel_dir: Arc<dyn ChannelDirectory>,
        message_store: Arc<dyn MessageStore>,
        invitation_registry: Arc<dyn InvitationRegistry>,
        attendance_store: Arc<dyn AttendanceStore>,
        leave_store: Arc<dyn LeaveStore>,
        mailer: Arc<dyn MailTransport>,
        summarizer: Arc<dyn Summarizer>,
        config: AppConfig,
    ) -> Self {
        let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));
        Self {
            user_dir,
            channel_dir,
            message_store,
            invitation_registry,
            attendance_store,
            leave_store,
            mailer,
            summarizer,
            shift_sessions: Arc::new(Mutex::new(HashMap::new())),
            snowflake_generator,
            config: Arc::new(config),
        }
    }

    /// Fully in-memory context: memory stores, recording mailer, local
    /// digest summarizer. This is the reference wiring; a deployment with
    /// real collaborators swaps ports via [`ServiceContext::new`].
    #[must_use]
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(
            Arc::new(MemoryUserDirectory::new()),
            Arc::new(MemoryChannelDirectory::new()),
            Arc::new(MemoryMessageStore::new()),
            Arc::new(MemoryInvitationRegistry::new()),
            Arc::new(MemoryAttendanceStore::new()),
            Arc::new(MemoryLeaveStore::new()),
            Arc::new(RecordingMailTransport::new()),
            Arc::new(LocalDigestSummarizer::new()),
            config,
        )
    }

    // === Stores ===

    /// Get the user directory
    pub fn user_dir(&self) -> &dyn UserDirectory {
        self.user_dir.as_ref()
    }

    /// Get the channel directory
    pub fn channel_dir(&self) -> &dyn ChannelDirectory {
        self.channel_dir.as_ref()
    }

    /// Get the message store
    pub fn message_store(&self) -> &dyn MessageStore {
        self.message_store.as_ref()
    }

    /// Get the invitation registry
    pub fn invitation_registry(&self) -> &dyn InvitationRegistry {
        self.invitation_registry.as_ref()
    }

    /// Get the attendance store
    pub fn attendance_store(&self) -> &dyn AttendanceStore {
        self.attendance_store.as_ref()
    }

    /// Get the leave store
    pub fn leave_store(&self) -> &dyn LeaveStore {
        self.leave_store.as_ref()
    }

    // === Ports ===

    /// Get the mail transport
    pub fn mailer(&self) -> &dyn MailTransport {
        self.mailer.as_ref()
    }

    /// Get the summarizer
    pub fn summarizer(&self) -> &dyn Summarizer {
        self.summarizer.as_ref()
    }

    // === Shared state ===

    /// Live shift sessions keyed by user
    pub(crate) fn shift_sessions(&self) -> &Mutex<HashMap<Snowflake, ShiftSession>> {
        &self.shift_sessions
    }

    // === Utilities ===

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("stores", &"...")
            .field("ports", &"...")
            .field("config", &self.config)
            .finish()
    }
}
