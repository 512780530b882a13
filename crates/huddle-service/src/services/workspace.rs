//! Workspace facade
//!
//! The single surface presentation code talks to. Owns the current-user
//! and active-conversation references, fans mutations out to the services,
//! and drives the attendance tick while the current user is working.

use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use huddle_core::{
    ActiveConversation, AuthenticatedIdentity, ConversationKey, Snowflake, User, UserRole,
};

use crate::dto::{
    AttendanceLogResponse, MessageResponse, RosterEntry, SendMessageRequest, SummaryOutcome,
    UserResponse,
};

use super::attendance::AttendanceService;
use super::channel::ChannelService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::invitation::InvitationService;
use super::leave::LeaveService;
use super::message::MessageService;
use super::reaction::ReactionService;
use super::summary::SummaryService;
use super::user::UserService;

/// A conversation selection request: what the user clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationTarget {
    Channel(Snowflake),
    Direct(Snowflake),
}

/// Application state facade
pub struct Workspace {
    ctx: ServiceContext,
    current_user: RwLock<Option<Snowflake>>,
    active: RwLock<Option<ActiveConversation>>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl Workspace {
    /// Create a workspace over a service context
    #[must_use]
    pub fn new(ctx: ServiceContext) -> Self {
        Self {
            ctx,
            current_user: RwLock::new(None),
            active: RwLock::new(None),
            ticker: Mutex::new(None),
        }
    }

    /// The underlying service context
    pub fn context(&self) -> &ServiceContext {
        &self.ctx
    }

    // === Per-domain services ===

    pub fn users(&self) -> UserService<'_> {
        UserService::new(&self.ctx)
    }

    pub fn channels(&self) -> ChannelService<'_> {
        ChannelService::new(&self.ctx)
    }

    pub fn messages(&self) -> MessageService<'_> {
        MessageService::new(&self.ctx)
    }

    pub fn reactions(&self) -> ReactionService<'_> {
        ReactionService::new(&self.ctx)
    }

    pub fn invitations(&self) -> InvitationService<'_> {
        InvitationService::new(&self.ctx)
    }

    pub fn attendance(&self) -> AttendanceService<'_> {
        AttendanceService::new(&self.ctx)
    }

    pub fn leave(&self) -> LeaveService<'_> {
        LeaveService::new(&self.ctx)
    }

    pub fn summaries(&self) -> SummaryService<'_> {
        SummaryService::new(&self.ctx)
    }

    // === Identity ===

    /// Currently signed-in user, if any
    pub fn current_user(&self) -> Option<Snowflake> {
        *self.current_user.read()
    }

    /// React to an identity-provider notification.
    ///
    /// `Some` provisions the user on first sign-in (the very first user
    /// becomes the workspace admin), marks them online, and applies the
    /// default conversation selection. `None` signs the current user out.
    #[instrument(skip(self, identity))]
    pub async fn identity_changed(
        &self,
        identity: Option<AuthenticatedIdentity>,
    ) -> ServiceResult<Option<UserResponse>> {
        match identity {
            Some(identity) => {
                let mut user = match self.ctx.user_dir().find_by_email(&identity.email).await? {
                    Some(user) => user,
                    None => self.provision_user(&identity).await?,
                };

                self.users().set_online(user.id, true).await?;
                user.online = true;
                *self.current_user.write() = Some(user.id);
                info!(user_id = %user.id, "Signed in");

                if self.active.read().is_none() {
                    self.select_default().await?;
                }
                Ok(Some(UserResponse::from(&user)))
            }
            None => {
                self.stop_ticker();
                let previous = self.current_user.write().take();
                if let Some(user_id) = previous {
                    self.users().set_online(user_id, false).await?;
                    info!(user_id = %user_id, "Signed out");
                }
                *self.active.write() = None;
                Ok(None)
            }
        }
    }

    async fn provision_user(&self, identity: &AuthenticatedIdentity) -> ServiceResult<User> {
        let first = self.ctx.user_dir().list().await?.is_empty();
        let role = if first { UserRole::Admin } else { UserRole::Member };
        let user = User::new(
            self.ctx.generate_id(),
            identity.display_name.clone(),
            identity.email.to_lowercase(),
            role,
        );
        self.ctx.user_dir().create(&user).await?;
        info!(user_id = %user.id, role = %role, "User provisioned from identity");
        Ok(user)
    }

    // === Active conversation ===

    /// The resolved active conversation, if any
    pub fn active_conversation(&self) -> Option<ActiveConversation> {
        self.active.read().clone()
    }

    /// Storage key of the active conversation from the current user's
    /// perspective
    pub fn active_key(&self) -> Option<ConversationKey> {
        let user_id = self.current_user()?;
        self.active.read().as_ref().map(|a| a.key(user_id))
    }

    /// Select a conversation. Selecting an unknown id leaves the previous
    /// selection untouched; no error is raised.
    #[instrument(skip(self))]
    pub async fn set_active(&self, target: ConversationTarget) -> ServiceResult<()> {
        let resolved = match target {
            ConversationTarget::Channel(channel_id) => self
                .ctx
                .channel_dir()
                .find_by_id(channel_id)
                .await?
                .map(ActiveConversation::Channel),
            ConversationTarget::Direct(user_id) => self
                .ctx
                .user_dir()
                .find_by_id(user_id)
                .await?
                .map(ActiveConversation::Direct),
        };

        match resolved {
            Some(conversation) => {
                debug!(name = conversation.display_name(), "Conversation selected");
                *self.active.write() = Some(conversation);
            }
            None => {
                debug!(?target, "Unknown conversation target ignored");
            }
        }
        Ok(())
    }

    /// Re-resolve the active conversation against the directories, picking
    /// up renames and membership edits
    pub async fn refresh_active(&self) -> ServiceResult<()> {
        let target = match self.active.read().as_ref() {
            Some(ActiveConversation::Channel(c)) => Some(ConversationTarget::Channel(c.id)),
            Some(ActiveConversation::Direct(u)) => Some(ConversationTarget::Direct(u.id)),
            None => None,
        };
        if let Some(target) = target {
            self.set_active(target).await?;
        }
        Ok(())
    }

    /// Deterministic default selection: the self-DM when a user is signed
    /// in, else the first channel in creation order, else nothing. Applied
    /// automatically on sign-in when no conversation is active.
    pub async fn select_default(&self) -> ServiceResult<()> {
        let self_dm = match self.current_user() {
            Some(user_id) => self.ctx.user_dir().find_by_id(user_id).await?,
            None => None,
        };

        let selection = match self_dm {
            Some(user) => Some(ActiveConversation::Direct(user)),
            None => self
                .ctx
                .channel_dir()
                .list()
                .await?
                .into_iter()
                .next()
                .map(ActiveConversation::Channel),
        };

        if let Some(conversation) = selection {
            debug!(name = conversation.display_name(), "Default conversation selected");
            *self.active.write() = Some(conversation);
        }
        Ok(())
    }

    // === Conversation convenience surface ===

    /// Send a message into the active conversation as the current user
    pub async fn send_to_active(
        &self,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        let user_id = self.require_current_user()?;
        let key = self
            .active_key()
            .ok_or_else(|| ServiceError::validation("No active conversation"))?;
        self.messages().send_message(key, user_id, request).await
    }

    /// Snapshot of the active conversation's messages for the current user
    pub async fn visible_messages(&self) -> ServiceResult<Vec<MessageResponse>> {
        let user_id = self.require_current_user()?;
        match self.active_key() {
            Some(key) => self.messages().list_messages(key, user_id).await,
            None => Ok(Vec::new()),
        }
    }

    /// Summarize the active conversation
    pub async fn summarize_active(&self) -> ServiceResult<SummaryOutcome> {
        let user_id = self.require_current_user()?;
        let key = self
            .active_key()
            .ok_or_else(|| ServiceError::validation("No active conversation"))?;
        self.summaries().summarize(key, user_id).await
    }

    /// Combined people list: joined users in join order, then outstanding
    /// invitations in issue order
    pub async fn roster(&self) -> ServiceResult<Vec<RosterEntry>> {
        let mut entries: Vec<RosterEntry> = self
            .users()
            .list_users()
            .await?
            .into_iter()
            .map(RosterEntry::Active)
            .collect();
        entries.extend(
            self.invitations()
                .pending()
                .await?
                .into_iter()
                .map(RosterEntry::Invited),
        );
        Ok(entries)
    }

    // === Attendance driver ===

    /// Clock the current user in and start the accrual ticker
    pub async fn clock_in(&self) -> ServiceResult<()> {
        let user_id = self.require_current_user()?;
        self.attendance().clock_in(user_id).await?;
        self.start_ticker(user_id);
        Ok(())
    }

    /// Pause the shift; the ticker stops immediately
    pub async fn start_break(&self) -> ServiceResult<()> {
        let user_id = self.require_current_user()?;
        self.attendance().start_break(user_id).await?;
        self.stop_ticker();
        Ok(())
    }

    /// Resume the shift; the ticker restarts cleanly
    pub async fn end_break(&self) -> ServiceResult<()> {
        let user_id = self.require_current_user()?;
        self.attendance().end_break(user_id).await?;
        self.start_ticker(user_id);
        Ok(())
    }

    /// Finish the shift; the ticker stops and the log entry is persisted
    pub async fn clock_out(&self) -> ServiceResult<AttendanceLogResponse> {
        let user_id = self.require_current_user()?;
        self.stop_ticker();
        self.attendance().clock_out(user_id).await
    }

    fn start_ticker(&self, user_id: Snowflake) {
        let mut ticker = self.ticker.lock();
        if let Some(old) = ticker.take() {
            old.abort();
        }

        let ctx = self.ctx.clone();
        let period = Duration::from_secs(ctx.config().attendance.tick_interval_secs);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick completes immediately; accrual starts one
            // period in
            interval.tick().await;
            loop {
                interval.tick().await;
                AttendanceService::new(&ctx).tick(user_id);
            }
        });
        *ticker = Some(handle);
    }

    fn stop_ticker(&self) {
        if let Some(handle) = self.ticker.lock().take() {
            handle.abort();
        }
    }

    fn require_current_user(&self) -> ServiceResult<Snowflake> {
        self.current_user()
            .ok_or_else(|| ServiceError::validation("No signed-in user"))
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}
