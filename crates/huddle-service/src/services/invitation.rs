//! Invitation service
//!
//! Token issuance, verification, and acceptance. Issuance commits to the
//! registry before the mail attempt: a failed send never rolls back the
//! invitation, the join link is simply handed back for out-of-band use.

use tracing::{info, instrument, warn};
use validator::Validate;

use huddle_core::{
    generate_invite_token, DomainError, PendingInvitation, Snowflake, User, UserRole,
};

use crate::dto::{
    AcceptInviteRequest, InvitationIssuedResponse, InvitationResponse, InviteRequest,
    MailDeliveryStatus, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Invitation service
pub struct InvitationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InvitationService<'a> {
    /// Create a new InvitationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Issue an invitation for an email address.
    ///
    /// Rejects when the email already belongs to a workspace user or has an
    /// unexpired invitation pending. On success the invitation is stored
    /// first, then the mail dispatch is attempted; the delivery outcome is
    /// reported alongside the always-usable join link.
    #[instrument(skip(self, request))]
    pub async fn invite(
        &self,
        inviter_id: Snowflake,
        request: InviteRequest,
    ) -> ServiceResult<InvitationIssuedResponse> {
        request.validate()?;
        let email = request.email.trim().to_lowercase();

        // Inviter must be a known user
        self.ctx
            .user_dir()
            .find_by_id(inviter_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", inviter_id.to_string()))?;

        if self.ctx.user_dir().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }
        if self.ctx.invitation_registry().email_pending(&email).await? {
            return Err(DomainError::InvitationAlreadyPending.into());
        }

        let invitation = PendingInvitation::new(
            email.clone(),
            generate_invite_token(),
            inviter_id,
            self.ctx.config().invitations.ttl_secs,
        );
        self.ctx.invitation_registry().create(&invitation).await?;
        info!(email = %email, "Invitation issued");

        let join_url = invitation.join_url(&self.ctx.config().invitations.join_base_url);
        let delivery = self.dispatch_mail(&invitation, &join_url).await;

        Ok(InvitationIssuedResponse {
            email: invitation.email,
            token: invitation.token,
            join_url,
            expires_at: invitation.expires_at,
            delivery,
        })
    }

    /// Look up an invitation by token. Pure: no side effects beyond the
    /// registry's lazy expiry sweep.
    #[instrument(skip(self, token))]
    pub async fn verify(&self, token: &str) -> ServiceResult<Option<InvitationResponse>> {
        let invitation = self.ctx.invitation_registry().find_by_token(token).await?;
        Ok(invitation.map(|inv| InvitationResponse {
            email: inv.email,
            issued_at: inv.issued_at,
            expires_at: inv.expires_at,
        }))
    }

    /// Accept an invitation: create the user from the invitation email plus
    /// the supplied profile, consuming the token. Both happen or neither.
    #[instrument(skip(self, token, request))]
    pub async fn accept(
        &self,
        token: &str,
        request: AcceptInviteRequest,
    ) -> ServiceResult<UserResponse> {
        request.validate()?;

        // Claim the invitation first; it is restored below if user creation
        // cannot proceed, so no partial state survives either way.
        let invitation = self
            .ctx
            .invitation_registry()
            .consume(token)
            .await?
            .ok_or(DomainError::InvitationNotFound)?;

        if self.ctx.user_dir().email_exists(&invitation.email).await? {
            self.ctx.invitation_registry().create(&invitation).await.ok();
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let mut user = User::new(
            self.ctx.generate_id(),
            request.name,
            invitation.email.clone(),
            UserRole::Member,
        );
        user.designation = request.designation;
        user.phone = request.phone;

        if let Err(err) = self.ctx.user_dir().create(&user).await {
            self.ctx.invitation_registry().create(&invitation).await.ok();
            return Err(err.into());
        }

        info!(email = %invitation.email, user_id = %user.id, "Invitation accepted");
        Ok(UserResponse::from(&user))
    }

    /// Outstanding invitations in issue order
    pub async fn pending(&self) -> ServiceResult<Vec<InvitationResponse>> {
        let pending = self.ctx.invitation_registry().list_pending().await?;
        Ok(pending
            .into_iter()
            .map(|inv| InvitationResponse {
                email: inv.email,
                issued_at: inv.issued_at,
                expires_at: inv.expires_at,
            })
            .collect())
    }

    async fn dispatch_mail(
        &self,
        invitation: &PendingInvitation,
        join_url: &str,
    ) -> MailDeliveryStatus {
        if !self.ctx.config().mail.enabled {
            return MailDeliveryStatus::Skipped;
        }

        let subject = format!("You're invited to {}", self.ctx.config().app.name);
        let body = format!(
            "<p>You have been invited to join {}.</p><p><a href=\"{join_url}\">Accept your invitation</a></p>",
            self.ctx.config().app.name
        );

        match self.ctx.mailer().send(&invitation.email, &subject, &body).await {
            Ok(receipt) => MailDeliveryStatus::Sent {
                message_id: receipt.message_id,
            },
            Err(err) => {
                // Non-fatal: the invitation stands, the link goes out-of-band
                warn!(email = %invitation.email, error = %err, "Invitation mail failed");
                MailDeliveryStatus::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }
}
