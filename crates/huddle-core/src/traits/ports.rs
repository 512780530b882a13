//! External service ports - mail, summarization, identity
//!
//! Narrow contracts for the out-of-process collaborators. Failures here are
//! never fatal to the engine: callers degrade and report, local state stays
//! intact.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Receipt for an accepted outbound mail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailReceipt {
    /// Transport-assigned message id
    pub message_id: String,
}

/// Mail transport failure
#[derive(Debug, Clone, thiserror::Error)]
pub enum MailError {
    #[error("Mail transport unavailable: {0}")]
    Unavailable(String),

    #[error("Recipient rejected: {0}")]
    Rejected(String),
}

/// Outbound mail transport
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send one HTML mail. A failure is reported, never thrown through the
    /// calling service.
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<MailReceipt, MailError>;
}

/// Summarization failure
#[derive(Debug, Clone, thiserror::Error)]
pub enum SummarizerError {
    #[error("Summarizer unavailable: {0}")]
    Unavailable(String),
}

/// Language-model conversation summarization
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize an ordered list of message texts. Errors degrade to
    /// "summary unavailable" at the service layer.
    async fn summarize(
        &self,
        conversation_label: &str,
        ordered_texts: &[String],
    ) -> Result<String, SummarizerError>;
}

/// Identity handed over by the external identity provider on sign-in.
///
/// The engine only ever consumes "current authenticated identity changed"
/// notifications carrying this payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedIdentity {
    /// Provider-scoped stable subject
    pub subject: String,
    pub email: String,
    pub display_name: String,
}

impl AuthenticatedIdentity {
    pub fn new(
        subject: impl Into<String>,
        email: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            email: email.into(),
            display_name: display_name.into(),
        }
    }
}
