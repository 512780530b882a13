//! Local adapters for the external ports
//!
//! Stand-ins for the real mail transport and language-model service: a
//! recording mailer (with injectable failure, used heavily in tests) and a
//! naive local digest summarizer. Production deployments swap these for
//! real adapters behind the same traits.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use huddle_core::{MailError, MailReceipt, MailTransport, Summarizer, SummarizerError};

/// A mail captured by [`RecordingMailTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
}

/// Mail transport that records every send in memory.
///
/// `fail_next` makes exactly one upcoming send fail, which is how the
/// "issuance survives a failed send" behavior is exercised.
#[derive(Default)]
pub struct RecordingMailTransport {
    sent: Mutex<Vec<SentMail>>,
    fail_next: AtomicBool,
    counter: AtomicU64,
}

impl RecordingMailTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `send` call fail with a transport error
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Snapshot of everything sent so far
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingMailTransport {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<MailReceipt, MailError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            tracing::warn!(recipient, "Mail send failed (injected)");
            return Err(MailError::Unavailable("injected failure".to_string()));
        }

        let id = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        self.sent.lock().push(SentMail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        });
        tracing::info!(recipient, subject, "Mail recorded");
        Ok(MailReceipt {
            message_id: format!("local-{id}"),
        })
    }
}

/// Summarizer producing a deterministic local digest.
///
/// Placeholder for the language-model call: enough to drive the summary
/// surface without a network dependency.
#[derive(Default)]
pub struct LocalDigestSummarizer;

impl LocalDigestSummarizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Summarizer for LocalDigestSummarizer {
    async fn summarize(
        &self,
        conversation_label: &str,
        ordered_texts: &[String],
    ) -> Result<String, SummarizerError> {
        if ordered_texts.is_empty() {
            return Ok(format!("No messages in {conversation_label} yet."));
        }
        let latest = ordered_texts.last().map(String::as_str).unwrap_or_default();
        Ok(format!(
            "{conversation_label}: {} message(s). Latest: {latest}",
            ordered_texts.len()
        ))
    }
}

/// Summarizer that is always unavailable, for exercising the degraded path
#[derive(Default)]
pub struct OfflineSummarizer;

impl OfflineSummarizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Summarizer for OfflineSummarizer {
    async fn summarize(
        &self,
        _conversation_label: &str,
        _ordered_texts: &[String],
    ) -> Result<String, SummarizerError> {
        Err(SummarizerError::Unavailable("offline".to_string()))
    }
}
