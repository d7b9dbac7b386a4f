use async_trait::async_trait;
use serde::Serialize;

use crate::config::MailConfigError;

/// One outbound e-mail as handed to the messaging collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

/// Which of the two notifications a message is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    Operator,
    Acknowledgement,
}

impl MessageRole {
    pub fn label(self) -> &'static str {
        match self {
            MessageRole::Operator => "operator",
            MessageRole::Acknowledgement => "acknowledgement",
        }
    }
}

/// Failure of a single send. Logged, never shown to the submitter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("provider rejected message (status {status}): {detail}")]
    Rejected { status: u16, detail: String },
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// The transport cannot send anything at all. Fatal to the request.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    Misconfigured(#[from] MailConfigError),
    #[error("mail transport unavailable: {0}")]
    Unavailable(String),
}

/// Outbound messaging collaborator (e.g. an e-mail API). No batching is assumed.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Checked once per request before any message is issued.
    fn ensure_ready(&self) -> Result<(), TransportError>;

    async fn send(&self, message: OutboundMessage) -> Result<(), DispatchError>;
}
