//! Resend e-mail API adapter for the [`Messenger`] port.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Serialize;

use super::messenger::{DispatchError, Messenger, OutboundMessage, TransportError};
use crate::config::{MailConfig, MailConfigError};

#[derive(Debug, Serialize)]
struct ResendEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

impl<'a> From<&'a OutboundMessage> for ResendEmail<'a> {
    fn from(message: &'a OutboundMessage) -> Self {
        Self {
            from: &message.from,
            to: [&message.to],
            subject: &message.subject,
            html: &message.html_body,
            reply_to: message.reply_to.as_deref(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResendMessenger {
    http_client: reqwest::Client,
    config: MailConfig,
}

impl ResendMessenger {
    pub fn new(config: MailConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(http_client: reqwest::Client, config: MailConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/emails", self.config.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl Messenger for ResendMessenger {
    fn ensure_ready(&self) -> Result<(), TransportError> {
        self.config.validate()?;
        reqwest::Url::parse(&self.endpoint())
            .map_err(|err| TransportError::Unavailable(format!("invalid RESEND_API_BASE: {err}")))?;
        Ok(())
    }

    async fn send(&self, message: OutboundMessage) -> Result<(), DispatchError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| DispatchError::Delivery(MailConfigError::MissingApiKey.to_string()))?;

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(api_key.expose_secret())
            .json(&ResendEmail::from(&message))
            .send()
            .await
            .map_err(|err| DispatchError::Delivery(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = response.text().await.unwrap_or_default();
            return Err(DispatchError::Rejected { status, detail });
        }

        Ok(())
    }
}
