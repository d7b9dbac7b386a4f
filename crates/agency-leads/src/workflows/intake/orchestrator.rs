use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{error, info, warn};

use super::domain::{IssueList, LeadRequest};
use super::messenger::{DispatchError, MessageRole, Messenger, OutboundMessage, TransportError};
use super::render::MessageRenderer;
use super::schema;

/// Why a submission was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The payload broke one or more rules; every issue is addressed to a field.
    Invalid(IssueList),
    /// The messaging transport could not be used at all. Carries no field attribution.
    Internal,
}

/// User-facing result of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Accepted,
    Rejected(Rejection),
}

impl SubmissionResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionResult::Accepted)
    }

    pub fn issues(&self) -> Option<&IssueList> {
        match self {
            SubmissionResult::Rejected(Rejection::Invalid(issues)) => Some(issues),
            _ => None,
        }
    }
}

impl Serialize for SubmissionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SubmissionResult::Accepted => {
                let mut body = serializer.serialize_struct("SubmissionResult", 1)?;
                body.serialize_field("accepted", &true)?;
                body.end()
            }
            SubmissionResult::Rejected(Rejection::Invalid(issues)) => {
                let mut body = serializer.serialize_struct("SubmissionResult", 3)?;
                body.serialize_field("accepted", &false)?;
                body.serialize_field("reason", "invalid")?;
                body.serialize_field("issues", issues)?;
                body.end()
            }
            SubmissionResult::Rejected(Rejection::Internal) => {
                let mut body = serializer.serialize_struct("SubmissionResult", 2)?;
                body.serialize_field("accepted", &false)?;
                body.serialize_field("reason", "internal")?;
                body.end()
            }
        }
    }
}

/// Result of one send attempt, kept per message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    Failed(DispatchError),
}

impl DeliveryStatus {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryStatus::Delivered)
    }
}

/// Both notifications for one accepted lead and how each send went. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDispatch {
    pub operator_message: OutboundMessage,
    pub acknowledgement_message: OutboundMessage,
    pub operator_outcome: DeliveryStatus,
    pub acknowledgement_outcome: DeliveryStatus,
}

/// Anything the form can hand a validated lead to.
#[async_trait]
pub trait LeadSubmitter: Send + Sync {
    async fn submit(&self, request: LeadRequest) -> SubmissionResult;
}

/// Validates at the trust boundary and fans an accepted lead out to two notifications.
pub struct SubmissionOrchestrator<M> {
    messenger: Arc<M>,
    renderer: MessageRenderer,
}

impl<M> SubmissionOrchestrator<M>
where
    M: Messenger + 'static,
{
    pub fn new(messenger: Arc<M>, renderer: MessageRenderer) -> Self {
        Self {
            messenger,
            renderer,
        }
    }

    /// Entry point for untrusted JSON arriving from outside the process.
    pub async fn submit_payload(&self, payload: &Value) -> SubmissionResult {
        match schema::validate(payload) {
            Ok(request) => self.accept(request).await,
            Err(issues) => reject_invalid(issues),
        }
    }

    /// Re-check a typed request with the boundary rules, then dispatch.
    pub async fn submit_request(&self, request: &LeadRequest) -> SubmissionResult {
        match schema::revalidate(request) {
            Ok(request) => self.accept(request).await,
            Err(issues) => reject_invalid(issues),
        }
    }

    /// Issue both notifications concurrently and wait for both to settle.
    ///
    /// Only a transport that cannot send at all is an error; individual send failures are
    /// recorded in the returned outcome and logged.
    pub async fn dispatch(
        &self,
        request: &LeadRequest,
    ) -> Result<NotificationDispatch, TransportError> {
        self.messenger.ensure_ready()?;

        let rendered = self.renderer.render(request, Utc::now());
        let (operator_result, acknowledgement_result) = tokio::join!(
            self.messenger.send(rendered.operator.clone()),
            self.messenger.send(rendered.acknowledgement.clone()),
        );

        Ok(NotificationDispatch {
            operator_message: rendered.operator,
            acknowledgement_message: rendered.acknowledgement,
            operator_outcome: settle(MessageRole::Operator, request, operator_result),
            acknowledgement_outcome: settle(
                MessageRole::Acknowledgement,
                request,
                acknowledgement_result,
            ),
        })
    }

    async fn accept(&self, request: LeadRequest) -> SubmissionResult {
        match self.dispatch(&request).await {
            Ok(dispatch) => {
                info!(
                    kind = %request.kind,
                    locale = %request.locale,
                    operator_delivered = dispatch.operator_outcome.is_delivered(),
                    acknowledgement_delivered = dispatch.acknowledgement_outcome.is_delivered(),
                    "lead accepted"
                );
                SubmissionResult::Accepted
            }
            Err(err) => {
                error!(kind = %request.kind, error = %err, "lead notifications could not be issued");
                SubmissionResult::Rejected(Rejection::Internal)
            }
        }
    }
}

#[async_trait]
impl<M> LeadSubmitter for SubmissionOrchestrator<M>
where
    M: Messenger + 'static,
{
    async fn submit(&self, request: LeadRequest) -> SubmissionResult {
        self.submit_request(&request).await
    }
}

fn reject_invalid(issues: IssueList) -> SubmissionResult {
    let fields: Vec<&str> = issues.fields().into_iter().map(|field| field.path()).collect();
    info!(issue_count = issues.len(), ?fields, "lead rejected by validation");
    SubmissionResult::Rejected(Rejection::Invalid(issues))
}

fn settle(
    role: MessageRole,
    request: &LeadRequest,
    result: Result<(), DispatchError>,
) -> DeliveryStatus {
    match result {
        Ok(()) => DeliveryStatus::Delivered,
        Err(err) => {
            warn!(
                role = role.label(),
                kind = %request.kind,
                error = %err,
                "lead notification failed; not retried"
            );
            DeliveryStatus::Failed(err)
        }
    }
}
