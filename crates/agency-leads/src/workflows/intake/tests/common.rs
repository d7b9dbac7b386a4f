use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::{json, Value};
use tokio::sync::Notify;

use crate::config::MailConfigError;
use crate::workflows::intake::copy::StaticCopy;
use crate::workflows::intake::domain::{LeadKind, LeadRequest};
use crate::workflows::intake::messenger::{
    DispatchError, Messenger, OutboundMessage, TransportError,
};
use crate::workflows::intake::orchestrator::{
    LeadSubmitter, SubmissionOrchestrator, SubmissionResult,
};
use crate::workflows::intake::render::{MailRoute, MessageRenderer};

pub(super) const OPERATOR_INBOX: &str = "bookings@agency.example";

pub(super) fn production_payload() -> Value {
    json!({
        "kind": "production_request",
        "contactName": "Ana",
        "contactEmail": "ana@x.com",
        "message": "Need a gala",
    })
}

pub(super) fn booking_payload() -> Value {
    json!({
        "kind": "booking_seek_talent",
        "contactName": "Dana Levi",
        "contactEmail": "dana@events.example",
        "message": "Looking for a singer for a wedding in June",
        "talentCategory": "Singer",
        "locale": "he",
    })
}

pub(super) fn artist_payload() -> Value {
    json!({
        "kind": "artist_seek_representation",
        "contactName": "Jo",
        "contactEmail": "jo@x.com",
        "message": "Hi there",
        "demoLink": "https://example.com/jo",
        "talentCategory": "Singer",
    })
}

pub(super) fn without(mut payload: Value, field: &str) -> Value {
    if let Value::Object(map) = &mut payload {
        map.remove(field);
    }
    payload
}

pub(super) fn with(mut payload: Value, field: &str, value: Value) -> Value {
    if let Value::Object(map) = &mut payload {
        map.insert(field.to_string(), value);
    }
    payload
}

pub(super) fn production_request() -> LeadRequest {
    LeadRequest {
        kind: LeadKind::ProductionRequest,
        contact_name: "Ana".to_string(),
        contact_email: "ana@x.com".to_string(),
        message: "Need a gala".to_string(),
        talent_category: None,
        demo_link: None,
        locale: "en".to_string(),
    }
}

pub(super) fn renderer() -> MessageRenderer {
    MessageRenderer::new(
        Arc::new(StaticCopy),
        MailRoute {
            from: "Agency Bookings <noreply@agency.example>".to_string(),
            operator_inbox: OPERATOR_INBOX.to_string(),
        },
    )
}

/// Messenger double: records every issued send and fails the configured roles.
#[derive(Default)]
pub(super) struct FakeMessenger {
    pub(super) sent: Mutex<Vec<OutboundMessage>>,
    pub(super) fail_operator: bool,
    pub(super) fail_acknowledgement: bool,
    pub(super) misconfigured: bool,
}

impl FakeMessenger {
    pub(super) fn failing(operator: bool, acknowledgement: bool) -> Self {
        Self {
            fail_operator: operator,
            fail_acknowledgement: acknowledgement,
            ..Self::default()
        }
    }

    pub(super) fn misconfigured() -> Self {
        Self {
            misconfigured: true,
            ..Self::default()
        }
    }

    pub(super) fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().expect("messenger mutex poisoned").clone()
    }
}

#[async_trait]
impl Messenger for FakeMessenger {
    fn ensure_ready(&self) -> Result<(), TransportError> {
        if self.misconfigured {
            return Err(TransportError::Misconfigured(MailConfigError::MissingApiKey));
        }
        Ok(())
    }

    async fn send(&self, message: OutboundMessage) -> Result<(), DispatchError> {
        let to_operator = message.to == OPERATOR_INBOX;
        self.sent
            .lock()
            .expect("messenger mutex poisoned")
            .push(message);
        let fail = if to_operator {
            self.fail_operator
        } else {
            self.fail_acknowledgement
        };
        if fail {
            return Err(DispatchError::Rejected {
                status: 503,
                detail: "provider unavailable".to_string(),
            });
        }
        Ok(())
    }
}

pub(super) fn orchestrator(messenger: FakeMessenger) -> (SubmissionOrchestrator<FakeMessenger>, Arc<FakeMessenger>) {
    let messenger = Arc::new(messenger);
    let orchestrator = SubmissionOrchestrator::new(messenger.clone(), renderer());
    (orchestrator, messenger)
}

/// Submitter double for the form controller.
pub(super) struct ScriptedSubmitter {
    result: SubmissionResult,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
    pub(super) received: Mutex<Vec<LeadRequest>>,
}

impl ScriptedSubmitter {
    pub(super) fn returning(result: SubmissionResult) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            gate: None,
            received: Mutex::new(Vec::new()),
        }
    }

    /// Holds every submission until `gate` is notified.
    pub(super) fn gated(result: SubmissionResult, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::returning(result)
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LeadSubmitter for ScriptedSubmitter {
    async fn submit(&self, request: LeadRequest) -> SubmissionResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received
            .lock()
            .expect("submitter mutex poisoned")
            .push(request);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.result.clone()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
