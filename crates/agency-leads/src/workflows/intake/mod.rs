//! Lead intake: role-dependent validation, the form controller, and the submission
//! orchestrator that notifies the team and acknowledges the visitor.

pub mod copy;
pub mod domain;
pub mod form;
pub mod messenger;
pub mod orchestrator;
pub mod render;
pub mod resend;
pub mod router;
pub mod schema;

#[cfg(test)]
mod tests;

pub use copy::{AcknowledgementCopy, CopyProvider, StaticCopy, TextDirection};
pub use domain::{
    IssueCode, IssueList, LeadDraft, LeadField, LeadKind, LeadRequest, ValidationIssue,
};
pub use form::{CommitOutcome, FormStatus, LeadFormController};
pub use messenger::{DispatchError, MessageRole, Messenger, OutboundMessage, TransportError};
pub use orchestrator::{
    DeliveryStatus, LeadSubmitter, NotificationDispatch, Rejection, SubmissionOrchestrator,
    SubmissionResult,
};
pub use render::{MailRoute, MessageRenderer, RenderedMessages};
pub use resend::ResendMessenger;
pub use router::lead_router;
pub use schema::{validate, validate_draft};
