use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::domain::{IssueCode, IssueList, LeadField, ValidationIssue};
use super::messenger::Messenger;
use super::orchestrator::{Rejection, SubmissionOrchestrator, SubmissionResult};

/// Explicit locale tag accepted next to the body.
#[derive(Debug, Default, Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

/// Router exposing the lead trust boundary.
pub fn lead_router<M>(orchestrator: Arc<SubmissionOrchestrator<M>>) -> Router
where
    M: Messenger + 'static,
{
    Router::new()
        .route("/api/v1/leads", post(submit_handler::<M>))
        .with_state(orchestrator)
}

pub(crate) async fn submit_handler<M>(
    State(orchestrator): State<Arc<SubmissionOrchestrator<M>>>,
    query: Result<Query<LocaleQuery>, QueryRejection>,
    body: Bytes,
) -> Response
where
    M: Messenger + 'static,
{
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            info!(error = %rejection, "lead rejected: unreadable query string");
            let mut issues = IssueList::default();
            issues.push(ValidationIssue::new(
                LeadField::Payload,
                IssueCode::MalformedPayload,
                "Query string could not be read",
            ));
            let result = SubmissionResult::Rejected(Rejection::Invalid(issues));
            return (StatusCode::BAD_REQUEST, Json(result)).into_response();
        }
    };

    // Unparseable bodies fall through to the schema's shape check.
    let mut payload = serde_json::from_slice::<Value>(&body).unwrap_or(Value::Null);
    if let (Some(locale), Value::Object(map)) = (query.locale, &mut payload) {
        map.insert(LeadField::Locale.path().to_string(), Value::String(locale));
    }

    let result = orchestrator.submit_payload(&payload).await;
    let status = match &result {
        SubmissionResult::Accepted => StatusCode::ACCEPTED,
        SubmissionResult::Rejected(Rejection::Invalid(issues))
            if issues.has_field(LeadField::Payload) =>
        {
            StatusCode::BAD_REQUEST
        }
        SubmissionResult::Rejected(Rejection::Invalid(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmissionResult::Rejected(Rejection::Internal) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(result)).into_response()
}
