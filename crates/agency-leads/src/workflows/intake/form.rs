//! Form-side controller for the lead intake flow.
//!
//! Holds the live values, re-runs the schema on every change, and decides which of the
//! conditional sub-fields (talent category, demo link) the current kind exposes.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use super::copy::CopyProvider;
use super::domain::{IssueList, LeadDraft, LeadField, LeadKind, ValidationIssue};
use super::orchestrator::{LeadSubmitter, Rejection, SubmissionResult};
use super::schema::{self, DEFAULT_LOCALE};
use crate::workflows::selection::LocationSlot;

const BASE_FIELDS: [LeadField; 4] = [
    LeadField::Kind,
    LeadField::ContactName,
    LeadField::ContactEmail,
    LeadField::Message,
];

const CONDITIONAL_FIELDS: [LeadField; 2] = [LeadField::TalentCategory, LeadField::DemoLink];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Editing,
    Submitting,
    Submitted,
}

/// What happened when the visitor pressed submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Submitted,
    /// Local validation failed; nothing was sent.
    Invalid(IssueList),
    /// The trust boundary or transport turned the lead down.
    Rejected(Rejection),
    /// A submission from this form is already in flight.
    Busy,
}

/// Holds the form in `Submitting` while a submission is awaited. Dropping it, including
/// when the commit future itself is dropped mid-flight, returns the form to `Editing`.
struct InFlight<'a> {
    status: &'a mut FormStatus,
}

impl<'a> InFlight<'a> {
    fn begin(status: &'a mut FormStatus) -> Self {
        *status = FormStatus::Submitting;
        Self { status }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.status = FormStatus::Editing;
    }
}

pub struct LeadFormController<S> {
    submitter: Arc<S>,
    draft: LeadDraft,
    issues: IssueList,
    touched: BTreeSet<LeadField>,
    reveal_all: bool,
    status: FormStatus,
    failure: Option<Rejection>,
}

impl<S> LeadFormController<S>
where
    S: LeadSubmitter + 'static,
{
    pub fn new(submitter: Arc<S>, locale: impl Into<String>) -> Self {
        let draft = LeadDraft {
            locale: locale.into(),
            ..LeadDraft::default()
        };
        let mut controller = Self {
            submitter,
            draft,
            issues: IssueList::default(),
            touched: BTreeSet::new(),
            reveal_all: false,
            status: FormStatus::Editing,
            failure: None,
        };
        controller.revalidate();
        controller
    }

    /// Preselect the kind from a shareable location value; unknown tokens leave it unset.
    pub fn from_location(
        submitter: Arc<S>,
        locale: impl Into<String>,
        slot: &dyn LocationSlot,
    ) -> Self {
        let mut controller = Self::new(submitter, locale);
        if let Some(kind) = slot.read().as_deref().and_then(LeadKind::from_token) {
            controller.set_kind(Some(kind));
            controller.touched.remove(&LeadField::Kind);
        }
        controller
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn kind(&self) -> Option<LeadKind> {
        self.draft.kind
    }

    pub fn draft(&self) -> &LeadDraft {
        &self.draft
    }

    /// Full issue list for the current values, whether or not it is shown yet.
    pub fn issues(&self) -> &IssueList {
        &self.issues
    }

    /// Form-level failure from the last commit that is not tied to a field.
    pub fn failure(&self) -> Option<&Rejection> {
        self.failure.as_ref()
    }

    pub fn can_commit(&self) -> bool {
        self.status != FormStatus::Submitting
    }

    /// Fields currently rendered: the base set plus whatever the kind governs.
    pub fn visible_fields(&self) -> Vec<LeadField> {
        let mut fields = BASE_FIELDS.to_vec();
        if let Some(kind) = self.draft.kind {
            fields.extend(
                CONDITIONAL_FIELDS
                    .into_iter()
                    .filter(|field| schema::governs(kind, *field)),
            );
        }
        fields
    }

    pub fn is_visible(&self, field: LeadField) -> bool {
        self.visible_fields().contains(&field)
    }

    /// Issues to display next to `field`: only once it was touched or a commit was tried.
    pub fn field_issues(&self, field: LeadField) -> Vec<&ValidationIssue> {
        if !self.reveal_all && !self.touched.contains(&field) {
            return Vec::new();
        }
        self.issues.for_field(field).collect()
    }

    /// Displayed issues for `field` in the form's locale.
    pub fn field_messages(&self, field: LeadField, copy: &dyn CopyProvider) -> Vec<String> {
        self.field_issues(field)
            .into_iter()
            .map(|issue| copy.issue_message(&self.draft.locale, issue))
            .collect()
    }

    pub fn set_kind(&mut self, kind: Option<LeadKind>) {
        if self.draft.kind == kind {
            return;
        }
        self.draft.kind = kind;
        self.touched.insert(LeadField::Kind);
        self.after_edit();
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.draft.locale = locale.into();
    }

    pub fn set_field(&mut self, field: LeadField, value: impl Into<String>) {
        let value = value.into();
        match field {
            LeadField::ContactName => self.draft.contact_name = value,
            LeadField::ContactEmail => self.draft.contact_email = value,
            LeadField::Message => self.draft.message = value,
            LeadField::TalentCategory => self.draft.talent_category = Some(value),
            LeadField::DemoLink => self.draft.demo_link = Some(value),
            LeadField::Kind => {
                self.set_kind(LeadKind::from_token(&value));
                return;
            }
            LeadField::Locale => {
                self.set_locale(value);
                return;
            }
            LeadField::Payload => return,
        }
        self.after_edit();
    }

    /// Mark a field as visited so its issues start showing.
    pub fn blur(&mut self, field: LeadField) {
        self.touched.insert(field);
    }

    pub async fn commit(&mut self) -> CommitOutcome {
        if !self.can_commit() {
            return CommitOutcome::Busy;
        }

        self.reveal_all = true;
        self.failure = None;
        let request = match schema::validate_draft(&self.committed_draft()) {
            Ok(request) => request,
            Err(issues) => {
                self.issues = issues.clone();
                return CommitOutcome::Invalid(issues);
            }
        };

        let flight = InFlight::begin(&mut self.status);
        let result = self.submitter.submit(request).await;
        drop(flight);

        match result {
            SubmissionResult::Accepted => {
                self.clear();
                self.status = FormStatus::Submitted;
                CommitOutcome::Submitted
            }
            SubmissionResult::Rejected(rejection) => {
                match &rejection {
                    Rejection::Invalid(issues) => self.issues = issues.clone(),
                    Rejection::Internal => self.failure = Some(rejection.clone()),
                }
                CommitOutcome::Rejected(rejection)
            }
        }
    }

    /// Start a new lead after a successful submission.
    pub fn reset(&mut self) {
        self.clear();
        self.status = FormStatus::Editing;
    }

    fn after_edit(&mut self) {
        if self.status == FormStatus::Submitted {
            self.status = FormStatus::Editing;
        }
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.issues = match schema::validate_draft(&self.committed_draft()) {
            Ok(_) => IssueList::default(),
            Err(issues) => issues,
        };
        debug!(
            kind = ?self.draft.kind,
            issue_count = self.issues.len(),
            "lead form revalidated"
        );
    }

    /// Values as they will be submitted. Sub-fields the kind does not govern stay in the
    /// form but are left out of the payload.
    fn committed_draft(&self) -> LeadDraft {
        let mut draft = self.draft.clone();
        let governed = |field| {
            draft
                .kind
                .map(|kind| schema::governs(kind, field))
                .unwrap_or(false)
        };
        let keep_talent = governed(LeadField::TalentCategory);
        let keep_demo = governed(LeadField::DemoLink);
        if !keep_talent {
            draft.talent_category = None;
        }
        if !keep_demo {
            draft.demo_link = None;
        }
        if draft.locale.trim().is_empty() {
            draft.locale = DEFAULT_LOCALE.to_string();
        }
        draft
    }

    fn clear(&mut self) {
        self.draft = LeadDraft {
            locale: std::mem::take(&mut self.draft.locale),
            ..LeadDraft::default()
        };
        self.touched.clear();
        self.reveal_all = false;
        self.failure = None;
        self.revalidate();
    }
}
