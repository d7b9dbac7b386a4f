//! Lead validation rules.
//!
//! The same rule set runs next to the form (on every relevant change) and again at the
//! trust boundary. Base rules always apply; conditional rules come from a table keyed by
//! [`LeadKind`] and only run once the kind itself is known.

use email_address::EmailAddress;
use serde_json::{Map, Value};

use super::domain::{
    IssueCode, IssueList, LeadDraft, LeadField, LeadKind, LeadRequest, ValidationIssue,
};

pub const DEFAULT_LOCALE: &str = "en";

const CONTACT_NAME_MIN_CHARS: usize = 2;
const MESSAGE_MIN_CHARS: usize = 4;
const DEMO_LINK_MIN_CHARS: usize = 5;

/// A field the chosen kind makes mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Non-blank after trimming.
    Present(LeadField),
    MinChars(LeadField, usize),
}

impl Requirement {
    pub fn field(self) -> LeadField {
        match self {
            Requirement::Present(field) | Requirement::MinChars(field, _) => field,
        }
    }
}

const KIND_RULES: &[(LeadKind, &[Requirement])] = &[
    (
        LeadKind::BookingSeekTalent,
        &[Requirement::Present(LeadField::TalentCategory)],
    ),
    (
        LeadKind::ArtistSeekRepresentation,
        &[
            Requirement::MinChars(LeadField::DemoLink, DEMO_LINK_MIN_CHARS),
            Requirement::Present(LeadField::TalentCategory),
        ],
    ),
    (LeadKind::ProductionRequest, &[]),
    (LeadKind::MarketingRequest, &[]),
    (LeadKind::ProductionSederSpecific, &[]),
];

/// Conditional requirements for `kind`, in the order their issues are reported.
pub fn requirements(kind: LeadKind) -> &'static [Requirement] {
    KIND_RULES
        .iter()
        .find(|(candidate, _)| *candidate == kind)
        .map(|(_, rules)| *rules)
        .unwrap_or(&[])
}

/// Whether `field` is one of the conditional sub-fields governed by `kind`.
pub fn governs(kind: LeadKind, field: LeadField) -> bool {
    requirements(kind)
        .iter()
        .any(|requirement| requirement.field() == field)
}

/// Validate an untrusted JSON payload.
pub fn validate(payload: &Value) -> Result<LeadRequest, IssueList> {
    match payload {
        Value::Object(map) => evaluate(RawLead::from_map(map)),
        _ => {
            let mut issues = IssueList::default();
            issues.push(ValidationIssue::new(
                LeadField::Payload,
                IssueCode::MalformedPayload,
                "Request body must be a JSON object",
            ));
            Err(issues)
        }
    }
}

/// Validate the live form values with the rules used at the trust boundary.
pub fn validate_draft(draft: &LeadDraft) -> Result<LeadRequest, IssueList> {
    evaluate(RawLead::from_draft(draft))
}

/// Run the rules again over an already typed request, e.g. one built on the other side of
/// the trust boundary.
pub fn revalidate(request: &LeadRequest) -> Result<LeadRequest, IssueList> {
    evaluate(RawLead::from_request(request))
}

#[derive(Debug, Clone, Copy)]
enum RawField<'a> {
    Missing,
    Text(&'a str),
    WrongType,
}

impl<'a> RawField<'a> {
    fn from_value(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => RawField::Missing,
            Some(Value::String(text)) => RawField::Text(text),
            Some(_) => RawField::WrongType,
        }
    }

    fn from_option(value: Option<&'a str>) -> Self {
        value.map_or(RawField::Missing, RawField::Text)
    }

    fn text(self) -> Option<&'a str> {
        match self {
            RawField::Text(text) => Some(text),
            _ => None,
        }
    }
}

struct RawLead<'a> {
    kind: RawField<'a>,
    contact_name: RawField<'a>,
    contact_email: RawField<'a>,
    message: RawField<'a>,
    talent_category: RawField<'a>,
    demo_link: RawField<'a>,
    locale: RawField<'a>,
}

impl<'a> RawLead<'a> {
    fn from_map(map: &'a Map<String, Value>) -> Self {
        let field = |field: LeadField| RawField::from_value(map.get(field.path()));
        Self {
            kind: field(LeadField::Kind),
            contact_name: field(LeadField::ContactName),
            contact_email: field(LeadField::ContactEmail),
            message: field(LeadField::Message),
            talent_category: field(LeadField::TalentCategory),
            demo_link: field(LeadField::DemoLink),
            locale: field(LeadField::Locale),
        }
    }

    fn from_draft(draft: &'a LeadDraft) -> Self {
        Self {
            kind: RawField::from_option(draft.kind.map(LeadKind::token)),
            contact_name: RawField::Text(&draft.contact_name),
            contact_email: RawField::Text(&draft.contact_email),
            message: RawField::Text(&draft.message),
            talent_category: RawField::from_option(draft.talent_category.as_deref()),
            demo_link: RawField::from_option(draft.demo_link.as_deref()),
            locale: RawField::Text(&draft.locale),
        }
    }

    fn from_request(request: &'a LeadRequest) -> Self {
        Self {
            kind: RawField::Text(request.kind.token()),
            contact_name: RawField::Text(&request.contact_name),
            contact_email: RawField::Text(&request.contact_email),
            message: RawField::Text(&request.message),
            talent_category: RawField::from_option(request.talent_category.as_deref()),
            demo_link: RawField::from_option(request.demo_link.as_deref()),
            locale: RawField::Text(&request.locale),
        }
    }

    fn get(&self, field: LeadField) -> RawField<'a> {
        match field {
            LeadField::Payload => RawField::Missing,
            LeadField::Kind => self.kind,
            LeadField::ContactName => self.contact_name,
            LeadField::ContactEmail => self.contact_email,
            LeadField::Message => self.message,
            LeadField::TalentCategory => self.talent_category,
            LeadField::DemoLink => self.demo_link,
            LeadField::Locale => self.locale,
        }
    }
}

fn evaluate(raw: RawLead<'_>) -> Result<LeadRequest, IssueList> {
    let mut issues = IssueList::default();

    let kind = check_kind(raw.kind, &mut issues);
    check_min_chars(
        LeadField::ContactName,
        raw.contact_name,
        CONTACT_NAME_MIN_CHARS,
        &mut issues,
    );
    check_email(raw.contact_email, &mut issues);
    check_min_chars(LeadField::Message, raw.message, MESSAGE_MIN_CHARS, &mut issues);

    for optional in [LeadField::TalentCategory, LeadField::DemoLink, LeadField::Locale] {
        if matches!(raw.get(optional), RawField::WrongType) {
            issues.push(type_issue(optional));
        }
    }

    if let Some(kind) = kind {
        for requirement in requirements(kind) {
            check_requirement(*requirement, raw.get(requirement.field()), &mut issues);
        }
    }

    match kind {
        Some(kind) if issues.is_empty() => Ok(LeadRequest {
            kind,
            contact_name: raw.contact_name.text().unwrap_or_default().to_string(),
            contact_email: raw.contact_email.text().unwrap_or_default().to_string(),
            message: raw.message.text().unwrap_or_default().to_string(),
            talent_category: non_blank(raw.talent_category),
            demo_link: non_blank(raw.demo_link),
            locale: non_blank(raw.locale).unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
        }),
        _ => Err(issues),
    }
}

fn check_kind(raw: RawField<'_>, issues: &mut IssueList) -> Option<LeadKind> {
    match raw {
        RawField::Text(token) => {
            let kind = LeadKind::from_token(token);
            if kind.is_none() {
                issues.push(ValidationIssue::new(
                    LeadField::Kind,
                    IssueCode::InvalidKind,
                    "Choose what you are contacting us about",
                ));
            }
            kind
        }
        RawField::Missing => {
            issues.push(ValidationIssue::new(
                LeadField::Kind,
                IssueCode::Required,
                "Choose what you are contacting us about",
            ));
            None
        }
        RawField::WrongType => {
            issues.push(type_issue(LeadField::Kind));
            None
        }
    }
}

fn check_min_chars(field: LeadField, raw: RawField<'_>, min: usize, issues: &mut IssueList) {
    match raw {
        RawField::WrongType => issues.push(type_issue(field)),
        // Blank text never satisfies a length rule, however many spaces it holds.
        RawField::Text(text) if !text.trim().is_empty() => {
            if text.chars().count() < min {
                issues.push(ValidationIssue::new(
                    field,
                    IssueCode::TooShort,
                    format!("{} must be at least {min} characters", label(field)),
                ));
            }
        }
        _ => issues.push(ValidationIssue::new(
            field,
            IssueCode::Required,
            format!("{} is required", label(field)),
        )),
    }
}

fn check_email(raw: RawField<'_>, issues: &mut IssueList) {
    match raw {
        RawField::Text(text) if EmailAddress::is_valid(text) => {}
        RawField::WrongType => issues.push(type_issue(LeadField::ContactEmail)),
        _ => issues.push(ValidationIssue::new(
            LeadField::ContactEmail,
            IssueCode::InvalidEmail,
            "Enter a valid e-mail address",
        )),
    }
}

fn check_requirement(requirement: Requirement, raw: RawField<'_>, issues: &mut IssueList) {
    let field = requirement.field();
    match (requirement, raw) {
        // Wrong types were already reported with the optional fields.
        (_, RawField::WrongType) => {}
        (Requirement::Present(_), RawField::Text(text)) if !text.trim().is_empty() => {}
        (Requirement::Present(_), _) => issues.push(ValidationIssue::new(
            field,
            IssueCode::Required,
            format!("{} is required for this request", label(field)),
        )),
        (Requirement::MinChars(_, min), raw) => check_min_chars(field, raw, min, issues),
    }
}

fn type_issue(field: LeadField) -> ValidationIssue {
    ValidationIssue::new(
        field,
        IssueCode::InvalidType,
        format!("{} must be text", label(field)),
    )
}

fn non_blank(raw: RawField<'_>) -> Option<String> {
    raw.text()
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}

fn label(field: LeadField) -> &'static str {
    match field {
        LeadField::Payload => "Request",
        LeadField::Kind => "Request type",
        LeadField::ContactName => "Name",
        LeadField::ContactEmail => "E-mail",
        LeadField::Message => "Message",
        LeadField::TalentCategory => "Talent category",
        LeadField::DemoLink => "Demo link",
        LeadField::Locale => "Locale",
    }
}
