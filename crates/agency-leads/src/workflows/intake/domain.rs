use std::fmt;

use serde::{Deserialize, Serialize};

/// What the visitor is asking for. Selects the conditional rules in `schema`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadKind {
    BookingSeekTalent,
    ArtistSeekRepresentation,
    ProductionRequest,
    MarketingRequest,
    ProductionSederSpecific,
}

impl LeadKind {
    pub const ALL: [LeadKind; 5] = [
        LeadKind::BookingSeekTalent,
        LeadKind::ArtistSeekRepresentation,
        LeadKind::ProductionRequest,
        LeadKind::MarketingRequest,
        LeadKind::ProductionSederSpecific,
    ];

    pub fn token(self) -> &'static str {
        match self {
            LeadKind::BookingSeekTalent => "booking_seek_talent",
            LeadKind::ArtistSeekRepresentation => "artist_seek_representation",
            LeadKind::ProductionRequest => "production_request",
            LeadKind::MarketingRequest => "marketing_request",
            LeadKind::ProductionSederSpecific => "production_seder_specific",
        }
    }

    pub fn from_token(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|kind| kind.token() == raw)
    }
}

impl fmt::Display for LeadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Addressable fields of a lead payload. Serializes as the JSON path used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum LeadField {
    /// The payload as a whole; used for shape errors.
    #[serde(rename = "")]
    Payload,
    #[serde(rename = "kind")]
    Kind,
    #[serde(rename = "contactName")]
    ContactName,
    #[serde(rename = "contactEmail")]
    ContactEmail,
    #[serde(rename = "message")]
    Message,
    #[serde(rename = "talentCategory")]
    TalentCategory,
    #[serde(rename = "demoLink")]
    DemoLink,
    #[serde(rename = "locale")]
    Locale,
}

impl LeadField {
    pub fn path(self) -> &'static str {
        match self {
            LeadField::Payload => "",
            LeadField::Kind => "kind",
            LeadField::ContactName => "contactName",
            LeadField::ContactEmail => "contactEmail",
            LeadField::Message => "message",
            LeadField::TalentCategory => "talentCategory",
            LeadField::DemoLink => "demoLink",
            LeadField::Locale => "locale",
        }
    }
}

/// A lead that passed validation. Only `schema` constructs these from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRequest {
    pub kind: LeadKind,
    pub contact_name: String,
    pub contact_email: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub talent_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_link: Option<String>,
    pub locale: String,
}

/// Live, unvalidated field values as the form holds them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<LeadKind>,
    pub contact_name: String,
    pub contact_email: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub talent_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_link: Option<String>,
    pub locale: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    MalformedPayload,
    InvalidType,
    Required,
    InvalidKind,
    TooShort,
    InvalidEmail,
}

/// One violated rule, addressed to the field that has to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: LeadField,
    pub code: IssueCode,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: LeadField, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path,
            code,
            message: message.into(),
        }
    }
}

/// Every violated rule for one payload, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IssueList(Vec<ValidationIssue>);

impl IssueList {
    pub fn push(&mut self, issue: ValidationIssue) {
        self.0.push(issue);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.0.iter()
    }

    pub fn for_field(&self, field: LeadField) -> impl Iterator<Item = &ValidationIssue> {
        self.0.iter().filter(move |issue| issue.path == field)
    }

    pub fn has_field(&self, field: LeadField) -> bool {
        self.for_field(field).next().is_some()
    }

    /// Distinct offending fields in first-seen order.
    pub fn fields(&self) -> Vec<LeadField> {
        let mut fields = Vec::new();
        for issue in &self.0 {
            if !fields.contains(&issue.path) {
                fields.push(issue.path);
            }
        }
        fields
    }
}

impl IntoIterator for IssueList {
    type Item = ValidationIssue;
    type IntoIter = std::vec::IntoIter<ValidationIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for IssueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .0
            .iter()
            .map(|issue| format!("{}: {}", issue.path.path(), issue.message))
            .collect();
        f.write_str(&rendered.join("; "))
    }
}
