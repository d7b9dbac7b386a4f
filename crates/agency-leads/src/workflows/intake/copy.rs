//! Human-readable strings for the intake flow.
//!
//! Logic never branches on anything returned from here; copy is looked up by locale and
//! lead kind only.

use super::domain::{IssueCode, LeadField, LeadKind, ValidationIssue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn html_attr(self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

/// Resolved acknowledgement strings for one `(locale, kind)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcknowledgementCopy {
    pub subject: String,
    pub body: String,
    pub signature: String,
    pub direction: TextDirection,
}

/// Localized copy provider consumed by rendering and by form feedback.
pub trait CopyProvider: Send + Sync {
    fn acknowledgement(&self, locale: &str, kind: LeadKind) -> AcknowledgementCopy;
    fn kind_label(&self, locale: &str, kind: LeadKind) -> String;
    fn field_label(&self, locale: &str, field: LeadField) -> String;
    fn issue_message(&self, locale: &str, issue: &ValidationIssue) -> String;
}

struct Catalogue {
    direction: TextDirection,
    ack_subject: &'static str,
    signature: &'static str,
    ack_booking: &'static str,
    ack_representation: &'static str,
    ack_production: &'static str,
    ack_marketing: &'static str,
    ack_seder: &'static str,
    kind_booking: &'static str,
    kind_representation: &'static str,
    kind_production: &'static str,
    kind_marketing: &'static str,
    kind_seder: &'static str,
    field_kind: &'static str,
    field_name: &'static str,
    field_email: &'static str,
    field_message: &'static str,
    field_talent: &'static str,
    field_demo: &'static str,
    field_locale: &'static str,
    issue_required: &'static str,
    issue_too_short: &'static str,
    issue_email: &'static str,
    issue_kind: &'static str,
    issue_type: &'static str,
    issue_malformed: &'static str,
}

const ENGLISH: Catalogue = Catalogue {
    direction: TextDirection::Ltr,
    ack_subject: "We received your request",
    signature: "The Agency team",
    ack_booking: "Thanks for reaching out about booking talent. Our bookings team will get back to you with availability shortly.",
    ack_representation: "Thanks for sending us your work. We review every submission and will contact you if there is a fit.",
    ack_production: "Thanks for telling us about your event. A producer will contact you to talk through the details.",
    ack_marketing: "Thanks for your interest in our marketing services. We will be in touch soon.",
    ack_seder: "Thanks for your interest in a produced Seder night. Our team will contact you with options and dates.",
    kind_booking: "Booking an artist",
    kind_representation: "Artist representation",
    kind_production: "Event production",
    kind_marketing: "Marketing services",
    kind_seder: "Seder night production",
    field_kind: "Request type",
    field_name: "Name",
    field_email: "E-mail",
    field_message: "Message",
    field_talent: "Talent category",
    field_demo: "Demo link",
    field_locale: "Language",
    issue_required: "This field is required",
    issue_too_short: "This value is too short",
    issue_email: "Enter a valid e-mail address",
    issue_kind: "Choose what you are contacting us about",
    issue_type: "This value is not valid",
    issue_malformed: "The request could not be read",
};

const HEBREW: Catalogue = Catalogue {
    direction: TextDirection::Rtl,
    ack_subject: "קיבלנו את פנייתך",
    signature: "צוות הסוכנות",
    ack_booking: "תודה על פנייתך בנושא הזמנת אמן. צוות ההזמנות שלנו יחזור אליך בהקדם עם פרטי זמינות.",
    ack_representation: "תודה ששלחת לנו את החומרים שלך. אנו בוחנים כל פנייה וניצור קשר אם תהיה התאמה.",
    ack_production: "תודה שסיפרת לנו על האירוע שלך. מפיק מטעמנו ייצור איתך קשר כדי לעבור על הפרטים.",
    ack_marketing: "תודה על התעניינותך בשירותי השיווק שלנו. נחזור אליך בקרוב.",
    ack_seder: "תודה על התעניינותך בהפקת ליל סדר. הצוות שלנו ייצור איתך קשר עם אפשרויות ותאריכים.",
    kind_booking: "הזמנת אמן",
    kind_representation: "ייצוג אמנים",
    kind_production: "הפקת אירוע",
    kind_marketing: "שירותי שיווק",
    kind_seder: "הפקת ליל סדר",
    field_kind: "סוג הפנייה",
    field_name: "שם",
    field_email: "אימייל",
    field_message: "הודעה",
    field_talent: "קטגוריית אמן",
    field_demo: "קישור לדמו",
    field_locale: "שפה",
    issue_required: "שדה חובה",
    issue_too_short: "הערך קצר מדי",
    issue_email: "כתובת אימייל לא תקינה",
    issue_kind: "יש לבחור את סוג הפנייה",
    issue_type: "ערך לא תקין",
    issue_malformed: "לא ניתן לקרוא את הבקשה",
};

/// Built-in English/Hebrew catalogue. Unknown locales fall back to English.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCopy;

impl StaticCopy {
    fn catalogue(locale: &str) -> &'static Catalogue {
        let primary = locale
            .split(|c: char| c == '-' || c == '_')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "he" | "iw" => &HEBREW,
            _ => &ENGLISH,
        }
    }
}

impl CopyProvider for StaticCopy {
    fn acknowledgement(&self, locale: &str, kind: LeadKind) -> AcknowledgementCopy {
        let catalogue = Self::catalogue(locale);
        let body = match kind {
            LeadKind::BookingSeekTalent => catalogue.ack_booking,
            LeadKind::ArtistSeekRepresentation => catalogue.ack_representation,
            LeadKind::ProductionRequest => catalogue.ack_production,
            LeadKind::MarketingRequest => catalogue.ack_marketing,
            LeadKind::ProductionSederSpecific => catalogue.ack_seder,
        };
        AcknowledgementCopy {
            subject: catalogue.ack_subject.to_string(),
            body: body.to_string(),
            signature: catalogue.signature.to_string(),
            direction: catalogue.direction,
        }
    }

    fn kind_label(&self, locale: &str, kind: LeadKind) -> String {
        let catalogue = Self::catalogue(locale);
        match kind {
            LeadKind::BookingSeekTalent => catalogue.kind_booking,
            LeadKind::ArtistSeekRepresentation => catalogue.kind_representation,
            LeadKind::ProductionRequest => catalogue.kind_production,
            LeadKind::MarketingRequest => catalogue.kind_marketing,
            LeadKind::ProductionSederSpecific => catalogue.kind_seder,
        }
        .to_string()
    }

    fn field_label(&self, locale: &str, field: LeadField) -> String {
        let catalogue = Self::catalogue(locale);
        match field {
            LeadField::Payload => "",
            LeadField::Kind => catalogue.field_kind,
            LeadField::ContactName => catalogue.field_name,
            LeadField::ContactEmail => catalogue.field_email,
            LeadField::Message => catalogue.field_message,
            LeadField::TalentCategory => catalogue.field_talent,
            LeadField::DemoLink => catalogue.field_demo,
            LeadField::Locale => catalogue.field_locale,
        }
        .to_string()
    }

    fn issue_message(&self, locale: &str, issue: &ValidationIssue) -> String {
        let catalogue = Self::catalogue(locale);
        match issue.code {
            IssueCode::MalformedPayload => catalogue.issue_malformed,
            IssueCode::InvalidType => catalogue.issue_type,
            IssueCode::Required => catalogue.issue_required,
            IssueCode::InvalidKind => catalogue.issue_kind,
            IssueCode::TooShort => catalogue.issue_too_short,
            IssueCode::InvalidEmail => catalogue.issue_email,
        }
        .to_string()
    }
}
