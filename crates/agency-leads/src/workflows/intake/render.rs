use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::copy::CopyProvider;
use super::domain::{LeadField, LeadRequest};
use super::messenger::OutboundMessage;
use super::schema::DEFAULT_LOCALE;

/// Sender and internal inbox used for both notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRoute {
    pub from: String,
    pub operator_inbox: String,
}

/// The two message bodies derived from one accepted lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessages {
    pub operator: OutboundMessage,
    pub acknowledgement: OutboundMessage,
}

#[derive(Clone)]
pub struct MessageRenderer {
    copy: Arc<dyn CopyProvider>,
    route: MailRoute,
    operator_locale: String,
}

impl MessageRenderer {
    pub fn new(copy: Arc<dyn CopyProvider>, route: MailRoute) -> Self {
        Self {
            copy,
            route,
            operator_locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Language used for the internal notification, independent of the visitor's locale.
    pub fn with_operator_locale(mut self, locale: impl Into<String>) -> Self {
        self.operator_locale = locale.into();
        self
    }

    pub fn render(&self, request: &LeadRequest, received_at: DateTime<Utc>) -> RenderedMessages {
        RenderedMessages {
            operator: self.operator_message(request, received_at),
            acknowledgement: self.acknowledgement_message(request),
        }
    }

    fn operator_message(
        &self,
        request: &LeadRequest,
        received_at: DateTime<Utc>,
    ) -> OutboundMessage {
        let locale = self.operator_locale.as_str();
        let kind_label = self.copy.kind_label(locale, request.kind);
        let subject = format!("New lead: {} from {}", kind_label, request.contact_name);

        let mut rows: Vec<(String, String)> = vec![
            (
                self.copy.field_label(locale, LeadField::Kind),
                format!("{} ({})", kind_label, request.kind.token()),
            ),
            (
                self.copy.field_label(locale, LeadField::ContactName),
                request.contact_name.clone(),
            ),
            (
                self.copy.field_label(locale, LeadField::ContactEmail),
                request.contact_email.clone(),
            ),
        ];
        if let Some(category) = &request.talent_category {
            rows.push((
                self.copy.field_label(locale, LeadField::TalentCategory),
                category.clone(),
            ));
        }
        if let Some(link) = &request.demo_link {
            rows.push((self.copy.field_label(locale, LeadField::DemoLink), link.clone()));
        }
        rows.push((
            self.copy.field_label(locale, LeadField::Locale),
            request.locale.clone(),
        ));

        let direction = self.copy.acknowledgement(locale, request.kind).direction;

        let mut html = format!("<div dir=\"{}\">", direction.html_attr());
        html.push_str(&format!("<h2>{}</h2><table>", escape_html(&subject)));
        for (label, value) in &rows {
            html.push_str(&format!(
                "<tr><th align=\"left\">{}</th><td>{}</td></tr>",
                escape_html(label),
                escape_html(value)
            ));
        }
        html.push_str("</table>");
        html.push_str(&format!(
            "<h3>{}</h3><p>{}</p>",
            escape_html(&self.copy.field_label(locale, LeadField::Message)),
            escape_html(&request.message).replace('\n', "<br>")
        ));
        html.push_str(&format!(
            "<p><small>Received {}</small></p></div>",
            received_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        OutboundMessage {
            from: self.route.from.clone(),
            to: self.route.operator_inbox.clone(),
            subject,
            html_body: html,
            reply_to: Some(request.contact_email.clone()),
        }
    }

    fn acknowledgement_message(&self, request: &LeadRequest) -> OutboundMessage {
        let copy = self.copy.acknowledgement(&request.locale, request.kind);
        let html_body = format!(
            "<div dir=\"{}\"><p>{}</p><p>{}</p></div>",
            copy.direction.html_attr(),
            escape_html(&copy.body),
            escape_html(&copy.signature)
        );

        OutboundMessage {
            from: self.route.from.clone(),
            to: request.contact_email.clone(),
            subject: copy.subject,
            html_body,
            reply_to: Some(self.route.operator_inbox.clone()),
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
