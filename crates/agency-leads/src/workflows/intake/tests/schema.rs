use super::common::*;
use serde_json::{json, Value};

use crate::workflows::intake::domain::{IssueCode, LeadDraft, LeadField, LeadKind};
use crate::workflows::intake::schema::{self, governs, requirements};

fn issue_paths(payload: &Value) -> Vec<&'static str> {
    match schema::validate(payload) {
        Ok(_) => Vec::new(),
        Err(issues) => issues.iter().map(|issue| issue.path.path()).collect(),
    }
}

#[test]
fn talent_category_is_required_only_where_governed() {
    for kind in LeadKind::ALL {
        let payload = with(
            without(production_payload(), "talentCategory"),
            "kind",
            json!(kind.token()),
        );
        let payload = with(payload, "demoLink", json!("https://example.com/demo"));
        let result = schema::validate(&payload);

        match kind {
            LeadKind::BookingSeekTalent | LeadKind::ArtistSeekRepresentation => {
                let issues = result.expect_err("talent category is required");
                assert!(issues.has_field(LeadField::TalentCategory), "{kind}");
            }
            _ => {
                let request = result.expect("talent category is not governed");
                assert_eq!(request.talent_category, None);
            }
        }
    }
}

#[test]
fn booking_scenario_flags_only_the_missing_category() {
    let payload = without(booking_payload(), "talentCategory");
    let issues = schema::validate(&payload).expect_err("missing category");

    assert_eq!(issues.len(), 1);
    let issue = issues.iter().next().expect("one issue");
    assert_eq!(issue.path, LeadField::TalentCategory);
    assert_eq!(issue.code, IssueCode::Required);
}

#[test]
fn blank_talent_category_counts_as_missing() {
    let payload = with(booking_payload(), "talentCategory", json!("   "));
    assert_eq!(issue_paths(&payload), vec!["talentCategory"]);
}

#[test]
fn short_demo_link_is_reported_for_artists() {
    let payload = with(artist_payload(), "demoLink", json!("abc"));
    let issues = schema::validate(&payload).expect_err("demo link too short");

    let demo: Vec<_> = issues.for_field(LeadField::DemoLink).collect();
    assert_eq!(demo.len(), 1);
    assert_eq!(demo[0].code, IssueCode::TooShort);
    assert!(!issues.has_field(LeadField::TalentCategory));
}

#[test]
fn missing_demo_link_is_required_for_artists() {
    let payload = without(artist_payload(), "demoLink");
    let issues = schema::validate(&payload).expect_err("demo link missing");
    let issue = issues.for_field(LeadField::DemoLink).next().expect("demo issue");
    assert_eq!(issue.code, IssueCode::Required);
}

#[test]
fn valid_artist_payload_is_accepted_with_defaults() {
    let request = schema::validate(&artist_payload()).expect("valid artist lead");
    assert_eq!(request.kind, LeadKind::ArtistSeekRepresentation);
    assert_eq!(request.demo_link.as_deref(), Some("https://example.com/jo"));
    assert_eq!(request.locale, "en");
}

#[test]
fn unknown_kind_reports_only_the_kind() {
    let payload = with(
        with(production_payload(), "kind", json!("catering")),
        "demoLink",
        json!("x"),
    );
    let issues = schema::validate(&payload).expect_err("unknown kind");

    assert_eq!(issues.fields(), vec![LeadField::Kind]);
    assert_eq!(
        issues.iter().next().map(|issue| issue.code),
        Some(IssueCode::InvalidKind)
    );
}

#[test]
fn missing_kind_still_checks_base_fields() {
    let payload = json!({ "contactName": "A", "contactEmail": "nope", "message": "" });
    assert_eq!(
        issue_paths(&payload),
        vec!["kind", "contactName", "contactEmail", "message"]
    );
}

#[test]
fn validation_is_idempotent() {
    let payload = json!({
        "kind": "artist_seek_representation",
        "contactName": "J",
        "contactEmail": "jo@",
        "message": "hey",
    });
    assert_eq!(schema::validate(&payload), schema::validate(&payload));
}

#[test]
fn correcting_one_field_removes_only_its_issue() {
    let broken = with(production_payload(), "contactEmail", json!("ana-at-x"));
    let broken = with(broken, "message", json!("hi"));
    assert_eq!(issue_paths(&broken), vec!["contactEmail", "message"]);

    let corrected = with(broken, "contactEmail", json!("ana@x.com"));
    assert_eq!(issue_paths(&corrected), vec!["message"]);
}

#[test]
fn non_object_payload_is_malformed() {
    for payload in [json!(null), json!([1, 2]), json!("lead")] {
        let issues = schema::validate(&payload).expect_err("not an object");
        let issue = issues.iter().next().expect("one issue");
        assert_eq!(issue.path, LeadField::Payload);
        assert_eq!(issue.code, IssueCode::MalformedPayload);
    }
}

#[test]
fn wrong_typed_fields_are_reported_as_type_issues() {
    let payload = with(production_payload(), "message", json!(42));
    let payload = with(payload, "locale", json!(["he"]));
    let issues = schema::validate(&payload).expect_err("wrong types");

    assert_eq!(issues.fields(), vec![LeadField::Message, LeadField::Locale]);
    assert!(issues.iter().all(|issue| issue.code == IssueCode::InvalidType));
}

#[test]
fn draft_and_payload_share_rules() {
    let draft = LeadDraft {
        kind: Some(LeadKind::BookingSeekTalent),
        contact_name: "Dana Levi".to_string(),
        contact_email: "dana@events.example".to_string(),
        message: "Looking for a singer".to_string(),
        locale: "he".to_string(),
        ..LeadDraft::default()
    };
    let issues = schema::validate_draft(&draft).expect_err("category missing");
    assert_eq!(issues.fields(), vec![LeadField::TalentCategory]);
}

#[test]
fn rule_table_governs_only_listed_fields() {
    assert!(governs(LeadKind::BookingSeekTalent, LeadField::TalentCategory));
    assert!(!governs(LeadKind::BookingSeekTalent, LeadField::DemoLink));
    assert!(governs(LeadKind::ArtistSeekRepresentation, LeadField::DemoLink));
    assert!(requirements(LeadKind::MarketingRequest).is_empty());
    assert!(requirements(LeadKind::ProductionSederSpecific).is_empty());
}

#[test]
fn artist_with_empty_demo_link_has_exactly_one_issue() {
    let payload = with(artist_payload(), "demoLink", json!(""));
    let issues = schema::validate(&payload).expect_err("empty demo link");

    assert_eq!(issues.len(), 1);
    let issue = issues.iter().next().expect("one issue");
    assert_eq!(issue.path, LeadField::DemoLink);
    assert_eq!(issue.code, IssueCode::Required);
}

#[test]
fn whitespace_only_values_do_not_satisfy_length_rules() {
    let payload = with(artist_payload(), "demoLink", json!("      "));
    let issues = schema::validate(&payload).expect_err("blank demo link");
    let issue = issues.for_field(LeadField::DemoLink).next().expect("demo issue");
    assert_eq!(issue.code, IssueCode::Required);

    let payload = with(production_payload(), "message", json!("        "));
    let issues = schema::validate(&payload).expect_err("blank message");
    assert_eq!(issues.fields(), vec![LeadField::Message]);
    assert_eq!(
        issues.iter().next().map(|issue| issue.code),
        Some(IssueCode::Required)
    );
}

#[test]
fn accepted_requests_pass_the_boundary_check_again() {
    let accepted = [
        production_payload(),
        booking_payload(),
        artist_payload(),
        with(artist_payload(), "demoLink", json!("  https://example.com/jo  ")),
        with(production_payload(), "demoLink", json!("     ")),
        with(production_payload(), "talentCategory", json!("  ")),
        with(booking_payload(), "locale", json!("")),
        with(production_payload(), "contactName", json!(" Ana ")),
    ];

    for payload in accepted {
        let request = schema::validate(&payload).expect("payload is valid");
        assert_eq!(
            schema::revalidate(&request),
            Ok(request.clone()),
            "{payload}"
        );
    }
}
