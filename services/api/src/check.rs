use agency_leads::error::AppError;
use agency_leads::workflows::intake::{validate, LeadField};
use clap::Args;
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// JSON file holding one lead payload
    pub(crate) path: PathBuf,
    /// Locale tag applied as if passed with `?locale=`
    #[arg(long)]
    pub(crate) locale: Option<String>,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let raw = std::fs::read(&args.path)?;
    let report = check_payload(&raw, args.locale.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Run the boundary rules over raw JSON. Only unparseable input is an error.
pub(crate) fn check_payload(raw: &[u8], locale: Option<&str>) -> Result<Value, AppError> {
    let mut payload: Value = serde_json::from_slice(raw)?;
    if let (Some(locale), Value::Object(map)) = (locale, &mut payload) {
        map.insert(
            LeadField::Locale.path().to_string(),
            Value::String(locale.to_string()),
        );
    }

    let report = match validate(&payload) {
        Ok(request) => json!({ "valid": true, "request": request }),
        Err(issues) => json!({ "valid": false, "issues": issues }),
    };
    Ok(report)
}
