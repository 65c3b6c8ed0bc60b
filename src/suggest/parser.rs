//! Suggestion response parsing and coercion.
//!
//! T033: Strip code fences and enforce the JSON-array contract
//! T034: Coerce candidate fields defensively, never discarding elements

use chrono::NaiveDate;
use serde_json::Value;

use crate::activities::types::ActivityType;

use super::prompt::PLAN_DAYS;
use super::types::{SuggestError, SuggestedActivity};

/// Strip one optional leading/trailing Markdown code fence.
///
/// Handles both plain fences and fences with a language tag. Anything that is
/// not a complete fence pair is returned trimmed but otherwise untouched.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(rest) = rest.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the language tag on the opening fence, if any
    let body = match rest.split_once('\n') {
        Some((tag, body)) if tag.trim().chars().all(|c| c.is_ascii_alphanumeric()) => body,
        _ => rest,
    };

    body.trim()
}

/// Parse a service response into at most [`PLAN_DAYS`] candidates.
///
/// Non-JSON or JSON-but-not-array responses are fatal for the request.
/// Individual elements are never rejected; every field is coerced to a safe
/// default, with `fallback_date` standing in for a missing or unparseable
/// date.
pub fn parse_suggestions(
    text: &str,
    fallback_date: NaiveDate,
) -> Result<Vec<SuggestedActivity>, SuggestError> {
    let stripped = strip_code_fence(text);

    let parsed: Value = serde_json::from_str(stripped)
        .map_err(|e| SuggestError::InvalidFormat(format!("response is not valid JSON: {}", e)))?;

    let Value::Array(elements) = parsed else {
        return Err(SuggestError::InvalidFormat(
            "response is not a JSON array".to_string(),
        ));
    };

    if elements.len() > PLAN_DAYS {
        tracing::warn!(
            "Service returned {} candidates, truncating to {}",
            elements.len(),
            PLAN_DAYS
        );
    }

    Ok(elements
        .iter()
        .take(PLAN_DAYS)
        .map(|element| coerce_candidate(element, fallback_date))
        .collect())
}

/// Coerce one array element into a structurally valid candidate.
fn coerce_candidate(value: &Value, fallback_date: NaiveDate) -> SuggestedActivity {
    let activity_type = value
        .get("type")
        .and_then(Value::as_str)
        .and_then(ActivityType::from_label)
        .unwrap_or(ActivityType::Rest);

    let date = value
        .get("date")
        .and_then(Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .unwrap_or(fallback_date);

    let notes = value
        .get("notes")
        .and_then(Value::as_str)
        .map(str::to_string);

    SuggestedActivity {
        activity_type,
        date,
        duration_minutes: coerce_duration(value.get("durationMinutes")),
        distance_km: coerce_distance(value.get("distanceKm")),
        notes,
    }
}

/// Coerce a duration to a non-negative minute count, defaulting to 0.
///
/// Numeric strings are accepted alongside plain numbers.
fn coerce_duration(value: Option<&Value>) -> u32 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(v) if v.is_finite() && v > 0.0 => v.round() as u32,
        _ => 0,
    }
}

/// Coerce a distance to kilometers, dropping it when absent or unparseable.
fn coerce_distance(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite() && *v >= 0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| *v >= 0.0),
        _ => None,
    }
}
