//! iCalendar export of upcoming activities.
//!
//! T040: Emit RFC 5545 all-day events for future activities
//! T041: Escape text values and generate export filenames

use chrono::{Duration, NaiveDate};

use crate::activities::types::{Activity, ActivityType};

/// Export errors.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No upcoming activities to export")]
    NoData,

    #[error("Write failed: {0}")]
    WriteFailed(String),
}

/// Export activities dated on or after `today` as an iCalendar document.
///
/// Each activity becomes one all-day VEVENT whose end date is the day after
/// its start. Returns [`ExportError::NoData`] when nothing qualifies so the
/// caller can warn instead of producing an empty file.
pub fn export_ics(activities: &[Activity], today: NaiveDate) -> Result<String, ExportError> {
    let mut upcoming: Vec<&Activity> = activities
        .iter()
        .filter(|a| a.is_upcoming(today))
        .collect();

    if upcoming.is_empty() {
        return Err(ExportError::NoData);
    }

    upcoming.sort_by_key(|a| a.date);

    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//RunPlan//Training Planner//EN".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
    ];

    for activity in upcoming {
        let start = activity.date;
        let end = start + Duration::days(1);

        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}@runplan", activity.id));
        lines.push(format!("DTSTAMP:{}T000000Z", today.format("%Y%m%d")));
        lines.push(format!("DTSTART;VALUE=DATE:{}", start.format("%Y%m%d")));
        lines.push(format!("DTEND;VALUE=DATE:{}", end.format("%Y%m%d")));
        lines.push(format!("SUMMARY:{}", escape_ics_text(&event_summary(activity))));
        if let Some(ref notes) = activity.notes {
            lines.push(format!("DESCRIPTION:{}", escape_ics_text(notes)));
        }
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());

    // RFC 5545 requires CRLF line endings
    let mut output = lines.join("\r\n");
    output.push_str("\r\n");
    Ok(output)
}

/// Human-readable summary line for one activity.
fn event_summary(activity: &Activity) -> String {
    match (activity.activity_type, activity.distance_km) {
        (ActivityType::Run, Some(distance)) => format!(
            "Run {} km ({} min)",
            format_km(distance),
            activity.duration_minutes
        ),
        _ => format!(
            "{} ({} min)",
            activity.activity_type.label(),
            activity.duration_minutes
        ),
    }
}

/// Format a distance without a trailing `.0` for whole kilometers.
fn format_km(distance: f64) -> String {
    if distance.fract() == 0.0 {
        format!("{:.0}", distance)
    } else {
        format!("{}", distance)
    }
}

/// Escape a text value per RFC 5545 section 3.3.11.
pub fn escape_ics_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
        .replace('\r', "\\n")
}

/// Export activities to a file.
pub fn export_ics_to_file(
    activities: &[Activity],
    today: NaiveDate,
    path: &std::path::Path,
) -> Result<(), ExportError> {
    let content = export_ics(activities, today)?;
    std::fs::write(path, content).map_err(|e| ExportError::WriteFailed(e.to_string()))?;
    Ok(())
}

/// Generate a default filename for a calendar export.
pub fn generate_ics_filename(today: NaiveDate) -> String {
    format!("RunPlan_{}.ics", today.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
    }

    fn future_run() -> Activity {
        Activity::new(
            ActivityType::Run,
            NaiveDate::from_ymd_opt(2024, 7, 20).unwrap(),
            30,
            Some(5.0),
            Some("Easy run; keep it conversational".to_string()),
        )
    }

    #[test]
    fn test_export_with_no_upcoming_activities_errors() {
        let result = export_ics(&[], today());
        assert!(matches!(result, Err(ExportError::NoData)));

        let past = Activity::new(
            ActivityType::Run,
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            30,
            None,
            None,
        );
        let result = export_ics(&[past], today());
        assert!(matches!(result, Err(ExportError::NoData)));
    }

    #[test]
    fn test_export_single_future_run() {
        let ics = export_ics(&[future_run()], today()).unwrap();

        assert!(ics.starts_with("BEGIN:VCALENDAR"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
        assert!(ics.contains("SUMMARY:Run 5 km (30 min)"));
        assert!(ics.contains("DTSTART;VALUE=DATE:20240720"));
        // All-day event ends the following day
        assert!(ics.contains("DTEND;VALUE=DATE:20240721"));
    }

    #[test]
    fn test_export_filters_past_and_keeps_today() {
        let past = Activity::new(
            ActivityType::Swim,
            NaiveDate::from_ymd_opt(2024, 7, 14).unwrap(),
            45,
            None,
            None,
        );
        let on_today = Activity::new(ActivityType::Rest, today(), 0, None, None);

        let ics = export_ics(&[past, on_today, future_run()], today()).unwrap();

        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert!(ics.contains("SUMMARY:Rest (0 min)"));
        assert!(!ics.contains("DTSTART;VALUE=DATE:20240714"));
    }

    #[test]
    fn test_uid_derives_from_activity_id() {
        let activity = future_run();
        let ics = export_ics(&[activity.clone()], today()).unwrap();

        assert!(ics.contains(&format!("UID:{}@runplan", activity.id)));
    }

    #[test]
    fn test_description_escaping() {
        let mut activity = future_run();
        activity.notes = Some("Warm-up; then 4x400m, easy jog between\ncool down".to_string());

        let ics = export_ics(&[activity], today()).unwrap();

        assert!(ics.contains("DESCRIPTION:Warm-up\\; then 4x400m\\, easy jog between\\ncool down"));
    }

    #[test]
    fn test_escape_ics_text() {
        assert_eq!(escape_ics_text("a;b,c\nd"), "a\\;b\\,c\\nd");
        assert_eq!(escape_ics_text("back\\slash"), "back\\\\slash");
        assert_eq!(escape_ics_text("crlf\r\nline"), "crlf\\nline");
    }

    #[test]
    fn test_swim_summary_has_no_distance() {
        let swim = Activity::new(
            ActivityType::Swim,
            NaiveDate::from_ymd_opt(2024, 7, 22).unwrap(),
            45,
            None,
            None,
        );
        let ics = export_ics(&[swim], today()).unwrap();

        assert!(ics.contains("SUMMARY:Swim (45 min)"));
    }

    #[test]
    fn test_fractional_distance_formatting() {
        let mut run = future_run();
        run.distance_km = Some(7.5);
        let ics = export_ics(&[run], today()).unwrap();

        assert!(ics.contains("SUMMARY:Run 7.5 km (30 min)"));
    }

    #[test]
    fn test_generate_filename() {
        let filename = generate_ics_filename(today());
        assert_eq!(filename, "RunPlan_20240715.ics");
    }

    #[test]
    fn test_events_sorted_by_date() {
        let later = Activity::new(
            ActivityType::Run,
            NaiveDate::from_ymd_opt(2024, 7, 25).unwrap(),
            60,
            Some(10.0),
            None,
        );
        let sooner = future_run();

        let ics = export_ics(&[later, sooner], today()).unwrap();
        let first = ics.find("DTSTART;VALUE=DATE:20240720").unwrap();
        let second = ics.find("DTSTART;VALUE=DATE:20240725").unwrap();
        assert!(first < second);
    }
}
