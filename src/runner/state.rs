use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Scenario outcome
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioStatus {
    Passed,
    Failed,
}

/// Result record for one scenario run.
///
/// Built once when the run ends and never mutated. Duration fields are
/// `None` when the run failed before the decisive wait completed; they
/// render as "N/A".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    pub status: ScenarioStatus,
    pub message: String,
    pub total_seconds: Option<f64>,
    pub wait_seconds: Option<f64>,
    pub started_at: String,
    pub finished_at: String,
}

impl ScenarioReport {
    pub fn is_passed(&self) -> bool {
        self.status == ScenarioStatus::Passed
    }

    pub fn total_display(&self) -> String {
        format_seconds(self.total_seconds)
    }

    pub fn wait_display(&self) -> String {
        format_seconds(self.wait_seconds)
    }
}

/// Format a wall-clock stamp the way the summary prints it
pub fn format_timestamp(t: DateTime<Local>) -> String {
    t.format("%d/%m/%Y %H:%M:%S").to_string()
}

fn format_seconds(value: Option<f64>) -> String {
    match value {
        Some(secs) => format!("{:.2}s", secs),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(status: ScenarioStatus, total: Option<f64>, wait: Option<f64>) -> ScenarioReport {
        ScenarioReport {
            status,
            message: "text 'Hello World!' found".to_string(),
            total_seconds: total,
            wait_seconds: wait,
            started_at: "01/01/2024 12:00:00".to_string(),
            finished_at: "01/01/2024 12:00:09".to_string(),
        }
    }

    #[test]
    fn missing_durations_render_as_na() {
        let report = sample(ScenarioStatus::Failed, None, None);
        assert_eq!(report.total_display(), "N/A");
        assert_eq!(report.wait_display(), "N/A");
    }

    #[test]
    fn durations_render_with_two_decimals() {
        let report = sample(ScenarioStatus::Passed, Some(9.5), Some(6.04));
        assert_eq!(report.total_display(), "9.50s");
        assert_eq!(report.wait_display(), "6.04s");
    }

    #[test]
    fn report_serializes_with_camel_case_fields() {
        let report = sample(ScenarioStatus::Passed, Some(9.5), Some(6.0));
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains(r#""status":"passed""#));
        assert!(json.contains(r#""totalSeconds":9.5"#));
        assert!(json.contains(r#""waitSeconds":6.0"#));
        assert!(json.contains(r#""startedAt":"01/01/2024 12:00:00""#));
    }

    #[test]
    fn status_round_trips_through_serde() {
        let json = serde_json::to_string(&ScenarioStatus::Failed).unwrap();
        assert_eq!(json, r#""failed""#);
        let back: ScenarioStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ScenarioStatus::Failed);
    }
}
