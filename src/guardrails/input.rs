//! Task input validation.

use super::ValidationResult;
use crate::config::GuardrailSettings;
use regex::Regex;
use serde_json::Value;

/// Validate a candidate task input before it is handed to an agent.
///
/// The only recognized shape is a JSON object with a "topic" string.
/// Any other value (null, number, array, empty object) degrades to an
/// invalid result describing the defect; this function never fails.
/// Independent defects are all collected in a single call.
pub fn validate_task_input(task: &Value, policy: &GuardrailSettings) -> ValidationResult {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    let map = match task.as_object() {
        Some(map) => map,
        None => {
            issues.push("task input must be an object".to_string());
            return ValidationResult::from_findings(issues, warnings);
        }
    };

    match map.get("topic") {
        None | Some(Value::Null) => issues.push("missing topic".to_string()),
        Some(Value::String(topic)) => {
            let trimmed = topic.trim();
            if trimmed.is_empty() {
                issues.push("topic is empty".to_string());
            } else if trimmed.chars().count() > policy.max_topic_chars {
                issues.push("topic is too long".to_string());
            }
        }
        Some(_) => issues.push("topic must be a string".to_string()),
    }

    if let Some(Value::String(time_window)) = map.get("time_window") {
        let format = Regex::new(r"\d{4}-\d{2}-\d{2}\s+to\s+\d{4}-\d{2}-\d{2}")
            .expect("static regex");
        if !format.is_match(time_window) {
            warnings
                .push("time window should be in format 'YYYY-MM-DD to YYYY-MM-DD'".to_string());
        }
    }

    for field in ["must_hits", "red_lines"] {
        match map.get(field) {
            None | Some(Value::Null) | Some(Value::Array(_)) => {}
            Some(_) => issues.push(format!("{} must be a list", field)),
        }
    }

    ValidationResult::from_findings(issues, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn policy() -> GuardrailSettings {
        GuardrailSettings::default()
    }

    #[test]
    fn test_well_formed_topic_passes() {
        let result = validate_task_input(&json!({"topic": "Market trends in solar energy"}), &policy());
        assert!(result.is_valid);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_empty_object_reports_missing_topic() {
        let result = validate_task_input(&json!({}), &policy());
        assert!(!result.is_valid);
        assert_eq!(result.issues, vec!["missing topic".to_string()]);
    }

    #[test]
    fn test_whitespace_topic_reports_empty() {
        let result = validate_task_input(&json!({"topic": "   "}), &policy());
        assert!(!result.is_valid);
        assert_eq!(result.issues, vec!["topic is empty".to_string()]);
    }

    #[test]
    fn test_non_string_topic_reports_type() {
        let result = validate_task_input(&json!({"topic": 12345}), &policy());
        assert!(!result.is_valid);
        assert_eq!(result.issues, vec!["topic must be a string".to_string()]);
    }

    #[test]
    fn test_overlong_topic_reports_too_long() {
        let long_topic = "x".repeat(501);
        let result = validate_task_input(&json!({ "topic": long_topic }), &policy());
        assert!(!result.is_valid);
        assert_eq!(result.issues, vec!["topic is too long".to_string()]);
    }

    #[test]
    fn test_topic_at_limit_passes() {
        let topic = "x".repeat(500);
        let result = validate_task_input(&json!({ "topic": topic }), &policy());
        assert!(result.is_valid);
    }

    #[test]
    fn test_max_length_is_policy() {
        let mut policy = GuardrailSettings::default();
        policy.max_topic_chars = 10;
        let result = validate_task_input(&json!({"topic": "well over ten chars"}), &policy);
        assert_eq!(result.issues, vec!["topic is too long".to_string()]);
    }

    #[test]
    fn test_non_object_inputs_never_fail() {
        for input in [json!(null), json!(42), json!(["a"]), json!("topic")] {
            let result = validate_task_input(&input, &policy());
            assert!(!result.is_valid);
            assert_eq!(result.issues, vec!["task input must be an object".to_string()]);
        }
    }

    #[test]
    fn test_multiple_defects_collected() {
        let result = validate_task_input(
            &json!({"topic": 7, "must_hits": "not a list", "red_lines": {"nope": true}}),
            &policy(),
        );
        assert!(!result.is_valid);
        assert_eq!(
            result.issues,
            vec![
                "topic must be a string".to_string(),
                "must_hits must be a list".to_string(),
                "red_lines must be a list".to_string(),
            ]
        );
    }

    #[test]
    fn test_time_window_format_warns_only() {
        let result = validate_task_input(
            &json!({"topic": "solar", "time_window": "last month"}),
            &policy(),
        );
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);

        let result = validate_task_input(
            &json!({"topic": "solar", "time_window": "2023-01-01 to 2025-09-06"}),
            &policy(),
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let input = json!({"topic": "  ", "must_hits": 3});
        let first = validate_task_input(&input, &policy());
        let second = validate_task_input(&input, &policy());
        assert_eq!(first, second);
    }
}
