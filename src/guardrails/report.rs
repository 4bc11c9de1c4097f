//! Validation report formatting.

use super::ValidationResult;

/// Render a validation result into a multi-line report for display.
///
/// Pure and deterministic: the pass/fail line is derived strictly from
/// `is_valid`, and issues and warnings keep the order they were found in.
pub fn format_validation_report(result: &ValidationResult, label: &str) -> String {
    let mut report = vec![format!("=== {} Validation Report ===", label)];
    report.push(format!(
        "Status: {}",
        if result.is_valid { "PASSED" } else { "FAILED" }
    ));

    if !result.issues.is_empty() {
        report.push("\nIssues:".to_string());
        for issue in &result.issues {
            report.push(format!("  - {}", issue));
        }
    }

    if !result.warnings.is_empty() {
        report.push("\nWarnings:".to_string());
        for warning in &result.warnings {
            report.push(format!("  - {}", warning));
        }
    }

    if result.is_valid && result.warnings.is_empty() {
        report.push("\nAll checks passed.".to_string());
    }

    report.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_report_has_no_issue_lines() {
        let report = format_validation_report(&ValidationResult::valid(), "Test");
        assert!(report.contains("=== Test Validation Report ==="));
        assert!(report.contains("Status: PASSED"));
        assert!(!report.contains("Issues:"));
        assert!(report.contains("All checks passed."));
    }

    #[test]
    fn test_fail_report_lists_single_issue() {
        let result =
            ValidationResult::from_findings(vec!["missing topic".to_string()], Vec::new());
        let report = format_validation_report(&result, "Intake");
        assert!(report.contains("Status: FAILED"));
        assert!(report.contains("  - missing topic"));
    }

    #[test]
    fn test_issue_order_preserved() {
        let result = ValidationResult::from_findings(
            vec!["A missing".to_string(), "B too long".to_string()],
            Vec::new(),
        );
        let report = format_validation_report(&result, "Test");
        let first = report.find("A missing").unwrap();
        let second = report.find("B too long").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_warnings_rendered_separately() {
        let result = ValidationResult::from_findings(
            Vec::new(),
            vec!["time window format".to_string()],
        );
        let report = format_validation_report(&result, "Test");
        assert!(report.contains("Status: PASSED"));
        assert!(report.contains("Warnings:"));
        assert!(report.contains("  - time window format"));
        assert!(!report.contains("All checks passed."));
    }

    #[test]
    fn test_deterministic() {
        let result = ValidationResult::from_findings(
            vec!["x".to_string()],
            vec!["y".to_string()],
        );
        assert_eq!(
            format_validation_report(&result, "Same"),
            format_validation_report(&result, "Same")
        );
    }
}
