//! Agent output validation.
//!
//! Checks research briefs and commentary scripts against the task
//! requirements and the configured guardrail policy. Keyword checks are
//! deliberately simple; they flag for human review rather than judge.

use super::ValidationResult;
use crate::config::GuardrailSettings;
use regex::Regex;

/// Structured task requirements carried through the pipeline.
#[derive(Debug, Clone, Default)]
pub struct TaskRequirements {
    pub topic: String,
    pub geo_focus: Option<String>,
    pub time_window: Option<String>,
    pub must_hits: Option<Vec<String>>,
    pub red_lines: Option<Vec<String>>,
}

fn citation_count(output: &str) -> usize {
    Regex::new(r"\[S\d+\]").expect("static regex").find_iter(output).count()
}

fn dated_line_count(output: &str) -> usize {
    Regex::new(r"\d{4}-\d{2}-\d{2}").expect("static regex").find_iter(output).count()
}

/// Must-hit coverage by simple keyword presence.
fn missing_must_hits(output_lower: &str, must_hits: &[String]) -> Vec<String> {
    must_hits
        .iter()
        .filter(|hit| {
            !hit.split_whitespace()
                .any(|keyword| output_lower.contains(&keyword.to_lowercase()))
        })
        .cloned()
        .collect()
}

/// Red-line violations by simple keyword presence.
fn red_line_violations(output_lower: &str, red_lines: &[String]) -> Vec<String> {
    red_lines
        .iter()
        .filter(|line| {
            line.split_whitespace()
                .any(|keyword| output_lower.contains(&keyword.to_lowercase()))
        })
        .cloned()
        .collect()
}

/// Validate a research brief for compliance and quality.
pub fn validate_research_output(
    output: &str,
    requirements: &TaskRequirements,
    policy: &GuardrailSettings,
) -> ValidationResult {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();
    let output_lower = output.to_lowercase();

    if !output_lower.contains("sources register") {
        issues.push("missing Sources Register section".to_string());
    }

    if citation_count(output) < policy.min_citations {
        warnings.push("few source citations found - ensure claims are properly cited".to_string());
    }

    if dated_line_count(output) < policy.min_citations {
        warnings.push("few dates found - ensure sources include publication dates".to_string());
    }

    if let Some(must_hits) = &requirements.must_hits {
        let missing = missing_must_hits(&output_lower, must_hits);
        if !missing.is_empty() {
            issues.push(format!("missing must-hit coverage: {}", missing.join(", ")));
        }
    }

    if let Some(red_lines) = &requirements.red_lines {
        let violations = red_line_violations(&output_lower, red_lines);
        if !violations.is_empty() {
            issues.push(format!("potential red-line violations: {}", violations.join(", ")));
        }
    }

    let source_count = Regex::new(r"(?m)^\d+\.")
        .expect("static regex")
        .find_iter(output)
        .count();
    if source_count < policy.min_sources {
        issues.push(format!(
            "insufficient sources found: {} (minimum {} required)",
            source_count, policy.min_sources
        ));
    }

    ValidationResult::from_findings(issues, warnings)
}

/// Outline sections every script is expected to carry.
const REQUIRED_SECTIONS: &[&str] = &[
    "hook",
    "context",
    "what's new",
    "receipts",
    "counterpoints",
    "implications",
];

/// Hedging phrases that tend to smuggle in uncited predictions.
const SPECULATIVE_PHRASES: &[&str] = &[
    "will likely",
    "probably will",
    "expected to",
    "should result in",
];

/// Validate a commentary script for compliance and quality.
pub fn validate_script_output(
    output: &str,
    requirements: &TaskRequirements,
    policy: &GuardrailSettings,
) -> ValidationResult {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();
    let output_lower = output.to_lowercase();

    let missing_sections: Vec<&str> = REQUIRED_SECTIONS
        .iter()
        .filter(|section| !output_lower.contains(*section))
        .copied()
        .collect();
    if !missing_sections.is_empty() {
        warnings.push(format!(
            "missing or unclear sections: {}",
            missing_sections.join(", ")
        ));
    }

    let word_count = output.split_whitespace().count();
    if word_count < policy.script_min_words {
        warnings.push(format!("script may be too short: {} words", word_count));
    } else if word_count > policy.script_max_words {
        warnings.push(format!("script may be too long: {} words", word_count));
    }

    if citation_count(output) < policy.min_citations {
        warnings.push("few source citations found in script".to_string());
    }

    if let Some(red_lines) = &requirements.red_lines {
        let violations = red_line_violations(&output_lower, red_lines);
        if !violations.is_empty() {
            issues.push(format!(
                "potential red-line violations in script: {}",
                violations.join(", ")
            ));
        }
    }

    let speculation: Vec<&str> = SPECULATIVE_PHRASES
        .iter()
        .filter(|phrase| output_lower.contains(*phrase))
        .copied()
        .collect();
    if !speculation.is_empty() {
        warnings.push(format!(
            "potentially speculative language found: {}",
            speculation.join(", ")
        ));
    }

    ValidationResult::from_findings(issues, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> GuardrailSettings {
        GuardrailSettings::default()
    }

    fn sample_brief() -> String {
        let register: String = (1..=6)
            .map(|i| {
                format!(
                    "{}. Solar Outlook {} - Example Wire - 2025-0{}-01 - https://example.com/{} - capacity data [S{}]\n",
                    i, i, i, i, i
                )
            })
            .collect();
        format!("Sources Register\n{}\nKey Findings\n- Prices fell [S1] 2025-01-01", register)
    }

    #[test]
    fn test_research_brief_passes() {
        let requirements = TaskRequirements {
            topic: "solar".to_string(),
            must_hits: Some(vec!["capacity".to_string()]),
            ..Default::default()
        };
        let result = validate_research_output(&sample_brief(), &requirements, &policy());
        assert!(result.is_valid, "issues: {:?}", result.issues);
    }

    #[test]
    fn test_missing_sources_register() {
        let result =
            validate_research_output("Key Findings only", &TaskRequirements::default(), &policy());
        assert!(!result.is_valid);
        assert!(result
            .issues
            .iter()
            .any(|i| i.contains("Sources Register")));
    }

    #[test]
    fn test_must_hit_coverage_reported() {
        let requirements = TaskRequirements {
            must_hits: Some(vec!["tariff impact".to_string()]),
            ..Default::default()
        };
        let result = validate_research_output(&sample_brief(), &requirements, &policy());
        assert!(result
            .issues
            .iter()
            .any(|i| i.contains("missing must-hit coverage: tariff impact")));
    }

    #[test]
    fn test_red_line_violation_reported() {
        let requirements = TaskRequirements {
            red_lines: Some(vec!["capacity speculation".to_string()]),
            ..Default::default()
        };
        let result = validate_research_output(&sample_brief(), &requirements, &policy());
        assert!(!result.is_valid);
        assert!(result.issues.iter().any(|i| i.contains("red-line")));
    }

    #[test]
    fn test_insufficient_sources_counted() {
        let brief = "Sources Register\n1. Only Source - Outlet - 2025-01-01 [S1] [S2] [S3]\n2025-02-01 2025-03-01";
        let result = validate_research_output(brief, &TaskRequirements::default(), &policy());
        assert!(result
            .issues
            .iter()
            .any(|i| i.contains("insufficient sources found: 1")));
    }

    #[test]
    fn test_script_word_count_warnings() {
        let short = "Hook context what's new receipts counterpoints implications [S1] [S2] [S3]";
        let result = validate_script_output(short, &TaskRequirements::default(), &policy());
        assert!(result.is_valid);
        assert!(result.warnings.iter().any(|w| w.contains("too short")));
    }

    #[test]
    fn test_script_speculation_flagged() {
        let script = "Hook. Prices will likely fall.";
        let result = validate_script_output(script, &TaskRequirements::default(), &policy());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("will likely")));
    }

    #[test]
    fn test_script_red_lines_are_issues() {
        let requirements = TaskRequirements {
            red_lines: Some(vec!["doxxing".to_string()]),
            ..Default::default()
        };
        let script = "Hook: the doxxing campaign continued.";
        let result = validate_script_output(script, &requirements, &policy());
        assert!(!result.is_valid);
    }
}
