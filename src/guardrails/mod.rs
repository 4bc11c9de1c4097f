//! Guardrail validation for agent inputs and outputs.
//!
//! Every check here is data-in, data-out: malformed input degrades to an
//! invalid [`ValidationResult`], never to an error. The functions are pure
//! and reentrant, so the agent runner may call them from parallel tool
//! paths without coordination.

mod input;
mod output;
mod report;

pub use input::validate_task_input;
pub use output::{validate_research_output, validate_script_output, TaskRequirements};
pub use report::format_validation_report;

/// Result of a single validation check.
///
/// Invariant: `is_valid` is true if and only if `issues` is empty.
/// Warnings are advisory and never affect validity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Build a result from collected issues and warnings, deriving validity.
    pub fn from_findings(issues: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: issues.is_empty(),
            issues,
            warnings,
        }
    }

    /// A passing result with no findings.
    pub fn valid() -> Self {
        Self::from_findings(Vec::new(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_derived_from_issues() {
        let result = ValidationResult::from_findings(vec!["missing topic".to_string()], vec![]);
        assert!(!result.is_valid);

        let result = ValidationResult::from_findings(vec![], vec!["odd format".to_string()]);
        assert!(result.is_valid);
    }

    #[test]
    fn test_valid_is_empty() {
        let result = ValidationResult::valid();
        assert!(result.is_valid);
        assert!(result.issues.is_empty());
        assert!(result.warnings.is_empty());
    }
}
