//! Pre-flight checks before expensive operations.
//!
//! Validates that required credentials are present before starting
//! operations that would otherwise fail midway through a model call.

use crate::error::{BylineError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Agent runs require the OpenAI API key.
    Run,
    /// Validation is local and needs nothing external.
    Validate,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation) -> Result<()> {
    match operation {
        Operation::Run => check_api_key()?,
        Operation::Validate => {}
    }
    Ok(())
}

/// Check if OpenAI API key is configured.
fn check_api_key() -> Result<()> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(BylineError::Config(
            "OPENAI_API_KEY is empty. Set it in .env or with: export OPENAI_API_KEY='sk-...'"
                .to_string(),
        )),
        Err(_) => Err(BylineError::Config(
            "OPENAI_API_KEY not set. Set it in .env or with: export OPENAI_API_KEY='sk-...'"
                .to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_has_no_requirements() {
        assert!(check(Operation::Validate).is_ok());
    }
}
