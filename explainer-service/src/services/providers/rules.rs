//! Rule-based explanation provider.
//!
//! Deterministic, network-free fallback strategy: the error message is
//! matched against an ordered substring table; the first hit wins.

use super::{ExplanationProvider, ProviderError};
use async_trait::async_trait;

/// Ordered rule table. More specific patterns go first since matching stops
/// at the first hit.
const RULES: &[(&str, &str)] = &[
    (
        "SyntaxError",
        "Python syntax error: the interpreter could not parse your code. \
         Look at the line the traceback points to and check for a missing \
         colon, an unclosed bracket or quote, or stray indentation just \
         before it.",
    ),
    (
        "IndentationError",
        "Python indentation error: a block is not indented consistently. \
         Re-indent the reported line to match its surrounding block and make \
         sure tabs and spaces are not mixed.",
    ),
    (
        "NameError",
        "A name was used before it was defined. Check the spelling of the \
         variable or function, make sure it is assigned before first use, \
         and verify the import that should provide it.",
    ),
    (
        "TypeError",
        "An operation received a value of the wrong type. Inspect the values \
         on the failing line, convert them explicitly where needed, and check \
         that the function is called with the arguments it expects.",
    ),
    (
        "KeyError",
        "A dictionary lookup used a key that does not exist. Print the \
         available keys at the failing line, guard the access with `in` or \
         `.get()`, and check where the dictionary is populated.",
    ),
    (
        "IndexError",
        "A sequence was indexed past its end. Check the length of the list \
         before indexing, and review the loop bounds or the code that should \
         have filled the sequence.",
    ),
    (
        "ZeroDivisionError",
        "A division by zero occurred. Guard the denominator before dividing \
         and trace back why it was zero: an empty input, a counter that never \
         advanced, or a default that was never overwritten.",
    ),
    (
        "ModuleNotFoundError",
        "An import could not be resolved. Install the missing package into \
         the environment you are running with, and confirm the module name \
         and the active virtual environment.",
    ),
    (
        "ConnectionRefused",
        "A network connection was refused. Confirm the target service is \
         running, that the host and port are correct, and that no firewall \
         is blocking the connection.",
    ),
];

/// Keyword-matching explanation provider. Never fails.
pub struct RuleBasedExplainer;

impl RuleBasedExplainer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RuleBasedExplainer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExplanationProvider for RuleBasedExplainer {
    async fn explain(&self, error_message: &str) -> Result<String, ProviderError> {
        for (pattern, explanation) in RULES {
            if error_message.contains(pattern) {
                return Ok((*explanation).to_string());
            }
        }

        Ok(format!(
            "Explanation not found for '{}'. Check the spelling of the error \
             and include the full message or stack trace for a better match.",
            error_message
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn syntax_error_matches_the_python_rule() {
        let provider = RuleBasedExplainer::new();
        let explanation = provider
            .explain("SyntaxError: invalid syntax")
            .await
            .expect("rules provider never fails");

        assert!(explanation.contains("Python syntax error"));
    }

    #[tokio::test]
    async fn unknown_errors_get_the_fallback_message() {
        let provider = RuleBasedExplainer::new();
        let explanation = provider
            .explain("random unknown failure")
            .await
            .expect("rules provider never fails");

        assert!(explanation.contains("Explanation not found for 'random unknown failure'"));
    }

    #[tokio::test]
    async fn first_matching_rule_wins() {
        let provider = RuleBasedExplainer::new();
        // Contains both SyntaxError and NameError; table order decides.
        let explanation = provider
            .explain("SyntaxError after NameError in traceback")
            .await
            .expect("rules provider never fails");

        assert!(explanation.contains("Python syntax error"));
    }
}
