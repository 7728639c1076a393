//! Mock provider implementation for testing.

use super::{ExplanationProvider, ProviderError};
use async_trait::async_trait;

/// Mock explanation provider for testing.
///
/// When enabled it echoes a canned explanation; when disabled every call
/// fails, which exercises the failure-to-diagnostic-text path in the
/// explain handler.
pub struct MockExplainer {
    enabled: bool,
}

impl MockExplainer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

#[async_trait]
impl ExplanationProvider for MockExplainer {
    async fn explain(&self, error_message: &str) -> Result<String, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::Network(
                "mock provider configured to fail".to_string(),
            ));
        }

        Ok(format!("Mock explanation for: {}", error_message))
    }
}
