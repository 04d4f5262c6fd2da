//! Script host for the local adapter

use crate::adapters::host::ScriptHost;
use crate::domain::{AssetportError, Result};
use async_trait::async_trait;

/// Script host without a scripting engine
///
/// The local host cannot show folder dialogs, so every evaluation fails with
/// a host error.
#[derive(Debug, Default, Clone)]
pub struct UnavailableScriptHost;

#[async_trait]
impl ScriptHost for UnavailableScriptHost {
    async fn evaluate_jsx(&self, script: &str) -> Result<String> {
        tracing::debug!(script, "Rejecting script evaluation");
        Err(AssetportError::Host(
            "Script evaluation is not available in the local host".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_evaluation_is_rejected() {
        let err = UnavailableScriptHost.evaluate_jsx("1 + 1").await.unwrap_err();
        assert!(matches!(err, AssetportError::Host(_)));
    }
}
