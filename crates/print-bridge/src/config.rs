use crate::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runtime settings for the bridge. Every field has a default, so an empty
/// JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Upper bound for any single OS command; `None` waits forever
    pub command_timeout_secs: Option<u64>,
    pub powershell: String,
    /// SumatraPDF executable used for silent printing on Windows
    pub sumatra_pdf: PathBuf,
    pub lp: String,
    pub lpstat: String,
    pub lpoptions: String,
    /// Where rewritten documents are written; the OS temp dir when unset
    pub temp_dir: Option<PathBuf>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            command_timeout_secs: Some(60),
            powershell: "powershell".to_string(),
            sumatra_pdf: PathBuf::from("SumatraPDF.exe"),
            lp: "lp".to_string(),
            lpstat: "lpstat".to_string(),
            lpoptions: "lpoptions".to_string(),
            temp_dir: None,
        }
    }
}

impl BridgeConfig {
    /// Load configuration from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config: Self = serde_json::from_slice(&bytes)
            .map_err(|e| BridgeError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.command_timeout_secs == Some(0) {
            return Err(BridgeError::Config(
                "command_timeout_secs must be positive (omit it to disable the timeout)"
                    .to_string(),
            ));
        }

        for (field, value) in [
            ("powershell", self.powershell.as_str()),
            ("lp", self.lp.as_str()),
            ("lpstat", self.lpstat.as_str()),
            ("lpoptions", self.lpoptions.as_str()),
        ] {
            if value.trim().is_empty() {
                return Err(BridgeError::Config(format!("{field} must not be empty")));
            }
        }

        Ok(())
    }

    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_secs.map(Duration::from_secs)
    }
}
