//! Health/status surface
//!
//! Reports the process operating mode and detection stack composition for
//! operational monitoring. The pipeline itself never consumes this.

use crate::domain::outcome::ServiceMode;
use serde::{Deserialize, Serialize};

/// Snapshot of the detection stack's operational state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Current operating mode, fixed at startup
    pub mode: ServiceMode,
    /// Whether the NER capability initialized successfully
    pub ner_loaded: bool,
    /// Identifier of the active model, when loaded
    pub model_id: Option<String>,
    /// Recognizer names in chain order
    pub recognizers: Vec<String>,
}

impl HealthStatus {
    /// True when the full detection stack is operative
    pub fn is_normal(&self) -> bool {
        self.mode == ServiceMode::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_shape() {
        let status = HealthStatus {
            mode: ServiceMode::Degraded,
            ner_loaded: false,
            model_id: None,
            recognizers: vec!["pattern".to_string(), "fallback".to_string()],
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["mode"], "degraded");
        assert_eq!(json["ner_loaded"], false);
        assert!(!status.is_normal());
    }
}
