use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::classify::classify_model::ClassificationResult;
use crate::slots::slot_model::SlotMapping;

/// One JSONL record per detected node, for offline inspection of how the
/// heuristics behaved on a real tree.
#[derive(Debug, Serialize)]
pub struct DetectEvent {
    pub timestamp_ms: u128,

    pub node: String,

    pub component: String,
    pub confidence: f32,

    pub reasons: Vec<String>,

    /// "hit" or "miss" when the cached pipeline ran; absent otherwise.
    pub cache: Option<String>,

    pub slot_warnings: Vec<String>,
}

impl DetectEvent {
    pub fn now(node: &str, classification: &ClassificationResult) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            node: node.to_string(),
            component: classification.component.to_string(),
            confidence: classification.confidence,
            reasons: classification.reasons.clone(),
            cache: None,
            slot_warnings: Vec::new(),
        }
    }

    pub fn with_cache(mut self, outcome: impl ToString) -> Self {
        self.cache = Some(outcome.to_string());
        self
    }

    pub fn with_slots(mut self, mapping: &SlotMapping) -> Self {
        self.slot_warnings = mapping.warnings.clone();
        self
    }
}
