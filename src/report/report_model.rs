use serde::{Deserialize, Serialize};

use crate::NodeDetection;
use crate::classify::classify_model::ComponentType;

// ============================================================================
// Detection report — aggregates the detections of one tree walk
// ============================================================================

/// Aggregated report for one classified design tree.
///
/// Built from a `Vec<NodeDetection>` via `from_detections()`. Consumed by the
/// console and markdown reporters, and serialized whole for the JSON format
/// and the file cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Where the tree came from (file path or tree name)
    pub source: String,

    /// Total nodes visited
    pub total_nodes: usize,

    /// Nodes classified as something other than Unknown
    pub matched: usize,

    /// Nodes that fell through to Unknown
    pub unknown: usize,

    /// Count per matched component type, descending
    pub by_component: Vec<ComponentCount>,

    /// Total slot warnings across all mappings
    pub slot_warnings: usize,

    /// Individual detections, preorder
    pub detections: Vec<NodeDetection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentCount {
    pub component: ComponentType,
    pub count: usize,
}

impl DetectionReport {
    /// Build a report from a tree walk's detections.
    ///
    /// Automatically computes the matched/unknown split and per-type counts.
    pub fn from_detections(source: &str, detections: Vec<NodeDetection>) -> Self {
        let total_nodes = detections.len();
        let matched = detections
            .iter()
            .filter(|d| !d.detection.classification.is_unknown())
            .count();
        let unknown = total_nodes - matched;

        let mut counts: Vec<ComponentCount> = Vec::new();
        for detection in &detections {
            let component = detection.detection.classification.component;
            if component == ComponentType::Unknown {
                continue;
            }
            match counts.iter_mut().find(|c| c.component == component) {
                Some(entry) => entry.count += 1,
                None => counts.push(ComponentCount { component, count: 1 }),
            }
        }
        counts.sort_by(|a, b| b.count.cmp(&a.count));

        let slot_warnings = detections
            .iter()
            .filter_map(|d| d.detection.slots.as_ref())
            .map(|m| m.warnings.len())
            .sum();

        Self {
            source: source.to_string(),
            total_nodes,
            matched,
            unknown,
            by_component: counts,
            slot_warnings,
            detections,
        }
    }

    pub fn all_matched(&self) -> bool {
        self.unknown == 0
    }
}
