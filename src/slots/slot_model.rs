use serde::{Deserialize, Serialize};

use crate::classify::classify_model::ComponentType;

/// One child placed into a named slot of a compound component.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotAssignment {
    /// Slot name from the schema ("Trigger", "Item", ...).
    pub slot: String,

    /// Index path from the mapped parent to the assigned node.
    pub path: Vec<usize>,

    pub node_name: String,

    pub confidence: f32,

    pub reasons: Vec<String>,
}

/// The slot mapping for one matched compound component.
///
/// Missing required slots never fail the mapping; they surface as warnings so
/// callers can decide whether to accept, re-prompt, or reject.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotMapping {
    pub component: ComponentType,

    /// Assignments in document order; each entry names its slot.
    pub assignments: Vec<SlotAssignment>,

    pub warnings: Vec<String>,

    /// Mean confidence over assigned slots only; 0.0 when nothing matched.
    pub overall_confidence: f32,
}

impl SlotMapping {
    pub fn assignments_for(&self, slot: &str) -> Vec<&SlotAssignment> {
        self.assignments.iter().filter(|a| a.slot == slot).collect()
    }
}
