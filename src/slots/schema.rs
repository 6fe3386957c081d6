use serde::{Deserialize, Serialize};

use crate::classify::classify_model::ComponentType;
use crate::node::node_model::{DesignNode, NodeKind};

// ============================================================================
// Slot schemas — declarative child-role rules per compound component type.
// Built in-memory by the default registry or deserialized from YAML files.
// ============================================================================

/// Child-role schema for one compound component type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotSchema {
    pub component: ComponentType,

    /// When true, all descendants are considered in document order; otherwise
    /// only direct children.
    #[serde(default)]
    pub deep: bool,

    /// Slot declaration order doubles as the tie-break order when one child
    /// scores equally for two slots.
    pub slots: Vec<SlotSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotSpec {
    pub name: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub allows_multiple: bool,

    /// Per-slot assignment floor.
    #[serde(default = "default_slot_floor")]
    pub min_confidence: f32,

    pub rules: Vec<SlotRule>,
}

fn default_slot_floor() -> f32 {
    0.5
}

/// Detection rules a child is scored against, mirroring the classifier's
/// signal families: name patterns, hierarchy position, and content type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotRule {
    /// Lower-cased child name contains any needle.
    NameContains { needles: Vec<String>, weight: f32 },

    /// Veto: a child whose name matches can never take this slot.
    NameExcludes { needles: Vec<String> },

    /// Child sits first or last among the considered children.
    Position { at: SlotPosition, weight: f32 },

    /// Child node kind is one of the listed kinds.
    KindIn { kinds: Vec<NodeKind>, weight: f32 },

    /// Child is or contains a text node.
    ContainsText { weight: f32 },

    /// Child is or contains an icon-shaped vector/image.
    ContainsIcon { weight: f32 },

    /// Structural fallback: child is a container (frame/group/instance/
    /// component). This is what catches positional children with generic
    /// names like "Left" or "Center".
    Container { weight: f32 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlotPosition {
    First,
    Last,
}

impl SlotSpec {
    /// Score one child against this slot. Returns the capped confidence and
    /// the reasons for every firing rule; a veto collapses the score to zero.
    pub fn score(&self, child: &DesignNode, index: usize, count: usize) -> (f32, Vec<String>) {
        let mut confidence: f32 = 0.0;
        let mut reasons = Vec::new();

        for rule in &self.rules {
            match rule {
                SlotRule::NameExcludes { needles } => {
                    let name = child.lower_name();
                    if needles.iter().any(|n| name.contains(n.to_lowercase().as_str())) {
                        return (0.0, Vec::new());
                    }
                }
                SlotRule::NameContains { needles, weight } => {
                    let name = child.lower_name();
                    if let Some(hit) =
                        needles.iter().find(|n| name.contains(n.to_lowercase().as_str()))
                    {
                        confidence += weight;
                        reasons.push(format!("Name contains '{}'", hit));
                    }
                }
                SlotRule::Position { at, weight } => {
                    let fires = match at {
                        SlotPosition::First => index == 0,
                        SlotPosition::Last => count > 0 && index == count - 1,
                    };
                    if fires {
                        confidence += weight;
                        let place = match at {
                            SlotPosition::First => "first",
                            SlotPosition::Last => "last",
                        };
                        reasons.push(format!("Positioned {}", place));
                    }
                }
                SlotRule::KindIn { kinds, weight } => {
                    if kinds.contains(&child.kind) {
                        confidence += weight;
                        reasons.push(format!("Node kind {:?}", child.kind));
                    }
                }
                SlotRule::ContainsText { weight } => {
                    if child.has_text_descendant() {
                        confidence += weight;
                        reasons.push("Contains text".to_string());
                    }
                }
                SlotRule::ContainsIcon { weight } => {
                    if child.has_icon_descendant() {
                        confidence += weight;
                        reasons.push("Contains icon".to_string());
                    }
                }
                SlotRule::Container { weight } => {
                    if child.is_container() {
                        confidence += weight;
                        reasons.push("Container child".to_string());
                    }
                }
            }
        }

        (confidence.clamp(0.0, 1.0), reasons)
    }
}
