use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed vocabulary of UI component kinds the classifier can produce.
///
/// The order of classification attempts is NOT this enum's order; it is the
/// declaration order of the candidate registry (`classify/registry.rs`),
/// where compound types are listed before the simpler types they contain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ComponentType {
    DatePicker,
    Calendar,
    Sidebar,
    Pagination,
    Tabs,
    ToggleGroup,
    Toggle,
    Switch,
    RadioGroup,
    Radio,
    Checkbox,
    Slider,
    Select,
    Dialog,
    Form,
    Field,
    Textarea,
    Input,
    Button,
    Card,
    Avatar,
    Badge,
    Image,
    Unknown,
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Outcome of classifying a single node. Produced fresh per call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationResult {
    pub component: ComponentType,

    /// Heuristic certainty in [0, 1]; not a calibrated probability.
    pub confidence: f32,

    /// Contributing signals, in rule-evaluation order.
    pub reasons: Vec<String>,
}

impl ClassificationResult {
    /// The total fallback: nothing matched.
    pub fn unknown() -> Self {
        Self {
            component: ComponentType::Unknown,
            confidence: 0.0,
            reasons: Vec::new(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.component == ComponentType::Unknown
    }
}
