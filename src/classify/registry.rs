use crate::classify::classify_model::ComponentType;
use crate::classify::rules::{CandidateSpec, ExclusionRule, SignalRule};
use crate::node::node_model::LayoutMode;

// ============================================================================
// Candidate registry — explicit priority order, one rule table per type
// ============================================================================
//
// Declaration order is the evaluation order and the tie-break order: compound
// types are listed before the simpler types they contain (DatePicker before
// Calendar, ToggleGroup before Toggle) so a compound match is never captured
// by one of its parts. The `must_precede` declarations make those constraints
// checkable instead of implicit.
//
// Weight constants are a starting point, not tuned truth; they live here, in
// one place, so recalibration against labeled trees touches a single file.

/// Default minimum confidence a candidate must clear to beat `Unknown`.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.4;

pub struct ClassifierRegistry {
    candidates: Vec<CandidateSpec>,
    pub min_confidence: f32,
}

impl Default for ClassifierRegistry {
    fn default() -> Self {
        Self::with_candidates(builtin_candidates())
    }
}

impl ClassifierRegistry {
    pub fn with_candidates(candidates: Vec<CandidateSpec>) -> Self {
        Self {
            candidates,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }

    pub fn with_min_confidence(mut self, floor: f32) -> Self {
        self.min_confidence = floor.clamp(0.0, 1.0);
        self
    }

    pub fn candidates(&self) -> &[CandidateSpec] {
        &self.candidates
    }

    pub fn candidate_for(&self, component: ComponentType) -> Option<&CandidateSpec> {
        self.candidates.iter().find(|c| c.component == component)
    }

    /// Every `must_precede` declaration that the current ordering breaks.
    /// An empty result means the priority list is consistent.
    pub fn precedence_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        for (index, candidate) in self.candidates.iter().enumerate() {
            for later in &candidate.must_precede {
                let later_index = self
                    .candidates
                    .iter()
                    .position(|c| c.component == *later);
                match later_index {
                    Some(li) if li < index => violations.push(format!(
                        "{} must precede {} but is declared after it",
                        candidate.component, later
                    )),
                    _ => {}
                }
            }
        }
        violations
    }
}

fn builtin_candidates() -> Vec<CandidateSpec> {
    vec![
        // ---- Compound / container types first ----
        CandidateSpec::new(
            ComponentType::DatePicker,
            vec![
                SignalRule::name_any(
                    &["date picker", "datepicker", "date-picker"],
                    0.7,
                    "Name suggests date picker",
                ),
                SignalRule::name_any(&["date"], 0.2, "Name mentions date"),
                SignalRule::structural(0.3, "Contains a calendar child", |n| {
                    n.has_descendant_named("calendar")
                }),
                SignalRule::structural(0.3, "Contains an input-like trigger", |n| {
                    n.has_descendant_named("input")
                        || n.has_descendant_named("field")
                        || n.has_descendant_named("trigger")
                }),
            ],
        )
        .precedes(&[ComponentType::Calendar, ComponentType::Input]),
        CandidateSpec::new(
            ComponentType::Calendar,
            vec![
                SignalRule::name_any(&["calendar"], 0.6, "Name suggests calendar"),
                SignalRule::structural(0.2, "Day-grid child count", |n| n.child_count() >= 7),
                SignalRule::variant_any(0.1, "Variant tokens present"),
            ],
        ),
        CandidateSpec::new(
            ComponentType::Sidebar,
            vec![
                SignalRule::name_any(&["sidebar", "side bar", "nav"], 0.6, "Name suggests nav"),
                SignalRule::geometric(0.2, "Tall narrow bounds", |n| {
                    n.bounds.height >= 2.0 * n.bounds.width && n.bounds.width > 0.0
                }),
                SignalRule::structural(0.1, "Several children", |n| n.child_count() >= 3),
                SignalRule::structural(0.1, "Vertical layout", |n| {
                    n.layout == LayoutMode::Vertical
                }),
            ],
        )
        .excluding(vec![ExclusionRule::name_any(
            &["avatar"],
            "Avatar nodes are not navigation",
        )]),
        CandidateSpec::new(
            ComponentType::Pagination,
            vec![
                SignalRule::name_any(&["pagination", "pager"], 0.7, "Name suggests pagination"),
                SignalRule::structural(0.2, "Previous/next children", |n| {
                    n.has_child_named("prev") || n.has_child_named("next")
                }),
                SignalRule::structural(0.1, "Several children", |n| n.child_count() >= 3),
            ],
        )
        .precedes(&[ComponentType::Button]),
        CandidateSpec::new(
            ComponentType::Tabs,
            vec![
                SignalRule::name_any(
                    &["tabs", "tab bar", "tab list", "tablist"],
                    0.6,
                    "Name suggests tabs",
                ),
                SignalRule::structural(0.2, "Multiple tab children", |n| {
                    n.children.iter().filter(|c| c.name_contains("tab")).count() >= 2
                }),
                SignalRule::structural(0.1, "Horizontal layout", |n| {
                    n.layout == LayoutMode::Horizontal
                }),
            ],
        )
        .precedes(&[ComponentType::Button]),
        CandidateSpec::new(
            ComponentType::ToggleGroup,
            vec![
                SignalRule::name_any(
                    &["toggle group", "toggle-group", "togglegroup", "segmented"],
                    0.7,
                    "Name suggests toggle group",
                ),
                SignalRule::structural(0.2, "Multiple container children", |n| {
                    n.children.iter().filter(|c| c.is_container()).count() >= 2
                }),
                SignalRule::structural(0.1, "Horizontal layout", |n| {
                    n.layout == LayoutMode::Horizontal
                }),
            ],
        )
        .precedes(&[ComponentType::Toggle, ComponentType::Switch]),
        CandidateSpec::new(
            ComponentType::Toggle,
            vec![
                SignalRule::name_any(&["toggle"], 0.6, "Name suggests toggle"),
                SignalRule::variant_key(&["pressed", "state"], 0.2, "Pressed-state variant"),
                SignalRule::geometric(0.1, "Compact bounds", |n| {
                    n.bounds.width <= 64.0 && n.bounds.height <= 64.0 && n.bounds.width > 0.0
                }),
            ],
        )
        .excluding(vec![ExclusionRule::name_any(
            &["group"],
            "Grouped toggles classify as ToggleGroup",
        )]),
        CandidateSpec::new(
            ComponentType::Switch,
            vec![
                SignalRule::name_any(&["switch"], 0.6, "Name suggests switch"),
                SignalRule::variant_any(0.2, "Variant tokens present"),
                SignalRule::geometric(0.2, "Pill-shaped bounds", |n| n.is_pill()),
            ],
        ),
        CandidateSpec::new(
            ComponentType::RadioGroup,
            vec![
                SignalRule::name_any(
                    &["radio group", "radio-group", "radiogroup"],
                    0.7,
                    "Name suggests radio group",
                ),
                SignalRule::structural(0.2, "Multiple radio children", |n| {
                    n.children.iter().filter(|c| c.name_contains("radio")).count() >= 2
                }),
                SignalRule::structural(0.1, "Vertical layout", |n| {
                    n.layout == LayoutMode::Vertical
                }),
            ],
        )
        .precedes(&[ComponentType::Radio]),
        CandidateSpec::new(
            ComponentType::Radio,
            vec![
                SignalRule::name_any(&["radio"], 0.6, "Name suggests radio"),
                SignalRule::variant_key(&["checked", "state"], 0.2, "Checked-state variant"),
                SignalRule::geometric(0.2, "Circular bounds", |n| n.is_circular()),
            ],
        )
        .excluding(vec![ExclusionRule::name_any(
            &["group"],
            "Grouped radios classify as RadioGroup",
        )]),
        CandidateSpec::new(
            ComponentType::Checkbox,
            vec![
                SignalRule::name_any(&["checkbox", "check box"], 0.6, "Name suggests checkbox"),
                SignalRule::variant_key(&["checked", "state", "type"], 0.2, "Checked-state variant"),
                SignalRule::geometric(0.2, "Small square bounds", |n| {
                    let b = &n.bounds;
                    b.width > 0.0 && (b.width - b.height).abs() <= 1.0 && b.width <= 32.0
                }),
            ],
        ),
        CandidateSpec::new(
            ComponentType::Slider,
            vec![
                SignalRule::name_any(&["slider"], 0.6, "Name suggests slider"),
                SignalRule::structural(0.2, "Thumb or track child", |n| {
                    n.has_descendant_named("thumb") || n.has_descendant_named("track")
                }),
                SignalRule::geometric(0.2, "Wide flat bounds", |n| {
                    n.bounds.aspect_ratio() >= 3.0 && n.bounds.height <= 32.0
                }),
            ],
        ),
        CandidateSpec::new(
            ComponentType::Select,
            vec![
                SignalRule::name_any(
                    &["select", "dropdown", "combobox"],
                    0.6,
                    "Name suggests select",
                ),
                SignalRule::structural(0.2, "Chevron indicator child", |n| {
                    n.has_descendant_named("chevron")
                        || n.has_descendant_named("caret")
                        || n.has_descendant_named("arrow")
                }),
                SignalRule::structural(0.1, "Contains text", |n| n.has_text_descendant()),
                SignalRule::geometric(0.1, "Wide short bounds", |n| {
                    n.bounds.aspect_ratio() >= 2.0 && n.bounds.height <= 64.0
                }),
            ],
        )
        .excluding(vec![ExclusionRule::name_any(
            &["item", "option"],
            "Menu items are slot children, not standalone selects",
        )])
        .precedes(&[ComponentType::Input, ComponentType::Button]),
        CandidateSpec::new(
            ComponentType::Dialog,
            vec![
                SignalRule::name_any(
                    &["dialog", "modal", "alert", "sheet"],
                    0.7,
                    "Name suggests dialog",
                ),
                SignalRule::structural(0.2, "Dialog chrome children", |n| {
                    n.has_child_named("title")
                        || n.has_child_named("content")
                        || n.has_child_named("footer")
                }),
                SignalRule::geometric(0.1, "Surface-sized bounds", |n| {
                    n.bounds.width >= 300.0 && n.bounds.height >= 200.0
                }),
            ],
        ),
        CandidateSpec::new(
            ComponentType::Textarea,
            vec![
                SignalRule::name_any(&["textarea", "text area"], 0.7, "Name suggests textarea"),
                SignalRule::geometric(0.1, "Tall input bounds", |n| n.bounds.height >= 60.0),
                SignalRule::structural(0.1, "Contains text", |n| n.has_text_descendant()),
            ],
        )
        .precedes(&[ComponentType::Input]),
        CandidateSpec::new(
            ComponentType::Input,
            vec![
                SignalRule::name_any(
                    &["input", "text field", "textfield"],
                    0.6,
                    "Name suggests input",
                ),
                SignalRule::geometric(0.2, "Wide short bounds", |n| {
                    n.bounds.aspect_ratio() >= 2.0
                        && n.bounds.height > 0.0
                        && n.bounds.height <= 64.0
                }),
                SignalRule::structural(0.1, "Contains text", |n| n.has_text_descendant()),
                SignalRule::variant_key(&["state"], 0.1, "State variant"),
            ],
        )
        .precedes(&[ComponentType::Field]),
        CandidateSpec::new(
            ComponentType::Field,
            vec![
                SignalRule::name_any(&["field", "form field"], 0.6, "Name suggests form field"),
                SignalRule::structural(0.2, "Label plus control children", |n| {
                    n.has_child_named("label")
                        && (n.has_child_named("input") || n.has_child_named("control"))
                }),
                SignalRule::structural(0.1, "Contains text", |n| n.has_text_descendant()),
            ],
        )
        .precedes(&[ComponentType::Form]),
        CandidateSpec::new(
            ComponentType::Form,
            vec![
                SignalRule::name_any(&["form"], 0.6, "Name suggests form"),
                SignalRule::structural(0.2, "Multiple field children", |n| {
                    n.children
                        .iter()
                        .filter(|c| {
                            c.name_contains("field")
                                || c.name_contains("input")
                                || c.name_contains("select")
                        })
                        .count()
                        >= 2
                }),
                SignalRule::structural(0.2, "Submit action child", |n| {
                    n.has_descendant_named("submit")
                        || n.has_descendant_named("save")
                        || n.has_descendant_named("send")
                }),
            ],
        ),
        CandidateSpec::new(
            ComponentType::Button,
            vec![
                SignalRule::name_any(&["button", "btn", "cta"], 0.5, "Name suggests button"),
                SignalRule::structural(0.2, "Contains label text", |n| n.has_text_descendant()),
                SignalRule::geometric(0.2, "Rounded wide bounds", |n| {
                    let ratio = n.bounds.aspect_ratio();
                    n.is_rounded() && (1.5..=6.0).contains(&ratio)
                }),
                SignalRule::variant_key(&["variant", "size", "state"], 0.1, "Button variant"),
            ],
        ),
        CandidateSpec::new(
            ComponentType::Card,
            vec![
                SignalRule::name_any(&["card"], 0.6, "Name suggests card"),
                SignalRule::structural(0.2, "Content-bearing children", |n| {
                    n.child_count() >= 2 && n.has_text_descendant()
                }),
                SignalRule::geometric(0.1, "Rounded surface bounds", |n| {
                    n.is_rounded() && n.bounds.width >= 100.0 && n.bounds.height >= 100.0
                }),
            ],
        ),
        CandidateSpec::new(
            ComponentType::Avatar,
            vec![
                SignalRule::name_any(
                    &["avatar", "profile picture", "profile pic"],
                    0.6,
                    "Name suggests avatar",
                ),
                SignalRule::geometric(0.2, "Circular bounds", |n| n.is_circular()),
                SignalRule::structural(0.2, "Has image fill", |n| n.has_image_fill()),
            ],
        ),
        CandidateSpec::new(
            ComponentType::Badge,
            vec![
                SignalRule::name_any(&["badge", "tag", "chip"], 0.6, "Name suggests badge"),
                SignalRule::geometric(0.2, "Small pill bounds", |n| {
                    n.is_pill() && n.bounds.height <= 32.0
                }),
                SignalRule::structural(0.1, "Contains text", |n| n.has_text_descendant()),
            ],
        ),
        CandidateSpec::new(
            ComponentType::Image,
            vec![
                SignalRule::name_any(
                    &["image", "img", "picture", "photo"],
                    0.5,
                    "Name suggests image",
                ),
                SignalRule::structural(0.5, "Has image fill", |n| n.has_image_fill()),
            ],
        ),
    ]
}
