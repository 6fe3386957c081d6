use crate::classify::classify_model::ComponentType;
use crate::node::node_model::NodeKind;
use crate::slots::schema::{SlotPosition, SlotRule, SlotSchema, SlotSpec};

// ============================================================================
// Schema registry — built-in defaults plus YAML-authored overrides
// ============================================================================

pub struct SchemaRegistry {
    schemas: Vec<SlotSchema>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self {
            schemas: builtin_schemas(),
        }
    }
}

impl SchemaRegistry {
    pub fn empty() -> Self {
        Self { schemas: Vec::new() }
    }

    pub fn schemas(&self) -> &[SlotSchema] {
        &self.schemas
    }

    pub fn for_component(&self, component: ComponentType) -> Option<&SlotSchema> {
        self.schemas.iter().find(|s| s.component == component)
    }

    /// Register a schema, replacing any existing schema for the same
    /// component type. Last registration wins.
    pub fn register(&mut self, schema: SlotSchema) {
        self.schemas.retain(|s| s.component != schema.component);
        self.schemas.push(schema);
    }

    /// Load every `.yaml`/`.yml` schema in a directory and register it over
    /// the defaults. Files are visited in name order for determinism.
    pub fn extend_from_dir(&mut self, dir: &str) -> Result<usize, Box<dyn std::error::Error>> {
        let mut paths: Vec<std::path::PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().map_or(false, |e| e == "yaml" || e == "yml"))
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            let content = std::fs::read_to_string(&path)?;
            let schema: SlotSchema = serde_yaml::from_str(&content)?;
            self.register(schema);
            loaded += 1;
        }
        Ok(loaded)
    }
}

fn name_rule(needles: &[&str], weight: f32) -> SlotRule {
    SlotRule::NameContains {
        needles: needles.iter().map(|s| s.to_string()).collect(),
        weight,
    }
}

fn slot(name: &str, rules: Vec<SlotRule>) -> SlotSpec {
    SlotSpec {
        name: name.to_string(),
        required: false,
        allows_multiple: false,
        min_confidence: 0.5,
        rules,
    }
}

fn required(mut spec: SlotSpec) -> SlotSpec {
    spec.required = true;
    spec
}

fn multiple(mut spec: SlotSpec) -> SlotSpec {
    spec.allows_multiple = true;
    spec
}

fn builtin_schemas() -> Vec<SlotSchema> {
    vec![
        SlotSchema {
            component: ComponentType::Select,
            deep: true,
            slots: vec![
                required(slot(
                    "Trigger",
                    vec![
                        name_rule(&["trigger", "value", "selected"], 0.5),
                        SlotRule::Position {
                            at: SlotPosition::First,
                            weight: 0.2,
                        },
                        SlotRule::ContainsText { weight: 0.2 },
                    ],
                )),
                slot(
                    "Content",
                    vec![
                        name_rule(&["content", "menu", "popover", "list"], 0.6),
                        SlotRule::Container { weight: 0.2 },
                        // A menu ITEM mentioning "menu" is not the menu itself
                        SlotRule::NameExcludes {
                            needles: vec!["item".to_string(), "option".to_string()],
                        },
                    ],
                ),
                multiple(slot(
                    "Item",
                    vec![
                        name_rule(&["item", "option"], 0.6),
                        SlotRule::Container { weight: 0.1 },
                    ],
                )),
            ],
        },
        SlotSchema {
            component: ComponentType::ToggleGroup,
            deep: false,
            slots: vec![required(multiple(slot(
                "Item",
                vec![
                    name_rule(&["item", "toggle", "option", "segment"], 0.4),
                    SlotRule::Container { weight: 0.5 },
                ],
            )))],
        },
        SlotSchema {
            component: ComponentType::Tabs,
            deep: false,
            slots: vec![
                required(multiple(slot(
                    "Trigger",
                    vec![
                        name_rule(&["tab", "trigger"], 0.5),
                        SlotRule::ContainsText { weight: 0.2 },
                    ],
                ))),
                slot(
                    "Content",
                    vec![
                        name_rule(&["content", "panel"], 0.6),
                        SlotRule::Container { weight: 0.2 },
                    ],
                ),
            ],
        },
        SlotSchema {
            component: ComponentType::Dialog,
            deep: false,
            slots: vec![
                slot(
                    "Title",
                    vec![
                        name_rule(&["title", "header", "heading"], 0.5),
                        SlotRule::ContainsText { weight: 0.2 },
                    ],
                ),
                slot(
                    "Content",
                    vec![
                        name_rule(&["content", "body", "description"], 0.5),
                        SlotRule::Container { weight: 0.2 },
                    ],
                ),
                slot(
                    "Actions",
                    vec![
                        name_rule(&["footer", "actions", "buttons"], 0.5),
                        SlotRule::Position {
                            at: SlotPosition::Last,
                            weight: 0.2,
                        },
                    ],
                ),
                slot(
                    "Close",
                    vec![
                        name_rule(&["close", "dismiss"], 0.6),
                        SlotRule::ContainsIcon { weight: 0.2 },
                    ],
                ),
            ],
        },
        SlotSchema {
            component: ComponentType::Card,
            deep: false,
            slots: vec![
                slot(
                    "Header",
                    vec![
                        name_rule(&["header"], 0.6),
                        SlotRule::Position {
                            at: SlotPosition::First,
                            weight: 0.1,
                        },
                    ],
                ),
                slot(
                    "Title",
                    vec![
                        name_rule(&["title", "heading"], 0.5),
                        SlotRule::ContainsText { weight: 0.2 },
                    ],
                ),
                slot(
                    "Description",
                    vec![
                        name_rule(&["description", "subtitle"], 0.5),
                        SlotRule::KindIn {
                            kinds: vec![NodeKind::Text],
                            weight: 0.2,
                        },
                    ],
                ),
                slot(
                    "Content",
                    vec![
                        name_rule(&["content", "body"], 0.5),
                        SlotRule::Container { weight: 0.2 },
                    ],
                ),
                slot(
                    "Footer",
                    vec![
                        name_rule(&["footer", "actions"], 0.5),
                        SlotRule::Position {
                            at: SlotPosition::Last,
                            weight: 0.2,
                        },
                    ],
                ),
            ],
        },
        SlotSchema {
            component: ComponentType::RadioGroup,
            deep: false,
            slots: vec![required(multiple(slot(
                "Item",
                vec![
                    name_rule(&["radio", "item", "option"], 0.4),
                    SlotRule::Container { weight: 0.5 },
                ],
            )))],
        },
        SlotSchema {
            component: ComponentType::DatePicker,
            deep: true,
            slots: vec![
                required(slot(
                    "Trigger",
                    vec![
                        name_rule(&["input", "field", "trigger", "date"], 0.5),
                        SlotRule::KindIn {
                            kinds: vec![NodeKind::Instance, NodeKind::Frame],
                            weight: 0.2,
                        },
                    ],
                )),
                required(slot(
                    "Calendar",
                    vec![name_rule(&["calendar", "month", "days"], 0.7)],
                )),
            ],
        },
        SlotSchema {
            component: ComponentType::Pagination,
            deep: false,
            slots: vec![
                slot("Previous", vec![name_rule(&["prev", "previous", "back"], 0.7)]),
                slot("Next", vec![name_rule(&["next", "forward"], 0.7)]),
                multiple(slot(
                    "Item",
                    vec![
                        name_rule(&["page", "item", "number"], 0.3),
                        SlotRule::Container { weight: 0.4 },
                        SlotRule::ContainsText { weight: 0.2 },
                    ],
                )),
            ],
        },
        SlotSchema {
            component: ComponentType::Field,
            deep: false,
            slots: vec![
                slot(
                    "Label",
                    vec![
                        name_rule(&["label"], 0.6),
                        SlotRule::KindIn {
                            kinds: vec![NodeKind::Text],
                            weight: 0.3,
                        },
                    ],
                ),
                required(slot(
                    "Control",
                    vec![
                        name_rule(&["input", "control", "field", "select", "textarea"], 0.5),
                        SlotRule::Container { weight: 0.3 },
                    ],
                )),
                slot(
                    "Description",
                    vec![
                        name_rule(&["description", "hint", "help", "error"], 0.6),
                        SlotRule::KindIn {
                            kinds: vec![NodeKind::Text],
                            weight: 0.2,
                        },
                    ],
                ),
            ],
        },
        SlotSchema {
            component: ComponentType::Form,
            deep: false,
            slots: vec![
                multiple(slot(
                    "Field",
                    vec![
                        name_rule(&["field", "input", "textarea", "select"], 0.5),
                        SlotRule::Container { weight: 0.2 },
                    ],
                )),
                slot(
                    "Submit",
                    vec![
                        name_rule(&["submit", "button", "save", "send", "cta"], 0.5),
                        SlotRule::ContainsText { weight: 0.2 },
                    ],
                ),
            ],
        },
        SlotSchema {
            component: ComponentType::Sidebar,
            deep: false,
            slots: vec![
                slot(
                    "Header",
                    vec![
                        name_rule(&["header", "logo", "brand"], 0.5),
                        SlotRule::Position {
                            at: SlotPosition::First,
                            weight: 0.2,
                        },
                    ],
                ),
                required(multiple(slot(
                    "Item",
                    vec![
                        name_rule(&["item", "link", "nav"], 0.4),
                        SlotRule::Container { weight: 0.5 },
                        SlotRule::NameExcludes {
                            needles: vec!["header".to_string(), "footer".to_string()],
                        },
                    ],
                ))),
                slot(
                    "Footer",
                    vec![
                        name_rule(&["footer", "user", "profile"], 0.5),
                        SlotRule::Position {
                            at: SlotPosition::Last,
                            weight: 0.2,
                        },
                    ],
                ),
            ],
        },
    ]
}
