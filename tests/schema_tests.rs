use component_detection::classify::classify_model::ComponentType;
use component_detection::map_slots;
use component_detection::node::node_model::NodeKind;
use component_detection::slots::registry::SchemaRegistry;
use component_detection::slots::schema::{SlotRule, SlotSchema, SlotSpec};

mod common;
use common::utils::{frame, instance};

// =========================================================================
// YAML serialization of slot schemas
// =========================================================================

#[test]
fn schema_round_trips_through_yaml() {
    let schema = SlotSchema {
        component: ComponentType::Tabs,
        deep: false,
        slots: vec![SlotSpec {
            name: "Trigger".to_string(),
            required: true,
            allows_multiple: true,
            min_confidence: 0.5,
            rules: vec![
                SlotRule::NameContains {
                    needles: vec!["tab".to_string()],
                    weight: 0.5,
                },
                SlotRule::ContainsText { weight: 0.2 },
            ],
        }],
    };

    let yaml = serde_yaml::to_string(&schema).expect("serialize");
    let parsed: SlotSchema = serde_yaml::from_str(&yaml).expect("parse");
    assert_eq!(schema, parsed, "YAML round trip preserves the schema");
}

#[test]
fn hand_written_yaml_parses_with_defaults() {
    let yaml = r#"
component: Select
deep: true
slots:
  - name: Trigger
    required: true
    rules:
      - kind: name_contains
        needles: ["trigger"]
        weight: 0.6
      - kind: position
        at: first
        weight: 0.2
  - name: Item
    allows_multiple: true
    rules:
      - kind: kind_in
        kinds: [instance, frame]
        weight: 0.3
      - kind: container
        weight: 0.3
"#;

    let schema: SlotSchema = serde_yaml::from_str(yaml).expect("parse");
    assert_eq!(schema.component, ComponentType::Select);
    assert!(schema.deep);

    let trigger = &schema.slots[0];
    assert!(trigger.required);
    assert!(!trigger.allows_multiple, "Defaults to single");
    assert_eq!(trigger.min_confidence, 0.5, "Floor defaults to 0.5");

    let item = &schema.slots[1];
    assert!(item.allows_multiple);
    assert!(matches!(
        item.rules[0],
        SlotRule::KindIn { ref kinds, .. } if *kinds == [NodeKind::Instance, NodeKind::Frame]
    ));
}

// =========================================================================
// Directory loading layers over the built-ins
// =========================================================================

#[test]
fn extend_from_dir_overrides_builtin_schema() {
    let dir = std::env::temp_dir().join(format!(
        "component-detection-schemas-{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create schema dir");

    let yaml = r#"
component: ToggleGroup
slots:
  - name: Segment
    required: true
    allows_multiple: true
    rules:
      - kind: container
        weight: 0.6
"#;
    std::fs::write(dir.join("toggle_group.yaml"), yaml).expect("write schema");

    let mut registry = SchemaRegistry::default();
    let loaded = registry
        .extend_from_dir(dir.to_str().expect("utf-8 temp path"))
        .expect("load");
    assert_eq!(loaded, 1);

    let schema = registry
        .for_component(ComponentType::ToggleGroup)
        .expect("override registered");
    assert_eq!(schema.slots[0].name, "Segment", "Override replaced the built-in");

    // And the override drives mapping
    let group = frame("Toggle Group", vec![instance("Left"), instance("Right")]);
    let mapping = map_slots(&group, ComponentType::ToggleGroup, schema);
    assert_eq!(mapping.assignments_for("Segment").len(), 2);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn non_schema_files_are_ignored() {
    let dir = std::env::temp_dir().join(format!(
        "component-detection-mixed-{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create dir");
    std::fs::write(dir.join("notes.txt"), "not yaml").expect("write");

    let mut registry = SchemaRegistry::empty();
    let loaded = registry.extend_from_dir(dir.to_str().expect("utf-8 temp path")).expect("load");
    assert_eq!(loaded, 0);
    assert!(registry.schemas().is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}
