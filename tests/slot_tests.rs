use component_detection::Pipeline;
use component_detection::classify::classify_model::ComponentType;
use component_detection::map_slots;
use component_detection::slots::registry::SchemaRegistry;

mod common;
use common::utils::{frame, instance, text};

fn schema_for(component: ComponentType) -> component_detection::slots::schema::SlotSchema {
    SchemaRegistry::default()
        .for_component(component)
        .cloned()
        .unwrap_or_else(|| panic!("missing default schema for {}", component))
}

// =========================================================================
// Toggle group regression: positional child names with no keywords
// =========================================================================

#[test]
fn toggle_group_assigns_all_positional_children_to_item() {
    let group = frame(
        "Toggle Group",
        vec![instance("Left"), instance("Center"), instance("Right")],
    );

    let schema = schema_for(ComponentType::ToggleGroup);
    let mapping = map_slots(&group, ComponentType::ToggleGroup, &schema);

    let items = mapping.assignments_for("Item");
    assert_eq!(
        items.len(),
        3,
        "Generic positional names must still fill the Item slot: {:?}",
        mapping
    );

    let names: Vec<&str> = items.iter().map(|a| a.node_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Left", "Center", "Right"],
        "Document order must be preserved"
    );
    assert!(mapping.warnings.is_empty(), "Nothing required is missing");
}

#[test]
fn toggle_group_overall_confidence_is_mean_of_assigned_slots() {
    let group = frame(
        "Toggle Group",
        vec![instance("Left"), instance("Center"), instance("Right")],
    );

    let schema = schema_for(ComponentType::ToggleGroup);
    let mapping = map_slots(&group, ComponentType::ToggleGroup, &schema);

    // Each item scores 0.5 from the container fallback alone
    assert!(
        (mapping.overall_confidence - 0.5).abs() < 1e-6,
        "Expected 0.5, got {}",
        mapping.overall_confidence
    );
}

// =========================================================================
// Required slots and partial mappings
// =========================================================================

#[test]
fn missing_required_slot_warns_but_mapping_survives() {
    // Field with a label but no control
    let field = frame("Field", vec![text("Label", "Email")]);

    let schema = schema_for(ComponentType::Field);
    let mapping = map_slots(&field, ComponentType::Field, &schema);

    assert_eq!(mapping.assignments_for("Label").len(), 1);
    assert!(mapping.assignments_for("Control").is_empty());

    assert_eq!(mapping.warnings.len(), 1, "One required slot missing");
    assert!(
        mapping.warnings[0].contains("Control"),
        "Warning names the missing slot: {}",
        mapping.warnings[0]
    );

    // Overall confidence reflects the assigned Label slot, not zero
    assert!(
        mapping.overall_confidence > 0.8,
        "Partial mapping keeps the confidence of what matched, got {}",
        mapping.overall_confidence
    );
}

#[test]
fn empty_node_yields_zero_confidence_and_required_warnings() {
    let empty = frame("Toggle Group", vec![]);

    let schema = schema_for(ComponentType::ToggleGroup);
    let mapping = map_slots(&empty, ComponentType::ToggleGroup, &schema);

    assert_eq!(mapping.overall_confidence, 0.0);
    assert_eq!(mapping.warnings.len(), 1);
}

// =========================================================================
// Single slots keep the best child; ties favor the earliest
// =========================================================================

#[test]
fn single_slot_keeps_earliest_on_tie() {
    let dialog = frame(
        "Dialog",
        vec![text("Title One", "Hello"), text("Title Two", "World")],
    );

    let schema = schema_for(ComponentType::Dialog);
    let mapping = map_slots(&dialog, ComponentType::Dialog, &schema);

    let titles = mapping.assignments_for("Title");
    assert_eq!(titles.len(), 1, "Title does not allow multiple children");
    assert_eq!(
        titles[0].node_name, "Title One",
        "Equal scores keep the earliest child in document order"
    );
}

// =========================================================================
// Deep schemas descend into nested content
// =========================================================================

#[test]
fn select_deep_schema_collects_nested_items() {
    let select = frame(
        "Select",
        vec![
            frame("Trigger", vec![text("Value", "Pick one")]),
            frame("Menu", vec![instance("Item 1"), instance("Item 2")]),
        ],
    );

    let schema = schema_for(ComponentType::Select);
    assert!(schema.deep, "Select schema must descend into the menu");

    let mapping = map_slots(&select, ComponentType::Select, &schema);

    assert_eq!(mapping.assignments_for("Trigger").len(), 1);
    assert_eq!(mapping.assignments_for("Trigger")[0].node_name, "Trigger");
    assert_eq!(mapping.assignments_for("Content").len(), 1);
    assert_eq!(mapping.assignments_for("Content")[0].node_name, "Menu");

    let items = mapping.assignments_for("Item");
    assert_eq!(items.len(), 2, "Nested menu items are collected: {:?}", mapping);
    assert_eq!(items[0].path, vec![1, 0], "Paths address nodes from the parent");
}

// =========================================================================
// Pipeline integration: classification feeds slot mapping
// =========================================================================

#[test]
fn detect_attaches_slots_for_compound_types() {
    let pipeline = Pipeline::new();

    let group = frame(
        "Toggle Group",
        vec![instance("Left"), instance("Center"), instance("Right")],
    );
    let detection = pipeline.detect(&group);

    assert_eq!(detection.classification.component, ComponentType::ToggleGroup);
    let mapping = detection.slots.expect("compound type must carry a mapping");
    assert_eq!(mapping.assignments_for("Item").len(), 3);
}

#[test]
fn detect_leaves_simple_types_without_slots() {
    let pipeline = Pipeline::new();
    let detection = pipeline.detect(&instance("Button"));

    assert_eq!(detection.classification.component, ComponentType::Button);
    assert!(detection.slots.is_none(), "Button has no slot schema");
}

#[test]
fn excluded_menu_item_is_consumed_as_slot_child() {
    let pipeline = Pipeline::new();
    let select = frame(
        "Select",
        vec![
            frame("Trigger", vec![text("Value", "Pick one")]),
            frame("Menu", vec![instance("Select Menu / Item")]),
        ],
    );

    let detections = pipeline.detect_tree(&select);

    // The item node itself stays Unknown...
    let item = detections
        .iter()
        .find(|d| d.name == "Select Menu / Item")
        .expect("item node visited");
    assert_eq!(item.detection.classification.component, ComponentType::Unknown);

    // ...but the parent's mapping claims it as an Item
    let root = &detections[0];
    let mapping = root.detection.slots.as_ref().expect("select mapping");
    assert_eq!(mapping.assignments_for("Item").len(), 1);
    assert_eq!(
        mapping.assignments_for("Item")[0].node_name,
        "Select Menu / Item"
    );
}
