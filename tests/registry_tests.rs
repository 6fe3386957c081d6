use component_detection::classify::classify_model::ComponentType;
use component_detection::classify::registry::{ClassifierRegistry, DEFAULT_MIN_CONFIDENCE};
use component_detection::classify::classifier::classify_with;
use component_detection::classify::rules::{CandidateSpec, ExclusionRule, SignalKind, SignalRule};
use component_detection::slots::registry::SchemaRegistry;

mod common;
use common::utils::{instance, with_bounds};

// =========================================================================
// Priority-order invariants
// =========================================================================

#[test]
fn default_registry_has_no_precedence_violations() {
    let registry = ClassifierRegistry::default();
    let violations = registry.precedence_violations();
    assert!(
        violations.is_empty(),
        "Priority list is inconsistent: {:?}",
        violations
    );
}

#[test]
fn compound_types_are_declared_before_their_parts() {
    let registry = ClassifierRegistry::default();
    let position = |component: ComponentType| {
        registry
            .candidates()
            .iter()
            .position(|c| c.component == component)
            .unwrap_or_else(|| panic!("{} missing from registry", component))
    };

    assert!(position(ComponentType::DatePicker) < position(ComponentType::Calendar));
    assert!(position(ComponentType::ToggleGroup) < position(ComponentType::Toggle));
    assert!(position(ComponentType::RadioGroup) < position(ComponentType::Radio));
    assert!(position(ComponentType::Pagination) < position(ComponentType::Button));
    assert!(position(ComponentType::Select) < position(ComponentType::Input));
    assert!(position(ComponentType::Textarea) < position(ComponentType::Input));
}

#[test]
fn broken_ordering_is_reported() {
    let registry = ClassifierRegistry::with_candidates(vec![
        CandidateSpec::new(
            ComponentType::Calendar,
            vec![SignalRule::name_any(&["calendar"], 0.6, "Name suggests calendar")],
        ),
        CandidateSpec::new(
            ComponentType::DatePicker,
            vec![SignalRule::name_any(&["date picker"], 0.7, "Name suggests date picker")],
        )
        .precedes(&[ComponentType::Calendar]),
    ]);

    let violations = registry.precedence_violations();
    assert_eq!(violations.len(), 1);
    assert!(
        violations[0].contains("DatePicker") && violations[0].contains("Calendar"),
        "Violation names both types: {}",
        violations[0]
    );
}

// =========================================================================
// Rule-table sanity
// =========================================================================

#[test]
fn every_candidate_carries_a_name_rule_with_sane_weights() {
    let registry = ClassifierRegistry::default();
    for candidate in registry.candidates() {
        assert!(
            candidate
                .rules
                .iter()
                .any(|r| r.kind == SignalKind::NamePattern),
            "{} has no name-pattern rule",
            candidate.component
        );
        for rule in &candidate.rules {
            assert!(
                rule.weight > 0.0 && rule.weight <= 1.0,
                "{} rule weight {} out of range",
                candidate.component,
                rule.weight
            );
        }
    }
}

#[test]
fn floor_defaults_and_clamps() {
    let registry = ClassifierRegistry::default();
    assert_eq!(registry.min_confidence, DEFAULT_MIN_CONFIDENCE);

    let raised = ClassifierRegistry::default().with_min_confidence(1.5);
    assert_eq!(raised.min_confidence, 1.0, "Floor clamps into [0, 1]");
}

// =========================================================================
// Exclusion predicates in isolation
// =========================================================================

#[test]
fn declared_exclusions_are_testable_per_candidate() {
    let registry = ClassifierRegistry::default();
    let select = registry
        .candidate_for(ComponentType::Select)
        .expect("Select candidate");

    assert!(select.is_excluded(&instance("Select Menu / Item")));
    assert!(select.is_excluded(&instance("Select / Option")));
    assert!(!select.is_excluded(&instance("Select")));

    let toggle = registry
        .candidate_for(ComponentType::Toggle)
        .expect("Toggle candidate");
    assert!(toggle.is_excluded(&instance("Toggle Group")));
    assert!(!toggle.is_excluded(&instance("Toggle")));
}

#[test]
fn custom_exclusion_predicates_veto_candidates() {
    let registry = ClassifierRegistry::with_candidates(vec![
        CandidateSpec::new(
            ComponentType::Button,
            vec![SignalRule::name_any(&["button"], 0.6, "Name suggests button")],
        )
        .excluding(vec![ExclusionRule::when("Zero-sized nodes are artifacts", |n| {
            n.bounds.width == 0.0 && n.bounds.height == 0.0
        })]),
    ]);

    let ghost = classify_with(&registry, &instance("Button"));
    assert_eq!(ghost.component, ComponentType::Unknown, "Vetoed outright");

    let real = classify_with(&registry, &with_bounds(instance("Button"), 120.0, 40.0));
    assert_eq!(real.component, ComponentType::Button);
}

// =========================================================================
// Schema coverage for compound types
// =========================================================================

#[test]
fn compound_types_have_default_slot_schemas() {
    let schemas = SchemaRegistry::default();
    for component in [
        ComponentType::Select,
        ComponentType::ToggleGroup,
        ComponentType::Tabs,
        ComponentType::Dialog,
        ComponentType::Card,
        ComponentType::RadioGroup,
        ComponentType::DatePicker,
        ComponentType::Pagination,
        ComponentType::Field,
        ComponentType::Form,
        ComponentType::Sidebar,
    ] {
        assert!(
            schemas.for_component(component).is_some(),
            "{} is missing a slot schema",
            component
        );
    }
}
