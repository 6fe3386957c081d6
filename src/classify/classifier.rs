use std::sync::OnceLock;

use crate::classify::classify_model::ClassificationResult;
use crate::classify::registry::ClassifierRegistry;
use crate::classify::rules::CandidateSpec;
use crate::node::node_model::DesignNode;

static DEFAULT_REGISTRY: OnceLock<ClassifierRegistry> = OnceLock::new();

/// Classify a node against the built-in candidate registry.
///
/// Pure, deterministic, and total: every node gets a result, with
/// `ComponentType::Unknown` at confidence 0.0 when nothing clears the floor.
pub fn classify(node: &DesignNode) -> ClassificationResult {
    classify_with(DEFAULT_REGISTRY.get_or_init(ClassifierRegistry::default), node)
}

/// Classify a node against an explicit registry.
///
/// Candidates are scored in declaration order. Each firing rule contributes
/// its weight; the sum is capped at 1.0. A later candidate replaces the
/// current best only on a strictly higher score, so ties go to the
/// earlier-declared type and compound types outrank their parts by position.
pub fn classify_with(registry: &ClassifierRegistry, node: &DesignNode) -> ClassificationResult {
    let mut best = ClassificationResult::unknown();

    for candidate in registry.candidates() {
        if candidate.is_excluded(node) {
            continue;
        }

        let (confidence, reasons) = score_candidate(candidate, node);
        if confidence > best.confidence {
            best = ClassificationResult {
                component: candidate.component,
                confidence,
                reasons,
            };
        }
    }

    if best.confidence < registry.min_confidence {
        return ClassificationResult::unknown();
    }

    best
}

fn score_candidate(candidate: &CandidateSpec, node: &DesignNode) -> (f32, Vec<String>) {
    let mut confidence: f32 = 0.0;
    let mut reasons = Vec::new();

    for rule in &candidate.rules {
        if rule.fires(node) {
            confidence += rule.weight;
            reasons.push(rule.reason.clone());
        }
    }

    (confidence.clamp(0.0, 1.0), reasons)
}
