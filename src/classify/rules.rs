use crate::classify::classify_model::ComponentType;
use crate::node::node_model::DesignNode;

// ============================================================================
// Declarative rule tables — one scoring engine, data per component type
// ============================================================================

pub type Predicate = Box<dyn Fn(&DesignNode) -> bool + Send + Sync>;

/// The four signal families the scorer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    NamePattern,
    VariantPattern,
    Structural,
    Geometric,
}

/// One weighted check against a node. Firing contributes `weight` to the
/// candidate's confidence and `reason` to the result's reason list.
pub struct SignalRule {
    pub kind: SignalKind,
    pub weight: f32,
    pub reason: String,
    check: Predicate,
}

impl SignalRule {
    pub fn fires(&self, node: &DesignNode) -> bool {
        (self.check)(node)
    }

    /// Lower-cased node name contains any of the needles.
    pub fn name_any(needles: &[&str], weight: f32, reason: &str) -> Self {
        let needles: Vec<String> = needles.iter().map(|s| s.to_lowercase()).collect();
        Self {
            kind: SignalKind::NamePattern,
            weight,
            reason: reason.to_string(),
            check: Box::new(move |node| {
                let name = node.lower_name();
                needles.iter().any(|n| name.contains(n.as_str()))
            }),
        }
    }

    /// Name carries any `Key=Value` variant token at all.
    pub fn variant_any(weight: f32, reason: &str) -> Self {
        Self {
            kind: SignalKind::VariantPattern,
            weight,
            reason: reason.to_string(),
            check: Box::new(|node| node.has_variant_tokens()),
        }
    }

    /// Name carries a variant token whose key matches one of `keys`.
    pub fn variant_key(keys: &[&str], weight: f32, reason: &str) -> Self {
        let keys: Vec<String> = keys.iter().map(|s| s.to_lowercase()).collect();
        Self {
            kind: SignalKind::VariantPattern,
            weight,
            reason: reason.to_string(),
            check: Box::new(move |node| {
                let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
                node.has_variant_key(&refs)
            }),
        }
    }

    pub fn structural(
        weight: f32,
        reason: &str,
        check: impl Fn(&DesignNode) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind: SignalKind::Structural,
            weight,
            reason: reason.to_string(),
            check: Box::new(check),
        }
    }

    pub fn geometric(
        weight: f32,
        reason: &str,
        check: impl Fn(&DesignNode) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind: SignalKind::Geometric,
            weight,
            reason: reason.to_string(),
            check: Box::new(check),
        }
    }
}

/// A veto: when it fires, the candidate is skipped outright for this node.
/// Declared as schema data so one-off gates ("Select Menu / Item" is never a
/// standalone Select) are visible and testable in isolation.
pub struct ExclusionRule {
    pub reason: String,
    check: Predicate,
}

impl ExclusionRule {
    pub fn fires(&self, node: &DesignNode) -> bool {
        (self.check)(node)
    }

    pub fn name_any(needles: &[&str], reason: &str) -> Self {
        let needles: Vec<String> = needles.iter().map(|s| s.to_lowercase()).collect();
        Self {
            reason: reason.to_string(),
            check: Box::new(move |node| {
                let name = node.lower_name();
                needles.iter().any(|n| name.contains(n.as_str()))
            }),
        }
    }

    pub fn when(
        reason: &str,
        check: impl Fn(&DesignNode) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            reason: reason.to_string(),
            check: Box::new(check),
        }
    }
}

/// One candidate component type: its rule list, its vetoes, and the types it
/// must be evaluated before (compound before contained).
pub struct CandidateSpec {
    pub component: ComponentType,

    /// Types this candidate must precede in registry order. Violations are
    /// surfaced by `ClassifierRegistry::precedence_violations`.
    pub must_precede: Vec<ComponentType>,

    pub exclusions: Vec<ExclusionRule>,

    pub rules: Vec<SignalRule>,
}

impl CandidateSpec {
    pub fn new(component: ComponentType, rules: Vec<SignalRule>) -> Self {
        Self {
            component,
            must_precede: Vec::new(),
            exclusions: Vec::new(),
            rules,
        }
    }

    pub fn precedes(mut self, types: &[ComponentType]) -> Self {
        self.must_precede.extend_from_slice(types);
        self
    }

    pub fn excluding(mut self, exclusions: Vec<ExclusionRule>) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn is_excluded(&self, node: &DesignNode) -> bool {
        self.exclusions.iter().any(|e| e.fires(node))
    }
}
