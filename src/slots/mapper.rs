use crate::classify::classify_model::ComponentType;
use crate::node::node_model::DesignNode;
use crate::slots::schema::SlotSchema;
use crate::slots::slot_model::{SlotAssignment, SlotMapping};

/// Assign children of a matched compound component to the schema's named
/// slots. Pure and deterministic.
///
/// Every considered child is scored against every slot and lands in the
/// highest-scoring slot that clears that slot's floor; equal scores resolve
/// to the earlier-declared slot. Slots that allow multiple children collect
/// them in document order; single slots keep the best-scoring child, with
/// ties favoring the earliest child.
pub fn map_slots(node: &DesignNode, component: ComponentType, schema: &SlotSchema) -> SlotMapping {
    let candidates = collect_candidates(node, schema.deep);
    let count = candidates.len();

    // Assignments per slot, in child document order.
    let mut per_slot: Vec<Vec<SlotAssignment>> = schema.slots.iter().map(|_| Vec::new()).collect();

    for (index, (path, child)) in candidates.iter().enumerate() {
        let mut best: Option<(usize, f32, Vec<String>)> = None;

        for (slot_index, spec) in schema.slots.iter().enumerate() {
            let (score, reasons) = spec.score(child, index, count);
            if score < spec.min_confidence {
                continue;
            }
            let replace = match &best {
                Some((_, best_score, _)) => score > *best_score,
                None => true,
            };
            if replace {
                best = Some((slot_index, score, reasons));
            }
        }

        if let Some((slot_index, score, reasons)) = best {
            per_slot[slot_index].push(SlotAssignment {
                slot: schema.slots[slot_index].name.clone(),
                path: path.clone(),
                node_name: child.name.clone(),
                confidence: score,
                reasons,
            });
        }
    }

    // Single slots keep only their best-scoring child; the first occurrence
    // of the maximum wins, which is the earliest child in document order.
    for (slot_index, spec) in schema.slots.iter().enumerate() {
        if spec.allows_multiple || per_slot[slot_index].len() <= 1 {
            continue;
        }
        let mut best_index = 0;
        for (i, assignment) in per_slot[slot_index].iter().enumerate() {
            if assignment.confidence > per_slot[slot_index][best_index].confidence {
                best_index = i;
            }
        }
        let kept = per_slot[slot_index].swap_remove(best_index);
        per_slot[slot_index] = vec![kept];
    }

    let mut warnings = Vec::new();
    for (slot_index, spec) in schema.slots.iter().enumerate() {
        if spec.required && per_slot[slot_index].is_empty() {
            warnings.push(format!(
                "Required slot '{}' matched no child of '{}'",
                spec.name, node.name
            ));
        }
    }

    // Overall confidence: mean over assigned slots only. A partial mapping
    // keeps the confidence of what WAS assigned rather than collapsing to 0.
    let slot_means: Vec<f32> = per_slot
        .iter()
        .filter(|assignments| !assignments.is_empty())
        .map(|assignments| {
            assignments.iter().map(|a| a.confidence).sum::<f32>() / assignments.len() as f32
        })
        .collect();
    let overall_confidence = if slot_means.is_empty() {
        0.0
    } else {
        (slot_means.iter().sum::<f32>() / slot_means.len() as f32).clamp(0.0, 1.0)
    };

    SlotMapping {
        component,
        assignments: per_slot.into_iter().flatten().collect(),
        warnings,
        overall_confidence,
    }
}

/// Children considered for slot assignment: direct children, or every
/// descendant in document (preorder) order when the schema is deep. Paths are
/// index chains from the mapped parent.
fn collect_candidates(node: &DesignNode, deep: bool) -> Vec<(Vec<usize>, &DesignNode)> {
    let mut out = Vec::new();
    if deep {
        fn walk<'a>(
            node: &'a DesignNode,
            prefix: &mut Vec<usize>,
            out: &mut Vec<(Vec<usize>, &'a DesignNode)>,
        ) {
            for (i, child) in node.children.iter().enumerate() {
                prefix.push(i);
                out.push((prefix.clone(), child));
                walk(child, prefix, out);
                prefix.pop();
            }
        }
        walk(node, &mut Vec::new(), &mut out);
    } else {
        for (i, child) in node.children.iter().enumerate() {
            out.push((vec![i], child));
        }
    }
    out
}
