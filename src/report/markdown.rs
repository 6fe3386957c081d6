use crate::report::report_model::DetectionReport;

// ============================================================================
// Markdown reporter — validation-report document
// ============================================================================

/// Generate a standalone markdown validation report.
///
/// Sections:
/// - Summary line with matched/unknown counts
/// - Component-type breakdown table
/// - One section per matched node with its reasons and slot assignments
pub fn generate_markdown_report(report: &DetectionReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("# Component Detection Report — {}\n\n", report.source));

    out.push_str(&format!(
        "**{} nodes** — {} matched, {} unknown, {} slot warnings\n\n",
        report.total_nodes, report.matched, report.unknown, report.slot_warnings
    ));

    if !report.by_component.is_empty() {
        out.push_str("| Component | Count |\n|---|---|\n");
        for entry in &report.by_component {
            out.push_str(&format!("| {} | {} |\n", entry.component, entry.count));
        }
        out.push('\n');
    }

    for detection in &report.detections {
        let classification = &detection.detection.classification;
        if classification.is_unknown() {
            continue;
        }

        out.push_str(&format!(
            "## {} — {} ({:.2})\n\n",
            escape_markdown(&detection.name),
            classification.component,
            classification.confidence
        ));

        if !detection.path.is_empty() {
            let path: Vec<String> = detection.path.iter().map(|i| i.to_string()).collect();
            out.push_str(&format!("Path: `{}`\n\n", path.join(" / ")));
        }

        for reason in &classification.reasons {
            out.push_str(&format!("- {}\n", reason));
        }
        out.push('\n');

        if let Some(mapping) = &detection.detection.slots {
            if !mapping.assignments.is_empty() {
                out.push_str("| Slot | Node | Confidence |\n|---|---|---|\n");
                for assignment in &mapping.assignments {
                    out.push_str(&format!(
                        "| {} | {} | {:.2} |\n",
                        assignment.slot,
                        escape_markdown(&assignment.node_name),
                        assignment.confidence
                    ));
                }
                out.push('\n');
            }
            for warning in &mapping.warnings {
                out.push_str(&format!("> Warning: {}\n", escape_markdown(warning)));
            }
            if !mapping.warnings.is_empty() {
                out.push('\n');
            }
        }
    }

    out
}

/// Escape the characters that would break table cells or emphasis.
fn escape_markdown(text: &str) -> String {
    text.replace('|', "\\|").replace('*', "\\*").replace('_', "\\_")
}
