use crate::report::report_model::DetectionReport;

// ============================================================================
// Console reporter — formatted terminal output
// ============================================================================

/// Format a detection report for terminal output.
///
/// Produces output like:
/// ```text
/// === Detection: design.json ===
///
/// ✓ Switch 1.00  Switch: Active=On, Type=Box
///   ? Unknown     Decoration
/// ✓ ToggleGroup 0.70  Toolbar
///     [WARN] Required slot 'Item' matched no child of 'Toolbar'
///
/// === Results: 2 matched, 1 unknown (3 nodes) ===
/// ```
pub fn format_console_report(report: &DetectionReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Detection: {} ===\n\n", report.source));

    for detection in &report.detections {
        let indent = "  ".repeat(detection.path.len());
        let classification = &detection.detection.classification;

        if classification.is_unknown() {
            out.push_str(&format!("{}? Unknown     {}\n", indent, detection.name));
        } else {
            out.push_str(&format!(
                "{}\u{2713} {} {:.2}  {}\n",
                indent, classification.component, classification.confidence, detection.name
            ));
        }

        if let Some(mapping) = &detection.detection.slots {
            for assignment in &mapping.assignments {
                out.push_str(&format!(
                    "{}    [{}] {} ({:.2})\n",
                    indent, assignment.slot, assignment.node_name, assignment.confidence
                ));
            }
            for warning in &mapping.warnings {
                out.push_str(&format!("{}    [WARN] {}\n", indent, warning));
            }
        }
    }

    out.push_str(&format!(
        "\n=== Results: {} matched, {} unknown ({} nodes)",
        report.matched, report.unknown, report.total_nodes
    ));

    if report.slot_warnings > 0 {
        out.push_str(&format!(", {} slot warnings", report.slot_warnings));
    }

    out.push_str(" ===\n");

    out
}
