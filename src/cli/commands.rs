use crate::Pipeline;
use crate::cache::hash::compute_hash;
use crate::cache::store::{CacheEntry, CacheStore, FileStore};
use crate::classify::registry::ClassifierRegistry;
use crate::cli::config::AppConfig;
use crate::node::node_model::DesignNode;
use crate::report::console::format_console_report;
use crate::report::markdown::generate_markdown_report;
use crate::report::report_model::DetectionReport;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::DetectEvent;

// ============================================================================
// classify subcommand
// ============================================================================

pub fn cmd_classify(
    input: &str,
    format: &str,
    output: Option<&str>,
    schema_dir: Option<&str>,
    min_confidence: Option<f32>,
    no_cache: bool,
    cache_dir: Option<&str>,
    config: &AppConfig,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(input)?;
    let tree: DesignNode = serde_json::from_slice(&bytes)?;

    let floor = min_confidence.unwrap_or(config.classify.min_confidence);
    let mut pipeline = Pipeline::new()
        .with_registry(ClassifierRegistry::default().with_min_confidence(floor));

    let schema_dir = schema_dir.or(config.schemas.dir.as_deref());
    if let Some(dir) = schema_dir {
        let loaded = pipeline.schemas_mut().extend_from_dir(dir)?;
        if verbose > 0 {
            eprintln!("Loaded {} schema overrides from {}", loaded, dir);
        }
    }

    let cache_enabled = !no_cache && config.cache.enabled;
    let store = cache_dir
        .map(FileStore::new)
        .unwrap_or_else(|| FileStore::new(config.cache.dir.clone()));

    // The whole-tree report is cached under the input file's content hash;
    // any byte-level edit to the file misses and recomputes.
    let hash = compute_hash(&bytes);
    let (report, cache_outcome) = if cache_enabled {
        cached_report(&pipeline, &tree, input, &hash, &store, verbose)
    } else {
        let report = DetectionReport::from_detections(input, pipeline.detect_tree(&tree));
        (report, None)
    };

    if let Some(trace_path) = &config.trace.path {
        write_trace(trace_path, &report, cache_outcome);
    }

    if verbose > 0 {
        eprintln!(
            "Classified {} nodes ({} matched)",
            report.total_nodes, report.matched
        );
    }

    let output_content = match format {
        "json" => serde_json::to_string_pretty(&report)?,
        "markdown" => generate_markdown_report(&report),
        _ => format_console_report(&report),
    };

    match output {
        Some(path) => std::fs::write(path, &output_content)?,
        None => print!("{}", output_content),
    }

    Ok(())
}

/// Look the report up by file hash; recompute and store on any miss or cache
/// failure. Cache trouble is warned about, never propagated.
fn cached_report(
    pipeline: &Pipeline,
    tree: &DesignNode,
    source: &str,
    hash: &str,
    store: &FileStore,
    verbose: u8,
) -> (DetectionReport, Option<&'static str>) {
    match store.lookup(hash) {
        Ok(Some(entry)) => match serde_json::from_value::<DetectionReport>(entry.payload) {
            Ok(report) => {
                if verbose > 0 {
                    eprintln!("Cache hit for {}", source);
                }
                return (report, Some("hit"));
            }
            Err(e) => {
                eprintln!("Warning: discarding undecodable cache entry {}: {}", hash, e);
            }
        },
        Ok(None) => {}
        Err(e) => {
            eprintln!("Warning: cache lookup failed: {}", e);
        }
    }

    let report = DetectionReport::from_detections(source, pipeline.detect_tree(tree));

    match serde_json::to_value(&report) {
        Ok(payload) => {
            if let Err(e) = store.store(CacheEntry::new(hash.to_string(), payload)) {
                eprintln!("Warning: cache store failed: {}", e);
            }
        }
        Err(e) => {
            eprintln!("Warning: could not encode report for caching: {}", e);
        }
    }

    (report, Some("miss"))
}

fn write_trace(path: &str, report: &DetectionReport, cache_outcome: Option<&str>) {
    let logger = TraceLogger::new(path);
    for detection in &report.detections {
        let mut event = DetectEvent::now(&detection.name, &detection.detection.classification);
        if let Some(outcome) = cache_outcome {
            event = event.with_cache(outcome);
        }
        if let Some(mapping) = &detection.detection.slots {
            event = event.with_slots(mapping);
        }
        logger.log(&event);
    }
}

// ============================================================================
// hash subcommand
// ============================================================================

pub fn cmd_hash(input: &str) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(input)?;
    println!("{}", compute_hash(&bytes));
    Ok(())
}

// ============================================================================
// cache-clear subcommand
// ============================================================================

pub fn cmd_cache_clear(
    cache_dir: Option<&str>,
    config: &AppConfig,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = cache_dir.unwrap_or(&config.cache.dir);
    let store = FileStore::new(dir);
    store.clear_all()?;
    if verbose > 0 {
        eprintln!("Cleared cache at {}", dir);
    }
    Ok(())
}
