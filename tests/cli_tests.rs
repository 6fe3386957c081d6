use component_detection::cli::commands::{cmd_cache_clear, cmd_classify};
use component_detection::cli::config::{AppConfig, load_config};
use component_detection::report::report_model::DetectionReport;

mod common;
use common::utils::{frame, instance, with_bounds, with_radius};

fn temp_dir(label: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "component-detection-cli-{}-{}",
        label,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

// =========================================================================
// Config loading
// =========================================================================

#[test]
fn missing_config_file_yields_defaults() {
    let config = load_config(Some("/nonexistent/component-detection.yaml"));
    assert_eq!(config.classify.min_confidence, 0.4);
    assert_eq!(config.classify.format, "console");
    assert!(config.cache.enabled);
    assert_eq!(config.cache.dir, ".detection-cache");
    assert!(config.schemas.dir.is_none());
    assert!(config.trace.path.is_none());
}

#[test]
fn config_file_overrides_defaults() {
    let dir = temp_dir("config");
    let path = dir.join("component-detection.yaml");
    std::fs::write(
        &path,
        "classify:\n  min_confidence: 0.6\ncache:\n  enabled: false\n",
    )
    .expect("write config");

    let config = load_config(path.to_str());
    assert_eq!(config.classify.min_confidence, 0.6);
    assert!(!config.cache.enabled);
    // Untouched sections keep their defaults
    assert_eq!(config.classify.format, "console");
    assert_eq!(config.cache.dir, ".detection-cache");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn malformed_config_falls_back_to_defaults() {
    let dir = temp_dir("badconfig");
    let path = dir.join("component-detection.yaml");
    std::fs::write(&path, ":: not yaml ::[").expect("write config");

    let config = load_config(path.to_str());
    assert_eq!(config.classify.min_confidence, 0.4);

    let _ = std::fs::remove_dir_all(&dir);
}

// =========================================================================
// classify command end to end (JSON in, JSON report out)
// =========================================================================

#[test]
fn classify_command_writes_a_json_report() {
    let dir = temp_dir("classify");

    let tree = frame(
        "Screen",
        vec![with_radius(
            with_bounds(instance("Switch: Active=On, Type=Box"), 40.0, 20.0),
            10.0,
        )],
    );
    let input = dir.join("design.json");
    std::fs::write(&input, serde_json::to_string(&tree).expect("encode tree")).expect("write");

    let output = dir.join("report.json");
    let config = AppConfig::default();

    cmd_classify(
        input.to_str().expect("utf-8 path"),
        "json",
        output.to_str(),
        None,
        None,
        true, // no_cache
        None,
        &config,
        0,
    )
    .expect("classify succeeds");

    let content = std::fs::read_to_string(&output).expect("report written");
    let report: DetectionReport = serde_json::from_str(&content).expect("valid report JSON");
    assert_eq!(report.total_nodes, 2);
    assert_eq!(report.matched, 1, "The switch matches");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn classify_command_caches_by_file_hash() {
    let dir = temp_dir("cache");
    let cache_dir = dir.join("cache");

    let tree = frame("Screen", vec![instance("Button")]);
    let input = dir.join("design.json");
    std::fs::write(&input, serde_json::to_string(&tree).expect("encode tree")).expect("write");

    let output = dir.join("report.json");
    let config = AppConfig::default();

    for _ in 0..2 {
        cmd_classify(
            input.to_str().expect("utf-8 path"),
            "json",
            output.to_str(),
            None,
            None,
            false,
            cache_dir.to_str(),
            &config,
            0,
        )
        .expect("classify succeeds");
    }

    let entries: Vec<_> = std::fs::read_dir(&cache_dir)
        .expect("cache dir created")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map_or(false, |x| x == "json"))
        .collect();
    assert_eq!(entries.len(), 1, "Same input hashes to one cache entry");

    cmd_cache_clear(cache_dir.to_str(), &config, 0).expect("clear");
    let remaining = std::fs::read_dir(&cache_dir)
        .expect("cache dir still exists")
        .filter_map(|e| e.ok())
        .count();
    assert_eq!(remaining, 0, "cache-clear empties the directory");

    let _ = std::fs::remove_dir_all(&dir);
}
