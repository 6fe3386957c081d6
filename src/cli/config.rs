use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "component-detection",
    version,
    about = "Heuristic design-node classifier for UI component detection"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: component-detection.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a design tree and map compound components into slots
    Classify {
        /// Path to a design-tree JSON file
        #[arg(long)]
        input: String,

        /// Output format: console, json, markdown
        #[arg(long, default_value = "console")]
        format: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Directory of YAML slot schemas layered over the built-ins
        #[arg(long)]
        schema_dir: Option<String>,

        /// Minimum classification confidence floor
        #[arg(long)]
        min_confidence: Option<f32>,

        /// Skip the result cache entirely
        #[arg(long, default_value_t = false)]
        no_cache: bool,

        /// Cache directory
        #[arg(long)]
        cache_dir: Option<String>,
    },

    /// Print the content hash of a file
    Hash {
        /// Path to the file to hash
        #[arg(long)]
        input: String,
    },

    /// Remove every entry from the result cache
    CacheClear {
        /// Cache directory
        #[arg(long)]
        cache_dir: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `component-detection.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub classify: ClassifyConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub schemas: SchemaConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyConfig {
    #[serde(default = "default_floor")]
    pub min_confidence: f32,

    #[serde(default = "default_console")]
    pub format: String,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.4,
            format: "console".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_cache_dir")]
    pub dir: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: ".detection-cache".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceConfig {
    /// JSONL trace file; tracing is off when unset.
    pub path: Option<String>,
}

// Serde default helpers
fn default_floor() -> f32 {
    0.4
}
fn default_true() -> bool {
    true
}
fn default_cache_dir() -> String {
    ".detection-cache".to_string()
}
fn default_console() -> String {
    "console".to_string()
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("component-detection.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}
