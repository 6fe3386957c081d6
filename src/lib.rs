use serde::{Deserialize, Serialize};

use crate::cache::store::{CacheEntry, CacheStore};
use crate::classify::classify_model::ClassificationResult;
use crate::classify::registry::ClassifierRegistry;
use crate::node::node_model::DesignNode;
use crate::slots::registry::SchemaRegistry;
use crate::slots::slot_model::SlotMapping;

pub mod cache;
pub mod classify;
pub mod cli;
pub mod node;
pub mod report;
pub mod slots;
pub mod trace;

pub use crate::cache::hash::{compute_hash, hash_node};
pub use crate::classify::classifier::{classify, classify_with};
pub use crate::slots::mapper::map_slots;

/// Classification plus, for compound types with a schema, the slot mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Detection {
    pub classification: ClassificationResult,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<SlotMapping>,
}

/// One detection within a tree walk, addressed by its index path from the
/// root (the root itself has an empty path).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDetection {
    pub path: Vec<usize>,
    pub name: String,
    pub detection: Detection,
}

/// The full pipeline: candidate registry feeding the slot-schema registry.
/// Classification runs first; slot mapping only after a type is fixed.
pub struct Pipeline {
    registry: ClassifierRegistry,
    schemas: SchemaRegistry,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            registry: ClassifierRegistry::default(),
            schemas: SchemaRegistry::default(),
        }
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(mut self, registry: ClassifierRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_schemas(mut self, schemas: SchemaRegistry) -> Self {
        self.schemas = schemas;
        self
    }

    pub fn registry(&self) -> &ClassifierRegistry {
        &self.registry
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    pub fn schemas_mut(&mut self) -> &mut SchemaRegistry {
        &mut self.schemas
    }

    /// Classify one node and, when a slot schema exists for the matched
    /// type, map its children into slots. Pure; no I/O.
    pub fn detect(&self, node: &DesignNode) -> Detection {
        let classification = classify_with(&self.registry, node);

        let slots = if classification.is_unknown() {
            None
        } else {
            self.schemas
                .for_component(classification.component)
                .map(|schema| map_slots(node, classification.component, schema))
        };

        Detection {
            classification,
            slots,
        }
    }

    /// Detect every node of a tree in preorder, recording index paths.
    pub fn detect_tree(&self, root: &DesignNode) -> Vec<NodeDetection> {
        let mut out = Vec::new();
        self.walk(root, &mut Vec::new(), &mut out);
        out
    }

    fn walk(&self, node: &DesignNode, path: &mut Vec<usize>, out: &mut Vec<NodeDetection>) {
        out.push(NodeDetection {
            path: path.clone(),
            name: node.name.clone(),
            detection: self.detect(node),
        });
        for (i, child) in node.children.iter().enumerate() {
            path.push(i);
            self.walk(child, path, out);
            path.pop();
        }
    }

    /// Detect with memoization through a cache store.
    ///
    /// Every cache failure (lookup, decode, store) degrades to a fresh
    /// computation with a stderr warning. The caller always gets a result;
    /// caching is an optimization, never a correctness dependency.
    pub fn detect_cached(&self, node: &DesignNode, store: &dyn CacheStore) -> Detection {
        let hash = hash_node(node);

        match store.lookup(&hash) {
            Ok(Some(entry)) => match serde_json::from_value::<Detection>(entry.payload) {
                Ok(detection) => return detection,
                Err(e) => {
                    eprintln!("Warning: discarding undecodable cache entry {}: {}", hash, e);
                }
            },
            Ok(None) => {}
            Err(e) => {
                eprintln!("Warning: cache lookup failed: {}", e);
            }
        }

        let detection = self.detect(node);

        match serde_json::to_value(&detection) {
            Ok(payload) => {
                if let Err(e) = store.store(CacheEntry::new(hash, payload)) {
                    eprintln!("Warning: cache store failed: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Warning: could not encode detection for caching: {}", e);
            }
        }

        detection
    }
}
