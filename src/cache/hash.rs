use crate::node::node_model::DesignNode;

/// Content hash of raw bytes: blake3, hex-encoded. Deterministic, and any
/// single-byte change flips the digest.
pub fn compute_hash(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// Content hash of a node subtree via its canonical JSON serialization.
///
/// Serialization of this fixed struct shape cannot realistically fail; the
/// empty-bytes fallback keeps the function total rather than propagating an
/// error into the pure pipeline.
pub fn hash_node(node: &DesignNode) -> String {
    let bytes = serde_json::to_vec(node).unwrap_or_default();
    compute_hash(&bytes)
}
