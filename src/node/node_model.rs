use serde::{Deserialize, Serialize};

/// A node in a parsed design-file tree. Extraction from the upstream design
/// format happens elsewhere; this model is what the classifier and slot
/// mapper operate on, and it is never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignNode {
    pub name: String,

    pub kind: NodeKind,

    #[serde(default)]
    pub bounds: Bounds,

    #[serde(default)]
    pub children: Vec<DesignNode>,

    #[serde(default)]
    pub fills: Vec<Paint>,

    #[serde(default)]
    pub strokes: Vec<Paint>,

    #[serde(default, rename = "cornerRadius")]
    pub corner_radius: Option<f32>,

    #[serde(default)]
    pub layout: LayoutMode,

    /// Text content, present on text nodes only.
    #[serde(default)]
    pub characters: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    #[serde(alias = "FRAME")]
    Frame,
    #[serde(alias = "GROUP")]
    Group,
    #[serde(alias = "INSTANCE")]
    Instance,
    #[serde(alias = "COMPONENT")]
    Component,
    #[serde(alias = "TEXT")]
    Text,
    #[serde(alias = "VECTOR")]
    Vector,
    #[serde(alias = "RECTANGLE")]
    Rectangle,
    #[serde(alias = "ELLIPSE")]
    Ellipse,
    #[serde(alias = "OTHER")]
    Other,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    #[default]
    None,
    #[serde(alias = "HORIZONTAL")]
    Horizontal,
    #[serde(alias = "VERTICAL")]
    Vertical,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paint {
    pub kind: PaintKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaintKind {
    #[serde(alias = "SOLID")]
    Solid,
    #[serde(alias = "GRADIENT")]
    Gradient,
    #[serde(alias = "IMAGE")]
    Image,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height; 0.0 when height is degenerate.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            0.0
        }
    }
}

impl DesignNode {
    pub fn lower_name(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn name_contains(&self, needle: &str) -> bool {
        self.lower_name().contains(needle)
    }

    /// Parse Figma-style variant tokens out of the node name.
    ///
    /// `"Switch: Active=On, Type=Box"` yields `[("active", "on"), ("type", "box")]`.
    /// A base-name prefix before `:` is stripped from the first key. Segments
    /// without `=` are ignored.
    pub fn variant_tokens(&self) -> Vec<(String, String)> {
        self.name
            .split(',')
            .filter_map(|segment| {
                let (key, value) = segment.split_once('=')?;
                // "Switch: Active" → "Active"
                let key = key.rsplit(':').next().unwrap_or(key);
                let key = key.trim().to_lowercase();
                let value = value.trim().to_lowercase();
                if key.is_empty() || value.is_empty() {
                    None
                } else {
                    Some((key, value))
                }
            })
            .collect()
    }

    pub fn has_variant_tokens(&self) -> bool {
        !self.variant_tokens().is_empty()
    }

    pub fn has_variant_key(&self, keys: &[&str]) -> bool {
        self.variant_tokens()
            .iter()
            .any(|(k, _)| keys.iter().any(|wanted| k == wanted))
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// All descendants, excluding the node itself. Traversal order is not
    /// document order; use this only for existence queries.
    pub fn descendants(&self) -> Vec<&DesignNode> {
        let mut out = Vec::new();
        let mut stack: Vec<&DesignNode> = self.children.iter().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter());
        }
        out
    }

    pub fn has_child_named(&self, needle: &str) -> bool {
        self.children.iter().any(|c| c.name_contains(needle))
    }

    pub fn has_descendant_named(&self, needle: &str) -> bool {
        self.descendants().iter().any(|n| n.name_contains(needle))
    }

    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text || self.characters.is_some()
    }

    pub fn has_text_descendant(&self) -> bool {
        self.is_text() || self.descendants().iter().any(|n| n.is_text())
    }

    /// Container kinds can hold slot children; text and vector leaves cannot.
    pub fn is_container(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Frame | NodeKind::Group | NodeKind::Instance | NodeKind::Component
        )
    }

    pub fn has_image_fill(&self) -> bool {
        self.fills.iter().any(|p| p.kind == PaintKind::Image)
    }

    /// Small vector or image-filled leaf, the usual shape of an icon.
    pub fn looks_like_icon(&self) -> bool {
        let small = self.bounds.width <= 48.0 && self.bounds.height <= 48.0;
        small && (self.kind == NodeKind::Vector || self.has_image_fill())
    }

    pub fn has_icon_descendant(&self) -> bool {
        self.looks_like_icon() || self.descendants().iter().any(|n| n.looks_like_icon())
    }

    /// Pill shape: width 1.5–2.5x height with full corner rounding.
    /// Absent corner radius means the rule does not fire.
    pub fn is_pill(&self) -> bool {
        let Some(radius) = self.corner_radius else {
            return false;
        };
        let ratio = self.bounds.aspect_ratio();
        (1.5..=2.5).contains(&ratio) && radius >= self.bounds.height / 2.0
    }

    /// Square bounds with full corner rounding, the usual avatar shape.
    pub fn is_circular(&self) -> bool {
        let Some(radius) = self.corner_radius else {
            return false;
        };
        let b = &self.bounds;
        b.width > 0.0 && (b.width - b.height).abs() <= 1.0 && radius >= b.width / 2.0 - 0.5
    }

    pub fn is_rounded(&self) -> bool {
        self.corner_radius.map(|r| r > 0.0).unwrap_or(false)
    }
}
