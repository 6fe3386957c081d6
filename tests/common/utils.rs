use component_detection::node::node_model::{
    Bounds, DesignNode, LayoutMode, NodeKind, Paint, PaintKind,
};

pub fn node(name: &str, kind: NodeKind) -> DesignNode {
    DesignNode {
        name: name.to_string(),
        kind,
        bounds: Bounds::default(),
        children: Vec::new(),
        fills: Vec::new(),
        strokes: Vec::new(),
        corner_radius: None,
        layout: LayoutMode::None,
        characters: None,
    }
}

pub fn frame(name: &str, children: Vec<DesignNode>) -> DesignNode {
    DesignNode {
        children,
        ..node(name, NodeKind::Frame)
    }
}

pub fn instance(name: &str) -> DesignNode {
    node(name, NodeKind::Instance)
}

pub fn text(name: &str, characters: &str) -> DesignNode {
    DesignNode {
        characters: Some(characters.to_string()),
        ..node(name, NodeKind::Text)
    }
}

pub fn with_bounds(mut node: DesignNode, width: f32, height: f32) -> DesignNode {
    node.bounds = Bounds::new(width, height);
    node
}

pub fn with_radius(mut node: DesignNode, radius: f32) -> DesignNode {
    node.corner_radius = Some(radius);
    node
}

pub fn with_layout(mut node: DesignNode, layout: LayoutMode) -> DesignNode {
    node.layout = layout;
    node
}

pub fn with_image_fill(mut node: DesignNode) -> DesignNode {
    node.fills.push(Paint {
        kind: PaintKind::Image,
        color: None,
    });
    node
}
