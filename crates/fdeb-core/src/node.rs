use fdeb_geom::Vector2;

/// A fixed anchor point: a label, a 2D position, and the degree accumulated
/// from the kept edges at load time. Immutable after loading — the solver
/// never repositions nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub label: String,
    pub position: Vector2,
    pub degree: u32,
}

impl Node {
    pub fn new(label: impl Into<String>, position: Vector2) -> Self {
        Node {
            label: label.into(),
            position,
            degree: 0,
        }
    }
}
