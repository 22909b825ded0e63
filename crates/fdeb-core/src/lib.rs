//! Force-directed edge bundling: edge curves, the compatibility oracle, the
//! relaxation schedule, and the graph container that ties them together.
//! Pure computation — no file I/O, no fallible paths. Callers hand in
//! already-validated records and get back a graph whose edges carry their
//! final bundled polylines.

mod compat;
mod edge;
mod graph;
mod node;
mod solver;

pub use edge::Edge;
pub use graph::{EdgeFilter, EdgeRecord, Graph, NetworkConfig, NodeRecord};
pub use node::Node;
pub use solver::{solve, Gravity, SolverConfig};

pub use fdeb_geom::Vector2;
