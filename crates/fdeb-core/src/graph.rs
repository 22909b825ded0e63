//! The graph container (C4): labeled nodes, the edge vector, load-time
//! filtering and width normalization, and the bounding box.

use std::collections::HashMap;

use fdeb_geom::Vector2;

use crate::compat;
use crate::edge::Edge;
use crate::node::Node;

/// A node as read from the input, before it is indexed into a `Graph`.
#[derive(Clone, Debug)]
pub struct NodeRecord {
    pub label: String,
    pub position: Vector2,
}

/// An edge as read from the input, before filtering. `weight` defaults to
/// `1.0` when absent from the source file (the io crate's job), not here.
#[derive(Clone, Debug)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

/// Which of the three edge-filtering modes (§4.4) is active. `WeightThreshold`
/// and `Percentile` are mutually exclusive in priority order; `None` keeps
/// everything.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeFilter {
    WeightThreshold(f64),
    Percentile(f64),
    None,
}

/// Raw filter inputs as the CLI surface presents them: two independent
/// optional knobs, resolved to a single `EdgeFilter` by `resolve`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NetworkConfig {
    pub edge_weight_threshold: Option<f64>,
    pub edge_percentile: Option<f64>,
}

impl NetworkConfig {
    /// Weight threshold takes precedence when both are set; per §7
    /// `ConfigConflict` is not fatal, just logged.
    pub fn resolve(&self) -> EdgeFilter {
        match (self.edge_weight_threshold, self.edge_percentile) {
            (Some(w), Some(_)) => {
                log::warn!(
                    target: "fdeb_core::graph",
                    "both edge-weight and edge-percentage filters set; edge-weight takes precedence"
                );
                EdgeFilter::WeightThreshold(w)
            }
            (Some(w), None) => EdgeFilter::WeightThreshold(w),
            (None, Some(p)) => EdgeFilter::Percentile(p),
            (None, None) => EdgeFilter::None,
        }
    }
}

/// The labeled-node / edge-vector container. Built once via `build`, then
/// handed to the solver; the solver mutates edges in place but never adds
/// or removes nodes or edges.
pub struct Graph {
    nodes: Vec<Node>,
    node_index: HashMap<String, usize>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.edges
    }

    pub fn node_position(&self, label: &str) -> Option<Vector2> {
        self.node_index.get(label).map(|&i| self.nodes[i].position)
    }

    /// Axis-aligned bounding box over node positions, inflated by `frame`
    /// on every side.
    pub fn bounding_box(&self, frame: f64) -> (Vector2, Vector2) {
        let mut bottom_left = self.nodes[0].position;
        let mut top_right = self.nodes[0].position;
        for node in &self.nodes[1..] {
            bottom_left.x = bottom_left.x.min(node.position.x);
            bottom_left.y = bottom_left.y.min(node.position.y);
            top_right.x = top_right.x.max(node.position.x);
            top_right.y = top_right.y.max(node.position.y);
        }
        bottom_left.x -= frame;
        bottom_left.y -= frame;
        top_right.x += frame;
        top_right.y += frame;
        (bottom_left, top_right)
    }

    /// Filters records, normalizes width, canonicalizes edge direction,
    /// and builds the symmetric compatibility-threshold neighbor lists.
    /// `node_records` and `edge_records` are assumed already validated
    /// (unique labels, edges referencing only known labels) — that check
    /// happens upstream, in the file loader, where line numbers are still
    /// available for diagnostics.
    pub fn build(
        node_records: Vec<NodeRecord>,
        edge_records: Vec<EdgeRecord>,
        network_config: &NetworkConfig,
        compatibility_threshold: f64,
    ) -> Graph {
        let mut node_index = HashMap::with_capacity(node_records.len());
        let mut nodes = Vec::with_capacity(node_records.len());
        for record in node_records {
            node_index.insert(record.label.clone(), nodes.len());
            nodes.push(Node::new(record.label, record.position));
        }

        let total_records = edge_records.len();
        let kept_records = Self::filter_edges(edge_records, network_config.resolve());

        let w_max = kept_records
            .iter()
            .map(|r| r.weight)
            .fold(0.0_f64, f64::max);

        let mut edges = Vec::with_capacity(kept_records.len());
        for record in &kept_records {
            let start = nodes[node_index[&record.source]].position;
            let end = nodes[node_index[&record.target]].position;
            let width = (record.weight + 1.0) / (w_max + 1.0);
            edges.push(Edge::new(&record.source, &record.target, start, end, width));

            nodes[node_index[&record.source]].degree += 1;
            nodes[node_index[&record.target]].degree += 1;
        }

        log::info!(
            target: "fdeb_core::graph",
            "loaded {} nodes, {} edges ({} dropped by filtering)",
            nodes.len(),
            edges.len(),
            total_records - edges.len()
        );

        let mut graph = Graph {
            nodes,
            node_index,
            edges,
        };
        graph.build_compatibility_lists(compatibility_threshold);
        graph
    }

    fn filter_edges(records: Vec<EdgeRecord>, filter: EdgeFilter) -> Vec<EdgeRecord> {
        match filter {
            EdgeFilter::WeightThreshold(w_min) => records
                .into_iter()
                .filter(|r| r.weight > w_min)
                .collect(),
            EdgeFilter::Percentile(p) => {
                let mut sorted = records;
                sorted.sort_by(|a, b| b.weight.total_cmp(&a.weight));
                let keep = ((sorted.len() as f64) * p / 100.0).round() as usize;
                sorted.truncate(keep);
                sorted
            }
            EdgeFilter::None => records,
        }
    }

    fn build_compatibility_lists(&mut self, threshold: f64) {
        log::info!(target: "fdeb_core::graph", "building compatibility lists");
        let n = self.edges.len();
        let mut pairs = 0u64;
        for i in 0..n {
            for j in (i + 1)..n {
                let c = compat::compatibility(&self.edges[i], &self.edges[j]);
                if c >= threshold {
                    self.edges[i].push_neighbor(j);
                    self.edges[j].push_neighbor(i);
                    pairs += 1;
                }
            }
        }
        log::info!(target: "fdeb_core::graph", "compatible edge pairs: {pairs}");
    }
}
