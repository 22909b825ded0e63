//! JSON output (§6): nodes and bundled edge polylines, serialized with
//! enough precision to round-trip a double.

use std::fs;
use std::path::Path;

use fdeb_core::Graph;
use serde::Serialize;

use crate::error::Error;

#[derive(Serialize)]
struct NodeOut<'a> {
    label: &'a str,
    x: f64,
    y: f64,
}

#[derive(Serialize)]
struct PointOut {
    x: f64,
    y: f64,
}

#[derive(Serialize)]
struct EdgeOut<'a> {
    source: &'a str,
    target: &'a str,
    coords: Vec<PointOut>,
}

#[derive(Serialize)]
struct DocumentOut<'a> {
    nodes: Vec<NodeOut<'a>>,
    edges: Vec<EdgeOut<'a>>,
}

/// Writes `graph` to `path` as one JSON object: `"nodes"` is `{label,x,y}`
/// per node, `"edges"` is `{source,target,coords}` with `coords` running
/// start, every interior subdivision, end.
pub fn write_json(graph: &Graph, path: &Path) -> Result<(), Error> {
    let document = DocumentOut {
        nodes: graph
            .nodes()
            .iter()
            .map(|n| NodeOut {
                label: &n.label,
                x: n.position.x,
                y: n.position.y,
            })
            .collect(),
        edges: graph
            .edges()
            .iter()
            .map(|e| EdgeOut {
                source: e.source_label(),
                target: e.target_label(),
                coords: e
                    .polyline()
                    .into_iter()
                    .map(|p| PointOut { x: p.x, y: p.y })
                    .collect(),
            })
            .collect(),
    };

    let body = serde_json::to_string(&document).expect("Graph serializes infallibly");
    fs::write(path, body).map_err(|source| Error::OutputFailure {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!(target: "fdeb_io::writer", "wrote {} edges to {}", graph.edges().len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdeb_core::{EdgeRecord, NetworkConfig, NodeRecord};
    use fdeb_geom::Vector2;

    #[test]
    fn writes_nodes_and_edge_coords_round_trippably() {
        let nodes = vec![
            NodeRecord {
                label: "a".into(),
                position: Vector2::new(0.0, 0.0),
            },
            NodeRecord {
                label: "b".into(),
                position: Vector2::new(10.0, 0.0),
            },
        ];
        let edges = vec![EdgeRecord {
            source: "a".into(),
            target: "b".into(),
            weight: 1.0,
        }];
        let graph = Graph::build(nodes, edges, &NetworkConfig::default(), 0.6);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&graph, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["nodes"].as_array().unwrap().len(), 2);
        let coords = parsed["edges"][0]["coords"].as_array().unwrap();
        assert_eq!(coords.len(), 3); // start, one midpoint subdivision, end
    }

    #[test]
    fn unwritable_path_is_an_output_failure() {
        let nodes = vec![
            NodeRecord {
                label: "a".into(),
                position: Vector2::new(0.0, 0.0),
            },
            NodeRecord {
                label: "b".into(),
                position: Vector2::new(1.0, 0.0),
            },
        ];
        let graph = Graph::build(
            nodes,
            vec![EdgeRecord {
                source: "a".into(),
                target: "b".into(),
                weight: 1.0,
            }],
            &NetworkConfig::default(),
            0.6,
        );
        let err = write_json(&graph, Path::new("/nonexistent/dir/out.json")).unwrap_err();
        assert!(matches!(err, Error::OutputFailure { .. }));
    }
}
