//! Whitespace-delimited node and edge file loading (§6), with line-numbered
//! diagnostics and the label validation `fdeb-core` assumes is already done.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use fdeb_core::{EdgeRecord, NodeRecord};
use fdeb_geom::Vector2;

use crate::error::Error;

/// Reads a nodes file: header line ignored, then `<label> <x> <y>` per line.
pub fn read_nodes(path: &Path) -> Result<Vec<NodeRecord>, Error> {
    let text = fs::read_to_string(path).map_err(|source| Error::Missing {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for (line_no, line) in text.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(Error::Malformed {
                path: path.to_path_buf(),
                line: line_no + 1,
                detail: format!("expected '<label> <x> <y>', got {line:?}"),
            });
        }
        let label = fields[0].to_string();
        let x = parse_f64(fields[1], path, line_no + 1)?;
        let y = parse_f64(fields[2], path, line_no + 1)?;

        if !seen.insert(label.clone()) {
            return Err(Error::Malformed {
                path: path.to_path_buf(),
                line: line_no + 1,
                detail: format!("duplicate node label {label:?}"),
            });
        }

        records.push(NodeRecord {
            label,
            position: Vector2::new(x, y),
        });
    }

    log::info!(target: "fdeb_io::reader", "read {} nodes from {}", records.len(), path.display());
    Ok(records)
}

/// Reads an edges file: header line ignored, then `<source> <target>
/// [<weight>]` per line. Missing weight defaults to `1.0`. Both labels must
/// already appear in `known_labels`.
pub fn read_edges(
    path: &Path,
    known_labels: &HashSet<String>,
) -> Result<Vec<EdgeRecord>, Error> {
    let text = fs::read_to_string(path).map_err(|source| Error::Missing {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();

    for (line_no, line) in text.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            return Err(Error::Malformed {
                path: path.to_path_buf(),
                line: line_no + 1,
                detail: format!("expected '<source> <target> [<weight>]', got {line:?}"),
            });
        }
        let source = fields[0].to_string();
        let target = fields[1].to_string();
        let weight = match fields.get(2) {
            Some(field) => parse_f64(field, path, line_no + 1)?,
            None => 1.0,
        };

        for label in [&source, &target] {
            if !known_labels.contains(label) {
                return Err(Error::UnknownLabel {
                    path: path.to_path_buf(),
                    line: line_no + 1,
                    label: label.clone(),
                });
            }
        }

        records.push(EdgeRecord {
            source,
            target,
            weight,
        });
    }

    log::info!(target: "fdeb_io::reader", "read {} edges from {}", records.len(), path.display());
    Ok(records)
}

fn parse_f64(field: &str, path: &Path, line: usize) -> Result<f64, Error> {
    field.parse::<f64>().map_err(|_| Error::Malformed {
        path: path.to_path_buf(),
        line,
        detail: format!("{field:?} is not a valid number"),
    })
}
