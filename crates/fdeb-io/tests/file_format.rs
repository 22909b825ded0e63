use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use fdeb_io::Error;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn missing_nodes_file_is_reported_as_missing() {
    let err = fdeb_io::read_nodes(Path::new("/nonexistent/path/nodes.txt")).unwrap_err();
    assert!(matches!(err, Error::Missing { .. }));
}

#[test]
fn malformed_node_line_reports_its_line_number() {
    let file = write_temp("label x y\na 0.0 0.0\nb not-a-number 0.0\n");
    let err = fdeb_io::read_nodes(file.path()).unwrap_err();
    match err {
        Error::Malformed { line, .. } => assert_eq!(line, 3),
        other => panic!("expected Malformed, got {other:?}"),
    }
}

#[test]
fn duplicate_node_label_is_rejected() {
    let file = write_temp("label x y\na 0.0 0.0\na 1.0 1.0\n");
    let err = fdeb_io::read_nodes(file.path()).unwrap_err();
    assert!(matches!(err, Error::Malformed { .. }));
}

#[test]
fn edge_referencing_unknown_label_reports_the_label_and_line() {
    let known: HashSet<String> = ["a".to_string(), "b".to_string()].into_iter().collect();
    let edges_file = write_temp("source target weight\na z 1.0\n");
    let err = fdeb_io::read_edges(edges_file.path(), &known).unwrap_err();
    match err {
        Error::UnknownLabel { line, label, .. } => {
            assert_eq!(line, 2);
            assert_eq!(label, "z");
        }
        other => panic!("expected UnknownLabel, got {other:?}"),
    }
}

#[test]
fn edge_missing_its_weight_column_defaults_to_one() {
    let known: HashSet<String> = ["a".to_string(), "b".to_string()].into_iter().collect();
    let edges_file = write_temp("source target weight\na b\n");
    let edges = fdeb_io::read_edges(edges_file.path(), &known).unwrap();
    assert_eq!(edges[0].weight, 1.0);
}

#[test]
fn missing_edges_file_is_reported_as_missing() {
    let known = HashSet::new();
    let err = fdeb_io::read_edges(Path::new("/nonexistent/path/edges.txt"), &known).unwrap_err();
    assert!(matches!(err, Error::Missing { .. }));
}
