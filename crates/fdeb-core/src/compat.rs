//! The compatibility oracle (C2): four pairwise factors — angle, scale,
//! position, visibility — whose product drives neighbor-list construction.

use crate::edge::Edge;
use fdeb_geom::Vector2;

/// Below this length an edge is treated as degenerate and compatibility
/// with it is defined as zero, rather than letting the visibility
/// projection divide by a near-zero line length. Matches the
/// `ε_machine` used throughout the spec for numeric-edge-case guards.
const DEGENERATE_LENGTH: f64 = 1e-6;

/// Projects `point` onto the infinite line through `line_start`→`line_end`.
fn project(point: Vector2, line_start: Vector2, line_end: Vector2) -> Vector2 {
    let l2 = (line_end - line_start).dot(line_end - line_start);
    let r = ((line_start.y - point.y) * (line_start.y - line_end.y)
        - (line_start.x - point.x) * (line_end.x - line_start.x))
        / l2;
    line_start + (line_end - line_start) * r
}

fn angle_compatibility(a: &Edge, b: &Edge) -> f64 {
    let va = a.vector().normalized();
    let vb = b.vector().normalized();
    va.dot(vb).abs()
}

fn scale_compatibility(a: &Edge, b: &Edge) -> f64 {
    let (l1, l2) = (a.length(), b.length());
    let l_avg = (l1 + l2) / 2.0;
    if l_avg > DEGENERATE_LENGTH {
        2.0 / (l_avg / l1.min(l2) + l1.max(l2) / l_avg)
    } else {
        0.0
    }
}

fn position_compatibility(a: &Edge, b: &Edge) -> f64 {
    let l_avg = (a.length() + b.length()) / 2.0;
    if l_avg > DEGENERATE_LENGTH {
        let mid_a = a.start().midpoint(a.end());
        let mid_b = b.start().midpoint(b.end());
        l_avg / (l_avg + (mid_a - mid_b).length())
    } else {
        0.0
    }
}

/// Asymmetric projection visibility of `b` as seen along `a`'s line.
fn edge_visibility(a: &Edge, b: &Edge) -> f64 {
    let i0 = project(a.start(), b.start(), b.end());
    let i1 = project(a.end(), b.start(), b.end());
    let mid_i = i0.midpoint(i1);
    let mid_b = b.start().midpoint(b.end());
    (1.0 - 2.0 * (mid_b - mid_i).length() / (i0 - i1).length()).max(0.0)
}

fn visibility_compatibility(a: &Edge, b: &Edge) -> f64 {
    edge_visibility(a, b).min(edge_visibility(b, a))
}

/// `C(a,b) = C_angle * C_scale * C_position * C_visibility`, in `[0, 1]`.
///
/// Degenerate (near-zero-length) edges short-circuit to `0.0` rather than
/// feeding a near-zero line length into the visibility projection, which
/// keeps the range invariant intact for inputs the reference algorithm
/// would otherwise hand a division by zero.
pub fn compatibility(a: &Edge, b: &Edge) -> f64 {
    if a.length() <= DEGENERATE_LENGTH || b.length() <= DEGENERATE_LENGTH {
        return 0.0;
    }
    angle_compatibility(a, b)
        * scale_compatibility(a, b)
        * position_compatibility(a, b)
        * visibility_compatibility(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(sx: f64, sy: f64, ex: f64, ey: f64) -> Edge {
        Edge::new("s", "t", Vector2::new(sx, sy), Vector2::new(ex, ey), 1.0)
    }

    #[test]
    fn parallel_close_edges_are_highly_compatible() {
        let a = edge(0.0, 0.0, 10.0, 0.0);
        let b = edge(0.0, 1.0, 10.0, 1.0);
        assert!(compatibility(&a, &b) >= 0.6);
    }

    #[test]
    fn perpendicular_edges_are_incompatible() {
        let a = edge(0.0, 0.0, 10.0, 0.0);
        let b = edge(5.0, -5.0, 5.0, 5.0);
        assert_eq!(compatibility(&a, &b), 0.0);
    }

    #[test]
    fn compatibility_is_symmetric() {
        let a = edge(0.0, 0.0, 10.0, 0.0);
        let b = edge(1.0, 1.0, 9.0, 2.0);
        assert!((compatibility(&a, &b) - compatibility(&b, &a)).abs() < 1e-12);
    }

    #[test]
    fn compatibility_stays_within_unit_range() {
        let a = edge(0.0, 0.0, 3.0, 1.0);
        let b = edge(-2.0, 5.0, 4.0, -3.0);
        let c = compatibility(&a, &b);
        assert!((0.0..=1.0).contains(&c));
    }

    #[test]
    fn zero_length_edge_has_no_compatibility() {
        let a = edge(0.0, 0.0, 10.0, 0.0);
        let degenerate = edge(5.0, 5.0, 5.0, 5.0);
        assert_eq!(compatibility(&a, &degenerate), 0.0);
    }

    #[test]
    fn coincident_midpoints_saturate_position_compatibility() {
        let a = edge(0.0, 0.0, 10.0, 0.0);
        let b = edge(5.0, -10.0, 5.0, 10.0);
        // Position factor alone would be 1.0 (same midpoint); angle kills it.
        assert_eq!(compatibility(&a, &b), 0.0);
    }
}
