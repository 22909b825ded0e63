use fdeb_geom::Vector2;

/// Below this force magnitude a point is left in place during a step —
/// distinct from the solver's interaction floor `epsilon`, which gates the
/// electrostatic term itself.
const STEP_EPSILON: f64 = 1e-6;

const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

fn gauss_weight(distance: f64, sigma: f64) -> f64 {
    INV_SQRT_2PI * (-0.5 * (distance / sigma).powi(2)).exp() / sigma
}

/// An ordered polyline from a source node to a target node: fixed
/// endpoints, a growing sequence of interior subdivision points, a
/// cosmetic width, and the neighbor list built by the compatibility
/// oracle. Subdivision count and point positions are the only mutable
/// state; everything else is set once at construction.
#[derive(Clone, Debug)]
pub struct Edge {
    source_label: String,
    target_label: String,
    start: Vector2,
    end: Vector2,
    subdivisions: Vec<Vector2>,
    width: f64,
    neighbors: Vec<usize>,
}

impl Edge {
    /// Builds an edge from its (already direction-agnostic) endpoints,
    /// canonicalizes direction, and lays down the first midpoint
    /// subdivision.
    pub fn new(
        source_label: impl Into<String>,
        target_label: impl Into<String>,
        start: Vector2,
        end: Vector2,
        width: f64,
    ) -> Self {
        let mut edge = Edge {
            source_label: source_label.into(),
            target_label: target_label.into(),
            start,
            end,
            subdivisions: Vec::new(),
            width,
            neighbors: Vec::new(),
        };
        edge.arrange_direction();
        edge.subdivisions.push(edge.start.midpoint(edge.end));
        edge
    }

    fn arrange_direction(&mut self) {
        let v = self.end - self.start;
        let swap = (v.x.abs() > v.y.abs() && self.end.x < self.start.x)
            || (v.x.abs() < v.y.abs() && self.end.y < self.start.y);
        if swap {
            std::mem::swap(&mut self.start, &mut self.end);
        }
    }

    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    pub fn target_label(&self) -> &str {
        &self.target_label
    }

    pub fn start(&self) -> Vector2 {
        self.start
    }

    pub fn end(&self) -> Vector2 {
        self.end
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    pub fn subdivisions(&self) -> &[Vector2] {
        &self.subdivisions
    }

    pub fn subdivision_count(&self) -> usize {
        self.subdivisions.len()
    }

    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    pub(crate) fn push_neighbor(&mut self, index: usize) {
        self.neighbors.push(index);
    }

    /// `end - start`, used by the compatibility oracle and the spring term.
    pub fn vector(&self) -> Vector2 {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.vector().length()
    }

    /// Start, every interior subdivision in order, then end — the curve
    /// as consumers (JSON output, rendering) see it.
    pub fn polyline(&self) -> Vec<Vector2> {
        let mut points = Vec::with_capacity(self.subdivisions.len() + 2);
        points.push(self.start);
        points.extend_from_slice(&self.subdivisions);
        points.push(self.end);
        points
    }

    /// Doubles the interior point count by sampling the current polyline
    /// at uniformly spaced parameters, carrying a fractional offset across
    /// segment boundaries. See spec §4.1 "Resubdivision".
    pub fn resubdivide(&mut self) {
        let old_count = self.subdivisions.len();
        if old_count == 0 {
            self.subdivisions.push(self.start.midpoint(self.end));
            return;
        }

        let new_count = 2 * old_count;
        let segment_length = (old_count + 1) as f64 / (new_count + 1) as f64;
        let mut new_points = Vec::with_capacity(new_count);

        let mut v1_index: isize = -1;
        let mut v2_index: usize = 0;
        let mut v1 = self.start;
        let mut v2 = self.subdivisions[0];
        let mut r = segment_length;

        while new_points.len() < new_count {
            new_points.push(v1 + (v2 - v1) * r);
            if r + segment_length > 1.0 {
                r = segment_length - (1.0 - r);
                v1_index += 1;
                v2_index += 1;
                if v1_index >= 0 {
                    v1 = self.subdivisions[v1_index as usize];
                }
                v2 = if v2_index < old_count {
                    self.subdivisions[v2_index]
                } else {
                    self.end
                };
            } else {
                r += segment_length;
            }
        }

        self.subdivisions = new_points;
    }

    /// Additive: accumulates `k * (prev + next - 2*p)` for each interior
    /// point into `forces`, using the fixed endpoints as virtual neighbors
    /// at the ends.
    pub fn add_spring_force(&self, forces: &mut [Vector2], k: f64) {
        let n = self.subdivisions.len();
        let kp = k / (self.length() * (n + 1) as f64);
        for i in 0..n {
            let prev = if i == 0 {
                self.start
            } else {
                self.subdivisions[i - 1]
            };
            let next = if i == n - 1 {
                self.end
            } else {
                self.subdivisions[i + 1]
            };
            forces[i] += (prev + next - self.subdivisions[i] * 2.0) * kp;
        }
    }

    /// Additive: pulls this edge's subdivisions toward `other`'s, one unit
    /// vector per point pair above the interaction floor. Requires both
    /// edges share the current subdivision count — guaranteed by the
    /// solver's globally synchronized resubdivision.
    pub fn add_electrostatic_force(&self, forces: &mut [Vector2], other: &Edge, epsilon: f64) {
        debug_assert_eq!(
            self.subdivisions.len(),
            other.subdivisions.len(),
            "electrostatic coupling requires synchronized subdivision counts"
        );
        for i in 0..self.subdivisions.len() {
            let d = other.subdivisions[i] - self.subdivisions[i];
            let dlen = d.length();
            if dlen > epsilon {
                forces[i] += d / dlen;
            }
        }
    }

    /// Additive: pulls every subdivision toward `center`, falling off with
    /// `(distance + 1) ^ exponent`.
    pub fn add_gravity_force(&self, forces: &mut [Vector2], center: Vector2, exponent: f64) {
        for (i, point) in self.subdivisions.iter().enumerate() {
            let d = center - *point;
            let dlen = d.length();
            forces[i] += d * 0.1 * (dlen + 1.0).powf(exponent);
        }
    }

    /// Displaces each interior point by a fixed-magnitude step in its
    /// accumulated force direction. Points whose force is below
    /// `STEP_EPSILON` are left unchanged.
    pub fn apply_step(&mut self, forces: &[Vector2], step: f64) {
        for (i, point) in self.subdivisions.iter_mut().enumerate() {
            let flen = forces[i].length();
            if flen > STEP_EPSILON {
                *point += forces[i] * step / flen;
            }
        }
    }

    /// One-shot Gaussian blur of the subdivisions along their index,
    /// clamped at the (unmoved) endpoints. Applied once, after the last
    /// cycle.
    pub fn smooth(&mut self, sigma: f64) {
        let n = self.subdivisions.len();
        let mut smoothed = vec![Vector2::ZERO; n];
        for i in 0..n {
            let mut total_weight = 0.0;

            let w_start = gauss_weight((i + 1) as f64, sigma);
            smoothed[i] += self.start * w_start;
            total_weight += w_start;

            for (j, point) in self.subdivisions.iter().enumerate() {
                let w = gauss_weight(i as f64 - j as f64, sigma);
                smoothed[i] += *point * w;
                total_weight += w;
            }

            let w_end = gauss_weight((n - i + 1) as f64, sigma);
            smoothed[i] += self.end * w_end;
            total_weight += w_end;

            smoothed[i] /= total_weight;
        }
        self.subdivisions = smoothed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_starts_with_one_midpoint_subdivision() {
        let e = Edge::new("a", "b", Vector2::new(0.0, 0.0), Vector2::new(10.0, 0.0), 1.0);
        assert_eq!(e.subdivision_count(), 1);
        assert_eq!(e.subdivisions()[0], Vector2::new(5.0, 0.0));
    }

    #[test]
    fn direction_normalization_orders_by_dominant_axis() {
        // end.x < start.x with |dx| > |dy|: must be swapped.
        let e = Edge::new("a", "b", Vector2::new(10.0, 0.0), Vector2::new(0.0, 0.0), 1.0);
        assert_eq!(e.start(), Vector2::new(0.0, 0.0));
        assert_eq!(e.end(), Vector2::new(10.0, 0.0));
    }

    #[test]
    fn direction_normalization_is_idempotent_on_already_canonical_edges() {
        let e = Edge::new("a", "b", Vector2::new(0.0, 0.0), Vector2::new(0.0, 10.0), 1.0);
        assert_eq!(e.start(), Vector2::new(0.0, 0.0));
        assert_eq!(e.end(), Vector2::new(0.0, 10.0));
    }

    #[test]
    fn endpoints_never_move_across_resubdivision_and_force_passes() {
        let mut e = Edge::new("a", "b", Vector2::new(0.0, 0.0), Vector2::new(10.0, 0.0), 1.0);
        for _ in 0..4 {
            e.resubdivide();
            let mut forces = vec![Vector2::ZERO; e.subdivision_count()];
            e.add_spring_force(&mut forces, 0.1);
            e.apply_step(&forces, 0.4);
        }
        assert_eq!(e.start(), Vector2::new(0.0, 0.0));
        assert_eq!(e.end(), Vector2::new(10.0, 0.0));
    }

    #[test]
    fn resubdivision_doubles_count_and_stays_strictly_interior() {
        let mut e = Edge::new("a", "b", Vector2::new(0.0, 0.0), Vector2::new(10.0, 0.0), 1.0);
        for _ in 0..3 {
            let before = e.subdivision_count();
            e.resubdivide();
            assert_eq!(e.subdivision_count(), 2 * before);
            for p in e.subdivisions() {
                assert_ne!(*p, e.start());
                assert_ne!(*p, e.end());
            }
            // Strictly increasing traversal from start toward end.
            let xs: Vec<f64> = e.subdivisions().iter().map(|p| p.x).collect();
            for w in xs.windows(2) {
                assert!(w[0] < w[1]);
            }
        }
    }

    #[test]
    fn step_never_exceeds_configured_magnitude() {
        let mut e = Edge::new("a", "b", Vector2::new(0.0, 0.0), Vector2::new(10.0, 0.0), 1.0);
        e.resubdivide();
        let before = e.subdivisions().to_vec();
        let forces = vec![Vector2::new(5.0, 7.0); e.subdivision_count()];
        e.apply_step(&forces, 0.4);
        for (before, after) in before.iter().zip(e.subdivisions()) {
            assert!((*after - *before).length() <= 0.4 + 1e-12);
        }
    }

    #[test]
    fn smoothing_with_large_sigma_converges_to_uniform_average() {
        let mut e = Edge::new("a", "b", Vector2::new(0.0, 0.0), Vector2::new(10.0, 0.0), 1.0);
        for _ in 0..3 {
            e.resubdivide();
        }
        e.smooth(1e6);
        let n = e.subdivision_count();
        let mut expected_sum = e.start() + e.end();
        for p in e.subdivisions() {
            expected_sum += *p;
        }
        let expected = expected_sum / (n + 2) as f64;
        for p in e.subdivisions() {
            assert!((p.x - expected.x).abs() < 1e-6);
            assert!((p.y - expected.y).abs() < 1e-6);
        }
    }
}
