//! The relaxation schedule (C3): cycle/iteration bookkeeping and the
//! fixed per-iteration force-accumulation pass over every edge.

use fdeb_geom::Vector2;

use crate::graph::Graph;

/// A gravitational point attractor, applied in addition to the spring and
/// electrostatic terms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gravity {
    pub center: Vector2,
    pub exponent: f64,
}

/// Tunables for the annealing schedule, independent of how the graph was
/// loaded or filtered (that's `NetworkConfig`'s job).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverConfig {
    /// Spring constant.
    pub k: f64,
    /// Initial step size, halved at the start of every cycle after the first.
    pub s0: f64,
    /// Initial iteration count, shrunk by two thirds at the start of every
    /// cycle after the first.
    pub i0: u32,
    /// Number of cycles to run.
    pub cycles: u32,
    /// Compatibility threshold used when the graph's neighbor lists were
    /// built; kept here only for reporting, the lists are already fixed.
    pub compatibility_threshold: f64,
    /// Standard deviation of the final Gaussian smoothing pass.
    pub sigma: f64,
    /// Electrostatic interaction floor: point pairs closer than this don't
    /// contribute a force.
    pub epsilon: f64,
    pub gravity: Option<Gravity>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            k: 0.1,
            s0: 0.4,
            i0: 90,
            cycles: 5,
            compatibility_threshold: 0.6,
            sigma: 3.0,
            epsilon: 1e-4,
            gravity: None,
        }
    }
}

/// Runs the full cycle/iteration schedule over `graph`'s edges, then applies
/// the one-shot smoothing pass.
pub fn solve(graph: &mut Graph, config: &SolverConfig) {
    let mut step = config.s0;
    let mut iterations = config.i0;

    for cycle in 0..config.cycles {
        log::info!(
            target: "fdeb_core::solver",
            "cycle {}/{}: step={step:.4}, iterations={iterations}",
            cycle + 1,
            config.cycles
        );

        if cycle > 0 {
            for edge in graph.edges_mut() {
                edge.resubdivide();
            }
        }

        for _ in 0..iterations {
            run_iteration(graph, config, step);
        }

        step /= 2.0;
        iterations = (iterations * 2) / 3;
    }

    for edge in graph.edges_mut() {
        edge.smooth(config.sigma);
    }
}

fn run_iteration(graph: &mut Graph, config: &SolverConfig, step: f64) {
    let edge_count = graph.edges().len();
    let mut forces: Vec<Vec<Vector2>> = graph
        .edges()
        .iter()
        .map(|e| vec![Vector2::ZERO; e.subdivision_count()])
        .collect();

    for i in 0..edge_count {
        graph.edges()[i].add_spring_force(&mut forces[i], config.k);
    }

    for i in 0..edge_count {
        let neighbors = graph.edges()[i].neighbors().to_vec();
        for j in neighbors {
            if j > i {
                let (left, right) = forces.split_at_mut(j);
                graph.edges()[i].add_electrostatic_force(&mut left[i], &graph.edges()[j], config.epsilon);
                graph.edges()[j].add_electrostatic_force(&mut right[0], &graph.edges()[i], config.epsilon);
            }
        }
    }

    if let Some(gravity) = config.gravity {
        for i in 0..edge_count {
            graph.edges()[i].add_gravity_force(&mut forces[i], gravity.center, gravity.exponent);
        }
    }

    for (i, edge) in graph.edges_mut().iter_mut().enumerate() {
        edge.apply_step(&forces[i], step);
    }
}
