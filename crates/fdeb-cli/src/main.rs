//! Command-line driver: parse flags, load nodes and edges, run the solver,
//! optionally write bundled polylines to JSON.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fdeb_core::{EdgeRecord, Graph, Gravity, NetworkConfig, NodeRecord, SolverConfig};
use fdeb_geom::Vector2;

/// Force-directed edge bundling over a weighted graph of labeled nodes.
#[derive(Parser)]
#[command(name = "fdeb")]
#[command(about = "Bundles compatible edges of a graph into smooth curves")]
struct Cli {
    /// Path to the nodes file (`<label> <x> <y>` per line, header first)
    #[arg(long)]
    nodes: PathBuf,

    /// Path to the edges file (`<source> <target> [<weight>]` per line, header first)
    #[arg(long)]
    edges: PathBuf,

    /// Spring constant
    #[arg(long, default_value_t = SolverConfig::default().k)]
    k: f64,

    /// Initial step size, halved every cycle after the first
    #[arg(long, default_value_t = SolverConfig::default().s0)]
    s: f64,

    /// Initial iteration count per cycle, shrunk by two thirds between cycles
    #[arg(long, default_value_t = SolverConfig::default().i0)]
    i: u32,

    /// Number of cycles to run
    #[arg(long, default_value_t = SolverConfig::default().cycles)]
    cycles: u32,

    /// Compatibility threshold used to build neighbor lists
    #[arg(long, default_value_t = SolverConfig::default().compatibility_threshold)]
    compat: f64,

    /// Standard deviation of the final smoothing pass
    #[arg(long, default_value_t = SolverConfig::default().sigma)]
    sigma: f64,

    /// Electrostatic interaction floor
    #[arg(long, default_value_t = SolverConfig::default().epsilon)]
    epsilon: f64,

    /// Keep only edges with weight strictly above this value
    #[arg(long)]
    edge_weight: Option<f64>,

    /// Keep only the top percentage of edges by weight (0-100)
    #[arg(long)]
    edge_percentage: Option<f64>,

    /// Gravity center x; setting any of the three gravity flags turns gravity on
    #[arg(long)]
    gravitation_center_x: Option<f64>,

    /// Gravity center y
    #[arg(long)]
    gravitation_center_y: Option<f64>,

    /// Gravity falloff exponent; setting any of the three gravity flags
    /// turns gravity on, defaulting to -2.0 if this one is left unset
    #[arg(long)]
    gravitation_exponent: Option<f64>,

    /// Write the bundled edges and node positions as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn network_config(&self) -> NetworkConfig {
        NetworkConfig {
            edge_weight_threshold: self.edge_weight,
            edge_percentile: self.edge_percentage,
        }
    }

    fn gravity(&self) -> Option<Gravity> {
        if self.gravitation_center_x.is_none()
            && self.gravitation_center_y.is_none()
            && self.gravitation_exponent.is_none()
        {
            return None;
        }
        Some(Gravity {
            center: Vector2::new(
                self.gravitation_center_x.unwrap_or(0.0),
                self.gravitation_center_y.unwrap_or(0.0),
            ),
            exponent: self.gravitation_exponent.unwrap_or(-2.0),
        })
    }

    fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            k: self.k,
            s0: self.s,
            i0: self.i,
            cycles: self.cycles,
            compatibility_threshold: self.compat,
            sigma: self.sigma,
            epsilon: self.epsilon,
            gravity: self.gravity(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env().init();

    let cli = Cli::parse();
    if cli.verbose {
        log::info!(target: "fdeb_cli", "nodes={:?} edges={:?}", cli.nodes, cli.edges);
    }

    let node_records: Vec<NodeRecord> =
        fdeb_io::read_nodes(&cli.nodes).context("reading nodes file")?;
    let known_labels = node_records.iter().map(|n| n.label.clone()).collect();
    let edge_records: Vec<EdgeRecord> =
        fdeb_io::read_edges(&cli.edges, &known_labels).context("reading edges file")?;

    let network_config = cli.network_config();
    let solver_config = cli.solver_config();

    let mut graph = Graph::build(
        node_records,
        edge_records,
        &network_config,
        solver_config.compatibility_threshold,
    );

    fdeb_core::solve(&mut graph, &solver_config);

    if let Some(json_path) = &cli.json {
        fdeb_io::write_json(&graph, json_path).context("writing JSON output")?;
    }

    Ok(())
}
