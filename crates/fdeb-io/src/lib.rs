//! File loading and JSON output for the edge bundling solver. Everything
//! fallible lives here so `fdeb-core` can stay pure computation.

mod error;
mod reader;
mod writer;

pub use error::Error;
pub use reader::{read_edges, read_nodes};
pub use writer::write_json;
