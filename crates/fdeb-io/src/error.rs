use std::io;
use std::path::PathBuf;

/// The fatal-error taxonomy of §7: everything that can go wrong loading an
/// input file or writing the JSON result. `fdeb-core` itself never returns
/// this — graph construction there is infallible by the time it receives
/// records from this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read {path}: {source}")]
    Missing { path: PathBuf, source: io::Error },

    #[error("{path}:{line}: malformed record: {detail}")]
    Malformed {
        path: PathBuf,
        line: usize,
        detail: String,
    },

    #[error("{path}:{line}: edge references unknown label {label:?}")]
    UnknownLabel {
        path: PathBuf,
        line: usize,
        label: String,
    },

    #[error("cannot write {path}: {source}")]
    OutputFailure { path: PathBuf, source: io::Error },
}
