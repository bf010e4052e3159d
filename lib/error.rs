//! Error type shared by everything in the crate.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot find config file: {0:?}")]
    MissingConfig(PathBuf),

    #[error("shape mismatch between target {target:?} and prediction {predicted:?}")]
    ShapeMismatch {
        target: (usize, usize),
        predicted: (usize, usize),
    },

    #[error("invalid shape: expected rows of width {expected}, got {found}")]
    InvalidShape { expected: usize, found: usize },

    #[error("failed to run external program {program:?}: {source}")]
    Solver {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed objective value {value:?} on line {line} of {path:?}")]
    Objective {
        path: PathBuf,
        line: usize,
        value: String,
    },

    #[error("objective file {0:?} contains no values")]
    EmptyObjective(PathBuf),

    #[error("unknown experiment preset {0:?}")]
    UnknownPreset(String),

    #[error("unknown gate {0:?}")]
    UnknownGate(String),

    #[error("failed to parse TOML {path:?}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to read array from {path:?}: {source}")]
    ReadNpy {
        path: PathBuf,
        #[source]
        source: ndarray_npy::ReadNpyError,
    },

    #[error("failed to write array to {path:?}: {source}")]
    WriteNpy {
        path: PathBuf,
        #[source]
        source: ndarray_npy::WriteNpyError,
    },

    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io<P>(path: P) -> impl FnOnce(std::io::Error) -> Self
    where P: Into<PathBuf>
    {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
