use thiserror::Error;

/// Errors raised while computing radial distribution distances.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A root node or profile name is not part of the graph it is looked up in.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// A measure returned a different number of values than profiles it was given.
    #[error("measure count mismatch: expected {expected} values, got {actual}")]
    MeasureCountMismatch { expected: usize, actual: usize },

    /// An iterative measure hit its iteration bound without converging.
    #[error("{algorithm} did not converge within {iterations} iterations")]
    NonTerminatingIteration {
        algorithm: &'static str,
        iterations: usize,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn node_not_found<K: std::fmt::Debug>(key: &K) -> Self {
        Error::NodeNotFound(format!("{:?}", key))
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
