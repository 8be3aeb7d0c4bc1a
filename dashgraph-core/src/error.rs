//! Error Types
//!
//! Every failure in this crate is a setup-time or contract-violation error.
//! Changing an input to a value inside its declared domain never produces
//! one of these.

use thiserror::Error;

/// Failure to bring a dataset into memory.
///
/// Fatal: a dashboard cannot start without its dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dataset from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch dataset from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column `{column}`")]
    MissingColumn { column: String },

    #[error("row {row}: column `{column}` expected a number, found `{value}`")]
    TypeMismatch {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}: expected {expected} values, found {found}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A view function referenced something the dataset or its wiring does not
/// provide.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputationError {
    #[error("column `{column}` is not present in the dataset")]
    MissingColumn { column: String },

    #[error("column `{column}` holds non-numeric value `{value}`")]
    NonNumeric { column: String, value: String },

    #[error("input `{input}` was read but not declared as a dependency")]
    UndeclaredInput { input: String },

    #[error("input `{input}` holds a {found} value, expected a {expected} value")]
    UnexpectedValue {
        input: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Errors raised while wiring or driving the reactive graph.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("output `{0}` is already declared")]
    DuplicateOutput(String),

    #[error("input `{0}` is already declared")]
    DuplicateInput(String),

    #[error("unknown input `{0}`")]
    UnknownInput(String),

    #[error("unknown output `{0}`")]
    UnknownOutput(String),

    #[error("value {value} is outside the domain of input `{input}`")]
    OutOfDomain { input: String, value: String },

    #[error("computing output `{output}` failed: {source}")]
    Computation {
        output: String,
        #[source]
        source: ComputationError,
    },
}

/// Failure to hand a view to a render sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode frame as json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode frame as msgpack: {0}")]
    MsgPack(#[from] rmp_serde::encode::Error),
}

/// Failure to read or parse the dashboard configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Umbrella error for the dashboard-level entry points.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Computation(#[from] ComputationError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computation_error_surfaces_through_graph_error() {
        let err = GraphError::Computation {
            output: "pie".into(),
            source: ComputationError::MissingColumn {
                column: "Launch Site".into(),
            },
        };
        let message = err.to_string();
        assert!(message.contains("pie"));
        assert!(message.contains("Launch Site"));
    }

    #[test]
    fn dashboard_error_wraps_graph_error() {
        let err: DashboardError = GraphError::DuplicateOutput("pie".into()).into();
        assert_eq!(err.to_string(), "output `pie` is already declared");
    }
}
