//! Generation errors

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

/// Errors raised by the grid, the template catalog and the builders
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    #[error("invalid grid size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    #[error("tile ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    #[error("no room template fits into a {width}x{height} interior")]
    NoFittingTemplate { width: i32, height: i32 },

    #[error("room template catalog is empty")]
    EmptyCatalog,

    #[error("invalid room template '{name}': {reason}")]
    InvalidTemplate { name: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("nodes {a} and {b} are not adjacent")]
    NotAdjacent { a: usize, b: usize },

    #[error("node {node} cannot reach the connected component")]
    Disconnected { node: usize },
}

pub type GenResult<T> = Result<T, GenError>;

/// Generation stage, used to tell the caller where a run failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    Setup,
    Partition,
    Placement,
    Corridor,
}

/// A failed generation run: which stage, which area/section, and why
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{stage} failed for {target}: {source}")]
pub struct GenerationError {
    pub stage: Stage,
    pub target: String,
    #[source]
    pub source: GenError,
}

impl GenerationError {
    pub fn new(stage: Stage, target: impl Into<String>, source: GenError) -> Self {
        Self {
            stage,
            target: target.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_message() {
        let err = GenerationError::new(
            Stage::Placement,
            "area 0",
            GenError::NoFittingTemplate {
                width: 6,
                height: 5,
            },
        );
        assert_eq!(
            err.to_string(),
            "placement failed for area 0: no room template fits into a 6x5 interior"
        );
    }

    #[test]
    fn test_out_of_bounds_message() {
        let err = GenError::OutOfBounds {
            x: -1,
            y: 3,
            width: 10,
            height: 10,
        };
        assert_eq!(err.to_string(), "tile (-1, 3) is outside the 10x10 grid");
    }
}
