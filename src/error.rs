use thiserror::Error;

use crate::grid::{Coord, Endpoint};

/// Reasons a grid description is rejected before any search runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    EmptyDimensions { rows: usize, cols: usize },
    #[error("a {rows}x{cols} grid exceeds the supported size")]
    TooLarge { rows: usize, cols: usize },
    #[error("{endpoint} {cell} lies outside the {rows}x{cols} grid")]
    EndpointOutOfBounds {
        endpoint: Endpoint,
        cell: Coord,
        rows: usize,
        cols: usize,
    },
    #[error("wall {cell} lies outside the {rows}x{cols} grid")]
    WallOutOfBounds { cell: Coord, rows: usize, cols: usize },
    #[error("weight override {cell} lies outside the {rows}x{cols} grid")]
    WeightOutOfBounds { cell: Coord, rows: usize, cols: usize },
    #[error("start and end coincide at {0}")]
    CoincidentEndpoints(Coord),
    #[error("{endpoint} {cell} is marked as a wall")]
    EndpointIsWall { endpoint: Endpoint, cell: Coord },
    #[error("weight at {cell} must be positive")]
    NonPositiveWeight { cell: Coord },
    #[error("unexpected symbol {symbol:?} at {cell}")]
    UnknownSymbol { symbol: char, cell: Coord },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("layout has no {0}")]
    MissingEndpoint(Endpoint),
    #[error("layout has more than one {endpoint}, second one at {cell}")]
    DuplicateEndpoint { endpoint: Endpoint, cell: Coord },
}

/// A parent chain that cannot be turned into a path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("parent chain from {from} loops back on itself")]
    Cycle { from: Coord },
    #[error("parent chain from {from} ends at {reached} instead of the start")]
    Dangling { from: Coord, reached: Coord },
    #[error("terminal node index {0} is not part of the search arena")]
    MissingNode(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid grid: {0}")]
    InvalidGrid(#[from] GridError),
    #[error("unknown algorithm {0:?}, expected one of dijkstra, bfs, dfs, astar")]
    UnknownAlgorithm(String),
    #[error("run cancelled after {steps} steps")]
    Cancelled { steps: usize },
    #[error("run exceeded the step limit of {0}")]
    StepLimitExceeded(usize),
    #[error("corrupt parent chain: {0}")]
    CorruptParentChain(#[from] PathError),
}
