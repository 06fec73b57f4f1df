//! # grid_search_trace
//!
//! Replayable graph search on a 4-connected, weighted grid. Four interchangeable strategies
//! ([Dijkstra](solver::dijkstra), [breadth-first](solver::bfs), [depth-first](solver::dfs) and
//! [A*](solver::astar)) share one stepping loop which records every frontier and visitation
//! decision into a [Trace]. Since the trace is computed up front, a visualization layer can play it
//! back at whatever pace it likes without re-entering the engine.
//!
//! ```
//! use grid_search_trace::{execute, GridSpec, PathResult};
//!
//! let spec: GridSpec = "S.E".parse().unwrap();
//! let response = execute(&spec, "astar").unwrap();
//! assert_eq!(response.path.len(), 3);
//! assert!(matches!(response.path, PathResult::Found(_)));
//! ```
pub mod catalog;
pub mod engine;
pub mod error;
pub mod grid;
pub mod maze;
pub mod path;
pub mod solver;
pub mod trace;

pub use catalog::{catalog, Algorithm, AlgorithmInfo};
pub use engine::{execute, Engine, RunRequest, RunResponse, RunStats};
pub use error::{EngineError, GridError, PathError};
pub use grid::{Cell, CellState, Coord, Endpoint, Grid, GridSpec, WeightedCell};
pub use path::PathResult;
pub use trace::{Trace, TraceEvent};

/// Cumulative search cost. Cell weights are [u32], so sums never overflow in practice.
pub type Cost = u64;

pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLS: usize = 50;
pub const DEFAULT_START: Coord = Coord::new(10, 10);
pub const DEFAULT_END: Coord = Coord::new(10, 40);
pub const DEFAULT_WEIGHT: u32 = 1;
