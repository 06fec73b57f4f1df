//! Entry point for callers: validates a [GridSpec], runs the requested strategy on a fresh grid
//! snapshot and packages the trace, path and counts.
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::path::{reconstruct, PathResult};
use crate::solver::astar::AstarSolver;
use crate::solver::bfs::BfsSolver;
use crate::solver::dfs::DfsSolver;
use crate::solver::dijkstra::DijkstraSolver;
use crate::solver::{Search, SearchRun, SearchStrategy};
use crate::trace::Trace;
use crate::{Algorithm, Cost, Grid, GridSpec};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunRequest {
    pub grid: GridSpec,
    pub algorithm: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunStats {
    pub visited_count: usize,
    /// Frontier pops, including discarded stale entries.
    pub step_count: usize,
    pub stale_skips: usize,
    pub frontier_peak: usize,
    /// Number of cells on the path, zero when unreachable.
    pub path_length: usize,
    /// Total weight of the cells entered along the path.
    pub path_cost: Option<Cost>,
    /// Whether the algorithm promises a shortest path under its own cost model.
    pub guarantees_shortest: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunResponse {
    pub algorithm: Algorithm,
    pub trace: Trace,
    pub path: PathResult,
    pub stats: RunStats,
}

/// Runs searches. Identical inputs always give identical responses.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    /// Upper bound on frontier pops per run; [None] runs to completion.
    pub step_limit: Option<usize>,
}

impl Engine {
    pub fn new() -> Engine {
        Engine::default()
    }

    pub fn with_step_limit(step_limit: usize) -> Engine {
        Engine {
            step_limit: Some(step_limit),
        }
    }

    pub fn handle(&self, request: &RunRequest) -> Result<RunResponse, EngineError> {
        self.execute(&request.grid, &request.algorithm)
    }

    /// Fails with [EngineError::UnknownAlgorithm] or [EngineError::InvalidGrid] before any search
    /// step is taken.
    pub fn execute(&self, spec: &GridSpec, algorithm: &str) -> Result<RunResponse, EngineError> {
        let algorithm: Algorithm = algorithm.parse()?;
        self.execute_algorithm(spec, algorithm)
    }

    pub fn execute_algorithm(
        &self,
        spec: &GridSpec,
        algorithm: Algorithm,
    ) -> Result<RunResponse, EngineError> {
        self.run(spec, algorithm, None)
    }

    /// Like [execute_algorithm](Self::execute_algorithm), but gives up as soon as `cancel` is set.
    /// The in-flight frontier and arena are dropped; nothing is reused by later runs.
    pub fn execute_cancellable(
        &self,
        spec: &GridSpec,
        algorithm: Algorithm,
        cancel: &AtomicBool,
    ) -> Result<RunResponse, EngineError> {
        self.run(spec, algorithm, Some(cancel))
    }

    /// Runs each algorithm in parallel on its own grid snapshot. Responses keep the order of
    /// `algorithms`; the first failure is returned instead.
    pub fn race(
        &self,
        spec: &GridSpec,
        algorithms: &[Algorithm],
    ) -> Result<Vec<RunResponse>, EngineError> {
        algorithms
            .par_iter()
            .map(|&algorithm| self.execute_algorithm(spec, algorithm))
            .collect()
    }

    fn run(
        &self,
        spec: &GridSpec,
        algorithm: Algorithm,
        cancel: Option<&AtomicBool>,
    ) -> Result<RunResponse, EngineError> {
        let grid = spec.build()?;
        info!(
            "Running {} on {}x{} grid from {} to {}",
            algorithm,
            grid.rows(),
            grid.cols(),
            grid.start(),
            grid.end()
        );
        let run = match algorithm {
            Algorithm::Dijkstra => self.drive(&grid, &DijkstraSolver, cancel)?,
            Algorithm::Bfs => self.drive(&grid, &BfsSolver, cancel)?,
            Algorithm::Dfs => self.drive(&grid, &DfsSolver, cancel)?,
            Algorithm::Astar => self.drive(&grid, &AstarSolver, cancel)?,
        };
        let path = reconstruct(&run.nodes, run.terminal, grid.start())?;
        let stats = RunStats {
            visited_count: run.stats.visited,
            step_count: run.stats.steps,
            stale_skips: run.stats.stale_skips,
            frontier_peak: run.stats.frontier_peak,
            path_length: path.len(),
            path_cost: grid.path_cost(path.cells()),
            guarantees_shortest: algorithm.guarantees_shortest(),
        };
        info!(
            "{} finished: {} after visiting {} cells in {} steps",
            algorithm,
            if path.is_found() {
                "path found"
            } else {
                "unreachable"
            },
            stats.visited_count,
            stats.step_count
        );
        Ok(RunResponse {
            algorithm,
            trace: run.trace,
            path,
            stats,
        })
    }

    fn drive<S: SearchStrategy>(
        &self,
        grid: &Grid,
        strategy: &S,
        cancel: Option<&AtomicBool>,
    ) -> Result<SearchRun, EngineError> {
        let mut search = Search::new(grid, strategy);
        loop {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                debug!(
                    "{} cancelled after {} steps",
                    strategy.algorithm(),
                    search.steps()
                );
                return Err(EngineError::Cancelled {
                    steps: search.steps(),
                });
            }
            if let Some(limit) = self.step_limit {
                // The pop that finds the frontier empty takes nothing; it is always allowed.
                if search.steps() >= limit && search.frontier_len() > 0 {
                    warn!("{} hit the step limit of {}", strategy.algorithm(), limit);
                    return Err(EngineError::StepLimitExceeded(limit));
                }
            }
            if search.step().is_terminal() {
                return Ok(search.finish());
            }
        }
    }
}

/// Runs `algorithm` on `spec` with a default [Engine].
pub fn execute(spec: &GridSpec, algorithm: &str) -> Result<RunResponse, EngineError> {
    Engine::default().execute(spec, algorithm)
}
