//! The shared stepping loop and the [SearchStrategy] seam the four algorithms plug into.
//!
//! A run keeps every discovered cell in an arena ([NodeArena]) keyed by position, so parent links
//! are plain indices. Frontier entries point into the arena too. Nothing outlives the run except
//! the frozen [Trace] and whatever the caller reconstructs from the arena.
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;

use crate::grid::Grid;
use crate::trace::{Trace, TraceEvent, TraceRecorder};
use crate::{Algorithm, Cost};

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;
pub mod frontier;

use frontier::{Frontier, FrontierEntry};

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Discovered cells in discovery order. An index into this map is a node's identity.
pub type NodeArena = FxIndexMap<Point, SearchNode>;

/// Algorithm-local bookkeeping for one discovered cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchNode {
    /// Cost of the best known route to this cell under the strategy's cost model.
    pub cost: Cost,
    /// Heuristic estimate of the remaining cost to the end.
    pub estimate: Cost,
    /// Arena index of the node this cell was reached from, [None] for the start.
    pub parent: Option<usize>,
    /// Position in the visitation order once finalized.
    pub visit_order: Option<usize>,
}

impl SearchNode {
    pub fn is_visited(&self) -> bool {
        self.visit_order.is_some()
    }
}

pub trait SearchStrategy {
    type Frontier: Frontier<Cost>;

    fn algorithm(&self) -> Algorithm;

    fn frontier(&self) -> Self::Frontier;

    /// Cost of stepping from `from` onto the adjacent cell `to`.
    fn cost(&self, grid: &Grid, from: Point, to: Point) -> Cost;

    fn heuristic(&self, _grid: &Grid, _point: Point) -> Cost {
        0
    }

    /// Whether reaching a cell that is already in the frontier at `new_cost` replaces its
    /// current route costing `current`.
    fn improves(&self, current: Cost, new_cost: Cost) -> bool;

    fn search<'a>(&'a self, grid: &'a Grid) -> Search<'a, Self>
    where
        Self: Sized,
    {
        Search::new(grid, self)
    }

    /// Steps until the end is visited or the frontier runs dry.
    fn run(&self, grid: &Grid) -> SearchRun
    where
        Self: Sized,
    {
        let mut search = self.search(grid);
        while !search.step().is_terminal() {}
        search.finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// A node was finalized and its neighbours examined.
    Expanded,
    /// A frontier entry for an already finalized node was discarded.
    Skipped,
    /// The end cell was finalized; holds its arena index.
    Found(usize),
    /// The frontier is empty and the end was never reached.
    Exhausted,
}

impl StepOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepOutcome::Found(_) | StepOutcome::Exhausted)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Frontier pops, stale ones included.
    pub steps: usize,
    pub visited: usize,
    pub stale_skips: usize,
    pub frontier_peak: usize,
}

/// Everything a finished run leaves behind.
#[derive(Clone, Debug)]
pub struct SearchRun {
    pub trace: Trace,
    pub nodes: NodeArena,
    /// Arena index of the end cell if it was reached.
    pub terminal: Option<usize>,
    pub stats: SearchStats,
}

/// In-flight state of one run. Owned by a single caller; dropping it discards the run.
pub struct Search<'a, S: SearchStrategy> {
    grid: &'a Grid,
    strategy: &'a S,
    frontier: S::Frontier,
    nodes: NodeArena,
    recorder: TraceRecorder,
    next_seq: usize,
    stats: SearchStats,
    outcome: Option<StepOutcome>,
}

impl<'a, S: SearchStrategy> Search<'a, S> {
    pub fn new(grid: &'a Grid, strategy: &'a S) -> Search<'a, S> {
        let start = grid.start_point();
        let estimate = strategy.heuristic(grid, start);
        let mut nodes = NodeArena::default();
        nodes.insert(
            start,
            SearchNode {
                cost: 0,
                estimate,
                parent: None,
                visit_order: None,
            },
        );
        let mut frontier = strategy.frontier();
        frontier.push(FrontierEntry::root(0, estimate));
        let mut recorder = TraceRecorder::new();
        recorder.record(TraceEvent::FrontierAdded {
            cell: start.into(),
        });
        Search {
            grid,
            strategy,
            frontier,
            nodes,
            recorder,
            next_seq: 1,
            stats: SearchStats {
                frontier_peak: 1,
                ..SearchStats::default()
            },
            outcome: None,
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn steps(&self) -> usize {
        self.stats.steps
    }

    pub fn nodes(&self) -> &NodeArena {
        &self.nodes
    }

    /// Entries still waiting in the frontier, stale ones included.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Events recorded so far.
    pub fn events_recorded(&self) -> usize {
        self.recorder.len()
    }

    /// Pops one frontier entry and acts on it. Once a terminal outcome is reached it is returned
    /// again on every further call.
    pub fn step(&mut self) -> StepOutcome {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        let Some(entry) = self.frontier.pop() else {
            self.outcome = Some(StepOutcome::Exhausted);
            return StepOutcome::Exhausted;
        };
        self.stats.steps += 1;

        let Some((&pos, &node)) = self.nodes.get_index(entry.index) else {
            self.stats.stale_skips += 1;
            return StepOutcome::Skipped;
        };
        // A node may sit in the frontier several times after cheaper rediscoveries; only the
        // first entry to surface is expanded.
        if node.is_visited() {
            self.stats.stale_skips += 1;
            return StepOutcome::Skipped;
        }
        self.nodes[entry.index].visit_order = Some(self.stats.visited);
        self.stats.visited += 1;
        self.recorder
            .record(TraceEvent::Visited { cell: pos.into() });

        if pos == self.grid.end_point() {
            let outcome = StepOutcome::Found(entry.index);
            self.outcome = Some(outcome);
            return outcome;
        }

        for next in self.grid.neighbour_points(pos) {
            let new_cost = node.cost + self.strategy.cost(self.grid, pos, next);
            let (index, estimate, event) = match self.nodes.entry(next) {
                Vacant(e) => {
                    let estimate = self.strategy.heuristic(self.grid, next);
                    let index = e.index();
                    e.insert(SearchNode {
                        cost: new_cost,
                        estimate,
                        parent: Some(entry.index),
                        visit_order: None,
                    });
                    (index, estimate, TraceEvent::FrontierAdded { cell: next.into() })
                }
                Occupied(mut e) => {
                    let known = e.get_mut();
                    if known.is_visited() || !self.strategy.improves(known.cost, new_cost) {
                        continue;
                    }
                    known.cost = new_cost;
                    known.parent = Some(entry.index);
                    let estimate = known.estimate;
                    (
                        e.index(),
                        estimate,
                        TraceEvent::FrontierUpdated {
                            cell: next.into(),
                            cost: new_cost,
                        },
                    )
                }
            };
            self.frontier.push(FrontierEntry {
                index,
                cost: new_cost,
                estimate,
                seq: self.next_seq,
            });
            self.next_seq += 1;
            self.recorder.record(event);
        }
        self.stats.frontier_peak = self.stats.frontier_peak.max(self.frontier.len());
        StepOutcome::Expanded
    }

    /// Freezes the trace and hands over the arena.
    pub fn finish(self) -> SearchRun {
        let terminal = match self.outcome {
            Some(StepOutcome::Found(index)) => Some(index),
            _ => None,
        };
        SearchRun {
            trace: self.recorder.finish(),
            nodes: self.nodes,
            terminal,
            stats: self.stats,
        }
    }
}
