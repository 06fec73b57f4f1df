use grid_util::point::Point;

use crate::grid::Grid;
use crate::solver::frontier::PriorityFrontier;
use crate::solver::SearchStrategy;
use crate::{Algorithm, Cost};

/// A* with the Manhattan distance to the end as heuristic. Every step costs at least one, so the
/// estimate never overshoots and drops by at most the cost of any single step.
#[derive(Clone, Copy, Debug, Default)]
pub struct AstarSolver;

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver
    }
}

impl SearchStrategy for AstarSolver {
    type Frontier = PriorityFrontier<Cost>;

    fn algorithm(&self) -> Algorithm {
        Algorithm::Astar
    }

    fn frontier(&self) -> Self::Frontier {
        PriorityFrontier::default()
    }

    fn cost(&self, grid: &Grid, _: Point, to: Point) -> Cost {
        grid.entry_cost(to)
    }

    fn heuristic(&self, grid: &Grid, point: Point) -> Cost {
        grid.manhattan_to_end(point)
    }

    fn improves(&self, current: Cost, new_cost: Cost) -> bool {
        new_cost < current
    }
}
