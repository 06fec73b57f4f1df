use grid_util::point::Point;

use crate::grid::Grid;
use crate::solver::frontier::LifoFrontier;
use crate::solver::SearchStrategy;
use crate::{Algorithm, Cost};

/// Depth-first search over a stack. Neighbours are pushed up, right, down, left, so the last one
/// pushed is explored first. Rediscovering a cell that is still on the stack pushes it again from
/// the newer, deeper route, which is what lets DFS wander down long detours. Costs are depths.
#[derive(Clone, Copy, Debug, Default)]
pub struct DfsSolver;

impl SearchStrategy for DfsSolver {
    type Frontier = LifoFrontier<Cost>;

    fn algorithm(&self) -> Algorithm {
        Algorithm::Dfs
    }

    fn frontier(&self) -> Self::Frontier {
        LifoFrontier::default()
    }

    fn cost(&self, _: &Grid, _: Point, _: Point) -> Cost {
        1
    }

    fn improves(&self, _: Cost, _: Cost) -> bool {
        true
    }
}
