use grid_util::point::Point;

use crate::grid::Grid;
use crate::solver::frontier::FifoFrontier;
use crate::solver::SearchStrategy;
use crate::{Algorithm, Cost};

/// Breadth-first search. Every step counts as one regardless of cell weights, so the path it finds
/// is shortest in edge count only. A cell keeps the parent it was first discovered from.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsSolver;

impl SearchStrategy for BfsSolver {
    type Frontier = FifoFrontier<Cost>;

    fn algorithm(&self) -> Algorithm {
        Algorithm::Bfs
    }

    fn frontier(&self) -> Self::Frontier {
        FifoFrontier::default()
    }

    fn cost(&self, _: &Grid, _: Point, _: Point) -> Cost {
        1
    }

    fn improves(&self, _: Cost, _: Cost) -> bool {
        false
    }
}
