use grid_util::point::Point;

use crate::grid::Grid;
use crate::solver::frontier::PriorityFrontier;
use crate::solver::SearchStrategy;
use crate::{Algorithm, Cost};

/// Uniform-cost search. Stepping onto a cell costs that cell's weight.
///
/// Every route into a cell ends by paying that cell's weight, and cells are expanded in cost order,
/// so the first discovery of a cell is already its cheapest. Dijkstra never records
/// `FrontierUpdated` and never skips a stale entry.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

impl SearchStrategy for DijkstraSolver {
    type Frontier = PriorityFrontier<Cost>;

    fn algorithm(&self) -> Algorithm {
        Algorithm::Dijkstra
    }

    fn frontier(&self) -> Self::Frontier {
        PriorityFrontier::default()
    }

    fn cost(&self, grid: &Grid, _: Point, to: Point) -> Cost {
        grid.entry_cost(to)
    }

    fn improves(&self, current: Cost, new_cost: Cost) -> bool {
        new_cost < current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::reconstruct;
    use crate::{Coord, GridSpec};

    #[test]
    fn routes_around_heavy_cells() {
        let grid = "S9E\n...".parse::<GridSpec>().unwrap().build().unwrap();
        let run = DijkstraSolver.run(&grid);
        let path = reconstruct(&run.nodes, run.terminal, grid.start()).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(grid.path_cost(path.cells()), Some(4));
        let (_, end) = run.nodes.get_index(run.terminal.unwrap()).unwrap();
        assert_eq!(end.cost, 4);
    }

    #[test]
    fn equal_costs_expand_in_discovery_order() {
        // Both neighbours of the start cost 1; the right one was pushed first.
        let grid = "S.\n.E".parse::<GridSpec>().unwrap().build().unwrap();
        let run = DijkstraSolver.run(&grid);
        let order: Vec<_> = run.trace.visited_order().collect();
        assert_eq!(
            order,
            vec![
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(1, 1)
            ]
        );
    }
}
