use core::fmt;
use std::str::FromStr;

use grid_util::grid::{BoolGrid, SimpleValueGrid, ValueGrid};
use grid_util::point::Point;
use log::debug;
use petgraph::unionfind::UnionFind;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::GridError;
use crate::{maze, Cost, DEFAULT_COLS, DEFAULT_END, DEFAULT_ROWS, DEFAULT_START, DEFAULT_WEIGHT};

/// Largest number of cells a grid may hold. Coordinates and cell indices must fit a [Point]'s
/// `i32` components.
pub const MAX_CELLS: usize = i32::MAX as usize;

/// Up, right, down, left as `(dx, dy)`. Every strategy sees neighbours in this order.
const NEUMANN_OFFSETS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// A cell position, counted from the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Coord {
        Coord { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<Coord> for Point {
    fn from(cell: Coord) -> Point {
        Point::new(cell.col as i32, cell.row as i32)
    }
}

impl From<Point> for Coord {
    fn from(point: Point) -> Coord {
        Coord::new(point.y as usize, point.x as usize)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CellState {
    Open,
    Wall,
    Start,
    End,
}

/// A cell as the search sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub position: Coord,
    pub state: CellState,
    /// Traversal weight. Walls keep theirs but are never entered.
    pub weight: u32,
}

/// Overrides the traversal weight of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeightedCell {
    pub cell: Coord,
    pub weight: u32,
}

/// Caller-side description of a grid. Nothing is validated until [GridSpec::build].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridSpec {
    pub rows: usize,
    pub cols: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub walls: Vec<Coord>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weights: Vec<WeightedCell>,
    pub start: Coord,
    pub end: Coord,
}

impl Default for GridSpec {
    fn default() -> GridSpec {
        GridSpec::new(DEFAULT_ROWS, DEFAULT_COLS, DEFAULT_START, DEFAULT_END)
    }
}

impl GridSpec {
    pub fn new(rows: usize, cols: usize, start: Coord, end: Coord) -> GridSpec {
        GridSpec {
            rows,
            cols,
            walls: Vec::new(),
            weights: Vec::new(),
            start,
            end,
        }
    }

    pub fn with_wall(mut self, cell: Coord) -> GridSpec {
        self.walls.push(cell);
        self
    }

    pub fn with_walls<I: IntoIterator<Item = Coord>>(mut self, cells: I) -> GridSpec {
        self.walls.extend(cells);
        self
    }

    pub fn with_weight(mut self, cell: Coord, weight: u32) -> GridSpec {
        self.weights.push(WeightedCell { cell, weight });
        self
    }

    /// Adds the walls of a recursive-division maze generated from `seed`.
    pub fn with_maze(self, seed: u64) -> GridSpec {
        let walls = maze::recursive_division(self.rows, self.cols, self.start, self.end, seed);
        self.with_walls(walls)
    }

    pub fn build(&self) -> Result<Grid, GridError> {
        Grid::build(
            self.rows,
            self.cols,
            &self.walls,
            &self.weights,
            self.start,
            self.end,
        )
    }
}

/// Parses the text notation also produced by [Grid]'s [Display](fmt::Display) impl:
/// `S` start, `E` end, `#` wall, `.` open and `1`-`9` an open cell of that weight.
impl FromStr for GridSpec {
    type Err = GridError;

    fn from_str(s: &str) -> Result<GridSpec, GridError> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let rows = lines.len();
        let cols = lines.first().map_or(0, |line| line.chars().count());
        let mut walls = Vec::new();
        let mut weights = Vec::new();
        let mut start = None;
        let mut end = None;
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(GridError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                let cell = Coord::new(row, col);
                match symbol {
                    '.' => {}
                    '#' => walls.push(cell),
                    'S' | 'E' => {
                        let (endpoint, slot) = if symbol == 'S' {
                            (Endpoint::Start, &mut start)
                        } else {
                            (Endpoint::End, &mut end)
                        };
                        if slot.replace(cell).is_some() {
                            return Err(GridError::DuplicateEndpoint { endpoint, cell });
                        }
                    }
                    '1'..='9' => {
                        let weight = symbol.to_digit(10).unwrap_or(DEFAULT_WEIGHT);
                        if weight != DEFAULT_WEIGHT {
                            weights.push(WeightedCell { cell, weight });
                        }
                    }
                    _ => return Err(GridError::UnknownSymbol { symbol, cell }),
                }
            }
        }
        Ok(GridSpec {
            rows,
            cols,
            walls,
            weights,
            start: start.ok_or(GridError::MissingEndpoint(Endpoint::Start))?,
            end: end.ok_or(GridError::MissingEndpoint(Endpoint::End))?,
        })
    }
}

/// Validated, read-only search substrate. Walls are kept in a [BoolGrid] (blocked is [true]),
/// weights in a parallel [SimpleValueGrid], and the 4-connected components of the open cells
/// in a [UnionFind] so reachability can be answered without searching.
#[derive(Clone, Debug)]
pub struct Grid {
    walls: BoolGrid,
    weights: SimpleValueGrid<u32>,
    start: Point,
    end: Point,
    components: UnionFind<usize>,
}

fn contains(rows: usize, cols: usize, cell: Coord) -> bool {
    cell.row < rows && cell.col < cols
}

impl Grid {
    pub fn build(
        rows: usize,
        cols: usize,
        walls: &[Coord],
        weights: &[WeightedCell],
        start: Coord,
        end: Coord,
    ) -> Result<Grid, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyDimensions { rows, cols });
        }
        if rows.checked_mul(cols).map_or(true, |cells| cells > MAX_CELLS) {
            return Err(GridError::TooLarge { rows, cols });
        }
        for (endpoint, cell) in [(Endpoint::Start, start), (Endpoint::End, end)] {
            if !contains(rows, cols, cell) {
                return Err(GridError::EndpointOutOfBounds {
                    endpoint,
                    cell,
                    rows,
                    cols,
                });
            }
        }
        if start == end {
            return Err(GridError::CoincidentEndpoints(start));
        }

        let mut wall_grid = BoolGrid::new(cols, rows, false);
        for &cell in walls {
            if !contains(rows, cols, cell) {
                return Err(GridError::WallOutOfBounds { cell, rows, cols });
            }
            if cell == start || cell == end {
                let endpoint = if cell == start {
                    Endpoint::Start
                } else {
                    Endpoint::End
                };
                return Err(GridError::EndpointIsWall { endpoint, cell });
            }
            wall_grid.set_point(cell.into(), true);
        }

        let mut weight_grid = SimpleValueGrid::new(cols, rows, DEFAULT_WEIGHT);
        for &WeightedCell { cell, weight } in weights {
            if !contains(rows, cols, cell) {
                return Err(GridError::WeightOutOfBounds { cell, rows, cols });
            }
            if weight == 0 {
                return Err(GridError::NonPositiveWeight { cell });
            }
            weight_grid.set_point(cell.into(), weight);
        }

        debug!(
            "Built {}x{} grid with {} walls and {} weight overrides",
            rows,
            cols,
            walls.len(),
            weights.len()
        );
        let mut grid = Grid {
            walls: wall_grid,
            weights: weight_grid,
            start: start.into(),
            end: end.into(),
            components: UnionFind::new(rows * cols),
        };
        grid.generate_components();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.walls.height()
    }

    pub fn cols(&self) -> usize {
        self.walls.width()
    }

    pub fn start(&self) -> Coord {
        self.start.into()
    }

    pub fn end(&self) -> Coord {
        self.end.into()
    }

    pub(crate) fn start_point(&self) -> Point {
        self.start
    }

    pub(crate) fn end_point(&self) -> Point {
        self.end
    }

    fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.cols() && (p.y as usize) < self.rows()
    }

    /// Whether a search may step onto `p`.
    pub fn can_move_to(&self, p: Point) -> bool {
        self.in_bounds(p) && !self.walls.get_point(p)
    }

    pub fn state(&self, cell: Coord) -> Option<CellState> {
        let p: Point = cell.into();
        if !self.in_bounds(p) {
            None
        } else if p == self.start {
            Some(CellState::Start)
        } else if p == self.end {
            Some(CellState::End)
        } else if self.walls.get_point(p) {
            Some(CellState::Wall)
        } else {
            Some(CellState::Open)
        }
    }

    pub fn cell(&self, position: Coord) -> Option<Cell> {
        let state = self.state(position)?;
        Some(Cell {
            position,
            state,
            weight: self.weights.get_point(position.into()),
        })
    }

    /// Traversal weight of `cell`, or [None] for walls and out-of-bounds cells.
    pub fn weight(&self, cell: Coord) -> Option<u32> {
        let p: Point = cell.into();
        self.can_move_to(p).then(|| self.weights.get_point(p))
    }

    /// Cost of entering `p`. Only meaningful for cells that pass [can_move_to](Self::can_move_to).
    pub(crate) fn entry_cost(&self, p: Point) -> Cost {
        self.weights.get_point(p) as Cost
    }

    pub(crate) fn manhattan_to_end(&self, p: Point) -> Cost {
        p.manhattan_distance(&self.end) as Cost
    }

    pub(crate) fn neighbour_points(&self, p: Point) -> SmallVec<[Point; 4]> {
        NEUMANN_OFFSETS
            .iter()
            .map(|&(dx, dy)| Point::new(p.x + dx, p.y + dy))
            .filter(|&n| self.can_move_to(n))
            .collect()
    }

    /// The traversable orthogonal neighbours of `cell`, in up, right, down, left order.
    pub fn neighbours(&self, cell: Coord) -> SmallVec<[Coord; 4]> {
        self.neighbour_points(cell.into())
            .into_iter()
            .map(Coord::from)
            .collect()
    }

    /// Checks if `a` and `b` are open cells on the same connected component.
    pub fn reachable(&self, a: Coord, b: Coord) -> bool {
        let (pa, pb): (Point, Point) = (a.into(), b.into());
        self.can_move_to(pa)
            && self.can_move_to(pb)
            && self
                .components
                .equiv(self.walls.get_ix_point(&pa), self.walls.get_ix_point(&pb))
    }

    /// Links every open cell to its open right and lower neighbour. Together these cover all
    /// 4-connected edges.
    fn generate_components(&mut self) {
        for y in 0..self.rows() as i32 {
            for x in 0..self.cols() as i32 {
                let point = Point::new(x, y);
                if !self.can_move_to(point) {
                    continue;
                }
                let parent_ix = self.walls.get_ix_point(&point);
                for n in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                    if self.can_move_to(n) {
                        let ix = self.walls.get_ix_point(&n);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }

    /// Sum of the weights of every cell entered along `path`. Returns [None] if the path is empty,
    /// crosses a wall or leaves the grid, or contains a step that is not orthogonally adjacent.
    pub fn path_cost(&self, path: &[Coord]) -> Option<Cost> {
        let (first, rest) = path.split_first()?;
        let mut previous: Point = (*first).into();
        if !self.can_move_to(previous) {
            return None;
        }
        let mut total = 0;
        for &cell in rest {
            let p: Point = cell.into();
            if !self.can_move_to(p) || previous.manhattan_distance(&p) != 1 {
                return None;
            }
            total += self.entry_cost(p);
            previous = p;
        }
        Some(total)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let cell = Coord::new(row, col);
                let symbol = match self.state(cell) {
                    Some(CellState::Start) => 'S',
                    Some(CellState::End) => 'E',
                    Some(CellState::Wall) => '#',
                    _ => match self.weight(cell) {
                        Some(w) if w > 9 => '+',
                        Some(w) if w > 1 => char::from_digit(w, 10).unwrap_or('+'),
                        _ => '.',
                    },
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: usize, col: usize) -> Coord {
        Coord::new(row, col)
    }

    #[test]
    fn rejects_empty_dimensions() {
        let err = Grid::build(0, 3, &[], &[], c(0, 0), c(0, 1)).unwrap_err();
        assert_eq!(err, GridError::EmptyDimensions { rows: 0, cols: 3 });
    }

    #[test]
    fn rejects_oversized_dimensions() {
        let err = Grid::build(usize::MAX / 2, 4, &[], &[], c(0, 0), c(0, 1)).unwrap_err();
        assert_eq!(
            err,
            GridError::TooLarge {
                rows: usize::MAX / 2,
                cols: 4
            }
        );
        let wide = MAX_CELLS + 1;
        let err = Grid::build(1, wide, &[], &[], c(0, 0), c(0, 1)).unwrap_err();
        assert_eq!(err, GridError::TooLarge { rows: 1, cols: wide });
    }

    #[test]
    fn rejects_bad_endpoints() {
        let out = Grid::build(2, 2, &[], &[], c(0, 0), c(2, 0)).unwrap_err();
        assert!(matches!(
            out,
            GridError::EndpointOutOfBounds {
                endpoint: Endpoint::End,
                ..
            }
        ));
        let same = Grid::build(2, 2, &[], &[], c(1, 1), c(1, 1)).unwrap_err();
        assert_eq!(same, GridError::CoincidentEndpoints(c(1, 1)));
        let walled = Grid::build(2, 2, &[c(0, 0)], &[], c(0, 0), c(1, 1)).unwrap_err();
        assert_eq!(
            walled,
            GridError::EndpointIsWall {
                endpoint: Endpoint::Start,
                cell: c(0, 0)
            }
        );
    }

    #[test]
    fn rejects_zero_weight_and_stray_cells() {
        let weights = [WeightedCell {
            cell: c(0, 1),
            weight: 0,
        }];
        let err = Grid::build(1, 3, &[], &weights, c(0, 0), c(0, 2)).unwrap_err();
        assert_eq!(err, GridError::NonPositiveWeight { cell: c(0, 1) });
        let err = Grid::build(1, 3, &[c(4, 4)], &[], c(0, 0), c(0, 2)).unwrap_err();
        assert!(matches!(err, GridError::WallOutOfBounds { .. }));
    }

    #[test]
    fn neighbours_are_ordered_and_skip_walls() {
        // |...|
        // |.S#|
        // |..E|
        let grid = Grid::build(3, 3, &[c(1, 2)], &[], c(1, 1), c(2, 2)).unwrap();
        assert_eq!(grid.neighbours(c(1, 1)).as_slice(), &[c(0, 1), c(2, 1), c(1, 0)]);
        assert_eq!(grid.neighbours(c(0, 0)).as_slice(), &[c(0, 1), c(1, 0)]);
        assert_eq!(grid.weight(c(1, 2)), None);
        assert_eq!(grid.state(c(1, 2)), Some(CellState::Wall));
        assert_eq!(grid.state(c(3, 0)), None);
        assert_eq!(
            grid.cell(c(1, 1)),
            Some(Cell {
                position: c(1, 1),
                state: CellState::Start,
                weight: 1
            })
        );
    }

    /// A full wall column splits the grid into two components.
    #[test]
    fn test_component_generation() {
        let grid: Grid = "S#.\n.#E\n...".parse::<GridSpec>().unwrap().build().unwrap();
        assert!(grid.reachable(c(0, 0), c(1, 2)));
        let split: Grid = "S#.\n.#E\n.#.".parse::<GridSpec>().unwrap().build().unwrap();
        assert!(!split.reachable(c(0, 0), c(1, 2)));
        assert!(split.reachable(c(0, 0), c(2, 0)));
        assert!(!split.reachable(c(0, 0), c(0, 1)));
    }

    #[test]
    fn parses_and_displays_layout() {
        let layout = "S.3#\n..#E\n9...\n";
        let spec: GridSpec = layout.parse().unwrap();
        assert_eq!(spec.rows, 3);
        assert_eq!(spec.cols, 4);
        assert_eq!(spec.start, c(0, 0));
        assert_eq!(spec.end, c(1, 3));
        assert_eq!(spec.walls, vec![c(0, 3), c(1, 2)]);
        let grid = spec.build().unwrap();
        assert_eq!(grid.weight(c(0, 2)), Some(3));
        assert_eq!(grid.weight(c(2, 0)), Some(9));
        assert_eq!(grid.to_string(), layout);
    }

    #[test]
    fn rejects_malformed_layouts() {
        assert!(matches!(
            "S..\n.E".parse::<GridSpec>(),
            Err(GridError::RaggedRow { row: 1, .. })
        ));
        assert!(matches!(
            "S.x\n..E".parse::<GridSpec>(),
            Err(GridError::UnknownSymbol { symbol: 'x', .. })
        ));
        assert_eq!(
            "S..\n...".parse::<GridSpec>(),
            Err(GridError::MissingEndpoint(Endpoint::End))
        );
        assert!(matches!(
            "S.S\n..E".parse::<GridSpec>(),
            Err(GridError::DuplicateEndpoint {
                endpoint: Endpoint::Start,
                ..
            })
        ));
    }

    #[test]
    fn path_cost_sums_entered_weights() {
        let grid = "S5E\n...".parse::<GridSpec>().unwrap().build().unwrap();
        assert_eq!(grid.path_cost(&[c(0, 0), c(0, 1), c(0, 2)]), Some(6));
        assert_eq!(grid.path_cost(&[c(0, 0), c(1, 0), c(1, 1), c(1, 2), c(0, 2)]), Some(4));
        assert_eq!(grid.path_cost(&[c(0, 0), c(0, 2)]), None);
        assert_eq!(grid.path_cost(&[]), None);
    }

    #[test]
    fn default_spec_matches_visualizer_defaults() {
        let grid = GridSpec::default().build().unwrap();
        assert_eq!((grid.rows(), grid.cols()), (20, 50));
        assert_eq!(grid.start(), c(10, 10));
        assert_eq!(grid.end(), c(10, 40));
        assert!(grid.reachable(grid.start(), grid.end()));
    }
}
