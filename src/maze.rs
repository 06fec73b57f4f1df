//! Recursive-division maze walls. The outer border is walled first, then the interior is split by
//! a wall line with a single gap, and both halves are split again until they are too thin.
//! The start and end cells are never walled. The same seed always gives the same maze.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Coord;

pub fn recursive_division(
    rows: usize,
    cols: usize,
    start: Coord,
    end: Coord,
    seed: u64,
) -> Vec<Coord> {
    let mut walls = Vec::new();
    if rows == 0 || cols == 0 {
        return walls;
    }
    let keep_open = |cell: Coord| cell == start || cell == end;
    for row in 0..rows {
        for col in 0..cols {
            let cell = Coord::new(row, col);
            let border = row == 0 || row == rows - 1 || col == 0 || col == cols - 1;
            if border && !keep_open(cell) {
                walls.push(cell);
            }
        }
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut divider = Divider {
        rng: &mut rng,
        walls: &mut walls,
        start,
        end,
    };
    divider.divide(1, rows as isize - 2, 1, cols as isize - 2);
    walls
}

struct Divider<'a> {
    rng: &'a mut StdRng,
    walls: &'a mut Vec<Coord>,
    start: Coord,
    end: Coord,
}

impl Divider<'_> {
    /// Splits the inclusive chamber `[top, bottom] x [left, right]`.
    fn divide(&mut self, top: isize, bottom: isize, left: isize, right: isize) {
        if bottom - top < 2 || right - left < 2 {
            return;
        }
        if self.rng.gen_bool(0.5) {
            let row = self.rng.gen_range(top..bottom);
            let gap = self.rng.gen_range(left..right);
            for col in (left..=right).filter(|&col| col != gap) {
                self.wall(row, col);
            }
            self.divide(top, row - 1, left, right);
            self.divide(row + 1, bottom, left, right);
        } else {
            let col = self.rng.gen_range(left..right);
            let gap = self.rng.gen_range(top..bottom);
            for row in (top..=bottom).filter(|&row| row != gap) {
                self.wall(row, col);
            }
            self.divide(top, bottom, left, col - 1);
            self.divide(top, bottom, col + 1, right);
        }
    }

    fn wall(&mut self, row: isize, col: isize) {
        let cell = Coord::new(row as usize, col as usize);
        if cell != self.start && cell != self.end {
            self.walls.push(cell);
        }
    }
}
