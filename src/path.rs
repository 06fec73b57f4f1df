use grid_util::point::Point;
use log::warn;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::PathError;
use crate::solver::NodeArena;
use crate::Coord;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", content = "cells", rename_all = "lowercase"))]
pub enum PathResult {
    /// Cells from start to end, both included.
    Found(Vec<Coord>),
    Unreachable,
}

impl PathResult {
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }

    /// The path's cells, empty when unreachable.
    pub fn cells(&self) -> &[Coord] {
        match self {
            PathResult::Found(cells) => cells,
            PathResult::Unreachable => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.cells().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells().is_empty()
    }
}

/// Walks parent links back from `terminal` and reverses them into a start-to-end path. A run that
/// never reached the end yields [PathResult::Unreachable]. A walk longer than the arena can only
/// mean a cycle, and a walk that stops short of `start` a dangling link; both are rejected.
pub fn reconstruct(
    nodes: &NodeArena,
    terminal: Option<usize>,
    start: Coord,
) -> Result<PathResult, PathError> {
    let Some(terminal) = terminal else {
        return Ok(PathResult::Unreachable);
    };
    let (&end, _) = nodes
        .get_index(terminal)
        .ok_or(PathError::MissingNode(terminal))?;

    let mut next = Some(terminal);
    let mut path: Vec<Point> = std::iter::from_fn(|| {
        let (&point, node) = nodes.get_index(next?)?;
        next = node.parent;
        Some(point)
    })
    .take(nodes.len() + 1)
    .collect();

    if path.len() > nodes.len() {
        warn!("Parent chain from {} contains a cycle", Coord::from(end));
        return Err(PathError::Cycle { from: end.into() });
    }
    path.reverse();
    match path.first() {
        Some(&first) if Coord::from(first) == start => {
            Ok(PathResult::Found(path.into_iter().map(Coord::from).collect()))
        }
        first => {
            let reached: Coord = first.copied().unwrap_or(end).into();
            warn!(
                "Parent chain from {} stops at {}",
                Coord::from(end),
                reached
            );
            Err(PathError::Dangling {
                from: end.into(),
                reached,
            })
        }
    }
}
