use core::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    Dijkstra,
    Bfs,
    Dfs,
    Astar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Dijkstra,
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Astar,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Astar => "astar",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Dijkstra's Algorithm",
            Algorithm::Bfs => "Breadth-First Search",
            Algorithm::Dfs => "Depth-First Search",
            Algorithm::Astar => "A* Algorithm",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Guarantees the shortest path",
            Algorithm::Bfs => "Guarantees the shortest path (unweighted)",
            Algorithm::Dfs => "Does not guarantee the shortest path",
            Algorithm::Astar => "Guarantees the shortest path (uses heuristics)",
        }
    }

    /// BFS is shortest in edge count, Dijkstra and A* in total weight. DFS promises nothing.
    pub fn guarantees_shortest(self) -> bool {
        !matches!(self, Algorithm::Dfs)
    }

    pub fn info(self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: self.id(),
            name: self.name(),
            description: self.description(),
            guarantees_shortest: self.guarantees_shortest(),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Algorithm {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Algorithm, EngineError> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.id() == s)
            .ok_or_else(|| EngineError::UnknownAlgorithm(s.to_owned()))
    }
}

/// Static metadata shown next to the algorithm picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AlgorithmInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub guarantees_shortest: bool,
}

pub fn catalog() -> [AlgorithmInfo; 4] {
    Algorithm::ALL.map(Algorithm::info)
}
