use grid_search_trace::{
    catalog, execute, Algorithm, Coord, Engine, EngineError, GridError, GridSpec, PathResult,
    TraceEvent,
};

fn c(row: usize, col: usize) -> Coord {
    Coord::new(row, col)
}

fn assert_valid_path(spec: &GridSpec, path: &PathResult) {
    let grid = spec.build().unwrap();
    let cells = path.cells();
    assert_eq!(cells.first(), Some(&spec.start));
    assert_eq!(cells.last(), Some(&spec.end));
    assert!(grid.path_cost(cells).is_some(), "invalid path {cells:?}");
}

#[test]
fn single_row_is_walked_straight() {
    let spec: GridSpec = "S.E".parse().unwrap();
    for algorithm in Algorithm::ALL {
        let response = execute(&spec, algorithm.id()).unwrap();
        assert_eq!(
            response.path,
            PathResult::Found(vec![c(0, 0), c(0, 1), c(0, 2)])
        );
        assert_eq!(response.stats.path_length, 3);
        assert_eq!(response.stats.visited_count, 3);
        assert_eq!(
            response.trace.events(),
            &[
                TraceEvent::FrontierAdded { cell: c(0, 0) },
                TraceEvent::Visited { cell: c(0, 0) },
                TraceEvent::FrontierAdded { cell: c(0, 1) },
                TraceEvent::Visited { cell: c(0, 1) },
                TraceEvent::FrontierAdded { cell: c(0, 2) },
                TraceEvent::Visited { cell: c(0, 2) },
            ]
        );
    }
}

#[test]
fn walled_centre_column() {
    // |S#.|
    // |.#.|
    // |E#.|
    let spec: GridSpec = "S#.\n.#.\nE#.".parse().unwrap();
    let bfs = execute(&spec, "bfs").unwrap();
    for algorithm in ["dijkstra", "astar"] {
        let response = execute(&spec, algorithm).unwrap();
        assert_eq!(response.path.len(), bfs.path.len());
        assert_valid_path(&spec, &response.path);
    }
    assert_eq!(bfs.path.cells(), &[c(0, 0), c(1, 0), c(2, 0)]);
    let dfs = execute(&spec, "dfs").unwrap();
    assert_valid_path(&spec, &dfs.path);
    assert!(dfs.path.len() >= bfs.path.len());
    assert!(!dfs.stats.guarantees_shortest);
}

#[test]
fn enclosed_start_is_unreachable() {
    let spec = GridSpec::new(5, 5, c(2, 2), c(0, 0))
        .with_walls([c(1, 2), c(2, 3), c(3, 2), c(2, 1)]);
    for algorithm in Algorithm::ALL {
        let response = Engine::new().execute_algorithm(&spec, algorithm).unwrap();
        assert_eq!(response.path, PathResult::Unreachable);
        assert_eq!(response.stats.visited_count, 1);
        assert_eq!(response.stats.path_length, 0);
        assert_eq!(response.stats.path_cost, None);
        assert_eq!(
            response.trace.events(),
            &[
                TraceEvent::FrontierAdded { cell: c(2, 2) },
                TraceEvent::Visited { cell: c(2, 2) },
            ]
        );
    }
}

#[test]
fn enclosed_end_exhausts_the_start_side() {
    let spec: GridSpec = "S..#.\n...#E\n...#.".parse().unwrap();
    for algorithm in Algorithm::ALL {
        let response = Engine::new().execute_algorithm(&spec, algorithm).unwrap();
        assert!(!response.path.is_found());
        assert_eq!(response.stats.visited_count, 9);
    }
}

#[test]
fn weighted_detour() {
    let spec: GridSpec = "S9E\n...".parse().unwrap();
    let dijkstra = execute(&spec, "dijkstra").unwrap();
    let astar = execute(&spec, "astar").unwrap();
    let bfs = execute(&spec, "bfs").unwrap();
    assert_eq!(dijkstra.stats.path_cost, Some(4));
    assert_eq!(astar.stats.path_cost, Some(4));
    assert_eq!(bfs.stats.path_cost, Some(10));
    assert_eq!(bfs.stats.path_length, 3);
    assert!(astar.stats.visited_count <= dijkstra.stats.visited_count);
}

#[test]
fn dfs_can_be_longer_than_bfs() {
    let spec: GridSpec = "S.E\n...\n...".parse().unwrap();
    let dfs = execute(&spec, "dfs").unwrap();
    let bfs = execute(&spec, "bfs").unwrap();
    assert_valid_path(&spec, &dfs.path);
    assert_eq!(bfs.path.len(), 3);
    assert_eq!(dfs.path.len(), 9);
}

#[test]
fn repeated_runs_are_identical() {
    let spec = GridSpec::default().with_maze(3).with_weight(c(5, 5), 4);
    for algorithm in Algorithm::ALL {
        let first = execute(&spec, algorithm.id()).unwrap();
        let second = execute(&spec, algorithm.id()).unwrap();
        assert_eq!(first.trace, second.trace);
        assert_eq!(first.path, second.path);
        assert_eq!(first.stats, second.stats);
    }
}

#[test]
fn replaying_a_trace_marks_every_visited_cell() {
    let spec = GridSpec::default();
    let response = execute(&spec, "astar").unwrap();
    let mut replay = response.trace.replay();
    while replay.advance().is_some() {}
    for cell in response.trace.visited_order() {
        assert_eq!(
            replay.mark(cell),
            Some(grid_search_trace::trace::Mark::Visited)
        );
    }
    assert_eq!(
        response.trace.visited_order().count(),
        response.stats.visited_count
    );
}

#[test]
fn errors_surface_before_any_search() {
    let spec: GridSpec = "S.E".parse().unwrap();
    assert!(matches!(
        execute(&spec, "greedy"),
        Err(EngineError::UnknownAlgorithm(id)) if id == "greedy"
    ));
    let walled = GridSpec::new(2, 2, c(0, 0), c(1, 1)).with_wall(c(1, 1));
    assert!(matches!(
        execute(&walled, "bfs"),
        Err(EngineError::InvalidGrid(GridError::EndpointIsWall { .. }))
    ));
    let outside = GridSpec::new(2, 2, c(0, 0), c(1, 5));
    assert!(matches!(
        execute(&outside, "dijkstra"),
        Err(EngineError::InvalidGrid(GridError::EndpointOutOfBounds { .. }))
    ));
}

#[test]
fn catalog_matches_the_engine() {
    for info in catalog() {
        let algorithm: Algorithm = info.id.parse().unwrap();
        assert_eq!(algorithm.info(), info);
        assert!(execute(&"S.E".parse().unwrap(), info.id).is_ok());
    }
}

#[cfg(feature = "serde")]
#[test]
fn responses_serialize_to_json() {
    let request: grid_search_trace::RunRequest = serde_json::from_str(
        r#"{
            "grid": {
                "rows": 1, "cols": 3,
                "walls": [],
                "weights": [{"cell": {"row": 0, "col": 1}, "weight": 2}],
                "start": {"row": 0, "col": 0},
                "end": {"row": 0, "col": 2}
            },
            "algorithm": "astar"
        }"#,
    )
    .unwrap();
    let response = Engine::new().handle(&request).unwrap();
    assert_eq!(response.stats.path_cost, Some(3));
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["algorithm"], "astar");
    assert_eq!(json["path"]["status"], "found");
    assert_eq!(json["trace"][0]["kind"], "frontier_added");
    let back: grid_search_trace::RunResponse = serde_json::from_value(json).unwrap();
    assert_eq!(back, response);
}
