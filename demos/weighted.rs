use grid_search_trace::{Algorithm, Engine, GridSpec};

// Digits are cell weights. BFS walks straight through the heavy cells, while Dijkstra and A*
// go around them.

fn main() {
    let spec: GridSpec = "\
        S..9...
        .#.9.#.
        ...9..E
        .......
    "
    .parse()
    .unwrap();
    println!("{}", spec.build().unwrap());
    let engine = Engine::new();
    for algorithm in Algorithm::ALL {
        let response = engine.execute_algorithm(&spec, algorithm).unwrap();
        println!(
            "{:<22} length {:>2}, cost {:>2}, visited {:>2}",
            algorithm.name(),
            response.stats.path_length,
            response.stats.path_cost.unwrap_or(0),
            response.stats.visited_count
        );
    }
}
