use grid_search_trace::{catalog, Algorithm, Engine, GridSpec};

// Races all four algorithms on the default 20x50 grid with a generated maze.

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0);
    let spec = GridSpec::default().with_maze(seed);
    println!("{}", spec.build().unwrap());
    let responses = Engine::new().race(&spec, &Algorithm::ALL).unwrap();
    for (info, response) in catalog().iter().zip(&responses) {
        println!(
            "{:<22} {:<48} path {:>3}, visited {:>4}, trace {:>5} events",
            info.name,
            info.description,
            response.stats.path_length,
            response.stats.visited_count,
            response.trace.len()
        );
    }
}
