use grid_search_trace::{execute, GridSpec, TraceEvent};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// and the trace is printed event by event, the way a visualizer would replay it.

fn main() {
    let spec: GridSpec = "S..\n.#.\n..E".parse().unwrap();
    println!("{}", spec.build().unwrap());
    let response = execute(&spec, "bfs").unwrap();
    for (step, event) in response.trace.iter().enumerate() {
        match event {
            TraceEvent::Visited { cell } => println!("{step:>3}: visit {cell}"),
            TraceEvent::FrontierAdded { cell } => println!("{step:>3}: discover {cell}"),
            TraceEvent::FrontierUpdated { cell, cost } => {
                println!("{step:>3}: rediscover {cell} at cost {cost}")
            }
        }
    }
    println!("Path:");
    for cell in response.path.cells() {
        println!("{}", cell);
    }
}
