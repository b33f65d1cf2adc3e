use grid_astar::{find_path, Grid, Mark, Position, SearchTrace};
use rand::{rngs::StdRng, SeedableRng};

// Runs a search on a seeded random 30x30 grid and prints the board with open (o),
// closed (x) and path (*) cells.

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut grid = Grid::create(30, 0.25, &mut rng).unwrap();
    let start = Position::new(0, 0);
    let end = Position::new(29, 29);
    grid.set_walkable(start, true).unwrap();
    grid.set_walkable(end, true).unwrap();
    grid.recompute_all_neighbors();

    let mut trace = SearchTrace::default();
    let result = find_path(&grid, start, end, &mut trace).unwrap();
    println!("{}", trace.paint(&grid, start, end));
    if result.found {
        println!(
            "Optimal Path Cost: {}   Steps: {}",
            result.cost.unwrap_or_default(),
            result.steps.unwrap_or_default()
        );
    } else {
        println!("No possible paths were found!");
    }
    println!(
        "Expanded {} cells, opened {}, closed {}",
        trace.expansions(),
        trace.count(Mark::Open),
        trace.count(Mark::Closed)
    );
}
