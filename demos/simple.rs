use grid_astar::{find_path, Grid, Position};

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
// Nodes have a 4-neighborhood

fn main() {
    let mut grid = Grid::new(3).unwrap();
    grid.set_walkable(Position::new(1, 1), false).unwrap();
    grid.recompute_all_neighbors();
    println!("{}", grid);
    let start = Position::new(0, 0);
    let end = Position::new(2, 2);
    let result = find_path(&grid, start, end, &mut ()).unwrap();
    println!("Cost: {:?}, steps: {:?}", result.cost, result.steps);
    println!("Path:");
    for p in result.path {
        println!("{}", p);
    }
}
