use grid_astar::{GridConfig, SearchTrace, Session, Viewport};
use rand::{rngs::StdRng, SeedableRng};

// Drives a session the way a windowed front end would: two clicks pick the endpoints,
// a key press runs the search with a redraw callback, another one resets the board.

fn main() {
    let viewport = Viewport::default();
    let mut session = Session::new(GridConfig::default(), StdRng::seed_from_u64(7)).unwrap();

    for (x, y) in [(5, 5), (15, 15), (25, 25), (585, 585), (595, 595)] {
        let selection = session.select_pixel(&viewport, x, y);
        println!("Click at ({x}, {y}): {:?}", selection);
    }

    let mut frames = 0;
    let found = session.run(&mut || frames += 1).unwrap().map(|r| r.found);
    match found {
        Some(found) => println!("Search finished after {} redraws, found: {}", frames, found),
        None => println!("Select a start and an end first"),
    }
    println!("{}", session.status_line());

    if let (Some(start), Some(end)) = (session.start(), session.end()) {
        let mut trace = SearchTrace::default();
        session.run(&mut trace).unwrap();
        println!("{}", trace.paint(session.grid(), start, end));
    }

    session.reset().unwrap();
    println!("After reset: {:?}", session.status_line());
}
