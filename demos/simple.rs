use grid_pathtrace::editor::{EditMode, Editor};
use grid_pathtrace::playback::{Marker, Renderer, ThreadSleeper};
use grid_pathtrace::solver::dijkstra::DijkstraSolver;
use grid_pathtrace::{at, PathingGrid, TraceStatus};
use grid_util::point::Point;

// In this example a path is found on a 5x5 grid with shape
//  _____
// |S    |
// |###  |
// |   # |
// | # # |
// |   #E|
//  _____
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

struct PrintRenderer;

impl Renderer for PrintRenderer {
    fn clear_marks(&mut self) {}
    fn mark(&mut self, pos: Point, marker: Marker) {
        println!("{:?} row {} col {}", marker, pos.y, pos.x);
    }
    fn status(&mut self, status: TraceStatus) {
        match status {
            TraceStatus::Found => println!("Found the end!"),
            TraceStatus::Unreachable => println!("The end cannot be reached."),
        }
    }
}

fn main() {
    let mut editor = Editor::new(PathingGrid::new(5).unwrap());
    editor.set_mode(EditMode::ToggleObstacle);
    for p in [
        at(1, 0),
        at(1, 1),
        at(1, 2),
        at(2, 3),
        at(3, 1),
        at(3, 3),
        at(4, 3),
    ] {
        editor.click(p).unwrap();
    }
    println!("{}", editor.grid);
    let playback = editor.run(&DijkstraSolver);
    playback.play(&mut PrintRenderer, &mut ThreadSleeper);
    println!("Path:");
    for p in &playback.trace.path {
        println!("{:?}", p);
    }
}
