use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cell::Direction;
use crate::maze::Maze;

/// Maze generation algorithm, selectable through configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Randomized depth-first carving ("recursive backtracker").
    /// Produces a perfect maze: exactly one path between any two cells.
    Backtracker,
    /// Randomized Prim frontier growth. Historically carved an occupancy
    /// grid; here it carves the same cell graph as the backtracker.
    RandomizedPrim,
}

impl Algorithm {
    pub fn from_name(name: &str) -> Option<Algorithm> {
        match name {
            "backtracker" => Some(Algorithm::Backtracker),
            "randomized_prim" => Some(Algorithm::RandomizedPrim),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Backtracker => "backtracker",
            Algorithm::RandomizedPrim => "randomized_prim",
        }
    }
}

/// Generate a maze with the given algorithm. Reproducible: the same RNG
/// state always yields the same maze.
pub fn generate(width: i32, height: i32, algorithm: Algorithm, rng: &mut StdRng) -> Maze {
    let mut maze = Maze::sealed(width, height);
    match algorithm {
        Algorithm::Backtracker => carve_backtracker(&mut maze, rng),
        Algorithm::RandomizedPrim => carve_prim(&mut maze, rng),
    }
    maze
}

/// Depth-first carving with an explicit stack. Each visit shuffles the
/// four candidate directions uniformly and takes the first one leading to
/// an unvisited in-bounds neighbor; dead ends pop the stack.
fn carve_backtracker(maze: &mut Maze, rng: &mut StdRng) {
    let width = maze.width;
    let mut visited = vec![false; (maze.width * maze.height) as usize];
    let mut stack: Vec<(i32, i32)> = vec![(0, 0)];
    visited[0] = true;

    while let Some(&(x, y)) = stack.last() {
        let mut dirs = Direction::ALL;
        dirs.shuffle(rng);

        let mut advanced = false;
        for dir in dirs {
            let (dx, dy) = dir.delta();
            let (nx, ny) = (x + dx, y + dy);
            if !maze.in_bounds(nx, ny) {
                continue;
            }
            if visited[(nx + ny * width) as usize] {
                continue;
            }
            maze.connect(x, y, dir);
            visited[(nx + ny * width) as usize] = true;
            stack.push((nx, ny));
            advanced = true;
            break;
        }

        if !advanced {
            stack.pop();
        }
    }
}

/// Randomized Prim: grow one connected region from (0, 0) by repeatedly
/// picking a uniformly random frontier wall of the carved region and
/// opening it when the far side is still unvisited. On the cell graph the
/// frontier drains only after every cell has been reached.
fn carve_prim(maze: &mut Maze, rng: &mut StdRng) {
    let width = maze.width;
    let mut visited = vec![false; (maze.width * maze.height) as usize];
    visited[0] = true;

    // Frontier entries are (carved cell, direction of the candidate wall)
    let mut frontier: Vec<(i32, i32, Direction)> = Vec::new();
    push_frontier(maze, 0, 0, &mut frontier);

    while !frontier.is_empty() {
        let pick = rng.gen_range(0..frontier.len());
        let (x, y, dir) = frontier.swap_remove(pick);
        let (dx, dy) = dir.delta();
        let (nx, ny) = (x + dx, y + dy);

        if visited[(nx + ny * width) as usize] {
            continue;
        }
        maze.connect(x, y, dir);
        visited[(nx + ny * width) as usize] = true;
        push_frontier(maze, nx, ny, &mut frontier);
    }
}

fn push_frontier(maze: &Maze, x: i32, y: i32, frontier: &mut Vec<(i32, i32, Direction)>) {
    for dir in Direction::ALL {
        let (dx, dy) = dir.delta();
        if maze.in_bounds(x + dx, y + dy) {
            frontier.push((x, y, dir));
        }
    }
}
