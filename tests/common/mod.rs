#![allow(dead_code)]

use std::collections::VecDeque;

use deepmaze::{Direction, Maze, Position};

/// Render a maze as ASCII art with player (P) and target (T) marked
pub fn ascii_maze(maze: &Maze, player: Position, target: Position) -> String {
    let mut result = String::new();

    for y in 0..maze.height {
        for x in 0..maze.width {
            result.push('+');
            result.push_str(if maze.cell(x, y).has_wall(Direction::Up) {
                "---"
            } else {
                "   "
            });
        }
        result.push_str("+\n");

        for x in 0..maze.width {
            result.push(if maze.cell(x, y).has_wall(Direction::Left) {
                '|'
            } else {
                ' '
            });
            let pos = Position::new(x, y);
            let symbol = if pos == player {
                " P "
            } else if pos == target {
                " T "
            } else {
                "   "
            };
            result.push_str(symbol);
        }
        result.push_str("|\n");
    }

    for _ in 0..maze.width {
        result.push_str("+---");
    }
    result.push_str("+\n");

    result
}

/// Reference BFS distances from `from` to every cell, independent of the
/// crate's pathfinder. `None` marks unreachable cells.
pub fn flood_distances(maze: &Maze, from: Position) -> Vec<Option<usize>> {
    let size = (maze.width * maze.height) as usize;
    let mut dist: Vec<Option<usize>> = vec![None; size];
    let idx = |x: i32, y: i32| (x + y * maze.width) as usize;

    dist[idx(from.x, from.y)] = Some(0);
    let mut queue = VecDeque::new();
    queue.push_back((from.x, from.y));

    while let Some((x, y)) = queue.pop_front() {
        let d = dist[idx(x, y)].unwrap();
        for (nx, ny) in maze.open_neighbors(x, y) {
            if dist[idx(nx, ny)].is_none() {
                dist[idx(nx, ny)] = Some(d + 1);
                queue.push_back((nx, ny));
            }
        }
    }

    dist
}

/// Number of cells reachable from `from`, including itself
pub fn reachable_count(maze: &Maze, from: Position) -> usize {
    flood_distances(maze, from)
        .iter()
        .filter(|d| d.is_some())
        .count()
}

/// Action index (0=down, 1=up, 2=left, 3=right) for a single-cell move
pub fn action_between(from: Position, to: Position) -> u8 {
    match (to.x - from.x, to.y - from.y) {
        (0, 1) => 0,
        (0, -1) => 1,
        (-1, 0) => 2,
        (1, 0) => 3,
        other => panic!("not a single-cell move: {:?}", other),
    }
}
