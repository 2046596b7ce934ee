use serde::Serialize;

use crate::cell::Direction;
use crate::maze::Maze;
use crate::mechanics::VisibilityState;
use crate::pathfinding::Position;

/// Semantic tile kinds of the rasterized observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tile {
    Wall,
    Floor,
    Player,
    Target,
}

/// Snapshot of everything an external consumer (renderer, pre-processor,
/// training harness) needs about the current state.
///
/// Raw layout: `walls` is one byte per cell, row-major, with the wall
/// bitmask of `Cell::wall_bits` (bit 0 = down, 1 = up, 2 = left,
/// 3 = right). `visible` is the row-major fog mask (`true` = revealed).
/// `target` is `None` while the active visibility mechanic hides it.
/// Pixel observations are the renderer's job; `tiles` provides the
/// semantic grid it rasterizes from.
#[derive(Debug, Clone, Serialize)]
pub struct Observation {
    pub width: i32,
    pub height: i32,
    pub walls: Vec<u8>,
    pub player: Position,
    pub target: Option<Position>,
    pub visible: Vec<bool>,
    pub step_count: u32,
}

impl Observation {
    pub(crate) fn capture(
        maze: &Maze,
        player: Position,
        target: Position,
        visibility: &VisibilityState,
        step_count: u32,
    ) -> Self {
        let mut visible = Vec::with_capacity((maze.width * maze.height) as usize);
        for y in 0..maze.height {
            for x in 0..maze.width {
                visible.push(visibility.is_visible(Position::new(x, y)));
            }
        }

        Observation {
            width: maze.width,
            height: maze.height,
            walls: maze.wall_bitmap(),
            player,
            target: if visibility.target_visible() {
                Some(target)
            } else {
                None
            },
            visible,
            step_count,
        }
    }

    /// Dimensions of the raster produced by `tiles`
    pub fn raster_size(&self) -> (i32, i32) {
        (2 * self.width + 1, 2 * self.height + 1)
    }

    fn wall_bits(&self, x: i32, y: i32) -> u8 {
        self.walls[(x + y * self.width) as usize]
    }

    /// Whether the cell at (x, y) is revealed by the fog mask
    pub fn is_revealed(&self, x: i32, y: i32) -> bool {
        self.visible[(x + y * self.width) as usize]
    }

    /// Ground-truth semantic raster, `(2w+1) x (2h+1)` row-major.
    ///
    /// Cell (x, y) maps to raster (2x+1, 2y+1); the odd slots between two
    /// cells are floor exactly when the shared wall is down, and the
    /// outer border is always wall. Fog is applied by the consumer using
    /// the `visible` mask; the raster itself is always ground truth.
    pub fn tiles(&self) -> Vec<Tile> {
        let (rw, rh) = self.raster_size();
        let mut raster = vec![Tile::Wall; (rw * rh) as usize];
        let at = |x: i32, y: i32| (x + y * rw) as usize;

        for y in 0..self.height {
            for x in 0..self.width {
                raster[at(2 * x + 1, 2 * y + 1)] = Tile::Floor;
                let bits = self.wall_bits(x, y);
                if bits & Direction::Right.bit() == 0 && x + 1 < self.width {
                    raster[at(2 * x + 2, 2 * y + 1)] = Tile::Floor;
                }
                if bits & Direction::Down.bit() == 0 && y + 1 < self.height {
                    raster[at(2 * x + 1, 2 * y + 2)] = Tile::Floor;
                }
            }
        }

        if let Some(target) = self.target {
            raster[at(2 * target.x + 1, 2 * target.y + 1)] = Tile::Target;
        }
        raster[at(2 * self.player.x + 1, 2 * self.player.y + 1)] = Tile::Player;

        raster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mechanics::{FullVisibility, Mechanic};

    #[test]
    fn test_tiles_layout_for_two_cell_corridor() {
        let mut maze = Maze::sealed(2, 1);
        maze.connect(0, 0, Direction::Right);

        let mech = FullVisibility::new();
        let obs = Observation::capture(
            &maze,
            Position::new(0, 0),
            Position::new(1, 0),
            mech.state(),
            0,
        );

        assert_eq!(obs.raster_size(), (5, 3));
        let tiles = obs.tiles();
        // Row 1 of the raster: wall, player, floor (open edge), target, wall
        assert_eq!(tiles[5], Tile::Wall);
        assert_eq!(tiles[6], Tile::Player);
        assert_eq!(tiles[7], Tile::Floor);
        assert_eq!(tiles[8], Tile::Target);
        assert_eq!(tiles[9], Tile::Wall);
        // Border rows are solid wall
        assert!(tiles[0..5].iter().all(|&t| t == Tile::Wall));
        assert!(tiles[10..15].iter().all(|&t| t == Tile::Wall));
    }
}
