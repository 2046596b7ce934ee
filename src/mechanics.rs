use std::collections::HashSet;

use crate::cell::Direction;
use crate::maze::Maze;
use crate::pathfinding::Position;

/// Read-only snapshot of the game handed to visibility hooks.
///
/// Mechanics receive everything they may look at through this view; they
/// own their visibility state and nothing else. Maze geometry, positions
/// and rewards are not theirs to touch.
pub struct GameView<'a> {
    pub maze: &'a Maze,
    pub player: Position,
    pub target: Position,
}

/// Set of currently revealed cells plus target gating. Recomputed by the
/// owning mechanic from player position and maze geometry on every hook.
#[derive(Debug, Clone, Default)]
pub struct VisibilityState {
    all_visible: bool,
    revealed: HashSet<Position>,
    target_visible: bool,
}

impl VisibilityState {
    fn everything() -> Self {
        VisibilityState {
            all_visible: true,
            revealed: HashSet::new(),
            target_visible: true,
        }
    }

    fn nothing() -> Self {
        VisibilityState::default()
    }

    pub fn is_visible(&self, pos: Position) -> bool {
        self.all_visible || self.revealed.contains(&pos)
    }

    pub fn target_visible(&self) -> bool {
        self.target_visible
    }

    /// Number of individually revealed cells (0 under full visibility)
    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}

/// Fog-of-war strategy. One flat interface: the game calls `on_start`
/// after every reset, `on_update` after every successful move and
/// `on_terminal` when the target is reached.
pub trait Mechanic {
    fn on_start(&mut self, view: &GameView);
    fn on_update(&mut self, view: &GameView);
    fn on_terminal(&mut self, view: &GameView);
    fn state(&self) -> &VisibilityState;
}

/// No fog: every cell and the target are always visible
pub struct FullVisibility {
    state: VisibilityState,
}

impl FullVisibility {
    pub fn new() -> Self {
        FullVisibility {
            state: VisibilityState::everything(),
        }
    }
}

impl Default for FullVisibility {
    fn default() -> Self {
        Self::new()
    }
}

impl Mechanic for FullVisibility {
    fn on_start(&mut self, _view: &GameView) {}
    fn on_update(&mut self, _view: &GameView) {}
    fn on_terminal(&mut self, _view: &GameView) {}

    fn state(&self) -> &VisibilityState {
        &self.state
    }
}

/// Reveals the box of cells within Chebyshev distance `radius` of the
/// player. The target is hidden unless inside the box, or unconditionally
/// shown with `show_target`.
pub struct RadiusVisibility {
    radius: i32,
    show_target: bool,
    state: VisibilityState,
}

impl RadiusVisibility {
    pub fn new(radius: i32, show_target: bool) -> Self {
        RadiusVisibility {
            radius,
            show_target,
            state: VisibilityState::nothing(),
        }
    }

    fn recompute(&mut self, view: &GameView) {
        self.state.revealed.clear();
        let p = view.player;
        for y in p.y - self.radius..=p.y + self.radius {
            for x in p.x - self.radius..=p.x + self.radius {
                if view.maze.in_bounds(x, y) {
                    self.state.revealed.insert(Position::new(x, y));
                }
            }
        }
        self.state.target_visible =
            self.show_target || p.chebyshev(&view.target) <= self.radius;
    }
}

impl Mechanic for RadiusVisibility {
    fn on_start(&mut self, view: &GameView) {
        self.recompute(view);
    }

    fn on_update(&mut self, view: &GameView) {
        self.recompute(view);
    }

    fn on_terminal(&mut self, _view: &GameView) {}

    fn state(&self) -> &VisibilityState {
        &self.state
    }
}

/// Reveals the player's cell plus the four cardinal rays out to `radius`
/// cells, each ray stopping at the first wall. The cell in front of the
/// wall is revealed, and its wall flags carry the wall into the raster,
/// so corridor boundaries stay observable without revealing the corridor
/// beyond them.
pub struct LineOfSightVisibility {
    radius: i32,
    show_target: bool,
    state: VisibilityState,
}

impl LineOfSightVisibility {
    pub fn new(radius: i32, show_target: bool) -> Self {
        LineOfSightVisibility {
            radius,
            show_target,
            state: VisibilityState::nothing(),
        }
    }

    fn recompute(&mut self, view: &GameView) {
        self.state.revealed.clear();
        self.state.revealed.insert(view.player);

        for dir in Direction::ALL {
            let mut cursor = view.player;
            for _ in 0..self.radius {
                if !view.maze.can_move(cursor.x, cursor.y, dir) {
                    break;
                }
                cursor = cursor.step(dir);
                self.state.revealed.insert(cursor);
            }
        }

        self.state.target_visible =
            self.show_target || self.state.revealed.contains(&view.target);
    }
}

impl Mechanic for LineOfSightVisibility {
    fn on_start(&mut self, view: &GameView) {
        self.recompute(view);
    }

    fn on_update(&mut self, view: &GameView) {
        self.recompute(view);
    }

    fn on_terminal(&mut self, _view: &GameView) {}

    fn state(&self) -> &VisibilityState {
        &self.state
    }
}

/// Decorator that keeps the map fully hidden for the first `delay` ticks
/// of an episode, then engages the wrapped mechanic: its `on_start` fires
/// on the tick the delay elapses, and its `on_update` runs from that tick
/// onward. Models "fog clears after N ticks".
pub struct DelayedVisibility {
    inner: Box<dyn Mechanic>,
    delay: u32,
    ticks: u32,
    hidden: VisibilityState,
}

impl DelayedVisibility {
    pub fn new(inner: Box<dyn Mechanic>, delay: u32) -> Self {
        DelayedVisibility {
            inner,
            delay,
            ticks: 0,
            hidden: VisibilityState::nothing(),
        }
    }
}

impl Mechanic for DelayedVisibility {
    fn on_start(&mut self, _view: &GameView) {
        self.ticks = 0;
    }

    fn on_update(&mut self, view: &GameView) {
        self.ticks += 1;
        if self.ticks == self.delay {
            self.inner.on_start(view);
        }
        if self.ticks >= self.delay {
            self.inner.on_update(view);
        }
    }

    fn on_terminal(&mut self, view: &GameView) {
        self.inner.on_terminal(view);
    }

    fn state(&self) -> &VisibilityState {
        if self.ticks >= self.delay {
            self.inner.state()
        } else {
            &self.hidden
        }
    }
}
