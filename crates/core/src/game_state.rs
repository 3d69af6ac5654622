//! Game state module - one session of play
//!
//! Owns the grid, the active and next pieces, the score and the drop timer.
//! Every input goes through a method here; nothing is global. All work is
//! synchronous: a gravity tick or a hard drop runs lock → merge → sweep →
//! score → spawn to completion before returning.

use crate::collision::{collide, ghost_position, merge};
use crate::config::{ConfigError, GameConfig};
use crate::grid::Grid;
use crate::pieces::{catalog_shape, Shape};
use crate::rng::{PieceSource, SimpleRng};
use crate::scheduler::DropScheduler;
use crate::scoring::ScoreState;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
use crate::types::*;

/// The falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub position: Position,
}

/// Lookahead piece, drawn before it is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextPiece {
    pub kind: PieceKind,
    pub shape: Shape,
}

impl NextPiece {
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: catalog_shape(kind),
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState<R: PieceSource = SimpleRng> {
    config: GameConfig,
    grid: Grid,
    active: Option<ActivePiece>,
    next: Option<NextPiece>,
    source: R,
    scores: ScoreState,
    phase: Phase,
    scheduler: DropScheduler,
    /// Monotonic id for spawned pieces (increments only on successful spawn).
    piece_id: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState<SimpleRng> {
    /// Create a session on the default field with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::build(GameConfig::default(), SimpleRng::new(seed))
    }
}

impl<R: PieceSource> GameState<R> {
    /// Create a session with a custom configuration and piece source.
    pub fn with_source(config: GameConfig, source: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, source))
    }

    fn build(config: GameConfig, source: R) -> Self {
        Self {
            grid: Grid::from_config(&config),
            config,
            active: None,
            next: None,
            source,
            scores: ScoreState::new(),
            phase: Phase::Waiting,
            scheduler: DropScheduler::new(),
            piece_id: 0,
            last_event: None,
        }
    }

    /// Clear the field and score and begin playing.
    ///
    /// Draws a lookahead piece first, then spawns from it, so the first active
    /// piece is the first draw and the next preview is the second.
    pub fn start(&mut self) {
        self.reset();
        self.phase = Phase::Playing;
        self.next = Some(self.draw_next());
        self.spawn_piece();
        self.scheduler.rebase();
        log::debug!(
            "game started on {}x{}x{} field",
            self.config.width,
            self.config.height,
            self.config.depth
        );
    }

    /// Drop everything and return to `Waiting`.
    pub fn reset(&mut self) {
        self.grid = Grid::from_config(&self.config);
        self.active = None;
        self.next = None;
        self.scores = ScoreState::new();
        self.phase = Phase::Waiting;
        self.scheduler = DropScheduler::new();
        self.piece_id = 0;
        self.last_event = None;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for scenario setup in tests and benches.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn next(&self) -> Option<&NextPiece> {
        self.next.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.scores.score
    }

    pub fn level(&self) -> u32 {
        self.scores.level
    }

    pub fn lines(&self) -> u32 {
        self.scores.lines
    }

    pub fn ren(&self) -> u32 {
        self.scores.ren
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn scheduler(&self) -> &DropScheduler {
        &self.scheduler
    }

    fn draw_next(&mut self) -> NextPiece {
        let index = self.source.next_index(PieceKind::COUNT);
        NextPiece::new(PieceKind::ALL[index % PieceKind::COUNT])
    }

    /// Anchor that centers a shape on the top layer.
    pub fn spawn_position(&self, shape: &Shape) -> Position {
        let x = (self.config.width as i32 - shape.width() as i32).div_euclid(2);
        let z = (self.config.depth as i32 - shape.depth() as i32).div_euclid(2);
        Position::new(x, self.config.height as i32 - 1, z)
    }

    /// Bring the next piece into play.
    ///
    /// If it collides at the spawn anchor the game is over and no piece
    /// becomes active. Otherwise a new lookahead piece is drawn.
    pub fn spawn_piece(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }

        let next = match self.next.take() {
            Some(next) => next,
            None => self.draw_next(),
        };
        let position = self.spawn_position(&next.shape);

        if collide(&self.grid, Some(&next.shape), position) {
            self.active = None;
            self.phase = Phase::GameOver;
            log::info!(
                "spawn of {} blocked at {:?}; game over with score {}",
                next.kind.as_str(),
                position,
                self.scores.score
            );
            return false;
        }

        log::debug!("spawned {} at {:?}", next.kind.as_str(), position);
        self.active = Some(ActivePiece {
            kind: next.kind,
            shape: next.shape,
            position,
        });
        self.piece_id = self.piece_id.wrapping_add(1);
        self.next = Some(self.draw_next());
        true
    }

    /// Shift the active piece; reverts (returns false) on collision.
    fn try_shift(&mut self, dx: i32, dz: i32) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let Some(active) = self.active.as_ref() else {
            return false;
        };

        let target = active.position.offset(dx, 0, dz);
        if collide(&self.grid, Some(&active.shape), target) {
            log::trace!("shift ({}, {}) blocked at {:?}", dx, dz, active.position);
            return false;
        }

        if let Some(active) = self.active.as_mut() {
            active.position = target;
        }
        true
    }

    /// Shift one column along x. Only the sign of `dx` counts, so a piece
    /// never skips over a cell it would collide with.
    pub fn move_x(&mut self, dx: i8) -> bool {
        self.try_shift(dx.signum() as i32, 0)
    }

    /// Shift one row along z; like [`Self::move_x`] only the sign counts.
    pub fn move_z(&mut self, dz: i8) -> bool {
        self.try_shift(0, dz.signum() as i32)
    }

    /// Rotate in place by a signed number of quarter turns.
    ///
    /// There are no kicks: if the rotated shape collides at the current
    /// anchor, the piece keeps its orientation.
    pub fn rotate(&mut self, axis: Axis, quarter_turns: i8) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let Some(active) = self.active.as_ref() else {
            return false;
        };

        let rotated = active.shape.rotated(axis, quarter_turns);
        if collide(&self.grid, Some(&rotated), active.position) {
            log::trace!(
                "rotation {} x{} blocked at {:?}",
                axis.as_str(),
                quarter_turns,
                active.position
            );
            return false;
        }

        if let Some(active) = self.active.as_mut() {
            active.shape = rotated;
        }
        true
    }

    /// One gravity step: lower the piece a layer, or lock it if it cannot
    /// move. Returns true if the piece moved down.
    pub fn soft_drop(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let Some(active) = self.active.as_ref() else {
            return false;
        };

        let below = active.position.below();
        if collide(&self.grid, Some(&active.shape), below) {
            self.lock_piece();
            return false;
        }

        if let Some(active) = self.active.as_mut() {
            active.position = below;
        }
        true
    }

    /// Drop to the resting layer and lock. Returns the layers fallen.
    ///
    /// The gravity baseline restarts at the next tick.
    pub fn hard_drop(&mut self) -> Option<u32> {
        if self.phase != Phase::Playing {
            return None;
        }
        let active = self.active.as_mut()?;

        let landing = ghost_position(&self.grid, &active.shape, active.position);
        let fallen = (active.position.y - landing.y).max(0) as u32;
        active.position = landing;

        self.lock_piece();
        self.scheduler.rebase();
        Some(fallen)
    }

    /// Merge the active piece, sweep full layers, score, then spawn.
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        let cells_merged = merge(&mut self.grid, &active.shape, active.position);
        let cleared = self.grid.sweep();
        let perfect_clear = cleared > 0 && self.grid.is_empty();

        let level_before = self.scores.level;
        let result = self.scores.apply_sweep(cleared, perfect_clear);

        log::debug!(
            "locked {} at {:?}: {} cells, {} layers, +{}",
            active.kind.as_str(),
            active.position,
            cells_merged,
            cleared,
            result.total
        );
        if self.scores.level > level_before {
            log::info!("level up: {} -> {}", level_before, self.scores.level);
        }

        self.last_event = Some(LockEvent {
            cells_merged,
            cleared,
            score_gained: result.total,
            ren: self.scores.ren,
            back_to_back: result.b2b_applied,
            perfect_clear,
        });

        self.spawn_piece();
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Where the active piece would land.
    pub fn ghost_position(&self) -> Option<Position> {
        let active = self.active.as_ref()?;
        Some(ghost_position(&self.grid, &active.shape, active.position))
    }

    /// Gravity interval at the current level
    pub fn drop_interval_ms(&self) -> u32 {
        self.config.drop_interval_ms(self.scores.level)
    }

    /// Host clock tick. Runs at most one gravity step; returns true if one ran.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let interval = self.drop_interval_ms();
        if !self.scheduler.poll(now_ms, interval) {
            return false;
        }
        self.soft_drop();
        true
    }

    /// Apply a command. Returns whether it changed anything.
    pub fn apply_command(&mut self, command: Command) -> bool {
        match command {
            Command::Start => {
                self.start();
                true
            }
            Command::Reset => {
                self.reset();
                true
            }
            Command::MoveX(dx) => self.move_x(dx),
            Command::MoveZ(dz) => self.move_z(dz),
            Command::Rotate(axis, turns) => self.rotate(axis, turns),
            Command::SoftDrop => {
                if !self.is_playing() {
                    return false;
                }
                // Either moved or locked; both change state.
                self.soft_drop();
                true
            }
            Command::HardDrop => self.hard_drop().is_some(),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.config.width;
        out.height = self.config.height;
        out.depth = self.config.depth;
        self.grid.write_u8_volume(&mut out.grid);

        out.active = self.active.as_ref().map(|a| ActiveSnapshot {
            kind: a.kind,
            shape: a.shape.clone(),
            position: a.position,
        });
        out.ghost = self.ghost_position();
        out.next = self.next.as_ref().map(|n| NextSnapshot {
            kind: n.kind,
            shape: n.shape.clone(),
        });
        out.phase = self.phase;
        out.piece_id = self.piece_id;
        out.score = self.scores.score;
        out.level = self.scores.level;
        out.lines = self.scores.lines;
        out.ren = self.scores.ren;
        out.back_to_back = self.scores.last_clear_special;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::for_config(&self.config);
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}
