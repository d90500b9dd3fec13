//! Engine - owns the board, queue, controller, scoring and meter, and
//! exposes the command/tick surface.
//!
//! Commands that do not apply in the current state are silent no-ops: they
//! return `false`, change nothing and emit no event.

use std::fmt;

use crate::board::Board;
use crate::config::{ConfigError, EngineConfig};
use crate::controller::{HoldOutcome, PieceController, SoftDrop};
use crate::meter::SpecialMeter;
use crate::pieces::ActivePiece;
use crate::rng::PieceQueue;
use crate::scoring::{is_spin, ScoringEngine};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, GameEvent, LockSummary, PieceKind, RotationDirection};

/// Receives engine events as they happen
pub trait EventListener {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> EventListener for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

pub struct Engine {
    config: EngineConfig,
    board: Board,
    queue: PieceQueue,
    controller: PieceController,
    scoring: ScoringEngine,
    meter: SpecialMeter,
    running: bool,
    paused: bool,
    drop_timer_ms: u32,
    last_lock: Option<LockSummary>,
    listeners: Vec<Box<dyn EventListener>>,
}

impl Engine {
    /// Start a run with `config`, assumed valid (see [`Engine::try_new`])
    pub fn new(config: EngineConfig) -> Self {
        let queue = match config.seed {
            Some(seed) => PieceQueue::new(seed),
            None => PieceQueue::from_entropy(),
        };
        let mut engine = Self {
            board: Board::new(),
            queue,
            controller: PieceController::new(&config),
            scoring: ScoringEngine::new(&config),
            meter: SpecialMeter::new(&config),
            running: false,
            paused: false,
            drop_timer_ms: 0,
            last_lock: None,
            listeners: Vec::new(),
            config,
        };
        engine.start_run();
        engine
    }

    /// Validate `config`, then start a run
    pub fn try_new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Default rules with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(EngineConfig::seeded(seed))
    }

    pub fn subscribe(&mut self, listener: impl EventListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn with_listener(mut self, listener: impl EventListener + 'static) -> Self {
        self.subscribe(listener);
        self
    }

    fn emit(&mut self, event: GameEvent) {
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
    }

    /// Start a new run with a seed drawn from the current generator
    pub fn reset(&mut self) {
        let seed = self.queue.next_seed();
        self.reset_with_seed(seed);
    }

    /// Start a new run replaying the exact sequence for `seed`
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.queue.reseed(seed);
        self.start_run();
        log::info!("Run reset (seed {})", seed);
    }

    fn start_run(&mut self) {
        self.board.clear();
        self.controller.reset();
        self.scoring.reset();
        self.meter.reset();
        self.running = true;
        self.paused = false;
        self.drop_timer_ms = 0;
        self.last_lock = None;
        self.spawn_next();
    }

    fn spawn_next(&mut self) {
        let kind = self.queue.draw();
        self.drop_timer_ms = 0;
        if !self.controller.spawn(kind, &self.board) {
            self.end_run();
        }
    }

    fn end_run(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        log::info!(
            "Game over: score {}, lines {}, level {}",
            self.scoring.score(),
            self.scoring.lines(),
            self.scoring.level()
        );
        self.emit(GameEvent::GameOver);
    }

    fn playable(&self) -> bool {
        self.running && !self.paused
    }

    /// Advance gravity and lock-delay timers by `delta_ms`.
    ///
    /// Negative deltas count as zero. A single call applies at most one
    /// gravity step or one lock, however large the delta.
    pub fn tick(&mut self, delta_ms: i64) {
        if !self.playable() || self.controller.active().is_none() {
            return;
        }
        let delta = u32::try_from(delta_ms.max(0)).unwrap_or(u32::MAX);

        if self.controller.refresh_grounded(&self.board) {
            self.drop_timer_ms = 0;
            if self
                .controller
                .accumulate_lock(delta, self.config.lock_delay_ms)
            {
                self.lock_active(0);
            }
            return;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(delta);
        if self.drop_timer_ms >= self.scoring.drop_interval_ms() {
            self.drop_timer_ms = 0;
            self.controller.gravity_step(&self.board);
        }
    }

    /// Translate the active piece by one cell: (-1, 0), (1, 0) or (0, 1)
    pub fn move_piece(&mut self, dx: i8, dy: i8) -> bool {
        let valid = matches!((dx, dy), (-1, 0) | (1, 0) | (0, 1));
        if !valid || !self.playable() {
            return false;
        }
        let moved = self.controller.try_move(dx, dy, &self.board);
        if moved {
            self.emit(GameEvent::Move);
        }
        moved
    }

    /// Rotate clockwise for a positive direction, counter-clockwise for a
    /// negative one
    pub fn rotate(&mut self, direction: i8) -> bool {
        let Some(direction) = RotationDirection::from_sign(direction) else {
            return false;
        };
        if !self.playable() {
            return false;
        }
        let rotated = self.controller.try_rotate(direction, &self.board);
        if rotated {
            self.emit(GameEvent::Rotate);
        }
        rotated
    }

    pub fn soft_drop(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        match self.controller.soft_drop(&self.board) {
            SoftDrop::Moved => {
                self.emit(GameEvent::SoftDrop);
                true
            }
            SoftDrop::Lock => {
                self.lock_active(0);
                true
            }
            SoftDrop::Grounded | SoftDrop::Ignored => false,
        }
    }

    pub fn hard_drop(&mut self) -> bool {
        if !self.playable() || self.controller.active().is_none() {
            return false;
        }
        let rows = self.controller.hard_drop(&self.board);
        self.emit(GameEvent::HardDrop { rows });
        self.lock_active(rows);
        true
    }

    pub fn hold(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let queue = &mut self.queue;
        let outcome = self.controller.hold(&self.board, || queue.draw());
        match outcome {
            HoldOutcome::Rejected => false,
            HoldOutcome::Stored | HoldOutcome::Swapped => {
                self.drop_timer_ms = 0;
                log::debug!("Hold: {:?} -> {:?}", outcome, self.controller.hold_piece());
                self.emit(GameEvent::Hold);
                true
            }
            HoldOutcome::Blocked => {
                self.emit(GameEvent::Hold);
                self.end_run();
                true
            }
        }
    }

    /// Spend one special to remove the fullest row
    pub fn use_special(&mut self) -> bool {
        if !self.playable() || !self.meter.try_consume() {
            return false;
        }
        let row = self.board.fullest_row();
        self.board.remove_row(row);
        log::debug!(
            "Special removed row {} ({} left)",
            row,
            self.meter.count()
        );
        self.emit(GameEvent::SpecialUsed { row: row as u8 });

        if !self.controller.settle_upward(&self.board) {
            self.end_run();
        }
        true
    }

    pub fn pause(&mut self, paused: bool) {
        if self.running {
            self.paused = paused;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.pause(!self.paused);
    }

    /// Map an abstract action onto the command surface.
    ///
    /// Returns whether the action changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(-1, 0),
            GameAction::MoveRight => self.move_piece(1, 0),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate(1),
            GameAction::RotateCcw => self.rotate(-1),
            GameAction::Hold => self.hold(),
            GameAction::UseSpecial => self.use_special(),
            GameAction::Pause => {
                if !self.running {
                    return false;
                }
                self.toggle_pause();
                true
            }
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    /// Merge the active piece, score it and spawn the next one
    fn lock_active(&mut self, hard_drop_rows: u32) {
        let Some((piece, rotated)) = self.controller.take_for_lock() else {
            return;
        };

        // Corners are judged against the board before the piece lands in it.
        let spin = self.config.spin_bonus_enabled && is_spin(&piece, rotated, &self.board);
        self.board.merge(&piece);
        let lines = self.board.scan_and_clear();

        let lock = self.scoring.record_lock(lines, spin, hard_drop_rows);
        let earned = self.meter.record_lock(lines, spin, lock.combo);

        let summary = LockSummary {
            lines_cleared: lines as u32,
            points: lock.result.total,
            spin,
            combo: lock.combo,
            back_to_back: lock.back_to_back,
            b2b_applied: lock.result.b2b_applied,
            hard_drop_rows,
            level_up: lock.level_up.is_some(),
        };
        self.last_lock = Some(summary);
        log::debug!(
            "Locked {:?}: {} lines, {} points, spin {}, combo {}",
            piece.kind,
            lines,
            summary.points,
            spin,
            summary.combo
        );

        self.emit(GameEvent::Lock {
            lines: summary.lines_cleared,
        });
        if lines > 0 {
            self.emit(GameEvent::Clear {
                lines: summary.lines_cleared,
                spin,
            });
        }
        if let Some(level) = lock.level_up {
            log::info!("Level up: {}", level);
            self.emit(GameEvent::LevelUp { level });
        }
        if earned > 0 {
            let count = self.meter.count();
            log::info!("Special earned ({} banked)", count);
            self.emit(GameEvent::SpecialEarned { count });
        }

        self.spawn_next();
    }

    /// Take and clear the summary of the most recent lock
    pub fn take_last_lock(&mut self) -> Option<LockSummary> {
        self.last_lock.take()
    }

    pub fn ghost_y(&self) -> Option<i8> {
        self.controller.ghost_y(&self.board)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.controller.active().map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.hold = self.controller.hold_piece();
        out.can_hold = self.controller.can_hold();
        out.next_queue = self.queue.peek_5();
        out.score = self.scoring.score();
        out.level = self.scoring.level();
        out.lines = self.scoring.lines();
        out.energy = self.meter.energy();
        out.energy_percent = self.meter.energy_percent();
        out.specials = self.meter.count();
        out.running = self.running;
        out.paused = self.paused;
        out.combo = self.scoring.combo();
        out.back_to_back = self.scoring.back_to_back();
        out.drop_interval_ms = self.scoring.drop_interval_ms();
        out.lock_ms = self.controller.lock_timer_ms();
        out.seed = self.queue.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.controller.active()
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.controller.hold_piece()
    }

    pub fn can_hold(&self) -> bool {
        self.controller.can_hold()
    }

    pub fn next_piece(&self) -> Option<PieceKind> {
        self.queue.peek()
    }

    pub fn score(&self) -> u64 {
        self.scoring.score()
    }

    pub fn level(&self) -> u32 {
        self.scoring.level()
    }

    pub fn lines(&self) -> u32 {
        self.scoring.lines()
    }

    pub fn specials(&self) -> u8 {
        self.meter.count()
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn is_grounded(&self) -> bool {
        self.controller.is_grounded()
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_active(&mut self, piece: ActivePiece) {
        self.controller.set_active(Some(piece));
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("active", &self.controller.active())
            .field("score", &self.scoring.score())
            .field("level", &self.scoring.level())
            .field("lines", &self.scoring.lines())
            .field("specials", &self.meter.count())
            .field("running", &self.running)
            .field("paused", &self.paused)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::types::Rotation;

    fn engine() -> Engine {
        Engine::with_seed(12345)
    }

    fn recorder(engine: &mut Engine) -> Rc<RefCell<Vec<GameEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        engine.subscribe(move |event: &GameEvent| sink.borrow_mut().push(*event));
        events
    }

    fn piece(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> ActivePiece {
        ActivePiece {
            kind,
            rotation,
            x,
            y,
        }
    }

    #[test]
    fn test_new_engine_is_running() {
        let engine = engine();
        assert!(engine.running());
        assert!(!engine.paused());
        assert!(engine.active().is_some());
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.score(), 0);
        assert!(engine.can_hold());
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = engine();
        let mut b = engine();
        for _ in 0..10 {
            assert_eq!(a.active().map(|p| p.kind), b.active().map(|p| p.kind));
            a.hard_drop();
            b.hard_drop();
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_move_rejects_diagonal_and_zero() {
        let mut engine = engine();
        let before = engine.active();
        assert!(!engine.move_piece(1, 1));
        assert!(!engine.move_piece(0, 0));
        assert!(!engine.move_piece(0, -1));
        assert!(!engine.move_piece(2, 0));
        assert_eq!(engine.active(), before);
    }

    #[test]
    fn test_blocked_move_is_idempotent() {
        let mut engine = engine();
        engine.set_active(piece(PieceKind::O, Rotation::North, -1, 10));
        let events = recorder(&mut engine);
        let before = engine.snapshot();
        assert!(!engine.move_piece(-1, 0));
        assert_eq!(engine.snapshot(), before);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_lock_delay_threshold() {
        let mut engine = engine();
        engine.set_active(piece(PieceKind::O, Rotation::North, 3, 18));

        engine.tick(499);
        assert_eq!(engine.active().map(|p| p.y), Some(18));
        assert!(engine.take_last_lock().is_none());

        engine.tick(1);
        let summary = engine.take_last_lock().unwrap();
        assert_eq!(summary.lines_cleared, 0);
        assert_eq!(engine.board().row_fill_count(19), 2);
        assert!(engine.active().is_some());
    }

    #[test]
    fn test_huge_delta_locks_once() {
        let mut engine = engine();
        engine.set_active(piece(PieceKind::O, Rotation::North, 3, 18));
        engine.tick(1_000_000);
        assert!(engine.take_last_lock().is_some());
        // The replacement piece spawned and has not moved or locked.
        assert_eq!(engine.board().cells().iter().filter(|c| c.is_some()).count(), 4);
        assert_eq!(engine.active().map(|p| p.y), Some(-1));
    }

    #[test]
    fn test_negative_delta_is_zero() {
        let mut engine = engine();
        engine.set_active(piece(PieceKind::O, Rotation::North, 3, 18));
        engine.tick(400);
        engine.tick(-1000);
        assert_eq!(engine.snapshot().lock_ms, 400);
        engine.tick(100);
        assert!(engine.take_last_lock().is_some());
    }

    #[test]
    fn test_gravity_moves_one_row_per_interval() {
        let mut engine = engine();
        let start = engine.active().unwrap().y;
        engine.tick(999);
        assert_eq!(engine.active().unwrap().y, start);
        engine.tick(1);
        assert_eq!(engine.active().unwrap().y, start + 1);
        engine.tick(5000);
        assert_eq!(engine.active().unwrap().y, start + 2);
    }

    #[test]
    fn test_single_line_scores_100() {
        let mut engine = engine();
        engine.board_mut().fill_row(19, PieceKind::J, Some(4));
        // Vertical I in column 4 (its minos sit in box column 2).
        engine.set_active(piece(PieceKind::I, Rotation::East, 2, 16));
        engine.tick(500);

        let summary = engine.take_last_lock().unwrap();
        assert_eq!(summary.lines_cleared, 1);
        assert_eq!(summary.points, 100);
        assert_eq!(engine.score(), 100);
        assert_eq!(engine.lines(), 1);
    }

    #[test]
    fn test_back_to_back_tetris_at_level_three() {
        let mut engine = engine();
        engine.scoring.set_level(3);
        engine.scoring.set_back_to_back(true);
        for y in 16..20 {
            engine.board_mut().fill_row(y, PieceKind::L, Some(9));
        }
        engine.set_active(piece(PieceKind::I, Rotation::East, 7, 16));
        engine.tick(500);

        let summary = engine.take_last_lock().unwrap();
        assert_eq!(summary.lines_cleared, 4);
        assert!(summary.b2b_applied);
        assert_eq!(summary.points, 3600);
    }

    #[test]
    fn test_hard_drop_bonus_and_events() {
        let mut engine = engine();
        let events = recorder(&mut engine);
        engine.set_active(piece(PieceKind::O, Rotation::North, 3, 0));
        assert!(engine.hard_drop());

        let summary = engine.take_last_lock().unwrap();
        assert_eq!(summary.hard_drop_rows, 18);
        assert_eq!(summary.points, 36);
        assert_eq!(
            events.borrow().as_slice(),
            &[GameEvent::HardDrop { rows: 18 }, GameEvent::Lock { lines: 0 }]
        );
    }

    #[test]
    fn test_rotation_kicks_off_wall() {
        let mut engine = engine();
        // Vertical I flush against the left wall; rotating to horizontal
        // needs a kick to the right.
        let start = piece(PieceKind::I, Rotation::West, -1, 5);
        engine.set_active(start);
        assert!(engine.rotate(-1));
        let rotated = engine.active().unwrap();
        assert_eq!(rotated.rotation, Rotation::South);
        assert!(rotated.cells().iter().all(|&(x, _)| x >= 0));
        assert_ne!(rotated.x, start.x);
    }

    #[test]
    fn test_rotation_reverts_when_every_kick_fails() {
        let mut engine = engine();
        for y in 0..20 {
            engine.board_mut().fill_row(y, PieceKind::Z, Some(4));
        }
        // Vertical I in the one open column cannot turn anywhere.
        let start = piece(PieceKind::I, Rotation::East, 2, 10);
        engine.set_active(start);
        assert!(!engine.rotate(1));
        assert!(!engine.rotate(-1));
        assert_eq!(engine.active(), Some(start));
    }

    #[test]
    fn test_hold_once_per_piece() {
        let mut engine = engine();
        let first = engine.active().unwrap().kind;
        let next = engine.next_piece().unwrap();

        assert!(engine.hold());
        assert_eq!(engine.hold_piece(), Some(first));
        assert_eq!(engine.active().unwrap().kind, next);
        assert!(!engine.can_hold());
        assert!(!engine.hold());

        engine.hard_drop();
        assert!(engine.can_hold());
        assert!(engine.hold());
        assert_eq!(engine.active(), Some(ActivePiece::spawn(first)));
    }

    #[test]
    fn test_game_over_on_blocked_spawn() {
        let mut engine = engine();
        let events = recorder(&mut engine);
        for y in 1..20 {
            engine.board_mut().fill_row(y, PieceKind::S, Some(0));
        }
        engine.board_mut().fill_row(0, PieceKind::S, Some(9));
        engine.set_active(piece(PieceKind::O, Rotation::North, 3, -2));
        engine.hard_drop();

        assert!(!engine.running());
        assert!(engine.active().is_none());
        assert_eq!(events.borrow().last(), Some(&GameEvent::GameOver));

        let board = engine.board().clone();
        assert!(!engine.move_piece(1, 0));
        assert!(!engine.rotate(1));
        assert!(!engine.hard_drop());
        assert!(!engine.soft_drop());
        engine.tick(10_000);
        assert_eq!(engine.board(), &board);

        engine.reset();
        assert!(engine.running());
        assert!(engine.active().is_some());
        assert_eq!(engine.board().cells().iter().filter(|c| c.is_some()).count(), 0);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut engine = engine();
        engine.pause(true);
        let before = engine.snapshot();
        engine.tick(5000);
        assert!(!engine.move_piece(1, 0));
        assert!(!engine.hold());
        assert_eq!(engine.snapshot(), before);

        engine.toggle_pause();
        assert!(!engine.paused());
        assert!(engine.move_piece(1, 0));
    }

    #[test]
    fn test_special_removes_fullest_row() {
        let mut engine = engine();
        let events = recorder(&mut engine);
        assert!(!engine.use_special());

        engine.meter.set_count(1);
        engine.board_mut().fill_row(19, PieceKind::T, Some(0));
        engine.board_mut().fill_row(18, PieceKind::T, Some(1));
        engine.board_mut().set(5, 17, Some(PieceKind::L));
        assert!(engine.use_special());

        // Rows 18 and 19 tie; the upper one goes.
        assert_eq!(engine.specials(), 0);
        assert_eq!(engine.board().row_fill_count(19), 9);
        assert_eq!(engine.board().get(0, 19), Some(None));
        assert_eq!(engine.board().get(5, 18), Some(Some(PieceKind::L)));
        assert_eq!(
            events.borrow().as_slice(),
            &[GameEvent::SpecialUsed { row: 18 }]
        );
        assert!(!engine.use_special());
    }

    #[test]
    fn test_special_earned_from_tetris() {
        let mut engine = engine();
        let events = recorder(&mut engine);
        for y in 16..20 {
            engine.board_mut().fill_row(y, PieceKind::L, Some(9));
        }
        engine.set_active(piece(PieceKind::I, Rotation::East, 7, 0));
        engine.hard_drop();

        assert_eq!(engine.specials(), 1);
        let events = events.borrow();
        assert!(events.contains(&GameEvent::Clear {
            lines: 4,
            spin: false
        }));
        assert!(events.contains(&GameEvent::SpecialEarned { count: 1 }));
    }

    #[test]
    fn test_t_spin_single_scores_spin_table() {
        let mut engine = engine();
        // Row 19 has a T-shaped hole at columns 3..=5 with center 4 open below.
        engine.board_mut().fill_row(19, PieceKind::J, Some(4));
        engine.board_mut().fill_row(18, PieceKind::J, None);
        for x in 3..=5 {
            engine.board_mut().set(x, 18, None);
        }
        engine.board_mut().set(3, 17, Some(PieceKind::J));

        // T pointing down, rotated into the slot from facing east.
        engine.set_active(piece(PieceKind::T, Rotation::East, 3, 17));
        assert!(engine.rotate(1));
        assert_eq!(engine.active().unwrap().rotation, Rotation::South);
        engine.hard_drop();

        let summary = engine.take_last_lock().unwrap();
        assert!(summary.spin);
        assert_eq!(summary.lines_cleared, 2);
        assert_eq!(summary.points, 700);
    }

    #[test]
    fn test_rotation_then_gravity_fall_is_not_a_spin() {
        let mut engine = engine();
        for y in 10..=18 {
            engine.board_mut().set(0, y, Some(PieceKind::J));
        }
        engine.board_mut().fill_row(19, PieceKind::J, Some(1));

        // Rotated in open air, then carried into the slot by gravity alone.
        engine.set_active(piece(PieceKind::T, Rotation::North, 0, 2));
        assert!(engine.rotate(1));

        let mut ticks = 0;
        let summary = loop {
            engine.tick(1000);
            ticks += 1;
            if let Some(summary) = engine.take_last_lock() {
                break summary;
            }
            assert!(ticks < 40);
        };
        assert_eq!(summary.lines_cleared, 1);
        assert!(!summary.spin);
        assert_eq!(summary.points, 100);
    }

    #[test]
    fn test_reset_with_seed_replays_sequence() {
        let mut engine = engine();
        engine.reset_with_seed(77);
        let first: Vec<_> = (0..8)
            .map(|_| {
                let kind = engine.active().unwrap().kind;
                engine.hard_drop();
                kind
            })
            .collect();
        engine.reset_with_seed(77);
        let again: Vec<_> = (0..8)
            .map(|_| {
                let kind = engine.active().unwrap().kind;
                engine.hard_drop();
                kind
            })
            .collect();
        assert_eq!(first, again);
        assert_eq!(engine.snapshot().seed, 77);
    }
}
