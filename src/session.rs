//! Headless host driver
//!
//! Wires auto-repeat, engine ticks and high-score tracking together the way
//! a frontend frame loop would, without any rendering or device code.

use crate::core::{Engine, GameSnapshot};
use crate::highscore::{HighScoreStore, HighScoreTracker};
use crate::input::{AutoRepeat, Control, RepeatConfig};
use crate::types::{GameAction, LockSummary};

#[derive(Debug)]
pub struct Session<S> {
    engine: Engine,
    repeat: AutoRepeat,
    tracker: HighScoreTracker<S>,
    last_lock: Option<LockSummary>,
    was_running: bool,
}

impl<S: HighScoreStore> Session<S> {
    pub fn new(engine: Engine, store: S) -> Self {
        Self::with_repeat(engine, store, RepeatConfig::default())
    }

    pub fn with_repeat(engine: Engine, store: S, repeat: RepeatConfig) -> Self {
        let was_running = engine.running();
        Self {
            engine,
            repeat: AutoRepeat::with_config(repeat),
            tracker: HighScoreTracker::new(store),
            last_lock: None,
            was_running,
        }
    }

    /// Press a held control; its immediate action applies at once
    pub fn press(&mut self, control: Control) -> bool {
        if !self.playable() {
            return false;
        }
        match self.repeat.press(control) {
            Some(action) => self.apply(action),
            None => false,
        }
    }

    pub fn release(&mut self, control: Control) {
        self.repeat.release(control);
    }

    /// Apply a one-shot action (rotate, hard drop, hold, pause...)
    pub fn apply(&mut self, action: GameAction) -> bool {
        let changed = self.engine.apply_action(action);
        if matches!(action, GameAction::Pause | GameAction::Restart) {
            self.repeat.reset();
        }
        self.after_commands();
        changed
    }

    pub fn pause(&mut self, paused: bool) {
        self.engine.pause(paused);
        self.repeat.reset();
    }

    /// One host frame: repeats first, then the engine tick
    pub fn frame(&mut self, elapsed_ms: u32) {
        if self.playable() {
            for action in self.repeat.update(elapsed_ms) {
                self.engine.apply_action(action);
            }
        } else {
            self.repeat.reset();
        }
        self.engine.tick(i64::from(elapsed_ms));
        self.after_commands();
    }

    fn after_commands(&mut self) {
        let locked = match self.engine.take_last_lock() {
            Some(lock) => {
                self.last_lock = Some(lock);
                true
            }
            None => false,
        };

        let running = self.engine.running();
        let game_over = self.was_running && !running;
        self.was_running = running;

        if locked || game_over {
            let snapshot = self.engine.snapshot();
            if self.tracker.observe(&snapshot) {
                log::debug!("New high score: {}", snapshot.score);
            }
        }
        if game_over {
            self.repeat.reset();
        }
    }

    fn playable(&self) -> bool {
        self.engine.running() && !self.engine.paused()
    }

    /// Take and clear the summary of the most recent lock
    pub fn take_last_lock(&mut self) -> Option<LockSummary> {
        self.last_lock.take()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.engine.snapshot()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn best_score(&self) -> u64 {
        self.tracker.best()
    }

    pub fn tracker(&self) -> &HighScoreTracker<S> {
        &self.tracker
    }
}
