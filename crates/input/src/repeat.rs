//! DAS/ARR auto-repeat for held controls
//!
//! Design principles:
//! 1. Each press generates exactly ONE immediate action
//! 2. A horizontal control held for the DAS delay repeats at the ARR rate
//! 3. Soft drop repeats at its own rate with no DAS
//! 4. The most recent horizontal press wins; releasing the other one is ignored

use serde::{Deserialize, Serialize};

use crate::types::{
    GameAction, BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS,
};

/// A control that auto-repeats while held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Left,
    Right,
    SoftDrop,
}

impl Control {
    /// Action produced by a press or a repeat
    pub fn action(&self) -> GameAction {
        match self {
            Control::Left => GameAction::MoveLeft,
            Control::Right => GameAction::MoveRight,
            Control::SoftDrop => GameAction::SoftDrop,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepeatConfig {
    /// Delay before a held horizontal control starts repeating
    pub das_ms: u32,
    /// Interval between horizontal repeats
    pub arr_ms: u32,
    /// Interval between soft drop repeats
    pub soft_drop_ms: u32,
}

impl Default for RepeatConfig {
    fn default() -> Self {
        Self {
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
            soft_drop_ms: SOFT_DROP_ARR_MS,
        }
    }
}

/// Held horizontal control and its timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeldHorizontal {
    control: Control,
    das_timer: u32,
    arr_accumulator: u32,
}

/// Tracks held controls and turns elapsed time into repeat actions
#[derive(Debug, Clone)]
pub struct AutoRepeat {
    config: RepeatConfig,
    horizontal: Option<HeldHorizontal>,
    soft_drop_held: bool,
    soft_drop_accumulator: u32,
}

impl AutoRepeat {
    pub fn new() -> Self {
        Self::with_config(RepeatConfig::default())
    }

    pub fn with_config(config: RepeatConfig) -> Self {
        Self {
            config,
            horizontal: None,
            soft_drop_held: false,
            soft_drop_accumulator: 0,
        }
    }

    /// Handle a press.
    ///
    /// Returns the immediate action, or `None` when the control is already held.
    pub fn press(&mut self, control: Control) -> Option<GameAction> {
        match control {
            Control::Left | Control::Right => {
                if self.horizontal.map(|held| held.control) == Some(control) {
                    return None;
                }
                self.horizontal = Some(HeldHorizontal {
                    control,
                    das_timer: 0,
                    arr_accumulator: 0,
                });
            }
            Control::SoftDrop => {
                if self.soft_drop_held {
                    return None;
                }
                self.soft_drop_held = true;
                self.soft_drop_accumulator = 0;
            }
        }
        Some(control.action())
    }

    /// Handle a release
    pub fn release(&mut self, control: Control) {
        match control {
            Control::Left | Control::Right => {
                if self.horizontal.map(|held| held.control) == Some(control) {
                    self.horizontal = None;
                }
            }
            Control::SoftDrop => {
                self.soft_drop_held = false;
                self.soft_drop_accumulator = 0;
            }
        }
    }

    /// Advance timers and collect the repeats that fell due.
    ///
    /// Repeats per call are capped at the board span so a long stall does not
    /// flood the engine with moves that cannot all apply.
    pub fn update(&mut self, elapsed_ms: u32) -> Vec<GameAction> {
        let mut actions = Vec::new();

        if let Some(held) = self.horizontal.as_mut() {
            let das = self.config.das_ms;
            let arr = self.config.arr_ms.max(1);
            let prev_das = held.das_timer;
            held.das_timer = held.das_timer.saturating_add(elapsed_ms);

            if held.das_timer >= das {
                // Only the time past the DAS delay counts toward repeats.
                let excess = if prev_das < das {
                    held.das_timer - das
                } else {
                    elapsed_ms
                };
                held.arr_accumulator = held.arr_accumulator.saturating_add(excess);

                let due = (held.arr_accumulator / arr).min(u32::from(BOARD_WIDTH));
                held.arr_accumulator %= arr;
                actions.extend((0..due).map(|_| held.control.action()));
            }
        }

        if self.soft_drop_held {
            let interval = self.config.soft_drop_ms.max(1);
            self.soft_drop_accumulator = self.soft_drop_accumulator.saturating_add(elapsed_ms);

            let due = (self.soft_drop_accumulator / interval).min(u32::from(BOARD_HEIGHT));
            self.soft_drop_accumulator %= interval;
            actions.extend((0..due).map(|_| GameAction::SoftDrop));
        }

        actions
    }

    /// Forget all held controls (pause, game over)
    pub fn reset(&mut self) {
        self.horizontal = None;
        self.soft_drop_held = false;
        self.soft_drop_accumulator = 0;
    }

    pub fn config(&self) -> RepeatConfig {
        self.config
    }

    /// Currently held horizontal control
    pub fn horizontal(&self) -> Option<Control> {
        self.horizontal.map(|held| held.control)
    }

    pub fn is_soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }
}

impl Default for AutoRepeat {
    fn default() -> Self {
        Self::new()
    }
}
