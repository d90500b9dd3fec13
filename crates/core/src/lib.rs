//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has no dependencies on rendering, audio, input devices or storage:
//!
//! - **Deterministic**: Same seed produces identical runs
//! - **Testable**: Unit tests next to every rule
//! - **Portable**: Any host can drive it by calling [`Engine::tick`] and the commands
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision, merge, row clearing and row removal
//! - [`pieces`]: Tetromino shapes and kick tables
//! - [`rng`]: 7-bag piece generation and the preview queue
//! - [`controller`]: Active piece state machine, lock delay and hold
//! - [`scoring`]: Points, combos, back-to-back, spins and levels
//! - [`meter`]: Energy meter and banked special actions
//! - [`config`]: Tunable rules with validation
//! - [`snapshot`]: Read-only per-frame state for renderers
//! - [`engine`]: Orchestrator exposing the command/tick surface
//!
//! # Example
//!
//! ```
//! use stackfall_core::{Engine, EngineConfig};
//! use stackfall_types::GameAction;
//!
//! let mut engine = Engine::new(EngineConfig::seeded(12345));
//!
//! engine.apply_action(GameAction::MoveRight);
//! engine.apply_action(GameAction::RotateCw);
//! engine.apply_action(GameAction::HardDrop);
//!
//! // Hard drops award 2 points per row.
//! assert!(engine.score() > 0);
//! assert!(engine.take_last_lock().is_some());
//! ```
//!
//! # Timing
//!
//! The host calls [`Engine::tick`] with the elapsed milliseconds:
//! - **Gravity**: 1000ms per row at level 1, times 0.85 per level, never below 70ms
//! - **Lock Delay**: 500ms of grounded time before a piece locks
//! - A single tick performs at most one gravity step or one lock

pub mod board;
pub mod config;
pub mod controller;
pub mod engine;
pub mod meter;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use stackfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, EngineConfig, SoftDropMode};
pub use controller::{HoldOutcome, PieceController, SoftDrop};
pub use engine::{Engine, EventListener};
pub use meter::SpecialMeter;
pub use pieces::{attempt_kick, get_kicks, get_matrix, get_shape, ActivePiece, RotationSystem};
pub use rng::{PieceQueue, RandomBag};
pub use scoring::{calculate_score, is_spin, ScoreResult, ScoringEngine};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
