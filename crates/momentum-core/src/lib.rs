//! # Momentum Core Library
//!
//! This library provides the engagement-scoring engine behind Momentum, a
//! task companion that replaces all-or-nothing streaks with a score that
//! rises on completions and decays gently over missed days.
//!
//! ## Architecture
//!
//! - **Momentum Engine**: a stateful tracker that applies day-by-day decay
//!   lazily before every date-dependent read or write
//! - **Storage**: SQLite-backed state blob and change history, plus an
//!   in-memory store for embedding hosts and tests
//! - **Configuration**: TOML file holding the tunable scoring rules
//!
//! ## Key Components
//!
//! - [`MomentumTracker`]: scoring and decay state machine
//! - [`MomentumStore`]: persistence boundary
//! - [`Database`]: SQLite implementation of the store
//! - [`Config`]: application configuration management

pub mod clock;
pub mod error;
pub mod momentum;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError};
pub use momentum::{
    DayDecay, DecayKind, MomentumChange, MomentumEvent, MomentumLevel, MomentumRules,
    MomentumSnapshot, MomentumState, MomentumTracker, TaskPriority,
};
pub use storage::{Config, Database, MemoryStore, MomentumStore};
