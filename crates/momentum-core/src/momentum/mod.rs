mod decay;
mod events;
mod level;
mod rules;
mod state;
mod tracker;

pub use decay::{
    day_decay, days_between, decay_breakdown, decay_days, total_decay, total_decay_up_to, DayDecay,
    DecayKind,
};
pub use events::{MomentumChange, MomentumEvent};
pub use level::MomentumLevel;
pub use rules::{ComebackRules, DecayRules, MomentumRules, ScoringRules, TaskPriority};
pub use state::{clamp_momentum, MomentumState, MAX_MOMENTUM, MIN_MOMENTUM};
pub use tracker::{MomentumSnapshot, MomentumTracker};
