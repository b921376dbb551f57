// Replacement module - priority-ordered whole-token substitution

mod engine;

pub use engine::{PriorityReplacementEngine, ReplacementRule};
