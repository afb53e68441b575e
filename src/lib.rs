pub mod catalog;
pub mod config;
pub mod detection;
pub mod engine;
pub mod labels;
pub mod normalize;
pub mod overlay;
pub mod schema;

pub use engine::{MatchEngine, MatchOutcome};
