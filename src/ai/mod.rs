mod agent;
mod lookahead;
mod random;

pub use agent::Agent;
pub use lookahead::{AiConfig, BlockScan, LookaheadAgent};
pub use random::RandomAgent;
