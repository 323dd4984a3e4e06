mod orchestrator;
mod tracker;

pub use orchestrator::*;
pub use tracker::*;
