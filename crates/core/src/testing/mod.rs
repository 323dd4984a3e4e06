//! Mock collaborators for tests.

mod mock_cluster;
mod mock_tracker;

pub use mock_cluster::MockCluster;
pub use mock_tracker::MockTracker;
