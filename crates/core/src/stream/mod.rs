//! Status stream publisher.
//!
//! Turns repeated polling of the record store into a bounded, timed,
//! cancellable sequence of status snapshots. Polling semantics: a stream may
//! observe an update on its next tick or miss a rapid burst entirely; within
//! one stream snapshots are strictly ordered and interval-spaced.

use std::sync::Arc;
use std::time::Duration;

use futures::Stream;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::StreamConfig;
use crate::customer::CustomerStore;
use crate::status::STATUS_INITIALIZING;

/// One observed status for a named customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub status: String,
}

impl StatusSnapshot {
    fn initializing() -> Self {
        Self {
            status: STATUS_INITIALIZING.to_string(),
        }
    }
}

/// Publishes bounded snapshot streams over the record store.
///
/// Holds no per-customer state; each call to [`snapshots`](Self::snapshots)
/// carries its own loop bookkeeping (iteration counter, target name) plus a
/// cloned store handle that is released when the stream is dropped.
pub struct StatusPublisher {
    store: Arc<dyn CustomerStore>,
    interval: Duration,
    max_snapshots: usize,
}

impl StatusPublisher {
    pub fn new(store: Arc<dyn CustomerStore>, interval: Duration, max_snapshots: usize) -> Self {
        Self {
            store,
            interval,
            max_snapshots,
        }
    }

    pub fn from_config(store: Arc<dyn CustomerStore>, config: &StreamConfig) -> Self {
        Self::new(
            store,
            Duration::from_secs(config.interval_secs),
            config.max_snapshots,
        )
    }

    /// Open a lazy, finite snapshot sequence for `name`.
    ///
    /// The first snapshot is computed eagerly; subsequent ones are separated
    /// by the configured interval. An absent record is not an error - it
    /// means "not yet provisioned" and yields the `initializing` sentinel.
    /// Dropping the stream (e.g. on client disconnect) stops polling; a new
    /// call starts a fresh sequence, there is no mid-sequence resume.
    pub fn snapshots(
        &self,
        name: impl Into<String>,
    ) -> impl Stream<Item = StatusSnapshot> + Send + 'static {
        let store = Arc::clone(&self.store);
        let interval = self.interval;
        let max_snapshots = self.max_snapshots;
        let name = name.into();

        futures::stream::unfold(0usize, move |tick| {
            let store = Arc::clone(&store);
            let name = name.clone();
            async move {
                if tick >= max_snapshots {
                    return None;
                }

                if tick > 0 {
                    tokio::time::sleep(interval).await;
                }

                let snapshot = match store.find_by_name(&name) {
                    Ok(Some(record)) => StatusSnapshot {
                        status: record.status,
                    },
                    Ok(None) => StatusSnapshot::initializing(),
                    Err(e) => {
                        // A transient store error is treated like an absent
                        // record rather than tearing the stream down.
                        warn!(name = %name, error = %e, "status poll failed");
                        StatusSnapshot::initializing()
                    }
                };

                Some((snapshot, tick + 1))
            }
        })
    }
}
