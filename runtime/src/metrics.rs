//! Metric descriptions for the Store.
//!
//! The Store records through the `metrics` facade. Nothing is exported unless
//! the host process installs a recorder; call [`describe_store_metrics`] after
//! installing one so the series carry help text.

use metrics::{describe_counter, describe_histogram};

// Re-export metrics macros for use in other crates
pub use metrics::{counter, histogram};

/// Register descriptions for every metric the Store records.
pub fn describe_store_metrics() {
    describe_counter!(
        "store.actions.total",
        "Total number of actions reduced by the store, including feedback actions"
    );
    describe_histogram!(
        "store.reducer.duration_seconds",
        "Time spent inside the reducer per action"
    );
    describe_counter!(
        "store.effects.executed",
        "Effects started by the store, labelled by effect type"
    );
    describe_counter!(
        "store.shutdown.rejected_actions",
        "Actions rejected because the store was shutting down"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describing_without_recorder_is_a_no_op() {
        describe_store_metrics();
        counter!("store.actions.total").increment(1);
        histogram!("store.reducer.duration_seconds").record(0.001);
    }
}
