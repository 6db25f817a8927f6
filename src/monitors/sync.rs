//! Monitor reconciliation
//!
//! Compares the monitors declared in the descriptor against the monitors the
//! remote side already holds for this stack, keyed by the
//! `serverless_monitor_id` tag: missing ones are created, changed ones
//! updated, identical ones left alone, and stack-owned monitors with no
//! remaining definition deleted. Calls run sequentially; a failure on one
//! monitor is recorded in its outcome and the batch continues.

use super::client::{MonitorsApi, MonitorsError};
use super::types::{MonitorSpec, QueriedMonitor, STACK_ID_TAG};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// What the synchronizer did for one monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Created,
    Updated,
    Unchanged,
    Deleted,
}

impl SyncAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncAction::Created => "created",
            SyncAction::Updated => "updated",
            SyncAction::Unchanged => "unchanged",
            SyncAction::Deleted => "deleted",
        }
    }
}

/// Per-monitor result of one reconciliation run
#[derive(Debug)]
pub struct SyncOutcome {
    /// The monitor's `serverless_monitor_id` tag value
    pub monitor_id: String,
    /// The action taken, or the error that prevented it
    pub result: Result<SyncAction, MonitorsError>,
}

fn differs(existing: &QueriedMonitor, desired: &MonitorSpec) -> bool {
    existing.query != desired.query || existing.name != desired.name
}

/// Reconciles `desired` against the remote monitors owned by `stack_id`.
///
/// An empty `stack_id` means the stack identity could not be obtained; the
/// remote search and the orphan-deletion pass are skipped (fail open) and
/// every desired monitor is treated as missing. A failing search aborts the
/// run, since nothing can be reconciled without it; failures on individual
/// create/update/delete calls only mark that monitor's outcome.
pub async fn sync_monitors(
    client: &dyn MonitorsApi,
    desired: &[MonitorSpec],
    stack_id: &str,
) -> Result<Vec<SyncOutcome>, MonitorsError> {
    let existing = if stack_id.is_empty() {
        warn!("Stack identity unavailable, skipping orphan cleanup");
        Vec::new()
    } else {
        client.search(&format!("{STACK_ID_TAG}:{stack_id}")).await?
    };

    let existing_by_tag: HashMap<&str, &QueriedMonitor> = existing
        .iter()
        .filter_map(|monitor| monitor.monitor_id_tag().map(|tag| (tag, monitor)))
        .collect();

    let mut outcomes = Vec::new();

    for spec in desired {
        let params = spec.to_params(stack_id);
        let result = match existing_by_tag.get(spec.id.as_str()) {
            None => {
                info!(monitor = %spec.id, "Creating monitor");
                client.create(&params).await.map(|_| SyncAction::Created)
            }
            Some(existing) if differs(existing, spec) => {
                info!(monitor = %spec.id, id = existing.id, "Updating monitor");
                client
                    .update(existing.id, &params)
                    .await
                    .map(|_| SyncAction::Updated)
            }
            Some(_) => {
                debug!(monitor = %spec.id, "Monitor unchanged");
                Ok(SyncAction::Unchanged)
            }
        };

        if let Err(error) = &result {
            warn!(monitor = %spec.id, %error, "Monitor sync failed");
        }
        outcomes.push(SyncOutcome {
            monitor_id: spec.id.clone(),
            result,
        });
    }

    if !stack_id.is_empty() {
        let desired_ids: HashSet<&str> = desired.iter().map(|spec| spec.id.as_str()).collect();
        for (tag, monitor) in &existing_by_tag {
            if desired_ids.contains(tag) {
                continue;
            }
            info!(monitor = %tag, id = monitor.id, "Deleting orphaned monitor");
            let result = client.delete(monitor.id).await.map(|_| SyncAction::Deleted);
            if let Err(error) = &result {
                warn!(monitor = %tag, %error, "Monitor delete failed");
            }
            outcomes.push(SyncOutcome {
                monitor_id: (*tag).to_string(),
                result,
            });
        }
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitors::mock::MockMonitorsClient;
    use crate::monitors::types::MONITOR_ID_TAG;

    fn spec(id: &str, query: &str) -> MonitorSpec {
        MonitorSpec {
            id: id.to_string(),
            name: format!("{id} monitor"),
            query: query.to_string(),
            message: None,
            tags: Vec::new(),
            options: None,
        }
    }

    fn remote(id: u64, tag_id: &str, name: &str, query: &str) -> QueriedMonitor {
        QueriedMonitor {
            id,
            name: name.to_string(),
            query: query.to_string(),
            tags: vec![format!("{MONITOR_ID_TAG}:{tag_id}")],
        }
    }

    #[tokio::test]
    async fn test_unchanged_monitor_is_left_alone() {
        let desired = vec![spec("m1", "q1")];
        let client = MockMonitorsClient::new().with_existing(remote(1, "m1", "m1 monitor", "q1"));

        let outcomes = sync_monitors(&client, &desired, "stack-1").await.unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(*outcomes[0].result.as_ref().unwrap(), SyncAction::Unchanged);
        assert!(client.created().is_empty());
        assert!(client.updated().is_empty());
    }

    #[tokio::test]
    async fn test_changed_query_triggers_update() {
        let desired = vec![spec("m1", "q1-new")];
        let client = MockMonitorsClient::new().with_existing(remote(1, "m1", "m1 monitor", "q1-old"));

        let outcomes = sync_monitors(&client, &desired, "stack-1").await.unwrap();
        assert_eq!(*outcomes[0].result.as_ref().unwrap(), SyncAction::Updated);
        let updated = client.updated();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].0, 1);
        assert_eq!(updated[0].1.query, "q1-new");
    }

    #[tokio::test]
    async fn test_remote_monitor_without_tag_is_ignored() {
        let untagged = QueriedMonitor {
            id: 9,
            name: "manual".to_string(),
            query: "q".to_string(),
            tags: vec!["env:prod".to_string()],
        };
        let client = MockMonitorsClient::new().with_existing(untagged);

        let outcomes = sync_monitors(&client, &[], "stack-1").await.unwrap();
        assert!(outcomes.is_empty());
        assert!(client.deleted().is_empty());
    }

    #[tokio::test]
    async fn test_empty_stack_id_skips_search_and_deletion() {
        let desired = vec![spec("m1", "q1")];
        let client = MockMonitorsClient::new().with_existing(remote(1, "m1", "m1 monitor", "q1"));

        let outcomes = sync_monitors(&client, &desired, "").await.unwrap();
        // without a stack scope the existing monitor is invisible, so m1 is created
        assert_eq!(*outcomes[0].result.as_ref().unwrap(), SyncAction::Created);
        assert!(client.deleted().is_empty());
    }
}
