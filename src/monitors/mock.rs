//! Mock monitor API client for tests
//!
//! Seeded with the monitors the "remote side" already knows about and
//! records every mutating call. Individual monitor ids can be scripted to
//! fail so partial-failure handling is testable.

use super::client::{MonitorsApi, MonitorsError};
use super::types::{MonitorParams, QueriedMonitor};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Default)]
struct MockState {
    existing: Vec<QueriedMonitor>,
    created: Vec<MonitorParams>,
    updated: Vec<(u64, MonitorParams)>,
    deleted: Vec<u64>,
    failing_names: HashSet<String>,
    next_id: u64,
}

/// Scripted in-memory implementation of [`MonitorsApi`]
pub struct MockMonitorsClient {
    state: Mutex<MockState>,
}

impl MockMonitorsClient {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                next_id: 1000,
                ..Default::default()
            }),
        }
    }

    /// Seeds a monitor the search call will return.
    pub fn with_existing(self, monitor: QueriedMonitor) -> Self {
        self.state.lock().unwrap().existing.push(monitor);
        self
    }

    /// Makes create/update calls fail for monitors with this name.
    pub fn failing_for(self, name: impl Into<String>) -> Self {
        self.state.lock().unwrap().failing_names.insert(name.into());
        self
    }

    pub fn created(&self) -> Vec<MonitorParams> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn updated(&self) -> Vec<(u64, MonitorParams)> {
        self.state.lock().unwrap().updated.clone()
    }

    pub fn deleted(&self) -> Vec<u64> {
        self.state.lock().unwrap().deleted.clone()
    }

    fn fail_if_scripted(state: &MockState, name: &str) -> Result<(), MonitorsError> {
        if state.failing_names.contains(name) {
            return Err(MonitorsError::Request {
                status: 500,
                message: format!("scripted failure for {name}"),
            });
        }
        Ok(())
    }
}

impl Default for MockMonitorsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MonitorsApi for MockMonitorsClient {
    async fn create(&self, params: &MonitorParams) -> Result<QueriedMonitor, MonitorsError> {
        let mut state = self.state.lock().unwrap();
        Self::fail_if_scripted(&state, &params.name)?;
        state.next_id += 1;
        let monitor = QueriedMonitor {
            id: state.next_id,
            name: params.name.clone(),
            query: params.query.clone(),
            tags: params.tags.clone(),
        };
        state.created.push(params.clone());
        Ok(monitor)
    }

    async fn update(&self, id: u64, params: &MonitorParams) -> Result<QueriedMonitor, MonitorsError> {
        let mut state = self.state.lock().unwrap();
        Self::fail_if_scripted(&state, &params.name)?;
        state.updated.push((id, params.clone()));
        Ok(QueriedMonitor {
            id,
            name: params.name.clone(),
            query: params.query.clone(),
            tags: params.tags.clone(),
        })
    }

    async fn delete(&self, id: u64) -> Result<(), MonitorsError> {
        self.state.lock().unwrap().deleted.push(id);
        Ok(())
    }

    async fn search(&self, _tag: &str) -> Result<Vec<QueriedMonitor>, MonitorsError> {
        Ok(self.state.lock().unwrap().existing.clone())
    }
}
