//! Monitor synchronization
//!
//! Independent of the layer engine; shares nothing with it but the
//! descriptor the desired definitions are read from. `client` talks to the
//! remote API, `sync` decides what to do, `mock` backs the tests.

pub mod client;
pub mod mock;
pub mod sync;
pub mod types;

pub use client::{HttpMonitorsClient, MonitorsApi, MonitorsError};
pub use mock::MockMonitorsClient;
pub use sync::{sync_monitors, SyncAction, SyncOutcome};
pub use types::{MonitorParams, MonitorSpec, QueriedMonitor, MONITOR_ID_TAG, STACK_ID_TAG};
