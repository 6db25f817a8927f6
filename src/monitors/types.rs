//! Monitor definitions and wire types
//!
//! A desired monitor is declared in the descriptor with a stable identifier;
//! that identifier becomes the `serverless_monitor_id` tag on the remote
//! monitor and is the key reconciliation matches on. Remote monitors are
//! additionally tagged with the deployment's cloud-stack identity so one
//! account can host monitors for many stacks.

use serde::{Deserialize, Serialize};

/// Tag carrying the stable reconciliation identifier
pub const MONITOR_ID_TAG: &str = "serverless_monitor_id";

/// Tag scoping monitors to one deployed stack
pub const STACK_ID_TAG: &str = "aws_cloudformation_stack-id";

/// Provenance tag attached to every monitor this tool manages
pub const CREATED_BY_TAG: &str = "created_by:layerline";

/// A monitor definition as declared in the descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSpec {
    /// Stable identifier, becomes the `serverless_monitor_id` tag value
    pub id: String,

    /// Monitor display name
    pub name: String,

    /// Monitor query expression
    pub query: String,

    /// Notification message body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Additional user tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Remote-side monitor options, passed through opaquely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

impl MonitorSpec {
    /// Builds the request body for this definition, attaching the
    /// reconciliation, provenance, and (when known) stack tags.
    pub fn to_params(&self, stack_id: &str) -> MonitorParams {
        let mut tags = self.tags.clone();
        tags.push(format!("{MONITOR_ID_TAG}:{}", self.id));
        tags.push(CREATED_BY_TAG.to_string());
        if !stack_id.is_empty() {
            tags.push(format!("{STACK_ID_TAG}:{stack_id}"));
        }

        MonitorParams {
            name: self.name.clone(),
            query: self.query.clone(),
            monitor_type: "metric alert".to_string(),
            message: self.message.clone(),
            tags,
            options: self.options.clone(),
        }
    }
}

/// Request body for monitor create/update calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorParams {
    pub name: String,
    pub query: String,
    #[serde(rename = "type")]
    pub monitor_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

/// A monitor as returned by the remote search/create/update endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueriedMonitor {
    /// Remote-assigned numeric identity
    pub id: u64,
    pub name: String,
    pub query: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl QueriedMonitor {
    /// The `serverless_monitor_id` tag value, if the monitor carries one
    pub fn monitor_id_tag(&self) -> Option<&str> {
        let prefix = format!("{MONITOR_ID_TAG}:");
        self.tags
            .iter()
            .find_map(|tag| tag.strip_prefix(prefix.as_str()))
    }
}
