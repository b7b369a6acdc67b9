//! External work-item sync boundary.
//!
//! The core consumes external trackers as an opaque list of drop-able
//! [`WorkItem`] payloads behind the [`WorkItemSource`] port. The concrete
//! Azure DevOps implementation lives in [`devops`]. Adapter failures surface
//! as typed errors and never touch planner state; item text only enters the
//! grid through the explicit drop operation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod devops;

pub use devops::DevOpsClient;

/// A work item fetched from the external tracker, in the shape the grid
/// understands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    /// Tracker-side identifier
    pub id: u64,
    /// Work item title
    pub title: String,
    /// Tracker priority (1 is highest)
    pub priority: i64,
    /// Tracker state, e.g. "Active"
    pub state: String,
    /// Identity the item is assigned to
    pub assigned_to: String,
    /// Most recent comment first; may be empty
    #[serde(default)]
    pub comments: Vec<String>,
}

impl WorkItem {
    /// The task text written into a cell when this item is dropped on it.
    pub fn cell_text(&self) -> String {
        let mut text = format!("[#{}] {}", self.id, self.title);
        if let Some(comment) = self.comments.first() {
            text.push_str("\n\nLatest Update:\n");
            text.push_str(comment);
        }
        text
    }

    /// Parses a JSON drop payload back into a work item.
    pub fn from_payload(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// Port for pulling the identity's open work items from an external tracker.
#[async_trait]
pub trait WorkItemSource {
    /// Fetch the open work items assigned to the given identity.
    async fn fetch_assigned(&self, email: &str) -> Result<Vec<WorkItem>>;
}
