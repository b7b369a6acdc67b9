//! Per-board configuration.

use serde::{Deserialize, Serialize};

/// Settings persisted alongside a board.
///
/// The DevOps fields configure the work-item sync adapter; the proxy pair is
/// an optional passthrough prefix kept for environments that route outbound
/// calls through one. `preserve_row_identity` selects the rollover identity
/// policy (see [`crate::rollover`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BoardSettings {
    /// Display name used in prompts and sync attribution
    pub user_name: String,

    /// Identity email for the work-item query
    pub company_email: String,

    /// Azure DevOps personal access token
    pub devops_pat: Option<String>,

    /// Azure DevOps organization
    pub organization: String,

    /// Azure DevOps project
    pub project: String,

    /// Optional proxy prefix; the target URL is appended percent-encoded
    pub cors_proxy: Option<String>,

    /// Whether to route sync requests through the proxy
    pub use_proxy: bool,

    /// Whether rows keep their ids across a week rollover
    pub preserve_row_identity: bool,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            company_email: String::new(),
            devops_pat: None,
            organization: String::new(),
            project: String::new(),
            cors_proxy: None,
            use_proxy: false,
            preserve_row_identity: true,
        }
    }
}
