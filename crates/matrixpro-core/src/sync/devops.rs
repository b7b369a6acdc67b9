//! Azure DevOps work-item client.
//!
//! Implements the sync pipeline: a WIQL query for open Feature work items
//! assigned to the identity, a batch detail fetch for the first 50 ids, then
//! a sequential per-item fetch of the latest comment. Responses parse into
//! explicit DTOs; `id` and `title` are required, `priority` and `state` fall
//! back to documented defaults.

use std::sync::OnceLock;

use async_trait::async_trait;
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{WorkItem, WorkItemSource};
use crate::{
    error::{HttpResultExt, MatrixError, Result},
    models::BoardSettings,
};

const API_VERSION: &str = "6.0";
const COMMENTS_API_VERSION: &str = "6.0-preview.3";
const MAX_WORK_ITEMS: usize = 50;
const DETAIL_FIELDS: [&str; 4] = [
    "System.Id",
    "System.Title",
    "Microsoft.VSTS.Common.Priority",
    "System.State",
];

/// HTTP client for the Azure DevOps work-item API.
pub struct DevOpsClient {
    http: reqwest::Client,
    organization: String,
    project: String,
    pat: String,
    proxy: Option<String>,
}

impl DevOpsClient {
    /// Builds a client from board settings.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::InvalidInput` when the personal access token,
    /// organization, or project is missing.
    pub fn from_settings(settings: &BoardSettings) -> Result<Self> {
        let pat = settings
            .devops_pat
            .as_deref()
            .filter(|pat| !pat.trim().is_empty())
            .ok_or_else(|| {
                MatrixError::invalid_input(
                    "devops_pat",
                    "Configure a DevOps personal access token in settings first",
                )
            })?;
        if settings.organization.trim().is_empty() || settings.project.trim().is_empty() {
            return Err(MatrixError::invalid_input(
                "organization",
                "Configure the DevOps organization and project in settings first",
            ));
        }

        let proxy = if settings.use_proxy {
            settings.cors_proxy.clone().filter(|p| !p.trim().is_empty())
        } else {
            None
        };

        Ok(Self {
            http: reqwest::Client::new(),
            organization: settings.organization.clone(),
            project: settings.project.clone(),
            pat: pat.to_string(),
            proxy,
        })
    }

    /// Wraps a target URL with the configured proxy prefix, if any.
    fn endpoint(&self, url: &str) -> String {
        match &self.proxy {
            Some(prefix) => {
                let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
                format!("{prefix}{encoded}")
            }
            None => url.to_string(),
        }
    }

    async fn query_assigned_ids(&self, email: &str) -> Result<Vec<u64>> {
        let url = format!(
            "https://dev.azure.com/{}/{}/_apis/wit/wiql?api-version={API_VERSION}",
            self.organization, self.project
        );
        let query = format!(
            "SELECT [System.Id], [System.Title] FROM WorkItems \
             WHERE [System.WorkItemType] = 'Feature' AND [System.State] <> 'Closed' \
             AND [System.AssignedTo] CONTAINS '{email}'"
        );

        let response = self
            .http
            .post(self.endpoint(&url))
            .basic_auth("", Some(&self.pat))
            .json(&WiqlRequest { query })
            .send()
            .await
            .sync_context("WIQL query failed")?
            .error_for_status()
            .sync_context("WIQL query rejected")?
            .json::<WiqlResponse>()
            .await
            .sync_context("Malformed WIQL response")?;

        let ids: Vec<u64> = response
            .work_items
            .into_iter()
            .take(MAX_WORK_ITEMS)
            .map(|item| item.id)
            .collect();
        debug!("WIQL query matched {} work item(s)", ids.len());
        Ok(ids)
    }

    async fn fetch_details(&self, ids: &[u64]) -> Result<Vec<WorkItemFields>> {
        let url = format!(
            "https://dev.azure.com/{}/_apis/wit/workitemsbatch?api-version={API_VERSION}",
            self.organization
        );

        let response = self
            .http
            .post(self.endpoint(&url))
            .basic_auth("", Some(&self.pat))
            .json(&BatchRequest {
                ids: ids.to_vec(),
                fields: DETAIL_FIELDS.iter().map(|f| (*f).to_string()).collect(),
            })
            .send()
            .await
            .sync_context("Batch detail fetch failed")?
            .error_for_status()
            .sync_context("Batch detail fetch rejected")?
            .json::<BatchResponse>()
            .await
            .sync_context("Malformed batch response")?;

        Ok(response.value.into_iter().map(|item| item.fields).collect())
    }

    /// Fetches the most recent comment for a work item.
    ///
    /// A failure here degrades to an item without comments rather than
    /// failing the whole sync.
    async fn latest_comment(&self, work_item_id: u64) -> Option<String> {
        let url = format!(
            "https://dev.azure.com/{}/{}/_apis/wit/workitems/{work_item_id}/comments?$top=1&api-version={COMMENTS_API_VERSION}",
            self.organization, self.project
        );

        let response = self
            .http
            .get(self.endpoint(&url))
            .basic_auth("", Some(&self.pat))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status);

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                warn!("Failed to fetch latest comment for work item #{work_item_id}: {e}");
                return None;
            }
        };

        match response.json::<CommentsResponse>().await {
            Ok(comments) => comments
                .comments
                .into_iter()
                .next()
                .map(|comment| strip_html(&comment.text))
                .filter(|text| !text.is_empty()),
            Err(e) => {
                warn!("Malformed comments response for work item #{work_item_id}: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl WorkItemSource for DevOpsClient {
    async fn fetch_assigned(&self, email: &str) -> Result<Vec<WorkItem>> {
        let ids = self.query_assigned_ids(email).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let details = self.fetch_details(&ids).await?;

        // Comments are fetched one at a time; requests within a sync never
        // overlap.
        let mut items = Vec::with_capacity(details.len());
        for fields in details {
            let comment = self.latest_comment(fields.id).await;
            items.push(work_item_from_fields(fields, email, comment));
        }
        Ok(items)
    }
}

fn work_item_from_fields(
    fields: WorkItemFields,
    email: &str,
    comment: Option<String>,
) -> WorkItem {
    WorkItem {
        id: fields.id,
        title: fields.title,
        priority: fields.priority.unwrap_or(3),
        state: fields.state.unwrap_or_else(|| "Unknown".to_string()),
        assigned_to: email.to_string(),
        comments: comment.into_iter().collect(),
    }
}

/// Removes HTML tags from tracker comment markup.
fn strip_html(text: &str) -> String {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    let tags = TAGS.get_or_init(|| Regex::new("<[^>]*>").expect("tag pattern compiles"));
    tags.replace_all(text, "").trim().to_string()
}

// Wire DTOs. `id` and `title` are required; a response missing them is a
// typed parse failure, not a silently defaulted item.

#[derive(Debug, Serialize)]
struct WiqlRequest {
    query: String,
}

#[derive(Debug, Deserialize)]
struct WiqlResponse {
    #[serde(rename = "workItems", default)]
    work_items: Vec<WiqlWorkItem>,
}

#[derive(Debug, Deserialize)]
struct WiqlWorkItem {
    id: u64,
}

#[derive(Debug, Serialize)]
struct BatchRequest {
    ids: Vec<u64>,
    fields: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct BatchResponse {
    #[serde(default)]
    value: Vec<BatchWorkItem>,
}

#[derive(Debug, Deserialize)]
struct BatchWorkItem {
    fields: WorkItemFields,
}

#[derive(Debug, Deserialize)]
struct WorkItemFields {
    #[serde(rename = "System.Id")]
    id: u64,
    #[serde(rename = "System.Title")]
    title: String,
    #[serde(rename = "Microsoft.VSTS.Common.Priority")]
    priority: Option<i64>,
    #[serde(rename = "System.State")]
    state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommentsResponse {
    #[serde(default)]
    comments: Vec<Comment>,
}

#[derive(Debug, Deserialize)]
struct Comment {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html_removes_markup() {
        assert_eq!(
            strip_html("<div>Deployed <b>to staging</b> today</div>"),
            "Deployed to staging today"
        );
        assert_eq!(strip_html("plain text"), "plain text");
        assert_eq!(strip_html("<p></p>"), "");
    }

    #[test]
    fn test_wiql_response_parses_and_tolerates_missing_list() {
        let parsed: WiqlResponse =
            serde_json::from_str(r#"{"workItems":[{"id":12},{"id":34}]}"#).unwrap();
        assert_eq!(parsed.work_items.len(), 2);
        assert_eq!(parsed.work_items[0].id, 12);

        let empty: WiqlResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.work_items.is_empty());
    }

    #[test]
    fn test_batch_response_parses_namespaced_fields() {
        let body = r#"{
            "value": [{
                "fields": {
                    "System.Id": 4217,
                    "System.Title": "Improve throughput",
                    "Microsoft.VSTS.Common.Priority": 1,
                    "System.State": "Active"
                }
            }]
        }"#;
        let parsed: BatchResponse = serde_json::from_str(body).unwrap();
        let fields = &parsed.value[0].fields;
        assert_eq!(fields.id, 4217);
        assert_eq!(fields.title, "Improve throughput");
        assert_eq!(fields.priority, Some(1));
    }

    #[test]
    fn test_batch_response_requires_id_and_title() {
        let missing_title = r#"{"value":[{"fields":{"System.Id": 1}}]}"#;
        assert!(serde_json::from_str::<BatchResponse>(missing_title).is_err());
    }

    #[test]
    fn test_optional_fields_get_explicit_defaults() {
        let fields = WorkItemFields {
            id: 9,
            title: "Spike".to_string(),
            priority: None,
            state: None,
        };
        let item = work_item_from_fields(fields, "dev@example.com", None);
        assert_eq!(item.priority, 3);
        assert_eq!(item.state, "Unknown");
        assert!(item.comments.is_empty());
    }

    #[test]
    fn test_comments_response_shape() {
        let parsed: CommentsResponse =
            serde_json::from_str(r#"{"comments":[{"text":"<i>done</i>"}]}"#).unwrap();
        assert_eq!(parsed.comments[0].text, "<i>done</i>");
    }

    #[test]
    fn test_from_settings_requires_credentials() {
        let mut settings = BoardSettings::default();
        assert!(DevOpsClient::from_settings(&settings).is_err());

        settings.devops_pat = Some("token".to_string());
        assert!(DevOpsClient::from_settings(&settings).is_err());

        settings.organization = "Aptean".to_string();
        settings.project = "EDIOne".to_string();
        assert!(DevOpsClient::from_settings(&settings).is_ok());
    }

    #[test]
    fn test_proxy_prefix_encodes_target() {
        let mut settings = BoardSettings::default();
        settings.devops_pat = Some("token".to_string());
        settings.organization = "Org".to_string();
        settings.project = "Proj".to_string();
        settings.use_proxy = true;
        settings.cors_proxy = Some("https://proxy.example/?url=".to_string());

        let client = DevOpsClient::from_settings(&settings).unwrap();
        let wrapped = client.endpoint("https://dev.azure.com/Org/_apis/wit/wiql?api-version=6.0");
        assert!(wrapped.starts_with("https://proxy.example/?url="));
        assert!(!wrapped["https://proxy.example/?url=".len()..].contains('?'));
    }
}
