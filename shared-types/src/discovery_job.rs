use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{null_to_default, LeadSource};

/// Lead discovery job running on the backend against an external source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryJob {
    pub id: i64,
    pub job_name: String,
    pub source: LeadSource,
    #[serde(default, deserialize_with = "null_to_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub radius_miles: u32,
    #[serde(default, deserialize_with = "null_to_default")]
    pub industries: Vec<String>,
    pub status: DiscoveryJobStatus,
    pub progress: Option<JobProgress>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub total_found: u64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub total_imported: u64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub total_duplicates: u64,
    pub error_message: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl DiscoveryJob {
    pub fn is_running(&self) -> bool {
        self.status == DiscoveryJobStatus::Running
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryJobStatus {
    Pending,
    Running,
    Completed,
    Failed,
    #[serde(untagged)]
    Other(String),
}

impl DiscoveryJobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DiscoveryJobStatus::Pending => "pending",
            DiscoveryJobStatus::Running => "running",
            DiscoveryJobStatus::Completed => "completed",
            DiscoveryJobStatus::Failed => "failed",
            DiscoveryJobStatus::Other(s) => s,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            DiscoveryJobStatus::Completed | DiscoveryJobStatus::Failed
        )
    }
}

impl fmt::Display for DiscoveryJobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobProgress {
    pub step: Option<u32>,
    pub total: Option<u32>,
    pub message: Option<String>,
}

impl JobProgress {
    /// Percentage complete, only when both step and a non-zero total are known.
    pub fn percent(&self) -> Option<f32> {
        match (self.step, self.total) {
            (Some(step), Some(total)) if step > 0 && total > 0 => {
                Some((step as f32 / total as f32 * 100.0).min(100.0))
            }
            _ => None,
        }
    }

    pub fn has_message(&self) -> bool {
        self.message
            .as_deref()
            .map(|m| !m.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Request to create a discovery job. `industries` carries the expanded
/// search keywords, not category names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDiscoveryJobRequest {
    pub job_name: String,
    pub source: LeadSource,
    pub location: String,
    pub radius_miles: u32,
    pub industries: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EnrichLeadsRequest {
    pub batch_size: u32,
}

#[derive(Debug, Deserialize)]
pub struct DiscoveryJobListResponse {
    pub jobs: Vec<DiscoveryJob>,
}

#[derive(Debug, Deserialize)]
pub struct DiscoveryJobResponse {
    pub job: DiscoveryJob,
}

#[derive(Debug, Deserialize)]
pub struct JobProgressResponse {
    pub progress: Option<JobProgress>,
}

#[derive(Debug, Deserialize)]
pub struct EnrichLeadsResponse {
    #[serde(default, deserialize_with = "null_to_default")]
    pub enriched: u64,
    #[serde(default)]
    pub message: Option<String>,
}
