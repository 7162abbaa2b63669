use serde::{Deserialize, Serialize};

use crate::{null_to_default, LeadSource, LeadTier};

/// A named batch of templated outreach emails with a daily send limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub subject_lines: Vec<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub email_body: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub target_industries: Vec<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub target_tiers: Vec<LeadTier>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub target_sources: Vec<LeadSource>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub daily_limit: u32,
    #[serde(default, deserialize_with = "null_to_default")]
    pub total_sent: u64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub total_replied: u64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCampaignRequest {
    pub name: String,
    pub subject_lines: Vec<String>,
    pub email_body: String,
    pub target_industries: Vec<String>,
    pub target_tiers: Vec<LeadTier>,
    pub target_sources: Vec<LeadSource>,
    pub daily_limit: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCampaignRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_lines: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// `batch_size: None` lets the backend use the campaign's daily limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCampaignRequest {
    pub batch_size: Option<u32>,
    pub preview_mode: bool,
}

#[derive(Debug, Deserialize)]
pub struct CampaignsResponse {
    pub campaigns: Vec<Campaign>,
}

#[derive(Debug, Deserialize)]
pub struct CampaignResponse {
    pub campaign: Option<Campaign>,
}

#[derive(Debug, Deserialize)]
pub struct RecipientsResponse {
    #[serde(default, deserialize_with = "null_to_default")]
    pub recipients: Vec<crate::Contact>,
}

#[derive(Debug, Deserialize)]
pub struct SendCampaignResponse {
    #[serde(default, deserialize_with = "null_to_default")]
    pub sent: u64,
}
