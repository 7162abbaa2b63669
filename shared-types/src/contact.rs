use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::null_to_default;

/// Outreach pipeline stage for a lead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactStatus {
    #[default]
    Lead,
    Contacted,
    Replied,
    Qualified,
    #[serde(rename = "Not Interested")]
    NotInterested,
    Converted,
    #[serde(untagged)]
    Other(String),
}

impl ContactStatus {
    /// Pipeline column order.
    pub const ALL: [ContactStatus; 6] = [
        ContactStatus::Lead,
        ContactStatus::Contacted,
        ContactStatus::Replied,
        ContactStatus::Qualified,
        ContactStatus::NotInterested,
        ContactStatus::Converted,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ContactStatus::Lead => "Lead",
            ContactStatus::Contacted => "Contacted",
            ContactStatus::Replied => "Replied",
            ContactStatus::Qualified => "Qualified",
            ContactStatus::NotInterested => "Not Interested",
            ContactStatus::Converted => "Converted",
            ContactStatus::Other(s) => s,
        }
    }

    /// Case-insensitive lookup that also accepts kebab/snake spellings
    /// ("not-interested", "not_interested").
    pub fn parse(value: &str) -> Self {
        let normalized = value.trim().to_lowercase().replace(['-', '_'], " ");
        Self::ALL
            .iter()
            .find(|s| s.as_str().to_lowercase() == normalized)
            .cloned()
            .unwrap_or_else(|| ContactStatus::Other(value.trim().to_string()))
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend-assigned priority classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadTier {
    High,
    #[default]
    Medium,
    Low,
    #[serde(untagged)]
    Other(String),
}

impl LeadTier {
    pub const ALL: [LeadTier; 3] = [LeadTier::High, LeadTier::Medium, LeadTier::Low];

    pub fn as_str(&self) -> &str {
        match self {
            LeadTier::High => "High",
            LeadTier::Medium => "Medium",
            LeadTier::Low => "Low",
            LeadTier::Other(s) => s,
        }
    }

    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        Self::ALL
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| LeadTier::Other(trimmed.to_string()))
    }
}

impl fmt::Display for LeadTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a lead came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadSource {
    #[default]
    Manual,
    Google,
    Yelp,
    #[serde(untagged)]
    Other(String),
}

impl LeadSource {
    pub fn as_str(&self) -> &str {
        match self {
            LeadSource::Manual => "manual",
            LeadSource::Google => "google",
            LeadSource::Yelp => "yelp",
            LeadSource::Other(s) => s,
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "" | "manual" => LeadSource::Manual,
            "google" => LeadSource::Google,
            "yelp" => LeadSource::Yelp,
            _ => LeadSource::Other(value.trim().to_string()),
        }
    }
}

impl fmt::Display for LeadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub industry: Option<String>,
    pub tier: Option<LeadTier>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub status: ContactStatus,
    pub source: Option<LeadSource>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub total_touches: u32,
    #[serde(default, deserialize_with = "null_to_default")]
    pub ai_opportunity_score: f64,
    pub last_contacted: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Contact {
    pub fn has_email(&self) -> bool {
        is_present(self.email.as_deref())
    }

    pub fn has_phone(&self) -> bool {
        is_present(self.phone.as_deref())
    }

    pub fn source_or_default(&self) -> LeadSource {
        self.source.clone().unwrap_or_default()
    }

    /// Label for the AI opportunity score, `None` when no score was assigned.
    pub fn opportunity_label(&self) -> Option<&'static str> {
        let score = self.ai_opportunity_score;
        if score <= 0.0 {
            None
        } else if score > 60.0 {
            Some("High")
        } else if score > 30.0 {
            Some("Medium")
        } else {
            Some("Low")
        }
    }
}

fn is_present(value: Option<&str>) -> bool {
    value.map(|v| !v.trim().is_empty()).unwrap_or(false)
}

/// Parses the timestamp formats the backend emits (RFC 3339, naive ISO
/// datetimes with or without fractional seconds, plain dates).
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub contact_id: Option<i64>,
    pub content: String,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outreach {
    #[serde(default)]
    pub id: Option<i64>,
    pub contact_id: i64,
    pub outreach_type: String,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub sent_at: Option<String>,
}

/// Query parameters for the contact list. `has_email`/`has_phone` are sent
/// to the backend and also applied locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContactStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<LeadTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_email: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_phone: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateContactRequest {
    pub name: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    pub tier: LeadTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContactStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub source: LeadSource,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateContactRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<LeadTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContactStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
}

impl From<CreateContactRequest> for UpdateContactRequest {
    fn from(req: CreateContactRequest) -> Self {
        Self {
            name: Some(req.name),
            company: Some(req.company),
            email: req.email,
            phone: req.phone,
            industry: req.industry,
            tier: Some(req.tier),
            status: req.status,
            city: req.city,
            state: req.state,
            website_url: req.website_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddNoteRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DuplicateCheckRequest {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    pub contact_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ContactsResponse {
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Deserialize)]
pub struct ContactResponse {
    pub contact: Contact,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactDetailResponse {
    pub contact: Contact,
    #[serde(default, deserialize_with = "null_to_default")]
    pub outreach_history: Vec<Outreach>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub notes: Vec<Note>,
}

#[derive(Debug, Deserialize)]
pub struct DuplicateCheckResponse {
    #[serde(default)]
    pub is_duplicate: bool,
    pub contact: Option<Contact>,
}

#[derive(Debug, Deserialize)]
pub struct DeletedResponse {
    #[serde(default, deserialize_with = "null_to_default")]
    pub deleted: u64,
}
