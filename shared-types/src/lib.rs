use serde::{Deserialize, Deserializer, Serialize};

pub mod analytics;
pub mod campaign;
pub mod contact;
pub mod discovery_job;
pub mod email;
pub mod filters;

pub use analytics::{DashboardStats, DashboardStatsResponse, PerformanceResponse, PerformanceRow};
pub use campaign::{
    Campaign, CampaignResponse, CampaignsResponse, CreateCampaignRequest, RecipientsResponse,
    SendCampaignRequest, SendCampaignResponse, UpdateCampaignRequest,
};
pub use contact::{
    parse_timestamp, AddNoteRequest, BulkDeleteRequest, Contact, ContactDetailResponse,
    ContactFilters, ContactResponse, ContactStatus, ContactsResponse, CreateContactRequest,
    DeletedResponse, DuplicateCheckRequest, DuplicateCheckResponse, LeadSource, LeadTier, Note,
    Outreach, UpdateContactRequest,
};
pub use discovery_job::{
    CreateDiscoveryJobRequest, DiscoveryJob, DiscoveryJobListResponse, DiscoveryJobResponse,
    DiscoveryJobStatus, EnrichLeadsRequest, EnrichLeadsResponse, JobProgress,
    JobProgressResponse,
};
pub use email::{
    CreateTemplateRequest, EmailSendResult, EmailSendResults, EmailTemplate, LogTouchRequest,
    LogTouchResponse, SendEmailRequest, SendEmailResponse, TemplatesResponse,
    UpdateTemplateRequest,
};
pub use filters::FilterOptions;

/// Error body returned by the backend
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
}

/// Backend health probe body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Treats an explicit JSON `null` the same as a missing field.
pub fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
