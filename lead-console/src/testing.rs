//! In-memory doubles for controller and poller tests.

use async_trait::async_trait;
use shared_types::{
    Campaign, Contact, ContactDetailResponse, ContactFilters, CreateCampaignRequest,
    CreateContactRequest, CreateDiscoveryJobRequest, CreateTemplateRequest, DashboardStats,
    DiscoveryJob, DiscoveryJobStatus, EmailSendResult, EmailSendResults, EmailTemplate,
    EnrichLeadsResponse, FilterOptions, HealthResponse, JobProgress, LogTouchRequest, Note,
    Outreach, PerformanceRow, SendCampaignRequest, SendEmailRequest, UpdateCampaignRequest,
    UpdateContactRequest, UpdateTemplateRequest,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use crate::api::{
    AnalyticsApi, ApiError, ApiResult, CampaignsApi, ContactsApi, DiscoveryApi, EmailApi,
};
use crate::helpers::confirm::Confirm;
use crate::helpers::notify::{NoticeLevel, Notifier};
use crate::pages::ConsoleContext;

#[derive(Default)]
pub struct FakeState {
    pub contacts: Vec<Contact>,
    pub next_id: i64,
    pub notes: Vec<(i64, String)>,
    pub touches: Vec<LogTouchRequest>,
    pub sent_emails: Vec<SendEmailRequest>,
    pub campaigns: Vec<Campaign>,
    pub campaign_sends: Vec<(i64, SendCampaignRequest)>,
    pub preview_csv: Vec<u8>,
    pub jobs: Vec<DiscoveryJob>,
    pub created_jobs: Vec<CreateDiscoveryJobRequest>,
    pub progress: HashMap<i64, JobProgress>,
    pub templates: Vec<EmailTemplate>,
    pub stats: DashboardStats,
    pub industry_rows: Vec<PerformanceRow>,
    pub source_rows: Vec<PerformanceRow>,
    pub filter_options: FilterOptions,
    pub enrich_batches: Vec<u32>,
    pub calls: Vec<String>,
    pub failing: HashSet<String>,
}

#[derive(Default)]
pub struct FakeApi {
    pub state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Self {
        let api = Self::default();
        api.state.lock().unwrap().next_id = 1000;
        api
    }

    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        let api = Self::new();
        api.state.lock().unwrap().contacts = contacts;
        api
    }

    /// Makes every later call of `operation` fail with a rejection.
    pub fn fail(&self, operation: &str) {
        self.state.lock().unwrap().failing.insert(operation.to_string());
    }

    pub fn recover(&self, operation: &str) {
        self.state.lock().unwrap().failing.remove(operation);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.as_str() == operation)
            .count()
    }

    pub fn set_job_status(&self, id: i64, status: DiscoveryJobStatus) {
        let mut state = self.state.lock().unwrap();
        if let Some(job) = state.jobs.iter_mut().find(|j| j.id == id) {
            job.status = status;
        }
    }

    fn record(&self, operation: &str) -> ApiResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(operation.to_string());
        if state.failing.contains(operation) {
            return Err(ApiError::Rejected(format!("{} failed", operation)));
        }
        Ok(())
    }
}

pub fn contact(id: i64, name: &str) -> Contact {
    Contact {
        id,
        name: name.to_string(),
        company: Some(format!("{} Co", name)),
        ..Default::default()
    }
}

pub fn contact_with_email(id: i64, name: &str, email: &str) -> Contact {
    Contact {
        email: Some(email.to_string()),
        ..contact(id, name)
    }
}

pub fn job(id: i64, name: &str, status: DiscoveryJobStatus) -> DiscoveryJob {
    DiscoveryJob {
        id,
        job_name: name.to_string(),
        source: Default::default(),
        location: "Tulsa, OK".to_string(),
        radius_miles: 25,
        industries: vec!["dentist".to_string()],
        status,
        progress: None,
        total_found: 0,
        total_imported: 0,
        total_duplicates: 0,
        error_message: None,
        created_at: None,
    }
}

pub fn campaign(id: i64, name: &str) -> Campaign {
    Campaign {
        id,
        name: name.to_string(),
        subject_lines: vec!["Quick question".to_string()],
        email_body: "Hi {{name}}".to_string(),
        target_industries: vec![],
        target_tiers: vec![],
        target_sources: vec![],
        daily_limit: 30,
        total_sent: 0,
        total_replied: 0,
        is_active: false,
    }
}

fn matches_filters(contact: &Contact, filters: &ContactFilters) -> bool {
    if let Some(search) = filters.search.as_deref().map(str::to_lowercase) {
        let company = contact.company.clone().unwrap_or_default().to_lowercase();
        if !contact.name.to_lowercase().contains(&search) && !company.contains(&search) {
            return false;
        }
    }
    if let Some(status) = &filters.status {
        if &contact.status != status {
            return false;
        }
    }
    if let Some(tier) = &filters.tier {
        if contact.tier.as_ref() != Some(tier) {
            return false;
        }
    }
    if let Some(industry) = &filters.industry {
        if contact.industry.as_ref() != Some(industry) {
            return false;
        }
    }
    if filters.has_email == Some(true) && !contact.has_email() {
        return false;
    }
    if filters.has_phone == Some(true) && !contact.has_phone() {
        return false;
    }
    true
}

#[async_trait]
impl ContactsApi for FakeApi {
    async fn list_contacts(&self, filters: &ContactFilters) -> ApiResult<Vec<Contact>> {
        self.record("list_contacts")?;
        let state = self.state.lock().unwrap();
        Ok(state
            .contacts
            .iter()
            .filter(|c| matches_filters(c, filters))
            .cloned()
            .collect())
    }

    async fn get_contact(&self, id: i64) -> ApiResult<ContactDetailResponse> {
        self.record("get_contact")?;
        let state = self.state.lock().unwrap();
        let contact = state
            .contacts
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Rejected("Contact not found".to_string()))?;
        let notes = state
            .notes
            .iter()
            .filter(|(cid, _)| *cid == id)
            .map(|(cid, content)| Note {
                id: None,
                contact_id: Some(*cid),
                content: content.clone(),
                created_at: None,
            })
            .collect();
        let outreach_history = state
            .touches
            .iter()
            .filter(|t| t.contact_id == id)
            .map(|t| Outreach {
                id: None,
                contact_id: t.contact_id,
                outreach_type: t.outreach_type.clone(),
                subject: None,
                message: Some(t.notes.clone()),
                sent_at: None,
            })
            .collect();
        Ok(ContactDetailResponse {
            contact,
            outreach_history,
            notes,
        })
    }

    async fn create_contact(&self, request: &CreateContactRequest) -> ApiResult<Contact> {
        self.record("create_contact")?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let contact = Contact {
            id: state.next_id,
            name: request.name.clone(),
            company: Some(request.company.clone()),
            email: request.email.clone(),
            phone: request.phone.clone(),
            industry: request.industry.clone(),
            tier: Some(request.tier.clone()),
            status: request.status.clone().unwrap_or_default(),
            source: Some(request.source.clone()),
            ..Default::default()
        };
        state.contacts.push(contact.clone());
        Ok(contact)
    }

    async fn update_contact(&self, id: i64, request: &UpdateContactRequest) -> ApiResult<Contact> {
        self.record("update_contact")?;
        let mut state = self.state.lock().unwrap();
        let contact = state
            .contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ApiError::Rejected("Contact not found".to_string()))?;
        if let Some(name) = &request.name {
            contact.name = name.clone();
        }
        if let Some(company) = &request.company {
            contact.company = Some(company.clone());
        }
        if request.email.is_some() {
            contact.email = request.email.clone();
        }
        if request.phone.is_some() {
            contact.phone = request.phone.clone();
        }
        if request.tier.is_some() {
            contact.tier = request.tier.clone();
        }
        if let Some(status) = &request.status {
            contact.status = status.clone();
        }
        Ok(contact.clone())
    }

    async fn delete_contact(&self, id: i64) -> ApiResult<()> {
        self.record("delete_contact")?;
        self.state.lock().unwrap().contacts.retain(|c| c.id != id);
        Ok(())
    }

    async fn bulk_delete_contacts(&self, ids: &[i64]) -> ApiResult<u64> {
        self.record("bulk_delete_contacts")?;
        let mut state = self.state.lock().unwrap();
        let before = state.contacts.len();
        state.contacts.retain(|c| !ids.contains(&c.id));
        Ok((before - state.contacts.len()) as u64)
    }

    async fn delete_all_contacts(&self) -> ApiResult<u64> {
        self.record("delete_all_contacts")?;
        let mut state = self.state.lock().unwrap();
        let count = state.contacts.len() as u64;
        state.contacts.clear();
        Ok(count)
    }

    async fn check_duplicate(&self, email: &str) -> ApiResult<Option<Contact>> {
        self.record("check_duplicate")?;
        let state = self.state.lock().unwrap();
        Ok(state
            .contacts
            .iter()
            .find(|c| c.email.as_deref().map(|e| e.eq_ignore_ascii_case(email)) == Some(true))
            .cloned())
    }

    async fn add_note(&self, contact_id: i64, content: &str) -> ApiResult<()> {
        self.record("add_note")?;
        self.state
            .lock()
            .unwrap()
            .notes
            .push((contact_id, content.to_string()));
        Ok(())
    }
}

#[async_trait]
impl CampaignsApi for FakeApi {
    async fn list_campaigns(&self) -> ApiResult<Vec<Campaign>> {
        self.record("list_campaigns")?;
        Ok(self.state.lock().unwrap().campaigns.clone())
    }

    async fn create_campaign(&self, request: &CreateCampaignRequest) -> ApiResult<Option<Campaign>> {
        self.record("create_campaign")?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let created = Campaign {
            id: state.next_id,
            name: request.name.clone(),
            subject_lines: request.subject_lines.clone(),
            email_body: request.email_body.clone(),
            target_industries: request.target_industries.clone(),
            target_tiers: request.target_tiers.clone(),
            target_sources: request.target_sources.clone(),
            daily_limit: request.daily_limit,
            total_sent: 0,
            total_replied: 0,
            is_active: false,
        };
        state.campaigns.push(created.clone());
        Ok(Some(created))
    }

    async fn update_campaign(
        &self,
        id: i64,
        request: &UpdateCampaignRequest,
    ) -> ApiResult<Option<Campaign>> {
        self.record("update_campaign")?;
        let mut state = self.state.lock().unwrap();
        let Some(campaign) = state.campaigns.iter_mut().find(|c| c.id == id) else {
            return Err(ApiError::Rejected("Campaign not found".to_string()));
        };
        if let Some(active) = request.is_active {
            campaign.is_active = active;
        }
        if let Some(limit) = request.daily_limit {
            campaign.daily_limit = limit;
        }
        if let Some(name) = &request.name {
            campaign.name = name.clone();
        }
        Ok(Some(campaign.clone()))
    }

    async fn delete_campaign(&self, id: i64) -> ApiResult<()> {
        self.record("delete_campaign")?;
        self.state.lock().unwrap().campaigns.retain(|c| c.id != id);
        Ok(())
    }

    async fn campaign_recipients(&self, _id: i64) -> ApiResult<Vec<Contact>> {
        self.record("campaign_recipients")?;
        let state = self.state.lock().unwrap();
        Ok(state.contacts.iter().filter(|c| c.has_email()).cloned().collect())
    }

    async fn preview_campaign(&self, _id: i64) -> ApiResult<Vec<u8>> {
        self.record("preview_campaign")?;
        Ok(self.state.lock().unwrap().preview_csv.clone())
    }

    async fn send_campaign(&self, id: i64, request: &SendCampaignRequest) -> ApiResult<u64> {
        self.record("send_campaign")?;
        let mut state = self.state.lock().unwrap();
        state.campaign_sends.push((id, request.clone()));
        Ok(request.batch_size.unwrap_or(0) as u64)
    }
}

#[async_trait]
impl DiscoveryApi for FakeApi {
    async fn list_jobs(&self) -> ApiResult<Vec<DiscoveryJob>> {
        self.record("list_jobs")?;
        Ok(self.state.lock().unwrap().jobs.clone())
    }

    async fn create_job(&self, request: &CreateDiscoveryJobRequest) -> ApiResult<DiscoveryJob> {
        self.record("create_job")?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let mut created = job(state.next_id, &request.job_name, DiscoveryJobStatus::Pending);
        created.source = request.source.clone();
        created.location = request.location.clone();
        created.radius_miles = request.radius_miles;
        created.industries = request.industries.clone();
        state.jobs.push(created.clone());
        state.created_jobs.push(request.clone());
        Ok(created)
    }

    async fn run_job(&self, id: i64) -> ApiResult<DiscoveryJob> {
        self.record("run_job")?;
        let mut state = self.state.lock().unwrap();
        let found = state
            .jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| ApiError::Rejected("Job not found".to_string()))?;
        found.status = DiscoveryJobStatus::Completed;
        Ok(found.clone())
    }

    async fn job_progress(&self, id: i64) -> ApiResult<Option<JobProgress>> {
        self.record("job_progress")?;
        Ok(self.state.lock().unwrap().progress.get(&id).cloned())
    }

    async fn delete_job(&self, id: i64) -> ApiResult<()> {
        self.record("delete_job")?;
        self.state.lock().unwrap().jobs.retain(|j| j.id != id);
        Ok(())
    }

    async fn enrich_leads(&self, batch_size: u32) -> ApiResult<EnrichLeadsResponse> {
        self.record("enrich_leads")?;
        self.state.lock().unwrap().enrich_batches.push(batch_size);
        Ok(EnrichLeadsResponse {
            enriched: batch_size as u64,
            message: None,
        })
    }
}

#[async_trait]
impl EmailApi for FakeApi {
    async fn send_email(&self, request: &SendEmailRequest) -> ApiResult<EmailSendResults> {
        self.record("send_email")?;
        let mut state = self.state.lock().unwrap();
        let rows = request
            .contact_ids
            .iter()
            .map(|&id| {
                let known = state.contacts.iter().find(|c| c.id == id);
                EmailSendResult {
                    contact_id: id,
                    success: known.is_some(),
                    contact_name: known.map(|c| c.name.clone()),
                    contact_email: known.and_then(|c| c.email.clone()),
                    email_actually_sent: false,
                    error: known.is_none().then(|| "Contact not found".to_string()),
                }
            })
            .collect();
        state.sent_emails.push(request.clone());
        Ok(EmailSendResults::PerContact(rows))
    }

    async fn log_touch(&self, request: &LogTouchRequest) -> ApiResult<Option<Contact>> {
        self.record("log_touch")?;
        let mut state = self.state.lock().unwrap();
        state.touches.push(request.clone());
        let updated = state
            .contacts
            .iter_mut()
            .find(|c| c.id == request.contact_id)
            .map(|c| {
                c.total_touches += 1;
                c.clone()
            });
        Ok(updated)
    }

    async fn list_templates(&self) -> ApiResult<Vec<EmailTemplate>> {
        self.record("list_templates")?;
        Ok(self.state.lock().unwrap().templates.clone())
    }

    async fn create_template(&self, request: &CreateTemplateRequest) -> ApiResult<()> {
        self.record("create_template")?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.templates.push(EmailTemplate {
            id,
            name: request.name.clone(),
            subject_line: request.subject_line.clone(),
            body: request.body.clone(),
            is_default: false,
            category: Some(request.category.clone()),
        });
        Ok(())
    }

    async fn update_template(&self, id: i64, request: &UpdateTemplateRequest) -> ApiResult<()> {
        self.record("update_template")?;
        let mut state = self.state.lock().unwrap();
        if let Some(template) = state.templates.iter_mut().find(|t| t.id == id) {
            template.name = request.name.clone();
            template.subject_line = request.subject_line.clone();
            template.body = request.body.clone();
        }
        Ok(())
    }

    async fn delete_template(&self, id: i64) -> ApiResult<()> {
        self.record("delete_template")?;
        self.state.lock().unwrap().templates.retain(|t| t.id != id);
        Ok(())
    }
}

#[async_trait]
impl AnalyticsApi for FakeApi {
    async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.record("dashboard_stats")?;
        Ok(self.state.lock().unwrap().stats.clone())
    }

    async fn industry_performance(&self) -> ApiResult<Vec<PerformanceRow>> {
        self.record("industry_performance")?;
        Ok(self.state.lock().unwrap().industry_rows.clone())
    }

    async fn source_performance(&self) -> ApiResult<Vec<PerformanceRow>> {
        self.record("source_performance")?;
        Ok(self.state.lock().unwrap().source_rows.clone())
    }

    async fn filter_options(&self) -> ApiResult<FilterOptions> {
        self.record("filter_options")?;
        Ok(self.state.lock().unwrap().filter_options.clone())
    }

    async fn health(&self) -> ApiResult<HealthResponse> {
        self.record("health")?;
        Ok(HealthResponse {
            status: "healthy".to_string(),
        })
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<(NoticeLevel, String)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(NoticeLevel, String)> {
        self.notices.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<(NoticeLevel, String)> {
        self.notices.lock().unwrap().last().cloned()
    }

    pub fn contains(&self, level: NoticeLevel, message: &str) -> bool {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .any(|(l, m)| *l == level && m == message)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.notices.lock().unwrap().push((level, message.to_string()));
    }
}

/// Answers prompts from a queue, declining once the queue runs dry.
#[derive(Default)]
pub struct ScriptedConfirm {
    answers: Mutex<VecDeque<bool>>,
    pub asked: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, _title: &str, message: &str) -> bool {
        self.asked.lock().unwrap().push(message.to_string());
        self.answers.lock().unwrap().pop_front().unwrap_or(false)
    }
}

pub struct Harness {
    pub api: Arc<FakeApi>,
    pub notifier: Arc<RecordingNotifier>,
    pub confirm: Arc<ScriptedConfirm>,
}

impl Harness {
    pub fn new(api: FakeApi, answers: &[bool]) -> Self {
        Self {
            api: Arc::new(api),
            notifier: Arc::new(RecordingNotifier::default()),
            confirm: Arc::new(ScriptedConfirm::answering(answers)),
        }
    }

    pub fn context(&self) -> ConsoleContext {
        ConsoleContext::new(self.api.clone(), self.notifier.clone(), self.confirm.clone())
    }
}
