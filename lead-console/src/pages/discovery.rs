use shared_types::{CreateDiscoveryJobRequest, DiscoveryJob, DiscoveryJobStatus, LeadSource};
use tokio::task::JoinHandle;

use super::{ConsoleContext, Outcome};
use crate::api::DiscoveryApi;
use crate::helpers::format::progress_bar;
use crate::helpers::keywords::{expand_keywords, MAX_KEYWORDS};
use crate::helpers::notify::NoticeLevel;
use crate::jobs::discovery_poller::{DiscoveryPoller, PollerConfig};

pub const DEFAULT_ENRICH_BATCH: u32 = 10;

#[derive(Debug, Clone)]
pub struct JobForm {
    pub job_name: String,
    pub source: LeadSource,
    pub location: String,
    pub radius_miles: u32,
    /// Category names from the keyword table.
    pub industries: Vec<String>,
    /// Comma-separated extra search terms.
    pub custom_keywords: String,
}

impl Default for JobForm {
    fn default() -> Self {
        Self {
            job_name: String::new(),
            source: LeadSource::Google,
            location: String::new(),
            radius_miles: 25,
            industries: Vec::new(),
            custom_keywords: String::new(),
        }
    }
}

pub struct DiscoveryPage {
    ctx: ConsoleContext,
    poller: DiscoveryPoller,
}

impl DiscoveryPage {
    pub fn new(ctx: ConsoleContext, config: PollerConfig) -> Self {
        let poller = DiscoveryPoller::new(ctx.api.clone(), ctx.notifier(), config);
        Self { ctx, poller }
    }

    pub fn poller(&self) -> &DiscoveryPoller {
        &self.poller
    }

    pub async fn jobs(&self) -> Vec<DiscoveryJob> {
        self.poller.jobs().await
    }

    /// Reloads the job list and starts or stops the poller to match it.
    pub async fn load_jobs(&self) -> Outcome {
        reload_jobs(&self.ctx, &self.poller).await
    }

    pub async fn create_job(&self, form: &JobForm) -> Outcome<DiscoveryJob> {
        let job_name = form.job_name.trim();
        let location = form.location.trim();
        let known_source = matches!(form.source, LeadSource::Google | LeadSource::Yelp);
        if job_name.is_empty() || location.is_empty() || !known_source {
            return self.ctx.reject("Please fill in all required fields");
        }

        let keywords = expand_keywords(&form.industries, &form.custom_keywords);
        if keywords.is_empty() {
            return self
                .ctx
                .reject("Please enter custom keywords or select at least one industry");
        }
        if keywords.len() > MAX_KEYWORDS {
            return self.ctx.reject(&format!(
                "You have {} total keywords. Limit to {} for best results. Try selecting fewer industries.",
                keywords.len(),
                MAX_KEYWORDS
            ));
        }

        let request = CreateDiscoveryJobRequest {
            job_name: job_name.to_string(),
            source: form.source.clone(),
            location: location.to_string(),
            radius_miles: form.radius_miles,
            industries: keywords,
        };

        match self.ctx.api.create_job(&request).await {
            Ok(job) => {
                self.ctx.success(&format!(
                    "Discovery job created with {} search terms!",
                    request.industries.len()
                ));
                self.load_jobs().await;
                Outcome::Done(job)
            }
            Err(e) => self.ctx.fail("Error creating job", &e),
        }
    }

    /// Fires the run request in the background and reloads right away so the
    /// poller picks the job up. The handle resolves when the backend answers.
    pub async fn run_job(&self, job_id: i64) -> JoinHandle<Outcome<DiscoveryJob>> {
        self.ctx.notify(
            NoticeLevel::Info,
            "Starting discovery... Progress will update automatically.",
        );

        let ctx = self.ctx.clone();
        let poller = self.poller.clone();
        let handle = tokio::spawn(async move {
            let outcome = match ctx.api.run_job(job_id).await {
                Ok(job) => {
                    tracing::info!(
                        "Discovery job {} finished: {} found, {} imported",
                        job.id,
                        job.total_found,
                        job.total_imported
                    );
                    ctx.success(&format!(
                        "Job completed! Imported {} leads.",
                        job.total_imported
                    ));
                    Outcome::Done(job)
                }
                Err(e) => {
                    tracing::error!("Running discovery job {} failed: {}", job_id, e);
                    let message = format!("Error: {}", e.backend_message().unwrap_or("Error running job"));
                    ctx.notify(NoticeLevel::Danger, &message);
                    Outcome::Failed(message)
                }
            };
            reload_jobs(&ctx, &poller).await;
            outcome
        });

        self.load_jobs().await;
        handle
    }

    pub async fn delete_job(&self, job_id: i64) -> Outcome {
        let running = self
            .jobs()
            .await
            .iter()
            .any(|j| j.id == job_id && j.is_running());
        let prompt = if running {
            "This job appears to be stuck. Force delete it?"
        } else {
            "Delete this discovery job?"
        };
        if !self.ctx.confirm("Delete Job", prompt) {
            return Outcome::Cancelled;
        }

        match self.ctx.api.delete_job(job_id).await {
            Ok(()) => {
                self.ctx.success("Job deleted");
                self.load_jobs().await
            }
            Err(e) => self.ctx.fail("Error deleting job", &e),
        }
    }

    /// Asks the backend to enrich the next batch of imported leads.
    pub async fn enrich(&self, batch_size: Option<u32>) -> Outcome<u64> {
        let batch_size = batch_size.unwrap_or(DEFAULT_ENRICH_BATCH);
        match self.ctx.api.enrich_leads(batch_size).await {
            Ok(resp) => {
                let message = resp
                    .message
                    .unwrap_or_else(|| format!("Enriched {} leads", resp.enriched));
                self.ctx.success(&message);
                Outcome::Done(resp.enriched)
            }
            Err(e) => self.ctx.fail("Error enriching leads", &e),
        }
    }

    pub async fn render(&self) -> String {
        render_jobs(&self.jobs().await)
    }
}

async fn reload_jobs(ctx: &ConsoleContext, poller: &DiscoveryPoller) -> Outcome {
    let jobs = match ctx.api.list_jobs().await {
        Ok(jobs) => jobs,
        Err(e) => return ctx.fail("Error loading discovery jobs", &e),
    };

    let running = jobs.iter().find(|j| j.is_running()).map(|j| j.id);
    poller.replace_jobs(jobs).await;

    match running {
        Some(job_id) => {
            if !poller.is_active().await {
                poller.start(job_id).await;
            }
        }
        None => poller.stop().await,
    }
    Outcome::Done(())
}

pub fn render_jobs(jobs: &[DiscoveryJob]) -> String {
    if jobs.is_empty() {
        return "No discovery jobs yet\nCreate your first job to find and analyze leads automatically"
            .to_string();
    }

    let mut lines = Vec::new();
    for job in jobs {
        lines.push(format!("#{} {} [{}]", job.id, job.job_name, job.status));
        lines.push(format!(
            "    {} | {} | {} miles",
            job.source, job.location, job.radius_miles
        ));

        match &job.status {
            DiscoveryJobStatus::Completed => lines.push(format!(
                "    Found: {} | Imported: {} | Duplicates: {}",
                job.total_found, job.total_imported, job.total_duplicates
            )),
            DiscoveryJobStatus::Failed => lines.push(format!(
                "    {}",
                job.error_message.as_deref().unwrap_or("Unknown error")
            )),
            DiscoveryJobStatus::Running => {
                if let Some(progress) = &job.progress {
                    if let Some(message) = progress.message.as_deref() {
                        lines.push(format!("    {}", message));
                    }
                    if let (Some(percent), Some(step), Some(total)) =
                        (progress.percent(), progress.step, progress.total)
                    {
                        lines.push(format!(
                            "    {} {} / {}",
                            progress_bar(percent, 30),
                            step,
                            total
                        ));
                    }
                }
            }
            _ => {}
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{job, FakeApi, Harness};
    use shared_types::JobProgress;

    fn page(harness: &Harness) -> DiscoveryPage {
        DiscoveryPage::new(harness.context(), PollerConfig::default())
    }

    fn form() -> JobForm {
        JobForm {
            job_name: "OKC roofers".to_string(),
            location: "Oklahoma City, OK".to_string(),
            industries: vec!["roofing".to_string()],
            custom_keywords: "storm damage, roofer".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_sends_expanded_keywords() {
        let harness = Harness::new(FakeApi::new(), &[]);
        let page = page(&harness);

        assert!(page.create_job(&form()).await.is_done());
        let sent = harness.api.state.lock().unwrap().created_jobs[0].clone();
        assert_eq!(sent.industries.len(), 5);
        assert_eq!(sent.industries.last().map(String::as_str), Some("storm damage"));
        assert!(harness.notifier.contains(
            NoticeLevel::Success,
            "Discovery job created with 5 search terms!"
        ));
        assert_eq!(page.jobs().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_keyword_limits() {
        let harness = Harness::new(FakeApi::new(), &[]);
        let page = page(&harness);

        let mut empty = form();
        empty.industries.clear();
        empty.custom_keywords = " , ".to_string();
        assert!(matches!(page.create_job(&empty).await, Outcome::Rejected(_)));

        let mut many = form();
        many.industries = ["construction", "roofing", "hvac", "plumbing", "electrical"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(matches!(
            page.create_job(&many).await,
            Outcome::Rejected(ref m) if m.starts_with("You have 22 total keywords")
        ));

        let mut nameless = form();
        nameless.location = "  ".to_string();
        assert!(matches!(page.create_job(&nameless).await, Outcome::Rejected(_)));
        assert_eq!(harness.api.call_count("create_job"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_starts_and_stops_poller() {
        let api = FakeApi::new();
        api.state.lock().unwrap().jobs = vec![
            job(1, "done", DiscoveryJobStatus::Completed),
            job(2, "busy", DiscoveryJobStatus::Running),
        ];
        let harness = Harness::new(api, &[]);
        let page = page(&harness);

        page.load_jobs().await;
        assert_eq!(page.poller().active_job().await, Some(2));

        page.load_jobs().await;
        assert_eq!(page.poller().active_job().await, Some(2));

        harness.api.set_job_status(2, DiscoveryJobStatus::Failed);
        page.load_jobs().await;
        assert!(!page.poller().is_active().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_job_reports_completion() {
        let api = FakeApi::new();
        let mut pending = job(4, "pending", DiscoveryJobStatus::Pending);
        pending.total_imported = 0;
        api.state.lock().unwrap().jobs = vec![pending];
        let harness = Harness::new(api, &[]);
        let page = page(&harness);

        let handle = page.run_job(4).await;
        let finished = handle.await.unwrap().done().unwrap();
        assert_eq!(finished.status, DiscoveryJobStatus::Completed);
        assert!(harness
            .notifier
            .contains(NoticeLevel::Success, "Job completed! Imported 0 leads."));
        assert!(harness.api.call_count("list_jobs") >= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_prompt_depends_on_status() {
        let api = FakeApi::new();
        api.state.lock().unwrap().jobs = vec![
            job(1, "stuck", DiscoveryJobStatus::Running),
            job(2, "old", DiscoveryJobStatus::Completed),
        ];
        let harness = Harness::new(api, &[false, true]);
        let page = page(&harness);
        page.load_jobs().await;

        assert!(matches!(page.delete_job(1).await, Outcome::Cancelled));
        assert!(page.delete_job(2).await.is_done());
        assert_eq!(
            harness.confirm.prompts(),
            vec![
                "This job appears to be stuck. Force delete it?",
                "Delete this discovery job?"
            ]
        );
        page.poller().stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_enrich_defaults_to_ten() {
        let harness = Harness::new(FakeApi::new(), &[]);
        let page = page(&harness);

        assert_eq!(page.enrich(None).await.done(), Some(10));
        assert_eq!(harness.api.state.lock().unwrap().enrich_batches, vec![10]);
    }

    #[test]
    fn test_render_status_details() {
        let mut done = job(1, "Done", DiscoveryJobStatus::Completed);
        done.total_found = 12;
        done.total_imported = 9;
        done.total_duplicates = 3;
        let mut failed = job(2, "Broken", DiscoveryJobStatus::Failed);
        failed.error_message = None;
        let mut running = job(3, "Busy", DiscoveryJobStatus::Running);
        running.progress = Some(JobProgress {
            step: Some(1),
            total: Some(2),
            message: Some("Searching 'dentist'".to_string()),
        });

        let text = render_jobs(&[done, failed, running]);
        assert!(text.contains("Found: 12 | Imported: 9 | Duplicates: 3"));
        assert!(text.contains("Unknown error"));
        assert!(text.contains("Searching 'dentist'"));
        assert!(text.contains("1 / 2"));
    }
}
