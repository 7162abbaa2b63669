//! `leadctl` subcommands
//!
//! Every command drives the same page controllers the dashboard uses, so
//! validation, confirmations and notifications behave identically:
//! - Contacts (list, show, add, update, delete, bulk actions, notes, email)
//! - Pipeline, campaigns, discovery jobs and templates
//! - Analytics, filter options, CSV import and export

use anyhow::Context;
use clap::Subcommand;
use shared_types::{ContactFilters, ContactStatus, EmailSendResults, LeadSource, LeadTier};
use std::path::PathBuf;

use crate::api::AnalyticsApi;
use crate::components::{ContactForm, FilterSidebar};
use crate::pages::campaigns::CampaignForm;
use crate::pages::contacts::QuickFilter;
use crate::pages::dashboard::{Dashboard, Page};
use crate::pages::discovery::{render_jobs, DiscoveryPage, JobForm};
use crate::pages::templates::TemplateForm;
use crate::pages::{ConsoleContext, Outcome};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the backend is reachable
    Status,
    /// Manage contacts
    #[command(subcommand)]
    Contacts(ContactCommands),
    /// Contacts grouped by status
    #[command(subcommand)]
    Pipeline(PipelineCommands),
    /// Email campaigns
    #[command(subcommand)]
    Campaigns(CampaignCommands),
    /// Lead discovery jobs
    #[command(subcommand)]
    Discovery(DiscoveryCommands),
    /// Email templates
    #[command(subcommand)]
    Templates(TemplateCommands),
    /// Lead generation analytics
    Analytics,
    /// Available job categories and statuses
    Filters,
    /// Export all contacts to CSV
    Export,
    /// Import contacts from a CSV file
    Import {
        /// CSV file to import
        file: PathBuf,
        /// Show the preview without importing
        #[arg(long)]
        preview_only: bool,
        /// Field separator
        #[arg(long, default_value_t = ',')]
        delimiter: char,
    },
    /// Save a sample import CSV
    SampleCsv,
}

impl Command {
    pub async fn execute(&self, ctx: &ConsoleContext, dashboard: &mut Dashboard) -> anyhow::Result<Outcome> {
        match self {
            Command::Status => {
                let health = ctx.api.health().await;
                match health {
                    Ok(health) => {
                        println!("Backend: {}", health.status);
                        Ok(Outcome::Done(()))
                    }
                    Err(e) => Ok(ctx.fail("Backend unreachable", &e)),
                }
            }
            Command::Contacts(cmd) => cmd.execute(dashboard).await,
            Command::Pipeline(cmd) => cmd.execute(dashboard).await,
            Command::Campaigns(cmd) => cmd.execute(dashboard).await,
            Command::Discovery(cmd) => cmd.execute(&dashboard.discovery).await,
            Command::Templates(cmd) => cmd.execute(dashboard).await,
            Command::Analytics => {
                let outcome = dashboard.activate(Page::Analytics).await;
                println!("{}", dashboard.analytics.render());
                Ok(outcome)
            }
            Command::Filters => {
                let mut sidebar = FilterSidebar::new(ctx.clone());
                sidebar.load().await;
                println!("{}", sidebar.render());
                Ok(Outcome::Done(()))
            }
            Command::Export => {
                let outcome = dashboard.import_export.export().await;
                if let Outcome::Done(path) = &outcome {
                    println!("{}", path.display());
                }
                Ok(outcome.map(|_| ()))
            }
            Command::Import {
                file,
                preview_only,
                delimiter,
            } => {
                if !delimiter.is_ascii() {
                    anyhow::bail!("Delimiter must be a single ASCII character");
                }
                let content = tokio::fs::read(file)
                    .await
                    .with_context(|| format!("Failed to read {}", file.display()))?;
                let page = &mut dashboard.import_export;
                page.set_delimiter(*delimiter as u8);
                let preview = page.preview(content);
                for line in &preview.lines {
                    println!("{}", line);
                }
                println!("{} rows", preview.row_count);
                if *preview_only {
                    page.cancel_import();
                    return Ok(Outcome::Done(()));
                }

                let prompt = format!("Import {} contacts?", preview.row_count);
                if !ctx.confirm("Import Contacts", &prompt) {
                    page.cancel_import();
                    return Ok(Outcome::Cancelled);
                }
                let outcome = page.confirm_import().await;
                if let Outcome::Done(report) = &outcome {
                    for row in &report.skipped {
                        println!("Skipped line {}: {}", row.line, row.reason);
                    }
                }
                Ok(outcome.map(|_| ()))
            }
            Command::SampleCsv => {
                let outcome = dashboard.import_export.download_template().await;
                if let Outcome::Done(path) = &outcome {
                    println!("{}", path.display());
                }
                Ok(outcome.map(|_| ()))
            }
        }
    }
}

fn parse_ids(ids: &[i64]) -> Vec<i64> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

// =============================================================================
// Contacts
// =============================================================================

#[derive(clap::Args, Debug, Default)]
pub struct ContactFilterArgs {
    /// Match name or company
    #[arg(short, long)]
    search: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    tier: Option<String>,
    #[arg(long)]
    industry: Option<String>,
    /// Preset that replaces the other filters
    #[arg(short, long, value_enum)]
    quick: Option<QuickFilter>,
}

impl ContactFilterArgs {
    fn filters(&self) -> ContactFilters {
        if let Some(quick) = self.quick {
            return quick.filters();
        }
        ContactFilters {
            search: self.search.clone(),
            status: self.status.as_deref().map(ContactStatus::parse),
            tier: self.tier.as_deref().map(LeadTier::parse),
            industry: self.industry.clone(),
            ..Default::default()
        }
    }
}

#[derive(clap::Args, Debug, Default)]
pub struct ContactFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    industry: Option<String>,
    /// High, Medium or Low
    #[arg(long)]
    tier: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    website: Option<String>,
}

impl ContactFields {
    fn apply(&self, form: &mut ContactForm) {
        let set = |field: &mut String, value: &Option<String>| {
            if let Some(value) = value {
                *field = value.clone();
            }
        };
        set(&mut form.name, &self.name);
        set(&mut form.company, &self.company);
        set(&mut form.email, &self.email);
        set(&mut form.phone, &self.phone);
        set(&mut form.industry, &self.industry);
        set(&mut form.city, &self.city);
        set(&mut form.state, &self.state);
        set(&mut form.website_url, &self.website);
        if let Some(tier) = &self.tier {
            form.tier = LeadTier::parse(tier);
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ContactCommands {
    /// List contacts
    List {
        #[command(flatten)]
        filters: ContactFilterArgs,
    },
    /// Show one contact with notes and outreach history
    Show { id: i64 },
    /// Add a contact by hand
    Add {
        #[command(flatten)]
        fields: ContactFields,
    },
    /// Edit a contact
    Update {
        id: i64,
        #[command(flatten)]
        fields: ContactFields,
    },
    /// Delete one contact
    Delete { id: i64 },
    /// Delete several contacts
    BulkDelete {
        /// Contact IDs, comma separated
        #[arg(value_delimiter = ',')]
        ids: Vec<i64>,
        /// Select every contact matching the filters instead
        #[arg(long)]
        all: bool,
        #[command(flatten)]
        filters: ContactFilterArgs,
    },
    /// Delete every contact in the database
    DeleteAll,
    /// Add a note to a contact
    Note { id: i64, content: String },
    /// Email selected contacts
    Email {
        /// Contact IDs, comma separated
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<i64>,
        #[arg(short, long)]
        subject: String,
        /// Message text; blank lines separate paragraphs
        #[arg(short, long, conflicts_with = "body_file")]
        body: Option<String>,
        /// Read the message from a file
        #[arg(long)]
        body_file: Option<PathBuf>,
    },
    /// Record a call, meeting or other manual outreach
    LogTouch {
        id: i64,
        /// Outreach type, Call by default
        #[arg(short = 't', long = "type")]
        touch_type: Option<String>,
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// Print a contact's tel: link
    Call { id: i64 },
}

impl ContactCommands {
    pub async fn execute(&self, dashboard: &mut Dashboard) -> anyhow::Result<Outcome> {
        let page = &mut dashboard.contacts;
        let outcome = match self {
            ContactCommands::List { filters } => {
                page.set_filters(filters.filters());
                let outcome = page.load().await;
                println!("{}", page.render());
                outcome
            }
            ContactCommands::Show { id } => {
                let outcome = page.open_contact(*id).await;
                if outcome.is_done() {
                    println!("{}", page.card.render());
                }
                outcome
            }
            ContactCommands::Add { fields } => {
                let mut form = page.form.show(None);
                fields.apply(&mut form);
                page.form.check_duplicate(&form.email).await;
                let outcome = page.form.submit(&form).await;
                if let Outcome::Done(contact) = &outcome {
                    println!("Created contact #{}", contact.id);
                }
                outcome.map(|_| ())
            }
            ContactCommands::Update { id, fields } => {
                let loaded = page.card.show(*id).await;
                if !loaded.is_done() {
                    return Ok(loaded);
                }
                let existing = page.card.contact().cloned();
                let mut form = page.form.show(existing);
                fields.apply(&mut form);
                if fields.email.is_some() {
                    page.form.check_duplicate(&form.email).await;
                }
                page.form.submit(&form).await.map(|_| ())
            }
            ContactCommands::Delete { id } => page.delete_contact(*id).await,
            ContactCommands::BulkDelete { ids, all, filters } => {
                page.set_filters(filters.filters());
                let loaded = page.load().await;
                if !loaded.is_done() {
                    return Ok(loaded);
                }
                page.toggle_select_mode();
                if *all {
                    page.select_all(true);
                } else {
                    let visible: Vec<i64> = page.contacts().iter().map(|c| c.id).collect();
                    for id in parse_ids(ids) {
                        if visible.contains(&id) {
                            page.toggle_contact(id);
                        } else {
                            tracing::warn!("Contact {} is not in the current list", id);
                        }
                    }
                }
                page.bulk_delete().await.map(|_| ())
            }
            ContactCommands::DeleteAll => page.delete_all().await.map(|_| ()),
            ContactCommands::Note { id, content } => {
                let loaded = page.card.show(*id).await;
                if !loaded.is_done() {
                    return Ok(loaded);
                }
                page.card.save_note(content).await
            }
            ContactCommands::Email {
                ids,
                subject,
                body,
                body_file,
            } => {
                let body = match (body, body_file) {
                    (Some(body), _) => body.clone(),
                    (None, Some(path)) => tokio::fs::read_to_string(path)
                        .await
                        .with_context(|| format!("Failed to read {}", path.display()))?,
                    (None, None) => String::new(),
                };

                let loaded = page.load().await;
                if !loaded.is_done() {
                    return Ok(loaded);
                }
                page.toggle_select_mode();
                for id in parse_ids(ids) {
                    page.toggle_contact(id);
                }
                let opened = page.bulk_email().map(|_| ());
                if !opened.is_done() {
                    return Ok(opened);
                }
                println!("To: {}", page.composer.recipients_label());
                let outcome = page.composer.send(subject, &body).await;
                if let Outcome::Done(EmailSendResults::PerContact(rows)) = &outcome {
                    for row in rows.iter().filter(|r| !r.success) {
                        println!(
                            "Failed #{} {}: {}",
                            row.contact_id,
                            row.contact_name.as_deref().unwrap_or(""),
                            row.error.as_deref().unwrap_or("unknown error")
                        );
                    }
                }
                outcome.map(|_| ())
            }
            ContactCommands::LogTouch {
                id,
                touch_type,
                notes,
            } => page
                .composer
                .log_touch(*id, touch_type.as_deref(), notes)
                .await
                .map(|_| ()),
            ContactCommands::Call { id } => {
                let loaded = page.card.show(*id).await;
                if !loaded.is_done() {
                    return Ok(loaded);
                }
                let outcome = page.call_contact(*id);
                if let Outcome::Done(uri) = &outcome {
                    println!("{}", uri);
                }
                outcome.map(|_| ())
            }
        };
        Ok(outcome)
    }
}

// =============================================================================
// Pipeline
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum PipelineCommands {
    /// Show the board
    Show,
    /// Move a contact to another status column
    Move {
        id: i64,
        /// Lead, Contacted, Replied, Qualified, "Not Interested" or Converted
        status: String,
    },
}

impl PipelineCommands {
    pub async fn execute(&self, dashboard: &mut Dashboard) -> anyhow::Result<Outcome> {
        let board = &mut dashboard.pipeline;
        let outcome = match self {
            PipelineCommands::Show => board.load().await,
            PipelineCommands::Move { id, status } => {
                board.move_contact(*id, ContactStatus::parse(status)).await
            }
        };
        if outcome.is_done() {
            println!("{}", board.render());
        }
        Ok(outcome)
    }
}

// =============================================================================
// Campaigns
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum CampaignCommands {
    /// List campaigns
    List,
    /// Create a campaign
    Create {
        #[arg(short, long)]
        name: String,
        /// Subject line; repeat for A/B variants
        #[arg(short, long = "subject", required = true)]
        subjects: Vec<String>,
        /// Email body with {{name}} style placeholders
        #[arg(short, long)]
        body: String,
        #[arg(long)]
        daily_limit: Option<u32>,
        /// Target industry; repeatable
        #[arg(long = "industry")]
        industries: Vec<String>,
        /// Target tier; repeatable
        #[arg(long = "tier")]
        tiers: Vec<String>,
    },
    /// Save the next batch's emails as CSV
    Preview { id: i64 },
    /// Send the next batch
    Send { id: i64 },
    Activate { id: i64 },
    Deactivate { id: i64 },
    Delete { id: i64 },
    /// List the contacts the next batch would go to
    Recipients { id: i64 },
}

impl CampaignCommands {
    pub async fn execute(&self, dashboard: &mut Dashboard) -> anyhow::Result<Outcome> {
        let page = &mut dashboard.campaigns;
        let outcome = match self {
            CampaignCommands::List => {
                let outcome = page.load().await;
                println!("{}", page.render());
                outcome
            }
            CampaignCommands::Create {
                name,
                subjects,
                body,
                daily_limit,
                industries,
                tiers,
            } => {
                let form = CampaignForm {
                    name: name.clone(),
                    subject_lines: subjects.join("\n"),
                    email_body: body.clone(),
                    daily_limit: *daily_limit,
                    target_industries: industries.clone(),
                    target_tiers: tiers.iter().map(|t| LeadTier::parse(t)).collect(),
                };
                let outcome = page.create(&form).await;
                if let Outcome::Done(Some(campaign)) = &outcome {
                    println!("Created campaign #{}", campaign.id);
                }
                outcome.map(|_| ())
            }
            CampaignCommands::Preview { id } => {
                let outcome = page.preview(*id).await;
                if let Outcome::Done(path) = &outcome {
                    println!("{}", path.display());
                }
                outcome.map(|_| ())
            }
            CampaignCommands::Send { id } => page.send(*id).await.map(|_| ()),
            CampaignCommands::Activate { id } => page.set_active(*id, true).await,
            CampaignCommands::Deactivate { id } => page.set_active(*id, false).await,
            CampaignCommands::Delete { id } => page.delete(*id).await,
            CampaignCommands::Recipients { id } => {
                let outcome = page.recipients(*id).await;
                if let Outcome::Done(recipients) = &outcome {
                    if recipients.is_empty() {
                        println!("No pending recipients");
                    }
                    for contact in recipients {
                        println!(
                            "#{} {} <{}>",
                            contact.id,
                            contact.name,
                            contact.email.as_deref().unwrap_or("-")
                        );
                    }
                }
                outcome.map(|_| ())
            }
        };
        Ok(outcome)
    }
}

// =============================================================================
// Discovery
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum DiscoveryCommands {
    /// List discovery jobs
    List,
    /// Create a discovery job
    Create {
        #[arg(short, long)]
        name: String,
        /// google or yelp
        #[arg(long, default_value = "google")]
        source: String,
        /// City, state or ZIP
        #[arg(short, long)]
        location: String,
        #[arg(short, long, default_value_t = 25)]
        radius: u32,
        /// Industry from the keyword table; repeatable
        #[arg(short, long = "industry")]
        industries: Vec<String>,
        /// Extra search terms, comma separated
        #[arg(short, long, default_value = "")]
        keywords: String,
    },
    /// Run a job and wait for it to finish
    Run {
        id: i64,
        /// Print progress while the job runs
        #[arg(short, long)]
        watch: bool,
    },
    /// Follow the running job until it finishes
    Watch,
    Delete { id: i64 },
    /// Enrich the next batch of imported leads
    Enrich {
        #[arg(short, long)]
        batch_size: Option<u32>,
    },
    /// Industries available for keyword expansion
    Industries,
}

impl DiscoveryCommands {
    pub async fn execute(&self, page: &DiscoveryPage) -> anyhow::Result<Outcome> {
        let outcome = match self {
            DiscoveryCommands::List => {
                let outcome = page.load_jobs().await;
                println!("{}", page.render().await);
                outcome
            }
            DiscoveryCommands::Create {
                name,
                source,
                location,
                radius,
                industries,
                keywords,
            } => {
                let form = JobForm {
                    job_name: name.clone(),
                    source: LeadSource::parse(source),
                    location: location.clone(),
                    radius_miles: *radius,
                    industries: industries.clone(),
                    custom_keywords: keywords.clone(),
                };
                let outcome = page.create_job(&form).await;
                if let Outcome::Done(job) = &outcome {
                    println!("Created job #{} with {} keywords", job.id, job.industries.len());
                }
                outcome.map(|_| ())
            }
            DiscoveryCommands::Run { id, watch } => {
                let handle = page.run_job(*id).await;
                if *watch {
                    watch_jobs(page).await;
                }
                match handle.await {
                    Ok(outcome) => {
                        if let Outcome::Done(job) = &outcome {
                            println!("{}", render_jobs(std::slice::from_ref(job)));
                        }
                        outcome.map(|_| ())
                    }
                    Err(e) => {
                        tracing::error!("Discovery run task failed: {}", e);
                        Outcome::Failed(e.to_string())
                    }
                }
            }
            DiscoveryCommands::Watch => {
                let outcome = page.load_jobs().await;
                if outcome.is_done() {
                    if page.poller().is_active().await {
                        watch_jobs(page).await;
                    } else {
                        println!("No job is running");
                    }
                }
                outcome
            }
            DiscoveryCommands::Delete { id } => {
                let loaded = page.load_jobs().await;
                if !loaded.is_done() {
                    return Ok(loaded);
                }
                page.delete_job(*id).await
            }
            DiscoveryCommands::Enrich { batch_size } => page.enrich(*batch_size).await.map(|_| ()),
            DiscoveryCommands::Industries => {
                for industry in crate::helpers::keywords::industries() {
                    println!("{}", industry);
                }
                Outcome::Done(())
            }
        };
        Ok(outcome)
    }
}

/// Prints the job list after every poll until the poller stops.
async fn watch_jobs(page: &DiscoveryPage) {
    let poller = page.poller();
    let mut updates = poller.subscribe();
    loop {
        if !poller.is_active().await {
            break;
        }
        if updates.changed().await.is_err() {
            break;
        }
        println!("{}\n", page.render().await);
    }
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum TemplateCommands {
    /// List templates
    List,
    /// Create a custom template
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        subject: String,
        #[arg(short, long)]
        body: String,
    },
    /// Edit a custom template
    Edit {
        id: i64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        subject: Option<String>,
        #[arg(short, long)]
        body: Option<String>,
    },
    Delete { id: i64 },
}

impl TemplateCommands {
    pub async fn execute(&self, dashboard: &mut Dashboard) -> anyhow::Result<Outcome> {
        let page = &mut dashboard.templates;
        let outcome = match self {
            TemplateCommands::List => {
                let outcome = page.load().await;
                println!("{}", page.render());
                outcome
            }
            TemplateCommands::Create { name, subject, body } => {
                let form = TemplateForm {
                    name: name.clone(),
                    subject_line: subject.clone(),
                    body: body.clone(),
                };
                page.save(None, &form).await
            }
            TemplateCommands::Edit {
                id,
                name,
                subject,
                body,
            } => {
                let loaded = page.load().await;
                if !loaded.is_done() {
                    return Ok(loaded);
                }
                let mut form = match page.edit_form(*id) {
                    Outcome::Done(form) => form,
                    other => return Ok(other.map(|_| ())),
                };
                if let Some(name) = name {
                    form.name = name.clone();
                }
                if let Some(subject) = subject {
                    form.subject_line = subject.clone();
                }
                if let Some(body) = body {
                    form.body = body.clone();
                }
                page.save(Some(*id), &form).await
            }
            TemplateCommands::Delete { id } => {
                let loaded = page.load().await;
                if !loaded.is_done() {
                    return Ok(loaded);
                }
                page.delete(*id).await
            }
        };
        Ok(outcome)
    }
}
