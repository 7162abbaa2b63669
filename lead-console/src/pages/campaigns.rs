use shared_types::{
    Campaign, Contact, CreateCampaignRequest, LeadSource, LeadTier, SendCampaignRequest,
    UpdateCampaignRequest,
};
use std::path::PathBuf;

use super::{ConsoleContext, Outcome};
use crate::api::CampaignsApi;
use crate::helpers::download::save_download;
use crate::helpers::notify::NoticeLevel;

/// New campaign as entered. Subject lines are one per line.
#[derive(Debug, Clone, Default)]
pub struct CampaignForm {
    pub name: String,
    pub subject_lines: String,
    pub email_body: String,
    pub daily_limit: Option<u32>,
    pub target_industries: Vec<String>,
    pub target_tiers: Vec<LeadTier>,
}

pub fn preview_file_name(campaign_id: i64) -> String {
    format!("campaign_{}_preview.csv", campaign_id)
}

pub struct CampaignsPage {
    ctx: ConsoleContext,
    default_daily_limit: u32,
    download_dir: PathBuf,
    campaigns: Vec<Campaign>,
}

impl CampaignsPage {
    pub fn new(ctx: ConsoleContext, default_daily_limit: u32, download_dir: PathBuf) -> Self {
        Self {
            ctx,
            default_daily_limit,
            download_dir,
            campaigns: Vec::new(),
        }
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub async fn load(&mut self) -> Outcome {
        match self.ctx.api.list_campaigns().await {
            Ok(campaigns) => {
                self.campaigns = campaigns;
                Outcome::Done(())
            }
            Err(e) => self.ctx.fail("Error loading campaigns", &e),
        }
    }

    pub async fn create(&mut self, form: &CampaignForm) -> Outcome<Option<Campaign>> {
        let subject_lines: Vec<String> = form
            .subject_lines
            .lines()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        let name = form.name.trim();
        let body = form.email_body.trim();
        if name.is_empty() || subject_lines.is_empty() || body.is_empty() {
            return self.ctx.reject("Please fill in all required fields");
        }

        let request = CreateCampaignRequest {
            name: name.to_string(),
            subject_lines,
            email_body: body.to_string(),
            target_industries: form.target_industries.clone(),
            target_tiers: form.target_tiers.clone(),
            target_sources: vec![LeadSource::Google, LeadSource::Yelp],
            daily_limit: form.daily_limit.unwrap_or(self.default_daily_limit),
        };

        match self.ctx.api.create_campaign(&request).await {
            Ok(created) => {
                self.ctx.success("Campaign created!");
                self.load().await;
                Outcome::Done(created)
            }
            Err(e) => self.ctx.fail("Error creating campaign", &e),
        }
    }

    /// Saves the next batch's personalized emails as CSV in the download
    /// directory.
    pub async fn preview(&self, campaign_id: i64) -> Outcome<PathBuf> {
        let bytes = match self.ctx.api.preview_campaign(campaign_id).await {
            Ok(bytes) => bytes,
            Err(e) => return self.ctx.fail("Error downloading preview", &e),
        };

        match save_download(&self.download_dir, &preview_file_name(campaign_id), &bytes).await {
            Ok(path) => {
                self.ctx.success("Preview CSV downloaded");
                Outcome::Done(path)
            }
            Err(e) => {
                tracing::error!("Saving campaign {} preview failed: {}", campaign_id, e);
                let message = "Error downloading preview";
                self.ctx.notify(NoticeLevel::Danger, message);
                Outcome::Failed(message.to_string())
            }
        }
    }

    pub async fn send(&mut self, campaign_id: i64) -> Outcome<u64> {
        if !self.ctx.confirm(
            "Send Campaign",
            "This will send emails to the next batch of recipients. Continue?",
        ) {
            return Outcome::Cancelled;
        }

        let request = SendCampaignRequest {
            batch_size: None,
            preview_mode: false,
        };
        match self.ctx.api.send_campaign(campaign_id, &request).await {
            Ok(sent) => {
                tracing::info!("Campaign {} sent {} emails", campaign_id, sent);
                self.ctx.success(&format!("Sent {} emails", sent));
                self.load().await;
                Outcome::Done(sent)
            }
            Err(e) => self.ctx.fail("Error sending campaign", &e),
        }
    }

    pub async fn set_active(&mut self, campaign_id: i64, active: bool) -> Outcome {
        let request = UpdateCampaignRequest {
            is_active: Some(active),
            ..Default::default()
        };
        match self.ctx.api.update_campaign(campaign_id, &request).await {
            Ok(_) => {
                self.ctx.success(if active {
                    "Campaign activated"
                } else {
                    "Campaign paused"
                });
                self.load().await
            }
            Err(e) => self.ctx.fail("Error updating campaign", &e),
        }
    }

    pub async fn delete(&mut self, campaign_id: i64) -> Outcome {
        if !self
            .ctx
            .confirm("Delete Campaign", "Are you sure you want to delete this campaign?")
        {
            return Outcome::Cancelled;
        }
        match self.ctx.api.delete_campaign(campaign_id).await {
            Ok(()) => {
                self.ctx.success("Campaign deleted");
                self.load().await
            }
            Err(e) => self.ctx.fail("Error deleting campaign", &e),
        }
    }

    pub async fn recipients(&self, campaign_id: i64) -> Outcome<Vec<Contact>> {
        match self.ctx.api.campaign_recipients(campaign_id).await {
            Ok(recipients) => Outcome::Done(recipients),
            Err(e) => self.ctx.fail("Error loading recipients", &e),
        }
    }

    pub fn render(&self) -> String {
        if self.campaigns.is_empty() {
            return "No campaigns yet\nCreate your first email campaign".to_string();
        }

        let mut lines = vec![format!(
            "{:<6} {:<30} {:>8} {:>8} {:>11}  {}",
            "ID", "Name", "Sent", "Replied", "Daily Limit", "Status"
        )];
        for campaign in &self.campaigns {
            lines.push(format!(
                "{:<6} {:<30} {:>8} {:>8} {:>11}  {}",
                campaign.id,
                campaign.name,
                campaign.total_sent,
                campaign.total_replied,
                campaign.daily_limit,
                if campaign.is_active { "Active" } else { "Inactive" }
            ));
        }
        lines.join("\n")
    }
}
