use std::fmt;

use super::analytics::AnalyticsPage;
use super::campaigns::CampaignsPage;
use super::contacts::ContactsPage;
use super::discovery::DiscoveryPage;
use super::import_export::ImportExportPage;
use super::pipeline::PipelineBoard;
use super::templates::TemplatesPage;
use super::{ConsoleContext, Outcome};
use crate::config::ConsoleConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Page {
    Contacts,
    Pipeline,
    Campaigns,
    LeadDiscovery,
    Templates,
    Analytics,
    ImportExport,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Contacts,
        Page::Pipeline,
        Page::Campaigns,
        Page::LeadDiscovery,
        Page::Templates,
        Page::Analytics,
        Page::ImportExport,
    ];
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Page::Contacts => "Contacts",
            Page::Pipeline => "Pipeline",
            Page::Campaigns => "Campaigns",
            Page::LeadDiscovery => "Lead Discovery",
            Page::Templates => "Templates",
            Page::Analytics => "Analytics",
            Page::ImportExport => "Import / Export",
        };
        write!(f, "{}", name)
    }
}

/// Holds every page; exactly one is active at a time.
pub struct Dashboard {
    active: Page,
    pub contacts: ContactsPage,
    pub pipeline: PipelineBoard,
    pub campaigns: CampaignsPage,
    pub discovery: DiscoveryPage,
    pub templates: TemplatesPage,
    pub analytics: AnalyticsPage,
    pub import_export: ImportExportPage,
}

impl Dashboard {
    pub fn new(ctx: ConsoleContext, config: &ConsoleConfig) -> Self {
        let export_dir = config.export.directory();
        Self {
            active: Page::Contacts,
            contacts: ContactsPage::new(ctx.clone(), config.email.clone()),
            pipeline: PipelineBoard::new(ctx.clone()),
            campaigns: CampaignsPage::new(
                ctx.clone(),
                config.campaigns.default_daily_limit,
                export_dir.clone(),
            ),
            discovery: DiscoveryPage::new(ctx.clone(), config.polling.poller_config()),
            templates: TemplatesPage::new(ctx.clone()),
            analytics: AnalyticsPage::new(ctx.clone()),
            import_export: ImportExportPage::new(ctx, export_dir),
        }
    }

    pub fn active(&self) -> Page {
        self.active
    }

    /// Switches to `page` and loads its content.
    pub async fn activate(&mut self, page: Page) -> Outcome {
        tracing::debug!("Activating {} page", page);
        self.active = page;
        match page {
            Page::Contacts => self.contacts.load().await,
            Page::Pipeline => self.pipeline.load().await,
            Page::Campaigns => self.campaigns.load().await,
            Page::LeadDiscovery => self.discovery.load_jobs().await,
            Page::Templates => self.templates.load().await,
            Page::Analytics => self.analytics.load().await,
            Page::ImportExport => self.import_export.load().await,
        }
    }

    pub fn render_nav(&self) -> String {
        Page::ALL
            .iter()
            .map(|page| {
                if *page == self.active {
                    format!("[{}]", page)
                } else {
                    format!(" {} ", page)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub async fn render(&self) -> String {
        let body = match self.active {
            Page::Contacts => self.contacts.render(),
            Page::Pipeline => self.pipeline.render(),
            Page::Campaigns => self.campaigns.render(),
            Page::LeadDiscovery => self.discovery.render().await,
            Page::Templates => self.templates.render(),
            Page::Analytics => self.analytics.render(),
            Page::ImportExport => self.import_export.render(),
        };
        format!("{}\n\n{}", self.render_nav(), body)
    }
}
