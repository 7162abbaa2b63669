use shared_types::{DashboardStats, PerformanceRow};

use super::{ConsoleContext, Outcome};
use crate::api::{AnalyticsApi, ApiError};

const TIERS: [&str; 3] = ["High", "Medium", "Low"];

pub struct AnalyticsPage {
    ctx: ConsoleContext,
    stats: Option<DashboardStats>,
    industry_performance: Option<Vec<PerformanceRow>>,
    source_performance: Option<Vec<PerformanceRow>>,
}

impl AnalyticsPage {
    pub fn new(ctx: ConsoleContext) -> Self {
        Self {
            ctx,
            stats: None,
            industry_performance: None,
            source_performance: None,
        }
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    /// Fetches the three reports together. A failed report keeps its last
    /// value so the others still render.
    pub async fn load(&mut self) -> Outcome {
        let api = &self.ctx.api;
        let (stats, industry, source) = futures::future::join3(
            api.dashboard_stats(),
            api.industry_performance(),
            api.source_performance(),
        )
        .await;

        let mut first_error: Option<ApiError> = None;
        match stats {
            Ok(stats) => self.stats = Some(stats),
            Err(e) => {
                tracing::warn!("Dashboard stats failed: {}", e);
                first_error.get_or_insert(e);
            }
        }
        match industry {
            Ok(rows) => self.industry_performance = Some(rows),
            Err(e) => {
                tracing::warn!("Industry performance failed: {}", e);
                first_error.get_or_insert(e);
            }
        }
        match source {
            Ok(rows) => self.source_performance = Some(rows),
            Err(e) => {
                tracing::warn!("Source performance failed: {}", e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => self.ctx.fail("Error loading analytics", &e),
            None => Outcome::Done(()),
        }
    }

    pub fn render(&self) -> String {
        let stats = self.stats.clone().unwrap_or_default();
        let mut lines = vec!["Lead Generation Analytics".to_string(), String::new()];

        lines.push(format!(
            "Total Leads: {}  ({} with email, {}%)",
            stats.total_contacts, stats.with_email, stats.email_percentage
        ));
        lines.push(format!(
            "Reply Rate: {}%  ({} replied)",
            stats.reply_rate, stats.total_replied
        ));
        lines.push(format!(
            "Conversion Rate: {}%  ({} converted)",
            stats.conversion_rate, stats.total_converted
        ));
        lines.push(format!(
            "High AI Opportunity: {}",
            stats.high_ai_opportunity
        ));

        lines.push(String::new());
        lines.push("Leads by Tier".to_string());
        lines.extend(self.render_tier_breakdown());

        lines.push(String::new());
        lines.push("Leads by Source".to_string());
        lines.extend(self.render_source_breakdown());

        lines.push(String::new());
        lines.push("Industry Performance".to_string());
        lines.extend(self.render_industry_performance());

        lines.push(String::new());
        lines.push("Source Performance".to_string());
        lines.extend(self.render_source_performance());

        lines.push(String::new());
        lines.push("Campaign Activity".to_string());
        lines.push(format!("  Active Campaigns: {}", stats.active_campaigns));
        lines.push(format!("  Total Emails Sent: {}", stats.total_campaign_sends));

        lines.join("\n")
    }

    fn render_tier_breakdown(&self) -> Vec<String> {
        match &self.stats {
            Some(stats) if !stats.tier_breakdown.is_empty() => TIERS
                .iter()
                .map(|tier| {
                    let count = stats.tier_breakdown.get(*tier).copied().unwrap_or(0);
                    format!("  {:<8} {}", tier, count)
                })
                .collect(),
            _ => vec!["  No data".to_string()],
        }
    }

    fn render_source_breakdown(&self) -> Vec<String> {
        match &self.stats {
            Some(stats) if !stats.source_breakdown.is_empty() => stats
                .source_breakdown
                .iter()
                .map(|(source, count)| format!("  {:<8} {}", source, count))
                .collect(),
            _ => vec!["  No data".to_string()],
        }
    }

    fn render_industry_performance(&self) -> Vec<String> {
        let rows = match self.industry_performance.as_deref() {
            Some(rows) if !rows.is_empty() => rows,
            _ => {
                return vec![
                    "  No industry data yet. Start contacting leads to see performance."
                        .to_string(),
                ]
            }
        };

        let mut lines = vec![format!(
            "  {:<28} {:>6} {:>10} {:>8} {:>11}",
            "Industry", "Total", "Contacted", "Reply %", "Convert %"
        )];
        for row in rows {
            lines.push(format!(
                "  {:<28} {:>6} {:>10} {:>8} {:>11}",
                row.label, row.total, row.contacted, row.reply_rate, row.conversion_rate
            ));
        }
        lines
    }

    fn render_source_performance(&self) -> Vec<String> {
        let rows = match self.source_performance.as_deref() {
            Some(rows) if !rows.is_empty() => rows,
            _ => return vec!["  No source comparison data yet.".to_string()],
        };

        let mut lines = vec![format!(
            "  {:<10} {:>6} {:>8} {:>8} {:>12}",
            "Source", "Total", "Email %", "Reply %", "Avg Health"
        )];
        for row in rows {
            let health = row
                .avg_health_score
                .map(|score| format!("{:.1}", score))
                .unwrap_or_else(|| "N/A".to_string());
            lines.push(format!(
                "  {:<10} {:>6} {:>8} {:>8} {:>12}",
                row.label, row.total, row.email_rate, row.reply_rate, health
            ));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::notify::NoticeLevel;
    use crate::testing::{FakeApi, Harness};

    fn row(label: &str, total: u64) -> PerformanceRow {
        PerformanceRow {
            label: label.to_string(),
            total,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_renders_all_sections() {
        let api = FakeApi::new();
        {
            let mut state = api.state.lock().unwrap();
            state.stats.total_contacts = 40;
            state.stats.tier_breakdown.insert("High".to_string(), 5);
            state.stats.source_breakdown.insert("yelp".to_string(), 12);
            state.industry_rows = vec![row("dental", 10)];
            state.source_rows = vec![PerformanceRow {
                avg_health_score: Some(72.5),
                ..row("google", 28)
            }];
        }
        let harness = Harness::new(api, &[]);
        let mut page = AnalyticsPage::new(harness.context());

        assert!(page.load().await.is_done());
        let text = page.render();
        assert!(text.contains("Total Leads: 40"));
        assert!(text.contains("  High     5"));
        assert!(text.contains("  Medium   0"));
        assert!(text.contains("  yelp     12"));
        assert!(text.contains("dental"));
        assert!(text.contains("72.5"));
    }

    #[tokio::test]
    async fn test_one_failure_keeps_other_parts() {
        let api = FakeApi::new();
        api.state.lock().unwrap().industry_rows = vec![row("roofing", 3)];
        api.fail("dashboard_stats");
        let harness = Harness::new(api, &[]);
        let mut page = AnalyticsPage::new(harness.context());

        assert!(page.load().await.is_failed());
        assert!(harness
            .notifier
            .contains(NoticeLevel::Danger, "dashboard_stats failed"));
        assert!(page.stats().is_none());

        let text = page.render();
        assert!(text.contains("roofing"));
        assert!(text.contains("No source comparison data yet."));
        assert!(text.contains("Leads by Tier\n  No data"));
    }
}
