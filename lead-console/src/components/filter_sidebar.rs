use shared_types::FilterOptions;

use crate::api::AnalyticsApi;
use crate::pages::ConsoleContext;

/// Job category and status options served by the backend.
pub struct FilterSidebar {
    ctx: ConsoleContext,
    options: Option<FilterOptions>,
}

impl FilterSidebar {
    pub fn new(ctx: ConsoleContext) -> Self {
        Self { ctx, options: None }
    }

    /// Failures leave the sidebar empty and are only logged.
    pub async fn load(&mut self) {
        match self.ctx.api.filter_options().await {
            Ok(options) => self.options = Some(options),
            Err(e) => tracing::error!("Error loading filter options: {}", e),
        }
    }

    pub fn options(&self) -> Option<&FilterOptions> {
        self.options.as_ref()
    }

    pub fn render(&self) -> String {
        let Some(options) = &self.options else {
            return String::new();
        };

        let mut lines = Vec::new();
        for (title, values) in [
            ("Job Category", &options.job_categories),
            ("Status", &options.statuses),
        ] {
            lines.push(title.to_string());
            lines.extend(values.iter().map(|v| format!("  [ ] {}", v)));
            lines.push(String::new());
        }
        lines.join("\n").trim_end().to_string()
    }
}
