use chrono::Local;
use lead_csv::{
    export_contacts, export_file_name, CsvParser, ImportPreview, SkippedRow, SAMPLE_TEMPLATE,
    SAMPLE_TEMPLATE_FILE_NAME,
};
use shared_types::ContactFilters;
use std::path::PathBuf;

use super::{ConsoleContext, Outcome};
use crate::api::ContactsApi;
use crate::helpers::download::save_download;
use crate::helpers::notify::NoticeLevel;

/// Totals from one confirmed import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub created: usize,
    pub failed: usize,
    pub skipped: Vec<SkippedRow>,
}

struct PendingImport {
    content: Vec<u8>,
    preview: ImportPreview,
}

pub struct ImportExportPage {
    ctx: ConsoleContext,
    export_dir: PathBuf,
    delimiter: u8,
    contact_count: Option<usize>,
    pending: Option<PendingImport>,
}

impl ImportExportPage {
    pub fn new(ctx: ConsoleContext, export_dir: PathBuf) -> Self {
        Self {
            ctx,
            export_dir,
            delimiter: b',',
            contact_count: None,
            pending: None,
        }
    }

    pub fn contact_count(&self) -> Option<usize> {
        self.contact_count
    }

    /// Field separator used when the pending file is parsed.
    pub fn set_delimiter(&mut self, delimiter: u8) {
        self.delimiter = delimiter;
    }

    pub fn pending_preview(&self) -> Option<&ImportPreview> {
        self.pending.as_ref().map(|p| &p.preview)
    }

    /// Refreshes the contact count. Failures only hide the number.
    pub async fn load(&mut self) -> Outcome {
        match self.ctx.api.list_contacts(&ContactFilters::default()).await {
            Ok(contacts) => self.contact_count = Some(contacts.len()),
            Err(e) => {
                tracing::error!("Error loading contact count: {}", e);
                self.contact_count = None;
            }
        }
        Outcome::Done(())
    }

    pub async fn export(&self) -> Outcome<PathBuf> {
        self.ctx.notify(NoticeLevel::Info, "Preparing CSV export...");

        let contacts = match self.ctx.api.list_contacts(&ContactFilters::default()).await {
            Ok(contacts) => contacts,
            Err(e) => return self.ctx.fail("Error exporting contacts", &e),
        };
        if contacts.is_empty() {
            return self.ctx.reject("No contacts to export");
        }

        let bytes = match export_contacts(&contacts) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("Export error: {}", e);
                return self.failed("Error exporting contacts");
            }
        };

        let file_name = export_file_name(Local::now().date_naive());
        match save_download(&self.export_dir, &file_name, &bytes).await {
            Ok(path) => {
                self.ctx
                    .success(&format!("Exported {} contacts", contacts.len()));
                Outcome::Done(path)
            }
            Err(e) => {
                tracing::error!("Export error: {}", e);
                self.failed("Error exporting contacts")
            }
        }
    }

    /// Holds `content` for import and returns what the user should review.
    pub fn preview(&mut self, content: Vec<u8>) -> ImportPreview {
        let preview = ImportPreview::from_text(&String::from_utf8_lossy(&content));
        tracing::debug!("Import preview: {} rows", preview.row_count);
        self.pending = Some(PendingImport {
            content,
            preview: preview.clone(),
        });
        preview
    }

    pub fn cancel_import(&mut self) {
        self.pending = None;
    }

    /// Creates one contact per parsed row of the pending file. Row failures
    /// are counted, not fatal.
    pub async fn confirm_import(&mut self) -> Outcome<ImportReport> {
        let pending = match self.pending.take() {
            Some(pending) => pending,
            None => return self.ctx.reject("Select a CSV file to import"),
        };

        let batch = match CsvParser::new()
            .with_delimiter(self.delimiter)
            .parse_contacts(&pending.content) {
            Ok(batch) => batch,
            Err(e) => {
                tracing::error!("Import parse error: {}", e);
                return self.failed(&format!("Error reading CSV: {}", e));
            }
        };

        let mut report = ImportReport {
            skipped: batch.skipped,
            ..Default::default()
        };
        for request in &batch.contacts {
            match self.ctx.api.create_contact(request).await {
                Ok(contact) => {
                    tracing::debug!("Imported contact {} ({})", contact.id, contact.name);
                    report.created += 1;
                }
                Err(e) => {
                    tracing::warn!("Importing {} failed: {}", request.name, e);
                    report.failed += 1;
                }
            }
        }

        let mut message = format!("Imported {} contacts", report.created);
        if report.failed > 0 {
            message.push_str(&format!(" ({} failed)", report.failed));
        }
        if !report.skipped.is_empty() {
            message.push_str(&format!(" ({} skipped)", report.skipped.len()));
        }
        let level = if report.failed > 0 || report.created == 0 {
            NoticeLevel::Warning
        } else {
            NoticeLevel::Success
        };
        self.ctx.notify(level, &message);

        self.load().await;
        Outcome::Done(report)
    }

    pub async fn download_template(&self) -> Outcome<PathBuf> {
        match save_download(
            &self.export_dir,
            SAMPLE_TEMPLATE_FILE_NAME,
            SAMPLE_TEMPLATE.as_bytes(),
        )
        .await
        {
            Ok(path) => {
                self.ctx.success("Template downloaded");
                Outcome::Done(path)
            }
            Err(e) => {
                tracing::error!("Template download error: {}", e);
                self.failed("Error downloading template")
            }
        }
    }

    fn failed<T>(&self, message: &str) -> Outcome<T> {
        self.ctx.notify(NoticeLevel::Danger, message);
        Outcome::Failed(message.to_string())
    }

    pub fn render(&self) -> String {
        let count = self
            .contact_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        let mut lines = vec![
            "Export Contacts".to_string(),
            format!("  Total Contacts: {}", count),
            format!("  Destination: {}", self.export_dir.display()),
            String::new(),
            "Import Contacts".to_string(),
            "  Columns: Name, Company, Email, Phone, Industry".to_string(),
        ];

        if let Some(preview) = self.pending_preview() {
            lines.push("  Preview:".to_string());
            for line in &preview.lines {
                lines.push(format!("    {}", line));
            }
            lines.push(format!("  Import {} Contacts?", preview.row_count));
        }
        lines.join("\n")
    }
}
