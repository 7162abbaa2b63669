use serde::{Deserialize, Serialize};
use shared_types::{Contact, EmailSendResults, LogTouchRequest, SendEmailRequest};

use crate::api::EmailApi;
use crate::helpers::notify::NoticeLevel;
use crate::pages::{ConsoleContext, Outcome};

pub const DEFAULT_TOUCH_TYPE: &str = "Call";

/// Footer appended to every HTML email body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub email: String,
}

/// Plain text to the HTML sent alongside it: blank lines separate
/// paragraphs, single newlines become `<br>`, signature last.
pub fn format_email_body(text: &str, signature: &Signature) -> String {
    let paragraphs: String = text
        .split("\n\n")
        .map(|para| {
            format!(
                "<p style=\"margin: 0 0 16px 0;\">{}</p>",
                para.replace('\n', "<br>")
            )
        })
        .collect();

    let mut footer = Vec::new();
    if !signature.name.is_empty() {
        footer.push(format!("<strong>{}</strong>", signature.name));
    }
    if !signature.tagline.is_empty() {
        footer.push(signature.tagline.clone());
    }
    if !signature.email.is_empty() {
        footer.push(format!(
            "<a href=\"mailto:{0}\" style=\"color: #6366f1;\">{0}</a>",
            signature.email
        ));
    }

    let signature_block = if footer.is_empty() {
        String::new()
    } else {
        format!(
            "<br><div style=\"margin-top: 24px; padding-top: 16px; border-top: 1px solid #eee; font-size: 12px; color: #666;\">{}</div>",
            footer.join("<br>")
        )
    };

    format!(
        "<div style=\"font-family: Arial, sans-serif; font-size: 14px; line-height: 1.6; color: #333;\">{}{}</div>",
        paragraphs, signature_block
    )
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

pub struct EmailComposer {
    ctx: ConsoleContext,
    signature: Signature,
    contact_ids: Vec<i64>,
}

impl EmailComposer {
    pub fn new(ctx: ConsoleContext, signature: Signature) -> Self {
        Self {
            ctx,
            signature,
            contact_ids: Vec::new(),
        }
    }

    /// Opens the composer for the given recipients.
    pub fn show(&mut self, contact_ids: Vec<i64>) {
        self.contact_ids = contact_ids;
    }

    /// Opens the composer for those of `contacts` that have an email address.
    pub fn show_for(&mut self, contacts: &[Contact]) -> usize {
        self.contact_ids = contacts
            .iter()
            .filter(|c| c.has_email())
            .map(|c| c.id)
            .collect();
        self.contact_ids.len()
    }

    pub fn close(&mut self) {
        self.contact_ids.clear();
    }

    pub fn recipients(&self) -> &[i64] {
        &self.contact_ids
    }

    pub fn recipients_label(&self) -> String {
        plural(self.contact_ids.len(), "recipient")
    }

    pub async fn send(&mut self, subject: &str, body: &str) -> Outcome<EmailSendResults> {
        let subject = subject.trim();
        let body = body.trim();
        if subject.is_empty() || body.is_empty() {
            return self.ctx.reject("Please fill in subject and message");
        }
        if self.contact_ids.is_empty() {
            return self.ctx.reject("No recipients selected");
        }

        let prompt = format!(
            "Send this email to {}?",
            plural(self.contact_ids.len(), "contact")
        );
        if !self.ctx.confirm("Confirm Send", &prompt) {
            return Outcome::Cancelled;
        }

        self.ctx.notify(NoticeLevel::Info, "Sending emails...");
        let request = SendEmailRequest {
            contact_ids: self.contact_ids.clone(),
            subject: subject.to_string(),
            message: body.to_string(),
            body_text: body.to_string(),
            body_html: format_email_body(body, &self.signature),
        };

        match self.ctx.api.send_email(&request).await {
            Ok(results) => {
                let sent = results.sent();
                let failed = results.failed();
                let mut message = format!(
                    "Successfully sent {}!",
                    plural(sent as usize, "email")
                );
                let level = if failed > 0 {
                    message.push_str(&format!(" ({} failed)", failed));
                    NoticeLevel::Warning
                } else {
                    NoticeLevel::Success
                };
                tracing::info!("Email send: {} sent, {} failed", sent, failed);
                self.ctx.notify(level, &message);
                self.close();
                Outcome::Done(results)
            }
            Err(e) => self.ctx.fail("Error sending emails", &e),
        }
    }

    /// Records a manual touch (call, meeting, ...) against one contact.
    pub async fn log_touch(
        &self,
        contact_id: i64,
        outreach_type: Option<&str>,
        notes: &str,
    ) -> Outcome<Option<Contact>> {
        let request = LogTouchRequest {
            contact_id,
            outreach_type: outreach_type
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or(DEFAULT_TOUCH_TYPE)
                .to_string(),
            notes: notes.trim().to_string(),
        };

        match self.ctx.api.log_touch(&request).await {
            Ok(contact) => {
                self.ctx
                    .success(&format!("{} logged", request.outreach_type));
                Outcome::Done(contact)
            }
            Err(e) => self.ctx.fail("Error logging outreach", &e),
        }
    }
}
