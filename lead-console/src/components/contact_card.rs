use shared_types::{Contact, ContactDetailResponse, Note};

use crate::api::ContactsApi;
use crate::helpers::format::{format_date, format_datetime, initials, or_dash, tel_uri};
use crate::pages::{ConsoleContext, Outcome};

#[derive(Debug, Clone, PartialEq)]
pub enum CardAction {
    SendEmail,
    Call(String),
    Edit,
}

/// Detail view of one contact with its notes and outreach history.
pub struct ContactCard {
    ctx: ConsoleContext,
    detail: Option<ContactDetailResponse>,
}

impl ContactCard {
    pub fn new(ctx: ConsoleContext) -> Self {
        Self { ctx, detail: None }
    }

    pub async fn show(&mut self, contact_id: i64) -> Outcome {
        match self.ctx.api.get_contact(contact_id).await {
            Ok(detail) => {
                self.detail = Some(detail);
                Outcome::Done(())
            }
            Err(e) => self.ctx.fail("Error loading contact details", &e),
        }
    }

    pub fn close(&mut self) {
        self.detail = None;
    }

    pub fn contact(&self) -> Option<&Contact> {
        self.detail.as_ref().map(|d| &d.contact)
    }

    fn notes(&self) -> &[Note] {
        match &self.detail {
            Some(d) if !d.notes.is_empty() => &d.notes,
            Some(d) => &d.contact.notes,
            None => &[],
        }
    }

    pub fn actions(&self) -> Vec<CardAction> {
        let Some(contact) = self.contact() else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        if contact.has_email() {
            actions.push(CardAction::SendEmail);
        }
        if let Some(phone) = contact.phone.as_deref().filter(|_| contact.has_phone()) {
            actions.push(CardAction::Call(tel_uri(phone)));
        }
        actions.push(CardAction::Edit);
        actions
    }

    /// Posts a note and refetches the contact so the list shows it.
    pub async fn save_note(&mut self, content: &str) -> Outcome {
        let content = content.trim();
        if content.is_empty() {
            return self.ctx.reject("Please enter a note");
        }
        let Some(contact_id) = self.contact().map(|c| c.id) else {
            return self.ctx.reject("No contact selected");
        };

        if let Err(e) = self.ctx.api.add_note(contact_id, content).await {
            return self.ctx.fail("Error adding note", &e);
        }
        self.ctx.success("Note added");
        self.show(contact_id).await
    }

    pub fn render(&self) -> String {
        let Some(detail) = &self.detail else {
            return String::new();
        };
        let contact = &detail.contact;

        let mut lines = vec![
            format!("[{}] {}", initials(&contact.name), contact.name),
            format!("    {}", or_dash(contact.company.as_deref())),
            String::new(),
            format!("Email:    {}", or_dash(contact.email.as_deref())),
            format!("Phone:    {}", or_dash(contact.phone.as_deref())),
            format!("Industry: {}", or_dash(contact.industry.as_deref())),
            format!("Website:  {}", or_dash(contact.website_url.as_deref())),
        ];

        let location: Vec<&str> = [contact.city.as_deref(), contact.state.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect();
        if !location.is_empty() {
            lines.push(format!("Location: {}", location.join(", ")));
        }

        lines.push(String::new());
        lines.push("Quick Stats".to_string());
        lines.push(format!(
            "  Tier: {}",
            contact
                .tier
                .as_ref()
                .map(|t| t.to_string())
                .unwrap_or_else(|| "Not Scored".to_string())
        ));
        lines.push(format!("  Status: {}", contact.status));
        lines.push(format!("  Source: {}", contact.source_or_default()));
        lines.push(format!("  Total Touches: {}", contact.total_touches));
        lines.push(format!(
            "  Last Contacted: {}",
            format_date(contact.last_contacted.as_deref())
        ));
        if let Some(label) = contact.opportunity_label() {
            lines.push(format!("  AI Opportunity: {}", label));
        }

        lines.push(String::new());
        lines.push("Notes".to_string());
        let notes = self.notes();
        if notes.is_empty() {
            lines.push("  No notes yet".to_string());
        }
        for note in notes {
            lines.push(format!(
                "  - {} ({})",
                note.content,
                format_datetime(note.created_at.as_deref())
            ));
        }

        if !detail.outreach_history.is_empty() {
            lines.push(String::new());
            lines.push("Outreach History".to_string());
            for touch in &detail.outreach_history {
                lines.push(format!(
                    "  {} {} {}",
                    format_date(touch.sent_at.as_deref()),
                    touch.outreach_type,
                    touch.subject.as_deref().unwrap_or("")
                ));
            }
        }

        let actions: Vec<&str> = self
            .actions()
            .iter()
            .map(|a| match a {
                CardAction::SendEmail => "email",
                CardAction::Call(_) => "call",
                CardAction::Edit => "edit",
            })
            .collect();
        lines.push(String::new());
        lines.push(format!("Actions: {}", actions.join(", ")));

        lines.join("\n")
    }
}
