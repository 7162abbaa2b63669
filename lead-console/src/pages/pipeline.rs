use shared_types::{Contact, ContactFilters, ContactStatus, UpdateContactRequest};

use super::{ConsoleContext, Outcome};
use crate::api::ContactsApi;
use crate::helpers::format::{format_date, initials};

/// Kanban view of contacts grouped by status.
pub struct PipelineBoard {
    ctx: ConsoleContext,
    contacts: Vec<Contact>,
}

impl PipelineBoard {
    pub fn new(ctx: ConsoleContext) -> Self {
        Self {
            ctx,
            contacts: Vec::new(),
        }
    }

    pub async fn load(&mut self) -> Outcome {
        match self.ctx.api.list_contacts(&ContactFilters::default()).await {
            Ok(contacts) => {
                self.contacts = contacts;
                Outcome::Done(())
            }
            Err(e) => self.ctx.fail("Error loading pipeline", &e),
        }
    }

    /// Columns in fixed order. Contacts with an unknown status appear in none.
    pub fn columns(&self) -> Vec<(ContactStatus, Vec<&Contact>)> {
        ContactStatus::ALL
            .iter()
            .map(|status| {
                let cards = self
                    .contacts
                    .iter()
                    .filter(|c| &c.status == status)
                    .collect();
                (status.clone(), cards)
            })
            .collect()
    }

    pub async fn move_contact(&mut self, contact_id: i64, status: ContactStatus) -> Outcome {
        let update = UpdateContactRequest {
            status: Some(status.clone()),
            ..Default::default()
        };

        match self.ctx.api.update_contact(contact_id, &update).await {
            Ok(_) => {
                tracing::info!("Moved contact {} to {}", contact_id, status);
                self.ctx.success("Contact status updated");
                self.load().await
            }
            Err(e) => self.ctx.fail("Error updating status", &e),
        }
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        for (status, cards) in self.columns() {
            lines.push(format!("== {} ({}) ==", status, cards.len()));
            for contact in cards {
                lines.push(format!(
                    "  [{}] #{} {} / {}",
                    initials(&contact.name),
                    contact.id,
                    contact.name,
                    contact
                        .company
                        .as_deref()
                        .filter(|c| !c.trim().is_empty())
                        .unwrap_or("No company")
                ));
                if let Some(email) = contact.email.as_deref().filter(|_| contact.has_email()) {
                    lines.push(format!("       {}", email));
                }
                lines.push(format!(
                    "       {} touches, last {}",
                    contact.total_touches,
                    format_date(contact.last_contacted.as_deref())
                ));
            }
            lines.push(String::new());
        }
        lines.join("\n").trim_end().to_string()
    }
}
