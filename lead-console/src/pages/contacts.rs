use clap::ValueEnum;
use shared_types::{Contact, ContactFilters, ContactStatus, LeadTier};

use super::{ConsoleContext, Outcome};
use crate::api::ContactsApi;
use crate::components::{AddContactForm, ContactCard, EmailComposer, Signature};
use crate::helpers::format::{format_date, or_dash, tel_uri, truncate};
use crate::helpers::notify::NoticeLevel;
use crate::helpers::selection::Selection;

/// One-click presets that replace every active filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QuickFilter {
    /// Status Lead
    Fresh,
    /// Tier High
    HighTier,
    NeedsEmail,
    HasEmail,
    HasPhone,
    All,
}

impl QuickFilter {
    pub fn filters(self) -> ContactFilters {
        match self {
            QuickFilter::Fresh => ContactFilters {
                status: Some(ContactStatus::Lead),
                ..Default::default()
            },
            QuickFilter::HighTier => ContactFilters {
                tier: Some(LeadTier::High),
                ..Default::default()
            },
            QuickFilter::NeedsEmail => ContactFilters {
                has_email: Some(false),
                ..Default::default()
            },
            QuickFilter::HasEmail => ContactFilters {
                has_email: Some(true),
                ..Default::default()
            },
            QuickFilter::HasPhone => ContactFilters {
                has_phone: Some(true),
                ..Default::default()
            },
            QuickFilter::All => ContactFilters::default(),
        }
    }
}

/// The backend may ignore the email/phone presence flags, so they are
/// re-applied to whatever comes back. Blank values count as missing.
fn apply_presence_filters(contacts: Vec<Contact>, filters: &ContactFilters) -> Vec<Contact> {
    contacts
        .into_iter()
        .filter(|c| match filters.has_email {
            Some(wanted) => c.has_email() == wanted,
            None => true,
        })
        .filter(|c| filters.has_phone != Some(true) || c.has_phone())
        .collect()
}

pub struct ContactsPage {
    ctx: ConsoleContext,
    filters: ContactFilters,
    contacts: Vec<Contact>,
    selection: Selection,
    pub card: ContactCard,
    pub form: AddContactForm,
    pub composer: EmailComposer,
}

impl ContactsPage {
    pub fn new(ctx: ConsoleContext, signature: Signature) -> Self {
        Self {
            card: ContactCard::new(ctx.clone()),
            form: AddContactForm::new(ctx.clone()),
            composer: EmailComposer::new(ctx.clone(), signature),
            ctx,
            filters: ContactFilters::default(),
            contacts: Vec::new(),
            selection: Selection::new(),
        }
    }

    pub fn filters(&self) -> &ContactFilters {
        &self.filters
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_search(&mut self, search: &str) {
        let search = search.trim();
        self.filters.search = (!search.is_empty()).then(|| search.to_string());
    }

    pub fn set_filters(&mut self, filters: ContactFilters) {
        self.filters = filters;
    }

    pub fn apply_quick_filter(&mut self, quick: QuickFilter) {
        self.filters = quick.filters();
    }

    pub fn clear_filters(&mut self) {
        self.filters = ContactFilters::default();
    }

    pub async fn load(&mut self) -> Outcome {
        match self.ctx.api.list_contacts(&self.filters).await {
            Ok(contacts) => {
                self.contacts = apply_presence_filters(contacts, &self.filters);
                self.selection.retain_visible(&self.contacts);
                tracing::debug!("Loaded {} contacts", self.contacts.len());
                Outcome::Done(())
            }
            Err(e) => self.ctx.fail("Error loading contacts", &e),
        }
    }

    pub fn toggle_select_mode(&mut self) {
        self.selection.toggle_mode();
    }

    pub fn select_all(&mut self, checked: bool) {
        self.selection.select_all(checked, &self.contacts);
    }

    pub fn toggle_contact(&mut self, contact_id: i64) {
        self.selection.toggle(contact_id);
    }

    pub fn all_selected(&self) -> bool {
        self.selection.all_selected(&self.contacts)
    }

    /// Opens the composer for the selected contacts that have an email.
    pub fn bulk_email(&mut self) -> Outcome<usize> {
        if self.selection.is_empty() {
            return self.ctx.reject("Please select contacts to email");
        }

        let selected: Vec<Contact> = self
            .contacts
            .iter()
            .filter(|c| self.selection.is_selected(c.id))
            .cloned()
            .collect();
        let count = self.composer.show_for(&selected);
        if count == 0 {
            return self
                .ctx
                .reject("None of the selected contacts have email addresses");
        }
        Outcome::Done(count)
    }

    pub async fn bulk_delete(&mut self) -> Outcome<u64> {
        if self.selection.is_empty() {
            return self.ctx.reject("Please select contacts to delete");
        }

        let prompt = format!(
            "Delete {} selected contacts? This cannot be undone.",
            self.selection.len()
        );
        if !self.ctx.confirm("Delete Selected Contacts", &prompt) {
            return Outcome::Cancelled;
        }

        match self.ctx.api.bulk_delete_contacts(&self.selection.ids()).await {
            Ok(deleted) => {
                self.ctx
                    .success(&format!("Successfully deleted {} contacts", deleted));
                self.selection.clear();
                if self.selection.is_active() {
                    self.selection.toggle_mode();
                }
                self.load().await;
                Outcome::Done(deleted)
            }
            Err(e) => self.ctx.fail("Error deleting contacts", &e),
        }
    }

    /// Wipes every contact after two separate confirmations.
    pub async fn delete_all(&mut self) -> Outcome<u64> {
        if !self.ctx.confirm(
            "Delete All Leads",
            "WARNING: This will permanently delete ALL leads in your database. This action cannot be undone. Are you absolutely sure?",
        ) {
            return Outcome::Cancelled;
        }
        if !self.ctx.confirm(
            "Final Confirmation",
            "This is your final confirmation. All lead data will be lost forever. Continue with deletion?",
        ) {
            return Outcome::Cancelled;
        }

        match self.ctx.api.delete_all_contacts().await {
            Ok(deleted) => {
                tracing::warn!("Deleted all contacts ({})", deleted);
                self.ctx.success(&format!("Deleted {} contacts", deleted));
                self.load().await;
                Outcome::Done(deleted)
            }
            Err(e) => self.ctx.fail("Error deleting all contacts", &e),
        }
    }

    pub async fn delete_contact(&mut self, contact_id: i64) -> Outcome {
        if !self.ctx.confirm(
            "Delete Contact",
            "Are you sure you want to delete this contact? This action cannot be undone.",
        ) {
            return Outcome::Cancelled;
        }

        match self.ctx.api.delete_contact(contact_id).await {
            Ok(()) => {
                self.ctx.success("Contact deleted successfully");
                self.card.close();
                self.load().await
            }
            Err(e) => self.ctx.fail("Error deleting contact", &e),
        }
    }

    /// Shows the detail card. Row clicks do nothing in select mode.
    pub async fn open_contact(&mut self, contact_id: i64) -> Outcome {
        if self.selection.is_active() {
            return Outcome::Cancelled;
        }
        self.card.show(contact_id).await
    }

    /// The `tel:` URI for a contact's phone.
    pub fn call_contact(&self, contact_id: i64) -> Outcome<String> {
        let phone = self
            .contacts
            .iter()
            .chain(self.card.contact())
            .find(|c| c.id == contact_id && c.has_phone())
            .and_then(|c| c.phone.clone());

        match phone {
            Some(phone) => {
                self.ctx
                    .notify(NoticeLevel::Info, &format!("Phone number: {}", phone));
                Outcome::Done(tel_uri(&phone))
            }
            None => self.ctx.reject("This contact has no phone number"),
        }
    }

    pub fn render(&self) -> String {
        let mut lines = vec![format!("Contacts ({})", self.contacts.len())];
        if self.selection.is_active() {
            let header = if self.all_selected() { "[x]" } else { "[ ]" };
            lines.push(format!("{} select all   {}", header, self.selection.label()));
        }
        lines.push(String::new());

        if self.contacts.is_empty() {
            lines.push("No contacts found".to_string());
            return lines.join("\n");
        }

        lines.push(format!(
            "{:<6} {:<24} {:<22} {:<28} {:<16} {:<7} {:<15} {:>7}  {}",
            "ID", "Name", "Company", "Email", "Phone", "Tier", "Status", "Touches", "Last Contacted"
        ));
        for contact in &self.contacts {
            let mut row = format!(
                "{:<6} {:<24} {:<22} {:<28} {:<16} {:<7} {:<15} {:>7}  {}",
                contact.id,
                truncate(&contact.name, 21),
                truncate(or_dash(contact.company.as_deref()), 19),
                truncate(or_dash(contact.email.as_deref()), 25),
                or_dash(contact.phone.as_deref()),
                contact
                    .tier
                    .as_ref()
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                contact.status,
                contact.total_touches,
                format_date(contact.last_contacted.as_deref()),
            );
            if self.selection.is_active() {
                let mark = if self.selection.is_selected(contact.id) { "[x]" } else { "[ ]" };
                row = format!("{} {}", mark, row);
            }
            lines.push(row);
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{contact, contact_with_email, FakeApi, Harness};

    fn sample() -> Vec<Contact> {
        vec![
            contact_with_email(1, "Ann", "ann@a.com"),
            Contact {
                email: Some("   ".to_string()),
                phone: Some("555 0100".to_string()),
                ..contact(2, "Bob")
            },
            Contact {
                tier: Some(LeadTier::High),
                status: ContactStatus::Replied,
                ..contact(3, "Cy")
            },
        ]
    }

    fn page(harness: &Harness) -> ContactsPage {
        ContactsPage::new(harness.context(), Signature::default())
    }

    #[tokio::test]
    async fn test_needs_email_treats_blank_as_missing() {
        let harness = Harness::new(FakeApi::with_contacts(sample()), &[]);
        let mut page = page(&harness);
        page.apply_quick_filter(QuickFilter::NeedsEmail);
        page.load().await;

        let ids: Vec<i64> = page.contacts().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_quick_filter_replaces_filters() {
        let harness = Harness::new(FakeApi::with_contacts(sample()), &[]);
        let mut page = page(&harness);
        page.set_search("ann");
        page.apply_quick_filter(QuickFilter::HighTier);

        assert_eq!(page.filters().search, None);
        assert_eq!(page.filters().tier, Some(LeadTier::High));

        page.clear_filters();
        assert_eq!(page.filters(), &ContactFilters::default());
    }

    #[tokio::test]
    async fn test_select_all_tracks_visible_list() {
        let harness = Harness::new(FakeApi::with_contacts(sample()), &[]);
        let mut page = page(&harness);
        page.load().await;
        page.toggle_select_mode();

        page.select_all(true);
        assert!(page.all_selected());
        assert!(page.render().contains("[x] select all   3 selected"));

        page.toggle_contact(2);
        assert!(!page.all_selected());

        page.apply_quick_filter(QuickFilter::HasPhone);
        page.load().await;
        assert_eq!(page.selection().ids(), Vec::<i64>::new());
    }

    #[tokio::test]
    async fn test_bulk_delete_confirms_and_resets() {
        let harness = Harness::new(FakeApi::with_contacts(sample()), &[true]);
        let mut page = page(&harness);
        page.load().await;
        page.toggle_select_mode();
        page.toggle_contact(1);
        page.toggle_contact(3);

        assert_eq!(page.bulk_delete().await.done(), Some(2));
        assert_eq!(
            harness.confirm.prompts(),
            vec!["Delete 2 selected contacts? This cannot be undone."]
        );
        assert!(!page.selection().is_active());
        assert!(page.selection().is_empty());
        assert_eq!(page.contacts().len(), 1);
    }

    #[tokio::test]
    async fn test_bulk_delete_requires_selection() {
        let harness = Harness::new(FakeApi::with_contacts(sample()), &[true]);
        let mut page = page(&harness);
        page.load().await;

        assert!(matches!(page.bulk_delete().await, Outcome::Rejected(_)));
        assert!(harness.confirm.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_delete_all_needs_two_confirmations() {
        let harness = Harness::new(FakeApi::with_contacts(sample()), &[true, false]);
        let mut page = page(&harness);

        assert!(matches!(page.delete_all().await, Outcome::Cancelled));
        assert_eq!(harness.confirm.prompts().len(), 2);
        assert_eq!(harness.api.call_count("delete_all_contacts"), 0);

        let harness = Harness::new(FakeApi::with_contacts(sample()), &[false]);
        let mut page = ContactsPage::new(harness.context(), Signature::default());
        assert!(matches!(page.delete_all().await, Outcome::Cancelled));
        assert_eq!(harness.confirm.prompts().len(), 1);

        let harness = Harness::new(FakeApi::with_contacts(sample()), &[true, true]);
        let mut page = ContactsPage::new(harness.context(), Signature::default());
        assert_eq!(page.delete_all().await.done(), Some(3));
        assert!(page.contacts().is_empty());
    }

    #[tokio::test]
    async fn test_bulk_email_only_uses_contacts_with_email() {
        let harness = Harness::new(FakeApi::with_contacts(sample()), &[]);
        let mut page = page(&harness);
        page.load().await;
        page.toggle_select_mode();

        assert!(matches!(page.bulk_email(), Outcome::Rejected(_)));

        page.toggle_contact(2);
        assert!(matches!(
            page.bulk_email(),
            Outcome::Rejected(ref m) if m == "None of the selected contacts have email addresses"
        ));

        page.select_all(true);
        assert_eq!(page.bulk_email().done(), Some(1));
        assert_eq!(page.composer.recipients(), &[1]);
    }

    #[tokio::test]
    async fn test_open_contact_ignored_in_select_mode() {
        let harness = Harness::new(FakeApi::with_contacts(sample()), &[]);
        let mut page = page(&harness);
        page.toggle_select_mode();

        assert!(matches!(page.open_contact(1).await, Outcome::Cancelled));
        assert_eq!(harness.api.call_count("get_contact"), 0);

        page.toggle_select_mode();
        assert!(page.open_contact(1).await.is_done());
        assert_eq!(page.card.contact().map(|c| c.id), Some(1));
    }

    #[tokio::test]
    async fn test_call_contact_uses_digits() {
        let harness = Harness::new(FakeApi::with_contacts(sample()), &[]);
        let mut page = page(&harness);
        page.load().await;

        assert_eq!(page.call_contact(2).done(), Some("tel:5550100".to_string()));
        assert!(matches!(page.call_contact(1), Outcome::Rejected(_)));
    }

    #[tokio::test]
    async fn test_load_failure_notifies() {
        let harness = Harness::new(FakeApi::new(), &[]);
        harness.api.fail("list_contacts");
        let mut page = page(&harness);

        assert!(page.load().await.is_failed());
        assert_eq!(
            harness.notifier.last(),
            Some((NoticeLevel::Danger, "list_contacts failed".to_string()))
        );
    }
}
