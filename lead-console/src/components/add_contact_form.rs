use shared_types::{Contact, CreateContactRequest, LeadSource, LeadTier, UpdateContactRequest};

use crate::api::ContactsApi;
use crate::pages::{ConsoleContext, Outcome};

/// Raw field values as entered; trimmed on submit.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub industry: String,
    pub tier: LeadTier,
    pub city: String,
    pub state: String,
    pub website_url: String,
}

impl ContactForm {
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            company: contact.company.clone().unwrap_or_default(),
            email: contact.email.clone().unwrap_or_default(),
            phone: contact.phone.clone().unwrap_or_default(),
            industry: contact.industry.clone().unwrap_or_default(),
            tier: contact.tier.clone().unwrap_or_default(),
            city: contact.city.clone().unwrap_or_default(),
            state: contact.state.clone().unwrap_or_default(),
            website_url: contact.website_url.clone().unwrap_or_default(),
        }
    }

    fn to_request(&self) -> CreateContactRequest {
        CreateContactRequest {
            name: self.name.trim().to_string(),
            company: self.company.trim().to_string(),
            email: non_blank(&self.email),
            phone: non_blank(&self.phone),
            industry: non_blank(&self.industry),
            tier: self.tier.clone(),
            city: non_blank(&self.city),
            state: non_blank(&self.state),
            website_url: non_blank(&self.website_url),
            source: LeadSource::Manual,
            ..Default::default()
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Add or edit a single contact, warning about duplicate emails.
pub struct AddContactForm {
    ctx: ConsoleContext,
    editing: Option<Contact>,
    duplicate: Option<Contact>,
}

impl AddContactForm {
    pub fn new(ctx: ConsoleContext) -> Self {
        Self {
            ctx,
            editing: None,
            duplicate: None,
        }
    }

    /// Opens the form, pre-filled when editing.
    pub fn show(&mut self, editing: Option<Contact>) -> ContactForm {
        self.duplicate = None;
        let form = editing
            .as_ref()
            .map(ContactForm::from_contact)
            .unwrap_or_default();
        self.editing = editing;
        form
    }

    pub fn close(&mut self) {
        self.editing = None;
        self.duplicate = None;
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn duplicate(&self) -> Option<&Contact> {
        self.duplicate.as_ref()
    }

    /// Looks up `email` and remembers any existing holder. Lookup failures are
    /// logged only.
    pub async fn check_duplicate(&mut self, email: &str) -> Option<&Contact> {
        self.duplicate = None;
        let email = email.trim();
        if email.is_empty() {
            return None;
        }

        match self.ctx.api.check_duplicate(email).await {
            Ok(found) => {
                let editing_id = self.editing.as_ref().map(|c| c.id);
                self.duplicate = found.filter(|c| Some(c.id) != editing_id);
            }
            Err(e) => tracing::warn!("Duplicate check for {} failed: {}", email, e),
        }
        self.duplicate.as_ref()
    }

    pub async fn submit(&mut self, form: &ContactForm) -> Outcome<Contact> {
        if self.duplicate.is_some()
            && !self
                .ctx
                .confirm("Duplicate Contact", "This email already exists. Add anyway?")
        {
            return Outcome::Cancelled;
        }

        let request = form.to_request();
        if request.name.is_empty() || request.company.is_empty() {
            return self.ctx.reject("Please fill in required fields");
        }

        let outcome = match &self.editing {
            Some(existing) => {
                let update = UpdateContactRequest::from(request);
                match self.ctx.api.update_contact(existing.id, &update).await {
                    Ok(contact) => {
                        self.ctx.success("Contact updated successfully!");
                        Outcome::Done(contact)
                    }
                    Err(e) => self.ctx.fail("Error updating contact", &e),
                }
            }
            None => match self.ctx.api.create_contact(&request).await {
                Ok(contact) => {
                    tracing::info!("Created contact {} ({})", contact.id, contact.name);
                    self.ctx.success("Lead added successfully!");
                    Outcome::Done(contact)
                }
                Err(e) => self.ctx.fail("Error adding lead", &e),
            },
        };

        if outcome.is_done() {
            self.close();
        }
        outcome
    }
}
