pub mod add_contact_form;
pub mod contact_card;
pub mod email_composer;
pub mod filter_sidebar;

pub use add_contact_form::{AddContactForm, ContactForm};
pub use contact_card::{CardAction, ContactCard};
pub use email_composer::{format_email_body, EmailComposer, Signature};
pub use filter_sidebar::FilterSidebar;
