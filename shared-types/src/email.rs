use serde::{Deserialize, Serialize};

use crate::{null_to_default, Contact};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub id: i64,
    pub name: String,
    pub subject_line: String,
    pub body: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub is_default: bool,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTemplateRequest {
    pub name: String,
    pub subject_line: String,
    pub body: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTemplateRequest {
    pub name: String,
    pub subject_line: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct TemplatesResponse {
    pub templates: Vec<EmailTemplate>,
}

/// Outbound email. `message` is the plain body, `body_html` the formatted one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEmailRequest {
    pub contact_ids: Vec<i64>,
    pub subject: String,
    pub message: String,
    pub body_text: String,
    pub body_html: String,
}

/// Per-recipient result, one entry per requested contact id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailSendResult {
    pub contact_id: i64,
    pub success: bool,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    #[serde(default)]
    pub email_actually_sent: bool,
    pub error: Option<String>,
}

/// The backend reports either per-recipient rows or an aggregate.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EmailSendResults {
    Summary {
        #[serde(default)]
        sent: u64,
        #[serde(default)]
        failed: u64,
    },
    PerContact(Vec<EmailSendResult>),
}

impl EmailSendResults {
    pub fn sent(&self) -> u64 {
        match self {
            EmailSendResults::Summary { sent, .. } => *sent,
            EmailSendResults::PerContact(rows) => rows.iter().filter(|r| r.success).count() as u64,
        }
    }

    pub fn failed(&self) -> u64 {
        match self {
            EmailSendResults::Summary { failed, .. } => *failed,
            EmailSendResults::PerContact(rows) => rows.iter().filter(|r| !r.success).count() as u64,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SendEmailResponse {
    pub results: EmailSendResults,
}

/// Manual outreach record (call, meeting, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogTouchRequest {
    pub contact_id: i64,
    pub outreach_type: String,
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct LogTouchResponse {
    #[serde(default, deserialize_with = "null_to_default")]
    pub contact: Option<Contact>,
}
