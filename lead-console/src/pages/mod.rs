//! Page controllers. Each owns its view state, loads on activation and
//! re-renders its whole text region after every change.

use std::sync::Arc;

use crate::api::{ApiError, LeadApi};
use crate::helpers::confirm::Confirm;
use crate::helpers::notify::{NoticeLevel, Notifier};

pub mod analytics;
pub mod campaigns;
pub mod contacts;
pub mod dashboard;
pub mod discovery;
pub mod import_export;
pub mod pipeline;
pub mod templates;

/// Result of one user intent. The user has already been notified.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T = ()> {
    Done(T),
    /// A confirmation was declined; nothing was sent.
    Cancelled,
    /// Local validation failed; nothing was sent.
    Rejected(String),
    Failed(String),
}

impl<T> Outcome<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn done(self) -> Option<T> {
        match self {
            Outcome::Done(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Done(value) => Outcome::Done(f(value)),
            Outcome::Cancelled => Outcome::Cancelled,
            Outcome::Rejected(message) => Outcome::Rejected(message),
            Outcome::Failed(message) => Outcome::Failed(message),
        }
    }
}

/// Collaborators every controller needs.
#[derive(Clone)]
pub struct ConsoleContext {
    pub api: Arc<dyn LeadApi>,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn Confirm>,
}

impl ConsoleContext {
    pub fn new(api: Arc<dyn LeadApi>, notifier: Arc<dyn Notifier>, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            api,
            notifier,
            confirm,
        }
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        self.notifier.clone()
    }

    pub fn notify(&self, level: NoticeLevel, message: &str) {
        self.notifier.notify(level, message);
    }

    pub fn success(&self, message: &str) {
        self.notify(NoticeLevel::Success, message);
    }

    pub fn confirm(&self, title: &str, message: &str) -> bool {
        self.confirm.confirm(title, message)
    }

    /// Warns about invalid input.
    pub fn reject<T>(&self, message: &str) -> Outcome<T> {
        self.notify(NoticeLevel::Warning, message);
        Outcome::Rejected(message.to_string())
    }

    /// Logs a failed call and shows the backend's message, falling back to
    /// `fallback` when the backend gave none.
    pub fn fail<T>(&self, fallback: &str, err: &ApiError) -> Outcome<T> {
        tracing::error!("{}: {}", fallback, err);
        let message = err.backend_message().unwrap_or(fallback).to_string();
        self.notify(NoticeLevel::Danger, &message);
        Outcome::Failed(message)
    }
}
