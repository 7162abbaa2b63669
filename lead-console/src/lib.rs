pub mod api;
pub mod cli;
pub mod components;
pub mod config;
pub mod helpers;
pub mod jobs;
pub mod pages;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ApiClient, LeadApi};
pub use config::ConsoleConfig;
