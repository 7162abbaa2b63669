use serde::{Deserialize, Serialize};

use crate::null_to_default;

/// Option lists for the filter sidebar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    #[serde(deserialize_with = "null_to_default")]
    pub job_categories: Vec<String>,
    #[serde(deserialize_with = "null_to_default")]
    pub statuses: Vec<String>,
    #[serde(deserialize_with = "null_to_default")]
    pub industries: Vec<String>,
    #[serde(deserialize_with = "null_to_default")]
    pub tiers: Vec<String>,
    #[serde(deserialize_with = "null_to_default")]
    pub sources: Vec<String>,
}
