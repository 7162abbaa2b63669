use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::null_to_default;

/// Headline numbers for the analytics page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    #[serde(deserialize_with = "null_to_default")]
    pub total_contacts: u64,
    #[serde(deserialize_with = "null_to_default")]
    pub with_email: u64,
    #[serde(deserialize_with = "null_to_default")]
    pub email_percentage: f64,
    #[serde(deserialize_with = "null_to_default")]
    pub reply_rate: f64,
    #[serde(deserialize_with = "null_to_default")]
    pub total_replied: u64,
    #[serde(deserialize_with = "null_to_default")]
    pub conversion_rate: f64,
    #[serde(deserialize_with = "null_to_default")]
    pub total_converted: u64,
    #[serde(deserialize_with = "null_to_default")]
    pub high_ai_opportunity: u64,
    #[serde(deserialize_with = "null_to_default")]
    pub active_campaigns: u64,
    #[serde(deserialize_with = "null_to_default")]
    pub total_campaign_sends: u64,
    #[serde(deserialize_with = "null_to_default")]
    pub tier_breakdown: BTreeMap<String, u64>,
    #[serde(deserialize_with = "null_to_default")]
    pub source_breakdown: BTreeMap<String, u64>,
}

/// One row of the industry or source performance tables; `label` is the
/// industry name or the source name depending on the endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceRow {
    #[serde(alias = "industry", alias = "source", default)]
    pub label: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub total: u64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub contacted: u64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub reply_rate: f64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub conversion_rate: f64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub email_rate: f64,
    #[serde(default)]
    pub avg_health_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct DashboardStatsResponse {
    #[serde(default)]
    pub stats: DashboardStats,
}

#[derive(Debug, Deserialize)]
pub struct PerformanceResponse {
    #[serde(default, deserialize_with = "null_to_default")]
    pub performance: Vec<PerformanceRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_row_label_aliases() {
        let industry: PerformanceRow =
            serde_json::from_str(r#"{"industry": "dental", "total": 10, "reply_rate": 12.5}"#)
                .unwrap();
        assert_eq!(industry.label, "dental");
        assert_eq!(industry.total, 10);

        let source: PerformanceRow =
            serde_json::from_str(r#"{"source": "yelp", "total": 4, "avg_health_score": null}"#)
                .unwrap();
        assert_eq!(source.label, "yelp");
        assert_eq!(source.avg_health_score, None);
    }

    #[test]
    fn test_stats_with_partial_payload() {
        let stats: DashboardStats = serde_json::from_str(
            r#"{"total_contacts": 40, "tier_breakdown": {"High": 5}, "reply_rate": null}"#,
        )
        .unwrap();
        assert_eq!(stats.total_contacts, 40);
        assert_eq!(stats.reply_rate, 0.0);
        assert_eq!(stats.tier_breakdown.get("High"), Some(&5));
        assert!(stats.source_breakdown.is_empty());
    }
}
